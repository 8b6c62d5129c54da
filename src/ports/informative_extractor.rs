//! Informative Extractor Port - pulls positive evidence out of "no" answers.

/// Port for extracting the informative part of a negative answer.
///
/// "No, I want the tech company" carries "I want the tech company" as
/// evidence about the real intent. Returns an empty string when the answer
/// carries nothing beyond the refusal (or when there is no answer).
pub trait InformativeExtractor: Send + Sync {
    fn extract(&self, answer: Option<&str>) -> String;
}
