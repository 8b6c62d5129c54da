//! Informative content hidden in negative answers.

use crate::ports::InformativeExtractor;

use super::text::strip_punctuation;

/// Drops a leading refusal ("no", "i m", "i am") and keeps the rest.
///
/// "No, I'm looking for the company" becomes "I m looking for the company";
/// a bare "no" carries nothing and becomes an empty string.
#[derive(Debug, Clone)]
pub struct PrefixStrippingExtractor {
    prefixes: Vec<Vec<String>>,
}

impl Default for PrefixStrippingExtractor {
    fn default() -> Self {
        Self::new(["no", "i m", "i am"])
    }
}

impl PrefixStrippingExtractor {
    /// Prefixes are matched token-wise and case-insensitively; the first match wins.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefixes = prefixes
            .into_iter()
            .map(|p| {
                p.as_ref()
                    .split_whitespace()
                    .map(str::to_lowercase)
                    .collect::<Vec<_>>()
            })
            .filter(|p| !p.is_empty())
            .collect();
        Self { prefixes }
    }
}

impl InformativeExtractor for PrefixStrippingExtractor {
    fn extract(&self, answer: Option<&str>) -> String {
        let Some(answer) = answer else {
            return String::new();
        };
        let stripped = strip_punctuation(answer);
        let words: Vec<&str> = stripped.split_whitespace().collect();

        let skip = self
            .prefixes
            .iter()
            .find(|prefix| {
                prefix.len() <= words.len()
                    && prefix
                        .iter()
                        .zip(&words)
                        .all(|(p, w)| w.to_lowercase() == *p)
            })
            .map_or(0, Vec::len);

        words[skip..].join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_refusal() {
        let extractor = PrefixStrippingExtractor::default();
        assert_eq!(extractor.extract(Some("No, I want the company.")), "I want the company");
        assert_eq!(extractor.extract(Some("I'm after the fruit")), "after the fruit");
        assert_eq!(extractor.extract(Some("i am after the fruit")), "after the fruit");
    }

    #[test]
    fn bare_refusal_and_missing_answer_are_empty() {
        let extractor = PrefixStrippingExtractor::default();
        assert_eq!(extractor.extract(Some("no")), "");
        assert_eq!(extractor.extract(Some("No.")), "");
        assert_eq!(extractor.extract(None), "");
    }

    #[test]
    fn only_whole_leading_tokens_are_stripped() {
        let extractor = PrefixStrippingExtractor::default();
        assert_eq!(extractor.extract(Some("nothing like that")), "nothing like that");
        assert_eq!(extractor.extract(Some("the fruit, no")), "the fruit no");
    }
}
