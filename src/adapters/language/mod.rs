//! Reference language adapters.
//!
//! - `KeywordStanceDetector` - yes / no / other by first token
//! - `PrefixStrippingExtractor` - informative content of "no" answers
//! - `TemplateQuestionGenerator` - fixed-template clarifying questions

mod extractor;
mod question;
mod stance;
pub mod text;

pub use extractor::PrefixStrippingExtractor;
pub use question::TemplateQuestionGenerator;
pub use stance::KeywordStanceDetector;
