//! Keyword-based stance detection.

use std::collections::HashSet;

use crate::ports::{Stance, StanceDetector};

use super::text::tokens;

const YES_WORDS: &[&str] = &[
    "yes", "yeah", "yep", "yup", "sure", "correct", "right", "exactly", "indeed", "absolutely",
    "definitely",
];

const NO_WORDS: &[&str] = &["no", "nope", "nah", "not", "never", "neither"];

/// Classifies an answer by its first normalized token.
#[derive(Debug, Clone)]
pub struct KeywordStanceDetector {
    yes_words: HashSet<String>,
    no_words: HashSet<String>,
}

impl Default for KeywordStanceDetector {
    fn default() -> Self {
        Self::new(
            YES_WORDS.iter().map(|w| w.to_string()),
            NO_WORDS.iter().map(|w| w.to_string()),
        )
    }
}

impl KeywordStanceDetector {
    /// Creates a detector from custom word lists (matched case-insensitively).
    pub fn new(
        yes_words: impl IntoIterator<Item = String>,
        no_words: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            yes_words: yes_words.into_iter().map(|w| w.to_lowercase()).collect(),
            no_words: no_words.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }
}

impl StanceDetector for KeywordStanceDetector {
    fn stance(&self, answer: Option<&str>) -> Stance {
        let first = match answer.and_then(|a| tokens(a).into_iter().next()) {
            Some(token) => token,
            None => return Stance::Other,
        };
        if self.yes_words.contains(&first) {
            Stance::Yes
        } else if self.no_words.contains(&first) {
            Stance::No
        } else {
            Stance::Other
        }
    }
}
