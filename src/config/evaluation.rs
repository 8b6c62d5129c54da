//! Retrieval evaluation configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::ValidationError;

/// Inputs for scoring resolved queries; evaluation is skipped without qrels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// TREC qrels file keyed by `{topic_id}-{facet_id}`
    #[serde(default)]
    pub qrels_path: Option<PathBuf>,

    /// `doc_id<TAB>text` corpus searched for each resolved query
    #[serde(default)]
    pub corpus_path: Option<PathBuf>,
}

impl EvaluationConfig {
    pub fn is_enabled(&self) -> bool {
        self.qrels_path.is_some()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.corpus_path.is_some() && self.qrels_path.is_none() {
            return Err(ValidationError::MissingRequired("EVALUATION__QRELS_PATH"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_by_default() {
        let config = EvaluationConfig::default();
        assert!(!config.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_corpus_without_qrels_is_rejected() {
        let config = EvaluationConfig {
            qrels_path: None,
            corpus_path: Some(PathBuf::from("corpus.tsv")),
        };
        assert!(config.validate().is_err());
    }
}
