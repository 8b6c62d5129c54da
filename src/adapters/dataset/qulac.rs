//! Qulac dataset loader.
//!
//! The dataset is a single JSON object of columns (`topic`, `topic_id`,
//! `topic_desc`, `facet_desc`, `facet_id`, `question`, `answer`), each mapping
//! a row key to that row's value. Rows are grouped by topic, then by facet,
//! in row order.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

use crate::domain::clarify::{Facet, QuestionAnswer, Topic};
use crate::domain::foundation::{FacetId, TopicId, ValidationError};

const COLUMNS: [&str; 6] = ["topic", "topic_id", "facet_desc", "facet_id", "question", "answer"];

/// Errors raised while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("dataset is not valid JSON: {0}")]
    Parse(String),

    #[error("dataset has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("row '{row}' has no value in column '{column}'")]
    MissingValue { row: String, column: &'static str },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Topics of a Qulac-format dataset.
#[derive(Debug, Clone)]
pub struct QulacDataset {
    topics: Vec<Arc<Topic>>,
    by_query: HashMap<String, usize>,
}

struct FacetRows {
    id: String,
    description: String,
    questions_answers: Vec<QuestionAnswer>,
}

struct TopicRows {
    id: String,
    query: String,
    facets: Vec<FacetRows>,
}

impl QulacDataset {
    /// Reads and parses a dataset file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).await.map_err(|e| DatasetError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let dataset = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            topics = dataset.topics.len(),
            facets = dataset.topics.iter().map(|t| t.facets().len()).sum::<usize>(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DatasetError> {
        let root: Map<String, Value> =
            serde_json::from_str(raw).map_err(|e| DatasetError::Parse(e.to_string()))?;

        let mut columns = HashMap::new();
        for name in COLUMNS {
            let column = root
                .get(name)
                .and_then(Value::as_object)
                .ok_or(DatasetError::MissingColumn(name))?;
            columns.insert(name, column);
        }

        let mut grouped: Vec<TopicRows> = Vec::new();
        for row in row_keys(columns["answer"]) {
            let cell = |column: &'static str| -> Result<String, DatasetError> {
                columns[column]
                    .get(row)
                    .map(as_text)
                    .ok_or_else(|| DatasetError::MissingValue {
                        row: row.to_string(),
                        column,
                    })
            };
            let query = cell("topic")?;
            let facet_desc = cell("facet_desc")?;

            let topic_index = match grouped.iter().position(|t| t.query == query) {
                Some(index) => index,
                None => {
                    grouped.push(TopicRows {
                        id: String::new(),
                        query: query.clone(),
                        facets: Vec::new(),
                    });
                    grouped.len() - 1
                }
            };
            let topic = &mut grouped[topic_index];
            topic.id = cell("topic_id")?;

            let facet_index = match topic.facets.iter().position(|f| f.description == facet_desc) {
                Some(index) => index,
                None => {
                    topic.facets.push(FacetRows {
                        id: String::new(),
                        description: facet_desc,
                        questions_answers: Vec::new(),
                    });
                    topic.facets.len() - 1
                }
            };
            let facet = &mut topic.facets[facet_index];
            facet.id = cell("facet_id")?;
            facet
                .questions_answers
                .push(QuestionAnswer::new(cell("question")?, cell("answer")?));
        }

        let mut topics = Vec::with_capacity(grouped.len());
        for rows in grouped {
            let mut facets = Vec::with_capacity(rows.facets.len());
            for mut facet in rows.facets {
                facet
                    .questions_answers
                    .sort_by(|a, b| a.question.cmp(&b.question));
                facet.questions_answers.retain(|qa| !qa.question.is_empty());
                facets.push(Facet::new(
                    FacetId::new(facet.id)?,
                    facet.description,
                    facet.questions_answers,
                ));
            }
            topics.push(Arc::new(Topic::new(TopicId::new(rows.id)?, rows.query, facets)));
        }

        Ok(Self::from_topics(topics))
    }

    pub fn from_topics(topics: Vec<Arc<Topic>>) -> Self {
        let by_query = topics
            .iter()
            .enumerate()
            .map(|(index, topic)| (topic.query().to_string(), index))
            .collect();
        Self { topics, by_query }
    }

    pub fn topics(&self) -> &[Arc<Topic>] {
        &self.topics
    }

    pub fn topic_by_query(&self, query: &str) -> Option<&Arc<Topic>> {
        self.by_query.get(query).map(|&index| &self.topics[index])
    }

    pub fn topic_by_id(&self, id: &TopicId) -> Option<&Arc<Topic>> {
        self.topics.iter().find(|topic| topic.id() == id)
    }
}

/// Row keys in row order: numeric keys by value, then any others lexically.
fn row_keys(column: &Map<String, Value>) -> Vec<&str> {
    let mut keys: Vec<&str> = column.keys().map(String::as_str).collect();
    keys.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
    keys
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
