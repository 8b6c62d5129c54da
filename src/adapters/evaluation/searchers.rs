//! Reference document searchers.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tokio::fs;

use crate::adapters::language::text::tokens;
use crate::domain::clarify::Topic;
use crate::ports::{DocumentSearcher, EvaluationError, SearchHit};

use super::qrels::MRR_DEPTH;

/// Retrieves nothing; every metric comes out as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSearcher;

#[async_trait]
impl DocumentSearcher for NullSearcher {
    async fn search(&self, _topic: &Topic, _query: &str) -> Result<Vec<SearchHit>, EvaluationError> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Clone)]
struct Document {
    id: String,
    term_counts: HashMap<String, f64>,
    length: f64,
}

/// TF-IDF retrieval over an in-memory corpus.
///
/// The topic query and the resolved query are scored separately and mixed
/// with `topic_weight`, so a clarified query still keeps the original intent
/// in view.
#[derive(Debug, Clone)]
pub struct CorpusSearcher {
    documents: Vec<Document>,
    idf: HashMap<String, f64>,
    topic_weight: f64,
}

impl CorpusSearcher {
    /// Builds an index from `(doc_id, text)` pairs.
    pub fn new(documents: impl IntoIterator<Item = (String, String)>) -> Self {
        let documents: Vec<Document> = documents
            .into_iter()
            .map(|(id, text)| {
                let words = tokens(&text);
                let mut term_counts = HashMap::new();
                for word in &words {
                    *term_counts.entry(word.clone()).or_insert(0.0) += 1.0;
                }
                Document {
                    id,
                    term_counts,
                    length: words.len().max(1) as f64,
                }
            })
            .collect();

        let mut document_frequency: HashMap<String, f64> = HashMap::new();
        for document in &documents {
            for term in document.term_counts.keys() {
                *document_frequency.entry(term.clone()).or_insert(0.0) += 1.0;
            }
        }
        let n = documents.len() as f64;
        let idf = document_frequency
            .into_iter()
            .map(|(term, df)| (term, ((n + 1.0) / (df + 1.0)).ln() + 1.0))
            .collect();

        Self {
            documents,
            idf,
            topic_weight: 0.5,
        }
    }

    /// Weight of the topic query in [0, 1]; the resolved query gets the rest.
    pub fn with_topic_weight(mut self, weight: f64) -> Self {
        self.topic_weight = weight.clamp(0.0, 1.0);
        self
    }

    /// Reads a `doc_id<TAB>text` file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, EvaluationError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .await
            .map_err(|e| EvaluationError::Io(format!("{}: {}", path.display(), e)))?;

        let mut documents = Vec::new();
        for (index, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (id, text) = line
                .split_once('\t')
                .ok_or_else(|| EvaluationError::parse(index + 1, "expected doc_id<TAB>text"))?;
            documents.push((id.trim().to_string(), text.to_string()));
        }
        tracing::info!(path = %path.display(), documents = documents.len(), "Indexed corpus");
        Ok(Self::new(documents))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn score(&self, document: &Document, terms: &HashSet<String>) -> f64 {
        terms
            .iter()
            .filter_map(|term| {
                let tf = document.term_counts.get(term)? / document.length;
                Some(tf * self.idf.get(term).copied().unwrap_or(0.0))
            })
            .sum()
    }
}

#[async_trait]
impl DocumentSearcher for CorpusSearcher {
    async fn search(&self, topic: &Topic, query: &str) -> Result<Vec<SearchHit>, EvaluationError> {
        let topic_terms: HashSet<String> = tokens(topic.query()).into_iter().collect();
        let query_terms: HashSet<String> = tokens(query).into_iter().collect();

        let mut hits: Vec<SearchHit> = self
            .documents
            .iter()
            .filter_map(|document| {
                let score = self.topic_weight * self.score(document, &topic_terms)
                    + (1.0 - self.topic_weight) * self.score(document, &query_terms);
                (score > 0.0).then(|| SearchHit::new(document.id.clone(), score))
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| b.doc_id.cmp(&a.doc_id)));
        hits.truncate(MRR_DEPTH);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TopicId;
    use std::io::Write;

    fn topic() -> Topic {
        Topic::new(TopicId::new("1").unwrap(), "apple", vec![])
    }

    fn corpus() -> CorpusSearcher {
        CorpusSearcher::new(vec![
            ("fruit".to_string(), "apple fruit orchard harvest".to_string()),
            ("company".to_string(), "apple company iphone".to_string()),
            ("car".to_string(), "jaguar car dealer".to_string()),
        ])
    }

    #[tokio::test]
    async fn null_searcher_finds_nothing() {
        assert!(NullSearcher.search(&topic(), "apple").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolved_query_reorders_topic_matches() {
        let hits = corpus().search(&topic(), "apple company").await.unwrap();
        let ids: Vec<_> = hits.iter().map(|h| h.doc_id.as_str()).collect();
        assert_eq!(ids, vec!["company", "fruit"]);
    }

    #[tokio::test]
    async fn unrelated_documents_are_not_returned() {
        let hits = corpus()
            .with_topic_weight(0.0)
            .search(&topic(), "orchard")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doc_id, "fruit");
    }

    #[tokio::test]
    async fn loads_tab_separated_corpus() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"d1\tapple pie recipe\n\nd2\tjaguar habitat\n").unwrap();
        let searcher = CorpusSearcher::load(file.path()).await.unwrap();
        assert_eq!(searcher.len(), 2);
    }

    #[tokio::test]
    async fn line_without_tab_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"d1 apple pie\n").unwrap();
        assert!(matches!(
            CorpusSearcher::load(file.path()).await,
            Err(EvaluationError::Parse { line: 1, .. })
        ));
    }
}
