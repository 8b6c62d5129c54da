//! Enhanced facet representations from a TSV file.
//!
//! The file has a header row with at least `topic`, `provider_facet` and
//! `provider_facet_enhanced` columns. Entries are keyed by topic query and
//! facet description. Invalid UTF-8 is replaced rather than rejected.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

use crate::domain::clarify::{Facet, ScoredFacet, Topic};
use crate::ports::{FacetProvider, FacetProviderError};

/// Decorates another provider, attaching an enhanced representation to every
/// facet it returns.
pub struct EnhancedRepFacetProvider {
    inner: Arc<dyn FacetProvider>,
    reps: HashMap<(String, String), String>,
}

impl EnhancedRepFacetProvider {
    pub fn new(inner: Arc<dyn FacetProvider>, reps: HashMap<(String, String), String>) -> Self {
        Self { inner, reps }
    }

    /// Reads the representation table from `path`.
    pub async fn load(
        inner: Arc<dyn FacetProvider>,
        path: impl AsRef<Path>,
    ) -> Result<Self, FacetProviderError> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .await
            .map_err(|e| FacetProviderError::io(format!("{}: {}", path.display(), e)))?;
        let reps = parse_table(&String::from_utf8_lossy(&bytes))?;
        tracing::info!(path = %path.display(), entries = reps.len(), "Loaded enhanced facet representations");
        Ok(Self::new(inner, reps))
    }

    pub fn len(&self) -> usize {
        self.reps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reps.is_empty()
    }
}

fn parse_table(raw: &str) -> Result<HashMap<(String, String), String>, FacetProviderError> {
    let mut lines = raw.lines();
    let header: Vec<&str> = lines
        .next()
        .ok_or_else(|| FacetProviderError::parse("enhanced representation file is empty"))?
        .split('\t')
        .collect();
    let column = |name: &str| {
        header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| FacetProviderError::parse(format!("missing column '{}'", name)))
    };
    let topic_col = column("topic")?;
    let facet_col = column("provider_facet")?;
    let enhanced_col = column("provider_facet_enhanced")?;

    let mut reps = HashMap::new();
    for (index, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let field = |col: usize| {
            fields.get(col).copied().ok_or_else(|| {
                FacetProviderError::parse(format!("line {} has {} fields", index + 2, fields.len()))
            })
        };
        reps.insert(
            (field(topic_col)?.to_string(), field(facet_col)?.to_string()),
            field(enhanced_col)?.to_string(),
        );
    }
    Ok(reps)
}

#[async_trait]
impl FacetProvider for EnhancedRepFacetProvider {
    async fn facets_for_topic(&self, topic: &Topic) -> Result<Vec<ScoredFacet>, FacetProviderError> {
        let facets = self.inner.facets_for_topic(topic).await?;
        facets
            .into_iter()
            .map(|scored| {
                let key = (topic.query().to_string(), scored.facet.description().to_string());
                let rep = self.reps.get(&key).ok_or_else(|| FacetProviderError::MissingEnhancedRep {
                    topic: key.0.clone(),
                    facet: key.1.clone(),
                })?;
                let facet: Facet = scored.facet.as_ref().clone().with_enhanced_rep(rep);
                Ok(ScoredFacet::new(Arc::new(facet), scored.score))
            })
            .collect()
    }
}
