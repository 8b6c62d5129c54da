//! Persistent cache of autosuggest responses.
//!
//! Stored as a JSON object `query -> [suggestions]`. The file is read once at
//! construction and rewritten after every insert. Writers are serialized.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::ports::FacetProviderError;

#[derive(Debug)]
pub struct SuggestionCache {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Vec<String>>>,
}

impl SuggestionCache {
    /// Opens the cache at `path`; a missing file starts an empty cache.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, FacetProviderError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                FacetProviderError::parse(format!("suggestion cache {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(FacetProviderError::io(format!("{}: {}", path.display(), e)));
            }
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "Opened suggestion cache");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get(&self, query: &str) -> Option<Vec<String>> {
        self.entries.lock().await.get(query).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Stores suggestions for `query` and flushes the whole cache to disk.
    pub async fn insert(
        &self,
        query: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Result<(), FacetProviderError> {
        let mut entries = self.entries.lock().await;
        entries.insert(query.into(), suggestions);

        let json = serde_json::to_string(&*entries)
            .map_err(|e| FacetProviderError::parse(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FacetProviderError::io(format!("{}: {}", parent.display(), e)))?;
        }
        fs::write(&self.path, json)
            .await
            .map_err(|e| FacetProviderError::io(format!("{}: {}", self.path.display(), e)))
    }
}
