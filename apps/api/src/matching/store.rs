//! VectorStore — chunk id → (text, metadata, embedding), persisted as one JSON object.
//!
//! File format: `{ "<id>": { "text": .., "metadata": { "resume": .., "id": .. }, "embedding": [..] } }`.
//! Saves rewrite the whole file. Loads tolerate partial corruption: bad entries are
//! skipped with a warning instead of failing the run.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::matching::chunker::Chunk;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed vector file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Source label: the resume file name, or `job_description`.
    #[serde(rename = "resume", default, skip_serializing_if = "Option::is_none")]
    pub source_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub metadata: DocumentMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Document {
    pub fn from_chunk(chunk: Chunk, embedding: Option<Vec<f32>>) -> Self {
        Self {
            metadata: DocumentMetadata {
                source_label: Some(chunk.source_label),
                id: Some(chunk.id.clone()),
                extra: BTreeMap::new(),
            },
            id: chunk.id,
            text: chunk.text,
            embedding,
        }
    }

    pub fn source_label(&self) -> Option<&str> {
        self.metadata.source_label.as_deref()
    }
}

/// On-disk shape of one entry. Anything missing or mistyped disqualifies the entry.
#[derive(Debug, Deserialize)]
struct PersistedDocument {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    metadata: DocumentMetadata,
    #[serde(default)]
    embedding: Option<Vec<f32>>,
    /// Reserved. Entries carrying media are not supported.
    #[serde(default)]
    media: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct VectorStore {
    documents: BTreeMap<String, Document>,
}

impl VectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds documents keyed by id. A duplicate id replaces the earlier document.
    pub fn add(&mut self, documents: impl IntoIterator<Item = Document>) {
        for doc in documents {
            self.documents.insert(doc.id.clone(), doc);
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    /// All documents in canonical scoring order, see [`sort_documents`].
    pub fn sorted_documents(&self) -> Vec<Document> {
        let mut docs: Vec<Document> = self.documents.values().cloned().collect();
        sort_documents(&mut docs);
        docs
    }

    /// Writes the whole store to `path`, replacing any previous content.
    /// The bytes go to a temp file in the same directory which is then renamed over `path`.
    pub async fn save(&self, path: &Path) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&self.documents).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;

        let target = path.to_path_buf();
        tokio::task::spawn_blocking(move || write_replace(&dir, &target, &bytes))
            .await
            .map_err(|e| StoreError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other(e),
            })??;

        info!("Saved {} documents to {}", self.len(), path.display());
        Ok(())
    }

    /// Reads a store written by [`VectorStore::save`].
    ///
    /// A missing file, or content that is empty or not a JSON object, yields an empty
    /// store. Content that looks like an object but does not parse is an error.
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Vector file not found, treating as empty: {}", path.display());
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let content = content.trim();
        if content.is_empty() || !content.starts_with('{') {
            warn!(
                "Vector file is empty or not a JSON object, treating as empty: {}",
                path.display()
            );
            return Ok(Self::new());
        }

        let raw: BTreeMap<String, Value> =
            serde_json::from_str(content).map_err(|source| StoreError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let mut store = Self::new();
        for (id, value) in raw {
            if let Some(doc) = parse_entry(&id, value) {
                store.documents.insert(id, doc);
            }
        }

        info!(
            "Loaded {} valid documents from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }
}

fn parse_entry(id: &str, value: Value) -> Option<Document> {
    let persisted: PersistedDocument = match serde_json::from_value(value) {
        Ok(p) => p,
        Err(e) => {
            warn!("Skipping malformed document {id}: {e}");
            return None;
        }
    };

    if persisted.media.is_some() {
        warn!("Skipping document {id}: media entries are not supported");
        return None;
    }

    let text = match persisted.text {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            warn!("Skipping document {id}: missing or empty text");
            return None;
        }
    };

    Some(Document {
        id: id.to_string(),
        text,
        metadata: persisted.metadata,
        embedding: persisted.embedding,
    })
}

fn write_replace(dir: &Path, target: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let io_err = |source: std::io::Error| StoreError::Io {
        path: target.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(target).map_err(|e| io_err(e.error))?;
    Ok(())
}

/// Canonical order: by source label, then by text, both ascending.
/// Documents without a label sort as if labelled `""`.
pub fn sort_documents(docs: &mut [Document]) {
    docs.sort_by(|a, b| {
        a.source_label()
            .unwrap_or("")
            .cmp(b.source_label().unwrap_or(""))
            .then_with(|| a.text.cmp(&b.text))
    });
}
