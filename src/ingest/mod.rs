//! Document ingestion pipeline
//!
//! Loads documents, splits them into overlapping chunks, embeds every chunk
//! in one batch and persists the records into the vector store. Ingestion is
//! full-batch and destructive: the target collection is dropped and recreated
//! on every call, so a new ingestion replaces prior content.
//!
//! Per-file failures are best-effort (logged and skipped); only a batch that
//! yields zero chunks overall is fatal. Persistence is best-effort too:
//! a failed bulk upsert falls back to fixed-size sub-batches and failed
//! sub-batches are counted, not propagated.

pub mod splitter;

pub use splitter::split_text;

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::embeddings::Embedder;
use crate::errors::RagGraphError;
use crate::errors::Result;
use crate::models::CollectionHandle;
use crate::models::DocumentChunk;
use crate::models::Persistence;
use crate::models::RecordPayload;
use crate::models::VectorRecord;
use crate::vector_store::VectorStore;

/// Sub-batch size used when a bulk upsert fails and is retried in pieces
const UPSERT_BATCH_SIZE: usize = 10;

/// Pipeline turning raw documents into searchable vector records
pub struct IngestionPipeline {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    collection: String,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl IngestionPipeline {
    /// Create a new ingestion pipeline
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        collection: String,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            collection,
            chunk_size,
            chunk_overlap,
        }
    }

    /// Run the full ingestion pipeline over a batch of files.
    ///
    /// # Errors
    /// - `RagGraphError::NoContent` when no file in the batch yields any text
    /// - Vector store errors from collection recreation
    /// - Embedding errors from the batch embedding call
    ///
    /// Upsert failures do not error; they degrade the returned handle.
    pub async fn ingest(&self, file_paths: &[PathBuf]) -> Result<CollectionHandle> {
        let chunks = self.collect_chunks(file_paths);
        if chunks.is_empty() {
            return Err(RagGraphError::NoContent);
        }
        info!(
            "Collected {} chunks from {} file(s)",
            chunks.len(),
            file_paths.len()
        );

        // Full-batch re-ingestion replaces prior content
        if let Err(e) = self.store.delete_collection(&self.collection).await {
            warn!("Failed to delete collection {}: {}", self.collection, e);
        }
        self.store
            .create_collection(&self.collection, self.embedder.dimensions())
            .await?;

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(RagGraphError::Embedding(format!(
                "Expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        let records = build_records(&chunks, embeddings);
        let total = records.len();
        let persistence = self.persist(&records).await;

        let verified = match self.store.get_collection(&self.collection).await {
            Ok(Some(_)) => true,
            Ok(None) => false,
            Err(e) => {
                warn!("Final collection check failed: {}", e);
                false
            }
        };

        info!(
            "Ingestion completed: {} records into '{}' (verified: {})",
            total, self.collection, verified
        );

        Ok(CollectionHandle {
            name: self.collection.clone(),
            records: total,
            persistence,
            verified,
        })
    }

    /// Load and split every file, best-effort. A file that cannot be read or
    /// contains only whitespace is skipped without aborting the batch.
    fn collect_chunks(&self, file_paths: &[PathBuf]) -> Vec<DocumentChunk> {
        let mut chunks = Vec::new();

        for (file_index, path) in file_paths.iter().enumerate() {
            let text = match load_text(path) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            if text.trim().is_empty() {
                debug!("Skipping {}: no extractable text", path.display());
                continue;
            }

            let source_file = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            for (chunk_index, chunk_text) in
                split_text(&text, self.chunk_size, self.chunk_overlap)
                    .into_iter()
                    .enumerate()
            {
                chunks.push(DocumentChunk {
                    text: chunk_text,
                    source_file: source_file.clone(),
                    file_index,
                    chunk_index,
                });
            }
        }

        chunks
    }

    /// Upsert all records in one call, falling back to sub-batches on
    /// failure. Sub-batch failures are swallowed and counted.
    async fn persist(&self, records: &[VectorRecord]) -> Persistence {
        match self.store.upsert(&self.collection, records).await {
            Ok(()) => Persistence::Full,
            Err(e) => {
                warn!(
                    "Bulk upsert of {} records failed ({}); retrying in batches of {}",
                    records.len(),
                    e,
                    UPSERT_BATCH_SIZE
                );
                let mut failed_records = 0;
                for batch in records.chunks(UPSERT_BATCH_SIZE) {
                    if let Err(e) = self.store.upsert(&self.collection, batch).await {
                        warn!("Sub-batch of {} records failed: {}", batch.len(), e);
                        failed_records += batch.len();
                    }
                }
                if failed_records == 0 {
                    Persistence::Full
                } else {
                    Persistence::Partial { failed_records }
                }
            }
        }
    }
}

/// Read a document's raw text
fn load_text(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Pair chunks with their embeddings into persistable records with
/// sequential ids
fn build_records(chunks: &[DocumentChunk], embeddings: Vec<Vec<f32>>) -> Vec<VectorRecord> {
    let timestamp = Utc::now().to_rfc3339();

    chunks
        .iter()
        .zip(embeddings)
        .enumerate()
        .map(|(id, (chunk, vector))| {
            let mut metadata = HashMap::new();
            metadata.insert("filename".to_string(), chunk.source_file.clone());
            metadata.insert("source".to_string(), chunk.source_file.clone());
            metadata.insert("file_index".to_string(), chunk.file_index.to_string());
            metadata.insert("chunk_index".to_string(), chunk.chunk_index.to_string());
            metadata.insert("chunk_size".to_string(), chunk.text.len().to_string());
            metadata.insert("timestamp".to_string(), timestamp.clone());

            VectorRecord {
                id: id as u64,
                vector,
                payload: RecordPayload {
                    page_content: chunk.text.clone(),
                    metadata,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, file_index: usize, chunk_index: usize) -> DocumentChunk {
        DocumentChunk {
            text: text.to_string(),
            source_file: "doc.txt".to_string(),
            file_index,
            chunk_index,
        }
    }

    #[test]
    fn test_records_get_sequential_ids() {
        let chunks = vec![chunk("a", 0, 0), chunk("b", 0, 1), chunk("c", 1, 0)];
        let embeddings = vec![vec![1.0], vec![0.5], vec![0.1]];
        let records = build_records(&chunks, embeddings);
        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_record_metadata_fields() {
        let chunks = vec![chunk("hello world", 2, 5)];
        let records = build_records(&chunks, vec![vec![1.0, 0.0]]);
        let meta = &records[0].payload.metadata;
        assert_eq!(meta.get("filename").unwrap(), "doc.txt");
        assert_eq!(meta.get("source").unwrap(), "doc.txt");
        assert_eq!(meta.get("file_index").unwrap(), "2");
        assert_eq!(meta.get("chunk_index").unwrap(), "5");
        assert_eq!(meta.get("chunk_size").unwrap(), "11");
        assert!(meta.contains_key("timestamp"));
        assert_eq!(records[0].payload.page_content, "hello world");
    }
}
