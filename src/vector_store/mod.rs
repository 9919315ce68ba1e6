//! Vector store adapter
//!
//! The store is treated as a black box with collection management, upsert and
//! cosine similarity search. The shipped implementation talks to a Qdrant
//! server over its REST API; tests substitute an in-memory implementation.
//!
//! The collection is process-wide, named and mutated destructively by
//! ingestion (drop + recreate). Concurrent ingestion and retrieval against
//! the same collection name is unsafe without external coordination.

pub mod qdrant;

pub use qdrant::QdrantStore;

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::RetrievedDocument;
use crate::models::VectorRecord;

/// Summary returned when a collection is looked up
#[derive(Debug, Clone)]
pub struct CollectionInfo {
    pub name: String,
    pub points_count: Option<u64>,
}

/// Vector database adapter boundary
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Whether a collection with this name exists
    async fn collection_exists(&self, name: &str) -> Result<bool>;

    /// Delete a collection. Deleting a missing collection is not an error.
    async fn delete_collection(&self, name: &str) -> Result<()>;

    /// Create a collection with the given vector dimension and cosine
    /// distance
    async fn create_collection(&self, name: &str, dims: usize) -> Result<()>;

    /// Upsert a batch of records into a collection
    async fn upsert(&self, name: &str, records: &[VectorRecord]) -> Result<()>;

    /// Top-k cosine similarity search, best match first
    async fn search(
        &self,
        name: &str,
        query_vector: &[f32],
        k: usize,
    ) -> Result<Vec<RetrievedDocument>>;

    /// Look up a collection, returning None when it does not exist
    async fn get_collection(&self, name: &str) -> Result<Option<CollectionInfo>>;
}
