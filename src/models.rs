//! Core data model shared across the pipeline stages

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// Progress marker written by each graph node transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeStatus {
    /// Initial state before any node has run
    Pending,
    /// Ingestion finished (or was skipped because no files were supplied)
    IngestorDone,
    /// Query classified as weather or retrieval
    RoutingDone,
    /// Weather branch produced the final answer
    WeatherDone,
    /// Retrieval branch produced the final answer
    RetrieverDone,
    /// A node failed in a way that terminated the request
    Error,
}

/// State threaded through the agent graph.
///
/// Each node consumes a state and returns a new one; nothing is mutated in
/// place, so a single request can be replayed deterministically in tests.
/// `answer` stays empty until a terminal node (or an error transition) runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentState {
    pub files_uploaded: Vec<PathBuf>,
    pub query: String,
    pub answer: String,
    pub status: NodeStatus,
    pub is_weather_query: bool,
    pub location: Option<String>,
}

impl AgentState {
    /// Create the initial state for one request
    pub fn new(files_uploaded: Vec<PathBuf>, query: impl Into<String>) -> Self {
        Self {
            files_uploaded,
            query: query.into(),
            answer: String::new(),
            status: NodeStatus::Pending,
            is_weather_query: false,
            location: None,
        }
    }

    /// True once a terminal node has run for this request
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            NodeStatus::WeatherDone | NodeStatus::RetrieverDone | NodeStatus::Error
        )
    }
}

/// A bounded substring of a source document, sized for embedding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChunk {
    pub text: String,
    pub source_file: String,
    pub file_index: usize,
    pub chunk_index: usize,
}

/// Payload stored alongside each vector in the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPayload {
    pub page_content: String,
    pub metadata: HashMap<String, String>,
}

/// Persisted unit of the vector store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: u64,
    pub vector: Vec<f32>,
    pub payload: RecordPayload,
}

/// Read-only projection of a vector record returned by similarity search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub page_content: String,
    pub metadata: HashMap<String, String>,
}

/// Whether every record of an ingestion batch reached the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Every record was upserted
    Full,
    /// Some sub-batches failed and were skipped; search is served from what
    /// made it in
    Partial { failed_records: usize },
}

/// Result of a completed ingestion call.
///
/// A degraded handle (`verified == false` or partial persistence) is never an
/// error, only a diminished guarantee that subsequent search will be served.
#[derive(Debug, Clone)]
pub struct CollectionHandle {
    pub name: String,
    pub records: usize,
    pub persistence: Persistence,
    pub verified: bool,
}

impl CollectionHandle {
    /// True when every record was persisted and the final existence check
    /// succeeded
    pub fn is_complete(&self) -> bool {
        self.verified && matches!(self.persistence, Persistence::Full)
    }
}
