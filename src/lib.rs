pub mod config;
pub mod embeddings;
pub mod errors;
pub mod graph;
pub mod ingest;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;
pub mod vector_store;
pub mod weather;

/// Default number of documents retrieved per query
pub const DEFAULT_TOP_K: usize = 7;

/// Default collection name for ingested documents
pub const DEFAULT_COLLECTION: &str = "uploaded-docs";

pub use config::AppConfig;
pub use errors::*;
pub use graph::AgentGraph;
pub use models::AgentState;
