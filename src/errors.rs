use thiserror::Error;

#[derive(Error, Debug)]
pub enum RagGraphError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Weather service error: {0}")]
    Weather(String),

    #[error("Location '{0}' not found")]
    LocationNotFound(String),

    #[error("No valid content found in any of the provided files")]
    NoContent,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RagGraphError>;
