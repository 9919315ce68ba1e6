use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    pub url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub backtrace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    /// Embedding provider: "openai" (OpenAI-compatible API) or "ollama"
    pub provider: String,
    pub model: String,
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub dimension: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub llm_endpoint: String,
    pub llm_key: String,
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
}

fn default_llm_model() -> String {
    "gemma3:27b".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub api_key: String,
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

pub fn default_collection() -> String {
    crate::DEFAULT_COLLECTION.to_string()
}

pub fn default_chunk_size() -> usize {
    750
}

pub fn default_chunk_overlap() -> usize {
    50
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

pub fn default_top_k() -> usize {
    crate::DEFAULT_TOP_K
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub vector_store: VectorStoreConfig,
    pub logging: LoggingConfig,
    pub embeddings: EmbeddingsConfig,
    pub llm: LlmConfig,
    pub weather: WeatherConfig,
    pub ingestion: IngestionConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(crate::RagGraphError::Io)?;

        let config: AppConfig =
            toml::from_str(&content).map_err(crate::RagGraphError::TomlParsing)?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            println!(
                "Warning: Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Err(crate::RagGraphError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config file found. Please create config.toml or config.example.toml",
            )))
        }
    }

    /// Check that every required credential and ingestion parameter is usable.
    /// Runs before any adapter is constructed so a broken config fails the
    /// whole request up front rather than mid-pipeline.
    pub fn validate(&self) -> crate::Result<()> {
        if self.vector_store.url.trim().is_empty() {
            return Err(crate::RagGraphError::Config(
                "vector_store.url is not set".to_string(),
            ));
        }
        if self.weather.api_key.trim().is_empty() {
            return Err(crate::RagGraphError::Config(
                "weather.api_key is not set".to_string(),
            ));
        }
        if self.embeddings.provider == "openai"
            && self
                .embeddings
                .api_key
                .as_deref()
                .unwrap_or_default()
                .trim()
                .is_empty()
        {
            return Err(crate::RagGraphError::Config(
                "embeddings.api_key is required for the openai provider".to_string(),
            ));
        }
        if self.ingestion.chunk_size == 0 {
            return Err(crate::RagGraphError::Config(
                "ingestion.chunk_size must be positive".to_string(),
            ));
        }
        if self.ingestion.chunk_overlap >= self.ingestion.chunk_size {
            return Err(crate::RagGraphError::Config(format!(
                "ingestion.chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.ingestion.chunk_overlap, self.ingestion.chunk_size
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(crate::RagGraphError::Config(
                "retrieval.top_k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get vector store URL
    pub fn vector_store_url(&self) -> &str {
        &self.vector_store.url
    }

    /// Get vector store API key, if any
    pub fn vector_store_api_key(&self) -> Option<&str> {
        self.vector_store.api_key.as_deref()
    }

    /// Get embedding dimension
    pub fn embedding_dimension(&self) -> usize {
        self.embeddings.dimension
    }

    /// Get embedding model name
    pub fn embedding_model(&self) -> &str {
        &self.embeddings.model
    }

    /// Get LLM endpoint
    pub fn llm_endpoint(&self) -> &str {
        &self.llm.llm_endpoint
    }

    /// Get LLM key
    pub fn llm_key(&self) -> &str {
        &self.llm.llm_key
    }

    /// Get LLM model
    pub fn llm_model(&self) -> &str {
        &self.llm.llm_model
    }

    /// Get the ingestion collection name
    pub fn collection(&self) -> &str {
        &self.ingestion.collection
    }

    /// Get chunk size in characters
    pub fn chunk_size(&self) -> usize {
        self.ingestion.chunk_size
    }

    /// Get chunk overlap in characters
    pub fn chunk_overlap(&self) -> usize {
        self.ingestion.chunk_overlap
    }

    /// Get retrieval top-k
    pub fn top_k(&self) -> usize {
        self.retrieval.top_k
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            vector_store: VectorStoreConfig {
                url: "http://localhost:6333".to_string(),
                api_key: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                backtrace: true,
            },
            embeddings: EmbeddingsConfig {
                provider: "ollama".to_string(),
                model: "all-minilm".to_string(),
                endpoint: "http://localhost:11434".to_string(),
                api_key: None,
                dimension: 384,
            },
            llm: LlmConfig {
                llm_endpoint: "http://localhost:11434".to_string(),
                llm_key: "ollama".to_string(),
                llm_model: "gemma3:27b".to_string(),
            },
            weather: WeatherConfig {
                api_key: String::new(),
                base_url: default_weather_base_url(),
            },
            ingestion: IngestionConfig {
                collection: default_collection(),
                chunk_size: default_chunk_size(),
                chunk_overlap: default_chunk_overlap(),
            },
            retrieval: RetrievalConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.weather.api_key = "test-key".to_string();
        config
    }

    #[test]
    fn test_default_ingestion_parameters() {
        assert_eq!(default_chunk_size(), 750);
        assert_eq!(default_chunk_overlap(), 50);
        assert_eq!(default_top_k(), 7);
    }

    #[test]
    fn test_valid_config_passes_validation() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_missing_weather_key_fails_validation() {
        let mut config = valid_config();
        config.weather.api_key = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_openai_provider_requires_api_key() {
        let mut config = valid_config();
        config.embeddings.provider = "openai".to_string();
        config.embeddings.api_key = None;
        assert!(config.validate().is_err());

        config.embeddings.api_key = Some("sk-test".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk_size() {
        let mut config = valid_config();
        config.ingestion.chunk_overlap = config.ingestion.chunk_size;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_top_k_fails_validation() {
        let mut config = valid_config();
        config.retrieval.top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_src = r#"
            [vector_store]
            url = "http://localhost:6333"

            [logging]
            level = "info"
            backtrace = false

            [embeddings]
            provider = "ollama"
            model = "all-minilm"
            endpoint = "http://localhost:11434"
            dimension = 384

            [llm]
            llm_endpoint = "http://localhost:11434"
            llm_key = "ollama"

            [weather]
            api_key = "owm-key"

            [ingestion]
        "#;
        let config: AppConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.llm_model(), "gemma3:27b");
        assert_eq!(config.chunk_size(), 750);
        assert_eq!(config.chunk_overlap(), 50);
        assert_eq!(config.top_k(), 7);
        assert_eq!(config.collection(), "uploaded-docs");
        assert!(config.validate().is_ok());
    }
}
