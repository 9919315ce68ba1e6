//! Qdrant REST API client

use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::RagGraphError;
use crate::errors::Result;
use crate::models::RecordPayload;
use crate::models::RetrievedDocument;
use crate::models::VectorRecord;
use crate::vector_store::CollectionInfo;
use crate::vector_store::VectorStore;

/// Client for a Qdrant vector database reached over HTTP
pub struct QdrantStore {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl QdrantStore {
    /// Create a new Qdrant client
    ///
    /// # Errors
    /// - Empty base URL
    /// - HTTP client build errors
    pub fn new(base_url: String, api_key: Option<String>) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(RagGraphError::Config(
                "Qdrant URL is not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| RagGraphError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    /// Create a client from the application config
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.vector_store_url().to_string(),
            config.vector_store_api_key().map(ToString::to_string),
        )
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("api-key", key),
            None => builder,
        }
    }

    async fn check(&self, response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(RagGraphError::VectorStore(format!(
            "{what} failed ({status}): {error_text}"
        )))
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        let url = format!("{}/collections/{name}", self.base_url);
        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(|e| RagGraphError::Http(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => {
                self.check(response, "Collection lookup").await?;
                Ok(false)
            }
        }
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let url = format!("{}/collections/{name}", self.base_url);
        debug!("Deleting collection: {}", name);
        let response = self
            .request(self.client.delete(&url))
            .send()
            .await
            .map_err(|e| RagGraphError::Http(e.to_string()))?;

        // A missing collection is fine; drop-and-recreate always runs the
        // delete first
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        self.check(response, "Collection delete").await?;
        Ok(())
    }

    async fn create_collection(&self, name: &str, dims: usize) -> Result<()> {
        let url = format!("{}/collections/{name}", self.base_url);
        debug!("Creating collection: {} ({} dims, cosine)", name, dims);

        let body = json!({
            "vectors": {
                "size": dims,
                "distance": "Cosine",
            }
        });

        let response = self
            .request(self.client.put(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| RagGraphError::Http(e.to_string()))?;

        self.check(response, "Collection create").await?;
        Ok(())
    }

    async fn upsert(&self, name: &str, records: &[VectorRecord]) -> Result<()> {
        #[derive(Serialize)]
        struct Point<'a> {
            id: u64,
            vector: &'a [f32],
            payload: &'a RecordPayload,
        }

        let points: Vec<Point> = records
            .iter()
            .map(|r| Point {
                id: r.id,
                vector: &r.vector,
                payload: &r.payload,
            })
            .collect();

        let url = format!("{}/collections/{name}/points?wait=true", self.base_url);
        debug!("Upserting {} points into {}", points.len(), name);

        let response = self
            .request(self.client.put(&url))
            .json(&json!({ "points": points }))
            .send()
            .await
            .map_err(|e| RagGraphError::Http(e.to_string()))?;

        self.check(response, "Upsert").await?;
        Ok(())
    }

    async fn search(
        &self,
        name: &str,
        query_vector: &[f32],
        k: usize,
    ) -> Result<Vec<RetrievedDocument>> {
        #[derive(Deserialize)]
        struct SearchResponse {
            result: Vec<ScoredPoint>,
        }

        #[derive(Deserialize)]
        struct ScoredPoint {
            payload: Option<RecordPayload>,
        }

        let url = format!("{}/collections/{name}/points/search", self.base_url);
        debug!("Searching {} for top-{}", name, k);

        let body = json!({
            "vector": query_vector,
            "limit": k,
            "with_payload": true,
        });

        let response = self
            .request(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| RagGraphError::Http(e.to_string()))?;

        let response = self.check(response, "Search").await?;
        let result: SearchResponse = response
            .json()
            .await
            .map_err(|e| RagGraphError::VectorStore(format!("Failed to parse response: {e}")))?;

        // Qdrant returns hits best-match-first; that ordering is preserved
        Ok(result
            .result
            .into_iter()
            .filter_map(|p| p.payload)
            .map(|payload| RetrievedDocument {
                page_content: payload.page_content,
                metadata: payload.metadata,
            })
            .collect())
    }

    async fn get_collection(&self, name: &str) -> Result<Option<CollectionInfo>> {
        #[derive(Deserialize)]
        struct CollectionResponse {
            result: CollectionResult,
        }

        #[derive(Deserialize)]
        struct CollectionResult {
            points_count: Option<u64>,
        }

        let url = format!("{}/collections/{name}", self.base_url);
        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(|e| RagGraphError::Http(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = self.check(response, "Collection lookup").await?;
        let result: CollectionResponse = response
            .json()
            .await
            .map_err(|e| RagGraphError::VectorStore(format!("Failed to parse response: {e}")))?;

        Ok(Some(CollectionInfo {
            name: name.to_string(),
            points_count: result.result.points_count,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_url() {
        assert!(matches!(
            QdrantStore::new(String::new(), None),
            Err(RagGraphError::Config(_))
        ));
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let store = QdrantStore::new("http://localhost:6333/".to_string(), None).unwrap();
        assert_eq!(store.base_url, "http://localhost:6333");
    }
}
