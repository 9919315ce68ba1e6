//! Embeddings generation module
//!
//! Converts text into fixed-dimension vectors via an external provider:
//! - OpenAI-compatible APIs (batch endpoint)
//! - Ollama (local models, per-text endpoint)
//!
//! All vectors handed out by this module are normalized to unit length so
//! cosine similarity in the vector store behaves consistently regardless of
//! provider.

pub mod client;

pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;

use async_trait::async_trait;

use crate::errors::Result;

/// Text-to-vector adapter boundary
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embeddings for a batch of texts
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Generate an embedding for a single text
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>>;

    /// Embedding dimension this adapter produces
    fn dimensions(&self) -> usize;
}

/// Scale a vector to unit length. Zero vectors are returned unchanged since
/// there is no direction to preserve.
pub fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_produces_unit_length() {
        let mut v = vec![3.0, 4.0];
        normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_leaves_zero_vector_unchanged() {
        let mut v = vec![0.0, 0.0, 0.0];
        normalize(&mut v);
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut v = vec![1.0, 2.0, 2.0];
        normalize(&mut v);
        let once = v.clone();
        normalize(&mut v);
        for (a, b) in once.iter().zip(v.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }
}
