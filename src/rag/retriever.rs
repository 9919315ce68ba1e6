//! Retrieval and grounded answer generation

use std::sync::Arc;

use tracing::debug;

use crate::embeddings::Embedder;
use crate::errors::Result;
use crate::llm::prompts::build_retriever_prompt;
use crate::llm::LanguageModel;
use crate::models::RetrievedDocument;
use crate::rag::assemble_context;
use crate::vector_store::VectorStore;

/// Retriever answering queries from previously ingested documents
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    llm: Arc<dyn LanguageModel>,
    collection: String,
    top_k: usize,
}

impl Retriever {
    /// Create a new retriever. `top_k` must be positive; config validation
    /// enforces this before the retriever is built.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        llm: Arc<dyn LanguageModel>,
        collection: String,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            llm,
            collection,
            top_k: top_k.max(1),
        }
    }

    /// Retrieve the top-k chunks most similar to the query
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>> {
        debug!("Retrieving top-{} chunks for query", k);
        let query_vector = self.embedder.embed_one(query).await?;
        self.store.search(&self.collection, &query_vector, k).await
    }

    /// Retrieve context and generate a grounded answer.
    ///
    /// Empty retrieval still proceeds with an empty context; the model is
    /// expected to state that the information is unavailable.
    pub async fn answer(&self, query: &str) -> Result<String> {
        self.answer_with_k(query, self.top_k).await
    }

    /// Same as [`answer`](Self::answer) with an explicit result count
    pub async fn answer_with_k(&self, query: &str, k: usize) -> Result<String> {
        let documents = self.retrieve(query, k.max(1)).await?;
        debug!("Retrieved {} documents", documents.len());

        let context = assemble_context(&documents);
        let prompt = build_retriever_prompt(&context, query);
        self.llm.complete(&prompt).await
    }
}
