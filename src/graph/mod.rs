//! Agent state graph
//!
//! Composes the four pipeline stages into a linear/conditional DAG:
//!
//! ```text
//! Pending -> IngestorDone -> RoutingDone -> { WeatherDone | RetrieverDone }
//! ```
//!
//! One invocation runs strictly sequentially, no node re-entry and no
//! cycles. The graph owns its request's `AgentState` for the whole run and
//! always returns a completed state; after construction it never fails.

pub mod nodes;
pub mod resolver;
pub mod router;

pub use resolver::WeatherResolver;
pub use router::QueryRouter;
pub use router::RouteDecision;

use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::embeddings::Embedder;
use crate::embeddings::EmbeddingClient;
use crate::errors::Result;
use crate::graph::nodes::ingestor_node;
use crate::graph::nodes::retriever_node;
use crate::graph::nodes::routing_node;
use crate::graph::nodes::weather_node;
use crate::ingest::IngestionPipeline;
use crate::llm::LanguageModel;
use crate::llm::LlmService;
use crate::models::AgentState;
use crate::models::NodeStatus;
use crate::rag::Retriever;
use crate::vector_store::QdrantStore;
use crate::vector_store::VectorStore;
use crate::weather::OpenWeatherService;
use crate::weather::WeatherProvider;

/// Terminal branch selected after routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Weather,
    Retriever,
}

/// Transition guard applied after `RoutingDone`
pub fn routing_condition(state: &AgentState) -> Branch {
    if state.is_weather_query {
        Branch::Weather
    } else {
        Branch::Retriever
    }
}

/// The orchestrator composing ingestion, routing, weather and retrieval
pub struct AgentGraph {
    ingestor: IngestionPipeline,
    router: QueryRouter,
    weather: WeatherResolver,
    retriever: Retriever,
}

impl AgentGraph {
    /// Build the graph with real HTTP adapters from the application config.
    ///
    /// # Errors
    /// Configuration errors only: a missing credential or an invalid
    /// ingestion/retrieval parameter fails here, before any stage runs.
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.validate()?;

        let embedder: Arc<dyn Embedder> = Arc::new(EmbeddingClient::from_config(config)?);
        let store: Arc<dyn VectorStore> = Arc::new(QdrantStore::from_config(config)?);
        let llm: Arc<dyn LanguageModel> = Arc::new(LlmService::new(config)?);
        let weather: Arc<dyn WeatherProvider> = Arc::new(OpenWeatherService::from_config(config)?);

        Ok(Self::from_components(
            embedder,
            store,
            llm,
            weather,
            config.collection().to_string(),
            config.chunk_size(),
            config.chunk_overlap(),
            config.top_k(),
        ))
    }

    /// Build the graph from existing adapters. Tests use this with
    /// in-process implementations.
    #[allow(clippy::too_many_arguments)]
    pub fn from_components(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        llm: Arc<dyn LanguageModel>,
        weather: Arc<dyn WeatherProvider>,
        collection: String,
        chunk_size: usize,
        chunk_overlap: usize,
        top_k: usize,
    ) -> Self {
        let ingestor = IngestionPipeline::new(
            Arc::clone(&embedder),
            Arc::clone(&store),
            collection.clone(),
            chunk_size,
            chunk_overlap,
        );
        let router = QueryRouter::new(Arc::clone(&llm));
        let weather = WeatherResolver::new(weather);
        let retriever = Retriever::new(embedder, store, llm, collection, top_k);

        Self {
            ingestor,
            router,
            weather,
            retriever,
        }
    }

    /// Get the ingestion pipeline reference
    #[must_use]
    pub const fn ingestor(&self) -> &IngestionPipeline {
        &self.ingestor
    }

    /// Get the retriever reference
    #[must_use]
    pub const fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Run one request through the graph. Exactly one terminal node executes
    /// and the returned state carries a non-empty answer on every reachable
    /// path.
    pub async fn run(&self, state: AgentState) -> AgentState {
        info!("Processing query: {}", state.query);

        let state = ingestor_node(&self.ingestor, state).await;
        if state.status == NodeStatus::Error {
            return state;
        }

        let state = routing_node(&self.router, state).await;

        match routing_condition(&state) {
            Branch::Weather => weather_node(&self.weather, state).await,
            Branch::Retriever => retriever_node(&self.retriever, state).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_condition_branches_on_flag() {
        let mut state = AgentState::new(vec![], "q");
        assert_eq!(routing_condition(&state), Branch::Retriever);
        state.is_weather_query = true;
        assert_eq!(routing_condition(&state), Branch::Weather);
    }
}
