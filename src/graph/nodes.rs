//! Graph node transitions
//!
//! Each node takes a state snapshot and returns a new one: no hidden
//! mutation, so a request can be replayed step by step in tests. Every node
//! writes both the field(s) it produces and the new status. Adapter failures
//! are converted here into a user-facing answer; nothing below the graph can
//! fail the request once construction succeeded.

use tracing::debug;
use tracing::error;
use tracing::info;

use crate::graph::resolver::WeatherResolver;
use crate::graph::router::QueryRouter;
use crate::ingest::IngestionPipeline;
use crate::models::AgentState;
use crate::models::NodeStatus;
use crate::models::Persistence;
use crate::rag::Retriever;

/// Ingest the uploaded files, if any. An empty upload list skips the
/// pipeline entirely and only advances the status.
pub async fn ingestor_node(pipeline: &IngestionPipeline, state: AgentState) -> AgentState {
    if state.files_uploaded.is_empty() {
        debug!("No files uploaded; skipping ingestion");
        return AgentState {
            status: NodeStatus::IngestorDone,
            ..state
        };
    }

    match pipeline.ingest(&state.files_uploaded).await {
        Ok(handle) => {
            if let Persistence::Partial { failed_records } = handle.persistence {
                info!(
                    "Ingestion degraded: {} of {} records were not persisted",
                    failed_records, handle.records
                );
            }
            AgentState {
                status: NodeStatus::IngestorDone,
                ..state
            }
        }
        Err(e) => {
            error!("Ingestion failed: {}", e);
            AgentState {
                answer: format!("Ingestion failed: {e}"),
                status: NodeStatus::Error,
                ..state
            }
        }
    }
}

/// Classify the query and record the routing decision
pub async fn routing_node(router: &QueryRouter, state: AgentState) -> AgentState {
    let decision = router.classify(&state.query).await;

    let mut state = state;
    state.is_weather_query = decision.is_weather;
    state.location = decision.location;
    // A parse failure is absorbed here: the answer explains it and the
    // request continues down the retrieval path
    if let Some(message) = decision.parse_error {
        state.answer = message;
    }
    state.status = NodeStatus::RoutingDone;
    state
}

/// Terminal node: answer with current weather for the extracted location
pub async fn weather_node(resolver: &WeatherResolver, state: AgentState) -> AgentState {
    let answer = resolver.resolve(state.location.as_deref()).await;

    AgentState {
        answer,
        status: NodeStatus::WeatherDone,
        ..state
    }
}

/// Terminal node: answer from the ingested documents
pub async fn retriever_node(retriever: &Retriever, state: AgentState) -> AgentState {
    let answer = if state.query.trim().is_empty() {
        "A query is required but was not provided".to_string()
    } else {
        match retriever.answer(&state.query).await {
            Ok(answer) => answer,
            Err(e) => {
                error!("Retrieval failed: {}", e);
                format!("Error retrieving documents: {e}")
            }
        }
    };

    AgentState {
        answer,
        status: NodeStatus::RetrieverDone,
        ..state
    }
}
