use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use raggraph::config::AppConfig;
use raggraph::graph::AgentGraph;
use raggraph::models::AgentState;
use raggraph::models::Persistence;
use tracing::info;

#[derive(Parser)]
#[command(name = "raggraph")]
#[command(about = "Document RAG agent with weather-aware query routing")]
#[command(version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest documents into the vector collection
    Ingest {
        /// Files to ingest
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Ask a question, optionally ingesting documents first
    Ask {
        /// The query to answer
        query: String,
        /// Files to ingest before answering
        #[arg(short, long)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    raggraph::logging::init_logging_with_config(Some(&config))?;

    let graph = AgentGraph::new(&config)?;

    match cli.command {
        Commands::Ingest { files } => {
            let handle = graph.ingestor().ingest(&files).await?;
            match handle.persistence {
                Persistence::Full => {
                    println!(
                        "Ingested {} records into '{}' (verified: {})",
                        handle.records, handle.name, handle.verified
                    );
                }
                Persistence::Partial { failed_records } => {
                    println!(
                        "Ingested {} records into '{}' with {} failures (degraded)",
                        handle.records, handle.name, failed_records
                    );
                }
            }
        }
        Commands::Ask { query, files } => {
            let state = AgentState::new(files, query);
            let final_state = graph.run(state).await;
            info!("Request finished with status {:?}", final_state.status);
            println!("{}", final_state.answer);
        }
    }

    Ok(())
}
