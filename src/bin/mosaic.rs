//! Mosaic CLI: aggregate configured sources and analyze the result.
//!
//! Usage:
//!   mosaic [--config path] [--db path] load
//!   mosaic [--config path] [--db path] ego <ID> [--hops N]
//!   mosaic [--config path] [--db path] sources <list|enable|disable>
//!
//! Results go to stdout as JSON; logs go to stderr (filter via `MOSAIC_LOG`).

use clap::{Parser, Subcommand, ValueEnum};
use mosaic::aggregate::AggregatedGraph;
use mosaic::analysis;
use mosaic::{
    Aggregator, KeyValueStore, MosaicConfig, NodeId, OpenStore,
    RelationshipStore, SqliteStore,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "mosaic",
    version,
    about = "Aggregate entities from many sources into one relationship graph"
)]
struct Cli {
    /// Path to a YAML config file (falls back to MOSAIC_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect enabled sources and print the graph
    Load,
    /// Print graph statistics
    Stats,
    /// Print connected components
    Components,
    /// Print the ego network around a node
    Ego {
        /// Center node id
        id: String,
        /// Radius in hops (defaults to the configured value)
        #[arg(long)]
        hops: Option<usize>,
    },
    /// Print the graph after one trim pass
    Trim {
        #[arg(value_enum)]
        kind: TrimKind,
    },
    /// Print the graph restricted to a publication-year range
    Years {
        #[arg(long)]
        min: i32,
        #[arg(long)]
        max: i32,
    },
    /// Print the shortest undirected path between two nodes
    Path { from: String, to: String },
    /// Save the loaded graph into the relationship store
    Persist,
    /// Manage which sources are enabled
    Sources {
        #[command(subcommand)]
        action: SourcesAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TrimKind {
    Leaf,
    Root,
    Degree1,
    Isolated,
}

#[derive(Subcommand)]
enum SourcesAction {
    /// List registered sources with entity counts
    List,
    /// Enable a source
    Enable { id: String },
    /// Disable a source
    Disable { id: String },
}

/// Get the data directory (~/.local/share/mosaic)
fn data_dir() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("mosaic")
}

/// Get the default database path (~/.local/share/mosaic/mosaic.db)
fn default_db_path() -> PathBuf {
    data_dir().join("mosaic.db")
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("MOSAIC_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mosaic=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn open_aggregator(cli: &Cli) -> Result<(Aggregator, Arc<SqliteStore>), String> {
    let config = MosaicConfig::resolve(cli.config.as_deref())
        .map_err(|e| format!("Failed to load config: {}", e))?;
    let db_path = cli.db.clone().unwrap_or_else(default_db_path);
    let store = Arc::new(
        SqliteStore::open(&db_path).map_err(|e| format!("Failed to open database: {}", e))?,
    );

    let kv: Arc<dyn KeyValueStore> = store.clone();
    let overlay: Arc<dyn RelationshipStore> = store.clone();
    let sources = config.sources.clone();
    let mut aggregator = Aggregator::new(config, kv)
        .map_err(|e| format!("Invalid config: {}", e))?
        .with_overlay(overlay);
    aggregator.registry_mut().register_files(&sources, &data_dir());
    Ok((aggregator, store))
}

async fn loaded(aggregator: &Aggregator) -> AggregatedGraph {
    let result = aggregator.load().await;
    if let Some(error) = &result.error {
        eprintln!("Warning: {}", error);
    }
    result
}

fn persist(store: &SqliteStore, result: &AggregatedGraph) -> i32 {
    let saved = result
        .graph
        .nodes()
        .iter()
        .try_for_each(|node| store.save_node(node))
        .and_then(|()| {
            result
                .graph
                .edges()
                .iter()
                .try_for_each(|edge| store.save_edge(edge))
        });
    match saved {
        Ok(()) => print_json(&serde_json::json!({
            "nodes": result.graph.node_count(),
            "edges": result.graph.edge_count(),
        })),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn run(cli: Cli) -> i32 {
    let (aggregator, store) = match open_aggregator(&cli) {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    if let Commands::Sources { action } = &cli.command {
        return match action {
            SourcesAction::List => print_json(&aggregator.probe_counts().await),
            SourcesAction::Enable { id } => {
                aggregator.set_enabled(id, true);
                print_json(&aggregator.source_states())
            }
            SourcesAction::Disable { id } => {
                aggregator.set_enabled(id, false);
                print_json(&aggregator.source_states())
            }
        };
    }

    let result = loaded(&aggregator).await;
    let nodes = result.graph.nodes();
    let edges = result.graph.edges();

    match cli.command {
        Commands::Load => print_json(&result),
        Commands::Stats => print_json(&analysis::get_graph_stats(nodes, edges)),
        Commands::Components => print_json(&analysis::find_connected_components(nodes, edges)),
        Commands::Ego { id, hops } => {
            let hops = hops.unwrap_or(aggregator.config().default_ego_hops);
            match analysis::extract_ego_network(nodes, edges, &NodeId::from(id), hops) {
                Ok(outcome) => print_json(&outcome),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    1
                }
            }
        }
        Commands::Trim { kind } => {
            let outcome = match kind {
                TrimKind::Leaf => analysis::trim_leaf_nodes(nodes, edges),
                TrimKind::Root => analysis::trim_root_nodes(nodes, edges),
                TrimKind::Degree1 => analysis::trim_degree1_nodes(nodes, edges),
                TrimKind::Isolated => analysis::remove_isolated_nodes(nodes, edges),
            };
            print_json(&outcome)
        }
        Commands::Years { min, max } => {
            match analysis::filter_by_publication_year(nodes, edges, min, max) {
                Ok(outcome) => print_json(&outcome),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    1
                }
            }
        }
        Commands::Path { from, to } => print_json(&analysis::shortest_path(
            nodes,
            edges,
            &NodeId::from(from),
            &NodeId::from(to),
        )),
        Commands::Persist => persist(&store, &result),
        Commands::Sources { .. } => 0,
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };
    let code = rt.block_on(run(cli));
    std::process::exit(code);
}
