//! Learntrack CLI - Command-line interface for the learning-resource tracker

use clap::{Parser, Subcommand};
use learntrack::config;
use learntrack::ui;
use learntrack::{ResourceDraft, ResourceId, ResourceKind, ResourcePatch, ResourceStore, SearchFilter, Status};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "learntrack")]
#[command(version)]
#[command(about = "Personal learning-resource tracker with a concept co-occurrence graph")]
#[command(long_about = r#"
Learntrack keeps your learning materials in one JSON file, letting you:
  • Record articles, videos, courses, and books with tags and key concepts
  • Search and filter the collection
  • Browse a graph of which concepts show up together

Example usage:
  learntrack add --title "The Rust Book" --kind book --concepts ownership,borrowing
  learntrack search --query rust --status in-progress
  learntrack graph
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the JSON data file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a learning resource
    Add {
        /// Title of the material
        #[arg(short, long)]
        title: String,

        /// Kind of material (article, video, course, book, other)
        #[arg(short, long, default_value = "article")]
        kind: ResourceKind,

        /// Where to find it
        #[arg(short, long)]
        url: Option<String>,

        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Comma-separated key concepts
        #[arg(short, long, value_delimiter = ',')]
        concepts: Vec<String>,

        /// Free-text notes
        #[arg(short, long, default_value = "")]
        notes: String,

        /// Initial status (defaults to planned)
        #[arg(short, long)]
        status: Option<Status>,
    },

    /// List resources, optionally filtered
    List {
        /// Filter by kind
        #[arg(short, long)]
        kind: Option<ResourceKind>,

        /// Filter by tag (case-insensitive)
        #[arg(short, long)]
        tag: Option<String>,

        /// Filter by status
        #[arg(short, long)]
        status: Option<Status>,
    },

    /// Search title, notes, tags, and concepts
    Search {
        /// Search query (case-insensitive substring)
        #[arg(short, long)]
        query: String,

        /// Filter by kind
        #[arg(short, long)]
        kind: Option<ResourceKind>,

        /// Filter by tag (case-insensitive)
        #[arg(short, long)]
        tag: Option<String>,

        /// Filter by status
        #[arg(short, long)]
        status: Option<Status>,
    },

    /// Update fields of a resource
    Update {
        /// Resource id
        id: ResourceId,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New kind
        #[arg(short, long)]
        kind: Option<ResourceKind>,

        /// New URL
        #[arg(short, long)]
        url: Option<String>,

        /// Replacement tags (comma-separated)
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        /// Replacement concepts (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        concepts: Option<Vec<String>>,

        /// New notes
        #[arg(short, long)]
        notes: Option<String>,

        /// New status
        #[arg(short, long)]
        status: Option<Status>,
    },

    /// Mark a resource completed
    Done {
        /// Resource id
        id: ResourceId,
    },

    /// Remove a resource
    Remove {
        /// Resource id
        id: ResourceId,
    },

    /// Show the concept co-occurrence graph
    Graph {
        /// Only show connections for this concept
        #[arg(short, long)]
        concept: Option<String>,
    },

    /// Show concepts related to a given concept
    Related {
        /// Concept to look up
        concept: String,
    },

    /// Show collection statistics
    Stats {
        /// How many top tags to show (defaults to the config file's
        /// top_tags, then 5)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Write a learntrack.toml config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// CLI flag wins over the config file, which wins over the default.
fn resolve_database(cli_db: Option<PathBuf>, config: Option<&config::TrackerConfig>) -> PathBuf {
    cli_db
        .or_else(|| {
            config
                .and_then(|c| c.database.clone())
                .map(PathBuf::from)
        })
        .unwrap_or_else(config::default_database_path)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = config::load_config(None)?;
    let database = resolve_database(cli.database, config.as_ref());

    match cli.command {
        Commands::Add { title, kind, url, tags, concepts, notes, status } => {
            let mut store = ResourceStore::open(&database)?;

            let mut draft = ResourceDraft::new(title, kind)
                .with_tags(tags)
                .with_concepts(concepts)
                .with_notes(notes);
            if let Some(url) = url {
                draft = draft.with_url(url);
            }
            if let Some(status) = status {
                draft = draft.with_status(status);
            }

            let resource = store.add(draft)?;
            ui::success(&format!("Added [{}] {}", resource.id, resource.title));
            ui::resource_card(&resource);
        }

        Commands::List { kind, tag, status } => {
            let store = ResourceStore::open(&database)?;
            let filter = SearchFilter { kind, tag, status };
            let resources = store.list(&filter);

            if resources.is_empty() {
                ui::empty("No resources found.");
            } else {
                ui::header(&format!("Resources ({})", resources.len()));
                for resource in resources {
                    ui::resource_card(resource);
                }
            }
        }

        Commands::Search { query, kind, tag, status } => {
            let store = ResourceStore::open(&database)?;
            let filter = SearchFilter { kind, tag, status };

            println!("{} Searching for: '{}'...", ui::Icons::SEARCH, query);
            let results = store.search(&query, &filter);

            if results.is_empty() {
                ui::empty("No resources matched.");
            } else {
                for resource in results {
                    ui::resource_line(resource);
                }
            }
        }

        Commands::Update { id, title, kind, url, tags, concepts, notes, status } => {
            let mut store = ResourceStore::open(&database)?;
            let patch = ResourcePatch { title, kind, url, tags, concepts, notes, status };

            if patch.is_empty() {
                anyhow::bail!("nothing to update: supply at least one field");
            }

            let resource = store.update(id, patch)?;
            ui::success(&format!("Updated [{}] {}", resource.id, resource.title));
            ui::resource_card(&resource);
        }

        Commands::Done { id } => {
            let mut store = ResourceStore::open(&database)?;
            let patch = ResourcePatch {
                status: Some(Status::Completed),
                ..Default::default()
            };
            let resource = store.update(id, patch)?;
            ui::success(&format!("Completed [{}] {}", resource.id, resource.title));
        }

        Commands::Remove { id } => {
            let mut store = ResourceStore::open(&database)?;
            let removed = store.delete(id)?;
            println!("{} Removed [{}] {}", ui::Icons::DEL, removed.id, removed.title);
        }

        Commands::Graph { concept } => {
            let store = ResourceStore::open(&database)?;
            let graph = store.concept_graph();

            if let Some(concept) = concept {
                show_related(&graph, &concept);
            } else if graph.is_empty() {
                ui::empty("No concepts yet. Add resources with concepts to build the graph.");
            } else {
                ui::header("Knowledge Graph Connections");
                for node in graph.nodes() {
                    let neighbors = graph.neighbors(node);
                    if neighbors.is_empty() {
                        continue;
                    }
                    println!("\n{}", node);
                    for (other, weight) in neighbors {
                        println!("  └─ {} {}", other, ui::dim(&format!("(x{})", weight)));
                    }
                }

                if graph.edge_count() > 0 {
                    ui::section("Strongest connections");
                    for (pair, weight) in graph.top_edges(5) {
                        println!("  {} {}", pair, ui::dim(&format!("(x{})", weight)));
                    }
                }

                println!();
                print!("{}", graph.stats());
            }
        }

        Commands::Related { concept } => {
            let store = ResourceStore::open(&database)?;
            let graph = store.concept_graph();
            show_related(&graph, &concept);
        }

        Commands::Stats { top } => {
            let store = ResourceStore::open(&database)?;
            let top = config::resolve_top_tags(top, config.as_ref());
            let stats = store.stats(top);

            ui::header("Learning Statistics");
            ui::info("Data file", &database.display().to_string());

            let mut rows: Vec<(&str, String)> = vec![("Resources", stats.total.to_string())];
            for (kind, count) in &stats.by_kind {
                rows.push((kind.as_str(), count.to_string()));
            }
            for (status, count) in &stats.by_status {
                rows.push((status.as_str(), count.to_string()));
            }
            rows.push(("Unique tags", stats.unique_tags.to_string()));
            rows.push(("Unique concepts", stats.unique_concepts.to_string()));
            println!("{}", ui::stats_table(&rows));

            if !stats.top_tags.is_empty() {
                ui::section("Most-used tags");
                for (tag, count) in &stats.top_tags {
                    println!("  {} {} {}", ui::Icons::TAG, tag, ui::dim(&format!("(x{})", count)));
                }
            }
        }

        Commands::Init { force } => {
            let path = config::default_config_path();
            let cfg = config::TrackerConfig {
                database: Some(database.to_string_lossy().to_string()),
                top_tags: None,
            };
            config::write_config(&path, &cfg, force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}

fn show_related(graph: &learntrack::ConceptGraph, concept: &str) {
    if !graph.contains(concept) {
        ui::empty(&format!("Concept '{}' does not appear in any resource.", concept));
        return;
    }

    let neighbors = graph.neighbors(concept);
    if neighbors.is_empty() {
        ui::empty(&format!("No connections found for '{}'.", concept));
    } else {
        ui::header(&format!("Connections for '{}'", concept));
        for (other, weight) in neighbors {
            println!("  • {} {}", other, ui::dim(&format!("(x{})", weight)));
        }
    }
}
