//! folio: inspect collection dumps from the command line.
//!
//! Reads a JSON array of collection records (as returned by the collection
//! listing API) and prints display trees, ancestor paths and ownership
//! queries as JSON on stdout. Logs go to stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_core::defaults::{parse_target_models, PERSONAL_COLLECTION_LABEL_KEY};
use folio_core::{
    below_contract_violations, current_user_personal_collections_with, get_non_root_parent_id,
    get_parent_path, is_personal_collection_child, load_collections, Ancestry, Collection,
    CollectionId, CollectionTreeBuilder, CollectionTreeItem, EnglishCatalog, TreeBuildOptions,
    TreeConfig, TreeNavigationState, TreeNode, TreeRender, Translator,
};

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Inspect collection hierarchies")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the display tree and the rows a tree view would show
    Tree {
        /// JSON file holding an array of collections
        #[arg(short, long)]
        input: PathBuf,

        /// Comma-separated content models to filter by (default: FOLIO_TARGET_MODELS)
        #[arg(short, long)]
        models: Option<String>,

        /// Relabel this user's personal collection
        #[arg(short, long)]
        user_id: Option<i64>,

        /// Collection to select; the path to it starts expanded
        #[arg(short, long)]
        selected: Option<CollectionId>,
    },

    /// Print the path from a top-level collection down to a target
    Path {
        #[arg(short, long)]
        input: PathBuf,

        /// Target collection id
        #[arg(short, long)]
        target: CollectionId,
    },

    /// Resolve ancestry and personal ownership of one collection
    Ancestry {
        #[arg(short, long)]
        input: PathBuf,

        /// Collection id to inspect
        #[arg(long)]
        id: CollectionId,
    },

    /// List a user's personal collections, relabeled for display
    Personal {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        user_id: i64,
    },

    /// Report collections whose `below` misses a descendant's content models
    Validate {
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

// Environment variables:
//   LOG_FORMAT - "json" or "text" (default: "text")
//   LOG_ANSI   - "true"/"false" override ANSI colors
//   RUST_LOG   - standard env filter (default: "folio=info,folio_core=warn")
fn init_logging() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "folio=info,folio_core=warn".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    if log_format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        if let Some(ansi) = log_ansi {
            layer = layer.with_ansi(ansi);
        }
        registry.with(layer).init();
    }
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let config = TreeConfig::from_env();

    let output = match cli.command {
        Commands::Tree {
            input,
            models,
            user_id,
            selected,
        } => cmd_tree(&config, &input, models.as_deref(), user_id, selected)?,
        Commands::Path { input, target } => cmd_path(&input, target)?,
        Commands::Ancestry { input, id } => cmd_ancestry(&input, id)?,
        Commands::Personal { input, user_id } => cmd_personal(&config, &input, user_id)?,
        Commands::Validate { input } => cmd_validate(&input)?,
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

fn load(path: &Path) -> anyhow::Result<Vec<Collection>> {
    let collections =
        load_collections(path).with_context(|| format!("loading {}", path.display()))?;
    info!(
        input = %path.display(),
        node_count = collections.len(),
        "Loaded collections"
    );
    Ok(collections)
}

/// The configured label wins over the built-in English catalog.
fn translator(config: &TreeConfig) -> impl Translator + '_ {
    move |key: &str| match &config.personal_label {
        Some(label) if key == PERSONAL_COLLECTION_LABEL_KEY => label.clone(),
        _ => EnglishCatalog.translate(key),
    }
}

/// Replace `user_id`'s top-level personal collections with relabeled copies.
fn relabel_personal(config: &TreeConfig, collections: Vec<Collection>, user_id: i64) -> Vec<Collection> {
    let relabeled = current_user_personal_collections_with(&collections, user_id, &translator(config));
    collections
        .into_iter()
        .map(|c| {
            relabeled
                .iter()
                .find(|r| r.id == c.id)
                .cloned()
                .unwrap_or(c)
        })
        .collect()
}

fn cmd_tree(
    config: &TreeConfig,
    input: &Path,
    models: Option<&str>,
    user_id: Option<i64>,
    selected: Option<CollectionId>,
) -> anyhow::Result<Value> {
    let mut collections = load(input)?;
    if let Some(user_id) = user_id {
        collections = relabel_personal(config, collections, user_id);
    }

    let mut options = TreeBuildOptions::from(config);
    if let Some(models) = models {
        options.target_models = Some(
            parse_target_models(models).context("--models names no content model")?,
        );
    }

    let tree = CollectionTreeBuilder::new()
        .with_options(options)
        .build(Some(&collections[..]));
    let state = TreeNavigationState::initial(&tree, selected.as_ref());

    let mut expanded: Vec<CollectionId> = state.expanded_ids().iter().copied().collect();
    expanded.sort();

    let rows = match state.render(&tree, selected.as_ref()) {
        TreeRender::EmptyState => Value::Null,
        TreeRender::Rows(rows) => rows
            .iter()
            .map(|row| {
                json!({
                    "id": row.node.id(),
                    "name": row.node.name(),
                    "depth": row.depth,
                    "expanded": row.is_expanded,
                    "selected": row.is_selected,
                    "has_children": row.has_children,
                })
            })
            .collect(),
    };

    info!(
        node_count = tree.iter().map(CollectionTreeItem::subtree_len).sum::<usize>(),
        expanded_count = expanded.len(),
        "Built collection tree"
    );

    Ok(json!({
        "tree": tree,
        "expanded": expanded,
        "rows": rows,
        "empty_state": tree.is_empty(),
    }))
}

fn cmd_path(input: &Path, target: CollectionId) -> anyhow::Result<Value> {
    let collections = load(input)?;
    let path = get_parent_path(&collections, &target);
    Ok(json!({ "target": target, "path": path }))
}

fn find_collection(nodes: &[Collection], id: CollectionId) -> Option<&Collection> {
    nodes.iter().find_map(|node| {
        if node.id == id {
            Some(node)
        } else {
            find_collection(node.child_nodes(), id)
        }
    })
}

fn cmd_ancestry(input: &Path, id: CollectionId) -> anyhow::Result<Value> {
    let collections = load(input)?;
    let collection = find_collection(&collections, id)
        .with_context(|| format!("collection {} not found", id))?;

    let ancestry = Ancestry::of(collection);
    Ok(json!({
        "id": id,
        "non_root_parent_id": get_non_root_parent_id(collection),
        "immediate_parent_id": ancestry.immediate_parent_id(),
        "non_root_ancestor_ids": ancestry.non_root_ids(),
        "is_personal_collection_child": is_personal_collection_child(collection, &collections),
    }))
}

fn cmd_personal(config: &TreeConfig, input: &Path, user_id: i64) -> anyhow::Result<Value> {
    let collections = load(input)?;
    let personal = current_user_personal_collections_with(&collections, user_id, &translator(config));
    Ok(serde_json::to_value(personal)?)
}

fn cmd_validate(input: &Path) -> anyhow::Result<Value> {
    let collections = load(input)?;
    let violations = below_contract_violations(&collections);
    Ok(json!({ "valid": violations.is_empty(), "violations": violations }))
}
