//! Display tree construction.
//!
//! Turns a nested collection forest into [`CollectionTreeItem`]s ready for an
//! interactive tree view: archived children are pruned at every depth,
//! collections can be filtered by the content models they hold, and each
//! retained node is annotated with a schema name and an icon.
//!
//! # Filtering
//!
//! A node is kept when no filter is set, or when its `here` or `below` tags
//! intersect the target models. A node that fails the test is dropped with
//! its whole subtree without looking at descendants: `below` aggregates
//! every descendant's content models, so no descendant could match either.
//! That only holds if the upstream data keeps `below` closed over the
//! subtree; [`below_contract_violations`] checks it.

use serde::Serialize;
use tracing::field::Empty;

use crate::defaults::TreeConfig;
use crate::icons::{CollectionIcon, DefaultIconResolver, IconResolver};
use crate::logging;
use crate::models::{Collection, CollectionId, ContentModel, TreeNode};

// =============================================================================
// OUTPUT
// =============================================================================

/// A retained collection annotated for display.
///
/// `collection` is the source record with its raw `children` cleared; the
/// filtered, annotated subtree lives in `children` instead. Serializes flat,
/// as the source record plus `schemaName`, `icon` and `children`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionTreeItem {
    #[serde(flatten)]
    pub collection: Collection,
    /// Storage name: `originalName` when the collection was relabeled.
    #[serde(rename = "schemaName")]
    pub schema_name: String,
    pub icon: CollectionIcon,
    pub children: Vec<CollectionTreeItem>,
}

impl CollectionTreeItem {
    pub fn id(&self) -> CollectionId {
        self.collection.id
    }

    pub fn name(&self) -> &str {
        &self.collection.name
    }

    /// Number of nodes in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }
}

impl TreeNode for CollectionTreeItem {
    type Id = CollectionId;

    fn node_id(&self) -> &CollectionId {
        &self.collection.id
    }

    fn child_nodes(&self) -> &[CollectionTreeItem] {
        &self.children
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Options for [`build_collection_tree`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeBuildOptions {
    /// Content models to filter by. `None` keeps every collection; an empty
    /// list keeps none.
    pub target_models: Option<Vec<ContentModel>>,
}

impl TreeBuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_models<I, M>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<ContentModel>,
    {
        self.target_models = Some(models.into_iter().map(Into::into).collect());
        self
    }
}

impl From<&TreeConfig> for TreeBuildOptions {
    fn from(config: &TreeConfig) -> Self {
        Self {
            target_models: config.target_models.clone(),
        }
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Builds display trees, resolving icons through `R`.
#[derive(Debug, Clone, Default)]
pub struct CollectionTreeBuilder<R = DefaultIconResolver> {
    icons: R,
    options: TreeBuildOptions,
}

impl CollectionTreeBuilder {
    /// Builder using the default icon resolver and no filter.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: IconResolver> CollectionTreeBuilder<R> {
    pub fn with_icon_resolver<S: IconResolver>(self, icons: S) -> CollectionTreeBuilder<S> {
        CollectionTreeBuilder {
            icons,
            options: self.options,
        }
    }

    pub fn with_options(mut self, options: TreeBuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &TreeBuildOptions {
        &self.options
    }

    /// Build the display tree for `collections`. Absent input yields an
    /// empty tree.
    pub fn build(&self, collections: Option<&[Collection]>) -> Vec<CollectionTreeItem> {
        let span = tracing::debug_span!(
            "build_collection_tree",
            target_models = ?self.options.target_models,
            node_count = Empty
        );
        let _guard = span.enter();

        let Some(collections) = collections else {
            span.record(logging::NODE_COUNT, 0usize);
            return Vec::new();
        };

        let top_level: Vec<&Collection> = collections.iter().collect();
        let tree = self.build_level(&top_level, 0);

        span.record(
            logging::NODE_COUNT,
            tree.iter().map(CollectionTreeItem::subtree_len).sum::<usize>(),
        );
        tree
    }

    fn build_level(&self, collections: &[&Collection], depth: usize) -> Vec<CollectionTreeItem> {
        let target_models = self.options.target_models.as_deref();

        collections
            .iter()
            .filter(|collection| {
                let keep = matches_target_models(collection, target_models);
                if !keep {
                    tracing::debug!(
                        collection_id = %collection.id,
                        depth,
                        "Pruned collection without target models"
                    );
                }
                keep
            })
            .map(|collection| self.build_node(collection, depth))
            .collect()
    }

    fn build_node(&self, collection: &Collection, depth: usize) -> CollectionTreeItem {
        tracing::trace!(collection_id = %collection.id, depth, "Building tree node");

        let visible_children: Vec<&Collection> =
            collection.children().iter().filter(|c| !c.archived).collect();
        let children = self.build_level(&visible_children, depth + 1);

        let schema_name = collection
            .original_name
            .clone()
            .unwrap_or_else(|| collection.name.clone());
        let icon = self.icons.icon_for(collection);

        CollectionTreeItem {
            collection: collection.without_children(),
            schema_name,
            icon,
            children,
        }
    }
}

/// Build a display tree with the default icon resolver.
pub fn build_collection_tree(
    collections: Option<&[Collection]>,
    options: &TreeBuildOptions,
) -> Vec<CollectionTreeItem> {
    CollectionTreeBuilder::new()
        .with_options(options.clone())
        .build(collections)
}

/// True iff no filter is set or the collection holds (directly or below)
/// one of the target models.
pub fn matches_target_models(
    collection: &Collection,
    target_models: Option<&[ContentModel]>,
) -> bool {
    match target_models {
        None => true,
        Some(models) => intersects(models, &collection.below) || intersects(models, &collection.here),
    }
}

fn intersects(a: &[ContentModel], b: &[ContentModel]) -> bool {
    a.iter().any(|model| b.contains(model))
}

// =============================================================================
// DATA CONTRACT
// =============================================================================

/// Collections whose `below` misses a content model found in a child's
/// `here` or `below`.
///
/// Filtering prunes whole subtrees on `below` alone, so every id returned
/// here is a place where a filtered tree can silently drop real matches.
pub fn below_contract_violations(forest: &[Collection]) -> Vec<CollectionId> {
    let mut violations = Vec::new();
    collect_violations(forest, &mut violations);
    violations
}

fn collect_violations(nodes: &[Collection], violations: &mut Vec<CollectionId>) {
    for node in nodes {
        let missing = node.children().iter().any(|child| {
            child
                .here
                .iter()
                .chain(child.below.iter())
                .any(|model| !node.below.contains(model))
        });
        if missing {
            tracing::debug!(collection_id = %node.id, "below does not cover descendants");
            violations.push(node.id);
        }
        collect_violations(node.children(), violations);
    }
}
