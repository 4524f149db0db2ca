//! Ancestor resolution for collections.
//!
//! Collections describe their position in one of two ways: nested inside a
//! parent's `children`, or flat with an ancestor list. Flat records carry
//! either `effective_ancestors` (root first) or a `location` path such as
//! `"/1/4/"` (root-relative, root itself omitted). [`Ancestry`] folds both
//! flat encodings into one type so nothing downstream branches on them.

use tracing::field::Empty;

use crate::defaults::LOCATION_SEPARATOR;
use crate::identity::{canonical_collection_id, is_personal_collection};
use crate::logging;
use crate::models::{AncestorRef, Collection, CollectionId, RawCollectionId, TreeNode};

// =============================================================================
// PATHS IN NESTED FORESTS
// =============================================================================

/// Ids from a top-level node down to and including `target`.
///
/// Every top-level tree is searched depth-first in document order and the
/// first match wins. Returns `None` when no node has that id, including for
/// an empty forest.
pub fn get_parent_path<N: TreeNode>(forest: &[N], target: &N::Id) -> Option<Vec<N::Id>> {
    let span = tracing::trace_span!("parent_path", found = Empty, depth = Empty);
    let _guard = span.enter();

    let path = find_path(forest, target);

    span.record(logging::FOUND, path.is_some());
    if let Some(path) = &path {
        span.record(logging::DEPTH, path.len().saturating_sub(1));
    }
    path
}

fn find_path<N: TreeNode>(nodes: &[N], target: &N::Id) -> Option<Vec<N::Id>> {
    for node in nodes {
        if node.node_id() == target {
            return Some(vec![node.node_id().clone()]);
        }
        if let Some(mut path) = find_path(node.child_nodes(), target) {
            path.insert(0, node.node_id().clone());
            return Some(path);
        }
    }
    None
}

// =============================================================================
// FLAT ANCESTRY
// =============================================================================

/// Normalized ancestry of a flat collection record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ancestry {
    /// Ancestor ids from `effective_ancestors`, root first (root included).
    EffectiveAncestors(Vec<CollectionId>),
    /// Non-empty segments of a `location` path, root excluded. Segments are
    /// kept raw; they are canonicalized on lookup.
    Location(Vec<String>),
}

impl Ancestry {
    pub fn from_effective_ancestors(ancestors: &[AncestorRef]) -> Self {
        Self::EffectiveAncestors(ancestors.iter().map(|a| a.id).collect())
    }

    pub fn from_location(location: &str) -> Self {
        Self::Location(
            location
                .split(LOCATION_SEPARATOR)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Ancestry of `collection`: `effective_ancestors` when present, else
    /// `location`. With neither, the parent is root.
    pub fn of(collection: &Collection) -> Self {
        match (&collection.effective_ancestors, &collection.location) {
            (Some(ancestors), _) => Self::from_effective_ancestors(ancestors),
            (None, Some(location)) => Self::from_location(location),
            (None, None) => Self::Location(Vec::new()),
        }
    }

    /// The non-root ancestor nearest the root, if any.
    pub fn first_non_root_id(&self) -> Option<i64> {
        match self {
            Self::EffectiveAncestors(ids) => ids.get(1).and_then(CollectionId::as_number),
            Self::Location(segments) => segments.first().and_then(|s| location_segment_id(s)),
        }
    }

    /// All resolvable non-root ancestor ids, nearest the root first.
    pub fn non_root_ids(&self) -> Vec<i64> {
        match self {
            Self::EffectiveAncestors(ids) => ids.iter().filter_map(CollectionId::as_number).collect(),
            Self::Location(segments) => segments
                .iter()
                .filter_map(|s| location_segment_id(s))
                .collect(),
        }
    }

    /// The direct parent. `None` for the root collection itself (empty
    /// `effective_ancestors`) and when the last `location` segment does not
    /// resolve.
    pub fn immediate_parent_id(&self) -> Option<CollectionId> {
        match self {
            Self::EffectiveAncestors(ids) => ids.last().copied(),
            Self::Location(segments) => match segments.last() {
                None => Some(CollectionId::Root),
                Some(segment) => location_segment_id(segment).map(CollectionId::Id),
            },
        }
    }
}

fn location_segment_id(segment: &str) -> Option<i64> {
    let raw = RawCollectionId::from(segment);
    match canonical_collection_id(Some(&raw)) {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!(
                segment,
                error = %e,
                "Unresolvable location segment, treating as no ancestor"
            );
            None
        }
    }
}

// =============================================================================
// PERSONAL OWNERSHIP
// =============================================================================

/// The first non-root ancestor of `collection` (nearest the root, not the
/// immediate parent). `None` for root and for direct children of root.
pub fn get_non_root_parent_id(collection: &Collection) -> Option<i64> {
    Ancestry::of(collection).first_non_root_id()
}

/// True iff `collection` sits somewhere inside a personal collection found
/// in `collections`.
///
/// Only the top-most non-root ancestor matters: personal collections are
/// always direct children of root. An ancestor id of `0` counts as no
/// ancestor.
pub fn is_personal_collection_child(collection: &Collection, collections: &[Collection]) -> bool {
    let Some(parent_id) = get_non_root_parent_id(collection).filter(|id| *id != 0) else {
        return false;
    };

    let parent_id = CollectionId::Id(parent_id);
    let result = collections
        .iter()
        .find(|c| c.id == parent_id)
        .is_some_and(is_personal_collection);

    tracing::trace!(
        collection_id = %collection.id,
        parent = %parent_id,
        result,
        "Resolved personal ancestry"
    );
    result
}
