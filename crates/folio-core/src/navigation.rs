//! Expand/collapse state for an interactive tree view.
//!
//! The state is nothing but the set of expanded node ids. It indexes into a
//! display tree by id and never holds or modifies tree data, so it survives
//! tree rebuilds as long as ids stay stable.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use tracing::field::Empty;

use crate::ancestry::get_parent_path;
use crate::logging;
use crate::models::TreeNode;

/// Set of expanded node ids backing a tree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNavigationState<Id: Eq + Hash> {
    expanded: HashSet<Id>,
}

impl<Id: Eq + Hash> Default for TreeNavigationState<Id> {
    fn default() -> Self {
        Self {
            expanded: HashSet::new(),
        }
    }
}

impl<Id> TreeNavigationState<Id>
where
    Id: Eq + Hash + Clone + fmt::Debug,
{
    /// Fully collapsed state.
    pub fn new() -> Self {
        Self::default()
    }

    /// State for the first render of `data`.
    ///
    /// With a selected id, every node on the path to it is expanded, the
    /// selected node included, so the selection is visible. An unknown or
    /// absent selection starts fully collapsed.
    pub fn initial<N>(data: &[N], selected_id: Option<&Id>) -> Self
    where
        N: TreeNode<Id = Id>,
    {
        let expanded: HashSet<Id> = selected_id
            .and_then(|id| get_parent_path(data, id))
            .map(|path| path.into_iter().collect())
            .unwrap_or_default();

        tracing::debug!(
            selected = ?selected_id,
            expanded_count = expanded.len(),
            "Initialized tree navigation"
        );
        Self { expanded }
    }

    /// Re-derive the expansion from a (possibly new) selection.
    ///
    /// Selection changes never re-expand on their own; a consumer that wants
    /// the new selection revealed calls this explicitly.
    pub fn reseed<N>(&mut self, data: &[N], selected_id: Option<&Id>)
    where
        N: TreeNode<Id = Id>,
    {
        *self = Self::initial(data, selected_id);
    }

    /// Collapse `id` if expanded, expand it otherwise. Returns whether the
    /// node is expanded afterwards.
    pub fn toggle(&mut self, id: &Id) -> bool {
        let span = tracing::trace_span!("toggle", node_id = ?id, expanded_count = Empty);
        let _guard = span.enter();

        let expanded = if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        };

        span.record(logging::EXPANDED_COUNT, self.expanded.len());
        expanded
    }

    pub fn is_expanded(&self, id: &Id) -> bool {
        self.expanded.contains(id)
    }

    pub fn expanded_ids(&self) -> &HashSet<Id> {
        &self.expanded
    }

    /// Rows to display for `data` under the current expansion.
    ///
    /// An empty top-level tree renders as [`TreeRender::EmptyState`]. Otherwise
    /// rows are listed in document order, and a node's children appear only
    /// when the node is expanded.
    pub fn render<'a, N>(&self, data: &'a [N], selected_id: Option<&Id>) -> TreeRender<'a, N>
    where
        N: TreeNode<Id = Id>,
    {
        if data.is_empty() {
            return TreeRender::EmptyState;
        }

        let mut rows = Vec::new();
        self.collect_rows(data, selected_id, 0, &mut rows);
        TreeRender::Rows(rows)
    }

    fn collect_rows<'a, N>(
        &self,
        nodes: &'a [N],
        selected_id: Option<&Id>,
        depth: usize,
        rows: &mut Vec<TreeRow<'a, N>>,
    ) where
        N: TreeNode<Id = Id>,
    {
        for node in nodes {
            let is_expanded = self.is_expanded(node.node_id());
            rows.push(TreeRow {
                node,
                depth,
                is_expanded,
                is_selected: selected_id == Some(node.node_id()),
                has_children: !node.child_nodes().is_empty(),
            });
            if is_expanded {
                self.collect_rows(node.child_nodes(), selected_id, depth + 1, rows);
            }
        }
    }
}

/// What a tree view shows for a given tree and navigation state.
#[derive(Debug)]
pub enum TreeRender<'a, N> {
    /// The tree has no top-level nodes; show the placeholder instead.
    EmptyState,
    Rows(Vec<TreeRow<'a, N>>),
}

impl<'a, N> TreeRender<'a, N> {
    pub fn is_empty_state(&self) -> bool {
        matches!(self, Self::EmptyState)
    }

    pub fn rows(&self) -> &[TreeRow<'a, N>] {
        match self {
            Self::EmptyState => &[],
            Self::Rows(rows) => rows,
        }
    }
}

/// One visible row of a tree view.
#[derive(Debug)]
pub struct TreeRow<'a, N> {
    pub node: &'a N,
    /// 0 for top-level nodes.
    pub depth: usize,
    pub is_expanded: bool,
    pub is_selected: bool,
    pub has_children: bool,
}
