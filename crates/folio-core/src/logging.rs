//! Structured logging field name constants for folio.
//!
//! Library code emits `tracing` events with these field names so the
//! subscriber installed by the binary (or by an embedding application) can
//! filter and aggregate on them consistently.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | WARN  | Recoverable issue, default applied (bad config value) |
//! | INFO  | CLI lifecycle, command completion |
//! | DEBUG | Decision points (pruned subtree, unresolvable ancestor) |
//! | TRACE | Per-node iteration |

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Collection id being operated on.
pub const COLLECTION_ID: &str = "collection_id";

/// Owner id of a personal collection.
pub const OWNER_ID: &str = "owner_id";

/// Tree node id (navigation state).
pub const NODE_ID: &str = "node_id";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Content models used as the tree filter.
pub const TARGET_MODELS: &str = "target_models";

/// Number of nodes in an input or output sequence.
pub const NODE_COUNT: &str = "node_count";

/// Depth of a node in the tree (0 = top level).
pub const DEPTH: &str = "depth";

/// Number of expanded ids in a navigation state.
pub const EXPANDED_COUNT: &str = "expanded_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean found/not-found indicator.
pub const FOUND: &str = "found";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
