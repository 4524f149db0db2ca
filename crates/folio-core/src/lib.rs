//! # folio-core
//!
//! Collection hierarchy core for folio: turns collection records into
//! filtered display trees, resolves collection ancestry and personal
//! ownership, and tracks expand/collapse state for tree views.
//!
//! Every operation is a synchronous transformation of an immutable snapshot.
//! Lookups that find nothing return `None` or `false` instead of erroring.

pub mod ancestry;
pub mod defaults;
pub mod error;
pub mod i18n;
pub mod icons;
pub mod identity;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod tree_builder;

// Re-export commonly used types at crate root
pub use ancestry::{get_non_root_parent_id, get_parent_path, is_personal_collection_child, Ancestry};
pub use defaults::TreeConfig;
pub use error::{Error, Result};
pub use i18n::{EnglishCatalog, MessageCatalog, Translator};
pub use icons::{CollectionIcon, DefaultIconResolver, IconResolver};
pub use identity::{
    canonical_collection_id, current_user_personal_collections,
    current_user_personal_collections_with, is_item_pinned, is_personal_collection,
    is_root_collection, non_personal_or_archived_collection,
};
pub use models::*;
pub use navigation::{TreeNavigationState, TreeRender, TreeRow};
pub use tree_builder::{
    below_contract_violations, build_collection_tree, matches_target_models, CollectionTreeBuilder,
    CollectionTreeItem, TreeBuildOptions,
};
