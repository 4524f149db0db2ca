//! Centralized default constants for folio.
//!
//! **This module is the single source of truth** for shared default values.
//! Other modules and the `folio` binary reference these constants instead of
//! defining their own literals.

use crate::models::ContentModel;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Sentinel identifier of the root collection.
pub const ROOT_COLLECTION_ID: &str = "root";

/// Separator between ancestor ids in a collection `location` string.
pub const LOCATION_SEPARATOR: char = '/';

// =============================================================================
// LOCALIZATION
// =============================================================================

/// Message key for the signed-in user's personal collection label.
///
/// Keys are the English source strings, so the key doubles as the
/// untranslated label.
pub const PERSONAL_COLLECTION_LABEL_KEY: &str = "Your personal collection";

/// Message key for the tooltip on official collections.
pub const OFFICIAL_COLLECTION_TOOLTIP_KEY: &str = "Official collection";

// =============================================================================
// ICONS
// =============================================================================

/// Icon for regular collections.
pub const ICON_FOLDER: &str = "folder";

/// Icon for personal collections.
pub const ICON_PERSON: &str = "person";

/// Icon for official collections.
pub const ICON_BADGE: &str = "badge";

/// Color applied to the official collection badge.
pub const OFFICIAL_BADGE_COLOR: &str = "saturated-yellow";

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Comma-separated content models used as the default tree filter.
pub const ENV_TARGET_MODELS: &str = "FOLIO_TARGET_MODELS";

/// Override for the personal collection label.
pub const ENV_PERSONAL_LABEL: &str = "FOLIO_PERSONAL_LABEL";

// =============================================================================
// TREE CONFIG
// =============================================================================

/// Runtime knobs for building display trees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeConfig {
    /// Content models to filter by. `None` keeps every collection.
    pub target_models: Option<Vec<ContentModel>>,
    /// Label replacing the name of the current user's personal collection.
    /// `None` defers to the translator.
    pub personal_label: Option<String>,
}

impl TreeConfig {
    /// Load configuration from environment variables with fallback to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Split out from [`TreeConfig::from_env`] so tests don't have to mutate
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup(ENV_TARGET_MODELS) {
            match parse_target_models(&val) {
                Some(models) => config.target_models = Some(models),
                None => {
                    tracing::warn!(value = %val, "Invalid FOLIO_TARGET_MODELS, using default");
                }
            }
        }

        if let Some(val) = lookup(ENV_PERSONAL_LABEL) {
            let label = val.trim();
            if label.is_empty() {
                tracing::warn!("Empty FOLIO_PERSONAL_LABEL, using default");
            } else {
                config.personal_label = Some(label.to_string());
            }
        }

        config
    }
}

/// Parse a comma-separated list of content models.
///
/// Blank entries are skipped. Returns `None` when nothing usable remains,
/// since an empty filter would hide every collection.
pub fn parse_target_models(raw: &str) -> Option<Vec<ContentModel>> {
    let models: Vec<ContentModel> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ContentModel::from)
        .collect();

    if models.is_empty() {
        None
    } else {
        Some(models)
    }
}
