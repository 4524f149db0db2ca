//! Icon-lookup collaborator used by the tree builder.

use serde::{Deserialize, Serialize};

use crate::defaults::{
    ICON_BADGE, ICON_FOLDER, ICON_PERSON, OFFICIAL_BADGE_COLOR, OFFICIAL_COLLECTION_TOOLTIP_KEY,
};
use crate::i18n::{EnglishCatalog, Translator};
use crate::identity::is_personal_collection;
use crate::models::{AuthorityLevel, Collection};

/// Icon descriptor attached to each display tree node.
///
/// The builder passes it through untouched; only renderers look inside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionIcon {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl CollectionIcon {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
            tooltip: None,
        }
    }
}

/// Resolves the icon for a collection.
pub trait IconResolver {
    fn icon_for(&self, collection: &Collection) -> CollectionIcon;
}

impl<F> IconResolver for F
where
    F: Fn(&Collection) -> CollectionIcon,
{
    fn icon_for(&self, collection: &Collection) -> CollectionIcon {
        self(collection)
    }
}

/// Personal collections get a person, official ones a badge, the rest a folder.
#[derive(Debug, Clone, Default)]
pub struct DefaultIconResolver<T = EnglishCatalog> {
    translator: T,
}

impl DefaultIconResolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Translator> DefaultIconResolver<T> {
    /// Resolver whose official-collection tooltip goes through `translator`.
    pub fn with_translator(translator: T) -> Self {
        Self { translator }
    }
}

impl<T: Translator> IconResolver for DefaultIconResolver<T> {
    fn icon_for(&self, collection: &Collection) -> CollectionIcon {
        if is_personal_collection(collection) {
            return CollectionIcon::named(ICON_PERSON);
        }

        match collection.authority_level {
            Some(AuthorityLevel::Official) => CollectionIcon {
                name: ICON_BADGE.to_string(),
                color: Some(OFFICIAL_BADGE_COLOR.to_string()),
                tooltip: Some(self.translator.translate(OFFICIAL_COLLECTION_TOOLTIP_KEY)),
            },
            None => CollectionIcon::named(ICON_FOLDER),
        }
    }
}
