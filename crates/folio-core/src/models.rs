//! Core data models for folio.
//!
//! These types mirror the collection records returned by the upstream
//! collection-listing API. Field names follow the API's wire format.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::defaults::ROOT_COLLECTION_ID;
use crate::error::{Error, Result};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a collection: the `"root"` sentinel or a numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionId {
    Root,
    Id(i64),
}

impl CollectionId {
    /// Numeric id, or `None` for the root collection.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Root => None,
            Self::Id(id) => Some(*id),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}

impl From<i64> for CollectionId {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str(ROOT_COLLECTION_ID),
            Self::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for CollectionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let raw = RawCollectionId::from(s);
        Ok(match crate::identity::canonical_collection_id(Some(&raw))? {
            Some(id) => Self::Id(id),
            None => Self::Root,
        })
    }
}

impl Serialize for CollectionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Root => serializer.serialize_str(ROOT_COLLECTION_ID),
            Self::Id(id) => serializer.serialize_i64(*id),
        }
    }
}

impl<'de> Deserialize<'de> for CollectionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match RawCollectionId::deserialize(deserializer)? {
            RawCollectionId::Number(id) => Ok(Self::Id(id)),
            RawCollectionId::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// A collection identifier as it arrives from mixed sources: URL params,
/// form values, API payloads. Normalize it with
/// [`canonical_collection_id`](crate::identity::canonical_collection_id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCollectionId {
    Number(i64),
    Text(String),
}

impl From<i64> for RawCollectionId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for RawCollectionId {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RawCollectionId {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<CollectionId> for RawCollectionId {
    fn from(id: CollectionId) -> Self {
        match id {
            CollectionId::Root => Self::Text(ROOT_COLLECTION_ID.to_string()),
            CollectionId::Id(id) => Self::Number(id),
        }
    }
}

// =============================================================================
// CONTENT MODELS
// =============================================================================

/// Tag naming a kind of content item (`"card"`, `"dataset"`, `"dashboard"`...).
///
/// Kept as an open string: the upstream API adds models over time and the
/// tree filter only ever compares tags for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentModel(String);

impl ContentModel {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentModel {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl fmt::Display for ContentModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// COLLECTION TYPES
// =============================================================================

/// Authority level of a collection. Regular collections carry none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityLevel {
    Official,
}

/// Entry of a collection's `effective_ancestors` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorRef {
    pub id: CollectionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_owner_id: Option<i64>,
}

impl AncestorRef {
    pub fn new(id: impl Into<CollectionId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            personal_owner_id: None,
        }
    }

    pub fn root() -> Self {
        Self::new(CollectionId::Root)
    }
}

/// A user-organized container of content items.
///
/// A collection may arrive either nested (with `children`) or flat, in which
/// case its position is described by `effective_ancestors` (root first) or,
/// failing that, by the `/`-separated `location` path. When both are absent
/// the parent is root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    /// Storage name saved before the display name was replaced
    /// (see [`current_user_personal_collections`](crate::identity::current_user_personal_collections)).
    #[serde(
        rename = "originalName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub original_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Present iff this is someone's personal collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_owner_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority_level: Option<AuthorityLevel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Collection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_ancestors: Option<Vec<AncestorRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Content models present anywhere in this collection's subtree.
    #[serde(default, deserialize_with = "null_as_default")]
    pub below: Vec<ContentModel>,
    /// Content models present directly inside this collection.
    #[serde(default, deserialize_with = "null_as_default")]
    pub here: Vec<ContentModel>,
}

impl Collection {
    /// Create a bare collection with no children, ancestry, or content.
    pub fn new(id: impl Into<CollectionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            original_name: None,
            description: None,
            personal_owner_id: None,
            authority_level: None,
            archived: false,
            children: None,
            effective_ancestors: None,
            location: None,
            below: Vec::new(),
            here: Vec::new(),
        }
    }

    /// Create the root collection.
    pub fn root(name: impl Into<String>) -> Self {
        Self::new(CollectionId::Root, name)
    }

    pub fn with_children(mut self, children: Vec<Collection>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn owned_by(mut self, user_id: i64) -> Self {
        self.personal_owner_id = Some(user_id);
        self
    }

    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    pub fn with_authority_level(mut self, level: AuthorityLevel) -> Self {
        self.authority_level = Some(level);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_effective_ancestors(mut self, ancestors: Vec<AncestorRef>) -> Self {
        self.effective_ancestors = Some(ancestors);
        self
    }

    pub fn with_here<I, M>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<ContentModel>,
    {
        self.here = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_below<I, M>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<ContentModel>,
    {
        self.below = models.into_iter().map(Into::into).collect();
        self
    }

    /// Copy of this record with `children` left out.
    pub fn without_children(&self) -> Collection {
        Collection {
            id: self.id,
            name: self.name.clone(),
            original_name: self.original_name.clone(),
            description: self.description.clone(),
            personal_owner_id: self.personal_owner_id,
            authority_level: self.authority_level,
            archived: self.archived,
            children: None,
            effective_ancestors: self.effective_ancestors.clone(),
            location: self.location.clone(),
            below: self.below.clone(),
            here: self.here.clone(),
        }
    }

    /// Declared children, empty when absent.
    pub fn children(&self) -> &[Collection] {
        self.children.as_deref().unwrap_or_default()
    }
}

/// The upstream API sends `null` where it means "none"; treat it like absence.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a JSON array of collection records.
pub fn parse_collections(json: &str) -> Result<Vec<Collection>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(Error::InvalidInput(
            "expected a JSON array of collections".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

/// Read and decode a collection dump from `path`.
pub fn load_collections(path: &Path) -> Result<Vec<Collection>> {
    let raw = std::fs::read_to_string(path)?;
    parse_collections(&raw)
}

// =============================================================================
// ITEMS
// =============================================================================

/// A content item listed inside a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Content model of the item (`"card"`, `"dashboard"`...).
    pub model: ContentModel,
    /// Pin position within the collection; `None` when unpinned.
    #[serde(default)]
    pub collection_position: Option<i64>,
}

// =============================================================================
// TREE SHAPE
// =============================================================================

/// A node of an owned forest: an id and its children, nothing else.
///
/// Implemented by raw [`Collection`]s and by display tree nodes so path
/// lookups work on either.
pub trait TreeNode: Sized {
    type Id: PartialEq + Clone;

    fn node_id(&self) -> &Self::Id;

    fn child_nodes(&self) -> &[Self];
}

impl TreeNode for Collection {
    type Id = CollectionId;

    fn node_id(&self) -> &CollectionId {
        &self.id
    }

    fn child_nodes(&self) -> &[Collection] {
        self.children()
    }
}
