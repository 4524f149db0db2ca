//! Collection identity: root and personal collection detection, id
//! normalization, and relabeling of the signed-in user's personal collection.

use crate::defaults::{PERSONAL_COLLECTION_LABEL_KEY, ROOT_COLLECTION_ID};
use crate::error::{Error, Result};
use crate::i18n::{EnglishCatalog, Translator};
use crate::models::{Collection, CollectionId, Item, RawCollectionId};

/// True iff the collection belongs to a user's private area.
pub fn is_personal_collection(collection: &Collection) -> bool {
    collection.personal_owner_id.is_some()
}

pub fn is_root_collection(collection: &Collection) -> bool {
    collection.id == CollectionId::Root
}

/// True iff the collection is neither personal nor archived.
///
/// Used to populate pickers that only offer regular collections.
pub fn non_personal_or_archived_collection(collection: &Collection) -> bool {
    !is_personal_collection(collection) && !collection.archived
}

pub fn is_item_pinned(item: &Item) -> bool {
    item.collection_position.is_some()
}

/// Personal collections owned by `user_id`, relabeled for display.
///
/// Each returned copy has its `name` replaced by the translated
/// "Your personal collection" label and keeps the previous name in
/// `original_name`. The input is left untouched.
pub fn current_user_personal_collections_with<T: Translator>(
    collections: &[Collection],
    user_id: i64,
    translator: &T,
) -> Vec<Collection> {
    let label = translator.translate(PERSONAL_COLLECTION_LABEL_KEY);

    collections
        .iter()
        .filter(|c| c.personal_owner_id == Some(user_id))
        .map(|c| {
            tracing::trace!(
                collection_id = %c.id,
                owner_id = user_id,
                "Relabeling personal collection"
            );
            Collection {
                name: label.clone(),
                original_name: Some(c.name.clone()),
                ..c.clone()
            }
        })
        .collect()
}

/// [`current_user_personal_collections_with`] using the built-in English label.
pub fn current_user_personal_collections(
    collections: &[Collection],
    user_id: i64,
) -> Vec<Collection> {
    current_user_personal_collections_with(collections, user_id, &EnglishCatalog)
}

/// Normalize a collection id coming from mixed representations.
///
/// - `"root"` or absent → `Ok(None)`; callers treat `None` as the root
///   collection, which the API persists with a null id.
/// - a number → itself.
/// - a string → its leading integer (`"5"` → 5, `"12abc"` → 12).
///
/// A string with no leading integer is not a valid id and yields
/// [`Error::InvalidCollectionId`].
pub fn canonical_collection_id(raw: Option<&RawCollectionId>) -> Result<Option<i64>> {
    match raw {
        None => Ok(None),
        Some(RawCollectionId::Number(id)) => Ok(Some(*id)),
        Some(RawCollectionId::Text(text)) if text == ROOT_COLLECTION_ID => Ok(None),
        Some(RawCollectionId::Text(text)) => parse_leading_integer(text)
            .map(Some)
            .ok_or_else(|| Error::InvalidCollectionId(text.clone())),
    }
}

/// Permissive base-10 parse: optional leading whitespace and sign, then as
/// many digits as are present. Trailing garbage is ignored.
fn parse_leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }

    let magnitude: i64 = unsigned[..digit_count].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::MessageCatalog;
    use crate::models::ContentModel;

    fn canonical(raw: impl Into<RawCollectionId>) -> Result<Option<i64>> {
        canonical_collection_id(Some(&raw.into()))
    }

    #[test]
    fn test_is_personal_collection() {
        assert!(is_personal_collection(&Collection::new(1, "Mine").owned_by(7)));
        assert!(!is_personal_collection(&Collection::new(2, "Shared")));
    }

    #[test]
    fn test_is_root_collection() {
        assert!(is_root_collection(&Collection::root("Our analytics")));
        assert!(!is_root_collection(&Collection::new(1, "Finance")));
    }

    #[test]
    fn test_non_personal_or_archived_collection() {
        assert!(non_personal_or_archived_collection(&Collection::new(1, "A")));
        assert!(!non_personal_or_archived_collection(
            &Collection::new(1, "A").owned_by(3)
        ));
        assert!(!non_personal_or_archived_collection(
            &Collection::new(1, "A").with_archived(true)
        ));
    }

    #[test]
    fn test_is_item_pinned() {
        let mut item = Item {
            id: 1,
            name: "Revenue".to_string(),
            description: None,
            model: ContentModel::from("card"),
            collection_position: None,
        };
        assert!(!is_item_pinned(&item));

        item.collection_position = Some(0);
        assert!(is_item_pinned(&item));
    }

    #[test]
    fn test_current_user_personal_collections_relabels_owned_only() {
        let a = Collection::new(1, "Ada's Personal Collection")
            .owned_by(7)
            .with_children(vec![Collection::new(3, "C")]);
        let b = Collection::new(2, "B");
        let other = Collection::new(4, "Bob's Personal Collection").owned_by(8);
        let input = vec![a.clone(), b, other];

        let result = current_user_personal_collections(&input, 7);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, CollectionId::Id(1));
        assert_eq!(result[0].name, "Your personal collection");
        assert_eq!(
            result[0].original_name.as_deref(),
            Some("Ada's Personal Collection")
        );
        assert_eq!(result[0].children, a.children);
        // input untouched
        assert_eq!(input[0], a);
    }

    #[test]
    fn test_current_user_personal_collections_uses_translator() {
        let catalog = MessageCatalog::new()
            .with_message(PERSONAL_COLLECTION_LABEL_KEY, "Votre collection personnelle");
        let input = vec![Collection::new(1, "Ada").owned_by(7)];

        let result = current_user_personal_collections_with(&input, 7, &catalog);
        assert_eq!(result[0].name, "Votre collection personnelle");
        assert_eq!(result[0].original_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_current_user_personal_collections_none_owned() {
        let input = vec![Collection::new(1, "A"), Collection::new(2, "B").owned_by(9)];
        assert!(current_user_personal_collections(&input, 7).is_empty());
    }

    #[test]
    fn test_canonical_collection_id_root_and_absent() {
        assert_eq!(canonical("root").unwrap(), None);
        assert_eq!(canonical_collection_id(None).unwrap(), None);
        assert_eq!(canonical(CollectionId::Root).unwrap(), None);
    }

    #[test]
    fn test_canonical_collection_id_numbers() {
        assert_eq!(canonical(5).unwrap(), Some(5));
        assert_eq!(canonical("5").unwrap(), Some(5));
        assert_eq!(canonical(CollectionId::Id(5)).unwrap(), Some(5));
    }

    #[test]
    fn test_canonical_collection_id_permissive_parse() {
        assert_eq!(canonical("  42").unwrap(), Some(42));
        assert_eq!(canonical("12abc").unwrap(), Some(12));
        assert_eq!(canonical("-3").unwrap(), Some(-3));
        assert_eq!(canonical("+8").unwrap(), Some(8));
    }

    #[test]
    fn test_canonical_collection_id_invalid() {
        assert!(matches!(
            canonical("abc"),
            Err(Error::InvalidCollectionId(s)) if s == "abc"
        ));
        assert!(canonical("").is_err());
        assert!(canonical("-").is_err());
        assert!(canonical("Root").is_err());
        assert!(canonical("99999999999999999999999").is_err());
    }
}
