//! Translation collaborator used when relabeling collections.
//!
//! Message keys are English source strings. The core never inspects a
//! translation; whatever the translator returns is used verbatim.

use std::collections::HashMap;

/// Looks up the display string for a message key.
pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Built-in catalog: every key translates to itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCatalog;

impl Translator for EnglishCatalog {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// In-memory catalog for a single locale. Missing keys fall back to the key.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, key: impl Into<String>, translation: impl Into<String>) -> Self {
        self.messages.insert(key.into(), translation.into());
        self
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translator for MessageCatalog {
    fn translate(&self, key: &str) -> String {
        match self.messages.get(key) {
            Some(translation) => translation.clone(),
            None => {
                tracing::trace!(key, "No translation, falling back to key");
                key.to_string()
            }
        }
    }
}
