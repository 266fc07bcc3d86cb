// SPDX-License-Identifier: GPL-3.0-only

//! Read-only style catalog
//!
//! A style is a named visual transformation the user can pick on the idle
//! screen; each resolves to the positive prompt text sent to the generation
//! server. The catalog is external configuration, typically loaded from a
//! JSON file shipped with the kiosk.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque identifier of a selectable style
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleId(String);

impl StyleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StyleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for StyleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable mapping from style id to prompt text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleCatalog {
    styles: HashMap<StyleId, String>,
}

impl StyleCatalog {
    /// Build a catalog from (id, prompt) pairs
    pub fn from_entries<I, S, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
        P: Into<String>,
    {
        Self {
            styles: entries
                .into_iter()
                .map(|(id, prompt)| (StyleId::new(id), prompt.into()))
                .collect(),
        }
    }

    /// Parse a catalog from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve a style to its prompt text
    pub fn prompt(&self, id: &StyleId) -> Option<&str> {
        self.styles.get(id).map(String::as_str)
    }

    /// Whether the catalog knows the given style
    pub fn contains(&self, id: &StyleId) -> bool {
        self.styles.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
