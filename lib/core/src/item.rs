//! Records returned by an integration's load endpoint.
//!
//! The backend normalizes every integration's data into [`LoadedItem`]s.
//! Decoding is lenient. A field with an unexpected type is dropped (or
//! stringified, for scalars) instead of failing the whole response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// Fallback shown when an item has no name.
pub const UNNAMED_ITEM: &str = "Unnamed Item";

/// Fallback shown for any other missing display field.
pub const NOT_AVAILABLE: &str = "N/A";

/// A single record loaded from an integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadedItem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<String>,
    /// Name or path of the container the item lives in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_path_or_name: Option<String>,
    /// Link to the item in the integration's own UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl LoadedItem {
    /// Creates an item with only an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Builds an item from an arbitrary JSON value.
    ///
    /// Never fails. Non-objects yield an item with an empty id.
    #[must_use]
    pub fn from_value(value: &JsonValue) -> Self {
        let field = |key: &str| value.get(key).and_then(scalar_to_string);
        Self {
            id: field("id").unwrap_or_default(),
            name: field("name"),
            item_type: field("type"),
            creation_time: field("creation_time"),
            last_modified_time: field("last_modified_time"),
            parent_path_or_name: field("parent_path_or_name"),
            url: field("url"),
        }
    }

    /// Name to display, falling back to [`UNNAMED_ITEM`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or(UNNAMED_ITEM)
    }

    /// Type to display, falling back to [`NOT_AVAILABLE`].
    #[must_use]
    pub fn display_type(&self) -> &str {
        non_empty(self.item_type.as_deref()).unwrap_or(NOT_AVAILABLE)
    }

    /// Creation time to display, falling back to [`NOT_AVAILABLE`].
    #[must_use]
    pub fn display_created(&self) -> &str {
        non_empty(self.creation_time.as_deref()).unwrap_or(NOT_AVAILABLE)
    }

    /// Last-modified time to display, falling back to [`NOT_AVAILABLE`].
    #[must_use]
    pub fn display_updated(&self) -> &str {
        non_empty(self.last_modified_time.as_deref()).unwrap_or(NOT_AVAILABLE)
    }

    /// Source container, if the backend reported one.
    #[must_use]
    pub fn display_source(&self) -> Option<&str> {
        non_empty(self.parent_path_or_name.as_deref())
    }

    /// Link to the item, if the backend reported one.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        non_empty(self.url.as_deref())
    }
}

impl<'de> Deserialize<'de> for LoadedItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = JsonValue::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Summary line shown above the card grid.
///
/// Singular only for exactly one item.
#[must_use]
pub fn load_summary(count: usize, source: &str) -> String {
    let noun = if count == 1 { "item" } else { "items" };
    format!("Loaded {count} {noun} from {source}")
}

fn scalar_to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
