//! Person records stored in the registry.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// Stable, opaque identity of a person.
///
/// Relationships refer to people only through this id; records are resolved
/// through the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Creates an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for PersonId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PersonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A family member.
///
/// # Example
///
/// ```rust
/// use kinship_core::Person;
/// use serde_json::json;
///
/// let person = Person::new("p-1", "Ada Lovelace")
///     .with_media("portraits/ada.jpg")
///     .with_metadata_entry("born", json!(1815));
///
/// assert_eq!(person.id().as_str(), "p-1");
/// assert_eq!(person.name(), "Ada Lovelace");
/// assert_eq!(person.metadata_entry("born"), Some(&json!(1815)));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    id: PersonId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    media: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, Value>,
}

impl Person {
    /// Creates a person with the given id and display name.
    #[must_use]
    pub fn new(id: impl Into<PersonId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            media: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Attaches a media reference (builder pattern).
    #[must_use]
    pub fn with_media(mut self, media: &str) -> Self {
        self.media = Some(media.to_string());
        self
    }

    /// Adds one metadata entry (builder pattern).
    #[must_use]
    pub fn with_metadata_entry(mut self, key: &str, value: Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    /// Returns the person id.
    #[must_use]
    pub fn id(&self) -> &PersonId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the media reference, if any.
    #[must_use]
    pub fn media(&self) -> Option<&str> {
        self.media.as_deref()
    }

    /// Returns the metadata bag.
    #[must_use]
    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    /// Returns one metadata value, if present.
    #[must_use]
    pub fn metadata_entry(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Sets the display name.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Sets or clears the media reference.
    pub fn set_media(&mut self, media: Option<&str>) {
        self.media = media.map(str::to_string);
    }

    /// Sets a metadata value.
    pub fn set_metadata_entry(&mut self, key: &str, value: Value) {
        self.metadata.insert(key.to_string(), value);
    }

    /// Removes a metadata value, returning it if present.
    pub fn remove_metadata_entry(&mut self, key: &str) -> Option<Value> {
        self.metadata.remove(key)
    }
}
