//! Property registry.
//!
//! Maps property keys to names, families, and initial values, and keyword
//! ids to names. A registry is seeded with the built-in tables and can be
//! extended at runtime; new names always receive the next free key.

mod builtin;
mod family;

use std::collections::HashMap;

use serde::Serialize;
use strum::{EnumCount, IntoEnumIterator};

use crate::error::{Result, StyleError};
use crate::values::StyleValue;

pub use builtin::{Keyword, Property};
pub use family::PropertyFamily;

/// Index of a property in a registry and in every computed style record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PropertyKey(pub usize);

impl From<Property> for PropertyKey {
    fn from(property: Property) -> Self {
        property.key()
    }
}

/// Index of a keyword in a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct KeywordId(pub u32);

impl From<Keyword> for KeywordId {
    fn from(keyword: Keyword) -> Self {
        keyword.id()
    }
}

/// Everything the engine knows about one property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    /// The property's key.
    pub key: PropertyKey,
    /// The stylesheet name.
    pub name: String,
    /// Which values it accepts.
    pub family: PropertyFamily,
    /// The value used when no declaration sets it.
    pub initial: StyleValue,
}

/// Property and keyword tables.
#[derive(Debug, Clone)]
pub struct PropertyRegistry {
    properties: Vec<PropertyDef>,
    property_keys: HashMap<String, PropertyKey>,
    keywords: Vec<String>,
    keyword_ids: HashMap<String, KeywordId>,
}

impl Default for PropertyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyRegistry {
    /// Number of properties every registry starts with.
    pub const BUILTIN_PROPERTY_COUNT: usize = Property::COUNT;
    /// Number of keywords every registry starts with.
    pub const BUILTIN_KEYWORD_COUNT: usize = Keyword::COUNT;

    /// A registry holding the built-in properties and keywords.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            properties: Vec::with_capacity(Property::COUNT),
            property_keys: HashMap::with_capacity(Property::COUNT),
            keywords: Vec::with_capacity(Keyword::COUNT),
            keyword_ids: HashMap::with_capacity(Keyword::COUNT),
        };
        for property in Property::iter() {
            let (family, initial) = property.definition();
            let _ = registry
                .property_keys
                .insert(property.name().to_owned(), property.key());
            registry.properties.push(PropertyDef {
                key: property.key(),
                name: property.name().to_owned(),
                family,
                initial,
            });
        }
        for keyword in Keyword::iter() {
            let _ = registry
                .keyword_ids
                .insert(keyword.name().to_owned(), keyword.id());
            registry.keywords.push(keyword.name().to_owned());
        }
        registry
    }

    /// Register a property with its value domain and initial value.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::DuplicateName`] if the name is already taken.
    pub fn register_property(
        &mut self,
        name: &str,
        family: PropertyFamily,
        initial: StyleValue,
    ) -> Result<PropertyKey> {
        if self.property_keys.contains_key(name) {
            return Err(StyleError::DuplicateName {
                name: name.to_owned(),
            });
        }
        let key = PropertyKey(self.properties.len());
        let _ = self.property_keys.insert(name.to_owned(), key);
        self.properties.push(PropertyDef {
            key,
            name: name.to_owned(),
            family,
            initial,
        });
        Ok(key)
    }

    /// Register a property name that accepts any value and has no initial value.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::DuplicateName`] if the name is already taken.
    pub fn add_property_name(&mut self, name: &str) -> Result<PropertyKey> {
        self.register_property(name, PropertyFamily::Any, StyleValue::Absent)
    }

    /// Register a keyword name.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::DuplicateName`] if the keyword exists, or
    /// [`StyleError::LimitExceeded`] once the id space is exhausted.
    pub fn add_keyword_name(&mut self, name: &str) -> Result<KeywordId> {
        if self.keyword_ids.contains_key(name) {
            return Err(StyleError::DuplicateName {
                name: name.to_owned(),
            });
        }
        let id = u32::try_from(self.keywords.len())
            .map(KeywordId)
            .map_err(|_| StyleError::LimitExceeded {
                what: "keyword count",
                limit: u32::MAX as usize,
            })?;
        let _ = self.keyword_ids.insert(name.to_owned(), id);
        self.keywords.push(name.to_owned());
        Ok(id)
    }

    /// Name of a property key.
    #[must_use]
    pub fn property_name(&self, key: PropertyKey) -> Option<&str> {
        self.properties.get(key.0).map(|def| def.name.as_str())
    }

    /// Key of a property name.
    #[must_use]
    pub fn property_key(&self, name: &str) -> Option<PropertyKey> {
        self.property_keys.get(name).copied()
    }

    /// Full definition of a property key.
    #[must_use]
    pub fn property_def(&self, key: PropertyKey) -> Option<&PropertyDef> {
        self.properties.get(key.0)
    }

    /// All definitions in key order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDef> {
        self.properties.iter()
    }

    /// Name of a keyword id.
    #[must_use]
    pub fn keyword_name(&self, id: KeywordId) -> Option<&str> {
        self.keywords.get(id.0 as usize).map(String::as_str)
    }

    /// Id of a keyword name.
    #[must_use]
    pub fn keyword_id(&self, name: &str) -> Option<KeywordId> {
        self.keyword_ids.get(name).copied()
    }

    /// Total number of registered properties (built-in and runtime).
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Total number of registered keywords.
    #[must_use]
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}
