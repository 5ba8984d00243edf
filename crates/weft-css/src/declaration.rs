//! Declaration blocks: what a rule says.

use serde::Serialize;

use crate::registry::{PropertyKey, PropertyRegistry};
use crate::values::StyleValue;

/// One `property: value` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    /// The property being declared.
    pub key: PropertyKey,
    /// The declared value.
    pub value: StyleValue,
}

/// An ordered set of declarations with at most one entry per property.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DeclarationBlock {
    declarations: Vec<Declaration>,
}

impl DeclarationBlock {
    /// An empty block.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Append a declaration unless the property is already declared.
    ///
    /// Returns whether the declaration was stored; the first insert wins.
    pub fn add(&mut self, key: impl Into<PropertyKey>, value: StyleValue) -> bool {
        let key = key.into();
        if self.get(key).is_some() {
            return false;
        }
        self.declarations.push(Declaration { key, value });
        true
    }

    /// Builder form of [`add`](Self::add).
    #[must_use]
    pub fn with(mut self, key: impl Into<PropertyKey>, value: StyleValue) -> Self {
        let _ = self.add(key, value);
        self
    }

    /// Replace the value of a declared property, or append it.
    pub fn set(&mut self, key: impl Into<PropertyKey>, value: StyleValue) {
        let key = key.into();
        match self.declarations.iter_mut().find(|decl| decl.key == key) {
            Some(decl) => decl.value = value,
            None => self.declarations.push(Declaration { key, value }),
        }
    }

    /// Remove a declaration, returning its value.
    pub fn remove(&mut self, key: impl Into<PropertyKey>) -> Option<StyleValue> {
        let key = key.into();
        let index = self.declarations.iter().position(|decl| decl.key == key)?;
        Some(self.declarations.remove(index).value)
    }

    /// The declared value of a property.
    #[must_use]
    pub fn get(&self, key: impl Into<PropertyKey>) -> Option<&StyleValue> {
        let key = key.into();
        self.declarations
            .iter()
            .find(|decl| decl.key == key)
            .map(|decl| &decl.value)
    }

    /// Declarations in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the block is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Copy in every declaration of `other` whose property this block does
    /// not declare yet. Absent values are skipped.
    pub fn merge(&mut self, other: &Self) {
        for decl in &other.declarations {
            if !decl.value.is_absent() {
                let _ = self.add(decl.key, decl.value.clone());
            }
        }
    }

    /// Render as stylesheet text, one declaration per line.
    #[must_use]
    pub fn describe(&self, registry: &PropertyRegistry) -> String {
        let mut out = String::from("{\n");
        for decl in self.declarations.iter().filter(|decl| !decl.value.is_absent()) {
            out.push('\t');
            match registry.property_name(decl.key) {
                Some(name) => out.push_str(name),
                None => out.push_str(&format!("<unknown property {}>", decl.key.0)),
            }
            out.push_str(": ");
            out.push_str(&decl.value.describe(registry));
            out.push_str(";\n");
        }
        out.push('}');
        out
    }
}

impl<'a> IntoIterator for &'a DeclarationBlock {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}

impl<K: Into<PropertyKey>> FromIterator<(K, StyleValue)> for DeclarationBlock {
    fn from_iter<I: IntoIterator<Item = (K, StyleValue)>>(iter: I) -> Self {
        let mut block = Self::new();
        for (key, value) in iter {
            let _ = block.add(key, value);
        }
        block
    }
}
