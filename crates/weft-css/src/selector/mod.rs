//! Selector parsing, naming, and matching.
//!
//! A [`Selector`] is a chain of [`SelectorNode`]s, outermost ancestor first
//! and the subject last. Nodes are joined by whitespace (descendant
//! relationship); each node is an optional type followed by any number of
//! `#id`, `.class` and `:pseudo-class` components, for example
//! `body div#main.box.active:hover`.
//!
//! Classes and pseudo-classes are kept sorted, so a node's
//! [full name](SelectorNode::full_name) and a selector's hash do not depend
//! on the order components were written in.

mod names;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use weft_common::warning::warn_once;

use crate::error::{Result, StyleError};

pub use names::{MAX_VARIANT_COMPONENTS, name_variants};

/// Maximum number of nodes in one selector.
pub const MAX_SELECTOR_DEPTH: usize = 32;

/// Maximum length of selector text, in bytes.
pub const MAX_SELECTOR_LEN: usize = 1024;

/// Specificity contributed by an `#id`.
pub const ID_RANK: u32 = 100;
/// Specificity contributed by each `.class`.
pub const CLASS_RANK: u32 = 10;
/// Specificity contributed by each `:pseudo-class`.
pub const PSEUDO_CLASS_RANK: u32 = 10;
/// Specificity contributed by a type name other than `*`.
pub const TYPE_RANK: u32 = 1;

/// The universal type name.
pub const UNIVERSAL: &str = "*";

/// Initial value of the selector hash.
const HASH_SEED: u32 = 5381;

/// Source of creation batch numbers; later selectors get larger numbers.
static NEXT_BATCH: AtomicU64 = AtomicU64::new(1);

fn next_batch() -> u64 {
    NEXT_BATCH.fetch_add(1, Ordering::Relaxed)
}

/// Fold `text` into a djb2 hash (`hash * 33 + byte`).
fn hash_str(hash: u32, text: &str) -> u32 {
    text.bytes().fold(hash, |hash, byte| {
        (hash << 5).wrapping_add(hash).wrapping_add(u32::from(byte))
    })
}

/// One element pattern: type, id, classes, and pseudo-classes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SelectorNode {
    type_name: Option<String>,
    id: Option<String>,
    classes: BTreeSet<String>,
    pseudo_classes: BTreeSet<String>,
    full_name: String,
    specificity: u32,
}

impl SelectorNode {
    /// An empty node. Add components with the `with_*` builders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the type name (`*` matches any type).
    #[must_use]
    pub fn with_type(mut self, type_name: &str) -> Self {
        self.set_type(type_name);
        self
    }

    /// Set the id. A node keeps only its first id.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        let _ = self.set_id(id);
        self
    }

    /// Add a class.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Add a pseudo-class (an interaction state such as `hover`).
    #[must_use]
    pub fn with_pseudo_class(mut self, pseudo_class: &str) -> Self {
        self.add_pseudo_class(pseudo_class);
        self
    }

    fn set_type(&mut self, type_name: &str) {
        self.type_name = Some(type_name.to_owned());
        self.update();
    }

    /// Set the id unless one is already present. Returns whether it was set.
    fn set_id(&mut self, id: &str) -> bool {
        if self.id.is_some() {
            return false;
        }
        self.id = Some(id.to_owned());
        self.update();
        true
    }

    fn add_class(&mut self, class: &str) {
        let _ = self.classes.insert(class.to_owned());
        self.update();
    }

    fn add_pseudo_class(&mut self, pseudo_class: &str) {
        let _ = self.pseudo_classes.insert(pseudo_class.to_owned());
        self.update();
    }

    /// Recompute the derived fields after a component changed.
    fn update(&mut self) {
        // `*` only means something on a node with nothing else to match.
        let has_other =
            self.id.is_some() || !self.classes.is_empty() || !self.pseudo_classes.is_empty();
        if has_other && self.type_name.as_deref() == Some(UNIVERSAL) {
            self.type_name = None;
        }

        let mut specificity = 0;
        let mut full_name = String::new();
        if let Some(type_name) = &self.type_name {
            if type_name != UNIVERSAL {
                specificity += TYPE_RANK;
            }
            full_name.push_str(type_name);
        }
        if let Some(id) = &self.id {
            specificity += ID_RANK;
            full_name.push('#');
            full_name.push_str(id);
        }
        for class in &self.classes {
            specificity += CLASS_RANK;
            full_name.push('.');
            full_name.push_str(class);
        }
        for pseudo_class in &self.pseudo_classes {
            specificity += PSEUDO_CLASS_RANK;
            full_name.push(':');
            full_name.push_str(pseudo_class);
        }
        self.full_name = full_name;
        self.specificity = specificity;
    }

    /// The type name, if any.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// The id, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Classes, sorted.
    #[must_use]
    pub const fn classes(&self) -> &BTreeSet<String> {
        &self.classes
    }

    /// Pseudo-classes, sorted.
    #[must_use]
    pub const fn pseudo_classes(&self) -> &BTreeSet<String> {
        &self.pseudo_classes
    }

    /// Canonical name: type, `#id`, sorted `.class`es, sorted `:pseudo`s.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Specificity of this node alone.
    #[must_use]
    pub const fn specificity(&self) -> u32 {
        self.specificity
    }

    /// Whether the node has no components at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_empty()
    }

    /// Whether this node (a concrete element description) satisfies `pattern`.
    ///
    /// Every component present in `pattern` must be present here; components
    /// the pattern leaves out match anything, and a `*` type matches any type.
    #[must_use]
    pub fn matches(&self, pattern: &Self) -> bool {
        if pattern.id.as_ref().is_some_and(|id| self.id.as_ref() != Some(id)) {
            return false;
        }
        if pattern
            .type_name
            .as_ref()
            .is_some_and(|name| name != UNIVERSAL && self.type_name.as_ref() != Some(name))
        {
            return false;
        }
        pattern.classes.is_subset(&self.classes)
            && pattern.pseudo_classes.is_subset(&self.pseudo_classes)
    }
}

impl fmt::Display for SelectorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

/// A chain of nodes, outermost ancestor first.
///
/// Cloning a selector deep-copies its nodes and keeps its batch number, so a
/// copy retained by the rule index orders exactly like the original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selector {
    nodes: Vec<SelectorNode>,
    specificity: u32,
    hash: u32,
    batch: u64,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

impl Selector {
    /// An empty selector with a fresh batch number.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            specificity: 0,
            hash: HASH_SEED,
            batch: next_batch(),
        }
    }

    /// Parse selector text such as `body .panel button.primary:hover`.
    ///
    /// A node with an empty component (`a..b`, a trailing `.`) is dropped
    /// with a diagnostic and parsing continues with the next node.
    ///
    /// # Errors
    ///
    /// - [`StyleError::Syntax`] on a character outside the grammar
    /// - [`StyleError::LimitExceeded`] if the text is longer than
    ///   [`MAX_SELECTOR_LEN`] or has more than [`MAX_SELECTOR_DEPTH`] nodes
    pub fn parse(text: &str) -> Result<Self> {
        if text.len() > MAX_SELECTOR_LEN {
            return Err(StyleError::LimitExceeded {
                what: "selector length",
                limit: MAX_SELECTOR_LEN,
            });
        }
        if let Some((offset, ch)) = text
            .char_indices()
            .find(|&(_, ch)| !is_selector_char(ch))
        {
            return Err(StyleError::Syntax {
                selector: text.to_owned(),
                offset,
                ch,
            });
        }

        let mut selector = Self::new();
        for word in text.split_ascii_whitespace() {
            match parse_node(text, word) {
                Some(node) => selector.push(node)?,
                None => warn_once("CSS", &format!("{text}: invalid selector node `{word}`")),
            }
        }
        Ok(selector)
    }

    /// Append a node as the new subject.
    ///
    /// Empty nodes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::LimitExceeded`] if the selector already holds
    /// [`MAX_SELECTOR_DEPTH`] nodes.
    pub fn push(&mut self, node: SelectorNode) -> Result<()> {
        if node.is_empty() {
            return Ok(());
        }
        if self.nodes.len() >= MAX_SELECTOR_DEPTH {
            warn_once(
                "CSS",
                &format!("the number of nodes in the selector has exceeded the {MAX_SELECTOR_DEPTH} limit"),
            );
            return Err(StyleError::LimitExceeded {
                what: "selector depth",
                limit: MAX_SELECTOR_DEPTH,
            });
        }
        self.specificity += node.specificity;
        self.hash = hash_str(self.hash, &node.full_name);
        self.nodes.push(node);
        Ok(())
    }

    /// Nodes, outermost ancestor first.
    #[must_use]
    pub fn nodes(&self) -> &[SelectorNode] {
        &self.nodes
    }

    /// The rightmost node (the element the selector applies to).
    #[must_use]
    pub fn subject(&self) -> Option<&SelectorNode> {
        self.nodes.last()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the selector has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sum of the node specificities.
    #[must_use]
    pub const fn specificity(&self) -> u32 {
        self.specificity
    }

    /// djb2 hash over the node full names, in order.
    #[must_use]
    pub const fn hash(&self) -> u32 {
        self.hash
    }

    /// Creation batch number; larger means created later.
    #[must_use]
    pub const fn batch(&self) -> u64 {
        self.batch
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&node.full_name)?;
        }
        Ok(())
    }
}

/// Characters allowed in component names.
const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Characters that start a component.
const fn is_sigil(c: char) -> bool {
    matches!(c, '#' | '.' | ':')
}

const fn is_selector_char(c: char) -> bool {
    is_name_char(c) || is_sigil(c) || c == '*' || matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Parse one whitespace-free node such as `div#main.box:hover`.
///
/// Returns `None` if any component is empty or misplaces `*`.
fn parse_node(text: &str, word: &str) -> Option<SelectorNode> {
    /// Store the pending component. `None` means the node is malformed.
    fn flush(node: &mut SelectorNode, sigil: Option<char>, name: &str, text: &str) -> Option<()> {
        if name.is_empty() {
            // Only the leading type may be omitted.
            return if sigil.is_none() { Some(()) } else { None };
        }
        if name.contains('*') && (sigil.is_some() || name != UNIVERSAL) {
            return None;
        }
        match sigil {
            None => node.set_type(name),
            Some('#') => {
                if !node.set_id(name) {
                    warn_once("CSS", &format!("{text}: extra id `#{name}` ignored"));
                }
            }
            Some('.') => node.add_class(name),
            _ => node.add_pseudo_class(name),
        }
        Some(())
    }

    let mut node = SelectorNode::new();
    let mut sigil = None;
    let mut name = String::new();
    for c in word.chars() {
        if is_sigil(c) {
            flush(&mut node, sigil, &name, text)?;
            name.clear();
            sigil = Some(c);
        } else {
            name.push(c);
        }
    }
    flush(&mut node, sigil, &name, text)?;
    (!node.is_empty()).then_some(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_node_components() {
        let node = parse_node("", "div#main.b.a:hover").unwrap();
        assert_eq!(node.type_name(), Some("div"));
        assert_eq!(node.id(), Some("main"));
        assert_eq!(node.full_name(), "div#main.a.b:hover");
    }

    #[test]
    fn test_parse_node_rejects_empty_component() {
        assert!(parse_node("", "a..b").is_none());
        assert!(parse_node("", ".").is_none());
        assert!(parse_node("", "a:").is_none());
    }

    #[test]
    fn test_parse_node_rejects_misplaced_star() {
        assert!(parse_node("", ".a*").is_none());
        assert!(parse_node("", "d*v").is_none());
    }

    #[test]
    fn test_hash_str_matches_djb2() {
        // djb2("a") = 5381 * 33 + 97
        assert_eq!(hash_str(HASH_SEED, "a"), 177_670);
    }
}
