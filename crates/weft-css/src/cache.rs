//! Merged declaration cache.
//!
//! Keyed by selector hash. Each entry also stores the canonical selector
//! text, and a hit only counts when that text matches, so two chains whose
//! hashes collide get separate entries instead of each other's styles.

use std::collections::HashMap;
use std::sync::Arc;

use crate::declaration::DeclarationBlock;
use crate::index::RuleRecord;
use crate::selector::Selector;

#[derive(Debug, Clone)]
struct CacheEntry {
    key: String,
    block: Arc<DeclarationBlock>,
}

/// Merged declaration blocks per concrete selector.
#[derive(Debug, Clone, Default)]
pub struct StyleCache {
    entries: HashMap<u32, Vec<CacheEntry>>,
    len: usize,
}

impl StyleCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached block for `selector`, if any.
    #[must_use]
    pub fn get(&self, selector: &Selector) -> Option<Arc<DeclarationBlock>> {
        let key = selector.to_string();
        self.entries
            .get(&selector.hash())?
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| Arc::clone(&entry.block))
    }

    /// Store `block` for `selector`, replacing any previous entry.
    pub fn insert(&mut self, selector: &Selector, block: Arc<DeclarationBlock>) {
        let key = selector.to_string();
        let bucket = self.entries.entry(selector.hash()).or_default();
        if let Some(entry) = bucket.iter_mut().find(|entry| entry.key == key) {
            entry.block = block;
        } else {
            bucket.push(CacheEntry { key, block });
            self.len += 1;
        }
    }

    /// Drop every entry.
    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.len = 0;
    }

    /// Number of cached selectors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing is cached.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Merge matched records, highest priority first, into one block.
///
/// The first present value for each property wins.
#[must_use]
pub fn merge_records<'a>(records: impl IntoIterator<Item = &'a RuleRecord>) -> DeclarationBlock {
    let mut merged = DeclarationBlock::new();
    for record in records {
        merged.merge(&record.block);
    }
    merged
}
