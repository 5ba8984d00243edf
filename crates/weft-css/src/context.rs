//! The style context: registry, rule index and cache behind one API.
//!
//! A [`StyleContext`] is created once per document or application, filled
//! with rules by the stylesheet loader, and then queried from any number of
//! threads. Inserting a rule and invalidating the cache happen under the rule
//! index write lock, so a reader never sees a half-linked index or a cache
//! entry computed from rules that have since changed.
//!
//! Locks are always taken in the order registry, rules, cache.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cache::{StyleCache, merge_records};
use crate::cascade::{apply_inheritance, cascade_style};
use crate::computed::ComputedStyle;
use crate::declaration::DeclarationBlock;
use crate::error::Result;
use crate::index::{RuleIndex, RuleRecord};
use crate::metrics::DeviceMetrics;
use crate::registry::{KeywordId, PropertyFamily, PropertyKey, PropertyRegistry};
use crate::resolver::compute_absolute_values;
use crate::selector::Selector;
use crate::values::StyleValue;

/// Shared style state.
#[derive(Debug, Default)]
pub struct StyleContext {
    registry: RwLock<PropertyRegistry>,
    rules: RwLock<RuleIndex>,
    cache: Mutex<StyleCache>,
}

impl StyleContext {
    /// A context with the built-in properties and no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the property registry.
    pub fn registry(&self) -> RwLockReadGuard<'_, PropertyRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the property registry.
    pub fn registry_mut(&self) -> RwLockWriteGuard<'_, PropertyRegistry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn rules(&self) -> RwLockReadGuard<'_, RuleIndex> {
        self.rules.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn rules_mut(&self) -> RwLockWriteGuard<'_, RuleIndex> {
        self.rules.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn cache(&self) -> MutexGuard<'_, StyleCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a property accepting any value, with no initial value.
    ///
    /// # Errors
    ///
    /// See [`PropertyRegistry::add_property_name`].
    pub fn add_property_name(&self, name: &str) -> Result<PropertyKey> {
        self.registry_mut().add_property_name(name)
    }

    /// Register a property with its family and initial value.
    ///
    /// # Errors
    ///
    /// See [`PropertyRegistry::register_property`].
    pub fn register_property(
        &self,
        name: &str,
        family: PropertyFamily,
        initial: StyleValue,
    ) -> Result<PropertyKey> {
        self.registry_mut().register_property(name, family, initial)
    }

    /// Register a keyword name.
    ///
    /// # Errors
    ///
    /// See [`PropertyRegistry::add_keyword_name`].
    pub fn add_keyword_name(&self, name: &str) -> Result<KeywordId> {
        self.registry_mut().add_keyword_name(name)
    }

    /// Number of registered properties.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.registry().property_count()
    }

    /// Add a rule and invalidate the cache.
    ///
    /// Returns `false` for an empty selector.
    pub fn insert(
        &self,
        selector: &Selector,
        block: &DeclarationBlock,
        namespace: Option<&str>,
    ) -> bool {
        let mut rules = self.rules_mut();
        let inserted = rules.insert(selector, block, namespace);
        self.cache().invalidate();
        inserted
    }

    /// Every rule matching `selector`, highest priority first.
    #[must_use]
    pub fn query(&self, selector: &Selector) -> Vec<RuleRecord> {
        self.rules().query(selector).into_iter().cloned().collect()
    }

    /// The merged declarations for `selector`, from the cache when possible.
    #[must_use]
    pub fn get(&self, selector: &Selector) -> Arc<DeclarationBlock> {
        let rules = self.rules();
        if let Some(block) = self.cache().get(selector) {
            return block;
        }
        let block = Arc::new(merge_records(rules.query(selector)));
        let mut cache = self.cache();
        if let Some(cached) = cache.get(selector) {
            return cached;
        }
        cache.insert(selector, Arc::clone(&block));
        block
    }

    /// Drop every cached block.
    pub fn invalidate(&self) {
        let _rules = self.rules_mut();
        self.cache().invalidate();
    }

    /// Number of cached selectors.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache().len()
    }

    /// Number of rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules().rule_count()
    }

    /// Text dump of every rule with its namespace and specificity.
    #[must_use]
    pub fn describe_rules(&self) -> String {
        let registry = self.registry();
        self.rules().describe(&registry)
    }

    /// Cascade, inherit and resolve the style of the node `selector` ends in.
    ///
    /// `parent` must be the resolved style of the node's parent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::StyleError::AllocationFailure`] if the computed
    /// record cannot be allocated.
    pub fn compute_style(
        &self,
        selector: &Selector,
        parent: Option<&ComputedStyle>,
        metrics: &DeviceMetrics,
    ) -> Result<ComputedStyle> {
        let block = self.get(selector);
        let registry = self.registry();
        let mut style = ComputedStyle::new();
        cascade_style(&registry, &block, &mut style)?;
        apply_inheritance(&registry, parent, &mut style);
        compute_absolute_values(parent, &mut style, metrics)?;
        Ok(style)
    }

    /// Drop every rule and cached block. Registered properties stay.
    pub fn clear(&self) {
        let mut rules = self.rules_mut();
        rules.clear();
        self.cache().invalidate();
    }

    /// Tear the context down.
    pub fn shutdown(self) {
        self.clear();
    }
}
