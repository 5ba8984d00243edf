//! Style resolution for the weft UI toolkit.
//!
//! # Scope
//!
//! This crate implements:
//! - **Selectors**
//!   - Compound nodes of type, id, classes and pseudo-classes
//!   - Descendant chains up to a fixed depth
//!   - Specificity, canonical names and content hashes
//!
//! - **Property registry**
//!   - Built-in properties and keywords, extensible at runtime
//!   - Per-property value families and initial values
//!
//! - **Rule index**
//!   - Reverse index keyed by each rule's rightmost node
//!   - Ancestor-chain matching with specificity and source-order ranking
//!   - A merged-declaration cache invalidated on every insertion
//!
//! - **Cascade and computed values**
//!   - First-write-wins cascade with initial values and inheritance
//!   - Device unit conversion, percentage and auto size resolution
//!   - Box model accessors for layout
//!
//! # Not Yet Implemented
//!
//! - Child, sibling and attribute selectors
//! - Stylesheet text parsing (hosts supply declarations already typed)
//!
//! # Example
//!
//! ```
//! use weft_css::{DeclarationBlock, DeviceMetrics, Property, Selector, StyleContext, StyleValue};
//!
//! let context = StyleContext::new();
//! let rule = Selector::parse("div.box").unwrap();
//! let block = DeclarationBlock::new().with(Property::Width, StyleValue::percent(50.0));
//! context.insert(&rule, &block, Some("app"));
//!
//! let metrics = DeviceMetrics::default();
//! let root = Selector::parse("div").unwrap();
//! let mut parent = context.compute_style(&root, None, &metrics).unwrap();
//! parent.set(Property::Width, StyleValue::px(200.0));
//!
//! let node = Selector::parse("div div.box.wide").unwrap();
//! let style = context.compute_style(&node, Some(&parent), &metrics).unwrap();
//! assert_eq!(style.px(Property::Width), Some(100.0));
//! ```

/// Merged declaration cache keyed by selector.
pub mod cache;
/// First-write-wins cascade, initial values and inheritance.
pub mod cascade;
/// Computed style records and layout-facing accessors.
pub mod computed;
/// Shared registry, rule index and cache with a single-writer lock discipline.
pub mod context;
/// Declaration blocks.
pub mod declaration;
/// Error types.
pub mod error;
/// Reverse rule index and ancestor-chain matching.
pub mod index;
/// Device metrics for unit conversion.
pub mod metrics;
/// Property and keyword registry.
pub mod registry;
/// Unit and percentage resolution.
pub mod resolver;
/// Selector parsing, specificity and matching.
pub mod selector;
/// Style values.
pub mod values;

pub use cache::StyleCache;
pub use computed::{ComputedStyle, MAX_PROPERTY_COUNT, Origin, Slot};
pub use context::StyleContext;
pub use declaration::{Declaration, DeclarationBlock};
pub use error::{Result, StyleError};
pub use index::{RuleIndex, RuleRecord};
pub use metrics::{DensityLevel, DeviceMetrics};
pub use registry::{Keyword, KeywordId, Property, PropertyFamily, PropertyKey, PropertyRegistry};
pub use selector::{Selector, SelectorNode};
pub use values::{Color, StyleValue, Unit};
