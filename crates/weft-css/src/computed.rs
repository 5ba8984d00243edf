//! Computed style records.
//!
//! A [`ComputedStyle`] holds one [`Slot`] per registered property, indexed by
//! [`PropertyKey`]. Slots start out [`Origin::Unset`]; the cascade marks the
//! ones it writes from declarations as [`Origin::Declared`] and fills the rest
//! with initial values.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, StyleError};
use crate::registry::{Keyword, Property as P, PropertyKey, PropertyRegistry};
use crate::values::{StyleValue, Unit};

/// Upper bound on the number of slots a record may hold.
pub const MAX_PROPERTY_COUNT: usize = 65_536;

/// How a slot got its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Origin {
    /// Never written.
    #[default]
    Unset,
    /// Written from a declaration (or explicitly via [`ComputedStyle::set`]).
    Declared,
    /// Filled with the property's initial value.
    Initial,
}

/// One property's value in a computed style.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Slot {
    /// How the value got here.
    pub origin: Origin,
    /// The value.
    pub value: StyleValue,
}

static ABSENT: StyleValue = StyleValue::Absent;

/// The fully cascaded and resolved style of one element.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ComputedStyle {
    slots: Vec<Slot>,
}

impl ComputedStyle {
    /// An empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// A record with `count` unset slots.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::AllocationFailure`] if the slots cannot be allocated.
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds [`MAX_PROPERTY_COUNT`].
    pub fn with_capacity(count: usize) -> Result<Self> {
        let mut style = Self::new();
        style.grow(count)?;
        Ok(style)
    }

    /// Make room for at least `count` slots. Never shrinks.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::AllocationFailure`] if the slots cannot be allocated.
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds [`MAX_PROPERTY_COUNT`].
    pub fn grow(&mut self, count: usize) -> Result<()> {
        assert!(
            count <= MAX_PROPERTY_COUNT,
            "computed style cannot hold {count} properties"
        );
        if count <= self.slots.len() {
            return Ok(());
        }
        self.slots
            .try_reserve(count - self.slots.len())
            .map_err(|_| StyleError::AllocationFailure { requested: count })?;
        self.slots.resize_with(count, Slot::default);
        Ok(())
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the record has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slot for `key`, if the record is large enough.
    #[must_use]
    pub fn slot(&self, key: impl Into<PropertyKey>) -> Option<&Slot> {
        self.slots.get(key.into().0)
    }

    /// The value for `key`; [`StyleValue::Absent`] when out of range.
    #[must_use]
    pub fn get(&self, key: impl Into<PropertyKey>) -> &StyleValue {
        self.slot(key).map_or(&ABSENT, |slot| &slot.value)
    }

    /// Whether `key` was written from a declaration.
    #[must_use]
    pub fn is_set(&self, key: impl Into<PropertyKey>) -> bool {
        self.slot(key).is_some_and(|slot| slot.origin == Origin::Declared)
    }

    /// Write `value` and mark it declared. Out-of-range keys are ignored.
    pub fn set(&mut self, key: impl Into<PropertyKey>, value: StyleValue) {
        self.write(key.into(), Origin::Declared, value);
    }

    pub(crate) fn write(&mut self, key: PropertyKey, origin: Origin, value: StyleValue) {
        if let Some(slot) = self.slots.get_mut(key.0) {
            *slot = Slot { origin, value };
        }
    }

    /// Replace a slot's value, keeping its origin.
    pub(crate) fn update(&mut self, key: impl Into<PropertyKey>, value: StyleValue) {
        if let Some(slot) = self.slots.get_mut(key.into().0) {
            slot.value = value;
        }
    }

    /// Iterate over `(key, slot)` pairs.
    pub fn slots(&self) -> impl Iterator<Item = (PropertyKey, &Slot)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (PropertyKey(index), slot))
    }

    /// Present values keyed by property name, for debugging and snapshots.
    #[must_use]
    pub fn to_named_map(&self, registry: &PropertyRegistry) -> BTreeMap<String, StyleValue> {
        self.slots()
            .filter(|(_, slot)| !slot.value.is_absent())
            .filter_map(|(key, slot)| {
                registry
                    .property_name(key)
                    .map(|name| (name.to_owned(), slot.value.clone()))
            })
            .collect()
    }

    // Typed accessors

    /// The built-in keyword held by `key`, if any.
    #[must_use]
    pub fn keyword(&self, key: impl Into<PropertyKey>) -> Option<Keyword> {
        self.get(key).as_keyword().and_then(Keyword::from_id)
    }

    /// The magnitude and unit of a length slot.
    #[must_use]
    pub fn length(&self, key: impl Into<PropertyKey>) -> Option<(f32, Unit)> {
        self.get(key).as_length()
    }

    /// The pixel value of a length slot.
    #[must_use]
    pub fn px(&self, key: impl Into<PropertyKey>) -> Option<f32> {
        self.get(key).as_px()
    }

    /// Whether `key` holds a pixel length.
    #[must_use]
    pub fn is_fixed_length(&self, key: impl Into<PropertyKey>) -> bool {
        self.px(key).is_some()
    }

    /// Whether `key` holds a percentage.
    #[must_use]
    pub fn is_percentage(&self, key: impl Into<PropertyKey>) -> bool {
        matches!(self.length(key), Some((_, Unit::Percent)))
    }

    /// Whether `key` holds the `auto` keyword.
    #[must_use]
    pub fn is_auto(&self, key: impl Into<PropertyKey>) -> bool {
        self.get(key).is_keyword(Keyword::Auto)
    }

    /// `position`, defaulting to `static`.
    #[must_use]
    pub fn position(&self) -> Keyword {
        self.keyword(P::Position).unwrap_or(Keyword::Static)
    }

    /// `display`, defaulting to `block`.
    #[must_use]
    pub fn display(&self) -> Keyword {
        self.keyword(P::Display).unwrap_or(Keyword::Block)
    }

    /// `box-sizing`, defaulting to `content-box`.
    #[must_use]
    pub fn box_sizing(&self) -> Keyword {
        self.keyword(P::BoxSizing).unwrap_or(Keyword::ContentBox)
    }

    /// `flex-direction`, defaulting to `row`.
    #[must_use]
    pub fn flex_direction(&self) -> Keyword {
        self.keyword(P::FlexDirection).unwrap_or(Keyword::Row)
    }

    /// `width`: a pixel length once resolved, or a percentage, `auto` or
    /// `fit-content` when layout has to decide.
    #[must_use]
    pub fn width(&self) -> &StyleValue {
        self.get(P::Width)
    }

    /// `height`, with the same states as [`width`](Self::width).
    #[must_use]
    pub fn height(&self) -> &StyleValue {
        self.get(P::Height)
    }

    /// Whether the element is positioned out of flow.
    #[must_use]
    pub fn is_absolutely_positioned(&self) -> bool {
        matches!(self.position(), Keyword::Absolute | Keyword::Fixed)
    }

    /// Whether the element sizes its box by content rules.
    #[must_use]
    pub fn is_content_box(&self) -> bool {
        self.box_sizing() == Keyword::ContentBox
    }

    /// `inline`, `inline-block` or `inline-flex`.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        matches!(
            self.display(),
            Keyword::Inline | Keyword::InlineBlock | Keyword::InlineFlex
        )
    }

    /// `block` or `flex`: a container whose children fill its content width.
    #[must_use]
    pub fn is_block_level(&self) -> bool {
        matches!(self.display(), Keyword::Block | Keyword::Flex)
    }

    /// `flex` or `inline-flex`.
    #[must_use]
    pub fn is_flex(&self) -> bool {
        matches!(self.display(), Keyword::Flex | Keyword::InlineFlex)
    }

    fn px_or_zero(&self, key: P) -> f32 {
        self.px(key).unwrap_or(0.0)
    }

    /// Horizontal padding in pixels.
    #[must_use]
    pub fn padding_x(&self) -> f32 {
        self.px_or_zero(P::PaddingLeft) + self.px_or_zero(P::PaddingRight)
    }

    /// Vertical padding in pixels.
    #[must_use]
    pub fn padding_y(&self) -> f32 {
        self.px_or_zero(P::PaddingTop) + self.px_or_zero(P::PaddingBottom)
    }

    /// Horizontal margin in pixels; `auto` margins count as zero.
    #[must_use]
    pub fn margin_x(&self) -> f32 {
        self.px_or_zero(P::MarginLeft) + self.px_or_zero(P::MarginRight)
    }

    /// Vertical margin in pixels; `auto` margins count as zero.
    #[must_use]
    pub fn margin_y(&self) -> f32 {
        self.px_or_zero(P::MarginTop) + self.px_or_zero(P::MarginBottom)
    }

    /// Horizontal border width in pixels.
    #[must_use]
    pub fn border_x(&self) -> f32 {
        self.px_or_zero(P::BorderLeftWidth) + self.px_or_zero(P::BorderRightWidth)
    }

    /// Vertical border width in pixels.
    #[must_use]
    pub fn border_y(&self) -> f32 {
        self.px_or_zero(P::BorderTopWidth) + self.px_or_zero(P::BorderBottomWidth)
    }

    /// Content-box width for a box whose `width` property is `width`.
    #[must_use]
    pub fn convert_content_box_width(&self, width: f32) -> f32 {
        if self.is_content_box() {
            width
        } else {
            (width - self.padding_x() - self.border_x()).max(0.0)
        }
    }

    /// Content-box height for a box whose `height` property is `height`.
    #[must_use]
    pub fn convert_content_box_height(&self, height: f32) -> f32 {
        if self.is_content_box() {
            height
        } else {
            (height - self.padding_y() - self.border_y()).max(0.0)
        }
    }

    /// Border-box width for a box whose `width` property is `width`.
    #[must_use]
    pub fn convert_border_box_width(&self, width: f32) -> f32 {
        if self.is_content_box() {
            width + self.padding_x() + self.border_x()
        } else {
            width
        }
    }

    /// Border-box height for a box whose `height` property is `height`.
    #[must_use]
    pub fn convert_border_box_height(&self, height: f32) -> f32 {
        if self.is_content_box() {
            height + self.padding_y() + self.border_y()
        } else {
            height
        }
    }

    /// Fixed content-box width, if `width` is a pixel length.
    #[must_use]
    pub fn content_box_width(&self) -> Option<f32> {
        self.px(P::Width).map(|width| self.convert_content_box_width(width))
    }

    /// Fixed padding-box width, if `width` is a pixel length.
    #[must_use]
    pub fn padding_box_width(&self) -> Option<f32> {
        self.px(P::Width).map(|width| {
            if self.is_content_box() {
                width + self.padding_x()
            } else {
                width - self.border_x()
            }
        })
    }

    /// Fixed padding-box height, if `height` is a pixel length.
    #[must_use]
    pub fn padding_box_height(&self) -> Option<f32> {
        self.px(P::Height).map(|height| {
            if self.is_content_box() {
                height + self.padding_y()
            } else {
                height - self.border_y()
            }
        })
    }

    fn inset(&self, key: P) -> &StyleValue {
        if self.position() == Keyword::Static {
            &AUTO
        } else {
            self.get(key)
        }
    }

    /// `top`, or `auto` for statically positioned elements.
    #[must_use]
    pub fn top(&self) -> &StyleValue {
        self.inset(P::Top)
    }

    /// `right`, or `auto` for statically positioned elements.
    #[must_use]
    pub fn right(&self) -> &StyleValue {
        self.inset(P::Right)
    }

    /// `bottom`, or `auto` for statically positioned elements.
    #[must_use]
    pub fn bottom(&self) -> &StyleValue {
        self.inset(P::Bottom)
    }

    /// `left`, or `auto` for statically positioned elements.
    #[must_use]
    pub fn left(&self) -> &StyleValue {
        self.inset(P::Left)
    }

    fn min_size(&self, key: P) -> StyleValue {
        let value = self.get(key);
        if value.is_keyword(Keyword::Auto) && !self.is_flex() {
            StyleValue::px(0.0)
        } else {
            value.clone()
        }
    }

    /// `min-width`, with `auto` meaning zero outside flex containers.
    #[must_use]
    pub fn min_width(&self) -> StyleValue {
        self.min_size(P::MinWidth)
    }

    /// `min-height`, with `auto` meaning zero outside flex containers.
    #[must_use]
    pub fn min_height(&self) -> StyleValue {
        self.min_size(P::MinHeight)
    }
}

static AUTO: StyleValue = StyleValue::keyword(Keyword::Auto);
