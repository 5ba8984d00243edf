//! Property families.
//!
//! Every registered property belongs to one family. The family decides which
//! declared values the property accepts and how they are normalized before
//! they land in a computed style slot.

use super::{Keyword, KeywordId};
use crate::values::{StyleValue, Unit};

/// Value domain of a property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyFamily {
    /// Any length unit, plus the listed keywords.
    Length {
        /// Keywords accepted in place of a length.
        keywords: Vec<KeywordId>,
    },
    /// One of the listed keywords.
    Keyword(Vec<KeywordId>),
    /// A unitless number clamped into `min..=max`. Percentages are accepted
    /// as fractions.
    Number {
        /// Lower clamp bound.
        min: f32,
        /// Upper clamp bound.
        max: f32,
    },
    /// A whole number, plus the listed keywords.
    Integer {
        /// Keywords accepted in place of an integer.
        keywords: Vec<KeywordId>,
    },
    /// A color.
    Color,
    /// An image reference or `none`.
    Image,
    /// Free text or `none` / `normal`.
    Text,
    /// A boolean flag.
    Boolean,
    /// Anything; used for names registered at runtime without a domain.
    Any,
}

impl PropertyFamily {
    /// Length family accepting the given keywords.
    #[must_use]
    pub fn length(keywords: &[Keyword]) -> Self {
        Self::Length {
            keywords: ids(keywords),
        }
    }

    /// Keyword family accepting the given keywords.
    #[must_use]
    pub fn keywords(keywords: &[Keyword]) -> Self {
        Self::Keyword(ids(keywords))
    }

    /// Integer family accepting the given keywords.
    #[must_use]
    pub fn integer(keywords: &[Keyword]) -> Self {
        Self::Integer {
            keywords: ids(keywords),
        }
    }

    /// Validate and normalize a declared value.
    ///
    /// Returns `None` when the value is outside the family's domain; the
    /// cascade then falls back to the property's initial value. `inherit`
    /// and `initial` are accepted by every family and resolved later.
    #[must_use]
    pub fn cascade(&self, value: &StyleValue) -> Option<StyleValue> {
        if value.is_absent() {
            return None;
        }
        if value.is_keyword(Keyword::Inherit) || value.is_keyword(Keyword::Initial) {
            return Some(value.clone());
        }
        match (self, value) {
            (Self::Any, _)
            | (Self::Length { .. }, StyleValue::Length { .. })
            | (Self::Color, StyleValue::Color(_))
            | (Self::Image | Self::Text, StyleValue::String(_))
            | (Self::Text, StyleValue::WideString(_))
            | (Self::Boolean, StyleValue::Boolean(_)) => Some(value.clone()),

            (
                Self::Length { keywords } | Self::Keyword(keywords) | Self::Integer { keywords },
                StyleValue::Keyword(id),
            ) => keywords.contains(id).then(|| value.clone()),
            (Self::Image, StyleValue::Keyword(_)) => value.is_keyword(Keyword::None).then(|| value.clone()),
            (Self::Text, StyleValue::Keyword(_)) => (value.is_keyword(Keyword::None)
                || value.is_keyword(Keyword::Normal))
            .then(|| value.clone()),

            // Unitless numbers are pixel lengths.
            (Self::Length { .. }, StyleValue::Number(number)) => {
                number.is_finite().then(|| StyleValue::px(*number))
            }

            (Self::Number { min, max }, StyleValue::Number(number)) => clamp(*number, *min, *max),
            (
                Self::Number { min, max },
                StyleValue::Length {
                    value,
                    unit: Unit::Percent,
                },
            ) => clamp(value / 100.0, *min, *max),
            #[allow(clippy::cast_precision_loss)]
            (Self::Number { min, max }, StyleValue::Integer(number)) => {
                clamp(*number as f32, *min, *max)
            }

            (Self::Integer { .. }, StyleValue::Integer(_)) => Some(value.clone()),
            #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
            (Self::Integer { .. }, StyleValue::Number(number)) => (number.is_finite()
                && number.fract().abs() < f32::EPSILON
                && *number >= i32::MIN as f32
                && *number <= i32::MAX as f32)
                .then(|| StyleValue::Integer(*number as i32)),

            _ => None,
        }
    }
}

fn ids(keywords: &[Keyword]) -> Vec<KeywordId> {
    keywords.iter().map(|keyword| keyword.id()).collect()
}

fn clamp(number: f32, min: f32, max: f32) -> Option<StyleValue> {
    (!number.is_nan()).then(|| StyleValue::Number(number.clamp(min, max)))
}
