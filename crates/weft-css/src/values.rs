//! Declared and computed value representation.
//!
//! A [`StyleValue`] is what a declaration carries and what a computed style
//! slot holds. Lengths keep their unit until the resolver rewrites them as
//! pixels.

use std::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::registry::{Keyword, KeywordId, PropertyRegistry};

/// Length units understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
pub enum Unit {
    /// Physical pixels after density scaling has been applied by the host.
    #[strum(serialize = "px")]
    Px,
    /// Percentage of a reference dimension chosen by the resolver.
    #[strum(serialize = "%")]
    Percent,
    /// Density-independent pixels, multiplied by the device density.
    #[strum(serialize = "dip")]
    Dip,
    /// Scaled pixels, multiplied by the scaled (font) density.
    #[strum(serialize = "sp")]
    Sp,
    /// Points, 1/72 of an inch.
    #[strum(serialize = "pt")]
    Pt,
}

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Fully transparent black, the initial value of background colors.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from its channels, including alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// A tagged property value.
///
/// `Absent` marks "no value" and is skipped by merging and cascading.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum StyleValue {
    /// No value.
    #[default]
    Absent,
    /// A registered keyword (`auto`, `block`, `border-box`, ...).
    Keyword(KeywordId),
    /// A number with a length unit.
    Length {
        /// The magnitude.
        value: f32,
        /// The unit the magnitude is expressed in.
        unit: Unit,
    },
    /// A unitless number (opacity, flex-grow).
    Number(f32),
    /// An integer (z-index).
    Integer(i32),
    /// A boolean flag (focusable).
    Boolean(bool),
    /// A color.
    Color(Color),
    /// A string (font family, image url).
    String(String),
    /// Text stored as Unicode scalar values (generated content).
    WideString(Vec<char>),
}

impl StyleValue {
    /// A pixel length.
    #[must_use]
    pub const fn px(value: f32) -> Self {
        Self::Length {
            value,
            unit: Unit::Px,
        }
    }

    /// A percentage length.
    #[must_use]
    pub const fn percent(value: f32) -> Self {
        Self::Length {
            value,
            unit: Unit::Percent,
        }
    }

    /// A length in an arbitrary unit.
    #[must_use]
    pub const fn length(value: f32, unit: Unit) -> Self {
        Self::Length { value, unit }
    }

    /// A built-in keyword.
    #[must_use]
    pub const fn keyword(keyword: Keyword) -> Self {
        Self::Keyword(keyword.id())
    }

    /// Whether this is the "no value" marker.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The magnitude and unit of a length value.
    #[must_use]
    pub const fn as_length(&self) -> Option<(f32, Unit)> {
        match self {
            Self::Length { value, unit } => Some((*value, *unit)),
            _ => None,
        }
    }

    /// The magnitude of a pixel length.
    #[must_use]
    pub const fn as_px(&self) -> Option<f32> {
        match self {
            Self::Length {
                value,
                unit: Unit::Px,
            } => Some(*value),
            _ => None,
        }
    }

    /// The keyword id of a keyword value.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<KeywordId> {
        match self {
            Self::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Whether this value is the given built-in keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.as_keyword() == Some(keyword.id())
    }

    /// Render the value as stylesheet text, naming keywords through `registry`.
    #[must_use]
    pub fn describe(&self, registry: &PropertyRegistry) -> String {
        match self {
            Self::Absent => String::from("<none>"),
            Self::Keyword(id) => registry
                .keyword_name(*id)
                .map_or_else(|| format!("<unknown keyword {}>", id.0), str::to_owned),
            Self::Length { value, unit } => format!("{value}{unit}"),
            Self::Number(value) => value.to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Boolean(value) => value.to_string(),
            Self::Color(color) => color.to_string(),
            Self::String(text) => format!("\"{text}\""),
            Self::WideString(text) => format!("\"{}\"", text.iter().collect::<String>()),
        }
    }
}
