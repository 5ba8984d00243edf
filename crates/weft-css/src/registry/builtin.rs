//! Built-in property and keyword tables.
//!
//! The discriminant of each variant is its registry key, so the tables can
//! be iterated in key order when a registry is seeded.

use strum_macros::{EnumCount, EnumIter, FromRepr, IntoStaticStr};

use super::family::PropertyFamily;
use super::{KeywordId, PropertyKey};
use crate::values::{Color, StyleValue};

/// Properties known to every registry, in key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, IntoStaticStr, FromRepr)]
#[strum(serialize_all = "kebab-case")]
#[repr(usize)]
pub enum Property {
    /// `left`
    Left,
    /// `right`
    Right,
    /// `top`
    Top,
    /// `bottom`
    Bottom,
    /// `position`
    Position,
    /// `visibility`
    Visibility,
    /// `display`
    Display,
    /// `z-index`
    #[strum(serialize = "z-index")]
    ZIndex,
    /// `opacity`
    Opacity,
    /// `box-sizing`
    BoxSizing,
    /// `width`
    Width,
    /// `height`
    Height,
    /// `min-width`
    MinWidth,
    /// `min-height`
    MinHeight,
    /// `max-width`
    MaxWidth,
    /// `max-height`
    MaxHeight,
    /// `margin-top`
    MarginTop,
    /// `margin-right`
    MarginRight,
    /// `margin-bottom`
    MarginBottom,
    /// `margin-left`
    MarginLeft,
    /// `padding-top`
    PaddingTop,
    /// `padding-right`
    PaddingRight,
    /// `padding-bottom`
    PaddingBottom,
    /// `padding-left`
    PaddingLeft,
    /// `vertical-align`
    VerticalAlign,
    /// `border-top-width`
    BorderTopWidth,
    /// `border-top-style`
    BorderTopStyle,
    /// `border-top-color`
    BorderTopColor,
    /// `border-right-width`
    BorderRightWidth,
    /// `border-right-style`
    BorderRightStyle,
    /// `border-right-color`
    BorderRightColor,
    /// `border-bottom-width`
    BorderBottomWidth,
    /// `border-bottom-style`
    BorderBottomStyle,
    /// `border-bottom-color`
    BorderBottomColor,
    /// `border-left-width`
    BorderLeftWidth,
    /// `border-left-style`
    BorderLeftStyle,
    /// `border-left-color`
    BorderLeftColor,
    /// `border-top-left-radius`
    BorderTopLeftRadius,
    /// `border-top-right-radius`
    BorderTopRightRadius,
    /// `border-bottom-left-radius`
    BorderBottomLeftRadius,
    /// `border-bottom-right-radius`
    BorderBottomRightRadius,
    /// `background-color`
    BackgroundColor,
    /// `background-image`
    BackgroundImage,
    /// `background-size-width`
    BackgroundSizeWidth,
    /// `background-size-height`
    BackgroundSizeHeight,
    /// `background-repeat`
    BackgroundRepeat,
    /// `background-position-x`
    BackgroundPositionX,
    /// `background-position-y`
    BackgroundPositionY,
    /// `box-shadow-x`
    #[strum(serialize = "box-shadow-x")]
    BoxShadowX,
    /// `box-shadow-y`
    #[strum(serialize = "box-shadow-y")]
    BoxShadowY,
    /// `box-shadow-blur`
    BoxShadowBlur,
    /// `box-shadow-spread`
    BoxShadowSpread,
    /// `box-shadow-color`
    BoxShadowColor,
    /// `flex-basis`
    FlexBasis,
    /// `flex-grow`
    FlexGrow,
    /// `flex-shrink`
    FlexShrink,
    /// `flex-direction`
    FlexDirection,
    /// `flex-wrap`
    FlexWrap,
    /// `justify-content`
    JustifyContent,
    /// `align-content`
    AlignContent,
    /// `align-items`
    AlignItems,
    /// `color`
    Color,
    /// `font-size`
    FontSize,
    /// `font-style`
    FontStyle,
    /// `font-family`
    FontFamily,
    /// `line-height`
    LineHeight,
    /// `text-align`
    TextAlign,
    /// `content`
    Content,
    /// `white-space`
    WhiteSpace,
    /// `word-break`
    WordBreak,
    /// `pointer-events`
    PointerEvents,
    /// `focusable`
    Focusable,
}

impl Property {
    /// The registry key of this property.
    #[must_use]
    pub const fn key(self) -> PropertyKey {
        PropertyKey(self as usize)
    }

    /// The stylesheet name, e.g. `min-width`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The built-in property behind a key, if the key is built in.
    #[must_use]
    pub const fn from_key(key: PropertyKey) -> Option<Self> {
        Self::from_repr(key.0)
    }

    /// How values of this property are validated, and what it starts as.
    pub(crate) fn definition(self) -> (PropertyFamily, StyleValue) {
        use Keyword as K;

        let auto = StyleValue::keyword(K::Auto);
        let zero = StyleValue::px(0.0);
        match self {
            Self::Left | Self::Right | Self::Top | Self::Bottom => {
                (PropertyFamily::length(&[K::Auto]), auto)
            }
            Self::Position => (
                PropertyFamily::keywords(&[K::Static, K::Relative, K::Absolute, K::Fixed]),
                StyleValue::keyword(K::Static),
            ),
            Self::Visibility => (
                PropertyFamily::keywords(&[K::Visible, K::Hidden]),
                StyleValue::keyword(K::Visible),
            ),
            Self::Display => (
                PropertyFamily::keywords(&[
                    K::None,
                    K::Block,
                    K::Inline,
                    K::InlineBlock,
                    K::Flex,
                    K::InlineFlex,
                ]),
                StyleValue::keyword(K::Block),
            ),
            Self::ZIndex => (PropertyFamily::integer(&[K::Auto]), auto),
            Self::Opacity => (PropertyFamily::Number { min: 0.0, max: 1.0 }, StyleValue::Number(1.0)),
            Self::BoxSizing => (
                PropertyFamily::keywords(&[K::ContentBox, K::BorderBox]),
                StyleValue::keyword(K::ContentBox),
            ),
            Self::Width | Self::Height | Self::MinWidth | Self::MinHeight => {
                (PropertyFamily::length(&[K::Auto]), auto)
            }
            Self::MaxWidth | Self::MaxHeight => (PropertyFamily::length(&[K::Auto, K::None]), auto),
            Self::MarginTop | Self::MarginRight | Self::MarginBottom | Self::MarginLeft => {
                (PropertyFamily::length(&[K::Auto]), zero)
            }
            Self::PaddingTop
            | Self::PaddingRight
            | Self::PaddingBottom
            | Self::PaddingLeft
            | Self::BorderTopWidth
            | Self::BorderRightWidth
            | Self::BorderBottomWidth
            | Self::BorderLeftWidth
            | Self::BorderTopLeftRadius
            | Self::BorderTopRightRadius
            | Self::BorderBottomLeftRadius
            | Self::BorderBottomRightRadius
            | Self::BoxShadowX
            | Self::BoxShadowY
            | Self::BoxShadowBlur
            | Self::BoxShadowSpread => (PropertyFamily::length(&[]), zero),
            Self::VerticalAlign => (
                PropertyFamily::keywords(&[K::Top, K::Middle, K::Bottom]),
                StyleValue::keyword(K::Top),
            ),
            Self::BorderTopStyle
            | Self::BorderRightStyle
            | Self::BorderBottomStyle
            | Self::BorderLeftStyle => (
                PropertyFamily::keywords(&[K::None, K::Solid, K::Dotted, K::Double, K::Dashed]),
                StyleValue::keyword(K::None),
            ),
            Self::BorderTopColor
            | Self::BorderRightColor
            | Self::BorderBottomColor
            | Self::BorderLeftColor
            | Self::Color => (PropertyFamily::Color, StyleValue::Color(Color::BLACK)),
            Self::BackgroundColor | Self::BoxShadowColor => {
                (PropertyFamily::Color, StyleValue::Color(Color::TRANSPARENT))
            }
            Self::BackgroundImage => (PropertyFamily::Image, StyleValue::keyword(K::None)),
            Self::BackgroundSizeWidth | Self::BackgroundSizeHeight => {
                (PropertyFamily::length(&[K::Auto, K::Contain, K::Cover]), auto)
            }
            Self::BackgroundRepeat => (
                PropertyFamily::keywords(&[K::Repeat, K::NoRepeat, K::RepeatX, K::RepeatY]),
                StyleValue::keyword(K::Repeat),
            ),
            Self::BackgroundPositionX => (
                PropertyFamily::length(&[K::Left, K::Center, K::Right]),
                StyleValue::percent(0.0),
            ),
            Self::BackgroundPositionY => (
                PropertyFamily::length(&[K::Top, K::Center, K::Bottom]),
                StyleValue::percent(0.0),
            ),
            Self::FlexBasis => (PropertyFamily::length(&[K::Auto, K::Content]), auto),
            Self::FlexGrow => (
                PropertyFamily::Number { min: 0.0, max: f32::MAX },
                StyleValue::Number(0.0),
            ),
            Self::FlexShrink => (
                PropertyFamily::Number { min: 0.0, max: f32::MAX },
                StyleValue::Number(1.0),
            ),
            Self::FlexDirection => (
                PropertyFamily::keywords(&[K::Row, K::Column]),
                StyleValue::keyword(K::Row),
            ),
            Self::FlexWrap => (
                PropertyFamily::keywords(&[K::Nowrap, K::Wrap]),
                StyleValue::keyword(K::Nowrap),
            ),
            Self::JustifyContent => (
                PropertyFamily::keywords(&[
                    K::FlexStart,
                    K::FlexEnd,
                    K::Start,
                    K::End,
                    K::Center,
                    K::SpaceBetween,
                    K::SpaceAround,
                    K::SpaceEvenly,
                ]),
                StyleValue::keyword(K::FlexStart),
            ),
            Self::AlignContent => (
                PropertyFamily::keywords(&[
                    K::Stretch,
                    K::FlexStart,
                    K::FlexEnd,
                    K::Center,
                    K::SpaceBetween,
                    K::SpaceAround,
                    K::SpaceEvenly,
                ]),
                StyleValue::keyword(K::Stretch),
            ),
            Self::AlignItems => (
                PropertyFamily::keywords(&[K::Stretch, K::FlexStart, K::FlexEnd, K::Center]),
                StyleValue::keyword(K::Stretch),
            ),
            Self::FontSize => (
                PropertyFamily::length(&[K::Small, K::Medium, K::Large]),
                StyleValue::px(14.0),
            ),
            Self::FontStyle => (
                PropertyFamily::keywords(&[K::Normal, K::Italic, K::Oblique]),
                StyleValue::keyword(K::Normal),
            ),
            Self::FontFamily => (PropertyFamily::Text, StyleValue::String(String::new())),
            Self::LineHeight => (PropertyFamily::length(&[K::Normal]), StyleValue::keyword(K::Normal)),
            Self::TextAlign => (
                PropertyFamily::keywords(&[K::Left, K::Center, K::Right]),
                StyleValue::keyword(K::Left),
            ),
            Self::Content => (PropertyFamily::Text, StyleValue::keyword(K::Normal)),
            Self::WhiteSpace => (
                PropertyFamily::keywords(&[K::Normal, K::Nowrap]),
                StyleValue::keyword(K::Normal),
            ),
            Self::WordBreak => (
                PropertyFamily::keywords(&[K::Normal, K::BreakAll]),
                StyleValue::keyword(K::Normal),
            ),
            Self::PointerEvents => (
                PropertyFamily::keywords(&[K::Auto, K::None]),
                StyleValue::keyword(K::Auto),
            ),
            Self::Focusable => (PropertyFamily::Boolean, StyleValue::Boolean(false)),
        }
    }
}

/// Keywords known to every registry, in id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, IntoStaticStr, FromRepr)]
#[strum(serialize_all = "kebab-case")]
#[repr(u32)]
pub enum Keyword {
    /// `inherit`
    Inherit,
    /// `initial`
    Initial,
    /// `none`
    None,
    /// `auto`
    Auto,
    /// `normal`
    Normal,
    /// `static`
    Static,
    /// `relative`
    Relative,
    /// `absolute`
    Absolute,
    /// `fixed`
    Fixed,
    /// `block`
    Block,
    /// `inline`
    Inline,
    /// `inline-block`
    InlineBlock,
    /// `flex`
    Flex,
    /// `inline-flex`
    InlineFlex,
    /// `left`
    Left,
    /// `center`
    Center,
    /// `right`
    Right,
    /// `top`
    Top,
    /// `middle`
    Middle,
    /// `bottom`
    Bottom,
    /// `row`
    Row,
    /// `column`
    Column,
    /// `start`
    Start,
    /// `end`
    End,
    /// `flex-start`
    FlexStart,
    /// `flex-end`
    FlexEnd,
    /// `stretch`
    Stretch,
    /// `space-between`
    SpaceBetween,
    /// `space-around`
    SpaceAround,
    /// `space-evenly`
    SpaceEvenly,
    /// `wrap`
    Wrap,
    /// `nowrap`
    Nowrap,
    /// `break-all`
    BreakAll,
    /// `italic`
    Italic,
    /// `oblique`
    Oblique,
    /// `small`
    Small,
    /// `medium`
    Medium,
    /// `large`
    Large,
    /// `bold`
    Bold,
    /// `hidden`
    Hidden,
    /// `visible`
    Visible,
    /// `content-box`
    ContentBox,
    /// `padding-box`
    PaddingBox,
    /// `border-box`
    BorderBox,
    /// `graph-box`
    GraphBox,
    /// `solid`
    Solid,
    /// `dotted`
    Dotted,
    /// `double`
    Double,
    /// `dashed`
    Dashed,
    /// `contain`
    Contain,
    /// `cover`
    Cover,
    /// `repeat`
    Repeat,
    /// `no-repeat`
    NoRepeat,
    /// `repeat-x`
    RepeatX,
    /// `repeat-y`
    RepeatY,
    /// Size sentinel: the layout engine measures the content.
    FitContent,
    /// Flex-basis sentinel: the layout engine measures the content.
    Content,
}

impl Keyword {
    /// The registry id of this keyword.
    #[must_use]
    pub const fn id(self) -> KeywordId {
        KeywordId(self as u32)
    }

    /// The stylesheet spelling, e.g. `inline-block`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The built-in keyword behind an id, if the id is built in.
    #[must_use]
    pub const fn from_id(id: KeywordId) -> Option<Self> {
        Self::from_repr(id.0)
    }
}
