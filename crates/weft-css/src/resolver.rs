//! Computed value resolution.
//!
//! Turns a cascaded [`ComputedStyle`] into absolute pixel values, given the
//! parent's already-resolved style and the device metrics. Resolution runs
//! in four phases because later ones read what earlier ones produced:
//!
//! 1. device units (`dip`, `sp`, `pt`) to pixels for every length slot
//! 2. percentage insets, margins, paddings and min/max sizes, against the parent
//! 3. `width`, `height` and `flex-basis`, which need the box totals from phase 2
//! 4. percentage background sizes and border radii, against this node's own box
//!
//! Percentages that cannot be resolved yet (the parent size is not fixed) are
//! left as percentages, and `auto` sizes that only layout can settle become the
//! `fit-content` or `content` sentinels.

use weft_common::warning::warn_once;

use crate::computed::ComputedStyle;
use crate::error::{Result, StyleError};
use crate::metrics::DeviceMetrics;
use crate::registry::{Keyword, Property as P, PropertyRegistry};
use crate::values::{StyleValue, Unit};

/// Every built-in property whose value may be a length.
const LENGTH_PROPERTIES: [P; 35] = [
    P::Left,
    P::Right,
    P::Top,
    P::Bottom,
    P::Width,
    P::Height,
    P::MinWidth,
    P::MinHeight,
    P::MaxWidth,
    P::MaxHeight,
    P::MarginTop,
    P::MarginRight,
    P::MarginBottom,
    P::MarginLeft,
    P::PaddingTop,
    P::PaddingRight,
    P::PaddingBottom,
    P::PaddingLeft,
    P::BorderTopWidth,
    P::BorderRightWidth,
    P::BorderBottomWidth,
    P::BorderLeftWidth,
    P::BorderTopLeftRadius,
    P::BorderTopRightRadius,
    P::BorderBottomLeftRadius,
    P::BorderBottomRightRadius,
    P::BackgroundSizeWidth,
    P::BackgroundSizeHeight,
    P::BackgroundPositionX,
    P::BackgroundPositionY,
    P::BoxShadowX,
    P::BoxShadowY,
    P::BoxShadowBlur,
    P::BoxShadowSpread,
    P::FlexBasis,
];

/// Properties resolved against the parent's width, in resolution order.
const X_AXIS: [P; 8] = [
    P::Left,
    P::Right,
    P::MarginLeft,
    P::MarginRight,
    P::PaddingLeft,
    P::PaddingRight,
    P::MinWidth,
    P::MaxWidth,
];

/// Properties resolved against the parent's height, in resolution order.
const Y_AXIS: [P; 8] = [
    P::Top,
    P::Bottom,
    P::MarginTop,
    P::MarginBottom,
    P::PaddingTop,
    P::PaddingBottom,
    P::MinHeight,
    P::MaxHeight,
];

const RADII: [P; 4] = [
    P::BorderTopLeftRadius,
    P::BorderTopRightRadius,
    P::BorderBottomLeftRadius,
    P::BorderBottomRightRadius,
];

/// Convert a device-unit length to pixels.
///
/// # Errors
///
/// Returns [`StyleError::UnsupportedUnit`] for units that need a reference
/// size, such as percentages.
pub fn absolute_length(value: f32, unit: Unit, metrics: &DeviceMetrics) -> Result<f32> {
    metrics
        .to_px(value, unit)
        .ok_or(StyleError::UnsupportedUnit { unit })
}

/// Resolve every length in `style` to pixels where enough is known to do so.
///
/// `parent` must already be resolved.
///
/// # Errors
///
/// Returns [`StyleError::AllocationFailure`] if `style` has to grow to hold
/// the built-in properties and cannot.
pub fn compute_absolute_values(
    parent: Option<&ComputedStyle>,
    style: &mut ComputedStyle,
    metrics: &DeviceMetrics,
) -> Result<()> {
    style.grow(PropertyRegistry::BUILTIN_PROPERTY_COUNT)?;

    for property in LENGTH_PROPERTIES {
        convert_device_units(style, property, metrics);
    }

    if let Some(parent) = parent {
        for property in X_AXIS {
            resolve_percentage(style, property, parent, Axis::X);
        }
        for property in Y_AXIS {
            resolve_percentage(style, property, parent, Axis::Y);
        }
    }

    resolve_width(parent, style);
    resolve_height(parent, style);
    resolve_flex_basis(parent, style);

    resolve_background_size(style);
    resolve_radii(style);
    Ok(())
}

fn convert_device_units(style: &mut ComputedStyle, property: P, metrics: &DeviceMetrics) {
    let Some((value, unit)) = style.length(property) else {
        return;
    };
    match unit {
        Unit::Px | Unit::Percent => {}
        Unit::Dip | Unit::Sp | Unit::Pt => match absolute_length(value, unit, metrics) {
            Ok(px) => style.update(property, StyleValue::px(px)),
            Err(err) => warn_once("CSS", &format!("{}: {err}", property.name())),
        },
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// The reference size percentages of `style` resolve against on `axis`.
fn percentage_base(parent: &ComputedStyle, style: &ComputedStyle, axis: Axis) -> Option<f32> {
    let (size, extra) = match axis {
        Axis::X => (parent.px(P::Width)?, parent.border_x() + parent.padding_x()),
        Axis::Y => (parent.px(P::Height)?, parent.border_y() + parent.padding_y()),
    };
    if style.is_absolutely_positioned() && parent.is_content_box() {
        Some(size + extra)
    } else {
        Some(size)
    }
}

fn resolve_percentage(style: &mut ComputedStyle, property: P, parent: &ComputedStyle, axis: Axis) {
    let Some((value, Unit::Percent)) = style.length(property) else {
        return;
    };
    if let Some(base) = percentage_base(parent, style, axis) {
        style.update(property, StyleValue::px(value * base / 100.0));
    }
}

const FIT_CONTENT: StyleValue = StyleValue::keyword(Keyword::FitContent);

fn resolve_width(parent: Option<&ComputedStyle>, style: &mut ComputedStyle) {
    if style.is_auto(P::Width) {
        if style.is_absolutely_positioned() {
            let insets = style.px(P::Left).zip(style.px(P::Right));
            let width = insets.zip(parent.and_then(ComputedStyle::padding_box_width));
            let value = width.map_or(FIT_CONTENT, |((left, right), base)| {
                StyleValue::px(base - left - right)
            });
            style.update(P::Width, value);
            return;
        }
        let Some(parent) = parent.filter(|_| !style.is_inline()) else {
            style.update(P::Width, FIT_CONTENT);
            return;
        };
        if let Some(content) = parent.content_box_width().filter(|_| parent.is_block_level()) {
            let mut width = content - style.margin_x();
            if style.is_content_box() {
                width -= style.padding_x() + style.border_x();
            }
            style.update(P::Width, StyleValue::px(width));
        }
        return;
    }

    let Some((percent, Unit::Percent)) = style.length(P::Width) else {
        return;
    };
    let Some(parent) = parent else {
        style.update(P::Width, FIT_CONTENT);
        return;
    };
    let base = if style.is_absolutely_positioned() {
        parent.padding_box_width()
    } else {
        parent.px(P::Width)
    };
    if let Some(base) = base {
        style.update(P::Width, StyleValue::px(base * percent / 100.0));
    }
}

fn resolve_height(parent: Option<&ComputedStyle>, style: &mut ComputedStyle) {
    if style.is_auto(P::Height) {
        if style.is_absolutely_positioned() {
            let insets = style.px(P::Top).zip(style.px(P::Bottom));
            let height = insets.zip(parent.and_then(ComputedStyle::padding_box_height));
            let value = height.map_or(FIT_CONTENT, |((top, bottom), base)| {
                StyleValue::px(base - top - bottom)
            });
            style.update(P::Height, value);
        } else if parent.is_none() || style.is_inline() {
            style.update(P::Height, FIT_CONTENT);
        }
        return;
    }

    let Some((percent, Unit::Percent)) = style.length(P::Height) else {
        return;
    };
    let Some(parent) = parent else {
        style.update(P::Height, FIT_CONTENT);
        return;
    };
    let base = if style.is_absolutely_positioned() {
        parent.padding_box_height()
    } else {
        parent.px(P::Height)
    };
    if let Some(base) = base {
        style.update(P::Height, StyleValue::px(base * percent / 100.0));
    }
}

fn resolve_flex_basis(parent: Option<&ComputedStyle>, style: &mut ComputedStyle) {
    if !style.is_auto(P::FlexBasis) {
        return;
    }
    let main = match parent.map(ComputedStyle::flex_direction) {
        Some(Keyword::Column) => P::Height,
        _ => P::Width,
    };
    let value = style
        .px(main)
        .map_or(StyleValue::keyword(Keyword::Content), StyleValue::px);
    style.update(P::FlexBasis, value);
}

fn resolve_background_size(style: &mut ComputedStyle) {
    let bases = [
        (P::BackgroundSizeWidth, style.padding_box_width()),
        (P::BackgroundSizeHeight, style.padding_box_height()),
    ];
    for (property, base) in bases {
        if let (Some((percent, Unit::Percent)), Some(base)) = (style.length(property), base) {
            style.update(property, StyleValue::px(base * percent / 100.0));
        }
    }
}

fn resolve_radii(style: &mut ComputedStyle) {
    let Some(width) = style.px(P::Width) else {
        return;
    };
    let base = style.convert_border_box_width(width);
    for property in RADII {
        if let Some((percent, Unit::Percent)) = style.length(property) {
            style.update(property, StyleValue::px(base * percent / 100.0));
        }
    }
}
