//! Integration tests for computed value resolution.

use weft_css::cascade::cascade_style;
use weft_css::resolver::{absolute_length, compute_absolute_values};
use weft_css::{
    ComputedStyle, DeclarationBlock, DeviceMetrics, Keyword, Property, PropertyRegistry,
    StyleError, StyleValue, Unit,
};

const EPSILON: f32 = 1e-3;

fn assert_px(style: &ComputedStyle, property: Property, expected: f32) {
    let actual = style
        .px(property)
        .unwrap_or_else(|| panic!("{} is {:?}, not px", property.name(), style.get(property)));
    assert!(
        (actual - expected).abs() < EPSILON,
        "{}: expected {expected}px, got {actual}px",
        property.name()
    );
}

fn kw(keyword: Keyword) -> StyleValue {
    StyleValue::keyword(keyword)
}

/// Cascade `declarations` and resolve them under `parent`.
fn resolve(
    parent: Option<&ComputedStyle>,
    declarations: Vec<(Property, StyleValue)>,
    metrics: &DeviceMetrics,
) -> ComputedStyle {
    let registry = PropertyRegistry::new();
    let block: DeclarationBlock = declarations.into_iter().collect();
    let mut style = ComputedStyle::new();
    cascade_style(&registry, &block, &mut style).unwrap();
    compute_absolute_values(parent, &mut style, metrics).unwrap();
    style
}

fn root(declarations: Vec<(Property, StyleValue)>) -> ComputedStyle {
    resolve(None, declarations, &DeviceMetrics::default())
}

fn child(parent: &ComputedStyle, declarations: Vec<(Property, StyleValue)>) -> ComputedStyle {
    resolve(Some(parent), declarations, &DeviceMetrics::default())
}

#[test]
fn test_percentage_width_against_parent() {
    let parent = root(vec![(Property::Width, StyleValue::px(200.0))]);
    let style = child(&parent, vec![(Property::Width, StyleValue::percent(50.0))]);
    assert_px(&style, Property::Width, 100.0);
    assert_eq!(style.width(), &StyleValue::px(100.0));
}

#[test]
fn test_absolute_percentage_width_against_padding_box() {
    let parent = root(vec![
        (Property::Width, StyleValue::px(200.0)),
        (Property::BoxSizing, kw(Keyword::BorderBox)),
        (Property::BorderLeftWidth, StyleValue::px(10.0)),
    ]);
    let style = child(
        &parent,
        vec![
            (Property::Position, kw(Keyword::Absolute)),
            (Property::Width, StyleValue::percent(50.0)),
        ],
    );
    assert_px(&style, Property::Width, 95.0);
}

#[test]
fn test_percentage_without_parent_is_fit_content() {
    let style = root(vec![(Property::Width, StyleValue::percent(50.0))]);
    assert_eq!(style.keyword(Property::Width), Some(Keyword::FitContent));
}

#[test]
fn test_percentage_stays_when_parent_is_not_fixed() {
    let parent = root(vec![(Property::Display, kw(Keyword::Inline))]);
    let style = child(&parent, vec![(Property::Width, StyleValue::percent(50.0))]);
    assert!(style.is_percentage(Property::Width));
}

#[test]
fn test_device_units() {
    let metrics = DeviceMetrics {
        dpi: 160.0,
        density: 2.0,
        scaled_density: 1.5,
        scale: 1.0,
    };
    let style = resolve(
        None,
        vec![
            (Property::MarginLeft, StyleValue::length(10.0, Unit::Dip)),
            (Property::PaddingLeft, StyleValue::length(10.0, Unit::Sp)),
            (Property::BorderTopWidth, StyleValue::length(10.0, Unit::Pt)),
        ],
        &metrics,
    );
    assert_px(&style, Property::MarginLeft, 20.0);
    assert_px(&style, Property::PaddingLeft, 15.0);
    assert_px(&style, Property::BorderTopWidth, 22.222);

    assert_eq!(
        absolute_length(10.0, Unit::Percent, &metrics),
        Err(StyleError::UnsupportedUnit {
            unit: Unit::Percent
        })
    );
}

#[test]
fn test_box_shadow_lengths_use_device_units() {
    let metrics = DeviceMetrics {
        dpi: 96.0,
        density: 2.0,
        scaled_density: 2.0,
        scale: 1.0,
    };
    let style = resolve(
        None,
        vec![
            (Property::BoxShadowX, StyleValue::length(10.0, Unit::Dip)),
            (Property::BoxShadowBlur, StyleValue::length(10.0, Unit::Dip)),
            (Property::BoxShadowSpread, StyleValue::length(10.0, Unit::Pt)),
        ],
        &metrics,
    );
    assert_px(&style, Property::BoxShadowX, 20.0);
    assert_px(&style, Property::BoxShadowBlur, 20.0);
    assert_px(&style, Property::BoxShadowSpread, 13.333);
}

#[test]
fn test_auto_width_fills_block_parent() {
    let parent = root(vec![(Property::Width, StyleValue::px(300.0))]);
    let style = child(
        &parent,
        vec![
            (Property::MarginLeft, StyleValue::px(10.0)),
            (Property::MarginRight, StyleValue::px(10.0)),
        ],
    );
    assert_px(&style, Property::Width, 280.0);

    let padded = child(
        &parent,
        vec![
            (Property::MarginLeft, StyleValue::px(10.0)),
            (Property::MarginRight, StyleValue::px(10.0)),
            (Property::PaddingLeft, StyleValue::px(5.0)),
            (Property::PaddingRight, StyleValue::px(5.0)),
        ],
    );
    assert_px(&padded, Property::Width, 270.0);
}

#[test]
fn test_auto_width_uses_parent_content_box() {
    let parent = root(vec![
        (Property::Width, StyleValue::px(300.0)),
        (Property::BoxSizing, kw(Keyword::BorderBox)),
        (Property::PaddingLeft, StyleValue::px(20.0)),
        (Property::PaddingRight, StyleValue::px(20.0)),
    ]);
    let style = child(&parent, vec![]);
    assert_px(&style, Property::Width, 260.0);
}

#[test]
fn test_auto_width_inline_or_rootless_is_fit_content() {
    let rootless = root(vec![]);
    assert_eq!(rootless.keyword(Property::Width), Some(Keyword::FitContent));
    assert!(rootless.height().is_keyword(Keyword::FitContent));

    let parent = root(vec![(Property::Width, StyleValue::px(300.0))]);
    let inline = child(&parent, vec![(Property::Display, kw(Keyword::InlineBlock))]);
    assert_eq!(inline.keyword(Property::Width), Some(Keyword::FitContent));
}

#[test]
fn test_static_auto_height_stays_auto() {
    let parent = root(vec![
        (Property::Width, StyleValue::px(300.0)),
        (Property::Height, StyleValue::px(300.0)),
    ]);
    let style = child(&parent, vec![]);
    assert!(style.is_auto(Property::Height));
}

#[test]
fn test_absolute_auto_size_from_insets() {
    let parent = root(vec![
        (Property::Width, StyleValue::px(300.0)),
        (Property::Height, StyleValue::px(100.0)),
        (Property::PaddingLeft, StyleValue::px(10.0)),
    ]);
    let style = child(
        &parent,
        vec![
            (Property::Position, kw(Keyword::Absolute)),
            (Property::Left, StyleValue::px(10.0)),
            (Property::Right, StyleValue::px(20.0)),
            (Property::Top, StyleValue::px(30.0)),
        ],
    );
    assert_px(&style, Property::Width, 280.0);
    assert_eq!(style.keyword(Property::Height), Some(Keyword::FitContent));
}

#[test]
fn test_percentage_insets_and_margins() {
    let parent = root(vec![
        (Property::Width, StyleValue::px(200.0)),
        (Property::Height, StyleValue::px(100.0)),
        (Property::PaddingTop, StyleValue::px(10.0)),
        (Property::PaddingBottom, StyleValue::px(10.0)),
    ]);
    let relative = child(
        &parent,
        vec![
            (Property::Position, kw(Keyword::Relative)),
            (Property::Left, StyleValue::percent(10.0)),
            (Property::MarginTop, StyleValue::percent(10.0)),
        ],
    );
    assert_px(&relative, Property::Left, 20.0);
    assert_px(&relative, Property::MarginTop, 10.0);

    let absolute = child(
        &parent,
        vec![
            (Property::Position, kw(Keyword::Absolute)),
            (Property::Top, StyleValue::percent(50.0)),
        ],
    );
    assert_px(&absolute, Property::Top, 60.0);
}

#[test]
fn test_flex_basis_follows_main_axis() {
    let row = root(vec![
        (Property::Display, kw(Keyword::Flex)),
        (Property::Width, StyleValue::px(300.0)),
    ]);
    let item = child(&row, vec![]);
    assert_px(&item, Property::FlexBasis, 300.0);

    let column = root(vec![
        (Property::Display, kw(Keyword::Flex)),
        (Property::FlexDirection, kw(Keyword::Column)),
        (Property::Width, StyleValue::px(300.0)),
    ]);
    let sized = child(&column, vec![(Property::Height, StyleValue::px(40.0))]);
    assert_px(&sized, Property::FlexBasis, 40.0);
    let r#unsized = child(&column, vec![]);
    assert_eq!(r#unsized.keyword(Property::FlexBasis), Some(Keyword::Content));

    let explicit = child(&row, vec![(Property::FlexBasis, StyleValue::px(12.0))]);
    assert_px(&explicit, Property::FlexBasis, 12.0);
}

#[test]
fn test_background_size_and_radius_percentages() {
    let style = root(vec![
        (Property::Width, StyleValue::px(100.0)),
        (Property::Height, StyleValue::px(50.0)),
        (Property::PaddingLeft, StyleValue::px(10.0)),
        (Property::PaddingRight, StyleValue::px(10.0)),
        (Property::BackgroundSizeWidth, StyleValue::percent(50.0)),
        (Property::BackgroundSizeHeight, StyleValue::percent(50.0)),
        (Property::BackgroundPositionX, StyleValue::percent(50.0)),
        (Property::BorderTopLeftRadius, StyleValue::percent(10.0)),
    ]);
    assert_px(&style, Property::BackgroundSizeWidth, 60.0);
    assert_px(&style, Property::BackgroundSizeHeight, 25.0);
    assert_px(&style, Property::BorderTopLeftRadius, 12.0);
    assert!(style.is_percentage(Property::BackgroundPositionX));
}

#[test]
fn test_inset_accessors_respect_position() {
    let style = root(vec![(Property::Top, StyleValue::px(5.0))]);
    assert!(style.top().is_keyword(Keyword::Auto));

    let positioned = root(vec![
        (Property::Position, kw(Keyword::Relative)),
        (Property::Top, StyleValue::px(5.0)),
    ]);
    assert_eq!(positioned.top(), &StyleValue::px(5.0));
    assert!(positioned.left().is_keyword(Keyword::Auto));
}

#[test]
fn test_min_size_accessors() {
    let block = root(vec![]);
    assert_eq!(block.min_width(), StyleValue::px(0.0));
    assert_eq!(block.min_height(), StyleValue::px(0.0));

    let flex = root(vec![(Property::Display, kw(Keyword::Flex))]);
    assert!(flex.min_width().is_keyword(Keyword::Auto));
}

#[test]
fn test_box_sums() {
    let style = root(vec![
        (Property::PaddingLeft, StyleValue::px(1.0)),
        (Property::PaddingRight, StyleValue::px(2.0)),
        (Property::MarginTop, StyleValue::px(3.0)),
        (Property::MarginBottom, kw(Keyword::Auto)),
        (Property::BorderTopWidth, StyleValue::px(4.0)),
        (Property::BorderBottomWidth, StyleValue::px(5.0)),
    ]);
    assert!((style.padding_x() - 3.0).abs() < EPSILON);
    assert!((style.margin_y() - 3.0).abs() < EPSILON);
    assert!((style.border_y() - 9.0).abs() < EPSILON);
    assert!((style.convert_border_box_height(10.0) - 19.0).abs() < EPSILON);
}
