//! Integration tests for device metrics configuration.

use weft_css::{DensityLevel, DeviceMetrics, Unit};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn test_defaults() {
    let metrics = DeviceMetrics::default();
    assert!(close(metrics.dpi, 96.0));
    assert!(close(metrics.density, 1.0));
    assert!(close(metrics.scaled_density, 1.0));
    assert!(close(metrics.scale, 1.0));
}

#[test]
fn test_load_partial_config_from_json() {
    let metrics: DeviceMetrics = serde_json::from_str(r#"{ "dpi": 144.0, "scale": 2.0 }"#).unwrap();
    assert!(close(metrics.dpi, 144.0));
    assert!(close(metrics.density, 1.0));
    assert!(close(metrics.scale, 2.0));

    let empty: DeviceMetrics = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, DeviceMetrics::default());
}

#[test]
fn test_config_round_trips_through_json() {
    let mut metrics = DeviceMetrics::with_dpi(120.0);
    metrics.set_density_level(DensityLevel::Large);
    let text = serde_json::to_string(&metrics).unwrap();
    let loaded: DeviceMetrics = serde_json::from_str(&text).unwrap();
    assert_eq!(loaded, metrics);
}

#[test]
fn test_density_level_names() {
    let level: DensityLevel = serde_json::from_str(r#""big""#).unwrap();
    assert_eq!(level, DensityLevel::Big);
    assert_eq!(serde_json::to_string(&DensityLevel::Small).unwrap(), r#""small""#);
}

#[test]
fn test_levels_scale_with_dpi() {
    let mut metrics = DeviceMetrics::with_dpi(192.0);
    metrics.set_density_level(DensityLevel::Small);
    metrics.set_scaled_density_level(DensityLevel::Large);
    assert!(close(metrics.density, 1.5));
    assert!(close(metrics.scaled_density, 2.5));
    assert!(close(metrics.compute(10.0, Unit::Dip), 15.0));
    assert!(close(metrics.compute(10.0, Unit::Sp), 25.0));
    assert!(close(metrics.compute(72.0, Unit::Pt), 192.0));
}

#[test]
fn test_compute_actual_applies_scale() {
    let mut metrics = DeviceMetrics::default();
    metrics.set_scale(2.0);
    assert_eq!(metrics.compute_actual(10.0, Unit::Dip), 20);
    metrics.set_scale(100.0);
    assert_eq!(metrics.compute_actual(1.0, Unit::Px), 5);
}
