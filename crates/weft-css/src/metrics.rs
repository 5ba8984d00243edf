//! Device metrics: how physical units map to pixels.

use serde::{Deserialize, Serialize};

use crate::values::Unit;

/// Lowest accepted display scale.
pub const MIN_SCALE: f32 = 0.5;
/// Highest accepted display scale.
pub const MAX_SCALE: f32 = 5.0;

/// Reference resolution at which one dip equals one pixel.
const BASE_DPI: f32 = 96.0;

/// Preset densities, relative to the current DPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DensityLevel {
    /// 0.75x.
    Small,
    /// 1x.
    #[default]
    Normal,
    /// 1.25x.
    Large,
    /// 1.5x.
    Big,
}

impl DensityLevel {
    const fn factor(self) -> f32 {
        match self {
            Self::Small => 0.75,
            Self::Normal => 1.0,
            Self::Large => 1.25,
            Self::Big => 1.5,
        }
    }
}

/// Display metrics used to turn `dip`, `sp` and `pt` lengths into pixels.
///
/// Hosts usually deserialize this from their configuration file; missing
/// fields take the 96 DPI defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceMetrics {
    /// Dots per inch.
    pub dpi: f32,
    /// Multiplier for `dip` lengths.
    pub density: f32,
    /// Multiplier for `sp` lengths.
    pub scaled_density: f32,
    /// Final scale applied when converting to device pixels.
    pub scale: f32,
}

impl Default for DeviceMetrics {
    fn default() -> Self {
        Self {
            dpi: BASE_DPI,
            density: 1.0,
            scaled_density: 1.0,
            scale: 1.0,
        }
    }
}

impl DeviceMetrics {
    /// Metrics for a display of the given DPI, at normal densities.
    #[must_use]
    pub fn with_dpi(dpi: f32) -> Self {
        let mut metrics = Self::default();
        metrics.set_dpi(dpi);
        metrics
    }

    fn density_for(&self, level: DensityLevel) -> f32 {
        self.dpi / BASE_DPI * level.factor()
    }

    /// Change the DPI. Both densities are reset to [`DensityLevel::Normal`].
    pub fn set_dpi(&mut self, dpi: f32) {
        self.dpi = dpi;
        self.set_density_level(DensityLevel::Normal);
        self.set_scaled_density_level(DensityLevel::Normal);
    }

    /// Set the `dip` multiplier from a preset.
    pub fn set_density_level(&mut self, level: DensityLevel) {
        self.density = self.density_for(level);
    }

    /// Set the `sp` multiplier from a preset.
    pub fn set_scaled_density_level(&mut self, level: DensityLevel) {
        self.scaled_density = self.density_for(level);
    }

    /// Set the display scale, clamped to [`MIN_SCALE`]..=[`MAX_SCALE`].
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    /// `value` in pixels, or `None` for units that need a reference size.
    #[must_use]
    pub fn to_px(&self, value: f32, unit: Unit) -> Option<f32> {
        match unit {
            Unit::Px => Some(value),
            Unit::Dip => Some(value * self.density),
            Unit::Sp => Some(value * self.scaled_density),
            Unit::Pt => Some(value * self.dpi / 72.0),
            Unit::Percent => None,
        }
    }

    /// `value` in pixels; zero for units that need a reference size.
    #[must_use]
    pub fn compute(&self, value: f32, unit: Unit) -> f32 {
        self.to_px(value, unit).unwrap_or(0.0)
    }

    /// `value` in device pixels, after scaling and rounding.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn compute_actual(&self, value: f32, unit: Unit) -> i32 {
        (self.compute(value, unit) * self.scale).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_levels_follow_dpi() {
        let mut metrics = DeviceMetrics::with_dpi(192.0);
        assert!((metrics.density - 2.0).abs() < 1e-6);
        metrics.set_scaled_density_level(DensityLevel::Big);
        assert!((metrics.scaled_density - 3.0).abs() < 1e-6);
        metrics.set_dpi(96.0);
        assert!((metrics.scaled_density - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut metrics = DeviceMetrics::default();
        metrics.set_scale(10.0);
        assert!((metrics.scale - MAX_SCALE).abs() < 1e-6);
        metrics.set_scale(0.1);
        assert!((metrics.scale - MIN_SCALE).abs() < 1e-6);
    }

    #[test]
    fn test_compute_actual_rounds() {
        let mut metrics = DeviceMetrics::default();
        metrics.set_scale(1.5);
        assert_eq!(metrics.compute_actual(3.0, Unit::Px), 5);
        assert_eq!(metrics.compute_actual(50.0, Unit::Percent), 0);
    }
}
