//! Scale functions for data-to-visual mappings.
//!
//! Scales carry a data-space domain to a visual-space range: positions to
//! pixels, numeric values to gradient colors, size values to marker radii.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Axis transform applied to a positional channel before scaling.
///
/// This is the per-channel scale transform of a chart request: data values
/// pass through the transform, then through a linear scale in transformed
/// space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transform {
    /// Untransformed values.
    #[default]
    Identity,
    /// Base-10 logarithm. Requires a strictly positive extent.
    Log10,
}

impl Transform {
    /// Apply the transform to a single value.
    #[must_use]
    pub fn apply(self, value: f32) -> f32 {
        match self {
            Transform::Identity => value,
            Transform::Log10 => value.max(f32::MIN_POSITIVE).log10(),
        }
    }

    /// Validate a data extent against the transform's domain.
    ///
    /// # Errors
    ///
    /// Returns `ScaleDomain` if a log transform is applied to an extent
    /// containing non-positive values.
    pub fn check_extent(self, extent: (f32, f32)) -> Result<()> {
        if self == Transform::Log10 && extent.0 <= 0.0 {
            return Err(Error::ScaleDomain(format!(
                "log10 transform requires positive values, extent starts at {}",
                extent.0
            )));
        }
        Ok(())
    }
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain min and max are equal.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain(
                "domain min and max cannot be equal".to_string(),
            ));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Create a scale over a domain that may be degenerate.
    ///
    /// A single-valued domain is widened by one unit on each side, so a
    /// dataset with one record (or all-equal values) still renders.
    #[must_use]
    pub fn padded(domain: (f32, f32), range: (f32, f32)) -> Self {
        let (mut min, mut max) = domain;
        if min >= max {
            min -= 1.0;
            max += 1.0;
        }
        Self {
            domain_min: min,
            domain_max: max,
            range_min: range.0,
            range_max: range.1,
        }
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f32) -> f32 {
        let t = (value - self.range_min) / (self.range_max - self.range_min);
        self.domain_min + t * (self.domain_max - self.domain_min)
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Logarithmic scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LogScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
    base: f32,
}

impl LogScale {
    /// Create a new logarithmic scale with base 10.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain contains non-positive values.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        Self::with_base(domain, range, 10.0)
    }

    /// Create a logarithmic scale with a custom base.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain contains non-positive values or the
    /// base is invalid.
    pub fn with_base(domain: (f32, f32), range: (f32, f32), base: f32) -> Result<Self> {
        if domain.0 <= 0.0 || domain.1 <= 0.0 {
            return Err(Error::ScaleDomain(
                "log scale domain must be positive".to_string(),
            ));
        }

        if base <= 0.0 || base == 1.0 {
            return Err(Error::ScaleDomain(
                "log scale base must be positive and not 1".to_string(),
            ));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
            base,
        })
    }
}

impl Scale<f32, f32> for LogScale {
    fn scale(&self, value: f32) -> f32 {
        let log_base = self.base.ln();
        let log_min = self.domain_min.ln() / log_base;
        let log_max = self.domain_max.ln() / log_base;
        let log_val = value.max(f32::MIN_POSITIVE).ln() / log_base;

        let t = (log_val - log_min) / (log_max - log_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Gradient color scale for ordered (continuous) encodings.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Create a new color scale from gradient stops.
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty or the domain is degenerate.
    pub fn new(colors: Vec<Rgba>, domain: (f32, f32)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain(
                "color scale requires at least one color".to_string(),
            ));
        }

        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain(
                "domain min and max cannot be equal".to_string(),
            ));
        }

        Ok(Self {
            colors,
            domain_min: domain.0,
            domain_max: domain.1,
        })
    }

    /// Viridis gradient (perceptually uniform).
    #[must_use]
    pub fn viridis(domain: (f32, f32)) -> Option<Self> {
        Self::new(
            vec![
                Rgba::rgb(68, 1, 84),
                Rgba::rgb(59, 82, 139),
                Rgba::rgb(33, 145, 140),
                Rgba::rgb(94, 201, 98),
                Rgba::rgb(253, 231, 37),
            ],
            domain,
        )
        .ok()
    }

    /// Sequential blues gradient.
    #[must_use]
    pub fn blues(domain: (f32, f32)) -> Option<Self> {
        Self::new(
            vec![
                Rgba::rgb(247, 251, 255),
                Rgba::rgb(198, 219, 239),
                Rgba::rgb(107, 174, 214),
                Rgba::rgb(33, 113, 181),
                Rgba::rgb(8, 48, 107),
            ],
            domain,
        )
        .ok()
    }

    /// Diverging red-blue gradient.
    #[must_use]
    pub fn red_blue(domain: (f32, f32)) -> Option<Self> {
        Self::new(
            vec![
                Rgba::rgb(178, 24, 43),
                Rgba::rgb(239, 138, 98),
                Rgba::rgb(247, 247, 247),
                Rgba::rgb(103, 169, 207),
                Rgba::rgb(33, 102, 172),
            ],
            domain,
        )
        .ok()
    }

    /// Greyscale gradient.
    #[must_use]
    pub fn greyscale(domain: (f32, f32)) -> Option<Self> {
        Self::new(vec![Rgba::BLACK, Rgba::WHITE], domain).ok()
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let segment_count = self.colors.len() - 1;
        let segment = (t * segment_count as f32).floor() as usize;
        let segment = segment.min(segment_count - 1);

        let local_t = t * segment_count as f32 - segment as f32;

        self.colors[segment].lerp(self.colors[segment + 1], local_t)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (
            *self.colors.first().unwrap_or(&Rgba::BLACK),
            *self.colors.last().unwrap_or(&Rgba::WHITE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("valid scale");
        assert!((scale.scale(0.0) - 0.0).abs() < 0.001);
        assert!((scale.scale(50.0) - 0.5).abs() < 0.001);
        assert!((scale.scale(100.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_scale_invert() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("valid scale");
        assert!((scale.invert(0.5) - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_scale_equal_domain_error() {
        assert!(LinearScale::new((5.0, 5.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_linear_scale_padded_degenerate() {
        let scale = LinearScale::padded((5.0, 5.0), (0.0, 100.0));
        assert_eq!(scale.domain(), (4.0, 6.0));
        // The single value lands at the middle of the range
        assert!((scale.scale(5.0) - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_scale_padded_normal() {
        let scale = LinearScale::padded((0.0, 10.0), (0.0, 1.0));
        assert_eq!(scale.domain(), (0.0, 10.0));
    }

    #[test]
    fn test_log_scale() {
        let scale = LogScale::new((1.0, 1000.0), (0.0, 3.0)).expect("valid scale");
        assert!((scale.scale(1.0) - 0.0).abs() < 0.001);
        assert!((scale.scale(10.0) - 1.0).abs() < 0.001);
        assert!((scale.scale(100.0) - 2.0).abs() < 0.001);
        assert!((scale.scale(1000.0) - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_log_scale_invalid_domain() {
        assert!(LogScale::new((-1.0, 100.0), (0.0, 1.0)).is_err());
        assert!(LogScale::new((0.0, 100.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_log_scale_invalid_base() {
        assert!(LogScale::with_base((1.0, 100.0), (0.0, 1.0), -1.0).is_err());
        assert!(LogScale::with_base((1.0, 100.0), (0.0, 1.0), 0.0).is_err());
        assert!(LogScale::with_base((1.0, 100.0), (0.0, 1.0), 1.0).is_err());
    }

    #[test]
    fn test_transform_identity() {
        assert!((Transform::Identity.apply(42.0) - 42.0).abs() < 0.001);
        assert!(Transform::Identity.check_extent((-5.0, 5.0)).is_ok());
    }

    #[test]
    fn test_transform_log10() {
        assert!((Transform::Log10.apply(100.0) - 2.0).abs() < 0.001);
        assert!((Transform::Log10.apply(1.0) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_transform_log10_rejects_non_positive_extent() {
        assert!(Transform::Log10.check_extent((0.0, 10.0)).is_err());
        assert!(Transform::Log10.check_extent((-1.0, 10.0)).is_err());
        assert!(Transform::Log10.check_extent((0.5, 10.0)).is_ok());
    }

    #[test]
    fn test_color_scale() {
        let scale = ColorScale::new(vec![Rgba::BLACK, Rgba::WHITE], (0.0, 1.0)).expect("valid");

        let mid = scale.scale(0.5);
        assert!(mid.r > 100 && mid.r < 150);
    }

    #[test]
    fn test_color_scale_clamping() {
        let scale = ColorScale::new(vec![Rgba::BLACK, Rgba::WHITE], (0.0, 1.0)).expect("valid");
        assert_eq!(scale.scale(-1.0), Rgba::BLACK);
        assert_eq!(scale.scale(2.0), Rgba::WHITE);
    }

    #[test]
    fn test_color_scale_single_color() {
        let scale = ColorScale::new(vec![Rgba::RED], (0.0, 1.0)).expect("valid");
        assert_eq!(scale.scale(0.5), Rgba::RED);
    }

    #[test]
    fn test_color_scale_invalid() {
        assert!(ColorScale::new(vec![], (0.0, 1.0)).is_err());
        assert!(ColorScale::new(vec![Rgba::RED, Rgba::BLUE], (5.0, 5.0)).is_err());
    }

    #[test]
    fn test_color_scale_gradients() {
        for scale in [
            ColorScale::viridis((0.0, 1.0)),
            ColorScale::blues((0.0, 1.0)),
            ColorScale::red_blue((0.0, 1.0)),
            ColorScale::greyscale((0.0, 1.0)),
        ] {
            let scale = scale.expect("gradient should build");
            let low = scale.scale(0.0);
            let high = scale.scale(1.0);
            assert_ne!(low, high);
        }
    }

    #[test]
    fn test_color_scale_gradient_degenerate_domain() {
        assert!(ColorScale::viridis((5.0, 5.0)).is_none());
    }

    #[test]
    fn test_scale_domain_range_accessors() {
        let scale = LinearScale::new((10.0, 20.0), (100.0, 200.0)).expect("valid scale");
        assert_eq!(scale.domain(), (10.0, 20.0));
        assert_eq!(scale.range(), (100.0, 200.0));
    }
}
