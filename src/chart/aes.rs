//! Aesthetic mappings: data columns bound to visual channels.

use crate::color::Rgba;
use std::fmt;

/// A visual channel that a data column can be mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Mark color.
    Color,
    /// Marker shape.
    Shape,
    /// Marker size.
    Size,
    /// Panel assignment.
    Facet,
}

impl Channel {
    /// Whether the channel requires a numeric column.
    #[must_use]
    pub fn requires_numeric(self) -> bool {
        matches!(self, Channel::X | Channel::Y | Channel::Size)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::X => "x",
            Channel::Y => "y",
            Channel::Color => "color",
            Channel::Shape => "shape",
            Channel::Size => "size",
            Channel::Facet => "facet",
        };
        f.write_str(name)
    }
}

/// Aesthetic mapping specification.
///
/// Binds dataset columns to channels, with fixed (non-data) fallbacks for
/// color, size, and opacity. Facet keys are specified separately on the
/// chart's facet spec.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    /// X position column.
    pub x: Option<String>,
    /// Y position column.
    pub y: Option<String>,
    /// Color column.
    pub color: Option<String>,
    /// Shape column.
    pub shape: Option<String>,
    /// Size column.
    pub size: Option<String>,

    // Fixed values (not data-mapped)
    /// Fixed color value.
    pub color_value: Option<Rgba>,
    /// Fixed marker size value.
    pub size_value: Option<f32>,
    /// Fixed opacity value.
    pub alpha_value: Option<f32>,
}

impl Mapping {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map x position to a column.
    #[must_use]
    pub fn x(mut self, column: &str) -> Self {
        self.x = Some(column.to_string());
        self
    }

    /// Map y position to a column.
    #[must_use]
    pub fn y(mut self, column: &str) -> Self {
        self.y = Some(column.to_string());
        self
    }

    /// Map color to a column.
    #[must_use]
    pub fn color(mut self, column: &str) -> Self {
        self.color = Some(column.to_string());
        self
    }

    /// Map marker shape to a column.
    #[must_use]
    pub fn shape(mut self, column: &str) -> Self {
        self.shape = Some(column.to_string());
        self
    }

    /// Map marker size to a column.
    #[must_use]
    pub fn size(mut self, column: &str) -> Self {
        self.size = Some(column.to_string());
        self
    }

    /// Set a fixed color value.
    #[must_use]
    pub fn color_value(mut self, color: Rgba) -> Self {
        self.color_value = Some(color);
        self
    }

    /// Set a fixed marker size value.
    #[must_use]
    pub fn size_value(mut self, size: f32) -> Self {
        self.size_value = Some(size);
        self
    }

    /// Set a fixed opacity value.
    #[must_use]
    pub fn alpha_value(mut self, alpha: f32) -> Self {
        self.alpha_value = Some(alpha.clamp(0.0, 1.0));
        self
    }

    /// Column mapped to a channel, if any. Facet keys are not carried here.
    #[must_use]
    pub fn column(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::X => self.x.as_deref(),
            Channel::Y => self.y.as_deref(),
            Channel::Color => self.color.as_deref(),
            Channel::Shape => self.shape.as_deref(),
            Channel::Size => self.size.as_deref(),
            Channel::Facet => None,
        }
    }

    /// All data-mapped (channel, column) pairs.
    #[must_use]
    pub fn bindings(&self) -> Vec<(Channel, &str)> {
        [
            Channel::X,
            Channel::Y,
            Channel::Color,
            Channel::Shape,
            Channel::Size,
        ]
        .into_iter()
        .filter_map(|ch| self.column(ch).map(|col| (ch, col)))
        .collect()
    }

    /// Merge another mapping over this one; `other` takes precedence.
    #[must_use]
    pub fn merge(&self, other: &Mapping) -> Mapping {
        Mapping {
            x: other.x.clone().or_else(|| self.x.clone()),
            y: other.y.clone().or_else(|| self.y.clone()),
            color: other.color.clone().or_else(|| self.color.clone()),
            shape: other.shape.clone().or_else(|| self.shape.clone()),
            size: other.size.clone().or_else(|| self.size.clone()),
            color_value: other.color_value.or(self.color_value),
            size_value: other.size_value.or(self.size_value),
            alpha_value: other.alpha_value.or(self.alpha_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_builder() {
        let mapping = Mapping::new()
            .x("weight")
            .y("mileage")
            .color("drivetrain")
            .size_value(5.0);

        assert_eq!(mapping.x, Some("weight".to_string()));
        assert_eq!(mapping.y, Some("mileage".to_string()));
        assert_eq!(mapping.color, Some("drivetrain".to_string()));
        assert_eq!(mapping.size_value, Some(5.0));
    }

    #[test]
    fn test_mapping_merge() {
        let base = Mapping::new().x("x").y("y").color_value(Rgba::RED);
        let layer = Mapping::new().y("y2").size_value(3.0);

        let merged = base.merge(&layer);
        assert_eq!(merged.x, Some("x".to_string()));
        assert_eq!(merged.y, Some("y2".to_string()));
        assert_eq!(merged.color_value, Some(Rgba::RED));
        assert_eq!(merged.size_value, Some(3.0));
    }

    #[test]
    fn test_mapping_column_lookup() {
        let mapping = Mapping::new().x("a").shape("b");
        assert_eq!(mapping.column(Channel::X), Some("a"));
        assert_eq!(mapping.column(Channel::Shape), Some("b"));
        assert_eq!(mapping.column(Channel::Color), None);
        assert_eq!(mapping.column(Channel::Facet), None);
    }

    #[test]
    fn test_mapping_bindings() {
        let mapping = Mapping::new().x("a").y("b").size("c");
        let bindings = mapping.bindings();
        assert_eq!(
            bindings,
            vec![(Channel::X, "a"), (Channel::Y, "b"), (Channel::Size, "c")]
        );
    }

    #[test]
    fn test_alpha_value_clamped() {
        assert_eq!(Mapping::new().alpha_value(1.5).alpha_value, Some(1.0));
        assert_eq!(Mapping::new().alpha_value(-0.5).alpha_value, Some(0.0));
    }

    #[test]
    fn test_channel_numeric_requirements() {
        assert!(Channel::X.requires_numeric());
        assert!(Channel::Y.requires_numeric());
        assert!(Channel::Size.requires_numeric());
        assert!(!Channel::Color.requires_numeric());
        assert!(!Channel::Shape.requires_numeric());
        assert!(!Channel::Facet.requires_numeric());
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::X.to_string(), "x");
        assert_eq!(Channel::Size.to_string(), "size");
        assert_eq!(Channel::Facet.to_string(), "facet");
    }

    #[test]
    fn test_mapping_default_is_empty() {
        let mapping = Mapping::default();
        assert!(mapping.bindings().is_empty());
        assert!(mapping.color_value.is_none());
    }
}
