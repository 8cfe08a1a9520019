//! Geometries: the drawing mode applied to mapped records.

use super::aes::Mapping;

/// Marker glyphs for the point geometry.
///
/// When the shape channel is mapped to a column, its levels cycle through
/// these glyphs in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointShape {
    /// Filled circle.
    #[default]
    Circle,
    /// Filled square.
    Square,
    /// Filled triangle.
    Triangle,
    /// Filled diamond.
    Diamond,
    /// Cross (+).
    Cross,
    /// X glyph.
    X,
}

impl PointShape {
    /// Glyph cycle used by the shape channel.
    pub const CYCLE: [PointShape; 6] = [
        PointShape::Circle,
        PointShape::Square,
        PointShape::Triangle,
        PointShape::Diamond,
        PointShape::Cross,
        PointShape::X,
    ];
}

/// Trend smoothing method for the smooth geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmoothMethod {
    /// Ordinary least-squares line.
    Linear,
    /// Centered rolling mean over a window of records.
    Rolling {
        /// Window width in records.
        window: usize,
    },
}

impl Default for SmoothMethod {
    fn default() -> Self {
        SmoothMethod::Linear
    }
}

/// Geometry kind: how mapped records are drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum GeomKind {
    /// One marker per record.
    Point {
        /// Default marker glyph (overridden by a mapped shape channel).
        shape: PointShape,
    },
    /// Records connected in x order.
    Line {
        /// Line width in pixels.
        width: f32,
    },
    /// One bar per record, rising from the zero baseline.
    Bar {
        /// Bar width as a fraction (0-1) of the per-record slot.
        width: f32,
    },
    /// Filled region between the zero baseline and the records.
    Area {
        /// Fill opacity (0-1).
        alpha: f32,
    },
    /// One filled cell per record (heatmap-style).
    Tile,
    /// Fitted trend over the records.
    Smooth {
        /// Smoothing method.
        method: SmoothMethod,
    },
}

/// A geometry layer specification.
#[derive(Debug, Clone)]
pub struct Geom {
    /// The geometry kind.
    pub kind: GeomKind,
    /// Layer-specific aesthetic overrides.
    pub mapping: Option<Mapping>,
}

impl Geom {
    /// Point geometry.
    #[must_use]
    pub fn point() -> Self {
        Self {
            kind: GeomKind::Point {
                shape: PointShape::Circle,
            },
            mapping: None,
        }
    }

    /// Line geometry.
    #[must_use]
    pub fn line() -> Self {
        Self {
            kind: GeomKind::Line { width: 1.0 },
            mapping: None,
        }
    }

    /// Bar geometry.
    #[must_use]
    pub fn bar() -> Self {
        Self {
            kind: GeomKind::Bar { width: 0.8 },
            mapping: None,
        }
    }

    /// Area geometry.
    #[must_use]
    pub fn area() -> Self {
        Self {
            kind: GeomKind::Area { alpha: 0.3 },
            mapping: None,
        }
    }

    /// Tile geometry.
    #[must_use]
    pub fn tile() -> Self {
        Self {
            kind: GeomKind::Tile,
            mapping: None,
        }
    }

    /// Smoothed-trend geometry (least-squares by default).
    #[must_use]
    pub fn smooth() -> Self {
        Self {
            kind: GeomKind::Smooth {
                method: SmoothMethod::Linear,
            },
            mapping: None,
        }
    }

    /// Set the default marker glyph of a point geometry.
    #[must_use]
    pub fn shape(mut self, shape: PointShape) -> Self {
        if let GeomKind::Point { shape: ref mut s } = self.kind {
            *s = shape;
        }
        self
    }

    /// Set the line width or bar width fraction.
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        match &mut self.kind {
            GeomKind::Line { width: ref mut w } => *w = width.max(0.0),
            GeomKind::Bar { width: ref mut w } => *w = width.clamp(0.0, 1.0),
            _ => {}
        }
        self
    }

    /// Set the fill opacity of an area geometry.
    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        if let GeomKind::Area { alpha: ref mut a } = self.kind {
            *a = alpha.clamp(0.0, 1.0);
        }
        self
    }

    /// Set the smoothing method of a smooth geometry.
    #[must_use]
    pub fn method(mut self, method: SmoothMethod) -> Self {
        if let GeomKind::Smooth {
            method: ref mut m, ..
        } = self.kind
        {
            *m = method;
        }
        self
    }

    /// Add layer-specific aesthetic overrides.
    #[must_use]
    pub fn mapping(mut self, mapping: Mapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    /// Whether this geometry needs both positional channels mapped.
    ///
    /// Every current kind does; the method exists so validation reads
    /// against the geometry rather than assuming.
    #[must_use]
    pub fn requires_xy(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geom_point_shape() {
        let g = Geom::point().shape(PointShape::Square);
        match g.kind {
            GeomKind::Point { shape } => assert_eq!(shape, PointShape::Square),
            _ => panic!("Expected point geom"),
        }
    }

    #[test]
    fn test_geom_line_width() {
        let g = Geom::line().width(2.5);
        match g.kind {
            GeomKind::Line { width } => assert!((width - 2.5).abs() < 0.01),
            _ => panic!("Expected line geom"),
        }
    }

    #[test]
    fn test_geom_bar_width_clamped() {
        let g = Geom::bar().width(1.7);
        match g.kind {
            GeomKind::Bar { width } => assert!((width - 1.0).abs() < 0.01),
            _ => panic!("Expected bar geom"),
        }
    }

    #[test]
    fn test_geom_area_alpha() {
        let g = Geom::area().alpha(0.5);
        match g.kind {
            GeomKind::Area { alpha } => assert!((alpha - 0.5).abs() < 0.01),
            _ => panic!("Expected area geom"),
        }
    }

    #[test]
    fn test_geom_smooth_method() {
        let g = Geom::smooth().method(SmoothMethod::Rolling { window: 5 });
        match g.kind {
            GeomKind::Smooth { method } => {
                assert_eq!(method, SmoothMethod::Rolling { window: 5 });
            }
            _ => panic!("Expected smooth geom"),
        }
    }

    #[test]
    fn test_shape_ignored_on_non_point() {
        let g = Geom::line().shape(PointShape::Diamond);
        assert!(matches!(g.kind, GeomKind::Line { .. }));
    }

    #[test]
    fn test_geom_with_mapping() {
        let g = Geom::point().mapping(Mapping::new().color("category"));
        assert!(g.mapping.is_some());
        assert_eq!(g.mapping.unwrap().color, Some("category".to_string()));
    }

    #[test]
    fn test_all_geoms_require_xy() {
        for g in [
            Geom::point(),
            Geom::line(),
            Geom::bar(),
            Geom::area(),
            Geom::tile(),
            Geom::smooth(),
        ] {
            assert!(g.requires_xy());
        }
    }

    #[test]
    fn test_shape_cycle_is_distinct() {
        let mut seen = Vec::new();
        for shape in PointShape::CYCLE {
            assert!(!seen.contains(&shape));
            seen.push(shape);
        }
    }
}
