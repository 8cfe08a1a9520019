//! # Grafica
//!
//! Declarative chart renderer mapping tabular data to 2D graphics.
//!
//! A chart is specified as data plus an aesthetic mapping plus a geometry:
//! the dataset's columns are bound to visual channels (position, color,
//! shape, size), a drawing mode is chosen, and the renderer produces a
//! raster (PNG) or vector (SVG) image. Faceting splits one chart into a
//! grid or wrapped sequence of panels by categorical keys.
//!
//! Rendering is a pure function of the chart specification: identical
//! inputs produce byte-identical output, and independent renders share no
//! state.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use grafica::prelude::*;
//!
//! let mut data = Dataset::new();
//! data.add_numeric("weight", &[2.6, 2.9, 2.3, 3.2, 3.4]);
//! data.add_numeric("mileage", &[21.0, 21.0, 22.8, 21.4, 18.7]);
//! data.add_categorical("drivetrain", &["manual", "manual", "auto", "auto", "auto"]);
//!
//! let chart = Chart::new()
//!     .data(data)
//!     .mapping(Mapping::new().x("weight").y("mileage").color("drivetrain"))
//!     .geom(Geom::point())
//!     .facet(Facet::wrap("drivetrain"))
//!     .build()?;
//!
//! chart.render_to_file("mileage.png")?;
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize/Deserialize derives for the chart-spec value types

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and palettes.
pub mod color;

/// RGBA pixel buffer for raster rendering.
pub mod framebuffer;

/// Geometric primitives (points, lines, rectangles, panel grids).
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

// ============================================================================
// Chart Modules
// ============================================================================

/// Declarative chart specification and rendering pipeline.
pub mod chart;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization of primitives and point markers.
pub mod render;

/// Output encoders (PNG, SVG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for grafica operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use grafica::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chart::{
        BuiltChart, Channel, Chart, Dataset, Facet, FieldKind, Geom, Layer, Mapping, PointShape,
        SmoothMethod, Theme, Value,
    };
    pub use crate::color::{Hsla, Palette, Rgba};
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Line, Point, Rect};
    pub use crate::output::{PngEncoder, SvgEncoder};
    pub use crate::scale::{ColorScale, LinearScale, LogScale, Scale, Transform};
    pub use batuta_common::display::WithDimensions;
}
