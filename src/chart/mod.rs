//! Declarative chart specification and rendering pipeline.
//!
//! A chart request is assembled from independent parts:
//!
//! - **Dataset**: fixed-schema tabular records
//! - **Mapping**: data columns bound to visual channels (x, y, color,
//!   shape, size)
//! - **Geometry**: the drawing mode (point, line, bar, area, tile, smooth)
//! - **Facet**: optional partitioning into a panel grid or wrapped sequence
//! - **Theme**: non-data appearance
//!
//! # Example
//!
//! ```rust
//! use grafica::chart::{Chart, Dataset, Geom, Mapping};
//!
//! let mut data = Dataset::new();
//! data.add_numeric("weight", &[2.6, 2.9, 2.3, 3.2, 3.4]);
//! data.add_numeric("mileage", &[21.0, 21.0, 22.8, 21.4, 18.7]);
//!
//! let chart = Chart::new()
//!     .data(data)
//!     .mapping(Mapping::new().x("weight").y("mileage"))
//!     .geom(Geom::point())
//!     .build()
//!     .unwrap();
//!
//! let image = chart.to_framebuffer().unwrap();
//! assert_eq!(image.width(), 800);
//! ```

mod aes;
mod data;
mod facet;
mod geom;
mod plot;
mod stat;
mod theme;

pub use aes::{Channel, Mapping};
pub use data::{Dataset, FieldKind, Value};
pub use facet::{Facet, FacetLayout, FacetPanel};
pub use geom::{Geom, GeomKind, PointShape, SmoothMethod};
pub use plot::{BuiltChart, Chart, Layer};
pub use theme::Theme;
