//! Rasterization of geometric primitives and point markers.
//!
//! # Algorithms
//!
//! - **Wu's anti-aliased line**: smooth line rendering with sub-pixel accuracy
//! - **Bresenham's line**: fast non-antialiased line drawing
//! - **Midpoint circle**: filled and outlined circle rendering
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;

pub use primitives::{
    draw_circle, draw_circle_outline, draw_cross, draw_diamond, draw_line, draw_line_aa,
    draw_point, draw_rect, draw_rect_outline, draw_triangle, draw_x_mark,
};
