//! Theme system: the non-data appearance of a chart.
//!
//! Themes control background, grid, axis, and panel chrome. The void theme
//! strips every non-data element for maximally ink-efficient output.

use crate::color::Rgba;

/// Theme specification.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color.
    pub background: Rgba,
    /// Panel background color.
    pub panel_background: Rgba,
    /// Grid line color.
    pub grid_color: Rgba,
    /// Axis line color.
    pub axis_color: Rgba,
    /// Text color (used by vector output).
    pub text_color: Rgba,
    /// Facet strip background color.
    pub strip_background: Rgba,
    /// Show grid lines.
    pub show_grid: bool,
    /// Show axis lines.
    pub show_axis: bool,
    /// Show panel border.
    pub show_panel_border: bool,
    /// Margin around the plotting area in pixels.
    pub margin: u32,
    /// Gap between facet panels in pixels.
    pub panel_spacing: u32,
    /// Height of the facet strip above each panel in pixels.
    pub strip_height: u32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::grey()
    }
}

impl Theme {
    /// Grey theme (grey panel, white grid).
    #[must_use]
    pub fn grey() -> Self {
        Self {
            background: Rgba::WHITE,
            panel_background: Rgba::rgb(235, 235, 235),
            grid_color: Rgba::WHITE,
            axis_color: Rgba::rgb(50, 50, 50),
            text_color: Rgba::rgb(50, 50, 50),
            strip_background: Rgba::rgb(217, 217, 217),
            show_grid: true,
            show_axis: true,
            show_panel_border: false,
            margin: 40,
            panel_spacing: 12,
            strip_height: 18,
        }
    }

    /// Minimal theme with white background.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            background: Rgba::WHITE,
            panel_background: Rgba::WHITE,
            grid_color: Rgba::rgb(220, 220, 220),
            axis_color: Rgba::rgb(100, 100, 100),
            text_color: Rgba::BLACK,
            strip_background: Rgba::rgb(240, 240, 240),
            show_grid: true,
            show_axis: true,
            show_panel_border: false,
            margin: 40,
            panel_spacing: 12,
            strip_height: 18,
        }
    }

    /// Black and white theme with panel borders.
    #[must_use]
    pub fn bw() -> Self {
        Self {
            background: Rgba::WHITE,
            panel_background: Rgba::WHITE,
            grid_color: Rgba::rgb(200, 200, 200),
            axis_color: Rgba::BLACK,
            text_color: Rgba::BLACK,
            strip_background: Rgba::rgb(229, 229, 229),
            show_grid: true,
            show_axis: true,
            show_panel_border: true,
            margin: 40,
            panel_spacing: 12,
            strip_height: 18,
        }
    }

    /// Dark theme.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: Rgba::rgb(30, 30, 30),
            panel_background: Rgba::rgb(40, 40, 40),
            grid_color: Rgba::rgb(60, 60, 60),
            axis_color: Rgba::rgb(180, 180, 180),
            text_color: Rgba::rgb(220, 220, 220),
            strip_background: Rgba::rgb(55, 55, 55),
            show_grid: true,
            show_axis: true,
            show_panel_border: false,
            margin: 40,
            panel_spacing: 12,
            strip_height: 18,
        }
    }

    /// Void theme: nothing but data marks.
    #[must_use]
    pub fn void() -> Self {
        Self {
            background: Rgba::WHITE,
            panel_background: Rgba::WHITE,
            grid_color: Rgba::WHITE,
            axis_color: Rgba::WHITE,
            text_color: Rgba::WHITE,
            strip_background: Rgba::WHITE,
            show_grid: false,
            show_axis: false,
            show_panel_border: false,
            margin: 10,
            panel_spacing: 6,
            strip_height: 0,
        }
    }

    /// Set the background color.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Set the panel background color.
    #[must_use]
    pub fn panel_background(mut self, color: Rgba) -> Self {
        self.panel_background = color;
        self
    }

    /// Set the grid color.
    #[must_use]
    pub fn grid_color(mut self, color: Rgba) -> Self {
        self.grid_color = color;
        self
    }

    /// Set the margin.
    #[must_use]
    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the gap between facet panels.
    #[must_use]
    pub fn panel_spacing(mut self, spacing: u32) -> Self {
        self.panel_spacing = spacing;
        self
    }

    /// Enable or disable grid lines.
    #[must_use]
    pub fn grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Enable or disable axis lines.
    #[must_use]
    pub fn axis(mut self, show: bool) -> Self {
        self.show_axis = show;
        self
    }
}
