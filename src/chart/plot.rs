//! Chart builder and renderer.
//!
//! A [`Chart`] collects a dataset, an aesthetic mapping, geometry layers,
//! an optional facet spec, and theme/transform options. [`Chart::build`]
//! validates the request against the dataset schema and produces a
//! [`BuiltChart`], whose render operations are pure functions of the built
//! state: identical inputs produce byte-identical output.

use super::aes::{Channel, Mapping};
use super::data::{Dataset, FieldKind, Value};
use super::facet::{Facet, FacetLayout, FacetPanel};
use super::geom::{Geom, GeomKind, PointShape, SmoothMethod};
use super::stat;
use super::theme::Theme;
use crate::color::{Palette, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::output::{PngEncoder, SvgElement, SvgEncoder, TextAnchor};
use crate::render::{
    draw_circle, draw_cross, draw_diamond, draw_line_aa, draw_rect, draw_rect_outline,
    draw_triangle, draw_x_mark,
};
use crate::scale::{ColorScale, LinearScale, Scale, Transform};
use std::path::Path;

/// Default mark color when neither the color channel nor a fixed color is
/// set.
const DEFAULT_COLOR: Rgba = Rgba::new(66, 133, 244, 255);

/// Default marker diameter in pixels.
const DEFAULT_MARKER_SIZE: f32 = 5.0;

/// Marker diameter range for the size channel.
const SIZE_RANGE: (f32, f32) = (4.0, 14.0);

/// A geometry layer bound to its aesthetic overrides.
#[derive(Debug, Clone)]
pub struct Layer {
    /// The geometry.
    pub geom: Geom,
    /// Layer aesthetics, merged over the chart mapping at render time.
    pub mapping: Mapping,
}

impl Layer {
    /// Create a layer from a geometry, adopting its attached mapping.
    #[must_use]
    pub fn new(geom: Geom) -> Self {
        Self {
            mapping: geom.mapping.clone().unwrap_or_default(),
            geom,
        }
    }
}

/// Declarative chart builder.
#[derive(Debug, Clone)]
pub struct Chart {
    data: Dataset,
    mapping: Mapping,
    layers: Vec<Layer>,
    facet: Facet,
    theme: Theme,
    width: u32,
    height: u32,
    title: Option<String>,
    xlab: Option<String>,
    ylab: Option<String>,
    x_transform: Transform,
    y_transform: Transform,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    /// Create a new chart builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Dataset::new(),
            mapping: Mapping::new(),
            layers: Vec::new(),
            facet: Facet::None,
            theme: Theme::grey(),
            width: 800,
            height: 600,
            title: None,
            xlab: None,
            ylab: None,
            x_transform: Transform::Identity,
            y_transform: Transform::Identity,
        }
    }

    /// Set the dataset.
    #[must_use]
    pub fn data(mut self, data: Dataset) -> Self {
        self.data = data;
        self
    }

    /// Set the chart-wide aesthetic mapping.
    #[must_use]
    pub fn mapping(mut self, mapping: Mapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Add a geometry layer.
    #[must_use]
    pub fn geom(mut self, geom: Geom) -> Self {
        self.layers.push(Layer::new(geom));
        self
    }

    /// Add a prepared layer.
    #[must_use]
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Set the facet specification.
    #[must_use]
    pub fn facet(mut self, facet: Facet) -> Self {
        self.facet = facet;
        self
    }

    /// Set the theme.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set output dimensions in pixels.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the chart title (drawn by vector output).
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the x-axis label (drawn by vector output).
    #[must_use]
    pub fn xlab(mut self, label: impl Into<String>) -> Self {
        self.xlab = Some(label.into());
        self
    }

    /// Set the y-axis label (drawn by vector output).
    #[must_use]
    pub fn ylab(mut self, label: impl Into<String>) -> Self {
        self.ylab = Some(label.into());
        self
    }

    /// Set the x-axis scale transform.
    #[must_use]
    pub fn scale_x(mut self, transform: Transform) -> Self {
        self.x_transform = transform;
        self
    }

    /// Set the y-axis scale transform.
    #[must_use]
    pub fn scale_y(mut self, transform: Transform) -> Self {
        self.y_transform = transform;
        self
    }

    /// Validate the chart request and produce a renderable chart.
    ///
    /// # Errors
    ///
    /// - `Rendering` if no geometry layers were added
    /// - `EmptyDataset` if the dataset has no records
    /// - `MissingChannel` if a geometry lacks its positional mappings
    /// - `InvalidMapping` if a mapped column is absent from the schema
    /// - `TypeMismatch` if x, y, or size is mapped to a categorical column
    /// - `ScaleDomain` if an axis transform rejects the data extent
    pub fn build(self) -> Result<BuiltChart> {
        if self.layers.is_empty() {
            return Err(Error::Rendering("no geometry layers specified".into()));
        }
        if self.data.is_empty() {
            return Err(Error::EmptyDataset);
        }

        for layer in &self.layers {
            let mapping = self.mapping.merge(&layer.mapping);

            if layer.geom.requires_xy() {
                if mapping.x.is_none() {
                    return Err(Error::MissingChannel { channel: Channel::X });
                }
                if mapping.y.is_none() {
                    return Err(Error::MissingChannel { channel: Channel::Y });
                }
            }

            for (channel, column) in mapping.bindings() {
                if !self.data.has_column(column) {
                    return Err(Error::InvalidMapping {
                        channel,
                        column: column.to_string(),
                    });
                }
                if channel.requires_numeric()
                    && self.data.field_kind(column) == Some(FieldKind::Categorical)
                {
                    return Err(Error::TypeMismatch {
                        channel,
                        column: column.to_string(),
                    });
                }
            }
        }

        let layout = self.facet.partition(&self.data)?;
        let (x_domain, y_domain) = self.compute_domains()?;

        tracing::debug!(
            layers = self.layers.len(),
            panels = layout.len(),
            "chart request validated"
        );

        Ok(BuiltChart {
            data: self.data,
            mapping: self.mapping,
            layers: self.layers,
            facet: self.facet,
            layout,
            theme: self.theme,
            width: self.width,
            height: self.height,
            title: self.title,
            xlab: self.xlab,
            ylab: self.ylab,
            x_transform: self.x_transform,
            y_transform: self.y_transform,
            x_domain,
            y_domain,
        })
    }

    /// Shared positional domains across every layer, in transformed space,
    /// padded by 5% like the panel scales expect.
    fn compute_domains(&self) -> Result<((f32, f32), (f32, f32))> {
        let mut x_min = f32::MAX;
        let mut x_max = f32::MIN;
        let mut y_min = f32::MAX;
        let mut y_max = f32::MIN;
        let mut zero_baseline = false;

        for layer in &self.layers {
            let mapping = self.mapping.merge(&layer.mapping);
            if matches!(layer.geom.kind, GeomKind::Bar { .. } | GeomKind::Area { .. }) {
                zero_baseline = true;
            }

            if let Some((lo, hi)) = mapping.x.as_deref().and_then(|c| self.data.extent(c)) {
                x_min = x_min.min(lo);
                x_max = x_max.max(hi);
            }
            if let Some((lo, hi)) = mapping.y.as_deref().and_then(|c| self.data.extent(c)) {
                y_min = y_min.min(lo);
                y_max = y_max.max(hi);
            }
        }

        if x_min > x_max || y_min > y_max {
            return Err(Error::Rendering(
                "positional channels contain no finite values".into(),
            ));
        }

        // Bars and areas rise from zero; anchor the y domain there
        if zero_baseline && self.y_transform == Transform::Identity {
            y_min = y_min.min(0.0);
            y_max = y_max.max(0.0);
        }

        self.x_transform.check_extent((x_min, x_max))?;
        self.y_transform.check_extent((y_min, y_max))?;

        let x_domain = pad_domain(
            self.x_transform.apply(x_min),
            self.x_transform.apply(x_max),
        );
        let y_domain = pad_domain(
            self.y_transform.apply(y_min),
            self.y_transform.apply(y_max),
        );

        Ok((x_domain, y_domain))
    }
}

/// Widen a degenerate domain, then pad by 5% on each side.
fn pad_domain(mut min: f32, mut max: f32) -> (f32, f32) {
    if min >= max {
        min -= 1.0;
        max += 1.0;
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

impl batuta_common::display::WithDimensions for Chart {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

/// Per-record visual attributes resolved from a layer's merged mapping.
struct LayerStyle {
    row_color: Vec<Rgba>,
    row_size: Vec<f32>,
    row_shape: Vec<PointShape>,
    /// Color-level group of each record; connected geometries draw one
    /// primitive per group.
    group_of_row: Vec<usize>,
    group_colors: Vec<Rgba>,
}

/// A validated chart, ready for rendering.
#[derive(Debug)]
pub struct BuiltChart {
    data: Dataset,
    mapping: Mapping,
    layers: Vec<Layer>,
    facet: Facet,
    layout: FacetLayout,
    theme: Theme,
    width: u32,
    height: u32,
    title: Option<String>,
    xlab: Option<String>,
    ylab: Option<String>,
    x_transform: Transform,
    y_transform: Transform,
    x_domain: (f32, f32),
    y_domain: (f32, f32),
}

impl BuiltChart {
    /// The computed facet layout.
    #[must_use]
    pub fn layout(&self) -> &FacetLayout {
        &self.layout
    }

    /// The facet panels in row-major order.
    #[must_use]
    pub fn panels(&self) -> &[FacetPanel] {
        &self.layout.panels
    }

    /// Output width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Render to a raster framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the chart dimensions are invalid.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(self.theme.background);

        tracing::debug!(
            width = self.width,
            height = self.height,
            panels = self.layout.len(),
            "rasterizing chart"
        );

        let faceted = !matches!(self.facet, Facet::None);

        for panel in &self.layout.panels {
            let (strip, body) = self.panel_area(panel, faceted);
            if body.width < 1.0 || body.height < 1.0 {
                continue;
            }

            if faceted && strip.height >= 1.0 {
                draw_rect(
                    &mut fb,
                    strip.x as i32,
                    strip.y as i32,
                    strip.width as u32,
                    strip.height as u32,
                    self.theme.strip_background,
                );
            }

            draw_rect(
                &mut fb,
                body.x as i32,
                body.y as i32,
                body.width as u32,
                body.height as u32,
                self.theme.panel_background,
            );

            let x_scale = LinearScale::padded(self.x_domain, (body.x, body.right()));
            let y_scale = LinearScale::padded(self.y_domain, (body.bottom(), body.y));

            if self.theme.show_grid {
                self.draw_grid(&mut fb, &x_scale, &y_scale, body);
            }

            for layer in &self.layers {
                self.render_layer(&mut fb, layer, &panel.indices, &x_scale, &y_scale, body);
            }

            if self.theme.show_axis {
                let color = self.theme.axis_color;
                draw_line_aa(&mut fb, body.x, body.bottom(), body.right(), body.bottom(), color);
                draw_line_aa(&mut fb, body.x, body.y, body.x, body.bottom(), color);
            }

            if self.theme.show_panel_border {
                draw_rect_outline(
                    &mut fb,
                    body.x as i32,
                    body.y as i32,
                    body.width as u32,
                    body.height as u32,
                    self.theme.axis_color,
                    1,
                );
            }
        }

        Ok(fb)
    }

    /// Render to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let fb = self.to_framebuffer()?;
        PngEncoder::to_bytes(&fb)
    }

    /// Render to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering, encoding, or file I/O fails.
    pub fn render_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let fb = self.to_framebuffer()?;
        PngEncoder::write_to_file(&fb, path)
    }

    /// Render to a vector SVG document.
    ///
    /// The vector path carries the text the raster path cannot: title,
    /// axis labels, and facet strip labels.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        let mut svg = SvgEncoder::new(self.width, self.height).background(self.theme.background);
        let faceted = !matches!(self.facet, Facet::None);

        if let Some(title) = &self.title {
            svg.push(SvgElement::Text {
                x: self.width as f32 / 2.0,
                y: (self.theme.margin as f32 / 2.0).max(12.0),
                text: title.clone(),
                font_size: 14.0,
                fill: self.theme.text_color,
                anchor: TextAnchor::Middle,
            });
        }

        for panel in &self.layout.panels {
            let (strip, body) = self.panel_area(panel, faceted);
            if body.width < 1.0 || body.height < 1.0 {
                continue;
            }

            if faceted && strip.height >= 1.0 {
                svg.push(SvgElement::Rect {
                    x: strip.x,
                    y: strip.y,
                    width: strip.width,
                    height: strip.height,
                    fill: self.theme.strip_background,
                    stroke: None,
                    stroke_width: 0.0,
                });
                svg.push(SvgElement::Text {
                    x: strip.center().x,
                    y: strip.y + strip.height - 5.0,
                    text: panel.label.clone(),
                    font_size: 11.0,
                    fill: self.theme.text_color,
                    anchor: TextAnchor::Middle,
                });
            }

            svg.push(SvgElement::Rect {
                x: body.x,
                y: body.y,
                width: body.width,
                height: body.height,
                fill: self.theme.panel_background,
                stroke: self.theme.show_panel_border.then_some(self.theme.axis_color),
                stroke_width: 1.0,
            });

            let x_scale = LinearScale::padded(self.x_domain, (body.x, body.right()));
            let y_scale = LinearScale::padded(self.y_domain, (body.bottom(), body.y));

            if self.theme.show_grid {
                for i in 0..=4 {
                    let t = i as f32 / 4.0;
                    let gx = body.x + t * body.width;
                    let gy = body.y + t * body.height;
                    svg.push(SvgElement::Line {
                        x1: gx,
                        y1: body.y,
                        x2: gx,
                        y2: body.bottom(),
                        stroke: self.theme.grid_color,
                        stroke_width: 1.0,
                    });
                    svg.push(SvgElement::Line {
                        x1: body.x,
                        y1: gy,
                        x2: body.right(),
                        y2: gy,
                        stroke: self.theme.grid_color,
                        stroke_width: 1.0,
                    });
                }
            }

            for layer in &self.layers {
                self.svg_layer(&mut svg, layer, &panel.indices, &x_scale, &y_scale, body);
            }

            if self.theme.show_axis {
                svg.push(SvgElement::Line {
                    x1: body.x,
                    y1: body.bottom(),
                    x2: body.right(),
                    y2: body.bottom(),
                    stroke: self.theme.axis_color,
                    stroke_width: 1.0,
                });
                svg.push(SvgElement::Line {
                    x1: body.x,
                    y1: body.y,
                    x2: body.x,
                    y2: body.bottom(),
                    stroke: self.theme.axis_color,
                    stroke_width: 1.0,
                });
            }
        }

        if let Some(xlab) = &self.xlab {
            svg.push(SvgElement::Text {
                x: self.width as f32 / 2.0,
                y: self.height as f32 - 8.0,
                text: xlab.clone(),
                font_size: 12.0,
                fill: self.theme.text_color,
                anchor: TextAnchor::Middle,
            });
        }
        if let Some(ylab) = &self.ylab {
            svg.push(SvgElement::Text {
                x: 12.0,
                y: self.height as f32 / 2.0,
                text: ylab.clone(),
                font_size: 12.0,
                fill: self.theme.text_color,
                anchor: TextAnchor::Middle,
            });
        }

        svg
    }

    /// Strip and body rectangles of a panel's grid cell.
    fn panel_area(&self, panel: &FacetPanel, faceted: bool) -> (Rect, Rect) {
        let margin = self.theme.margin as f32;
        let area = Rect::new(
            margin,
            margin,
            (self.width as f32 - 2.0 * margin).max(0.0),
            (self.height as f32 - 2.0 * margin).max(0.0),
        );
        let cell = area.grid_cell(
            panel.row,
            panel.col,
            self.layout.n_rows,
            self.layout.n_cols,
            self.theme.panel_spacing as f32,
        );

        let strip_h = if faceted {
            self.theme.strip_height as f32
        } else {
            0.0
        };
        let strip = Rect::new(cell.x, cell.y, cell.width, strip_h.min(cell.height));
        let body = Rect::new(
            cell.x,
            cell.y + strip.height,
            cell.width,
            (cell.height - strip.height).max(0.0),
        );
        (strip, body)
    }

    /// Row-aligned, transform-applied positions of a positional channel.
    fn positions(&self, column: Option<&str>, transform: Transform) -> Vec<f32> {
        let Some(column) = column else {
            return Vec::new();
        };
        let values = self.data.numeric(column).unwrap_or_default();
        values
            .into_iter()
            .map(|v| if v.is_finite() { transform.apply(v) } else { f32::NAN })
            .collect()
    }

    /// Resolve per-record visual attributes for a layer.
    fn resolve_style(&self, mapping: &Mapping, geom: &Geom) -> LayerStyle {
        let n = self.data.n_rows();
        let base = mapping.color_value.unwrap_or(DEFAULT_COLOR);
        let alpha = mapping.alpha_value.unwrap_or(1.0);

        let mut row_color = vec![base; n];
        let mut group_of_row = vec![0usize; n];
        let mut group_colors = vec![base];

        if let Some(column) = mapping.color.as_deref() {
            match self.data.field_kind(column) {
                Some(FieldKind::Categorical) => {
                    let levels = self.data.levels(column);
                    let palette = Palette::classic();
                    let values = self.data.values(column).unwrap_or(&[]);
                    for i in 0..n {
                        let label = values
                            .get(i)
                            .map_or_else(|| "NA".to_string(), Value::label);
                        let idx = levels.iter().position(|l| *l == label).unwrap_or(0);
                        row_color[i] = palette.color(idx);
                        group_of_row[i] = idx;
                    }
                    group_colors = (0..levels.len().max(1)).map(|i| palette.color(i)).collect();
                }
                Some(FieldKind::Numeric) => {
                    if let Some(extent) = self.data.extent(column) {
                        let extent = if (extent.0 - extent.1).abs() < f32::EPSILON {
                            (extent.0 - 1.0, extent.1 + 1.0)
                        } else {
                            extent
                        };
                        if let Some(scale) = ColorScale::viridis(extent) {
                            let values = self.data.numeric(column).unwrap_or_default();
                            for i in 0..n {
                                if let Some(&v) = values.get(i) {
                                    if v.is_finite() {
                                        row_color[i] = scale.scale(v);
                                    }
                                }
                            }
                        }
                    }
                }
                None => {}
            }
        }

        let mut row_size = vec![mapping.size_value.unwrap_or(DEFAULT_MARKER_SIZE); n];
        if let Some(column) = mapping.size.as_deref() {
            if let Some(extent) = self.data.extent(column) {
                let scale = LinearScale::padded(extent, SIZE_RANGE);
                let values = self.data.numeric(column).unwrap_or_default();
                for i in 0..n {
                    if let Some(&v) = values.get(i) {
                        if v.is_finite() {
                            row_size[i] = scale.scale(v).clamp(2.0, 20.0);
                        }
                    }
                }
            }
        }

        let default_shape = match &geom.kind {
            GeomKind::Point { shape } => *shape,
            _ => PointShape::Circle,
        };
        let mut row_shape = vec![default_shape; n];
        if let Some(column) = mapping.shape.as_deref() {
            let levels = self.data.levels(column);
            let values = self.data.values(column).unwrap_or(&[]);
            for i in 0..n {
                let label = values
                    .get(i)
                    .map_or_else(|| "NA".to_string(), Value::label);
                let idx = levels.iter().position(|l| *l == label).unwrap_or(0);
                row_shape[i] = PointShape::CYCLE[idx % PointShape::CYCLE.len()];
            }
        }

        if alpha < 1.0 {
            let fade = |c: &mut Rgba| *c = c.with_alpha((f32::from(c.a) * alpha) as u8);
            row_color.iter_mut().for_each(fade);
            group_colors.iter_mut().for_each(fade);
        }

        LayerStyle {
            row_color,
            row_size,
            row_shape,
            group_of_row,
            group_colors,
        }
    }

    /// Points of one color-level group, row-ordered, possibly non-finite.
    fn group_series(
        &self,
        indices: &[usize],
        xs: &[f32],
        ys: &[f32],
        style: &LayerStyle,
        group: usize,
    ) -> (Vec<f32>, Vec<f32>) {
        let mut gx = Vec::new();
        let mut gy = Vec::new();
        for &i in indices {
            if style.group_of_row.get(i) == Some(&group) {
                gx.push(xs.get(i).copied().unwrap_or(f32::NAN));
                gy.push(ys.get(i).copied().unwrap_or(f32::NAN));
            }
        }
        (gx, gy)
    }

    /// Y pixel of the zero baseline for bar and area geometries.
    fn baseline(&self, y_scale: &LinearScale, body: Rect) -> f32 {
        match self.y_transform {
            Transform::Identity => y_scale.scale(0.0).clamp(body.y, body.bottom()),
            Transform::Log10 => body.bottom(),
        }
    }

    /// Smallest gap between distinct values, in data units (tile sizing).
    fn min_gap(values: &[f32]) -> f32 {
        let mut distinct: Vec<f32> = values.iter().copied().filter(|v| v.is_finite()).collect();
        distinct.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        distinct.dedup();
        let gap = distinct
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold(f32::MAX, f32::min);
        if gap == f32::MAX {
            1.0
        } else {
            gap
        }
    }

    /// Rasterize one layer into a panel.
    #[allow(clippy::too_many_lines)]
    fn render_layer(
        &self,
        fb: &mut Framebuffer,
        layer: &Layer,
        indices: &[usize],
        x_scale: &LinearScale,
        y_scale: &LinearScale,
        body: Rect,
    ) {
        let mapping = self.mapping.merge(&layer.mapping);
        let style = self.resolve_style(&mapping, &layer.geom);
        let xs = self.positions(mapping.x.as_deref(), self.x_transform);
        let ys = self.positions(mapping.y.as_deref(), self.y_transform);

        match &layer.geom.kind {
            GeomKind::Point { .. } => {
                for &i in indices {
                    let (Some(&x), Some(&y)) = (xs.get(i), ys.get(i)) else {
                        continue;
                    };
                    if !x.is_finite() || !y.is_finite() {
                        continue;
                    }
                    draw_marker(
                        fb,
                        x_scale.scale(x),
                        y_scale.scale(y),
                        style.row_size[i],
                        style.row_shape[i],
                        style.row_color[i],
                    );
                }
            }
            GeomKind::Line { .. } => {
                for (group, &color) in style.group_colors.iter().enumerate() {
                    let (gx, gy) = self.group_series(indices, &xs, &ys, &style, group);
                    let pts = stat::finite_pairs_by_x(&gx, &gy);
                    for w in pts.windows(2) {
                        draw_line_aa(
                            fb,
                            x_scale.scale(w[0].0),
                            y_scale.scale(w[0].1),
                            x_scale.scale(w[1].0),
                            y_scale.scale(w[1].1),
                            color,
                        );
                    }
                }
            }
            GeomKind::Bar { width } => {
                let n = indices.len().max(1);
                let bar_px = (body.width / n as f32 * width).max(1.0);
                let baseline = self.baseline(y_scale, body);

                for &i in indices {
                    let (Some(&x), Some(&y)) = (xs.get(i), ys.get(i)) else {
                        continue;
                    };
                    if !x.is_finite() || !y.is_finite() {
                        continue;
                    }
                    let px = x_scale.scale(x);
                    let py = y_scale.scale(y).clamp(body.y, body.bottom());
                    let top = py.min(baseline);
                    let height = (py - baseline).abs().max(1.0);
                    draw_rect(
                        fb,
                        (px - bar_px / 2.0) as i32,
                        top as i32,
                        bar_px as u32,
                        height as u32,
                        style.row_color[i],
                    );
                }
            }
            GeomKind::Area { alpha } => {
                let baseline = self.baseline(y_scale, body);
                for (group, &color) in style.group_colors.iter().enumerate() {
                    let (gx, gy) = self.group_series(indices, &xs, &ys, &style, group);
                    let pts = stat::finite_pairs_by_x(&gx, &gy);
                    if pts.len() < 2 {
                        continue;
                    }

                    let fill =
                        color.with_alpha((f32::from(color.a) * alpha).clamp(0.0, 255.0) as u8);
                    for w in pts.windows(2) {
                        let (x0, y0) = (x_scale.scale(w[0].0), y_scale.scale(w[0].1));
                        let (x1, y1) = (x_scale.scale(w[1].0), y_scale.scale(w[1].1));
                        if x1 <= x0 {
                            continue;
                        }
                        let mut px = x0.ceil();
                        while px <= x1.floor() {
                            let t = (px - x0) / (x1 - x0);
                            let y = y0 + t * (y1 - y0);
                            let (top, bottom) = (y.min(baseline), y.max(baseline));
                            let mut py = top.max(body.y);
                            while py <= bottom.min(body.bottom()) {
                                fb.blend_pixel(px as u32, py as u32, fill);
                                py += 1.0;
                            }
                            px += 1.0;
                        }
                    }

                    // Opaque outline along the top of the fill
                    for w in pts.windows(2) {
                        draw_line_aa(
                            fb,
                            x_scale.scale(w[0].0),
                            y_scale.scale(w[0].1),
                            x_scale.scale(w[1].0),
                            y_scale.scale(w[1].1),
                            color,
                        );
                    }
                }
            }
            GeomKind::Tile => {
                let gap_x = Self::min_gap(&xs);
                let gap_y = Self::min_gap(&ys);
                let w_px = (gap_x * slope(x_scale)).abs().max(1.0);
                let h_px = (gap_y * slope(y_scale)).abs().max(1.0);

                for &i in indices {
                    let (Some(&x), Some(&y)) = (xs.get(i), ys.get(i)) else {
                        continue;
                    };
                    if !x.is_finite() || !y.is_finite() {
                        continue;
                    }
                    let px = x_scale.scale(x);
                    let py = y_scale.scale(y);
                    draw_rect(
                        fb,
                        (px - w_px / 2.0) as i32,
                        (py - h_px / 2.0) as i32,
                        w_px as u32,
                        h_px as u32,
                        style.row_color[i],
                    );
                }
            }
            GeomKind::Smooth { method } => {
                for (group, &color) in style.group_colors.iter().enumerate() {
                    let (gx, gy) = self.group_series(indices, &xs, &ys, &style, group);
                    match method {
                        SmoothMethod::Linear => {
                            if let Some((m, b)) = stat::linear_fit(&gx, &gy) {
                                let pts = stat::finite_pairs_by_x(&gx, &gy);
                                let (x0, x1) = (pts[0].0, pts[pts.len() - 1].0);
                                draw_line_aa(
                                    fb,
                                    x_scale.scale(x0),
                                    y_scale.scale(m * x0 + b),
                                    x_scale.scale(x1),
                                    y_scale.scale(m * x1 + b),
                                    color,
                                );
                            }
                        }
                        SmoothMethod::Rolling { window } => {
                            let pts = stat::rolling_mean(&gx, &gy, *window);
                            for w in pts.windows(2) {
                                draw_line_aa(
                                    fb,
                                    x_scale.scale(w[0].0),
                                    y_scale.scale(w[0].1),
                                    x_scale.scale(w[1].0),
                                    y_scale.scale(w[1].1),
                                    color,
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    /// Emit one layer's vector elements for a panel.
    fn svg_layer(
        &self,
        svg: &mut SvgEncoder,
        layer: &Layer,
        indices: &[usize],
        x_scale: &LinearScale,
        y_scale: &LinearScale,
        body: Rect,
    ) {
        let mapping = self.mapping.merge(&layer.mapping);
        let style = self.resolve_style(&mapping, &layer.geom);
        let xs = self.positions(mapping.x.as_deref(), self.x_transform);
        let ys = self.positions(mapping.y.as_deref(), self.y_transform);

        match &layer.geom.kind {
            GeomKind::Point { .. } => {
                for &i in indices {
                    let (Some(&x), Some(&y)) = (xs.get(i), ys.get(i)) else {
                        continue;
                    };
                    if !x.is_finite() || !y.is_finite() {
                        continue;
                    }
                    push_marker(
                        svg,
                        x_scale.scale(x),
                        y_scale.scale(y),
                        style.row_size[i] / 2.0,
                        style.row_shape[i],
                        style.row_color[i],
                    );
                }
            }
            GeomKind::Line { .. } | GeomKind::Smooth { method: SmoothMethod::Rolling { .. } } => {
                let window = match &layer.geom.kind {
                    GeomKind::Smooth {
                        method: SmoothMethod::Rolling { window },
                    } => *window,
                    _ => 0,
                };
                for (group, &color) in style.group_colors.iter().enumerate() {
                    let (gx, gy) = self.group_series(indices, &xs, &ys, &style, group);
                    let pts = if window > 1 {
                        stat::rolling_mean(&gx, &gy, window)
                    } else {
                        stat::finite_pairs_by_x(&gx, &gy)
                    };
                    if pts.len() < 2 {
                        continue;
                    }
                    svg.push(SvgElement::Polyline {
                        points: pts
                            .iter()
                            .map(|(x, y)| (x_scale.scale(*x), y_scale.scale(*y)))
                            .collect(),
                        stroke: color,
                        stroke_width: 1.0,
                    });
                }
            }
            GeomKind::Smooth {
                method: SmoothMethod::Linear,
            } => {
                for (group, &color) in style.group_colors.iter().enumerate() {
                    let (gx, gy) = self.group_series(indices, &xs, &ys, &style, group);
                    if let Some((m, b)) = stat::linear_fit(&gx, &gy) {
                        let pts = stat::finite_pairs_by_x(&gx, &gy);
                        let (x0, x1) = (pts[0].0, pts[pts.len() - 1].0);
                        svg.push(SvgElement::Line {
                            x1: x_scale.scale(x0),
                            y1: y_scale.scale(m * x0 + b),
                            x2: x_scale.scale(x1),
                            y2: y_scale.scale(m * x1 + b),
                            stroke: color,
                            stroke_width: 1.5,
                        });
                    }
                }
            }
            GeomKind::Bar { width } => {
                let n = indices.len().max(1);
                let bar_px = (body.width / n as f32 * width).max(1.0);
                let baseline = self.baseline(y_scale, body);
                for &i in indices {
                    let (Some(&x), Some(&y)) = (xs.get(i), ys.get(i)) else {
                        continue;
                    };
                    if !x.is_finite() || !y.is_finite() {
                        continue;
                    }
                    let px = x_scale.scale(x);
                    let py = y_scale.scale(y).clamp(body.y, body.bottom());
                    svg.push(SvgElement::Rect {
                        x: px - bar_px / 2.0,
                        y: py.min(baseline),
                        width: bar_px,
                        height: (py - baseline).abs().max(1.0),
                        fill: style.row_color[i],
                        stroke: None,
                        stroke_width: 0.0,
                    });
                }
            }
            GeomKind::Area { alpha } => {
                let baseline = self.baseline(y_scale, body);
                for (group, &color) in style.group_colors.iter().enumerate() {
                    let (gx, gy) = self.group_series(indices, &xs, &ys, &style, group);
                    let pts = stat::finite_pairs_by_x(&gx, &gy);
                    if pts.len() < 2 {
                        continue;
                    }
                    let mut points: Vec<(f32, f32)> = pts
                        .iter()
                        .map(|(x, y)| (x_scale.scale(*x), y_scale.scale(*y)))
                        .collect();
                    points.push((x_scale.scale(pts[pts.len() - 1].0), baseline));
                    points.push((x_scale.scale(pts[0].0), baseline));
                    svg.push(SvgElement::Polygon {
                        points,
                        fill: color
                            .with_alpha((f32::from(color.a) * alpha).clamp(0.0, 255.0) as u8),
                    });
                }
            }
            GeomKind::Tile => {
                let gap_x = Self::min_gap(&xs);
                let gap_y = Self::min_gap(&ys);
                let w_px = (gap_x * slope(x_scale)).abs().max(1.0);
                let h_px = (gap_y * slope(y_scale)).abs().max(1.0);
                for &i in indices {
                    let (Some(&x), Some(&y)) = (xs.get(i), ys.get(i)) else {
                        continue;
                    };
                    if !x.is_finite() || !y.is_finite() {
                        continue;
                    }
                    svg.push(SvgElement::Rect {
                        x: x_scale.scale(x) - w_px / 2.0,
                        y: y_scale.scale(y) - h_px / 2.0,
                        width: w_px,
                        height: h_px,
                        fill: style.row_color[i],
                        stroke: None,
                        stroke_width: 0.0,
                    });
                }
            }
        }
    }

    /// Draw grid lines across a panel body.
    fn draw_grid(
        &self,
        fb: &mut Framebuffer,
        x_scale: &LinearScale,
        y_scale: &LinearScale,
        body: Rect,
    ) {
        let color = self.theme.grid_color;

        for i in 0..=4 {
            let t = i as f32 / 4.0;

            let y_val = y_scale.domain().0 + t * (y_scale.domain().1 - y_scale.domain().0);
            let y_px = y_scale.scale(y_val);
            draw_line_aa(fb, body.x, y_px, body.right(), y_px, color);

            let x_val = x_scale.domain().0 + t * (x_scale.domain().1 - x_scale.domain().0);
            let x_px = x_scale.scale(x_val);
            draw_line_aa(fb, x_px, body.y, x_px, body.bottom(), color);
        }
    }
}

/// Pixels per data unit of a linear scale.
fn slope(scale: &LinearScale) -> f32 {
    let (d0, d1) = scale.domain();
    let (r0, r1) = scale.range();
    if (d1 - d0).abs() < f32::EPSILON {
        0.0
    } else {
        (r1 - r0) / (d1 - d0)
    }
}

/// Rasterize a single point marker.
fn draw_marker(fb: &mut Framebuffer, x: f32, y: f32, size: f32, shape: PointShape, color: Rgba) {
    let r = (size / 2.0).max(1.0) as i32;
    let (cx, cy) = (x as i32, y as i32);

    // Semi-transparent circles blend so overlapping points accumulate,
    // the standard overplotting mitigation
    if color.a < 255 && shape == PointShape::Circle {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r && cx + dx >= 0 && cy + dy >= 0 {
                    fb.blend_pixel((cx + dx) as u32, (cy + dy) as u32, color);
                }
            }
        }
        return;
    }

    match shape {
        PointShape::Circle => draw_circle(fb, cx, cy, r, color),
        PointShape::Square => {
            draw_rect(fb, cx - r, cy - r, (2 * r) as u32, (2 * r) as u32, color);
        }
        PointShape::Triangle => draw_triangle(fb, cx, cy, r, color),
        PointShape::Diamond => draw_diamond(fb, cx, cy, r, color),
        PointShape::Cross => draw_cross(fb, cx, cy, r, color),
        PointShape::X => draw_x_mark(fb, cx, cy, r, color),
    }
}

/// Emit a vector marker element.
fn push_marker(svg: &mut SvgEncoder, x: f32, y: f32, r: f32, shape: PointShape, color: Rgba) {
    match shape {
        PointShape::Square => svg.push(SvgElement::Rect {
            x: x - r,
            y: y - r,
            width: 2.0 * r,
            height: 2.0 * r,
            fill: color,
            stroke: None,
            stroke_width: 0.0,
        }),
        PointShape::Triangle => svg.push(SvgElement::Polygon {
            points: vec![(x, y - r), (x - r, y + r), (x + r, y + r)],
            fill: color,
        }),
        PointShape::Diamond => svg.push(SvgElement::Polygon {
            points: vec![(x, y - r), (x + r, y), (x, y + r), (x - r, y)],
            fill: color,
        }),
        PointShape::Cross => {
            svg.push(SvgElement::Line {
                x1: x - r,
                y1: y,
                x2: x + r,
                y2: y,
                stroke: color,
                stroke_width: 1.5,
            });
            svg.push(SvgElement::Line {
                x1: x,
                y1: y - r,
                x2: x,
                y2: y + r,
                stroke: color,
                stroke_width: 1.5,
            });
        }
        PointShape::X => {
            svg.push(SvgElement::Line {
                x1: x - r,
                y1: y - r,
                x2: x + r,
                y2: y + r,
                stroke: color,
                stroke_width: 1.5,
            });
            svg.push(SvgElement::Line {
                x1: x - r,
                y1: y + r,
                x2: x + r,
                y2: y - r,
                stroke: color,
                stroke_width: 1.5,
            });
        }
        PointShape::Circle => svg.push(SvgElement::Circle {
            cx: x,
            cy: y,
            r,
            fill: color,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy_data() -> Dataset {
        let mut data = Dataset::new();
        data.add_numeric("x", &[1.0, 2.0, 3.0, 4.0]);
        data.add_numeric("y", &[1.0, 4.0, 2.0, 5.0]);
        data
    }

    fn vehicle_data() -> Dataset {
        let mut data = Dataset::new();
        data.add_numeric("weight", &[2.6, 2.9, 2.3, 3.2, 3.4]);
        data.add_numeric("mileage", &[21.0, 21.0, 22.8, 21.4, 18.7]);
        data.add_numeric("displacement", &[160.0, 160.0, 108.0, 258.0, 360.0]);
        data.add_categorical("drivetrain", &["manual", "manual", "auto", "auto", "auto"]);
        data
    }

    fn xy_chart() -> Chart {
        Chart::new()
            .data(xy_data())
            .mapping(Mapping::new().x("x").y("y"))
    }

    #[test]
    fn test_chart_basic() {
        let chart = xy_chart().geom(Geom::point()).build().unwrap();
        let fb = chart.to_framebuffer().unwrap();
        assert_eq!(fb.width(), 800);
        assert_eq!(fb.height(), 600);
    }

    #[test]
    fn test_chart_dimensions() {
        let chart = xy_chart()
            .geom(Geom::point())
            .dimensions(400, 300)
            .build()
            .unwrap();
        let fb = chart.to_framebuffer().unwrap();
        assert_eq!(fb.width(), 400);
        assert_eq!(fb.height(), 300);
    }

    #[test]
    fn test_chart_marks_the_canvas() {
        let chart = xy_chart()
            .geom(Geom::point())
            .theme(Theme::void())
            .dimensions(200, 150)
            .build()
            .unwrap();
        let fb = chart.to_framebuffer().unwrap();
        // Void theme draws nothing but the data marks
        assert!(fb.count_non_background(Rgba::WHITE) > 0);
    }

    #[test]
    fn test_chart_multiple_layers() {
        let chart = xy_chart()
            .geom(Geom::line())
            .geom(Geom::point().mapping(Mapping::new().color_value(Rgba::RED)))
            .build()
            .unwrap();
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_chart_error_no_layers() {
        let result = xy_chart().build();
        assert!(matches!(result, Err(Error::Rendering(_))));
    }

    #[test]
    fn test_chart_error_empty_dataset() {
        let result = Chart::new()
            .data(Dataset::new())
            .mapping(Mapping::new().x("x").y("y"))
            .geom(Geom::point())
            .build();
        assert!(matches!(result, Err(Error::EmptyDataset)));
    }

    #[test]
    fn test_chart_error_missing_channel() {
        let result = Chart::new()
            .data(xy_data())
            .mapping(Mapping::new().x("x"))
            .geom(Geom::point())
            .build();
        assert!(matches!(
            result,
            Err(Error::MissingChannel {
                channel: Channel::Y
            })
        ));
    }

    #[test]
    fn test_chart_error_invalid_mapping() {
        let result = Chart::new()
            .data(xy_data())
            .mapping(Mapping::new().x("x").y("nope"))
            .geom(Geom::point())
            .build();
        assert!(matches!(
            result,
            Err(Error::InvalidMapping {
                channel: Channel::Y,
                ..
            })
        ));
    }

    #[test]
    fn test_chart_error_size_type_mismatch() {
        let result = Chart::new()
            .data(vehicle_data())
            .mapping(Mapping::new().x("weight").y("mileage").size("drivetrain"))
            .geom(Geom::point())
            .build();
        assert!(matches!(
            result,
            Err(Error::TypeMismatch {
                channel: Channel::Size,
                ..
            })
        ));
    }

    #[test]
    fn test_chart_error_categorical_x() {
        let result = Chart::new()
            .data(vehicle_data())
            .mapping(Mapping::new().x("drivetrain").y("mileage"))
            .geom(Geom::bar())
            .build();
        assert!(matches!(
            result,
            Err(Error::TypeMismatch {
                channel: Channel::X,
                ..
            })
        ));
    }

    #[test]
    fn test_chart_categorical_color_renders() {
        let chart = Chart::new()
            .data(vehicle_data())
            .mapping(Mapping::new().x("weight").y("mileage").color("drivetrain"))
            .geom(Geom::point())
            .build()
            .unwrap();
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_chart_numeric_color_renders() {
        let chart = Chart::new()
            .data(vehicle_data())
            .mapping(Mapping::new().x("weight").y("mileage").color("displacement"))
            .geom(Geom::point())
            .build()
            .unwrap();
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_chart_size_channel_renders() {
        let chart = Chart::new()
            .data(vehicle_data())
            .mapping(Mapping::new().x("weight").y("mileage").size("displacement"))
            .geom(Geom::point())
            .build()
            .unwrap();
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_chart_shape_channel_renders() {
        let chart = Chart::new()
            .data(vehicle_data())
            .mapping(Mapping::new().x("weight").y("mileage").shape("drivetrain"))
            .geom(Geom::point())
            .build()
            .unwrap();
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_chart_bar_negative_values() {
        let mut data = Dataset::new();
        data.add_numeric("x", &[1.0, 2.0, 3.0]);
        data.add_numeric("y", &[-2.0, 3.0, -1.0]);

        let chart = Chart::new()
            .data(data)
            .mapping(Mapping::new().x("x").y("y"))
            .geom(Geom::bar())
            .build()
            .unwrap();
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_chart_area() {
        let chart = xy_chart().geom(Geom::area()).build().unwrap();
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_chart_tile() {
        let mut data = Dataset::new();
        data.add_numeric("x", &[1.0, 2.0, 1.0, 2.0]);
        data.add_numeric("y", &[1.0, 1.0, 2.0, 2.0]);
        data.add_numeric("heat", &[0.1, 0.5, 0.7, 1.0]);

        let chart = Chart::new()
            .data(data)
            .mapping(Mapping::new().x("x").y("y").color("heat"))
            .geom(Geom::tile())
            .build()
            .unwrap();
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_chart_smooth_linear() {
        let chart = xy_chart()
            .geom(Geom::point())
            .geom(Geom::smooth())
            .build()
            .unwrap();
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_chart_smooth_rolling() {
        let chart = xy_chart()
            .geom(Geom::smooth().method(SmoothMethod::Rolling { window: 3 }))
            .build()
            .unwrap();
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_chart_facet_wrap_panels() {
        let chart = Chart::new()
            .data(vehicle_data())
            .mapping(Mapping::new().x("weight").y("mileage"))
            .geom(Geom::point())
            .facet(Facet::wrap("drivetrain"))
            .build()
            .unwrap();

        assert_eq!(chart.panels().len(), 2);
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_chart_facet_grid_panels() {
        let mut data = vehicle_data();
        data.add_categorical("era", &["old", "old", "new", "new", "old"]);

        let chart = Chart::new()
            .data(data)
            .mapping(Mapping::new().x("weight").y("mileage"))
            .geom(Geom::point())
            .facet(Facet::grid("drivetrain", "era"))
            .build()
            .unwrap();

        assert_eq!(chart.panels().len(), 4);
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_chart_log_scale() {
        let mut data = Dataset::new();
        data.add_numeric("x", &[1.0, 10.0, 100.0]);
        data.add_numeric("y", &[1.0, 2.0, 3.0]);

        let chart = Chart::new()
            .data(data)
            .mapping(Mapping::new().x("x").y("y"))
            .geom(Geom::point())
            .scale_x(Transform::Log10)
            .build()
            .unwrap();
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_chart_log_scale_rejects_non_positive() {
        let mut data = Dataset::new();
        data.add_numeric("x", &[0.0, 10.0, 100.0]);
        data.add_numeric("y", &[1.0, 2.0, 3.0]);

        let result = Chart::new()
            .data(data)
            .mapping(Mapping::new().x("x").y("y"))
            .geom(Geom::point())
            .scale_x(Transform::Log10)
            .build();
        assert!(matches!(result, Err(Error::ScaleDomain(_))));
    }

    #[test]
    fn test_chart_single_point() {
        let mut data = Dataset::new();
        data.add_numeric("x", &[5.0]);
        data.add_numeric("y", &[5.0]);

        let chart = Chart::new()
            .data(data)
            .mapping(Mapping::new().x("x").y("y"))
            .geom(Geom::point())
            .build()
            .unwrap();
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_chart_render_is_idempotent() {
        let build = || {
            Chart::new()
                .data(vehicle_data())
                .mapping(Mapping::new().x("weight").y("mileage").color("drivetrain"))
                .geom(Geom::point())
                .facet(Facet::wrap("drivetrain"))
                .dimensions(320, 240)
                .build()
                .unwrap()
        };
        let a = build().to_png_bytes().unwrap();
        let b = build().to_png_bytes().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_chart_themes_render() {
        for theme in [
            Theme::grey(),
            Theme::minimal(),
            Theme::bw(),
            Theme::dark(),
            Theme::void(),
        ] {
            let chart = xy_chart()
                .geom(Geom::point())
                .theme(theme)
                .dimensions(160, 120)
                .build()
                .unwrap();
            assert!(chart.to_framebuffer().is_ok());
        }
    }

    #[test]
    fn test_chart_alpha_blending() {
        let chart = xy_chart()
            .geom(Geom::point().mapping(Mapping::new().alpha_value(0.4).size_value(12.0)))
            .build()
            .unwrap();
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_chart_svg_output() {
        let chart = Chart::new()
            .data(vehicle_data())
            .mapping(Mapping::new().x("weight").y("mileage"))
            .geom(Geom::point())
            .title("Mileage by weight")
            .xlab("weight")
            .ylab("mileage")
            .facet(Facet::wrap("drivetrain"))
            .build()
            .unwrap();

        let svg = chart.to_svg().to_svg_string();
        assert!(svg.contains("<circle"));
        assert!(svg.contains("Mileage by weight"));
        // Facet strip labels come from the drivetrain levels
        assert!(svg.contains("manual"));
        assert!(svg.contains("auto"));
    }

    #[test]
    fn test_chart_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");

        xy_chart()
            .geom(Geom::point())
            .dimensions(100, 80)
            .build()
            .unwrap()
            .render_to_file(&path)
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn test_chart_with_dimensions_trait() {
        use batuta_common::display::WithDimensions;

        let mut chart = xy_chart().geom(Geom::point());
        chart.set_dimensions(640, 480);
        let built = chart.build().unwrap();
        assert_eq!(built.width(), 640);
        assert_eq!(built.height(), 480);
    }

    #[test]
    fn test_chart_default() {
        let chart = Chart::default();
        assert!(chart.layers.is_empty());
    }

    #[test]
    fn test_layer_adopts_geom_mapping() {
        let layer = Layer::new(Geom::point().mapping(Mapping::new().color("kind")));
        assert_eq!(layer.mapping.color, Some("kind".to_string()));
    }

    #[test]
    fn test_chart_layer_api() {
        let chart = xy_chart().layer(Layer::new(Geom::line())).build().unwrap();
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_built_chart_debug() {
        let built = xy_chart().geom(Geom::point()).build().unwrap();
        let _ = format!("{built:?}");
    }
}
