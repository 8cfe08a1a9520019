//! SVG output encoder.
//!
//! Produces vector output from chart render passes, or raster-in-vector
//! output by embedding a framebuffer as a base64 PNG image.

use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::output::PngEncoder;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default)]
pub enum TextAnchor {
    /// Align text start at position.
    #[default]
    Start,
    /// Center text at position.
    Middle,
    /// Align text end at position.
    End,
}

impl TextAnchor {
    fn attr(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// An SVG element.
///
/// Field names match SVG attribute names.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Circle.
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Rgba,
    },
    /// Line.
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Polyline (connected line segments, no fill).
    Polyline {
        points: Vec<(f32, f32)>,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Filled polygon.
    Polygon {
        points: Vec<(f32, f32)>,
        fill: Rgba,
    },
    /// Text.
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
    },
    /// Embedded raster image (base64 PNG).
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        data: String,
    },
}

/// SVG document builder.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    width: u32,
    height: u32,
    background: Option<Rgba>,
    elements: Vec<SvgElement>,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with the given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: None,
            elements: Vec::new(),
        }
    }

    /// Set the background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = Some(color);
        self
    }

    /// Append an element.
    pub fn push(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Number of elements in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the document has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Embed a framebuffer as a full-size base64 PNG image.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn from_framebuffer(fb: &Framebuffer) -> Result<Self> {
        let png_bytes = PngEncoder::to_bytes(fb)?;
        let mut encoder = Self::new(fb.width(), fb.height());
        encoder.push(SvgElement::Image {
            x: 0.0,
            y: 0.0,
            width: fb.width() as f32,
            height: fb.height() as f32,
            data: STANDARD.encode(&png_bytes),
        });
        Ok(encoder)
    }

    /// Serialize to an SVG document string.
    #[must_use]
    pub fn to_svg_string(&self) -> String {
        let mut out = String::with_capacity(1024 + self.elements.len() * 128);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(
                out,
                r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
                self.width,
                self.height,
                fill_attr(bg)
            );
        }

        for element in &self.elements {
            write_element(&mut out, element);
        }

        out.push_str("</svg>\n");
        out
    }

    /// Write the SVG document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.to_svg_string().as_bytes())?;
        Ok(())
    }
}

fn write_element(out: &mut String, element: &SvgElement) {
    match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
            stroke_width,
        } => {
            let _ = write!(
                out,
                r#"  <rect x="{x:.2}" y="{y:.2}" width="{width:.2}" height="{height:.2}" fill="{}"{}"#,
                fill_attr(*fill),
                opacity_attr("fill-opacity", *fill)
            );
            if let Some(stroke) = stroke {
                let _ = write!(
                    out,
                    r#" stroke="{}" stroke-width="{stroke_width:.2}""#,
                    fill_attr(*stroke)
                );
            }
            out.push_str("/>\n");
        }
        SvgElement::Circle { cx, cy, r, fill } => {
            let _ = writeln!(
                out,
                r#"  <circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{}"{}/>"#,
                fill_attr(*fill),
                opacity_attr("fill-opacity", *fill)
            );
        }
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => {
            let _ = writeln!(
                out,
                r#"  <line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{}" stroke-width="{stroke_width:.2}"/>"#,
                fill_attr(*stroke)
            );
        }
        SvgElement::Polyline {
            points,
            stroke,
            stroke_width,
        } => {
            let _ = writeln!(
                out,
                r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="{stroke_width:.2}"/>"#,
                points_attr(points),
                fill_attr(*stroke)
            );
        }
        SvgElement::Polygon { points, fill } => {
            let _ = writeln!(
                out,
                r#"  <polygon points="{}" fill="{}"{}/>"#,
                points_attr(points),
                fill_attr(*fill),
                opacity_attr("fill-opacity", *fill)
            );
        }
        SvgElement::Text {
            x,
            y,
            text,
            font_size,
            fill,
            anchor,
        } => {
            let _ = writeln!(
                out,
                r#"  <text x="{x:.2}" y="{y:.2}" font-size="{font_size:.1}" font-family="sans-serif" fill="{}" text-anchor="{}">{}</text>"#,
                fill_attr(*fill),
                anchor.attr(),
                escape_text(text)
            );
        }
        SvgElement::Image {
            x,
            y,
            width,
            height,
            data,
        } => {
            let _ = writeln!(
                out,
                r#"  <image x="{x:.2}" y="{y:.2}" width="{width:.2}" height="{height:.2}" href="data:image/png;base64,{data}"/>"#,
            );
        }
    }
}

fn fill_attr(color: Rgba) -> String {
    format!("rgb({},{},{})", color.r, color.g, color.b)
}

fn opacity_attr(name: &str, color: Rgba) -> String {
    if color.a == 255 {
        String::new()
    } else {
        format!(r#" {name}="{:.3}""#, f32::from(color.a) / 255.0)
    }
}

fn points_attr(points: &[(f32, f32)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let svg = SvgEncoder::new(100, 50).to_svg_string();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="100""#));
        assert!(svg.contains(r#"height="50""#));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_background_rect() {
        let svg = SvgEncoder::new(10, 10)
            .background(Rgba::WHITE)
            .to_svg_string();
        assert!(svg.contains("rgb(255,255,255)"));
    }

    #[test]
    fn test_circle_element() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.push(SvgElement::Circle {
            cx: 50.0,
            cy: 50.0,
            r: 5.0,
            fill: Rgba::RED,
        });

        let svg = encoder.to_svg_string();
        assert!(svg.contains("<circle"));
        assert!(svg.contains("rgb(255,0,0)"));
    }

    #[test]
    fn test_semi_transparent_fill_gets_opacity() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.push(SvgElement::Circle {
            cx: 1.0,
            cy: 1.0,
            r: 1.0,
            fill: Rgba::RED.with_alpha(128),
        });

        let svg = encoder.to_svg_string();
        assert!(svg.contains("fill-opacity"));
    }

    #[test]
    fn test_polyline_points() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.push(SvgElement::Polyline {
            points: vec![(0.0, 0.0), (10.0, 20.0)],
            stroke: Rgba::BLACK,
            stroke_width: 1.0,
        });

        let svg = encoder.to_svg_string();
        assert!(svg.contains("0.00,0.00 10.00,20.00"));
        assert!(svg.contains(r#"fill="none""#));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.push(SvgElement::Text {
            x: 0.0,
            y: 0.0,
            text: "a < b & c".to_string(),
            font_size: 10.0,
            fill: Rgba::BLACK,
            anchor: TextAnchor::Middle,
        });

        let svg = encoder.to_svg_string();
        assert!(svg.contains("a &lt; b &amp; c"));
        assert!(svg.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn test_from_framebuffer_embeds_png() {
        let mut fb = Framebuffer::new(8, 8).unwrap();
        fb.clear(Rgba::BLUE);

        let encoder = SvgEncoder::from_framebuffer(&fb).unwrap();
        let svg = encoder.to_svg_string();
        assert!(svg.contains("data:image/png;base64,"));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");

        SvgEncoder::new(10, 10)
            .background(Rgba::WHITE)
            .write_to_file(&path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
    }

    #[test]
    fn test_len_and_is_empty() {
        let mut encoder = SvgEncoder::new(10, 10);
        assert!(encoder.is_empty());
        encoder.push(SvgElement::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
            stroke: Rgba::BLACK,
            stroke_width: 1.0,
        });
        assert_eq!(encoder.len(), 1);
    }
}
