//! Primitive rendering functions.
//!
//! Rasterization routines for lines, rectangles, circles, and the filled
//! marker glyphs used by the point geometry's shape channel.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a line using Bresenham's algorithm (non-antialiased).
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw an anti-aliased line using Wu's algorithm.
///
/// Two pixels are plotted at each step along the major axis, weighted by the
/// fractional distance from the ideal line position.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn draw_line_aa(fb: &mut Framebuffer, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();

    let (x0, y0, x1, y1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };

    let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx.abs() < f32::EPSILON { 1.0 } else { dy / dx };

    // First endpoint
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i32;
    let ypxl1 = yend.floor() as i32;

    if steep {
        plot(fb, ypxl1, xpxl1, color, rfpart(yend) * xgap);
        plot(fb, ypxl1 + 1, xpxl1, color, fpart(yend) * xgap);
    } else {
        plot(fb, xpxl1, ypxl1, color, rfpart(yend) * xgap);
        plot(fb, xpxl1, ypxl1 + 1, color, fpart(yend) * xgap);
    }

    let mut intery = yend + gradient;

    // Second endpoint
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i32;
    let ypxl2 = yend.floor() as i32;

    if steep {
        plot(fb, ypxl2, xpxl2, color, rfpart(yend) * xgap);
        plot(fb, ypxl2 + 1, xpxl2, color, fpart(yend) * xgap);
    } else {
        plot(fb, xpxl2, ypxl2, color, rfpart(yend) * xgap);
        plot(fb, xpxl2, ypxl2 + 1, color, fpart(yend) * xgap);
    }

    // Main loop
    if steep {
        for x in (xpxl1 + 1)..xpxl2 {
            let ipart = intery.floor() as i32;
            plot(fb, ipart, x, color, rfpart(intery));
            plot(fb, ipart + 1, x, color, fpart(intery));
            intery += gradient;
        }
    } else {
        for x in (xpxl1 + 1)..xpxl2 {
            let ipart = intery.floor() as i32;
            plot(fb, x, ipart, color, rfpart(intery));
            plot(fb, x, ipart + 1, color, fpart(intery));
            intery += gradient;
        }
    }
}

/// Plot a pixel with intensity (for anti-aliased drawing).
#[inline]
fn plot(fb: &mut Framebuffer, x: i32, y: i32, color: Rgba, intensity: f32) {
    if x >= 0 && y >= 0 && x < fb.width() as i32 && y < fb.height() as i32 {
        let alpha = (f32::from(color.a) * intensity) as u8;
        let blended = color.with_alpha(alpha);
        fb.blend_pixel(x as u32, y as u32, blended);
    }
}

/// Fractional part of a float.
#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

/// Reverse fractional part.
#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Draw a filled rectangle.
pub fn draw_rect(fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
    // Negative origins clip against the left/top edges
    let clip_x = (-x).max(0) as u32;
    let clip_y = (-y).max(0) as u32;
    if clip_x >= width || clip_y >= height {
        return;
    }
    fb.fill_rect(
        x.max(0) as u32,
        y.max(0) as u32,
        width - clip_x,
        height - clip_y,
        color,
    );
}

/// Draw a rectangle outline.
pub fn draw_rect_outline(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgba,
    thickness: u32,
) {
    let thickness = thickness.max(1);
    let x = x.max(0) as u32;
    let y = y.max(0) as u32;

    // Top edge
    fb.fill_rect(x, y, width, thickness, color);
    // Bottom edge
    if height > thickness {
        fb.fill_rect(x, y + height - thickness, width, thickness, color);
    }
    // Left edge
    if height > 2 * thickness {
        fb.fill_rect(x, y + thickness, thickness, height - 2 * thickness, color);
    }
    // Right edge
    if width > thickness && height > 2 * thickness {
        fb.fill_rect(
            x + width - thickness,
            y + thickness,
            thickness,
            height - 2 * thickness,
            color,
        );
    }
}

// ============================================================================
// Circle / Marker Drawing
// ============================================================================

/// Draw a filled circle using the midpoint algorithm.
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        if radius == 0 && cx >= 0 && cy >= 0 {
            fb.set_pixel(cx as u32, cy as u32, color);
        }
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        // Horizontal scan lines for each octant pair
        draw_horizontal_span(fb, cx - x, cx + x, cy + y, color);
        draw_horizontal_span(fb, cx - x, cx + x, cy - y, color);
        draw_horizontal_span(fb, cx - y, cx + y, cy + x, color);
        draw_horizontal_span(fb, cx - y, cx + y, cy - x, color);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Draw a circle outline.
pub fn draw_circle_outline(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        if radius == 0 && cx >= 0 && cy >= 0 {
            fb.set_pixel(cx as u32, cy as u32, color);
        }
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        plot_bounded(fb, cx + x, cy + y, color);
        plot_bounded(fb, cx - x, cy + y, color);
        plot_bounded(fb, cx + x, cy - y, color);
        plot_bounded(fb, cx - x, cy - y, color);
        plot_bounded(fb, cx + y, cy + x, color);
        plot_bounded(fb, cx - y, cy + x, color);
        plot_bounded(fb, cx + y, cy - x, color);
        plot_bounded(fb, cx - y, cy - x, color);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Draw a point with variable size (rendered as a filled circle).
pub fn draw_point(fb: &mut Framebuffer, x: f32, y: f32, size: f32, color: Rgba) {
    let radius = (size / 2.0) as i32;
    draw_circle(fb, x as i32, y as i32, radius, color);
}

/// Draw a filled upward-pointing triangle marker centered at (`cx`, `cy`).
pub fn draw_triangle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        plot_bounded(fb, cx, cy, color);
        return;
    }

    // Apex at cy - radius, base at cy + radius; width grows linearly
    for dy in -radius..=radius {
        let t = (dy + radius) as f32 / (2 * radius) as f32;
        let half = (t * radius as f32).round() as i32;
        draw_horizontal_span(fb, cx - half, cx + half, cy + dy, color);
    }
}

/// Draw a filled diamond marker centered at (`cx`, `cy`).
pub fn draw_diamond(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        plot_bounded(fb, cx, cy, color);
        return;
    }

    for dy in -radius..=radius {
        let half = radius - dy.abs();
        draw_horizontal_span(fb, cx - half, cx + half, cy + dy, color);
    }
}

/// Draw a plus-shaped cross marker centered at (`cx`, `cy`).
pub fn draw_cross(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        plot_bounded(fb, cx, cy, color);
        return;
    }

    let arm = (radius / 3).max(1);
    // Horizontal bar
    for dy in -arm / 2..=arm / 2 {
        draw_horizontal_span(fb, cx - radius, cx + radius, cy + dy, color);
    }
    // Vertical bar
    for dx in -arm / 2..=arm / 2 {
        for dy in -radius..=radius {
            plot_bounded(fb, cx + dx, cy + dy, color);
        }
    }
}

/// Draw an X-shaped marker centered at (`cx`, `cy`).
pub fn draw_x_mark(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        plot_bounded(fb, cx, cy, color);
        return;
    }

    // Two diagonals, thickened by one pixel on each side
    for offset in -1..=1 {
        draw_line(
            fb,
            cx - radius + offset,
            cy - radius,
            cx + radius + offset,
            cy + radius,
            color,
        );
        draw_line(
            fb,
            cx - radius + offset,
            cy + radius,
            cx + radius + offset,
            cy - radius,
            color,
        );
    }
}

/// Helper to draw a clipped horizontal span.
#[inline]
fn draw_horizontal_span(fb: &mut Framebuffer, x1: i32, x2: i32, y: i32, color: Rgba) {
    if y < 0 || y >= fb.height() as i32 {
        return;
    }

    let x_start = x1.max(0) as u32;
    let x_end = (x2 + 1).max(0).min(fb.width() as i32) as u32;

    if x_start < x_end {
        fb.fill_rect(x_start, y as u32, x_end - x_start, 1, color);
    }
}

/// Helper to plot a single pixel with bounds checking.
#[inline]
fn plot_bounded(fb: &mut Framebuffer, x: i32, y: i32, color: Rgba) {
    if x >= 0 && y >= 0 && x < fb.width() as i32 && y < fb.height() as i32 {
        fb.set_pixel(x as u32, y as u32, color);
    }
}

// ============================================================================
// Tests
// ============================================================================
