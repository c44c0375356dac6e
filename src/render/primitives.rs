//! Primitive rendering functions.
//!
//! Implements rasterization algorithms for the shapes plots are built from:
//! hairlines, anti-aliased polylines and axis-aligned rectangles.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a line using Bresenham's algorithm (non-antialiased).
///
/// Used for axis spines and tick marks, which should stay crisp.
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
/// Two pixels are drawn at each step along the major axis, with intensities
/// weighted by the fractional distance from the ideal line position.
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

    for x in (xpxl1 + 1)..xpxl2 {
        let ipart = intery.floor() as i32;
        if steep {
            plot(fb, ipart, x, color, rfpart(intery));
            plot(fb, ipart + 1, x, color, fpart(intery));
        } else {
            plot(fb, x, ipart, color, rfpart(intery));
            plot(fb, x, ipart + 1, color, fpart(intery));
        }
        intery += gradient;
    }
}

/// Draw a connected polyline with the given stroke width in pixels.
///
/// Widths above one pixel are approximated by parallel anti-aliased strokes
/// offset along each segment's normal.
pub fn draw_polyline(fb: &mut Framebuffer, points: &[Point], color: Rgba, width: f32) {
    let passes = width.round().max(1.0) as i32;
    let half = (passes - 1) as f32 / 2.0;

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let len = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
        let (nx, ny) = if len > f32::EPSILON {
            (-(b.y - a.y) / len, (b.x - a.x) / len)
        } else {
            (0.0, 0.0)
        };

        for pass in 0..passes {
            let offset = pass as f32 - half;
            draw_line_aa(
                fb,
                a.x + nx * offset,
                a.y + ny * offset,
                b.x + nx * offset,
                b.y + ny * offset,
                color,
            );
        }
    }
}

/// Dash pattern in pixels: (on, off).
const DASH_PATTERN: (f32, f32) = (6.0, 4.0);

/// Draw a polyline with a dash pattern.
///
/// The pattern phase carries over from one segment to the next.
pub fn draw_dashed_polyline(fb: &mut Framebuffer, points: &[Point], color: Rgba, width: f32) {
    let (on, off) = DASH_PATTERN;
    let period = on + off;
    let mut phase = 0.0f32;

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let len = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
        if len <= f32::EPSILON {
            continue;
        }
        let (ux, uy) = ((b.x - a.x) / len, (b.y - a.y) / len);

        let mut t = 0.0;
        while t < len {
            let in_pattern = phase % period;
            let (drawing, remaining) =
                if in_pattern < on { (true, on - in_pattern) } else { (false, period - in_pattern) };
            let step = remaining.min(len - t);
            if drawing {
                let start = Point::new(a.x + ux * t, a.y + uy * t);
                let end = Point::new(a.x + ux * (t + step), a.y + uy * (t + step));
                draw_polyline(fb, &[start, end], color, width);
            }
            t += step;
            phase += step;
        }
    }
}

/// Plot a pixel with intensity (for anti-aliased drawing).
#[inline]
fn plot(fb: &mut Framebuffer, x: i32, y: i32, color: Rgba, intensity: f32) {
    if x >= 0 && y >= 0 && x < fb.width() as i32 && y < fb.height() as i32 {
        let alpha = (f32::from(color.a) * intensity) as u8;
        fb.blend_pixel(x as u32, y as u32, color.with_alpha(alpha));
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

/// Fill a rectangle given in floating-point pixel coordinates.
///
/// Edges are rounded to the nearest pixel so adjacent cells tile exactly.
/// Translucent colors are blended over the existing pixels.
pub fn fill_rect(fb: &mut Framebuffer, rect: Rect, color: Rgba) {
    let x0 = rect.x.round().max(0.0) as u32;
    let y0 = rect.y.round().max(0.0) as u32;
    let x1 = (rect.right().round().max(0.0) as u32).min(fb.width());
    let y1 = (rect.bottom().round().max(0.0) as u32).min(fb.height());

    if x1 <= x0 || y1 <= y0 {
        return;
    }

    if color.a == 255 {
        fb.fill_rect(x0, y0, x1 - x0, y1 - y0, color);
    } else {
        for y in y0..y1 {
            for x in x0..x1 {
                fb.blend_pixel(x, y, color);
            }
        }
    }
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
        fb.fill_rect(x + width - thickness, y + thickness, thickness, height - 2 * thickness, color);
    }
}

// ============================================================================
// Tests
// ============================================================================
