//! Device-space drawing instructions.
//!
//! Axes lay themselves out into a flat list of [`Mark`]s in pixel
//! coordinates. The same list feeds the raster path ([`rasterize`]) and the
//! SVG encoder, so both outputs always agree on geometry.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};

use super::primitives::{
    draw_dashed_polyline, draw_line, draw_polyline, draw_rect_outline, fill_rect,
};

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor (left-aligned).
    #[default]
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor (right-aligned).
    End,
}

/// A single drawing instruction in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// Axis-aligned rectangle, filled and/or stroked.
    Rect {
        /// Bounds in pixels.
        rect: Rect,
        /// Fill color, `None` for an outline only.
        fill: Option<Rgba>,
        /// Stroke color, `None` for no outline.
        stroke: Option<Rgba>,
        /// Stroke width in pixels.
        stroke_width: f32,
        /// Corner radius (vector output only).
        corner_radius: f32,
    },
    /// Connected line segments.
    Polyline {
        /// Vertices in pixels.
        points: Vec<Point>,
        /// Stroke color.
        color: Rgba,
        /// Stroke width in pixels.
        width: f32,
        /// Draw with a dash pattern.
        dashed: bool,
    },
    /// A run of text. Baseline sits at `position.y`.
    Text {
        /// Anchor point in pixels.
        position: Point,
        /// The string to draw.
        text: String,
        /// Font size in pixels.
        size: f32,
        /// Text color.
        color: Rgba,
        /// Horizontal alignment.
        anchor: TextAnchor,
        /// Rotation in degrees, counter-clockwise positive.
        rotation: f32,
    },
}

impl Mark {
    /// A filled rectangle without outline.
    #[must_use]
    pub fn filled(rect: Rect, fill: Rgba) -> Self {
        Self::Rect { rect, fill: Some(fill), stroke: None, stroke_width: 0.0, corner_radius: 0.0 }
    }

    /// An unfilled rectangle outline.
    #[must_use]
    pub fn outline(rect: Rect, stroke: Rgba, stroke_width: f32) -> Self {
        Self::Rect { rect, fill: None, stroke: Some(stroke), stroke_width, corner_radius: 0.0 }
    }

    /// A solid straight segment.
    #[must_use]
    pub fn segment(from: Point, to: Point, color: Rgba, width: f32) -> Self {
        Self::Polyline { points: vec![from, to], color, width, dashed: false }
    }

    /// Horizontal text.
    #[must_use]
    pub fn text(position: Point, text: impl Into<String>, size: f32, color: Rgba, anchor: TextAnchor) -> Self {
        Self::Text { position, text: text.into(), size, color, anchor, rotation: 0.0 }
    }

    /// The string carried by a text mark.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Approximate advance width of `text` at `size` pixels.
///
/// No font metrics are available, so an average glyph width of 0.6 em is
/// assumed. Good enough for laying out legends and tick labels.
#[must_use]
pub fn estimate_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.6
}

/// Draw marks onto a framebuffer in order.
///
/// Text marks are not rasterized; they only appear in vector output.
pub fn rasterize(fb: &mut Framebuffer, marks: &[Mark]) {
    for mark in marks {
        match mark {
            Mark::Rect { rect, fill, stroke, stroke_width, .. } => {
                if let Some(fill) = fill {
                    fill_rect(fb, *rect, *fill);
                }
                if let Some(stroke) = stroke {
                    draw_rect_outline(
                        fb,
                        rect.x.round() as i32,
                        rect.y.round() as i32,
                        rect.width.round().max(1.0) as u32,
                        rect.height.round().max(1.0) as u32,
                        *stroke,
                        stroke_width.round().max(1.0) as u32,
                    );
                }
            }
            Mark::Polyline { points, color, width, dashed } => {
                if *dashed {
                    draw_dashed_polyline(fb, points, *color, *width);
                } else if *width <= 1.0 && is_axis_aligned(points) {
                    // Spines, ticks and grid lines stay crisp
                    for pair in points.windows(2) {
                        draw_line(
                            fb,
                            pair[0].x.round() as i32,
                            pair[0].y.round() as i32,
                            pair[1].x.round() as i32,
                            pair[1].y.round() as i32,
                            *color,
                        );
                    }
                } else {
                    draw_polyline(fb, points, *color, *width);
                }
            }
            Mark::Text { .. } => {}
        }
    }
}

fn is_axis_aligned(points: &[Point]) -> bool {
    points.windows(2).all(|p| {
        (p[0].x - p[1].x).abs() < f32::EPSILON || (p[0].y - p[1].y).abs() < f32::EPSILON
    })
}
