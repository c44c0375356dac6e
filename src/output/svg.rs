//! SVG output encoder.
//!
//! Vector output of a laid-out scene. Unlike the raster path, text marks
//! (axis labels, tick labels, legend entries, cell annotations) are kept.

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Point;
use crate::render::{Mark, TextAnchor};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG encoder for vector output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: u32,
    /// SVG height
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
        stroke_width: f32,
        rx: f32,
    },
    /// Polyline (connected line segments)
    Polyline {
        points: Vec<(f32, f32)>,
        stroke: Rgba,
        stroke_width: f32,
        dashed: bool,
    },
    /// Text
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        rotation: f32,
    },
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, background: Some(Rgba::WHITE), elements: Vec::new() }
    }

    /// Create an encoder holding the given marks.
    #[must_use]
    pub fn from_marks(width: u32, height: u32, marks: &[Mark]) -> Self {
        let mut encoder = Self::new(width, height);
        for mark in marks {
            encoder.add_mark(mark);
        }
        encoder
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Add a filled rectangle.
    #[must_use]
    pub fn rect(mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill: Some(fill),
            stroke: None,
            stroke_width: 1.0,
            rx: 0.0,
        });
        self
    }

    /// Add a polyline.
    #[must_use]
    pub fn polyline(mut self, points: &[(f32, f32)], stroke: Rgba, stroke_width: f32) -> Self {
        self.elements.push(SvgElement::Polyline {
            points: points.to_vec(),
            stroke,
            stroke_width,
            dashed: false,
        });
        self
    }

    /// Add text with anchor.
    #[must_use]
    pub fn text(
        mut self,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
    ) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor,
            rotation: 0.0,
        });
        self
    }

    /// Add a scene mark.
    pub fn add_mark(&mut self, mark: &Mark) {
        let element = match mark {
            Mark::Rect { rect, fill, stroke, stroke_width, corner_radius } => SvgElement::Rect {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                fill: *fill,
                stroke: *stroke,
                stroke_width: *stroke_width,
                rx: *corner_radius,
            },
            Mark::Polyline { points, color, width, dashed } => SvgElement::Polyline {
                points: points.iter().map(|&Point { x, y }| (x, y)).collect(),
                stroke: *color,
                stroke_width: *width,
                dashed: *dashed,
            },
            Mark::Text { position, text, size, color, anchor, rotation } => SvgElement::Text {
                x: position.x,
                y: position.y,
                text: text.clone(),
                font_size: *size,
                fill: *color,
                anchor: *anchor,
                rotation: *rotation,
            },
        };
        self.elements.push(element);
    }

    /// Number of elements added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no element has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, bg.to_css());
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

fn stroke_attr(stroke: Option<Rgba>, width: f32) -> String {
    stroke
        .map(|s| format!(r#" stroke="{}" stroke-width="{width}""#, s.to_css()))
        .unwrap_or_default()
}

/// Escape XML special characters.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect { x, y, width, height, fill, stroke, stroke_width, rx } => {
            let fill_attr = fill.map_or_else(|| "none".to_string(), Rgba::to_css);
            let rx_attr = if *rx > 0.0 { format!(r#" rx="{rx}""#) } else { String::new() };
            format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}"{rx_attr} fill="{fill_attr}"{}/>"#,
                stroke_attr(*stroke, *stroke_width)
            )
        }
        SvgElement::Polyline { points, stroke, stroke_width, dashed } => {
            let points_str: String =
                points.iter().map(|(x, y)| format!("{x},{y}")).collect::<Vec<_>>().join(" ");
            let dash_attr = if *dashed { r#" stroke-dasharray="6,4""# } else { "" };
            format!(
                r#"<polyline points="{points_str}" fill="none"{}{dash_attr}/>"#,
                stroke_attr(Some(*stroke), *stroke_width)
            )
        }
        SvgElement::Text { x, y, text, font_size, fill, anchor, rotation } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            // SVG rotates clockwise for positive angles
            let transform = if rotation.abs() > f32::EPSILON {
                format!(r#" transform="rotate({} {x} {y})""#, -rotation)
            } else {
                String::new()
            };
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{anchor_str}" font-family="sans-serif"{transform}>{}</text>"#,
                fill.to_css(),
                escape_xml(text)
            )
        }
    }
}
