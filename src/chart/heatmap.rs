//! Annotated heatmaps and their color bars.

use log::debug;

use super::artist::HeatmapArtist;
use super::axes::Axes;
use super::style::AxesStyle;
use super::ticks::{format_general, format_tick, nice_step, nice_ticks};
use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::render::{Mark, TextAnchor};
use crate::scale::{ColorMap, ColorScale, Scale};
use trueno::Vector;

/// How cell values are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueFormat {
    /// Shortest of fixed or exponent notation, six significant digits.
    #[default]
    General,
    /// Fixed number of decimals.
    Fixed(usize),
}

impl ValueFormat {
    /// Format a value.
    #[must_use]
    pub fn format(self, value: f32) -> String {
        match self {
            Self::General => format_general(value),
            Self::Fixed(decimals) => format!("{value:.decimals$}"),
        }
    }
}

/// Appearance of a heatmap.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatmapStyle {
    /// Write each cell's value into the cell.
    pub annotate: bool,
    /// Format of the annotations.
    pub format: ValueFormat,
    /// Color map spread over the value range.
    pub color_map: ColorMap,
    /// Force square cells.
    pub square: bool,
    /// Cell border width in pixels; zero disables borders.
    pub line_width: f32,
    /// Cell border color.
    pub line_color: Rgba,
    /// Color bar height relative to the plotting area; `None` hides it.
    pub colorbar_shrink: Option<f32>,
    /// Fixed value range mapped onto the color map; `None` uses the data range.
    pub value_range: Option<(f32, f32)>,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            annotate: true,
            format: ValueFormat::General,
            color_map: ColorMap::Blues,
            square: true,
            line_width: 0.1,
            line_color: Rgba::BLACK,
            colorbar_shrink: Some(0.75),
            value_range: None,
        }
    }
}

impl HeatmapStyle {
    /// Annotated "Blues" heatmap with square cells, thin black borders and
    /// a color bar at three quarters of the axes height.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable cell annotations.
    #[must_use]
    pub fn annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Set the annotation format.
    #[must_use]
    pub fn format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the color map.
    #[must_use]
    pub fn color_map(mut self, map: ColorMap) -> Self {
        self.color_map = map;
        self
    }

    /// Force square cells or let them stretch.
    #[must_use]
    pub fn square(mut self, square: bool) -> Self {
        self.square = square;
        self
    }

    /// Set the cell border width and color.
    #[must_use]
    pub fn lines(mut self, width: f32, color: Rgba) -> Self {
        self.line_width = width;
        self.line_color = color;
        self
    }

    /// Set the color bar shrink factor, or `None` to hide the color bar.
    #[must_use]
    pub fn colorbar(mut self, shrink: Option<f32>) -> Self {
        self.colorbar_shrink = shrink.map(|s| s.clamp(0.05, 1.0));
        self
    }

    /// Pin the color map to a value range.
    #[must_use]
    pub fn value_range(mut self, min: f32, max: f32) -> Self {
        self.value_range = Some((min, max));
        self
    }
}

/// Vertical color scale legend drawn beside the plotting area.
#[derive(Debug, Clone)]
pub struct Colorbar {
    scale: ColorScale,
    shrink: f32,
}

impl Colorbar {
    const SLICES: usize = 64;
    /// Horizontal space reserved right of the plotting area.
    pub const RESERVED_WIDTH: f32 = 72.0;
    const GAP: f32 = 16.0;
    const BAR_WIDTH: f32 = 14.0;

    /// Create a color bar for `scale`, `shrink` times the axes height.
    #[must_use]
    pub fn new(scale: ColorScale, shrink: f32) -> Self {
        Self { scale, shrink: shrink.clamp(0.05, 1.0) }
    }

    /// Height relative to the plotting area.
    #[must_use]
    pub fn shrink(&self) -> f32 {
        self.shrink
    }

    /// The color scale shown.
    #[must_use]
    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    /// Bar bounds next to `plot`.
    #[must_use]
    pub fn bounds(&self, plot: Rect) -> Rect {
        let height = plot.height * self.shrink;
        Rect::new(
            plot.right() + Self::GAP,
            plot.y + (plot.height - height) / 2.0,
            Self::BAR_WIDTH,
            height,
        )
    }

    /// Lay out the bar, its outline and its tick labels.
    #[must_use]
    pub fn draw(&self, plot: Rect, style: &AxesStyle) -> Vec<Mark> {
        let bar = self.bounds(plot);
        let (lo, hi) = self.scale.domain();
        let slice = bar.height / Self::SLICES as f32;

        let mut marks = Vec::with_capacity(Self::SLICES + 12);
        for i in 0..Self::SLICES {
            let t = (i as f32 + 0.5) / Self::SLICES as f32;
            let y = bar.bottom() - (i + 1) as f32 * slice;
            marks.push(Mark::filled(
                Rect::new(bar.x, y, bar.width, slice),
                self.scale.scale(lo + t * (hi - lo)),
            ));
        }
        marks.push(Mark::outline(bar, style.axis_color, 1.0));

        let step = nice_step(hi - lo, 5);
        for value in nice_ticks(lo, hi, 5) {
            let y = bar.bottom() - (value - lo) / (hi - lo) * bar.height;
            marks.push(Mark::segment(
                Point::new(bar.right(), y),
                Point::new(bar.right() + style.tick_length, y),
                style.axis_color,
                1.0,
            ));
            marks.push(Mark::text(
                Point::new(bar.right() + style.tick_length + 3.0, y + style.tick_font_size * 0.35),
                format_tick(value, step),
                style.tick_font_size,
                style.text_color,
                TextAnchor::Start,
            ));
        }
        marks
    }
}

impl Axes {
    /// Draw `values` (row-major, `rows` x `cols`) as a heatmap.
    ///
    /// Cells sit on integer data coordinates with ticks at their centers,
    /// labelled with the row/column index. The y axis is inverted so row 0
    /// is at the top, and the view is fitted tightly around the grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty or `values` has the wrong length.
    pub fn heatmap(
        &mut self,
        values: &[f32],
        rows: usize,
        cols: usize,
        style: &HeatmapStyle,
    ) -> Result<&mut Self> {
        let domain = style.value_range.unwrap_or_else(|| value_extent(values));
        let domain = if (domain.1 - domain.0).abs() < f32::EPSILON {
            (domain.0, domain.0 + 1.0)
        } else {
            domain
        };
        let scale = style.color_map.scale(domain)?;

        let mut artist = HeatmapArtist::new(values, rows, cols, scale.clone())?;
        if style.annotate {
            artist = artist.annotate(values.iter().map(|&v| style.format.format(v)).collect())?;
        }
        if style.line_width > 0.0 {
            artist = artist.cell_borders(style.line_width, style.line_color);
        }
        self.add_heatmap(artist);

        let centers = |n: usize| (0..n).map(|i| i as f32 + 0.5).collect::<Vec<_>>();
        let indices = |n: usize| (0..n).map(|i| i.to_string()).collect::<Vec<_>>();
        self.set_xlim(0.0, cols as f32);
        self.set_ylim(0.0, rows as f32);
        self.set_xticks(centers(cols), indices(cols))?;
        self.set_yticks(centers(rows), indices(rows))?;
        self.invert_yaxis(true);
        self.set_aspect_equal(style.square);
        self.set_colorbar(style.colorbar_shrink.map(|shrink| Colorbar::new(scale, shrink)));

        debug!("heatmap: {rows}x{cols} cells, value range {domain:?}");
        Ok(self)
    }
}

fn value_extent(values: &[f32]) -> (f32, f32) {
    let finite: Vec<f32> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return (0.0, 1.0);
    }

    let vec = Vector::from_vec(finite);
    (vec.min().unwrap_or(0.0), vec.max().unwrap_or(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_extent() {
        assert_eq!(value_extent(&[3.0, f32::NAN, -2.0, 7.5, f32::INFINITY]), (-2.0, 7.5));
        assert_eq!(value_extent(&[f32::NAN]), (0.0, 1.0));
        assert_eq!(value_extent(&[]), (0.0, 1.0));
    }

    #[test]
    fn test_value_format() {
        assert_eq!(ValueFormat::General.format(12.0), "12");
        assert_eq!(ValueFormat::General.format(0.25), "0.25");
        assert_eq!(ValueFormat::Fixed(2).format(1.0 / 3.0), "0.33");
    }

    #[test]
    fn test_heatmap_style_defaults() {
        let style = HeatmapStyle::default();
        assert!(style.annotate);
        assert!(style.square);
        assert_eq!(style.color_map, ColorMap::Blues);
        assert_eq!(style.line_color, Rgba::BLACK);
        assert_eq!(style.colorbar_shrink, Some(0.75));
    }

    #[test]
    fn test_axes_heatmap_configures_view() {
        let mut ax = Axes::new();
        ax.heatmap(&[1.0, 0.0, 1.0, 1.0], 2, 2, &HeatmapStyle::default()).unwrap();

        assert!(ax.is_yaxis_inverted());
        assert!(ax.is_aspect_equal());
        assert_eq!(ax.xlim(), (0.0, 2.0));
        assert_eq!(ax.xtick_labels(), vec!["0", "1"]);
        assert_eq!(ax.ytick_labels(), vec!["0", "1"]);
        assert!((ax.colorbar().unwrap().shrink() - 0.75).abs() < f32::EPSILON);

        let map = ax.heatmaps().next().unwrap();
        assert_eq!(map.annotation(1, 0), Some("1"));
        assert_eq!(map.border(), (0.1, Rgba::BLACK));
    }

    #[test]
    fn test_heatmap_uniform_values() {
        let mut ax = Axes::new();
        ax.heatmap(&[4.0], 1, 1, &HeatmapStyle::default()).unwrap();
        let map = ax.heatmaps().next().unwrap();
        // Lowest color of the map
        assert_eq!(map.cell_color(0, 0), Some(ColorMap::Blues.stops()[0]));
    }

    #[test]
    fn test_heatmap_without_extras() {
        let mut ax = Axes::new();
        let style = HeatmapStyle::new().annotate(false).colorbar(None).square(false).lines(0.0, Rgba::BLACK);
        ax.heatmap(&[0.0, 1.0], 1, 2, &style).unwrap();

        assert!(ax.colorbar().is_none());
        assert!(!ax.is_aspect_equal());
        let map = ax.heatmaps().next().unwrap();
        assert_eq!(map.annotation(0, 0), None);
    }

    #[test]
    fn test_colorbar_draw() {
        let bar = Colorbar::new(ColorScale::blues((0.0, 10.0)).unwrap(), 0.5);
        let plot = Rect::new(0.0, 0.0, 100.0, 200.0);

        let bounds = bar.bounds(plot);
        assert!((bounds.height - 100.0).abs() < f32::EPSILON);
        assert!((bounds.y - 50.0).abs() < f32::EPSILON);

        let marks = bar.draw(plot, &AxesStyle::default());
        let labels: Vec<&str> = marks.iter().filter_map(Mark::as_text).collect();
        assert_eq!(labels, vec!["0", "2", "4", "6", "8", "10"]);
    }
}
