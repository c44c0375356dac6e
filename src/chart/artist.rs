//! Data-carrying artists held by an [`Axes`](super::Axes).

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::scale::{ColorScale, Scale};

/// Where the vertical segments of a step plot sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepWhere {
    /// `y[i]` holds on the interval `(x[i-1], x[i]]`.
    #[default]
    Pre,
    /// `y[i]` holds on the interval `[x[i], x[i+1])`.
    Post,
    /// Steps happen halfway between consecutive x values.
    Mid,
}

/// How consecutive data points are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawStyle {
    /// Straight segments between points.
    #[default]
    Line,
    /// Horizontal and vertical segments only.
    Steps(StepWhere),
}

/// A line or step series.
#[derive(Debug, Clone, PartialEq)]
pub struct LineArtist {
    x: Vec<f32>,
    y: Vec<f32>,
    color: Rgba,
    width: Option<f32>,
    dashed: bool,
    draw_style: DrawStyle,
    label: Option<String>,
}

impl LineArtist {
    /// Create a line through `(x[i], y[i])`.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices are empty or differ in length.
    pub fn new(x: &[f32], y: &[f32]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::DataLengthMismatch { x_len: x.len(), y_len: y.len() });
        }
        if x.is_empty() {
            return Err(Error::EmptyData);
        }
        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            color: Rgba::BLACK,
            width: None,
            dashed: false,
            draw_style: DrawStyle::Line,
            label: None,
        })
    }

    /// Set the stroke color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Set the stroke width in pixels; unset uses the axes style.
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Draw with a dash pattern.
    #[must_use]
    pub fn dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }

    /// Set how points are joined.
    #[must_use]
    pub fn draw_style(mut self, style: DrawStyle) -> Self {
        self.draw_style = style;
        self
    }

    /// Set the legend label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Replace the legend label in place.
    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    /// Legend label, if any.
    #[must_use]
    pub fn get_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Stroke color.
    #[must_use]
    pub fn get_color(&self) -> Rgba {
        self.color
    }

    /// Explicit stroke width, if set.
    #[must_use]
    pub fn get_width(&self) -> Option<f32> {
        self.width
    }

    /// Whether the line is dashed.
    #[must_use]
    pub fn is_dashed(&self) -> bool {
        self.dashed
    }

    /// How points are joined.
    #[must_use]
    pub fn get_draw_style(&self) -> DrawStyle {
        self.draw_style
    }

    /// X data.
    #[must_use]
    pub fn xdata(&self) -> &[f32] {
        &self.x
    }

    /// Y data.
    #[must_use]
    pub fn ydata(&self) -> &[f32] {
        &self.y
    }

    /// Vertices actually stroked, in data coordinates.
    ///
    /// Equal to the data for [`DrawStyle::Line`]; step styles insert the
    /// corner vertices.
    #[must_use]
    pub fn path(&self) -> Vec<(f32, f32)> {
        let points = self.x.iter().copied().zip(self.y.iter().copied());
        let DrawStyle::Steps(step) = self.draw_style else {
            return points.collect();
        };

        let mut path = Vec::with_capacity(self.x.len() * 3);
        let mut prev: Option<(f32, f32)> = None;
        for (x, y) in points {
            if let Some((px, py)) = prev {
                match step {
                    StepWhere::Pre => path.push((px, y)),
                    StepWhere::Post => path.push((x, py)),
                    StepWhere::Mid => {
                        let mx = (px + x) / 2.0;
                        path.push((mx, py));
                        path.push((mx, y));
                    }
                }
            }
            path.push((x, y));
            prev = Some((x, y));
        }
        path
    }

    /// Data bounds as `((xmin, xmax), (ymin, ymax))`, ignoring non-finite values.
    #[must_use]
    pub fn data_limits(&self) -> Option<((f32, f32), (f32, f32))> {
        Some((finite_extent(&self.x)?, finite_extent(&self.y)?))
    }
}

/// A grid of colored cells, optionally annotated.
///
/// Cell `(row, col)` covers data `x` in `[col, col + 1]` and `y` in
/// `[row, row + 1]`.
#[derive(Debug, Clone)]
pub struct HeatmapArtist {
    values: Vec<f32>,
    rows: usize,
    cols: usize,
    color_scale: ColorScale,
    annotations: Option<Vec<String>>,
    line_width: f32,
    line_color: Rgba,
}

impl HeatmapArtist {
    /// Create a heatmap from row-major `values`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty or `values` does not hold
    /// `rows * cols` entries.
    pub fn new(values: &[f32], rows: usize, cols: usize, color_scale: ColorScale) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyData);
        }
        if values.len() != rows * cols {
            return Err(Error::DataLengthMismatch { x_len: values.len(), y_len: rows * cols });
        }
        Ok(Self {
            values: values.to_vec(),
            rows,
            cols,
            color_scale,
            annotations: None,
            line_width: 0.0,
            line_color: Rgba::WHITE,
        })
    }

    /// Attach one text annotation per cell, row-major.
    ///
    /// # Errors
    ///
    /// Returns an error if the count differs from the number of cells.
    pub fn annotate(mut self, annotations: Vec<String>) -> Result<Self> {
        if annotations.len() != self.values.len() {
            return Err(Error::DataLengthMismatch {
                x_len: annotations.len(),
                y_len: self.values.len(),
            });
        }
        self.annotations = Some(annotations);
        Ok(self)
    }

    /// Outline every cell with the given width and color.
    #[must_use]
    pub fn cell_borders(mut self, width: f32, color: Rgba) -> Self {
        self.line_width = width;
        self.line_color = color;
        self
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell value.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> Option<f32> {
        (row < self.rows && col < self.cols).then(|| self.values[row * self.cols + col])
    }

    /// Fill color of a cell.
    #[must_use]
    pub fn cell_color(&self, row: usize, col: usize) -> Option<Rgba> {
        self.value(row, col).map(|v| self.color_scale.scale(v))
    }

    /// Annotation text of a cell.
    #[must_use]
    pub fn annotation(&self, row: usize, col: usize) -> Option<&str> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.annotations.as_ref().map(|a| a[row * self.cols + col].as_str())
    }

    /// The color scale mapping values to fills.
    #[must_use]
    pub fn color_scale(&self) -> &ColorScale {
        &self.color_scale
    }

    /// Cell border width and color.
    #[must_use]
    pub fn border(&self) -> (f32, Rgba) {
        (self.line_width, self.line_color)
    }
}

/// Anything an axes can draw from data.
#[derive(Debug, Clone)]
pub enum Artist {
    /// Line or step series.
    Line(LineArtist),
    /// Cell grid.
    Heatmap(HeatmapArtist),
}

impl Artist {
    /// Legend label, if the artist has one.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Line(line) => line.get_label(),
            Self::Heatmap(_) => None,
        }
    }

    /// Data bounds as `((xmin, xmax), (ymin, ymax))`.
    #[must_use]
    pub fn data_limits(&self) -> Option<((f32, f32), (f32, f32))> {
        match self {
            Self::Line(line) => line.data_limits(),
            Self::Heatmap(map) => Some(((0.0, map.cols as f32), (0.0, map.rows as f32))),
        }
    }

    /// The line, if this is one.
    #[must_use]
    pub fn as_line(&self) -> Option<&LineArtist> {
        match self {
            Self::Line(line) => Some(line),
            Self::Heatmap(_) => None,
        }
    }

    /// The heatmap, if this is one.
    #[must_use]
    pub fn as_heatmap(&self) -> Option<&HeatmapArtist> {
        match self {
            Self::Heatmap(map) => Some(map),
            Self::Line(_) => None,
        }
    }
}

fn finite_extent(values: &[f32]) -> Option<(f32, f32)> {
    values.iter().filter(|v| v.is_finite()).fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_artist_validation() {
        assert!(matches!(LineArtist::new(&[0.0], &[]), Err(Error::DataLengthMismatch { .. })));
        assert!(matches!(LineArtist::new(&[], &[]), Err(Error::EmptyData)));
    }

    #[test]
    fn test_line_path_is_data() {
        let line = LineArtist::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.5]).unwrap();
        assert_eq!(line.path(), vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.5)]);
    }

    #[test]
    fn test_step_pre_path() {
        let line = LineArtist::new(&[1.0, 0.5, 0.0], &[0.5, 1.0, 1.0])
            .unwrap()
            .draw_style(DrawStyle::Steps(StepWhere::Pre));

        assert_eq!(
            line.path(),
            vec![(1.0, 0.5), (1.0, 1.0), (0.5, 1.0), (0.5, 1.0), (0.0, 1.0)]
        );
    }

    #[test]
    fn test_step_post_and_mid_paths() {
        let post = LineArtist::new(&[0.0, 2.0], &[0.0, 1.0])
            .unwrap()
            .draw_style(DrawStyle::Steps(StepWhere::Post));
        assert_eq!(post.path(), vec![(0.0, 0.0), (2.0, 0.0), (2.0, 1.0)]);

        let mid = LineArtist::new(&[0.0, 2.0], &[0.0, 1.0])
            .unwrap()
            .draw_style(DrawStyle::Steps(StepWhere::Mid));
        assert_eq!(mid.path(), vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (2.0, 1.0)]);
    }

    #[test]
    fn test_line_data_limits_skip_infinite() {
        let line = LineArtist::new(&[f32::INFINITY, 0.2, 0.8], &[1.0, 0.0, 3.0]).unwrap();
        assert_eq!(line.data_limits(), Some(((0.2, 0.8), (0.0, 3.0))));
    }

    #[test]
    fn test_heatmap_artist() {
        let scale = ColorScale::blues((0.0, 3.0)).unwrap();
        let map = HeatmapArtist::new(&[0.0, 1.0, 2.0, 3.0], 2, 2, scale)
            .unwrap()
            .annotate(vec!["0".into(), "1".into(), "2".into(), "3".into()])
            .unwrap()
            .cell_borders(0.1, Rgba::BLACK);

        assert_eq!(map.value(1, 0), Some(2.0));
        assert_eq!(map.value(2, 0), None);
        assert_eq!(map.annotation(0, 1), Some("1"));
        assert_ne!(map.cell_color(0, 0), map.cell_color(1, 1));
        assert_eq!(map.border().1, Rgba::BLACK);
        assert_eq!(Artist::Heatmap(map).data_limits(), Some(((0.0, 2.0), (0.0, 2.0))));
    }

    #[test]
    fn test_heatmap_shape_errors() {
        let scale = ColorScale::blues((0.0, 1.0)).unwrap();
        assert!(HeatmapArtist::new(&[0.0; 3], 2, 2, scale.clone()).is_err());
        assert!(HeatmapArtist::new(&[], 0, 2, scale.clone()).is_err());
        let map = HeatmapArtist::new(&[0.0; 4], 2, 2, scale).unwrap();
        assert!(map.annotate(vec!["x".into()]).is_err());
    }
}
