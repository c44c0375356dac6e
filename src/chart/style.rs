//! Axes styling.
//!
//! Controls the non-data appearance of an axes: colors, font sizes,
//! margins and grid lines.

use crate::color::Rgba;

/// Style applied when an axes is drawn.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxesStyle {
    /// Background of the whole axes cell.
    pub background: Rgba,
    /// Background of the plotting area inside the spines.
    pub face: Rgba,
    /// Spine and tick color.
    pub axis_color: Rgba,
    /// Text color for labels and ticks.
    pub text_color: Rgba,
    /// Grid line color.
    pub grid_color: Rgba,
    /// Draw grid lines at major ticks.
    pub show_grid: bool,
    /// Tick label font size in pixels.
    pub tick_font_size: f32,
    /// Axis label font size in pixels.
    pub label_font_size: f32,
    /// Title font size in pixels.
    pub title_font_size: f32,
    /// Default stroke width of line artists.
    pub line_width: f32,
    /// Tick mark length in pixels.
    pub tick_length: f32,
    /// Space reserved left of the plotting area (y tick labels, y label).
    pub margin_left: f32,
    /// Space reserved right of the plotting area.
    pub margin_right: f32,
    /// Space reserved above the plotting area (title).
    pub margin_top: f32,
    /// Space reserved below the plotting area (x tick labels, x label).
    pub margin_bottom: f32,
}

impl Default for AxesStyle {
    fn default() -> Self {
        Self::classic()
    }
}

impl AxesStyle {
    /// White face, black spines, no grid.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            background: Rgba::WHITE,
            face: Rgba::WHITE,
            axis_color: Rgba::BLACK,
            text_color: Rgba::BLACK,
            grid_color: Rgba::rgb(176, 176, 176),
            show_grid: false,
            tick_font_size: 10.0,
            label_font_size: 11.0,
            title_font_size: 12.0,
            line_width: 1.5,
            tick_length: 4.0,
            margin_left: 64.0,
            margin_right: 16.0,
            margin_top: 28.0,
            margin_bottom: 48.0,
        }
    }

    /// Grey panel with white grid lines.
    #[must_use]
    pub fn grey() -> Self {
        Self {
            face: Rgba::rgb(235, 235, 235),
            axis_color: Rgba::rgb(50, 50, 50),
            text_color: Rgba::rgb(50, 50, 50),
            grid_color: Rgba::WHITE,
            show_grid: true,
            ..Self::classic()
        }
    }

    /// Dark background for dark-mode notebooks and dashboards.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: Rgba::rgb(30, 30, 30),
            face: Rgba::rgb(40, 40, 40),
            axis_color: Rgba::rgb(180, 180, 180),
            text_color: Rgba::rgb(220, 220, 220),
            grid_color: Rgba::rgb(60, 60, 60),
            show_grid: true,
            ..Self::classic()
        }
    }

    /// Set the plotting area color.
    #[must_use]
    pub fn face(mut self, color: Rgba) -> Self {
        self.face = color;
        self
    }

    /// Enable or disable grid lines.
    #[must_use]
    pub fn grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Set the default line width.
    #[must_use]
    pub fn line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    /// Set all four margins at once: left, right, top, bottom.
    #[must_use]
    pub fn margins(mut self, left: f32, right: f32, top: f32, bottom: f32) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_classic_is_default() {
        assert_eq!(AxesStyle::default(), AxesStyle::classic());
        assert!(!AxesStyle::classic().show_grid);
    }

    #[test]
    fn test_style_presets_share_layout() {
        let grey = AxesStyle::grey();
        assert!(grey.show_grid);
        assert_eq!(grey.margin_left, AxesStyle::classic().margin_left);
        assert_ne!(AxesStyle::dark().background, Rgba::WHITE);
    }

    #[test]
    fn test_style_builders() {
        let style = AxesStyle::classic().grid(true).line_width(3.0).margins(1.0, 2.0, 3.0, 4.0);
        assert!(style.show_grid);
        assert!((style.line_width - 3.0).abs() < f32::EPSILON);
        assert!((style.margin_bottom - 4.0).abs() < f32::EPSILON);
    }
}
