//! The plotting surface.
//!
//! An [`Axes`] is a retained-mode surface: plotting calls record artists
//! and settings, and nothing is rasterized until the axes is drawn into a
//! viewport. Renderers borrow an axes mutably and hand the same borrow
//! back, so several plots can be composed on one surface.

use log::debug;

use super::artist::{Artist, DrawStyle, HeatmapArtist, LineArtist, StepWhere};
use super::heatmap::Colorbar;
use super::legend::{Legend, LegendEntry};
use super::style::AxesStyle;
use super::ticks::{autoscale, format_tick, nice_step, nice_ticks};
use crate::color::{cycle_color, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::output::SvgEncoder;
use crate::render::{rasterize, Mark, TextAnchor};
use crate::scale::{LinearScale, Scale};

/// Target number of intervals between automatic ticks.
const TICK_TARGET: usize = 6;

/// Tick positions with explicit labels.
#[derive(Debug, Clone, PartialEq)]
struct FixedTicks {
    positions: Vec<f32>,
    labels: Vec<String>,
}

impl FixedTicks {
    fn new(positions: Vec<f32>, labels: Vec<String>) -> Result<Self> {
        if positions.len() != labels.len() {
            return Err(Error::DataLengthMismatch { x_len: positions.len(), y_len: labels.len() });
        }
        Ok(Self { positions, labels })
    }
}

/// A plotting surface holding artists, labels, ticks and a legend.
#[derive(Debug, Clone, Default)]
pub struct Axes {
    artists: Vec<Artist>,
    title: Option<String>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    xlim: Option<(f32, f32)>,
    ylim: Option<(f32, f32)>,
    xticks: Option<FixedTicks>,
    yticks: Option<FixedTicks>,
    y_inverted: bool,
    aspect_equal: bool,
    legend: Option<Legend>,
    colorbar: Option<Colorbar>,
    cycle_index: usize,
    style: AxesStyle,
}

impl Axes {
    /// Create an empty axes with the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty axes with `style`.
    #[must_use]
    pub fn with_style(style: AxesStyle) -> Self {
        Self { style, ..Self::default() }
    }

    /// Current style.
    #[must_use]
    pub fn style(&self) -> &AxesStyle {
        &self.style
    }

    /// Replace the style.
    pub fn set_style(&mut self, style: AxesStyle) {
        self.style = style;
    }

    // ========================================================================
    // Artists
    // ========================================================================

    /// Plot `y` against `x` as a connected line in the next cycle color.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices are empty or differ in length.
    pub fn plot(&mut self, x: &[f32], y: &[f32], label: Option<&str>) -> Result<()> {
        self.add_cycled(LineArtist::new(x, y)?, label);
        Ok(())
    }

    /// Plot `y` against `x` as a step line in the next cycle color.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices are empty or differ in length.
    pub fn step(
        &mut self,
        x: &[f32],
        y: &[f32],
        label: Option<&str>,
        where_: StepWhere,
    ) -> Result<()> {
        let line = LineArtist::new(x, y)?.draw_style(DrawStyle::Steps(where_));
        self.add_cycled(line, label);
        Ok(())
    }

    fn add_cycled(&mut self, line: LineArtist, label: Option<&str>) {
        let mut line = line.color(cycle_color(self.cycle_index));
        self.cycle_index += 1;
        line.set_label(label.map(str::to_string));
        self.add_line(line);
    }

    /// Add a fully configured line. The color cycle does not advance.
    pub fn add_line(&mut self, line: LineArtist) {
        self.artists.push(Artist::Line(line));
    }

    /// Add a heatmap artist without touching ticks or limits.
    pub fn add_heatmap(&mut self, heatmap: HeatmapArtist) {
        self.artists.push(Artist::Heatmap(heatmap));
    }

    /// All artists in drawing order.
    #[must_use]
    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    /// Line artists in drawing order.
    pub fn lines(&self) -> impl Iterator<Item = &LineArtist> {
        self.artists.iter().filter_map(Artist::as_line)
    }

    /// Heatmap artists in drawing order.
    pub fn heatmaps(&self) -> impl Iterator<Item = &HeatmapArtist> {
        self.artists.iter().filter_map(Artist::as_heatmap)
    }

    /// Remove all artists and settings, keeping the style.
    pub fn clear(&mut self) {
        let style = std::mem::take(&mut self.style);
        *self = Self::with_style(style);
    }

    // ========================================================================
    // Labels
    // ========================================================================

    /// Set the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Title, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the x axis label.
    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = Some(label.into());
    }

    /// X axis label, if set.
    #[must_use]
    pub fn xlabel(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }

    /// Set the y axis label.
    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = Some(label.into());
    }

    /// Y axis label, if set.
    #[must_use]
    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    // ========================================================================
    // Limits and ticks
    // ========================================================================

    /// Fix the x view limits.
    pub fn set_xlim(&mut self, lo: f32, hi: f32) {
        self.xlim = Some((lo, hi));
    }

    /// Fix the y view limits.
    pub fn set_ylim(&mut self, lo: f32, hi: f32) {
        self.ylim = Some((lo, hi));
    }

    /// X view limits: fixed, or autoscaled around the data.
    #[must_use]
    pub fn xlim(&self) -> (f32, f32) {
        self.xlim.unwrap_or_else(|| self.auto_limits(|(x, _)| x))
    }

    /// Y view limits: fixed, or autoscaled around the data.
    #[must_use]
    pub fn ylim(&self) -> (f32, f32) {
        self.ylim.unwrap_or_else(|| self.auto_limits(|(_, y)| y))
    }

    fn auto_limits(&self, pick: impl Fn(((f32, f32), (f32, f32))) -> (f32, f32)) -> (f32, f32) {
        let extent = self
            .artists
            .iter()
            .filter_map(|a| a.data_limits().map(&pick))
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)));
        match extent {
            Some((lo, hi)) => autoscale(lo, hi),
            None => (0.0, 1.0),
        }
    }

    /// Place x ticks at `positions` with the given labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the two vectors differ in length.
    pub fn set_xticks(&mut self, positions: Vec<f32>, labels: Vec<String>) -> Result<()> {
        self.xticks = Some(FixedTicks::new(positions, labels)?);
        Ok(())
    }

    /// Place y ticks at `positions` with the given labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the two vectors differ in length.
    pub fn set_yticks(&mut self, positions: Vec<f32>, labels: Vec<String>) -> Result<()> {
        self.yticks = Some(FixedTicks::new(positions, labels)?);
        Ok(())
    }

    /// Visible x ticks as `(position, label)`.
    #[must_use]
    pub fn xticks(&self) -> Vec<(f32, String)> {
        resolve_ticks(self.xticks.as_ref(), self.xlim())
    }

    /// Visible y ticks as `(position, label)`.
    #[must_use]
    pub fn yticks(&self) -> Vec<(f32, String)> {
        resolve_ticks(self.yticks.as_ref(), self.ylim())
    }

    /// Labels of the visible x ticks.
    #[must_use]
    pub fn xtick_labels(&self) -> Vec<String> {
        self.xticks().into_iter().map(|(_, label)| label).collect()
    }

    /// Labels of the visible y ticks.
    #[must_use]
    pub fn ytick_labels(&self) -> Vec<String> {
        self.yticks().into_iter().map(|(_, label)| label).collect()
    }

    /// Draw the y axis top-down (first value at the top).
    pub fn invert_yaxis(&mut self, inverted: bool) {
        self.y_inverted = inverted;
    }

    /// Whether the y axis runs top-down.
    #[must_use]
    pub fn is_yaxis_inverted(&self) -> bool {
        self.y_inverted
    }

    /// Use the same pixel size for one data unit on both axes.
    pub fn set_aspect_equal(&mut self, equal: bool) {
        self.aspect_equal = equal;
    }

    /// Whether data units are square.
    #[must_use]
    pub fn is_aspect_equal(&self) -> bool {
        self.aspect_equal
    }

    // ========================================================================
    // Legend and color bar
    // ========================================================================

    /// Show a legend of the labelled artists.
    pub fn legend(&mut self, legend: Legend) {
        self.legend = Some(legend);
    }

    /// Legend configuration, if a legend was requested.
    #[must_use]
    pub fn get_legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    /// Entries a legend would show: labelled artists in drawing order.
    ///
    /// Labels starting with an underscore are hidden.
    #[must_use]
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.lines()
            .filter_map(|line| {
                let label = line.get_label()?;
                (!label.starts_with('_')).then(|| LegendEntry {
                    label: label.to_string(),
                    color: line.get_color(),
                    dashed: line.is_dashed(),
                })
            })
            .collect()
    }

    /// Attach or remove a color bar.
    pub fn set_colorbar(&mut self, colorbar: Option<Colorbar>) {
        self.colorbar = colorbar;
    }

    /// The color bar, if any.
    #[must_use]
    pub fn colorbar(&self) -> Option<&Colorbar> {
        self.colorbar.as_ref()
    }

    // ========================================================================
    // Drawing
    // ========================================================================

    /// Lay the axes out inside `viewport` (pixels) as drawing marks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rendering`] if the viewport leaves no room for the
    /// plotting area.
    pub fn draw(&self, viewport: Rect) -> Result<Vec<Mark>> {
        let style = &self.style;
        let reserved_right =
            style.margin_right + if self.colorbar.is_some() { Colorbar::RESERVED_WIDTH } else { 0.0 };
        let mut plot = Rect::new(
            viewport.x + style.margin_left,
            viewport.y + style.margin_top,
            viewport.width - style.margin_left - reserved_right,
            viewport.height - style.margin_top - style.margin_bottom,
        );
        if plot.width < 1.0 || plot.height < 1.0 {
            return Err(Error::Rendering(format!(
                "viewport {}x{} too small for axes",
                viewport.width, viewport.height
            )));
        }

        let (x0, x1) = self.xlim();
        let (y0, y1) = self.ylim();
        if self.aspect_equal {
            plot = fit_equal_aspect(plot, (x1 - x0).abs(), (y1 - y0).abs());
        }

        let transform = Transform {
            x: LinearScale::new((x0, x1), (plot.x, plot.right()))?,
            y: if self.y_inverted {
                LinearScale::new((y0, y1), (plot.y, plot.bottom()))?
            } else {
                LinearScale::new((y0, y1), (plot.bottom(), plot.y))?
            },
        };

        let mut marks = vec![Mark::filled(viewport, style.background), Mark::filled(plot, style.face)];
        let xticks = self.xticks();
        let yticks = self.yticks();

        if style.show_grid {
            for (pos, _) in &xticks {
                let px = transform.x.scale(*pos);
                marks.push(Mark::segment(
                    Point::new(px, plot.y),
                    Point::new(px, plot.bottom()),
                    style.grid_color,
                    1.0,
                ));
            }
            for (pos, _) in &yticks {
                let py = transform.y.scale(*pos);
                marks.push(Mark::segment(
                    Point::new(plot.x, py),
                    Point::new(plot.right(), py),
                    style.grid_color,
                    1.0,
                ));
            }
        }

        let mut line_paths = Vec::new();
        for artist in &self.artists {
            match artist {
                Artist::Line(line) => {
                    let points = transform.path(line);
                    marks.push(Mark::Polyline {
                        points: points.clone(),
                        color: line.get_color(),
                        width: line.get_width().unwrap_or(style.line_width),
                        dashed: line.is_dashed(),
                    });
                    line_paths.push(points);
                }
                Artist::Heatmap(map) => draw_heatmap(&mut marks, map, &transform, style),
            }
        }

        marks.push(Mark::outline(plot, style.axis_color, 1.0));
        self.draw_ticks(&mut marks, plot, &transform, &xticks, &yticks);
        self.draw_labels(&mut marks, viewport, plot);

        if let Some(legend) = &self.legend {
            marks.extend(legend.draw(plot, &self.legend_entries(), &line_paths, style.text_color));
        }
        if let Some(colorbar) = &self.colorbar {
            marks.extend(colorbar.draw(plot, style));
        }

        debug!("axes drawn: {} artists, {} marks", self.artists.len(), marks.len());
        Ok(marks)
    }

    fn draw_ticks(
        &self,
        marks: &mut Vec<Mark>,
        plot: Rect,
        transform: &Transform,
        xticks: &[(f32, String)],
        yticks: &[(f32, String)],
    ) {
        let style = &self.style;
        let len = style.tick_length;
        let size = style.tick_font_size;

        for (pos, label) in xticks {
            let px = transform.x.scale(*pos);
            marks.push(Mark::segment(
                Point::new(px, plot.bottom()),
                Point::new(px, plot.bottom() + len),
                style.axis_color,
                1.0,
            ));
            marks.push(Mark::text(
                Point::new(px, plot.bottom() + len + size + 2.0),
                label.clone(),
                size,
                style.text_color,
                TextAnchor::Middle,
            ));
        }
        for (pos, label) in yticks {
            let py = transform.y.scale(*pos);
            marks.push(Mark::segment(
                Point::new(plot.x - len, py),
                Point::new(plot.x, py),
                style.axis_color,
                1.0,
            ));
            marks.push(Mark::text(
                Point::new(plot.x - len - 3.0, py + size * 0.35),
                label.clone(),
                size,
                style.text_color,
                TextAnchor::End,
            ));
        }
    }

    fn draw_labels(&self, marks: &mut Vec<Mark>, viewport: Rect, plot: Rect) {
        let style = &self.style;
        let center_x = plot.x + plot.width / 2.0;

        if let Some(xlabel) = &self.xlabel {
            marks.push(Mark::text(
                Point::new(
                    center_x,
                    plot.bottom() + style.tick_length + style.tick_font_size + style.label_font_size + 10.0,
                ),
                xlabel.clone(),
                style.label_font_size,
                style.text_color,
                TextAnchor::Middle,
            ));
        }
        if let Some(ylabel) = &self.ylabel {
            marks.push(Mark::Text {
                position: Point::new(viewport.x + style.label_font_size + 4.0, plot.y + plot.height / 2.0),
                text: ylabel.clone(),
                size: style.label_font_size,
                color: style.text_color,
                anchor: TextAnchor::Middle,
                rotation: 90.0,
            });
        }
        if let Some(title) = &self.title {
            marks.push(Mark::text(
                Point::new(center_x, plot.y - 8.0),
                title.clone(),
                style.title_font_size,
                style.text_color,
                TextAnchor::Middle,
            ));
        }
    }

    /// Render onto a new framebuffer of `width` x `height` pixels.
    ///
    /// Text is omitted from raster output.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions or a viewport too small to lay out.
    pub fn to_framebuffer(&self, width: u32, height: u32) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(width, height)?;
        fb.clear(self.style.background);
        let marks = self.draw(Rect::new(0.0, 0.0, width as f32, height as f32))?;
        rasterize(&mut fb, &marks);
        Ok(fb)
    }

    /// Render as an SVG document of `width` x `height` pixels.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions or a viewport too small to lay out.
    pub fn to_svg(&self, width: u32, height: u32) -> Result<String> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let marks = self.draw(Rect::new(0.0, 0.0, width as f32, height as f32))?;
        Ok(SvgEncoder::from_marks(width, height, &marks).background(None).render())
    }
}

/// Data to pixel mapping of one axes.
struct Transform {
    x: LinearScale,
    y: LinearScale,
}

impl Transform {
    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(self.x.scale(x), self.y.scale(y))
    }

    /// Pixel path of a line, dropping non-finite vertices.
    fn path(&self, line: &LineArtist) -> Vec<Point> {
        line.path()
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(x, y)| self.point(x, y))
            .collect()
    }
}

fn draw_heatmap(marks: &mut Vec<Mark>, map: &HeatmapArtist, transform: &Transform, style: &AxesStyle) {
    let (border_width, border_color) = map.border();
    for row in 0..map.rows() {
        for col in 0..map.cols() {
            let a = transform.point(col as f32, row as f32);
            let b = transform.point(col as f32 + 1.0, row as f32 + 1.0);
            let rect = Rect::new(a.x.min(b.x), a.y.min(b.y), (b.x - a.x).abs(), (b.y - a.y).abs());
            let fill = map.cell_color(row, col).unwrap_or(Rgba::TRANSPARENT);

            marks.push(Mark::Rect {
                rect,
                fill: Some(fill),
                stroke: (border_width > 0.0).then_some(border_color),
                stroke_width: border_width,
                corner_radius: 0.0,
            });
            if let Some(text) = map.annotation(row, col) {
                let center = rect.center();
                marks.push(Mark::text(
                    Point::new(center.x, center.y + style.tick_font_size * 0.35),
                    text,
                    style.tick_font_size,
                    fill.contrasting_text(),
                    TextAnchor::Middle,
                ));
            }
        }
    }
}

/// Shrink `plot` around its center so both axes share one pixel scale.
fn fit_equal_aspect(plot: Rect, x_span: f32, y_span: f32) -> Rect {
    if x_span <= f32::EPSILON || y_span <= f32::EPSILON {
        return plot;
    }
    let unit = (plot.width / x_span).min(plot.height / y_span);
    let (width, height) = (unit * x_span, unit * y_span);
    Rect::new(
        plot.x + (plot.width - width) / 2.0,
        plot.y + (plot.height - height) / 2.0,
        width,
        height,
    )
}

fn resolve_ticks(fixed: Option<&FixedTicks>, (lo, hi): (f32, f32)) -> Vec<(f32, String)> {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let tolerance = (hi - lo) * 1e-6;
    let visible = |p: f32| p >= lo - tolerance && p <= hi + tolerance;

    match fixed {
        Some(ticks) => ticks
            .positions
            .iter()
            .zip(&ticks.labels)
            .filter(|(p, _)| visible(**p))
            .map(|(p, l)| (*p, l.clone()))
            .collect(),
        None => {
            let step = nice_step(hi - lo, TICK_TARGET);
            nice_ticks(lo, hi, TICK_TARGET).into_iter().map(|v| (v, format_tick(v, step))).collect()
        }
    }
}
