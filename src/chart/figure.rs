//! Figures: a canvas holding a grid of axes.

use std::fs;
use std::path::Path;

use log::debug;

use super::axes::Axes;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::output::{PngEncoder, SvgEncoder};
use crate::render::rasterize;

/// A canvas of `width` x `height` pixels split into a grid of axes.
///
/// The figure tracks a current axes, which is what renderers draw on when
/// the caller does not supply one explicitly (see [`Figure::gca`]).
#[derive(Debug, Clone)]
pub struct Figure {
    width: u32,
    height: u32,
    rows: usize,
    cols: usize,
    axes: Vec<Axes>,
    current: usize,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    /// Empty 640x480 figure with a single grid cell.
    #[must_use]
    pub fn new() -> Self {
        Self { width: 640, height: 480, rows: 1, cols: 1, axes: Vec::new(), current: 0 }
    }

    /// Figure with a `rows` x `cols` grid of empty axes.
    ///
    /// # Errors
    ///
    /// Returns an error if either count is zero.
    pub fn subplots(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::Rendering(format!("cannot lay out a {rows}x{cols} subplot grid")));
        }
        let axes = (0..rows * cols).map(|_| Axes::new()).collect();
        Ok(Self { rows, cols, axes, ..Self::new() })
    }

    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The current axes, created on first use.
    pub fn gca(&mut self) -> &mut Axes {
        if self.axes.is_empty() {
            self.axes.push(Axes::new());
            self.current = 0;
        }
        &mut self.axes[self.current]
    }

    /// Make axes `index` current.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no axes at `index`.
    pub fn sca(&mut self, index: usize) -> Result<&mut Axes> {
        if index >= self.axes.len() {
            return Err(Error::Rendering(format!(
                "axes index {index} out of range for {} axes",
                self.axes.len()
            )));
        }
        self.current = index;
        Ok(&mut self.axes[index])
    }

    /// Axes at `index` in row-major grid order.
    #[must_use]
    pub fn axes(&self, index: usize) -> Option<&Axes> {
        self.axes.get(index)
    }

    /// Mutable axes at `index` in row-major grid order.
    pub fn axes_mut(&mut self, index: usize) -> Option<&mut Axes> {
        self.axes.get_mut(index)
    }

    /// Number of axes.
    #[must_use]
    pub fn num_axes(&self) -> usize {
        self.axes.len()
    }

    /// Index of the current axes.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Pixel bounds of grid cell `index`.
    #[must_use]
    pub fn cell_rect(&self, index: usize) -> Rect {
        let cell_w = self.width as f32 / self.cols as f32;
        let cell_h = self.height as f32 / self.rows as f32;
        let (row, col) = (index / self.cols, index % self.cols);
        Rect::new(col as f32 * cell_w, row as f32 * cell_h, cell_w, cell_h)
    }

    /// Rasterize every axes. Text is omitted from raster output.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas is empty or a cell is too small.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(Rgba::WHITE);
        for (i, ax) in self.axes.iter().enumerate() {
            rasterize(&mut fb, &ax.draw(self.cell_rect(i))?);
        }
        Ok(fb)
    }

    /// Render every axes into one SVG document.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas is empty or a cell is too small.
    pub fn to_svg(&self) -> Result<String> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions { width: self.width, height: self.height });
        }
        let mut svg = SvgEncoder::new(self.width, self.height);
        for (i, ax) in self.axes.iter().enumerate() {
            for mark in ax.draw(self.cell_rect(i))? {
                svg.add_mark(&mark);
            }
        }
        Ok(svg.render())
    }

    /// Write the figure as a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error on layout, encoding or I/O failure.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PngEncoder::write_to_file(&self.to_framebuffer()?, path)
    }

    /// Write the figure as an SVG file.
    ///
    /// # Errors
    ///
    /// Returns an error on layout or I/O failure.
    pub fn write_svg<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.to_svg()?)?;
        debug!("wrote {}x{} SVG to {}", self.width, self.height, path.as_ref().display());
        Ok(())
    }
}

impl batuta_common::display::WithDimensions for Figure {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
