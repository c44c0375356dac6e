//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (pixel position, color).

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self { domain_min: domain.0, domain_max: domain.1, range_min: range.0, range_max: range.1 })
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Named sequential color maps for heatmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorMap {
    /// White to dark blue (ColorBrewer "Blues").
    #[default]
    Blues,
    /// White to dark green (ColorBrewer "Greens").
    Greens,
    /// White to black.
    Greys,
    /// Perceptually uniform purple-green-yellow.
    Viridis,
}

impl ColorMap {
    /// Control colors of the map, low to high.
    #[must_use]
    pub fn stops(self) -> Vec<Rgba> {
        match self {
            Self::Blues => vec![
                Rgba::rgb(247, 251, 255),
                Rgba::rgb(222, 235, 247),
                Rgba::rgb(198, 219, 239),
                Rgba::rgb(158, 202, 225),
                Rgba::rgb(107, 174, 214),
                Rgba::rgb(66, 146, 198),
                Rgba::rgb(33, 113, 181),
                Rgba::rgb(8, 81, 156),
                Rgba::rgb(8, 48, 107),
            ],
            Self::Greens => vec![
                Rgba::rgb(247, 252, 245),
                Rgba::rgb(199, 233, 192),
                Rgba::rgb(116, 196, 118),
                Rgba::rgb(35, 139, 69),
                Rgba::rgb(0, 68, 27),
            ],
            Self::Greys => vec![Rgba::WHITE, Rgba::BLACK],
            Self::Viridis => vec![
                Rgba::rgb(68, 1, 84),
                Rgba::rgb(59, 82, 139),
                Rgba::rgb(33, 145, 140),
                Rgba::rgb(94, 201, 98),
                Rgba::rgb(253, 231, 37),
            ],
        }
    }

    /// Build a color scale over `domain`.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain bounds are equal.
    pub fn scale(self, domain: (f32, f32)) -> Result<ColorScale> {
        ColorScale::new(self.stops(), domain)
    }
}

/// Color scale for mapping values to colors.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Create a new color scale.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty or domain is invalid.
    pub fn new(colors: Vec<Rgba>, domain: (f32, f32)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain("Color scale requires at least one color".to_string()));
        }

        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self { colors, domain_min: domain.0, domain_max: domain.1 })
    }

    /// Create a sequential blue scale.
    #[must_use]
    pub fn blues(domain: (f32, f32)) -> Option<Self> {
        ColorMap::Blues.scale(domain).ok()
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let segment_count = self.colors.len() - 1;
        let segment = (t * segment_count as f32).floor() as usize;
        let segment = segment.min(segment_count - 1);

        let local_t = t * segment_count as f32 - segment as f32;

        self.colors[segment].lerp(self.colors[segment + 1], local_t)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (*self.colors.first().unwrap_or(&Rgba::BLACK), *self.colors.last().unwrap_or(&Rgba::WHITE))
    }
}
