//! Color types for plot rendering.
//!
//! Provides the RGBA color used by every renderer, the default line color
//! cycle, and a luminance helper for choosing legible text over filled cells.
//!
//! # References
//!
//! - ITU-R Recommendation BT.709 (relative luminance coefficients).

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    /// Light grey used for reference lines.
    pub const LIGHT_GREY: Self = Self::new(200, 200, 200, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self::new(
            (f32::from(self.r) * inv_t + f32::from(other.r) * t) as u8,
            (f32::from(self.g) * inv_t + f32::from(other.g) * t) as u8,
            (f32::from(self.b) * inv_t + f32::from(other.b) * t) as u8,
            (f32::from(self.a) * inv_t + f32::from(other.a) * t) as u8,
        )
    }

    /// Relative luminance in `[0, 1]` (BT.709 weights on linearized sRGB).
    #[must_use]
    pub fn relative_luminance(self) -> f32 {
        fn linearize(c: u8) -> f32 {
            let c = f32::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// Text color that stays legible on top of this color.
    ///
    /// Dark text on light backgrounds, white text on dark ones. The cut-off
    /// matches the one commonly used for annotated heatmaps.
    #[must_use]
    pub fn contrasting_text(self) -> Self {
        if self.relative_luminance() > 0.408 {
            Self::rgb(38, 38, 38)
        } else {
            Self::WHITE
        }
    }

    /// CSS color string (`rgb(...)` or `rgba(...)`).
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, f32::from(self.a) / 255.0)
        }
    }
}

/// The default categorical color cycle for line and step artists.
///
/// Successive series drawn on the same axes take successive entries,
/// wrapping around after the last one.
pub const COLOR_CYCLE: [Rgba; 10] = [
    Rgba::rgb(31, 119, 180),
    Rgba::rgb(255, 127, 14),
    Rgba::rgb(44, 160, 44),
    Rgba::rgb(214, 39, 40),
    Rgba::rgb(148, 103, 189),
    Rgba::rgb(140, 86, 75),
    Rgba::rgb(227, 119, 194),
    Rgba::rgb(127, 127, 127),
    Rgba::rgb(188, 189, 34),
    Rgba::rgb(23, 190, 207),
];

/// Color at position `index` of [`COLOR_CYCLE`], wrapping around.
#[must_use]
pub fn cycle_color(index: usize) -> Rgba {
    COLOR_CYCLE[index % COLOR_CYCLE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK.to_array(), [0, 0, 0, 255]);
        assert_eq!(Rgba::WHITE.to_array(), [255, 255, 255, 255]);
        assert_eq!(Rgba::TRANSPARENT.a, 0);
    }

    #[test]
    fn test_rgba_lerp() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 0.5);
        assert!(mid.r > 120 && mid.r < 135);
        assert_eq!(Rgba::BLACK.lerp(Rgba::WHITE, 2.0), Rgba::WHITE);
    }

    #[test]
    fn test_relative_luminance_extremes() {
        assert!(Rgba::BLACK.relative_luminance() < 0.001);
        assert!((Rgba::WHITE.relative_luminance() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_contrasting_text() {
        assert_eq!(Rgba::rgb(8, 48, 107).contrasting_text(), Rgba::WHITE);
        assert_ne!(Rgba::rgb(247, 251, 255).contrasting_text(), Rgba::WHITE);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(cycle_color(0), COLOR_CYCLE[0]);
        assert_eq!(cycle_color(10), COLOR_CYCLE[0]);
        assert_eq!(cycle_color(13), COLOR_CYCLE[3]);
    }

    #[test]
    fn test_to_css() {
        assert_eq!(Rgba::RED.to_css(), "rgb(255,0,0)");
        assert_eq!(Rgba::new(0, 0, 0, 0).to_css(), "rgba(0,0,0,0.000)");
    }
}
