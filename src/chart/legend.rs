//! Legends and their placement inside an axes.

use log::trace;

use crate::color::Rgba;
use crate::geometry::{Point, Rect};
use crate::render::{estimate_text_width, Mark, TextAnchor};

/// Where a legend sits inside the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum LegendLocation {
    /// Pick the candidate location overlapping the least data.
    #[default]
    Best,
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
    Right,
    CenterLeft,
    CenterRight,
    LowerCenter,
    UpperCenter,
    Center,
}

impl LegendLocation {
    /// Fixed locations tried by [`LegendLocation::Best`], in order of preference.
    pub const CANDIDATES: [Self; 10] = [
        Self::UpperRight,
        Self::UpperLeft,
        Self::LowerLeft,
        Self::LowerRight,
        Self::Right,
        Self::CenterLeft,
        Self::CenterRight,
        Self::LowerCenter,
        Self::UpperCenter,
        Self::Center,
    ];

    /// Box of `size` anchored in `area` at this location, `pad` pixels
    /// from the edges. `Best` is treated as upper right.
    #[must_use]
    pub fn place(self, area: Rect, size: (f32, f32), pad: f32) -> Rect {
        let (w, h) = size;
        let left = area.x + pad;
        let right = area.right() - pad - w;
        let hcenter = area.x + (area.width - w) / 2.0;
        let top = area.y + pad;
        let bottom = area.bottom() - pad - h;
        let vcenter = area.y + (area.height - h) / 2.0;

        let (x, y) = match self {
            Self::Best | Self::UpperRight => (right, top),
            Self::UpperLeft => (left, top),
            Self::LowerLeft => (left, bottom),
            Self::LowerRight => (right, bottom),
            Self::Right | Self::CenterRight => (right, vcenter),
            Self::CenterLeft => (left, vcenter),
            Self::LowerCenter => (hcenter, bottom),
            Self::UpperCenter => (hcenter, top),
            Self::Center => (hcenter, vcenter),
        };
        Rect::new(x, y, w, h)
    }
}

/// One legend row: a color swatch and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Label text.
    pub label: String,
    /// Swatch color.
    pub color: Rgba,
    /// Whether the swatch line is dashed.
    pub dashed: bool,
}

/// Legend configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Legend {
    location: LegendLocation,
    fancybox: bool,
    frame_alpha: f32,
    font_size: f32,
}

impl Default for Legend {
    fn default() -> Self {
        Self::new()
    }
}

impl Legend {
    const BORDER_PAD: f32 = 6.0;
    const INNER_PAD: f32 = 6.0;
    const HANDLE_LENGTH: f32 = 24.0;
    const HANDLE_GAP: f32 = 6.0;
    const ROW_SPACING: f32 = 1.4;

    /// Legend at the best location, square frame.
    #[must_use]
    pub fn new() -> Self {
        Self { location: LegendLocation::Best, fancybox: false, frame_alpha: 0.8, font_size: 10.0 }
    }

    /// Legend placed automatically where it hides the least data.
    #[must_use]
    pub fn best() -> Self {
        Self::new()
    }

    /// Set the location.
    #[must_use]
    pub fn location(mut self, location: LegendLocation) -> Self {
        self.location = location;
        self
    }

    /// Draw the frame with rounded corners.
    #[must_use]
    pub fn fancybox(mut self, fancy: bool) -> Self {
        self.fancybox = fancy;
        self
    }

    /// Set the frame opacity in `[0, 1]`.
    #[must_use]
    pub fn frame_alpha(mut self, alpha: f32) -> Self {
        self.frame_alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Set the font size in pixels.
    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Configured location (possibly `Best`).
    #[must_use]
    pub fn get_location(&self) -> LegendLocation {
        self.location
    }

    /// Whether the frame has rounded corners.
    #[must_use]
    pub fn is_fancybox(&self) -> bool {
        self.fancybox
    }

    /// Frame size in pixels for the given entries.
    #[must_use]
    pub fn size(&self, entries: &[LegendEntry]) -> (f32, f32) {
        let text_width = entries
            .iter()
            .map(|e| estimate_text_width(&e.label, self.font_size))
            .fold(0.0f32, f32::max);
        let width = 2.0 * Self::INNER_PAD + Self::HANDLE_LENGTH + Self::HANDLE_GAP + text_width;
        let height =
            2.0 * Self::INNER_PAD + entries.len() as f32 * self.font_size * Self::ROW_SPACING;
        (width, height)
    }

    /// Resolve the location for a legend of `size` in `area`.
    ///
    /// For `Best`, each candidate is scored by the number of data vertices
    /// inside the box plus the number of data segments crossing it; the
    /// first candidate with the lowest score wins.
    #[must_use]
    pub fn resolve(&self, area: Rect, size: (f32, f32), paths: &[Vec<Point>]) -> LegendLocation {
        if self.location != LegendLocation::Best {
            return self.location;
        }

        let mut best = (LegendLocation::UpperRight, usize::MAX);
        for candidate in LegendLocation::CANDIDATES {
            let bounds = candidate.place(area, size, Self::BORDER_PAD);
            let badness = overlap_badness(bounds, paths);
            trace!("legend candidate {candidate:?}: badness {badness}");
            if badness < best.1 {
                best = (candidate, badness);
                if badness == 0 {
                    break;
                }
            }
        }
        trace!("legend placed at {:?}", best.0);
        best.0
    }

    /// Lay out the legend as marks. Returns nothing for an empty entry list.
    #[must_use]
    pub fn draw(
        &self,
        area: Rect,
        entries: &[LegendEntry],
        paths: &[Vec<Point>],
        text_color: Rgba,
    ) -> Vec<Mark> {
        if entries.is_empty() {
            return Vec::new();
        }

        let size = self.size(entries);
        let frame = self.resolve(area, size, paths).place(area, size, Self::BORDER_PAD);

        let mut marks = Vec::with_capacity(1 + 2 * entries.len());
        marks.push(Mark::Rect {
            rect: frame,
            fill: Some(Rgba::WHITE.with_alpha((self.frame_alpha * 255.0).round() as u8)),
            stroke: Some(Rgba::rgb(204, 204, 204)),
            stroke_width: 1.0,
            corner_radius: if self.fancybox { 4.0 } else { 0.0 },
        });

        let row_height = self.font_size * Self::ROW_SPACING;
        for (i, entry) in entries.iter().enumerate() {
            let center_y = frame.y + Self::INNER_PAD + (i as f32 + 0.5) * row_height;
            let handle_x = frame.x + Self::INNER_PAD;
            marks.push(Mark::Polyline {
                points: vec![
                    Point::new(handle_x, center_y),
                    Point::new(handle_x + Self::HANDLE_LENGTH, center_y),
                ],
                color: entry.color,
                width: 2.0,
                dashed: entry.dashed,
            });
            marks.push(Mark::text(
                Point::new(
                    handle_x + Self::HANDLE_LENGTH + Self::HANDLE_GAP,
                    center_y + self.font_size * 0.35,
                ),
                entry.label.clone(),
                self.font_size,
                text_color,
                TextAnchor::Start,
            ));
        }
        marks
    }
}

fn overlap_badness(bounds: Rect, paths: &[Vec<Point>]) -> usize {
    paths
        .iter()
        .map(|path| {
            let inside = path.iter().filter(|&&p| bounds.contains(p)).count();
            let crossing =
                path.windows(2).filter(|s| bounds.intersects_segment(s[0], s[1])).count();
            inside + crossing
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str) -> LegendEntry {
        LegendEntry { label: label.to_string(), color: Rgba::BLUE, dashed: false }
    }

    fn area() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 300.0)
    }

    #[test]
    fn test_place_corners() {
        let size = (100.0, 40.0);
        assert_eq!(LegendLocation::UpperLeft.place(area(), size, 5.0), Rect::new(5.0, 5.0, 100.0, 40.0));
        assert_eq!(
            LegendLocation::LowerRight.place(area(), size, 5.0),
            Rect::new(295.0, 255.0, 100.0, 40.0)
        );
        assert_eq!(LegendLocation::Center.place(area(), size, 5.0), Rect::new(150.0, 130.0, 100.0, 40.0));
    }

    #[test]
    fn test_best_prefers_upper_right_when_empty() {
        let legend = Legend::best();
        assert_eq!(legend.resolve(area(), (100.0, 40.0), &[]), LegendLocation::UpperRight);
    }

    #[test]
    fn test_best_avoids_roc_like_curve() {
        // A curve hugging the upper-left corner, as a good ROC curve does
        let curve = vec![Point::new(20.0, 280.0), Point::new(20.0, 20.0), Point::new(380.0, 20.0)];
        let legend = Legend::best();
        assert_eq!(legend.resolve(area(), (120.0, 40.0), &[curve]), LegendLocation::LowerRight);
    }

    #[test]
    fn test_fixed_location_is_kept() {
        let legend = Legend::new().location(LegendLocation::UpperLeft);
        assert_eq!(legend.get_location(), LegendLocation::UpperLeft);
        let curve = vec![Point::new(0.0, 0.0), Point::new(400.0, 300.0)];
        assert_eq!(legend.resolve(area(), (50.0, 20.0), &[curve]), LegendLocation::UpperLeft);
    }

    #[test]
    fn test_draw_marks() {
        let legend = Legend::best().fancybox(true);
        let marks = legend.draw(area(), &[entry("AUC = 0.750")], &[], Rgba::BLACK);

        assert_eq!(marks.len(), 3);
        assert!(matches!(marks[0], Mark::Rect { corner_radius, .. } if corner_radius > 0.0));
        assert_eq!(marks[2].as_text(), Some("AUC = 0.750"));
    }

    #[test]
    fn test_draw_empty() {
        assert!(Legend::best().draw(area(), &[], &[], Rgba::BLACK).is_empty());
    }

    #[test]
    fn test_size_grows_with_entries() {
        let legend = Legend::new();
        let one = legend.size(&[entry("a")]);
        let two = legend.size(&[entry("a"), entry("longer label")]);
        assert!(two.0 > one.0);
        assert!(two.1 > one.1);
    }
}
