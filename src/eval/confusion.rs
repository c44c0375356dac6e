//! Confusion-matrix heatmap renderer.

use log::debug;

use crate::chart::{Axes, HeatmapStyle, ValueFormat};
use crate::error::Result;
use crate::metrics::{confusion_matrix, Normalization};

/// Presentation of a confusion matrix.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfusionStyle {
    /// Heatmap appearance.
    pub heatmap: HeatmapStyle,
    /// Scaling of the counts before display.
    pub normalization: Normalization,
}

impl ConfusionStyle {
    /// Raw counts on the default heatmap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heatmap appearance.
    #[must_use]
    pub fn heatmap(mut self, heatmap: HeatmapStyle) -> Self {
        self.heatmap = heatmap;
        self
    }

    /// Set the normalization.
    #[must_use]
    pub fn normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }
}

/// Draw the confusion matrix of `predicted` against `true_labels` on
/// `surface` as an annotated heatmap.
///
/// Rows are predicted classes and columns true classes, both in ascending
/// class order. Ticks show class positions unless `class_names` relabels
/// them; names beyond the class count are ignored and missing names keep
/// the position.
///
/// # Errors
///
/// Fails if the vectors are empty or differ in length.
pub fn render_confusion<'a, T: Ord + Clone>(
    true_labels: &[T],
    predicted: &[T],
    class_names: Option<&[&str]>,
    surface: &'a mut Axes,
) -> Result<&'a mut Axes> {
    render_confusion_with(true_labels, predicted, class_names, surface, &ConfusionStyle::default())
}

/// [`render_confusion`] with explicit presentation.
///
/// Normalized matrices are annotated with two decimals when the heatmap
/// uses the general format.
///
/// # Errors
///
/// Fails if the vectors are empty or differ in length.
pub fn render_confusion_with<'a, T: Ord + Clone>(
    true_labels: &[T],
    predicted: &[T],
    class_names: Option<&[&str]>,
    surface: &'a mut Axes,
    style: &ConfusionStyle,
) -> Result<&'a mut Axes> {
    let counts = confusion_matrix(true_labels, predicted)?;
    let n = counts.num_classes();
    let cells = transpose(&counts.normalized(style.normalization), n);

    let mut heatmap = style.heatmap.clone();
    if style.normalization != Normalization::None && heatmap.format == ValueFormat::General {
        heatmap.format = ValueFormat::Fixed(2);
    }
    surface.heatmap(&cells, n, n, &heatmap)?;

    if let Some(names) = class_names {
        let (positions, labels) = relabel(surface.xticks(), names);
        surface.set_xticks(positions, labels)?;
        let (positions, labels) = relabel(surface.yticks(), names);
        surface.set_yticks(positions, labels)?;
    }
    surface.set_xlabel("True class label");
    surface.set_ylabel("Predicted class label");

    debug!(
        "confusion: {n} classes, {} observations, {:?}",
        counts.total(),
        style.normalization
    );
    Ok(surface)
}

fn transpose(cells: &[f32], n: usize) -> Vec<f32> {
    (0..n * n).map(|i| cells[(i % n) * n + i / n]).collect()
}

/// Replace the label at position `i` with `names[i]` where one exists.
fn relabel(ticks: Vec<(f32, String)>, names: &[&str]) -> (Vec<f32>, Vec<String>) {
    ticks
        .into_iter()
        .enumerate()
        .map(|(i, (pos, label))| (pos, names.get(i).map_or(label, |name| (*name).to_string())))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Mark;

    #[test]
    fn test_transpose() {
        assert_eq!(transpose(&[1.0, 2.0, 3.0, 4.0], 2), vec![1.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    fn test_render_confusion_layout() {
        let mut ax = Axes::new();
        render_confusion(&[0, 1, 1, 0], &[0, 1, 0, 0], None, &mut ax).unwrap();

        let map = ax.heatmaps().next().unwrap();
        // row = predicted, column = true
        assert_eq!(map.value(0, 0), Some(1.0));
        assert_eq!(map.value(0, 1), Some(1.0));
        assert_eq!(map.value(1, 0), Some(0.0));
        assert_eq!(map.value(1, 1), Some(1.0));
        assert_eq!(ax.xtick_labels(), vec!["0", "1"]);
        assert_eq!(ax.xlabel(), Some("True class label"));
        assert_eq!(ax.ylabel(), Some("Predicted class label"));
        assert!(ax.colorbar().is_some());
    }

    #[test]
    fn test_partial_relabel() {
        let mut ax = Axes::new();
        render_confusion(&["a", "b", "c"], &["a", "b", "b"], Some(&["x", "y"][..]), &mut ax).unwrap();
        assert_eq!(ax.xtick_labels(), vec!["x", "y", "2"]);
        assert_eq!(ax.ytick_labels(), vec!["x", "y", "2"]);

        let mut ax = Axes::new();
        render_confusion(&[0, 1], &[1, 0], Some(&["neg", "pos", "extra"][..]), &mut ax).unwrap();
        assert_eq!(ax.xtick_labels(), vec!["neg", "pos"]);
    }

    #[test]
    fn test_normalized_annotations() {
        let mut ax = Axes::new();
        let style = ConfusionStyle::new().normalization(Normalization::Row);
        render_confusion_with(&[0, 0, 0, 1], &[0, 0, 1, 1], None, &mut ax, &style).unwrap();

        let map = ax.heatmaps().next().unwrap();
        // true class 0 was predicted 0 two times out of three
        assert_eq!(map.annotation(0, 0), Some("0.67"));
        assert_eq!(map.annotation(1, 1), Some("1.00"));
    }

    #[test]
    fn test_annotations_and_names_drawn() {
        let mut ax = Axes::new();
        render_confusion(&[0, 1, 1, 0], &[0, 1, 0, 0], Some(&["neg", "pos"][..]), &mut ax).unwrap();

        let marks = ax.draw(crate::geometry::Rect::new(0.0, 0.0, 640.0, 480.0)).unwrap();
        let texts: Vec<&str> = marks.iter().filter_map(Mark::as_text).collect();
        assert!(texts.contains(&"neg"));
        assert!(texts.contains(&"Predicted class label"));
        assert_eq!(texts.iter().filter(|t| **t == "1").count(), 3);
    }
}
