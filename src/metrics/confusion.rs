//! Confusion count matrix and the per-class summary derived from it.
//!
//! # References
//!
//! - Stehman, S. V. (1997). "Selecting and interpreting measures of thematic
//!   classification accuracy." Remote Sensing of Environment, 62(1), 77-89.

use log::debug;

use crate::error::{Error, Result};

/// How confusion counts are scaled into rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Normalization {
    /// Raw counts.
    #[default]
    None,
    /// Each true class (row) sums to one.
    Row,
    /// Each predicted class (column) sums to one.
    Column,
    /// The whole matrix sums to one.
    All,
}

/// Count table cross-tabulating true against predicted classes.
///
/// Stored row-major: row = true class, column = predicted class, both
/// ordered by ascending class value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionCounts<T> {
    classes: Vec<T>,
    counts: Vec<usize>,
}

impl<T> ConfusionCounts<T> {
    /// Distinct class values in ascending order.
    #[must_use]
    pub fn classes(&self) -> &[T] {
        &self.classes
    }

    /// Number of distinct classes.
    #[must_use]
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Observations of class `true_idx` predicted as class `pred_idx`.
    ///
    /// Indices are positions in [`classes`](Self::classes).
    #[must_use]
    pub fn get(&self, true_idx: usize, pred_idx: usize) -> Option<usize> {
        let n = self.num_classes();
        if true_idx < n && pred_idx < n {
            Some(self.counts[true_idx * n + pred_idx])
        } else {
            None
        }
    }

    /// Row-major counts.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.counts
    }

    /// Rows of the matrix, one per true class.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.counts.chunks(self.num_classes().max(1))
    }

    /// Total number of observations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Row-major cells scaled by `mode`, in the layout of
    /// [`as_slice`](Self::as_slice).
    ///
    /// Rows or columns without observations stay at zero.
    #[must_use]
    pub fn normalized(&self, mode: Normalization) -> Vec<f32> {
        let n = self.num_classes();
        let row_sums: Vec<usize> = self.rows().map(|row| row.iter().sum()).collect();
        let col_sums: Vec<usize> =
            (0..n).map(|col| (0..n).map(|row| self.counts[row * n + col]).sum()).collect();
        let total = self.total();

        self.counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let divisor = match mode {
                    Normalization::None => 1,
                    Normalization::Row => row_sums[i / n],
                    Normalization::Column => col_sums[i % n],
                    Normalization::All => total,
                };
                if divisor == 0 {
                    0.0
                } else {
                    (count as f64 / divisor as f64) as f32
                }
            })
            .collect()
    }

    /// Accuracy, precision, recall and F1 per class.
    #[must_use]
    pub fn summary(&self) -> ClassificationSummary {
        let n = self.num_classes();
        let cell = |row: usize, col: usize| self.counts[row * n + col];

        let true_positives: Vec<usize> = (0..n).map(|i| cell(i, i)).collect();

        // Column sum minus diagonal
        let false_positives: Vec<usize> = (0..n)
            .map(|col| (0..n).map(|row| cell(row, col)).sum::<usize>() - cell(col, col))
            .collect();

        // Row sum minus diagonal
        let false_negatives: Vec<usize> = (0..n)
            .map(|row| (0..n).map(|col| cell(row, col)).sum::<usize>() - cell(row, row))
            .collect();

        let total = self.total();
        let correct: usize = true_positives.iter().sum();
        let accuracy = if total > 0 { correct as f32 / total as f32 } else { 0.0 };

        let ratio = |num: usize, other: usize| {
            if num + other > 0 {
                num as f32 / (num + other) as f32
            } else {
                0.0
            }
        };

        let precision: Vec<f32> =
            (0..n).map(|i| ratio(true_positives[i], false_positives[i])).collect();
        let recall: Vec<f32> =
            (0..n).map(|i| ratio(true_positives[i], false_negatives[i])).collect();

        ClassificationSummary {
            accuracy,
            precision,
            recall,
            true_positives,
            false_positives,
            false_negatives,
        }
    }
}

/// Count the confusion matrix of `true_labels` against `predicted`.
///
/// Classes are the sorted union of the values found in either vector.
///
/// # Errors
///
/// - [`Error::DataLengthMismatch`] if the vectors differ in length
/// - [`Error::EmptyData`] if they are empty
pub fn confusion_matrix<T: Ord + Clone>(
    true_labels: &[T],
    predicted: &[T],
) -> Result<ConfusionCounts<T>> {
    if true_labels.len() != predicted.len() {
        return Err(Error::DataLengthMismatch {
            x_len: true_labels.len(),
            y_len: predicted.len(),
        });
    }
    if true_labels.is_empty() {
        return Err(Error::EmptyData);
    }

    let mut classes: Vec<T> = true_labels.iter().chain(predicted).cloned().collect();
    classes.sort();
    classes.dedup();

    let n = classes.len();
    let mut counts = vec![0usize; n * n];
    for (t, p) in true_labels.iter().zip(predicted) {
        // Every value is present in `classes` by construction
        if let (Ok(row), Ok(col)) = (classes.binary_search(t), classes.binary_search(p)) {
            counts[row * n + col] += 1;
        }
    }

    debug!("confusion matrix: {} observations, {n} classes", true_labels.len());

    Ok(ConfusionCounts { classes, counts })
}

/// Metrics derived from a confusion matrix, one entry per class.
#[derive(Debug, Clone)]
pub struct ClassificationSummary {
    /// Overall accuracy.
    pub accuracy: f32,
    /// Per-class precision.
    pub precision: Vec<f32>,
    /// Per-class recall (sensitivity).
    pub recall: Vec<f32>,
    /// Per-class true positives.
    pub true_positives: Vec<usize>,
    /// Per-class false positives.
    pub false_positives: Vec<usize>,
    /// Per-class false negatives.
    pub false_negatives: Vec<usize>,
}

impl ClassificationSummary {
    /// F1 score for each class.
    #[must_use]
    pub fn f1_scores(&self) -> Vec<f32> {
        self.precision
            .iter()
            .zip(&self.recall)
            .map(|(&p, &r)| if p + r > 0.0 { 2.0 * p * r / (p + r) } else { 0.0 })
            .collect()
    }

    /// Macro-averaged F1 score.
    #[must_use]
    pub fn macro_f1(&self) -> f32 {
        let scores = self.f1_scores();
        if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f32>() / scores.len() as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_normalized() {
        // true 0: [2, 2], true 1: [0, 0], true 2: [1, 3]
        let cm = confusion_matrix(&[0, 0, 0, 0, 2, 2, 2, 2], &[0, 0, 1, 1, 0, 1, 1, 1]).unwrap();
        assert_eq!(cm.classes(), &[0, 1, 2]);

        let raw = cm.normalized(Normalization::None);
        assert_eq!(raw, vec![2.0, 2.0, 0.0, 0.0, 0.0, 0.0, 1.0, 3.0, 0.0]);

        let rows = cm.normalized(Normalization::Row);
        assert_relative_eq!(rows[0], 0.5);
        assert_relative_eq!(rows[7], 0.75);
        assert_eq!(&rows[3..6], &[0.0, 0.0, 0.0]);

        let cols = cm.normalized(Normalization::Column);
        assert_relative_eq!(cols[0], 2.0 / 3.0);
        assert_relative_eq!(cols[7], 0.6);
        assert_eq!(cols[2], 0.0);

        let all = cm.normalized(Normalization::All);
        assert_relative_eq!(all.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_confusion_matrix_counts() {
        let cm = confusion_matrix(&[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap();

        assert_eq!(cm.classes(), &[0, 1]);
        assert_eq!(cm.get(0, 0), Some(1));
        assert_eq!(cm.get(0, 1), Some(0));
        assert_eq!(cm.get(1, 0), Some(1));
        assert_eq!(cm.get(1, 1), Some(1));
        assert_eq!(cm.get(2, 0), None);
        assert_eq!(cm.total(), 4);
    }

    #[test]
    fn test_confusion_matrix_row_major() {
        let cm = confusion_matrix(&[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap();
        // Rows are true classes
        assert_eq!(cm.as_slice(), &[1, 0, 1, 1]);
    }

    #[test]
    fn test_confusion_matrix_class_union() {
        // "c" only appears among predictions
        let cm = confusion_matrix(&["b", "a", "a"], &["b", "c", "a"]).unwrap();

        assert_eq!(cm.classes(), &["a", "b", "c"]);
        assert_eq!(cm.get(0, 2), Some(1));
        assert_eq!(cm.rows().count(), 3);
    }

    #[test]
    fn test_confusion_matrix_errors() {
        assert!(matches!(
            confusion_matrix(&[0, 1], &[0]),
            Err(Error::DataLengthMismatch { x_len: 2, y_len: 1 })
        ));
        assert!(matches!(confusion_matrix::<i32>(&[], &[]), Err(Error::EmptyData)));
    }

    #[test]
    fn test_summary_metrics() {
        let y_true = [0, 0, 1, 1, 1, 0];
        let y_pred = [0, 1, 1, 1, 0, 0];
        let summary = confusion_matrix(&y_true, &y_pred).unwrap().summary();

        assert_relative_eq!(summary.accuracy, 4.0 / 6.0);
        assert_eq!(summary.true_positives, vec![2, 2]);
        assert_eq!(summary.false_positives, vec![1, 1]);
        assert_eq!(summary.false_negatives, vec![1, 1]);
        assert_relative_eq!(summary.precision[1], 2.0 / 3.0);
        assert_relative_eq!(summary.recall[1], 2.0 / 3.0);
        assert_relative_eq!(summary.macro_f1(), 2.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_summary_perfect() {
        let summary = confusion_matrix(&[0, 1, 2], &[0, 1, 2]).unwrap().summary();
        assert_relative_eq!(summary.accuracy, 1.0);
        assert!(summary.f1_scores().iter().all(|&f| (f - 1.0).abs() < f32::EPSILON));
    }

    #[test]
    fn test_summary_class_never_predicted() {
        let summary = confusion_matrix(&[0, 1], &[0, 0]).unwrap().summary();
        assert_relative_eq!(summary.precision[1], 0.0);
        assert_relative_eq!(summary.f1_scores()[1], 0.0);
    }

    proptest! {
        #[test]
        fn prop_confusion_total_matches_input(
            pairs in prop::collection::vec((0u8..5, 0u8..5), 1..300)
        ) {
            let (t, p): (Vec<u8>, Vec<u8>) = pairs.into_iter().unzip();
            let cm = confusion_matrix(&t, &p).unwrap();

            prop_assert_eq!(cm.total(), t.len());
            prop_assert!(cm.classes().windows(2).all(|w| w[0] < w[1]));

            let diagonal: usize = (0..cm.num_classes()).filter_map(|i| cm.get(i, i)).sum();
            let agree = t.iter().zip(&p).filter(|(a, b)| a == b).count();
            prop_assert_eq!(diagonal, agree);
        }
    }
}
