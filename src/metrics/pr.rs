//! Precision-recall curve and average precision.

use log::debug;

use super::{binary_clf_curve, BinaryLabel};
use crate::error::{Error, Result};

/// Computed precision-recall curve.
///
/// Ordered by increasing threshold, so recall is non-increasing along the
/// vectors. The final point is `(recall 0, precision 1)` and has no
/// threshold, hence `thresholds.len() == precision.len() - 1`.
#[derive(Debug, Clone)]
pub struct PrCurve {
    /// Precision at each threshold (y axis).
    pub precision: Vec<f32>,
    /// Recall at each threshold (x axis).
    pub recall: Vec<f32>,
    /// Increasing score thresholds.
    pub thresholds: Vec<f32>,
}

impl PrCurve {
    /// Number of points on the curve.
    #[must_use]
    pub fn len(&self) -> usize {
        self.precision.len()
    }

    /// Whether the curve has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.precision.is_empty()
    }

    /// Average precision summarizing this curve.
    ///
    /// `AP = sum_n (R_n - R_{n+1}) * P_n`, the precision at each threshold
    /// weighted by the recall gained there. No interpolation is applied.
    #[must_use]
    pub fn average_precision(&self) -> f32 {
        let ap: f64 = self
            .recall
            .windows(2)
            .zip(&self.precision)
            .map(|(r, &p)| (f64::from(r[0]) - f64::from(r[1])) * f64::from(p))
            .sum();
        ap as f32
    }
}

/// Compute the precision-recall curve from binary labels and prediction scores.
///
/// # Errors
///
/// - [`Error::DataLengthMismatch`] / [`Error::EmptyData`] for misaligned or empty input
/// - [`Error::NonFiniteScore`] for NaN or infinite scores
/// - [`Error::NotBinary`] for more than two label values
/// - [`Error::UnknownLabel`] for a label outside `{0, 1}`, `{-1, 1}` or booleans
/// - [`Error::UndefinedMetric`] when labels hold no positive sample
pub fn precision_recall_curve<L: BinaryLabel>(labels: &[L], scores: &[f32]) -> Result<PrCurve> {
    let counts = binary_clf_curve(labels, scores)?;

    let positives = counts.positives();
    if positives == 0 {
        return Err(Error::UndefinedMetric(
            "recall is undefined without positive samples".to_string(),
        ));
    }

    let n = counts.thresholds.len();
    let mut precision = Vec::with_capacity(n + 1);
    let mut recall = Vec::with_capacity(n + 1);
    let mut thresholds = Vec::with_capacity(n);

    for i in (0..n).rev() {
        let tp = counts.tps[i] as f32;
        let predicted = (counts.tps[i] + counts.fps[i]) as f32;
        precision.push(tp / predicted);
        recall.push(tp / positives as f32);
        thresholds.push(counts.thresholds[i]);
    }
    precision.push(1.0);
    recall.push(0.0);

    debug!("precision-recall curve: {} samples, {} points", labels.len(), precision.len());

    Ok(PrCurve { precision, recall, thresholds })
}

/// Average precision score from labels and scores.
///
/// # Errors
///
/// Propagates errors from [`precision_recall_curve`].
pub fn average_precision_score<L: BinaryLabel>(labels: &[L], scores: &[f32]) -> Result<f32> {
    let ap = precision_recall_curve(labels, scores)?.average_precision();
    debug!("average precision: {ap:.4}");
    Ok(ap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_pr_reference_values() {
        let labels = [0, 0, 1, 1];
        let scores = [0.1, 0.4, 0.35, 0.8];

        let pr = precision_recall_curve(&labels, &scores).unwrap();

        assert_eq!(pr.recall, vec![1.0, 1.0, 0.5, 0.5, 0.0]);
        assert_relative_eq!(pr.precision[0], 0.5);
        assert_relative_eq!(pr.precision[1], 2.0 / 3.0);
        assert_relative_eq!(pr.precision[2], 0.5);
        assert_relative_eq!(pr.precision[3], 1.0);
        assert_relative_eq!(pr.precision[4], 1.0);
        assert_eq!(pr.thresholds, vec![0.1, 0.35, 0.4, 0.8]);
        assert_eq!(pr.thresholds.len(), pr.len() - 1);
    }

    #[test]
    fn test_average_precision_reference() {
        let labels = [0, 0, 1, 1];
        let scores = [0.1, 0.4, 0.35, 0.8];
        assert_relative_eq!(
            average_precision_score(&labels, &scores).unwrap(),
            0.833_333,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_average_precision_perfect() {
        let labels = [false, false, true, true];
        let scores = [0.1, 0.2, 0.8, 0.9];
        assert_relative_eq!(average_precision_score(&labels, &scores).unwrap(), 1.0);
    }

    #[test]
    fn test_average_precision_all_tied() {
        // A single threshold: precision equals the positive rate
        let labels = [1, 0, 0, 0];
        let scores = [0.5; 4];
        assert_relative_eq!(average_precision_score(&labels, &scores).unwrap(), 0.25);
    }

    #[test]
    fn test_pr_no_positives() {
        assert!(matches!(
            precision_recall_curve(&[0, 0, 0], &[0.1, 0.2, 0.3]),
            Err(Error::UndefinedMetric(_))
        ));
    }

    #[test]
    fn test_pr_only_positives() {
        let pr = precision_recall_curve(&[1, 1], &[0.3, 0.7]).unwrap();
        assert!(pr.precision.iter().all(|&p| (p - 1.0).abs() < f32::EPSILON));
        assert_relative_eq!(pr.average_precision(), 1.0);
    }

    #[test]
    fn test_pr_empty_and_mismatch() {
        assert!(matches!(precision_recall_curve::<u8>(&[], &[]), Err(Error::EmptyData)));
        assert!(matches!(
            precision_recall_curve(&[0, 1, 1], &[0.5, 0.6]),
            Err(Error::DataLengthMismatch { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_pr_curve_shape(
            data in prop::collection::vec((any::<bool>(), 0.0f32..1.0), 1..200)
        ) {
            let (labels, scores): (Vec<bool>, Vec<f32>) = data.into_iter().unzip();
            prop_assume!(labels.iter().any(|&l| l));

            let pr = precision_recall_curve(&labels, &scores).unwrap();

            prop_assert_eq!(pr.recall[0], 1.0);
            prop_assert_eq!(*pr.recall.last().unwrap(), 0.0);
            prop_assert!(pr.recall.windows(2).all(|w| w[1] <= w[0]));
            prop_assert!(pr.precision.iter().all(|p| (0.0..=1.0).contains(p)));

            let ap = pr.average_precision();
            prop_assert!((0.0..=1.0 + 1e-5).contains(&ap));
        }
    }
}
