//! Receiver operating characteristic curve and area under it.

use log::debug;

use super::{binary_clf_curve, BinaryLabel};
use crate::error::{Error, Result};

/// Computed ROC curve.
///
/// Points run from `(0, 0)` (threshold `+inf`, nothing predicted positive)
/// to `(1, 1)`. Collinear intermediate points are dropped.
#[derive(Debug, Clone)]
pub struct RocCurve {
    /// False positive rate at each threshold (x axis).
    pub fpr: Vec<f32>,
    /// True positive rate at each threshold (y axis).
    pub tpr: Vec<f32>,
    /// Decreasing score thresholds; the first is `f32::INFINITY`.
    pub thresholds: Vec<f32>,
}

impl RocCurve {
    /// Number of points on the curve.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fpr.len()
    }

    /// Whether the curve has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fpr.is_empty()
    }

    /// Area under this curve.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`auc`].
    pub fn auc(&self) -> Result<f32> {
        auc(&self.fpr, &self.tpr)
    }
}

/// Compute the ROC curve from binary labels and prediction scores.
///
/// Scores are swept from high to low; each distinct score yields one
/// `(FPR, TPR)` point.
///
/// # Errors
///
/// - [`Error::DataLengthMismatch`] / [`Error::EmptyData`] for misaligned or empty input
/// - [`Error::NonFiniteScore`] for NaN or infinite scores
/// - [`Error::NotBinary`] for more than two label values
/// - [`Error::UnknownLabel`] for a label outside `{0, 1}`, `{-1, 1}` or booleans
/// - [`Error::UndefinedMetric`] when labels hold no positive or no negative sample
pub fn roc_curve<L: BinaryLabel>(labels: &[L], scores: &[f32]) -> Result<RocCurve> {
    let counts = binary_clf_curve(labels, scores)?;

    let positives = counts.positives();
    let negatives = counts.negatives();
    if positives == 0 {
        return Err(Error::UndefinedMetric(
            "ROC curve needs at least one positive sample".to_string(),
        ));
    }
    if negatives == 0 {
        return Err(Error::UndefinedMetric(
            "ROC curve needs at least one negative sample".to_string(),
        ));
    }

    let keep = corner_indices(&counts.fps, &counts.tps);

    let mut fpr = Vec::with_capacity(keep.len() + 1);
    let mut tpr = Vec::with_capacity(keep.len() + 1);
    let mut thresholds = Vec::with_capacity(keep.len() + 1);

    fpr.push(0.0);
    tpr.push(0.0);
    thresholds.push(f32::INFINITY);

    for i in keep {
        fpr.push(counts.fps[i] as f32 / negatives as f32);
        tpr.push(counts.tps[i] as f32 / positives as f32);
        thresholds.push(counts.thresholds[i]);
    }

    debug!(
        "roc curve: {} samples, {} thresholds, {} points",
        labels.len(),
        counts.thresholds.len(),
        fpr.len()
    );

    Ok(RocCurve { fpr, tpr, thresholds })
}

/// Indices where the curve changes direction, plus both ends.
///
/// A point is kept when the second difference of either count series is
/// non-zero there, i.e. it is not collinear with its neighbours.
fn corner_indices(fps: &[usize], tps: &[usize]) -> Vec<usize> {
    let n = fps.len();
    if n <= 2 {
        return (0..n).collect();
    }

    let second_diff = |v: &[usize], i: usize| v[i + 1] as i64 - 2 * v[i] as i64 + v[i - 1] as i64;

    let mut keep = Vec::with_capacity(n);
    keep.push(0);
    keep.extend((1..n - 1).filter(|&i| second_diff(fps, i) != 0 || second_diff(tps, i) != 0));
    keep.push(n - 1);
    keep
}

/// Area under a curve by the trapezoidal rule.
///
/// `x` must be monotonic; a non-increasing `x` yields a positive area as well.
///
/// # Errors
///
/// - [`Error::DataLengthMismatch`] if `x` and `y` differ in length
/// - [`Error::UndefinedMetric`] for fewer than two points or non-monotonic `x`
pub fn auc(x: &[f32], y: &[f32]) -> Result<f32> {
    if x.len() != y.len() {
        return Err(Error::DataLengthMismatch { x_len: x.len(), y_len: y.len() });
    }
    if x.len() < 2 {
        return Err(Error::UndefinedMetric(format!(
            "at least 2 points are needed to compute an area, got {}",
            x.len()
        )));
    }

    let increasing = x.windows(2).all(|w| w[1] >= w[0]);
    let decreasing = x.windows(2).all(|w| w[1] <= w[0]);
    let direction = match (increasing, decreasing) {
        (true, _) => 1.0,
        (false, true) => -1.0,
        (false, false) => {
            return Err(Error::UndefinedMetric("x is neither increasing nor decreasing".to_string()))
        }
    };

    let area: f64 = x
        .windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| {
            let dx = f64::from(xs[1]) - f64::from(xs[0]);
            dx * (f64::from(ys[0]) + f64::from(ys[1])) / 2.0
        })
        .sum();

    Ok((direction * area) as f32)
}

/// Area under the ROC curve computed straight from labels and scores.
///
/// # Errors
///
/// Propagates errors from [`roc_curve`].
pub fn roc_auc_score<L: BinaryLabel>(labels: &[L], scores: &[f32]) -> Result<f32> {
    roc_curve(labels, scores)?.auc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_roc_perfect_classifier() {
        let labels = [0, 0, 0, 1, 1, 1];
        let scores = [0.1, 0.2, 0.3, 0.7, 0.8, 0.9];

        let roc = roc_curve(&labels, &scores).unwrap();

        assert_relative_eq!(roc.auc().unwrap(), 1.0);
        assert_eq!(roc.fpr, vec![0.0, 0.0, 0.0, 1.0]);
        assert_eq!(roc.tpr, vec![0.0, 1.0 / 3.0, 1.0, 1.0]);
    }

    #[test]
    fn test_roc_reference_values() {
        // Classic four-sample example: thresholds inf, 0.8, 0.4, 0.35, 0.1
        let labels = [0, 0, 1, 1];
        let scores = [0.1, 0.4, 0.35, 0.8];

        let roc = roc_curve(&labels, &scores).unwrap();

        assert_eq!(roc.fpr, vec![0.0, 0.0, 0.5, 0.5, 1.0]);
        assert_eq!(roc.tpr, vec![0.0, 0.5, 0.5, 1.0, 1.0]);
        assert_eq!(roc.thresholds[0], f32::INFINITY);
        assert_eq!(&roc.thresholds[1..], &[0.8, 0.4, 0.35, 0.1]);
        assert_relative_eq!(roc.auc().unwrap(), 0.75);
    }

    #[test]
    fn test_roc_drops_collinear_points() {
        // Four positives in a row produce a vertical run; only its ends remain
        let labels = [1, 1, 1, 1, 0, 0];
        let scores = [0.9, 0.8, 0.7, 0.6, 0.5, 0.4];

        let roc = roc_curve(&labels, &scores).unwrap();

        assert_eq!(roc.fpr, vec![0.0, 0.0, 0.0, 1.0]);
        assert_eq!(roc.tpr, vec![0.0, 0.25, 1.0, 1.0]);
    }

    #[test]
    fn test_roc_all_tied_scores() {
        let labels = [0, 1, 0, 1, 0, 1, 0, 1];
        let scores = [0.5; 8];

        let roc = roc_curve(&labels, &scores).unwrap();

        assert_eq!(roc.len(), 2);
        assert_relative_eq!(roc.auc().unwrap(), 0.5);
    }

    #[test]
    fn test_roc_bool_labels() {
        let labels = [false, true, false, true];
        let scores = [0.2, 0.9, 0.4, 0.6];
        assert_relative_eq!(roc_auc_score(&labels, &scores).unwrap(), 1.0);
    }

    #[test]
    fn test_roc_single_class_is_undefined() {
        assert!(matches!(
            roc_curve(&[0, 0, 0, 0], &[0.1, 0.2, 0.3, 0.4]),
            Err(Error::UndefinedMetric(_))
        ));
        assert!(matches!(
            roc_curve(&[1, 1, 1, 1], &[0.1, 0.2, 0.8, 0.9]),
            Err(Error::UndefinedMetric(_))
        ));
    }

    #[test]
    fn test_roc_length_mismatch() {
        assert!(matches!(
            roc_curve(&[0, 1, 1], &[0.5, 0.6]),
            Err(Error::DataLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_auc_triangle() {
        assert_relative_eq!(auc(&[0.0, 1.0], &[0.0, 1.0]).unwrap(), 0.5);
    }

    #[test]
    fn test_auc_decreasing_x() {
        assert_relative_eq!(auc(&[1.0, 0.5, 0.0], &[1.0, 1.0, 1.0]).unwrap(), 1.0);
    }

    #[test]
    fn test_auc_rejects_non_monotonic() {
        assert!(matches!(auc(&[0.0, 1.0, 0.5], &[0.0, 1.0, 1.0]), Err(Error::UndefinedMetric(_))));
        assert!(matches!(auc(&[0.0], &[0.0]), Err(Error::UndefinedMetric(_))));
    }

    proptest! {
        #[test]
        fn prop_roc_auc_in_unit_interval(
            data in prop::collection::vec((any::<bool>(), 0.0f32..1.0), 2..200)
        ) {
            let (labels, scores): (Vec<bool>, Vec<f32>) = data.into_iter().unzip();
            prop_assume!(labels.iter().any(|&l| l) && labels.iter().any(|&l| !l));

            let roc = roc_curve(&labels, &scores).unwrap();
            let area = roc.auc().unwrap();

            prop_assert!((0.0..=1.0 + 1e-5).contains(&area));
            prop_assert!(roc.fpr.windows(2).all(|w| w[1] >= w[0]));
            prop_assert!(roc.tpr.windows(2).all(|w| w[1] >= w[0]));
            prop_assert_eq!(*roc.fpr.last().unwrap(), 1.0);
            prop_assert_eq!(*roc.tpr.last().unwrap(), 1.0);
        }

        #[test]
        fn prop_reversing_scores_mirrors_auc(
            data in prop::collection::vec((any::<bool>(), 0.0f32..1.0), 2..100)
        ) {
            let (labels, scores): (Vec<bool>, Vec<f32>) = data.into_iter().unzip();
            prop_assume!(labels.iter().any(|&l| l) && labels.iter().any(|&l| !l));

            let negated: Vec<f32> = scores.iter().map(|s| -s).collect();
            let forward = roc_auc_score(&labels, &scores).unwrap();
            let backward = roc_auc_score(&labels, &negated).unwrap();

            prop_assert!((forward + backward - 1.0).abs() < 1e-4);
        }
    }
}
