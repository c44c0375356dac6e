//! Classifier evaluation metrics.
//!
//! Threshold-sweep curves (ROC, precision-recall), their summary scores
//! (AUC, average precision) and the confusion count matrix. All functions
//! validate their inputs and report problems through [`Error`] rather than
//! returning NaN.
//!
//! # References
//!
//! - Fawcett, T. (2006). "An introduction to ROC analysis." Pattern Recognition
//!   Letters, 27(8), 861-874.
//! - Davis, J., & Goadrich, M. (2006). "The relationship between Precision-Recall
//!   and ROC curves." ICML '06.

mod confusion;
mod pr;
mod roc;

pub use confusion::{confusion_matrix, ClassificationSummary, ConfusionCounts, Normalization};
pub use pr::{average_precision_score, precision_recall_curve, PrCurve};
pub use roc::{auc, roc_auc_score, roc_curve, RocCurve};

use crate::error::{Error, Result};

/// A ground-truth label of a binary classification problem.
///
/// `true`, integer `1` and float `1.0` mark the positive class; `false`,
/// `0` and `-1` mark the negative class. Any other value is rejected by the
/// binary metrics, as is a vector holding more than two distinct values.
pub trait BinaryLabel: Copy + PartialEq {
    /// Whether this label denotes the positive class.
    fn is_positive(self) -> bool;

    /// Whether this label denotes the negative class.
    fn is_negative(self) -> bool;
}

impl BinaryLabel for bool {
    fn is_positive(self) -> bool {
        self
    }

    fn is_negative(self) -> bool {
        !self
    }
}

macro_rules! impl_binary_label_unsigned {
    ($($t:ty),*) => {
        $(
            impl BinaryLabel for $t {
                fn is_positive(self) -> bool {
                    self == 1
                }

                fn is_negative(self) -> bool {
                    self == 0
                }
            }
        )*
    };
}

macro_rules! impl_binary_label_signed {
    ($($t:ty),*) => {
        $(
            impl BinaryLabel for $t {
                fn is_positive(self) -> bool {
                    self == 1
                }

                fn is_negative(self) -> bool {
                    self == 0 || self == -1
                }
            }
        )*
    };
}

impl_binary_label_unsigned!(u8, u16, u32, u64, usize);
impl_binary_label_signed!(i8, i16, i32, i64, isize);

macro_rules! impl_binary_label_float {
    ($($t:ty),*) => {
        $(
            impl BinaryLabel for $t {
                #[allow(clippy::float_cmp)]
                fn is_positive(self) -> bool {
                    self == 1.0
                }

                #[allow(clippy::float_cmp)]
                fn is_negative(self) -> bool {
                    self == 0.0 || self == -1.0
                }
            }
        )*
    };
}

impl_binary_label_float!(f32, f64);

/// Cumulative false/true positive counts at each distinct score threshold.
///
/// Thresholds are strictly decreasing; `fps[i]`/`tps[i]` count observations
/// with score >= `thresholds[i]`.
#[derive(Debug, Clone)]
pub(crate) struct ThresholdCounts {
    pub(crate) fps: Vec<usize>,
    pub(crate) tps: Vec<usize>,
    pub(crate) thresholds: Vec<f32>,
}

impl ThresholdCounts {
    /// Total positives in the sample.
    pub(crate) fn positives(&self) -> usize {
        self.tps.last().copied().unwrap_or(0)
    }

    /// Total negatives in the sample.
    pub(crate) fn negatives(&self) -> usize {
        self.fps.last().copied().unwrap_or(0)
    }
}

/// Sweep all distinct score thresholds from high to low.
#[allow(clippy::float_cmp)]
pub(crate) fn binary_clf_curve<L: BinaryLabel>(
    labels: &[L],
    scores: &[f32],
) -> Result<ThresholdCounts> {
    if labels.len() != scores.len() {
        return Err(Error::DataLengthMismatch { x_len: labels.len(), y_len: scores.len() });
    }
    if labels.is_empty() {
        return Err(Error::EmptyData);
    }
    if let Some(index) = scores.iter().position(|s| !s.is_finite()) {
        return Err(Error::NonFiniteScore { index });
    }
    let distinct = distinct_labels(labels);
    if distinct > 2 {
        return Err(Error::NotBinary { distinct });
    }
    if let Some(index) = labels.iter().position(|&l| !l.is_positive() && !l.is_negative()) {
        return Err(Error::UnknownLabel { index });
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut fps = Vec::new();
    let mut tps = Vec::new();
    let mut thresholds = Vec::new();
    let (mut tp, mut fp) = (0usize, 0usize);

    let mut i = 0;
    while i < order.len() {
        let current = scores[order[i]];
        // Tied scores share one threshold
        while i < order.len() && scores[order[i]] == current {
            if labels[order[i]].is_positive() {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        fps.push(fp);
        tps.push(tp);
        thresholds.push(current);
    }

    Ok(ThresholdCounts { fps, tps, thresholds })
}

/// Number of distinct values among `labels`, counting no further than 3.
fn distinct_labels<L: BinaryLabel>(labels: &[L]) -> usize {
    let mut seen: Vec<L> = Vec::with_capacity(3);
    for &label in labels {
        if !seen.contains(&label) {
            seen.push(label);
            if seen.len() > 2 {
                break;
            }
        }
    }
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_label_positive_values() {
        assert!(true.is_positive());
        assert!(!false.is_positive());
        assert!(1u8.is_positive());
        assert!(!0i32.is_positive());
        assert!(!(-1i64).is_positive());
        assert!(1.0f64.is_positive());
        assert!(!0.5f32.is_positive());
    }

    #[test]
    fn test_binary_label_negative_values() {
        assert!(false.is_negative());
        assert!(0u8.is_negative());
        assert!((-1i32).is_negative());
        assert!((-1.0f32).is_negative());
        assert!(!2u8.is_negative());
        assert!(!2i64.is_negative());
        assert!(!1i8.is_negative());
    }

    #[test]
    fn test_clf_curve_rejects_unknown_encoding() {
        assert!(matches!(
            binary_clf_curve(&[1, 2, 1, 2], &[0.1, 0.9, 0.2, 0.8]),
            Err(Error::UnknownLabel { index: 1 })
        ));
        assert!(matches!(
            binary_clf_curve(&[0u8, 2, 2], &[0.1, 0.9, 0.2]),
            Err(Error::UnknownLabel { index: 1 })
        ));

        let counts = binary_clf_curve(&[-1, 1, -1, 1], &[0.1, 0.9, 0.2, 0.8]).unwrap();
        assert_eq!(counts.positives(), 2);
        assert_eq!(counts.negatives(), 2);
    }

    #[test]
    fn test_clf_curve_groups_ties() {
        let labels = [1, 0, 1, 0];
        let scores = [0.9, 0.5, 0.5, 0.1];

        let counts = binary_clf_curve(&labels, &scores).unwrap();

        assert_eq!(counts.thresholds, vec![0.9, 0.5, 0.1]);
        assert_eq!(counts.tps, vec![1, 2, 2]);
        assert_eq!(counts.fps, vec![0, 1, 2]);
        assert_eq!(counts.positives(), 2);
        assert_eq!(counts.negatives(), 2);
    }

    #[test]
    fn test_clf_curve_rejects_bad_input() {
        assert!(matches!(
            binary_clf_curve(&[0, 1], &[0.5]),
            Err(Error::DataLengthMismatch { x_len: 2, y_len: 1 })
        ));
        assert!(matches!(binary_clf_curve::<u8>(&[], &[]), Err(Error::EmptyData)));
        assert!(matches!(
            binary_clf_curve(&[0, 1], &[0.5, f32::NAN]),
            Err(Error::NonFiniteScore { index: 1 })
        ));
        assert!(matches!(
            binary_clf_curve(&[0, 1, 2], &[0.1, 0.2, 0.3]),
            Err(Error::NotBinary { distinct: 3 })
        ));
    }

    #[test]
    fn test_distinct_labels_caps_at_three() {
        assert_eq!(distinct_labels(&[1, 1, 1]), 1);
        assert_eq!(distinct_labels(&[true, false, true]), 2);
        assert_eq!(distinct_labels(&[0, 1, 2, 3, 4]), 3);
    }
}
