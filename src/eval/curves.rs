//! ROC and precision-recall curve renderers.

use log::debug;

use super::{pr_legend_label, roc_legend_label, CurveOptions};
use crate::chart::{Axes, Legend, LineArtist, StepWhere};
use crate::color::Rgba;
use crate::error::Result;
use crate::metrics::{precision_recall_curve, roc_curve, BinaryLabel};

/// Plot the ROC curve of `scores` against binary `labels` on `surface`.
///
/// The curve runs from (0, 0) to (1, 1) through one point per distinct
/// score. Unless annotation is disabled, the legend shows the area under
/// the curve.
///
/// # Errors
///
/// Fails on mismatched or empty inputs, non-finite scores, non-binary
/// labels, or labels holding a single class. The surface is left untouched
/// on error.
pub fn render_roc<'a, L: BinaryLabel>(
    labels: &[L],
    scores: &[f32],
    surface: &'a mut Axes,
    options: &CurveOptions,
) -> Result<&'a mut Axes> {
    let curve = roc_curve(labels, scores)?;
    let label = if options.annotate {
        roc_legend_label(curve.auc()?, options)
    } else {
        None
    };

    surface.plot(&curve.fpr, &curve.tpr, label.as_deref())?;
    if options.reference_line {
        surface.add_line(reference_line(&[0.0, 1.0], &[0.0, 1.0])?);
    }
    surface.set_xlabel("False positive rate");
    surface.set_ylabel("True positive rate");
    surface.legend(Legend::best().fancybox(true));

    debug!("roc: {} points, legend {label:?}", curve.len());
    Ok(surface)
}

/// Plot the precision-recall curve of `scores` against binary `labels`
/// on `surface` as a step line.
///
/// Unless annotation is disabled, the legend shows the average precision.
///
/// # Errors
///
/// Fails on mismatched or empty inputs, non-finite scores, non-binary
/// labels, or labels without a positive observation. The surface is left
/// untouched on error.
pub fn render_pr<'a, L: BinaryLabel>(
    labels: &[L],
    scores: &[f32],
    surface: &'a mut Axes,
    options: &CurveOptions,
) -> Result<&'a mut Axes> {
    let curve = precision_recall_curve(labels, scores)?;
    let label = if options.annotate {
        pr_legend_label(curve.average_precision(), options)
    } else {
        None
    };

    surface.step(&curve.recall, &curve.precision, label.as_deref(), StepWhere::Pre)?;
    if options.reference_line {
        let positives = labels.iter().filter(|l| l.is_positive()).count();
        let rate = positives as f32 / labels.len() as f32;
        surface.add_line(reference_line(&[0.0, 1.0], &[rate, rate])?);
    }
    surface.set_xlabel("Recall");
    surface.set_ylabel("Precision");
    surface.legend(Legend::best().fancybox(true));

    debug!("pr: {} points, legend {label:?}", curve.len());
    Ok(surface)
}

/// Unlabelled grey dashed line.
fn reference_line(x: &[f32], y: &[f32]) -> Result<LineArtist> {
    Ok(LineArtist::new(x, y)?.color(Rgba::LIGHT_GREY).width(1.0).dashed(true))
}
