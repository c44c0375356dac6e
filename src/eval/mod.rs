//! Evaluation plots for binary classifiers.
//!
//! Each renderer computes its metric, draws onto a caller-supplied
//! [`Axes`](crate::chart::Axes) and returns that same axes so calls can be
//! chained or composed. To draw on a figure's current axes, pass
//! [`Figure::gca`](crate::chart::Figure::gca):
//!
//! ```rust,ignore
//! use evalviz::prelude::*;
//!
//! let mut fig = Figure::new();
//! render_roc(&labels, &scores, fig.gca(), &CurveOptions::new().name("Model A"))?;
//! fig.write_png("roc.png")?;
//! ```

mod confusion;
mod curves;

pub use confusion::{render_confusion, render_confusion_with, ConfusionStyle};
pub use curves::{render_pr, render_roc};

/// Legend and decoration options shared by the ROC and PR renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveOptions {
    /// Attach a legend label carrying the summary score.
    pub annotate: bool,
    /// Legend label used verbatim instead of the generated one.
    pub label: Option<String>,
    /// Model name prefixed to the generated label.
    pub name: Option<String>,
    /// Draw the no-skill reference line.
    pub reference_line: bool,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self { annotate: true, label: None, name: None, reference_line: false }
    }
}

impl CurveOptions {
    /// Annotated curve without a model name or reference line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the legend label.
    #[must_use]
    pub fn annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Use `label` as the legend text.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Prefix the generated legend text with a model name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Draw the chance diagonal (ROC) or positive-rate baseline (PR).
    #[must_use]
    pub fn reference_line(mut self, show: bool) -> Self {
        self.reference_line = show;
        self
    }
}

/// Legend text of a ROC curve with area `auc`, or `None` when not annotated.
#[must_use]
pub fn roc_legend_label(auc: f32, options: &CurveOptions) -> Option<String> {
    let score = format!("AUC = {auc:.3}");
    legend_label(options, &score, &score)
}

/// Legend text of a PR curve with average precision `ap`, or `None` when
/// not annotated.
#[must_use]
pub fn pr_legend_label(ap: f32, options: &CurveOptions) -> Option<String> {
    legend_label(
        options,
        &format!("average precision score = {ap:.3}"),
        &format!("Average precision score = {ap:.3}"),
    )
}

/// `named` follows a model name; `bare` stands alone.
fn legend_label(options: &CurveOptions, named: &str, bare: &str) -> Option<String> {
    if !options.annotate {
        return None;
    }
    Some(match (&options.label, &options.name) {
        (Some(label), _) => label.clone(),
        (None, Some(name)) => format!("{name} {named}"),
        (None, None) => bare.to_string(),
    })
}
