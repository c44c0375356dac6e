//! # evalviz
//!
//! Evaluation plots for binary classifiers, in pure Rust.
//!
//! Three renderers cover the usual post-training checks: a ROC curve
//! annotated with its AUC, a precision-recall step curve annotated with
//! average precision, and an annotated confusion-matrix heatmap. Each one
//! computes its metric, draws onto a caller-owned [`chart::Axes`] and hands
//! that same axes back, so plots compose on one surface.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use evalviz::prelude::*;
//!
//! let labels = [0, 0, 1, 1];
//! let scores = [0.1, 0.4, 0.35, 0.8];
//!
//! let mut fig = Figure::subplots(1, 2)?;
//! render_roc(&labels, &scores, fig.sca(0)?, &CurveOptions::new().name("Model A"))?;
//! render_pr(&labels, &scores, fig.sca(1)?, &CurveOptions::new())?;
//! fig.write_svg("evaluation.svg")?;
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize/deserialize option and style structs
//!
//! ## Academic References
//!
//! - Fawcett, T. (2006). "An introduction to ROC analysis." Pattern Recognition
//!   Letters, 27(8), 861-874.
//! - Davis, J., & Goadrich, M. (2006). "The relationship between Precision-Recall
//!   and ROC curves." ICML '06.
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and the default color cycle.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

// ============================================================================
// Evaluation Modules
// ============================================================================

/// ROC, precision-recall and confusion-matrix metrics.
pub mod metrics;

/// Figures, axes, artists and legends.
pub mod chart;

/// ROC, precision-recall and confusion-matrix renderers.
pub mod eval;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Drawing marks and rasterization.
pub mod render;

/// Output encoders (PNG, SVG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for evalviz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use evalviz::prelude::*;
/// ```
pub mod prelude {
    pub use batuta_common::display::WithDimensions;
    pub use crate::chart::{Axes, AxesStyle, Figure, HeatmapStyle, Legend, LegendLocation, ValueFormat};
    pub use crate::color::Rgba;
    pub use crate::error::{Error, Result};
    pub use crate::eval::{
        render_confusion, render_confusion_with, render_pr, render_roc, ConfusionStyle,
        CurveOptions,
    };
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Point, Rect};
    pub use crate::metrics::{
        average_precision_score, confusion_matrix, precision_recall_curve, roc_auc_score,
        roc_curve, BinaryLabel, Normalization,
    };
    pub use crate::scale::ColorMap;
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
