//! Rasterization of plot marks.
//!
//! # Algorithms
//!
//! - **Wu's Anti-aliased Line**: smooth curve strokes with sub-pixel accuracy
//! - **Bresenham's Line**: crisp axis spines and tick marks
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod mark;
mod primitives;

pub use mark::{estimate_text_width, rasterize, Mark, TextAnchor};
pub use primitives::{
    draw_dashed_polyline, draw_line, draw_line_aa, draw_polyline, draw_rect_outline, fill_rect,
};
