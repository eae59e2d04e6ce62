//! Histogram binning of decoded distributions.

pub mod binner;
pub mod palette;

pub use binner::bin;
pub use palette::{assign_candidates, cycle, style_for};
