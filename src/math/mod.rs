//! Numeric utilities shared by the binner and the renderers.

pub mod grid;

pub use grid::*;
