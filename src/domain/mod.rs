//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - decoded distributions (`DiracDelta`, `DistributionalValue`)
//! - histogram output (`HistogramBin`, `HistogramGeometry`, `OverflowAnnotation`)
//! - styling and run configuration (`StyleConfig`, `PlotConfig`)

pub mod types;

pub use types::*;
