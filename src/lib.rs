//! `dist-hist` library crate.
//!
//! Decodes distributional values (finite mixtures of weighted point masses)
//! returned by a probabilistic co-processor and bins one or more of them into
//! shared histogram geometry. The binary (`dhist`) is a thin wrapper around
//! this library so that:
//!
//! - the decoder and binner are testable without spawning processes
//! - the pure core (`wire`, `binning`) stays free of I/O and printing

pub mod app;
pub mod binning;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod protocol;
pub mod report;
pub mod wire;
