//! Input/output helpers.
//!
//! - payload files, bare or framed (`payload`)
//! - histogram geometry JSON read/write (`export`)

pub mod export;
pub mod payload;

pub use export::*;
pub use payload::*;
