//! Renderers for histogram geometry: ASCII for the terminal, SVG for files.

pub mod ascii;
pub mod color;
pub mod svg;

pub use ascii::render_histogram;
pub use svg::write_svg;
