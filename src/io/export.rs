//! Read/write histogram geometry JSON files.
//!
//! The JSON carries the full geometry (shared boundaries, per-candidate bins
//! and styles, overflow annotations) plus run metadata, so another renderer
//! can redraw the plot without the original payloads.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::HistogramGeometry;
use crate::error::AppError;

/// A saved geometry file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub sources: Vec<String>,
    pub geometry: HistogramGeometry,
}

/// Write a geometry JSON file.
pub fn write_geometry_json(path: &Path, geometry: &HistogramGeometry, sources: &[String]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create geometry JSON '{}': {e}", path.display())))?;

    let doc = GeometryFile {
        tool: "dhist".to_string(),
        generated_at: Utc::now(),
        sources: sources.to_vec(),
        geometry: geometry.clone(),
    };

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write geometry JSON: {e}")))?;

    Ok(())
}

/// Read a geometry JSON file.
pub fn read_geometry_json(path: &Path) -> Result<GeometryFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open geometry JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid geometry JSON: {e}")))
}
