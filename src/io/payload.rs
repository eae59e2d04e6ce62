//! Reading distribution payloads from disk.
//!
//! Files hold either a bare payload (as produced by `wire::encode`) or a raw
//! device response (length prefix plus block padding).

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::DistributionalValue;
use crate::error::AppError;
use crate::protocol::unwrap_response;
use crate::wire::decode;

/// Read and decode one payload file.
pub fn read_payload(path: &Path, framed: bool) -> Result<DistributionalValue, AppError> {
    let bytes = fs::read(path)
        .map_err(|e| AppError::new(2, format!("Failed to read payload '{}': {e}", path.display())))?;
    debug!(path = %path.display(), bytes = bytes.len(), framed, "read payload file");

    let payload = if framed { unwrap_response(&bytes) } else { Ok(bytes.as_slice()) };
    payload
        .and_then(decode)
        .map_err(|e| AppError::new(e.exit_code(), format!("{}: {e}", path.display())))
}

/// Read and decode several payload files, in order.
pub fn read_payloads(paths: &[impl AsRef<Path>], framed: bool) -> Result<Vec<DistributionalValue>, AppError> {
    paths.iter().map(|p| read_payload(p.as_ref(), framed)).collect()
}
