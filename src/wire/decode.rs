//! Distribution payload decoder.
//!
//! Layout (all little-endian):
//!
//! ```text
//! offset  size        field
//! 0       4           count: u32
//! 4       8           particle_value: f64
//! 12      16 * count  (position: f64, probability: f64) records
//! ```
//!
//! Saturated outcomes use the IEEE-754 ±infinity bit patterns as positions.

use std::cmp::Ordering;

use tracing::trace;

use crate::domain::{DiracDelta, DistributionalValue};
use crate::error::{DistError, FormatReason, Result, ValidationReason};
use crate::wire::reader::LeBuffer;

pub const HEADER_SIZE: usize = 12;
pub const RECORD_SIZE: usize = 16;

/// Decode a distribution payload.
///
/// The buffer must hold exactly the header plus `count` records; the response
/// frame (see [`crate::protocol::frame`]) has to be stripped first.
pub fn decode(buffer: &[u8]) -> Result<DistributionalValue> {
    let mut reader = LeBuffer::new(buffer);
    let count = reader.read_u32()? as usize;
    let particle_value = reader.read_f64()?;

    let expected = count
        .checked_mul(RECORD_SIZE)
        .and_then(|n| n.checked_add(HEADER_SIZE))
        .unwrap_or(usize::MAX);
    let actual = reader.len();
    match actual.cmp(&expected) {
        Ordering::Less => return Err(DistError::Format(FormatReason::Truncated { expected, actual })),
        Ordering::Greater => return Err(DistError::Format(FormatReason::TrailingBytes { expected, actual })),
        Ordering::Equal => {}
    }
    if count == 0 {
        return Err(DistError::Validation(ValidationReason::EmptyDistribution));
    }

    trace!(count, particle_value, "decoding distribution payload");

    let body = reader.read_bytes(count * RECORD_SIZE)?;
    let records = body
        .chunks_exact(RECORD_SIZE)
        .map(|record| DiracDelta::new(f64_at(record, 0), f64_at(record, 8)));

    DistributionalValue::from_deltas(particle_value, records)
}

/// Encode deltas in the payload layout, in the order given.
pub fn encode(particle_value: f64, deltas: &[DiracDelta]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_SIZE + deltas.len() * RECORD_SIZE);
    out.extend_from_slice(&(deltas.len() as u32).to_le_bytes());
    out.extend_from_slice(&particle_value.to_le_bytes());
    for delta in deltas {
        out.extend_from_slice(&delta.position.to_le_bytes());
        out.extend_from_slice(&delta.probability_mass.to_le_bytes());
    }
    out
}

fn f64_at(record: &[u8], offset: usize) -> f64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&record[offset..offset + 8]);
    f64::from_le_bytes(raw)
}
