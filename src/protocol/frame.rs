//! Response framing and SD block arithmetic.
//!
//! The device answers with a `u32` little-endian byte count followed by the
//! distribution payload; transfers happen in whole 512-byte blocks, so the
//! tail of the last block is padding.

use crate::error::Result;
use crate::wire::reader::LeBuffer;

pub const SD_BLOCK_SIZE: usize = 512;

/// Strip the length prefix and block padding from a device response.
pub fn unwrap_response(buffer: &[u8]) -> Result<&[u8]> {
    let mut reader = LeBuffer::new(buffer);
    let len = reader.read_u32()? as usize;
    reader.read_bytes(len)
}

/// Wrap a payload the way the device frames it (without block padding).
pub fn wrap_response(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + payload.len());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// Number of blocks needed to move `len` bytes.
pub fn blocks_for(len: usize) -> usize {
    len.div_ceil(SD_BLOCK_SIZE)
}

/// Zero-pad to a whole number of blocks (at least one).
pub fn pad_to_block(mut data: Vec<u8>) -> Vec<u8> {
    let target = blocks_for(data.len()).max(1) * SD_BLOCK_SIZE;
    data.resize(target, 0);
    data
}
