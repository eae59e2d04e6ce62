//! Request encoding for the co-processor.
//!
//! A request is the command code of an arithmetic operation plus the supports
//! of two uniform operands, packed as little-endian doubles into the MOSI
//! (host-to-device) buffer.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{DistError, Result};
use crate::protocol::frame::SD_BLOCK_SIZE;
use crate::protocol::notation::parse_uncertainty;

/// Size of the host-to-device parameter buffer.
pub const MOSI_BUFFER_SIZE: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operation {
    pub fn command_code(self) -> u32 {
        match self {
            Operation::Add => 1,
            Operation::Sub => 2,
            Operation::Mul => 3,
            Operation::Div => 4,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Sub => "-",
            Operation::Mul => "*",
            Operation::Div => "/",
        }
    }
}

/// One arithmetic request on two uniform operands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Request {
    pub operation: Operation,
    /// `(min, max)` of the first operand.
    pub a: (f64, f64),
    /// `(min, max)` of the second operand.
    pub b: (f64, f64),
}

impl Request {
    /// Build a request from `X.Y(Z)` operands.
    pub fn parse(operation: Operation, a: &str, b: &str) -> Result<Self> {
        Ok(Self {
            operation,
            a: parse_uncertainty(a)?,
            b: parse_uncertainty(b)?,
        })
    }

    /// MOSI buffer contents: `[a_min, a_max, b_min, b_max]`, zero padded.
    pub fn encode(&self) -> Result<Vec<u8>> {
        pack_doubles(&[self.a.0, self.a.1, self.b.0, self.b.1], MOSI_BUFFER_SIZE)
    }

    /// Command register contents: the command code as one `u32`, zero padded
    /// to a whole block.
    pub fn command_buffer(&self) -> Result<Vec<u8>> {
        pack_u32s(&[self.operation.command_code()], SD_BLOCK_SIZE)
    }
}

/// Pack doubles little-endian into a zero-padded buffer of `size` bytes.
pub fn pack_doubles(values: &[f64], size: usize) -> Result<Vec<u8>> {
    pack(values.len() * 8, size, |out| {
        for v in values {
            out.extend_from_slice(&v.to_le_bytes());
        }
    })
}

/// Pack unsigned integers little-endian into a zero-padded buffer of `size` bytes.
pub fn pack_u32s(values: &[u32], size: usize) -> Result<Vec<u8>> {
    pack(values.len() * 4, size, |out| {
        for v in values {
            out.extend_from_slice(&v.to_le_bytes());
        }
    })
}

fn pack(needed: usize, size: usize, fill: impl FnOnce(&mut Vec<u8>)) -> Result<Vec<u8>> {
    if needed > size {
        return Err(DistError::configuration(format!(
            "packed values need {needed} bytes, buffer holds {size}"
        )));
    }
    let mut out = Vec::with_capacity(size);
    fill(&mut out);
    out.resize(size, 0);
    Ok(out)
}
