//! Cursor over a little-endian byte slice.

use crate::error::{DistError, FormatReason, Result};

pub(crate) struct LeBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> LeBuffer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Bytes left after the cursor.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Read `n` bytes, advancing the cursor.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let b = self.read_bytes(8)?;
        Ok(f64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn ensure(&self, n: usize) -> Result<()> {
        if n <= self.remaining() {
            return Ok(());
        }
        Err(DistError::Format(FormatReason::Truncated {
            expected: self.pos.saturating_add(n),
            actual: self.data.len(),
        }))
    }
}
