//! Wire format of the co-processor's distribution payloads.

pub mod decode;
pub(crate) mod reader;

pub use decode::{decode, encode, HEADER_SIZE, RECORD_SIZE};
