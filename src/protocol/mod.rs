//! Host side of the co-processor protocol: request encoding and response
//! framing. Moving the bytes (SD over SPI) is left to the caller.

pub mod command;
pub mod frame;
pub mod notation;

pub use command::{Operation, Request, MOSI_BUFFER_SIZE};
pub use frame::{pad_to_block, unwrap_response, SD_BLOCK_SIZE};
pub use notation::parse_uncertainty;
