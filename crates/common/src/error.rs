//! Decode errors for encoded instruction streams.

use thiserror::Error;

/// Errors that occur while decoding an artifact back into a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Opcode byte not assigned to any instruction.
    #[error("invalid opcode: {0:#04x}")]
    InvalidOpcode(u8),

    /// Byte stream length is not a multiple of 8.
    #[error("invalid byte stream length: {0} (must be multiple of 8)")]
    InvalidLength(usize),
}
