//! Program representation for resolved instruction sequences.
//!
//! A program is the flat, ordered output of code generation. Artifact
//! files (.bfbc) are raw concatenations of 8-byte instruction records with
//! no header; `encode`/`decode` are the serialization-ready view a
//! surrounding tool persists and reloads.

use crate::error::DecodeError;
use crate::instruction::Instruction;

/// A compiled program: a sequence of resolved instructions.
///
/// Jump targets inside the sequence are absolute instruction indices.
/// The sequence is immutable once code generation completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// The instruction stream.
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// Create a new program from a vector of instructions.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Encode the entire program to bytes.
    ///
    /// Each instruction becomes 8 bytes. The result length is always
    /// `instructions.len() * 8`.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.instructions.len() * 8);
        for instr in &self.instructions {
            bytes.extend_from_slice(&instr.encode());
        }
        bytes
    }

    /// Decode a byte slice into a program.
    ///
    /// The byte slice length must be a multiple of 8. Each 8-byte chunk
    /// is decoded as one instruction.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if !bytes.len().is_multiple_of(8) {
            return Err(DecodeError::InvalidLength(bytes.len()));
        }

        let mut instructions = Vec::with_capacity(bytes.len() / 8);
        for chunk in bytes.chunks_exact(8) {
            let arr: [u8; 8] = chunk.try_into().expect("chunks_exact guarantees 8 bytes");
            instructions.push(Instruction::decode(arr)?);
        }

        Ok(Self { instructions })
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
