//! Instruction encoding and decoding for the bfo instruction set.
//!
//! Every instruction is exactly 64 bits (8 bytes), encoded little-endian:
//! ```text
//! Byte 0:    opcode (u8)
//! Bytes 1-3: reserved, zero
//! Bytes 4-7: operand (u32 or i32, little-endian; meaning depends on opcode)
//! ```
//! The operand sits at a 4-byte boundary so the record can be read as
//! `(u8, u32)` without shifting.

use std::fmt;

use crate::error::DecodeError;
use crate::opcode::Opcode;

/// A single resolved tape-machine instruction.
///
/// Jump targets are absolute instruction indices, resolved during code
/// generation. No unresolved labels exist at this level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Add `delta` to the current cell, modulo the configured cell width.
    AddCell(i32),
    /// Move the tape pointer by `delta` cells.
    MoveCell(i32),
    /// Store `value` into the current cell.
    SetCell(u32),
    /// Write the current cell's byte value `repeat` times.
    Output(u32),
    /// Read up to `repeat` bytes, storing only the last one read.
    Input(u32),
    /// Branch to `target` if the current cell is zero.
    JumpIfZero(u32),
    /// Branch to `target` if the current cell is non-zero.
    JumpIfNotZero(u32),
    /// Stop execution.
    Halt,
}

impl Instruction {
    /// The opcode byte for this instruction.
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::AddCell(_) => Opcode::AddCell,
            Instruction::MoveCell(_) => Opcode::MoveCell,
            Instruction::SetCell(_) => Opcode::SetCell,
            Instruction::Output(_) => Opcode::Output,
            Instruction::Input(_) => Opcode::Input,
            Instruction::JumpIfZero(_) => Opcode::JumpIfZero,
            Instruction::JumpIfNotZero(_) => Opcode::JumpIfNotZero,
            Instruction::Halt => Opcode::Halt,
        }
    }

    /// The raw operand bits, as stored in the encoded record.
    fn operand_bits(&self) -> u32 {
        match *self {
            Instruction::AddCell(delta) | Instruction::MoveCell(delta) => delta as u32,
            Instruction::SetCell(value) => value,
            Instruction::Output(repeat) | Instruction::Input(repeat) => repeat,
            Instruction::JumpIfZero(target) | Instruction::JumpIfNotZero(target) => target,
            Instruction::Halt => 0,
        }
    }

    /// Encode this instruction to 8 bytes (little-endian).
    pub fn encode(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0] = self.opcode() as u8;
        bytes[4..8].copy_from_slice(&self.operand_bits().to_le_bytes());
        bytes
    }

    /// Decode 8 bytes into an instruction (little-endian).
    pub fn decode(bytes: [u8; 8]) -> Result<Self, DecodeError> {
        let opcode = Opcode::try_from(bytes[0])?;
        let operand = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

        Ok(match opcode {
            Opcode::AddCell => Instruction::AddCell(operand as i32),
            Opcode::MoveCell => Instruction::MoveCell(operand as i32),
            Opcode::SetCell => Instruction::SetCell(operand),
            Opcode::Output => Instruction::Output(operand),
            Opcode::Input => Instruction::Input(operand),
            Opcode::JumpIfZero => Instruction::JumpIfZero(operand),
            Opcode::JumpIfNotZero => Instruction::JumpIfNotZero(operand),
            Opcode::Halt => Instruction::Halt,
        })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::AddCell(delta) | Instruction::MoveCell(delta) => {
                write!(f, "{} {}", self.opcode().mnemonic(), delta)
            }
            Instruction::Halt => f.write_str(self.opcode().mnemonic()),
            _ => write!(f, "{} {}", self.opcode().mnemonic(), self.operand_bits()),
        }
    }
}
