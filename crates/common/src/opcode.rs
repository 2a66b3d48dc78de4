//! Opcode definitions for the bfo instruction set.

use crate::error::DecodeError;

/// Identifies the operation a tape-machine instruction performs.
///
/// The `#[repr(u8)]` attribute ensures each variant has a stable byte value
/// in the encoded artifact format.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Cell and pointer arithmetic
    /// Add the signed operand to the current cell, modulo the cell width.
    AddCell = 0x01,
    /// Move the tape pointer by the signed operand.
    MoveCell = 0x02,
    /// Store the operand into the current cell.
    SetCell = 0x03,

    // I/O
    /// Write the current cell's byte value, repeated `operand` times.
    Output = 0x10,
    /// Read up to `operand` bytes, keeping only the last one read.
    Input = 0x11,

    // Control flow
    /// Branch to the absolute instruction index in the operand if the
    /// current cell is zero.
    JumpIfZero = 0x20,
    /// Branch to the absolute instruction index in the operand if the
    /// current cell is non-zero.
    JumpIfNotZero = 0x21,

    /// Stop execution.
    Halt = 0xFE,
}

/// All valid opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 8] = [
    Opcode::AddCell,
    Opcode::MoveCell,
    Opcode::SetCell,
    Opcode::Output,
    Opcode::Input,
    Opcode::JumpIfZero,
    Opcode::JumpIfNotZero,
    Opcode::Halt,
];

impl TryFrom<u8> for Opcode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Opcode::AddCell),
            0x02 => Ok(Opcode::MoveCell),
            0x03 => Ok(Opcode::SetCell),
            0x10 => Ok(Opcode::Output),
            0x11 => Ok(Opcode::Input),
            0x20 => Ok(Opcode::JumpIfZero),
            0x21 => Ok(Opcode::JumpIfNotZero),
            0xFE => Ok(Opcode::Halt),
            other => Err(DecodeError::InvalidOpcode(other)),
        }
    }
}

impl Opcode {
    /// Returns the mnemonic used when rendering instructions.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::AddCell => "ADD_CELL",
            Opcode::MoveCell => "MOVE_CELL",
            Opcode::SetCell => "SET_CELL",
            Opcode::Output => "OUTPUT",
            Opcode::Input => "INPUT",
            Opcode::JumpIfZero => "JUMP_IF_ZERO",
            Opcode::JumpIfNotZero => "JUMP_IF_NOT_ZERO",
            Opcode::Halt => "HALT",
        }
    }
}
