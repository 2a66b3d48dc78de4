//! Common types and instruction encoding for the bfo tape machine.
//!
//! This crate provides the foundational data structures shared by the
//! compiler, the execution engine, and the CLI:
//!
//! - [`Opcode`] — the eight opcode bytes of the instruction set
//! - [`Instruction`] — the tagged instruction enum with 8-byte encode/decode
//! - [`Program`] — a resolved instruction sequence, the compilation artifact
//! - [`CellWidth`] — cell modulus configuration (2^8, 2^16, or 2^32)
//! - [`DecodeError`] — errors from decoding byte streams
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod width;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use program::Program;
pub use width::CellWidth;
