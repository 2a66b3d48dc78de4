//! Bytecode execution engine for the bfo tape machine.
//!
//! The machine owns a linear tape of cells and a pointer, and interprets
//! a resolved instruction sequence with a plain fetch-decode-execute
//! loop. All I/O goes through the byte-oriented handles supplied per run;
//! nothing is shared between runs.
//!
//! # Usage
//!
//! ```
//! use bfo_common::{Instruction, Program};
//! use bfo_vm::{run, RunConfig};
//!
//! let program = Program::new(vec![
//!     Instruction::AddCell(0x41),
//!     Instruction::Output(1),
//!     Instruction::Halt,
//! ]);
//!
//! let mut output = Vec::new();
//! run(&program, &RunConfig::default(), std::io::empty(), &mut output).unwrap();
//! assert_eq!(output, b"A");
//! ```

pub mod error;
pub mod execute;
pub mod machine;

pub use error::RuntimeError;
pub use machine::{Machine, RunConfig, DEFAULT_TAPE_SIZE};

use std::io::{Read, Write};

use bfo_common::Program;

/// Execute a program to completion.
///
/// Allocates a fresh zeroed tape per call and runs from instruction 0
/// until HALT. The sink is flushed on normal termination regardless of
/// the per-write flush policy.
///
/// # Errors
///
/// Returns [`RuntimeError`] if the pointer leaves the tape, the program
/// counter runs off the end, or the I/O handles fail.
pub fn run<R: Read, W: Write>(
    program: &Program,
    config: &RunConfig,
    input: R,
    output: W,
) -> Result<(), RuntimeError> {
    let mut machine = Machine::new(program, config, input, output);
    machine.execute()
}
