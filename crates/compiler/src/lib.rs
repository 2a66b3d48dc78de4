//! Ahead-of-time compiler from Brainfuck source to bfo bytecode.
//!
//! The pipeline is three pure stages:
//!
//! 1. [`normalize`](normalize::normalize) — strip any leading bracket
//!    comment header, drop every byte outside the eight-operator alphabet
//! 2. [`optimize`](optimize::optimize) — contract operator runs into
//!    counted tokens and rewrite the `[-]` idiom to a clear-cell token
//! 3. [`generate`](codegen::generate) — resolve loops into absolute jump
//!    targets and append the terminal halt
//!
//! # Usage
//!
//! ```
//! use bfo_common::Instruction;
//! use bfo_compiler::compile;
//!
//! let program = compile(b"comment +++ [-] .").unwrap();
//! assert_eq!(program.instructions, vec![
//!     Instruction::AddCell(3),
//!     Instruction::SetCell(0),
//!     Instruction::Output(1),
//!     Instruction::Halt,
//! ]);
//! ```

pub mod codegen;
pub mod error;
pub mod normalize;
pub mod optimize;
pub mod token;

pub use error::CompileError;
pub use token::Token;

use bfo_common::Program;

/// Compile source text into a resolved instruction sequence.
///
/// Runs the full normalize → optimize → generate pipeline. The program is
/// ready to execute or to persist via [`Program::encode`].
///
/// # Errors
///
/// Returns [`CompileError`] on a malformed comment header or unbalanced
/// loops. Compilation of a source aborts on the first error; nothing is
/// partially executed.
pub fn compile(source: &[u8]) -> Result<Program, CompileError> {
    let ops = normalize::normalize(source)?;
    let tokens = optimize::optimize(&ops)?;
    codegen::generate(&tokens)
}
