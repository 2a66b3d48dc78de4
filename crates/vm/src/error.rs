//! Runtime errors for the bfo execution engine.
//!
//! Every positioned variant carries the index of the faulting instruction.
//! Input end-of-stream is not an error: an exhausted source stores 0 into
//! the current cell, by the defined EOF policy.

use thiserror::Error;

/// Errors that occur during program execution. All are fatal: the run
/// aborts immediately with no partial-result recovery.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The tape pointer moved outside `[0, tape_size)`. The pointer never
    /// wraps; only cell values do.
    #[error("tape pointer {pointer} out of bounds (tape size {tape_size}) at instruction {at}")]
    TapeBoundsExceeded {
        at: usize,
        pointer: i64,
        tape_size: usize,
    },

    /// The program counter ran past the end of the instruction sequence.
    /// Generated programs always end in HALT; only a truncated artifact
    /// can reach this.
    #[error("unexpected end of program at instruction {at}")]
    UnexpectedEndOfProgram { at: usize },

    /// The input source or output sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
