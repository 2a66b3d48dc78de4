//! Machine state: tape, pointer, program counter, and I/O handles.

use std::io::{ErrorKind, Read, Write};

use bfo_common::{CellWidth, Instruction, Program};

use crate::error::RuntimeError;

/// Default tape length in cells.
pub const DEFAULT_TAPE_SIZE: usize = 1_000_000;

/// Execution-time configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Number of cells on the tape.
    pub tape_size: usize,
    /// Cell arithmetic modulus.
    pub width: CellWidth,
    /// Flush the output sink after every output instruction. On by
    /// default so interactive programs stay responsive; turn off for
    /// batch output.
    pub flush: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
            width: CellWidth::default(),
            flush: true,
        }
    }
}

/// The tape machine.
///
/// Owns the tape and pointer exclusively for the lifetime of one program
/// run; a fresh machine is built per run and discarded afterwards. The
/// instruction sequence is immutable throughout execution.
pub struct Machine<'a, R, W> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    /// The memory tape. Cells hold values below the configured modulus.
    pub(crate) tape: Vec<u32>,
    /// Tape pointer (cell index).
    pub(crate) ptr: usize,
    /// Program counter (instruction index).
    pub(crate) pc: usize,
    /// Cell arithmetic modulus.
    pub(crate) width: CellWidth,
    /// Flush-per-write policy.
    pub(crate) flush: bool,
    /// Byte-oriented input source, consumed strictly in order.
    pub(crate) input: R,
    /// Byte-oriented output sink.
    pub(crate) output: W,
}

impl<'a, R: Read, W: Write> Machine<'a, R, W> {
    /// Create a machine for one run, with all cells zeroed and both the
    /// pointer and the program counter at 0.
    pub fn new(program: &'a Program, config: &RunConfig, input: R, output: W) -> Self {
        Self {
            program,
            tape: vec![0; config.tape_size],
            ptr: 0,
            pc: 0,
            width: config.width,
            flush: config.flush,
            input,
            output,
        }
    }

    /// Fetch the instruction at the current program counter.
    pub(crate) fn fetch(&self) -> Result<&Instruction, RuntimeError> {
        self.program
            .instructions
            .get(self.pc)
            .ok_or(RuntimeError::UnexpectedEndOfProgram { at: self.pc })
    }

    /// Read one byte from the input source. `None` on end of stream.
    pub(crate) fn read_byte(&mut self) -> std::io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
