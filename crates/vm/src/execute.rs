//! Fetch-decode-execute loop for the bfo tape machine.

use std::io::{Read, Write};

use bfo_common::Instruction;

use crate::error::RuntimeError;
use crate::machine::Machine;

impl<'a, R: Read, W: Write> Machine<'a, R, W> {
    /// Execute the program from instruction 0 until HALT or a fatal error.
    ///
    /// Execution is purely sequential. The only blocking points are input
    /// reads and output writes; a program that loops forever runs forever.
    pub fn execute(&mut self) -> Result<(), RuntimeError> {
        loop {
            let instr = *self.fetch()?;
            self.pc += 1;

            match instr {
                Instruction::AddCell(delta) => self.add_cell(delta),
                Instruction::MoveCell(delta) => self.move_cell(delta)?,
                Instruction::SetCell(value) => self.set_cell(value),
                Instruction::Output(repeat) => self.write_output(repeat)?,
                Instruction::Input(repeat) => self.read_input(repeat)?,
                Instruction::JumpIfZero(target) => {
                    if self.tape[self.ptr] == 0 {
                        self.pc = target as usize;
                    }
                }
                Instruction::JumpIfNotZero(target) => {
                    if self.tape[self.ptr] != 0 {
                        self.pc = target as usize;
                    }
                }
                Instruction::Halt => {
                    self.output.flush()?;
                    return Ok(());
                }
            }
        }
    }

    /// Cell arithmetic, reduced into `[0, modulus)`.
    fn add_cell(&mut self, delta: i32) {
        let modulus = self.width.modulus() as i64;
        let cell = self.tape[self.ptr] as i64;
        self.tape[self.ptr] = (cell + delta as i64).rem_euclid(modulus) as u32;
    }

    /// Pointer movement. An excursion outside the tape is fatal; the
    /// pointer does not wrap.
    fn move_cell(&mut self, delta: i32) -> Result<(), RuntimeError> {
        let target = self.ptr as i64 + delta as i64;
        if target < 0 || target >= self.tape.len() as i64 {
            return Err(RuntimeError::TapeBoundsExceeded {
                at: self.pc - 1,
                pointer: target,
                tape_size: self.tape.len(),
            });
        }
        self.ptr = target as usize;
        Ok(())
    }

    fn set_cell(&mut self, value: u32) {
        self.tape[self.ptr] = (value as u64 % self.width.modulus()) as u32;
    }

    /// Write the current cell's byte value `repeat` times.
    fn write_output(&mut self, repeat: u32) -> Result<(), RuntimeError> {
        let byte = (self.tape[self.ptr] & 0xFF) as u8;
        self.output.write_all(&vec![byte; repeat as usize])?;
        if self.flush {
            self.output.flush()?;
        }
        Ok(())
    }

    /// Consume up to `repeat` bytes, keeping only the last one read.
    /// An exhausted source stores 0 (EOF policy).
    fn read_input(&mut self, repeat: u32) -> Result<(), RuntimeError> {
        let mut last = None;
        for _ in 0..repeat {
            match self.read_byte()? {
                Some(byte) => last = Some(byte),
                None => break,
            }
        }
        self.tape[self.ptr] = last.map(u32::from).unwrap_or(0);
        Ok(())
    }
}
