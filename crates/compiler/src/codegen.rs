//! Code generation: token sequence to resolved instruction sequence.
//!
//! Loops use the classic single-pass backpatch discipline. A `LoopBegin`
//! emits a forward jump whose target is unknown until the matching
//! `LoopEnd` is seen; the open loop's instruction index waits on a stack
//! and is patched at that point. `JumpIfZero` skips past its matching
//! `JumpIfNotZero` when the cell is zero; `JumpIfNotZero` jumps back to
//! the `JumpIfZero` to re-test when the cell is non-zero.

use bfo_common::{Instruction, Program};

use crate::error::CompileError;
use crate::token::Token;

/// Placeholder target for a forward jump not yet patched. Never survives
/// a successful generation pass.
const UNRESOLVED_TARGET: u32 = u32::MAX;

/// An open loop awaiting its `LoopEnd`.
struct OpenLoop {
    /// Index of the `LoopBegin` in the token sequence, for error context.
    token_index: usize,
    /// Index of the emitted `JumpIfZero` awaiting its patch.
    jump_index: usize,
}

/// Generate the resolved instruction sequence for a token slice.
///
/// A terminal [`Instruction::Halt`] is always appended. Cell arithmetic
/// is not evaluated here; `AddCell` deltas are reduced modulo the cell
/// width at execution time.
///
/// # Errors
///
/// [`CompileError::UnmatchedLoopEnd`] when a `LoopEnd` arrives with no
/// loop open, [`CompileError::UnmatchedLoopBegin`] when input ends with
/// loops still open. Both carry the offending token index.
pub fn generate(tokens: &[Token]) -> Result<Program, CompileError> {
    let mut instructions = Vec::with_capacity(tokens.len() + 1);
    let mut open_loops: Vec<OpenLoop> = Vec::new();

    for (at, &token) in tokens.iter().enumerate() {
        match token {
            Token::MoveRight(n) => instructions.push(Instruction::MoveCell(n as i32)),
            Token::MoveLeft(n) => instructions.push(Instruction::MoveCell(-(n as i32))),
            Token::Inc(n) => instructions.push(Instruction::AddCell(n as i32)),
            Token::Dec(n) => instructions.push(Instruction::AddCell(-(n as i32))),
            Token::Output(n) => instructions.push(Instruction::Output(n)),
            Token::Input(n) => instructions.push(Instruction::Input(n)),
            Token::ClearCell => instructions.push(Instruction::SetCell(0)),
            Token::LoopBegin => {
                open_loops.push(OpenLoop {
                    token_index: at,
                    jump_index: instructions.len(),
                });
                instructions.push(Instruction::JumpIfZero(UNRESOLVED_TARGET));
            }
            Token::LoopEnd => {
                let open = open_loops
                    .pop()
                    .ok_or(CompileError::UnmatchedLoopEnd { at })?;
                // The loop exit sits one past the JumpIfNotZero emitted now.
                let exit = instructions.len() as u32 + 1;
                instructions[open.jump_index] = Instruction::JumpIfZero(exit);
                instructions.push(Instruction::JumpIfNotZero(open.jump_index as u32));
            }
        }
    }

    if let Some(open) = open_loops.pop() {
        return Err(CompileError::UnmatchedLoopBegin {
            at: open.token_index,
        });
    }

    instructions.push(Instruction::Halt);
    Ok(Program::new(instructions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::optimize;
    use proptest::prelude::*;

    fn generate_source(source: &[u8]) -> Result<Program, CompileError> {
        generate(&optimize(source).unwrap())
    }

    #[test]
    fn empty_token_sequence_is_a_lone_halt() {
        let program = generate(&[]).unwrap();
        assert_eq!(program.instructions, vec![Instruction::Halt]);
    }

    #[test]
    fn straight_line_tokens_map_one_to_one() {
        let program = generate_source(b"++>--<..,").unwrap();
        assert_eq!(program.instructions, vec![
            Instruction::AddCell(2),
            Instruction::MoveCell(1),
            Instruction::AddCell(-2),
            Instruction::MoveCell(-1),
            Instruction::Output(2),
            Instruction::Input(1),
            Instruction::Halt,
        ]);
    }

    #[test]
    fn clear_cell_becomes_set_zero() {
        let program = generate(&[Token::ClearCell]).unwrap();
        assert_eq!(program.instructions, vec![
            Instruction::SetCell(0),
            Instruction::Halt,
        ]);
    }

    #[test]
    fn loop_jumps_resolve_to_absolute_indices() {
        let program = generate_source(b"+[+]").unwrap();
        assert_eq!(program.instructions, vec![
            Instruction::AddCell(1),
            Instruction::JumpIfZero(4), // past the JumpIfNotZero
            Instruction::AddCell(1),
            Instruction::JumpIfNotZero(1), // back to the re-test
            Instruction::Halt,
        ]);
    }

    #[test]
    fn nested_loops_patch_inner_before_outer() {
        let program = generate(&[
            Token::LoopBegin,
            Token::LoopBegin,
            Token::LoopEnd,
            Token::LoopEnd,
        ])
        .unwrap();
        assert_eq!(program.instructions, vec![
            Instruction::JumpIfZero(4),
            Instruction::JumpIfZero(3),
            Instruction::JumpIfNotZero(1),
            Instruction::JumpIfNotZero(0),
            Instruction::Halt,
        ]);
    }

    #[test]
    fn no_unresolved_targets_survive() {
        let program = generate_source(b"[[>+<-]]").unwrap();
        for instr in &program.instructions {
            if let Instruction::JumpIfZero(t) | Instruction::JumpIfNotZero(t) = *instr {
                assert!((t as usize) < program.len(), "wild target {t}");
            }
        }
    }

    #[test]
    fn unmatched_loop_begin_reports_token_index() {
        assert_eq!(
            generate_source(b"[+"),
            Err(CompileError::UnmatchedLoopBegin { at: 0 })
        );
        // With two loops left open, the innermost is reported.
        assert_eq!(
            generate_source(b"+[["),
            Err(CompileError::UnmatchedLoopBegin { at: 2 })
        );
    }

    #[test]
    fn unmatched_loop_end_reports_token_index() {
        assert_eq!(
            generate_source(b"+]"),
            Err(CompileError::UnmatchedLoopEnd { at: 1 })
        );
        assert_eq!(
            generate_source(b"]"),
            Err(CompileError::UnmatchedLoopEnd { at: 0 })
        );
    }

    /// Reference bracket-balance check over raw operator bytes.
    fn brackets_balanced(ops: &[u8]) -> bool {
        let mut depth = 0i64;
        for &op in ops {
            match op {
                b'[' => depth += 1,
                b']' => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }

    proptest! {
        /// Code generation succeeds exactly when brackets balance.
        #[test]
        fn succeeds_iff_brackets_balance(
            ops in prop::collection::vec(prop::sample::select(&b"+-<>.,[]"[..]), 0..128)
        ) {
            let result = generate_source(&ops);
            prop_assert_eq!(result.is_ok(), brackets_balanced(&ops));
        }

        /// Every generated program ends in Halt.
        #[test]
        fn always_ends_in_halt(
            ops in prop::collection::vec(prop::sample::select(&b"+-<>.,"[..]), 0..64)
        ) {
            let program = generate_source(&ops).unwrap();
            prop_assert_eq!(program.instructions.last(), Some(&Instruction::Halt));
        }
    }
}
