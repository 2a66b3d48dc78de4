//! Integration tests for the bfo execution engine, driven entirely
//! through the public `run` entry point and observable I/O.

use std::io::Cursor;

use bfo_common::{CellWidth, Instruction, Program};
use bfo_vm::{run, RunConfig, RuntimeError, DEFAULT_TAPE_SIZE};

/// A small tape keeps bounds tests cheap.
fn config(width: CellWidth) -> RunConfig {
    RunConfig {
        tape_size: 256,
        width,
        flush: true,
    }
}

/// Run `program` against `input`, returning captured output.
fn run_with(program: &Program, cfg: &RunConfig, input: &[u8]) -> Vec<u8> {
    let mut output = Vec::new();
    run(program, cfg, Cursor::new(input), &mut output).unwrap();
    output
}

#[test]
fn default_config_matches_documented_values() {
    let cfg = RunConfig::default();
    assert_eq!(cfg.tape_size, DEFAULT_TAPE_SIZE);
    assert_eq!(cfg.width, CellWidth::U8);
    assert!(cfg.flush);
}

#[test]
fn echo_one_byte() {
    let program = Program::new(vec![
        Instruction::Input(1),
        Instruction::Output(1),
        Instruction::Halt,
    ]);
    assert_eq!(run_with(&program, &config(CellWidth::U8), b"Z"), b"Z");
}

#[test]
fn input_repeat_keeps_only_the_last_byte() {
    let program = Program::new(vec![
        Instruction::Input(3),
        Instruction::Output(1),
        Instruction::Halt,
    ]);
    assert_eq!(run_with(&program, &config(CellWidth::U8), b"ABC"), b"C");
}

#[test]
fn input_after_eof_outputs_zero() {
    let program = Program::new(vec![
        Instruction::AddCell(7),
        Instruction::Input(1),
        Instruction::Output(1),
        Instruction::Halt,
    ]);
    assert_eq!(run_with(&program, &config(CellWidth::U8), b""), [0u8]);
}

#[test]
fn output_repeat_writes_consecutive_copies() {
    let program = Program::new(vec![
        Instruction::AddCell(b'!' as i32),
        Instruction::Output(4),
        Instruction::Halt,
    ]);
    assert_eq!(run_with(&program, &config(CellWidth::U8), b""), b"!!!!");
}

/// Outputs `Y` if adding 256 to a fresh cell wrapped to zero, `N` if not.
fn wrap_probe() -> Program {
    Program::new(vec![
        Instruction::AddCell(256),
        Instruction::JumpIfZero(4),
        Instruction::SetCell(b'N' as u32),
        Instruction::JumpIfNotZero(5),
        Instruction::SetCell(b'Y' as u32),
        Instruction::Output(1),
        Instruction::Halt,
    ])
}

#[test]
fn cell_width_controls_the_wraparound_point() {
    assert_eq!(run_with(&wrap_probe(), &config(CellWidth::U8), b""), b"Y");
    assert_eq!(run_with(&wrap_probe(), &config(CellWidth::U16), b""), b"N");
    assert_eq!(run_with(&wrap_probe(), &config(CellWidth::U32), b""), b"N");
}

#[test]
fn decrement_from_zero_wraps_to_modulus_minus_one() {
    let program = Program::new(vec![
        Instruction::AddCell(-1),
        Instruction::Output(1),
        Instruction::Halt,
    ]);
    // The low byte of modulus-1 is 0xFF at every width.
    for width in [CellWidth::U8, CellWidth::U16, CellWidth::U32] {
        assert_eq!(run_with(&program, &config(width), b""), [0xFFu8]);
    }
}

#[test]
fn countdown_loop_terminates() {
    // 5 iterations of a decrement loop, then output the zeroed cell.
    let program = Program::new(vec![
        Instruction::AddCell(5),
        Instruction::JumpIfZero(4),
        Instruction::AddCell(-1),
        Instruction::JumpIfNotZero(1),
        Instruction::Output(1),
        Instruction::Halt,
    ]);
    assert_eq!(run_with(&program, &config(CellWidth::U8), b""), [0u8]);
}

#[test]
fn pointer_underflow_aborts_the_run() {
    let program = Program::new(vec![Instruction::MoveCell(-1), Instruction::Halt]);
    let err = run(
        &program,
        &config(CellWidth::U8),
        Cursor::new(&b""[..]),
        Vec::new(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::TapeBoundsExceeded {
            at: 0,
            pointer: -1,
            tape_size: 256
        }
    ));
}

#[test]
fn pointer_overflow_aborts_the_run() {
    let program = Program::new(vec![Instruction::MoveCell(256), Instruction::Halt]);
    let err = run(
        &program,
        &config(CellWidth::U8),
        Cursor::new(&b""[..]),
        Vec::new(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::TapeBoundsExceeded {
            at: 0,
            pointer: 256,
            tape_size: 256
        }
    ));
}

#[test]
fn truncated_program_aborts_instead_of_running_off_the_end() {
    let program = Program::new(vec![Instruction::AddCell(1)]);
    let err = run(
        &program,
        &config(CellWidth::U8),
        Cursor::new(&b""[..]),
        Vec::new(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::UnexpectedEndOfProgram { at: 1 }
    ));
}

#[test]
fn decoded_artifact_runs_like_the_original() {
    let original = Program::new(vec![
        Instruction::AddCell(b'h' as i32),
        Instruction::Output(1),
        Instruction::AddCell(1),
        Instruction::Output(1),
        Instruction::Halt,
    ]);
    let decoded = Program::decode(&original.encode()).unwrap();
    assert_eq!(run_with(&decoded, &config(CellWidth::U8), b""), b"hi");
}
