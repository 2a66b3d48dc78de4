//! Run-length contraction and the clear-cell peephole rewrite.

use crate::error::CompileError;
use crate::normalize::is_operator;
use crate::token::Token;

/// Contract an operator sequence into run-length tokens.
///
/// Maximal runs of the same operator among `+ - < > . ,` merge into one
/// counted token. Brackets never merge: each `[`/`]` emits its own token
/// and breaks any in-progress run. A final pass rewrites the exact shape
/// `[`, `-`x1, `]` into a single [`Token::ClearCell`].
///
/// Deterministic, no I/O.
///
/// # Errors
///
/// [`CompileError::UnknownOperator`] for any byte outside the alphabet.
/// The [`compile`](crate::compile) pipeline never triggers this because
/// normalization filters first, but the optimizer rejects raw input on
/// its own so that callers cannot bypass the check.
pub fn optimize(ops: &[u8]) -> Result<Vec<Token>, CompileError> {
    let runs = contract_runs(ops)?;
    Ok(rewrite_clear_cells(runs))
}

fn contract_runs(ops: &[u8]) -> Result<Vec<Token>, CompileError> {
    let mut tokens = Vec::new();
    let mut run: Option<(u8, u32)> = None;

    for (at, &op) in ops.iter().enumerate() {
        if !is_operator(op) {
            return Err(CompileError::UnknownOperator { byte: op, at });
        }
        match op {
            b'[' | b']' => {
                flush_run(&mut tokens, run.take());
                tokens.push(if op == b'[' {
                    Token::LoopBegin
                } else {
                    Token::LoopEnd
                });
            }
            _ => match run {
                Some((prev, count)) if prev == op => run = Some((prev, count + 1)),
                _ => {
                    flush_run(&mut tokens, run.take());
                    run = Some((op, 1));
                }
            },
        }
    }
    flush_run(&mut tokens, run);

    Ok(tokens)
}

fn flush_run(tokens: &mut Vec<Token>, run: Option<(u8, u32)>) {
    if let Some((op, count)) = run {
        // Brackets never enter a run, so counted() always produces a token.
        if let Some(token) = Token::counted(op, count) {
            tokens.push(token);
        }
    }
}

/// Single non-overlapping pass: each `LoopBegin, Dec(1), LoopEnd` triple
/// becomes one `ClearCell`; scanning resumes after the consumed triple.
fn rewrite_clear_cells(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i] == Token::LoopBegin
            && tokens.get(i + 1) == Some(&Token::Dec(1))
            && tokens.get(i + 2) == Some(&Token::LoopEnd)
        {
            out.push(Token::ClearCell);
            i += 3;
        } else {
            out.push(tokens[i]);
            i += 1;
        }
    }
    out
}
