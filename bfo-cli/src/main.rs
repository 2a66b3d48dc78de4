//! bfo CLI — compile Brainfuck sources, then run them or export bytecode.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage, file read/write, or compile error
//! - 2: Runtime error
//!
//! Each source file is processed independently; a failure in one does not
//! stop the rest, and the process exits with the worst code observed.

use std::fs;
use std::io;
use std::path::Path;
use std::process;

use bfo_common::{CellWidth, Program};
use bfo_compiler::{codegen, normalize, optimize};
use bfo_vm::{run, RunConfig};

struct Options {
    /// Export the compiled artifact instead of executing.
    export: bool,
    /// Flush the output sink after every write.
    flush: bool,
    width: CellWidth,
    verbose: bool,
    files: Vec<String>,
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(code) => process::exit(code),
    };

    if options.files.is_empty() {
        print_usage();
        process::exit(1);
    }

    let mut exit_code = 0;
    for file in &options.files {
        if let Err(code) = process_file(file, &options) {
            exit_code = exit_code.max(code);
        }
    }
    process::exit(exit_code);
}

fn parse_args(args: &[String]) -> Result<Options, i32> {
    let mut options = Options {
        export: false,
        flush: true,
        width: CellWidth::default(),
        verbose: false,
        files: Vec::new(),
    };

    for arg in args {
        match arg.as_str() {
            "-e" => options.export = true,
            "-b" => options.flush = false,
            "-u8" => options.width = CellWidth::U8,
            "-u16" => options.width = CellWidth::U16,
            "-u32" => options.width = CellWidth::U32,
            "-v" => options.verbose = true,
            "--help" | "-h" => {
                print_usage();
                return Err(0);
            }
            other if other.starts_with('-') => {
                eprintln!("error: unknown option '{other}'");
                eprintln!();
                print_usage();
                return Err(1);
            }
            file => options.files.push(file.to_string()),
        }
    }

    Ok(options)
}

fn print_usage() {
    eprintln!("Usage: bfo [options] <source>...");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -e    export bytecode (<source>.bfbc) instead of executing");
    eprintln!("  -b    buffered output (no flush after every write)");
    eprintln!("  -u8   cells wrap modulo 2^8 (default)");
    eprintln!("  -u16  cells wrap modulo 2^16");
    eprintln!("  -u32  cells wrap modulo 2^32");
    eprintln!("  -v    optimization diagnostics on stderr");
}

/// Compile one source file, then execute it or export its artifact.
fn process_file(path: &str, options: &Options) -> Result<(), i32> {
    let source = fs::read(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })?;

    let ops = normalize::normalize(&source).map_err(|e| {
        eprintln!("{path}: error: {e}");
        1
    })?;
    let tokens = optimize::optimize(&ops).map_err(|e| {
        eprintln!("{path}: error: {e}");
        1
    })?;
    if options.verbose {
        eprintln!(
            "{path}: optimized {} operators into {} tokens",
            ops.len(),
            tokens.len()
        );
    }
    let program = codegen::generate(&tokens).map_err(|e| {
        eprintln!("{path}: error: {e}");
        1
    })?;

    if options.export {
        export_artifact(path, &program)
    } else {
        execute(path, &program, options)
    }
}

/// Persist the encoded instruction sequence next to the source file.
fn export_artifact(path: &str, program: &Program) -> Result<(), i32> {
    let output = Path::new(path).with_extension("bfbc");
    let bytes = program.encode();

    fs::write(&output, &bytes).map_err(|e| {
        eprintln!("error: cannot write '{}': {e}", output.display());
        1
    })?;

    eprintln!(
        "exported {} instructions ({} bytes) -> {}",
        program.len(),
        bytes.len(),
        output.display()
    );
    Ok(())
}

fn execute(path: &str, program: &Program, options: &Options) -> Result<(), i32> {
    let config = RunConfig {
        width: options.width,
        flush: options.flush,
        ..RunConfig::default()
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(program, &config, stdin.lock(), stdout.lock()).map_err(|e| {
        eprintln!("{path}: runtime error: {e}");
        2
    })
}
