use crate::compiler::{CompileOptions, compile_source};
use crate::error::{CliError, CliResult};
use clap::{Parser as ClapParser, Subcommand};
use minic_backend::Target;
use minic_engine::{ErrorDetail, StageFailure};
use minic_shared::{Diagnostic, DiagnosticEngine};
use std::fs;

/// Command line interface for the minic compiler
#[derive(ClapParser)]
#[command(
    version,
    about = "minic compiler",
    long_about = r#"minic compiles a small statically-typed procedural language
to C99 or to a human-readable SSA-like intermediate representation."#,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the minic CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Compile a source file to C or textual IR
    Compile {
        /// Input source file
        input: String,

        /// Output file (default: standard output)
        #[arg(short, long)]
        output: Option<String>,

        /// Output language: c or ir
        #[arg(long, default_value = "c")]
        target: String,

        /// Emit a header comment at the top of the output
        #[arg(long)]
        emit_comments: bool,

        /// Disable 4-space indentation of the output
        #[arg(long)]
        compact: bool,

        /// Report failures as bare error codes
        #[arg(long)]
        minimal_errors: bool,

        /// Attach logging and timing middleware to the pipeline
        #[arg(long)]
        trace: bool,
    },

    /// Parse and type-check a source file without generating code
    Check {
        /// Input source file
        input: String,

        /// Report failures as bare error codes
        #[arg(long)]
        minimal_errors: bool,
    },
}

pub fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Compile {
            input,
            output,
            target,
            emit_comments,
            compact,
            minimal_errors,
            trace,
        } => {
            let options = CompileOptions {
                target: parse_target(&target)?,
                emit_comments,
                pretty_print: !compact,
                detail: detail_level(minimal_errors),
                trace,
                check_only: false,
            };
            let source = read_source_file(&input)?;

            match compile_source(&source, &options) {
                Ok(Some(code)) => write_output(&code, output.as_deref()),
                Ok(None) => Ok(()),
                Err(failures) => Err(report_failures(&input, &source, failures)),
            }
        }
        Commands::Check {
            input,
            minimal_errors,
        } => {
            let options = CompileOptions {
                detail: detail_level(minimal_errors),
                check_only: true,
                ..CompileOptions::default()
            };
            let source = read_source_file(&input)?;

            match compile_source(&source, &options) {
                Ok(_) => Ok(()),
                Err(failures) => Err(report_failures(&input, &source, failures)),
            }
        }
    }
}

/// Maps the `--target` string onto an emitter; anything else is a usage
/// error (the engine-side `Target` enum cannot represent an unsupported
/// value).
fn parse_target(target: &str) -> CliResult<Target> {
    match target {
        "c" => Ok(Target::C),
        "ir" => Ok(Target::Ir),
        other => Err(CliError::Usage {
            message: format!("unsupported target '{other}' (expected 'c' or 'ir')"),
        }),
    }
}

fn detail_level(minimal: bool) -> ErrorDetail {
    if minimal {
        ErrorDetail::Minimal
    } else {
        ErrorDetail::Full
    }
}

fn read_source_file(input: &str) -> CliResult<String> {
    fs::read_to_string(input).map_err(|error| CliError::Io {
        message: format!("cannot read '{}': {}", input, error),
    })
}

fn write_output(code: &str, output: Option<&str>) -> CliResult<()> {
    match output {
        Some(path) => fs::write(path, code).map_err(|error| CliError::Io {
            message: format!("cannot write '{}': {}", path, error),
        }),
        None => {
            print!("{code}");
            Ok(())
        }
    }
}

/// Renders pipeline failures through the diagnostic engine
fn report_failures(input: &str, source: &str, failures: Vec<StageFailure>) -> CliError {
    let mut engine = DiagnosticEngine::new();
    engine.set_file_name(input.to_string());
    for failure in failures {
        engine.emit(Diagnostic {
            stage: failure.stage,
            code: failure.code,
            message: failure.message,
            location: failure.location,
        });
    }
    let errors = engine.error_count();
    engine.report_all(source);
    CliError::Compile { errors }
}
