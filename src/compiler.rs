//! Assembles the standard four-stage pipeline and runs it over a source
//! buffer.

use crate::stages::{CodegenStage, LexStage, ParseStage, TypeCheckStage};
use minic_backend::{CodegenOptions, Target};
use minic_engine::middlewares::{LoggingMiddleware, TimingMiddleware};
use minic_engine::{
    ErrorDetail, FaultTolerance, Pipeline, StageFailure, Value, keys,
};
use minic_error::ErrorCode;

/// Options controlling one compilation
#[derive(Debug, Clone, Copy)]
pub struct CompileOptions {
    pub target: Target,
    pub emit_comments: bool,
    pub pretty_print: bool,
    /// Error-detail level of reported failures
    pub detail: ErrorDetail,
    /// Attach logging and timing middleware
    pub trace: bool,
    /// Stop after the type checker; no output is generated
    pub check_only: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            target: Target::C,
            emit_comments: false,
            pretty_print: true,
            detail: ErrorDetail::Full,
            trace: false,
            check_only: false,
        }
    }
}

/// Compiles a source buffer.
///
/// Returns the generated code on success (`None` in check-only mode), or
/// the recorded stage failures otherwise.
pub fn compile_source(
    source: &str,
    options: &CompileOptions,
) -> Result<Option<String>, Vec<StageFailure>> {
    let pipeline = build_pipeline(source, options)?;
    let outcome = pipeline.execute();

    if !outcome.succeeded {
        return Err(outcome.failures);
    }
    if options.check_only {
        return Ok(None);
    }

    match pipeline.context().get(keys::OUTPUT_CODE) {
        Ok(entry) => Ok(entry.as_output().map(str::to_string)),
        Err(error) => Err(vec![setup_failure(error.code, error.message)]),
    }
}

fn build_pipeline(
    source: &str,
    options: &CompileOptions,
) -> Result<Pipeline, Vec<StageFailure>> {
    let pipeline = Pipeline::new(FaultTolerance::Strict).with_detail(options.detail);

    pipeline
        .context()
        .set(keys::SOURCE_TEXT, Value::Source(source.to_string()))
        .map_err(|error| vec![setup_failure(error.code, error.message)])?;

    if options.trace {
        pipeline
            .add_middleware(Box::new(LoggingMiddleware::new()))
            .map_err(|error| vec![setup_failure(error.code, error.message)])?;
        pipeline
            .add_middleware(Box::new(TimingMiddleware::new()))
            .map_err(|error| vec![setup_failure(error.code, error.message)])?;
    }

    let mut stages: Vec<Box<dyn minic_engine::Stage>> =
        vec![Box::new(LexStage), Box::new(ParseStage), Box::new(TypeCheckStage)];
    if !options.check_only {
        stages.push(Box::new(CodegenStage::new(CodegenOptions {
            target: options.target,
            emit_comments: options.emit_comments,
            pretty_print: options.pretty_print,
        })));
    }

    for stage in stages {
        pipeline
            .add_stage(stage)
            .map_err(|error| vec![setup_failure(error.code, error.message)])?;
    }

    Ok(pipeline)
}

fn setup_failure(code: ErrorCode, message: String) -> StageFailure {
    StageFailure {
        stage: "<setup>".to_string(),
        code,
        message,
        location: None,
    }
}
