use crate::context::Context;
use crate::error::EngineError;
use minic_error::{CompilerError, ErrorCode};
use minic_ir::SourceLocation;

/// The result of running one stage
#[derive(Debug, Clone)]
pub struct StageOutcome {
    /// True if the stage completed its work
    pub succeeded: bool,
    /// Error code, present on failure
    pub code: Option<ErrorCode>,
    /// Error message, present on failure
    pub message: Option<String>,
    /// Source position the failure refers to, when there is one
    pub location: Option<SourceLocation>,
}

impl StageOutcome {
    pub fn success() -> Self {
        Self {
            succeeded: true,
            code: None,
            message: None,
            location: None,
        }
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            code: Some(code),
            message: Some(message.into()),
            location: None,
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

impl From<EngineError> for StageOutcome {
    fn from(error: EngineError) -> Self {
        StageOutcome::failure(error.code, error.message)
    }
}

impl From<CompilerError> for StageOutcome {
    fn from(error: CompilerError) -> Self {
        let location = SourceLocation::new(error.line, error.column);
        StageOutcome::failure(error.code, error.message).with_location(location)
    }
}

/// A named unit of work over the context.
///
/// Stages consume and produce data only through context keys; they never
/// call each other directly.
pub trait Stage: Send + Sync {
    /// Stable name of the stage, used in failure reports and by middleware
    fn name(&self) -> &str;

    /// Runs the stage against the shared context
    fn run(&self, context: &Context) -> StageOutcome;
}

/// Adapter turning a closure into a stage
pub struct FnStage<F> {
    name: String,
    run: F,
}

impl<F> FnStage<F>
where
    F: Fn(&Context) -> StageOutcome + Send + Sync,
{
    pub fn new(name: impl Into<String>, run: F) -> Self {
        Self {
            name: name.into(),
            run,
        }
    }
}

impl<F> Stage for FnStage<F>
where
    F: Fn(&Context) -> StageOutcome + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, context: &Context) -> StageOutcome {
        (self.run)(context)
    }
}
