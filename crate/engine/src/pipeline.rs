use crate::context::Context;
use crate::error::EngineError;
use crate::keys;
use crate::middleware::Middleware;
use crate::stage::{Stage, StageOutcome};
use minic_error::{ErrorCode, sanitize_message};
use minic_ir::SourceLocation;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Maximum number of stages a pipeline may hold
pub const MAX_STAGES: usize = 32;
/// Maximum number of middlewares a pipeline may hold
pub const MAX_MIDDLEWARES: usize = 16;

/// Policy governing what happens after a stage fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultTolerance {
    /// Record the failure and stop
    Strict,
    /// Record the failure and continue; the pipeline fails
    Lenient,
    /// Record the failure and continue; stage failures alone do not fail
    /// the pipeline
    BestEffort,
    /// Ask the installed failure handler whether to continue
    Custom,
}

/// Amount of detail carried by reported failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDetail {
    /// Keep messages (control characters are replaced with '?')
    Full,
    /// Replace every message with its numeric code
    Minimal,
}

/// Decision returned by a custom failure handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureDecision {
    Continue,
    Abort,
}

/// Callback consulted in `Custom` fault-tolerance mode
pub type FailureHandler = Box<dyn Fn(&str, &StageOutcome) -> FailureDecision + Send + Sync>;

/// One recorded stage failure
#[derive(Debug, Clone)]
pub struct StageFailure {
    /// Name of the failing stage
    pub stage: String,
    /// The structured error code
    pub code: ErrorCode,
    /// Failure message, already filtered by the detail level
    pub message: String,
    /// Source position, when the failure refers to one
    pub location: Option<SourceLocation>,
}

/// The result of one pipeline execution
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub succeeded: bool,
    /// Stage failures in encounter order
    pub failures: Vec<StageFailure>,
}

/// Ordered stages wrapped by an ordered middleware stack, sharing a context.
///
/// `execute` runs the stages left to right on the calling thread, each
/// wrapped by the middleware onion. The pipeline itself is shareable
/// across threads; a second `execute` overlapping the first fails with
/// `Reentrancy`, as do structural mutations while a run is in flight.
pub struct Pipeline {
    stages: Mutex<Vec<Box<dyn Stage>>>,
    middlewares: Mutex<Vec<Box<dyn Middleware>>>,
    context: Context,
    fault_tolerance: FaultTolerance,
    detail_level: ErrorDetail,
    failure_handler: Mutex<Option<FailureHandler>>,
    executing: AtomicBool,
}

impl Pipeline {
    /// Creates a pipeline with a fresh context
    pub fn new(fault_tolerance: FaultTolerance) -> Self {
        Pipeline::with_context(Context::new(), fault_tolerance)
    }

    /// Creates a pipeline over an existing context
    pub fn with_context(context: Context, fault_tolerance: FaultTolerance) -> Self {
        Pipeline {
            stages: Mutex::new(Vec::new()),
            middlewares: Mutex::new(Vec::new()),
            context,
            fault_tolerance,
            detail_level: ErrorDetail::Full,
            failure_handler: Mutex::new(None),
            executing: AtomicBool::new(false),
        }
    }

    /// Selects the error-detail level for reported failures
    pub fn with_detail(mut self, detail_level: ErrorDetail) -> Self {
        self.detail_level = detail_level;
        self
    }

    /// The context shared by all stages of this pipeline
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Appends a stage. Fails with `Reentrancy` during execution and with
    /// `CapacityExceeded` past the structural bound.
    pub fn add_stage(&self, stage: Box<dyn Stage>) -> Result<(), EngineError> {
        self.guard_not_executing()?;
        let mut stages = lock(&self.stages);
        if stages.len() >= MAX_STAGES {
            return Err(EngineError::new(
                ErrorCode::CapacityExceeded,
                format!("pipeline already holds the maximum of {MAX_STAGES} stages"),
            ));
        }
        stages.push(stage);
        Ok(())
    }

    /// Appends a middleware; the first added becomes the outermost layer.
    pub fn add_middleware(&self, middleware: Box<dyn Middleware>) -> Result<(), EngineError> {
        self.guard_not_executing()?;
        let mut middlewares = lock(&self.middlewares);
        if middlewares.len() >= MAX_MIDDLEWARES {
            return Err(EngineError::new(
                ErrorCode::CapacityExceeded,
                format!("pipeline already holds the maximum of {MAX_MIDDLEWARES} middlewares"),
            ));
        }
        middlewares.push(middleware);
        Ok(())
    }

    /// Installs the policy callback used in `Custom` fault-tolerance mode
    pub fn set_failure_handler(&self, handler: FailureHandler) -> Result<(), EngineError> {
        self.guard_not_executing()?;
        *lock(&self.failure_handler) = Some(handler);
        Ok(())
    }

    /// Runs every stage under the middleware onion.
    ///
    /// State left in the context by a previous run is visible to this one;
    /// call [`Context::clear`] to reset it.
    pub fn execute(&self) -> PipelineOutcome {
        if self
            .executing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return PipelineOutcome {
                succeeded: false,
                failures: vec![StageFailure {
                    stage: "<engine>".to_string(),
                    code: ErrorCode::Reentrancy,
                    message: self.render_message(
                        ErrorCode::Reentrancy,
                        "execute called on an already-executing pipeline",
                    ),
                    location: None,
                }],
            };
        }
        let _guard = ExecGuard {
            flag: &self.executing,
        };

        let stages = lock(&self.stages);
        let middlewares = lock(&self.middlewares);

        let mut failures = Vec::new();
        let mut aborted = false;

        for stage in stages.iter() {
            if self.context.is_flag_set(keys::INTERRUPTED) {
                break;
            }

            let outcome = run_chain(&middlewares, 0, stage.as_ref(), &self.context);
            if outcome.succeeded {
                continue;
            }

            failures.push(self.render_failure(stage.name(), &outcome));

            match self.fault_tolerance {
                FaultTolerance::Strict => {
                    aborted = true;
                    break;
                }
                FaultTolerance::Lenient | FaultTolerance::BestEffort => {}
                FaultTolerance::Custom => {
                    let decision = match &*lock(&self.failure_handler) {
                        Some(handler) => handler(stage.name(), &outcome),
                        None => FailureDecision::Abort,
                    };
                    if decision == FailureDecision::Abort {
                        aborted = true;
                        break;
                    }
                }
            }
        }

        let succeeded = match self.fault_tolerance {
            FaultTolerance::BestEffort => !aborted,
            _ => failures.is_empty(),
        };

        PipelineOutcome {
            succeeded,
            failures,
        }
    }

    fn guard_not_executing(&self) -> Result<(), EngineError> {
        if self.executing.load(Ordering::SeqCst) {
            return Err(EngineError::new(
                ErrorCode::Reentrancy,
                "the pipeline cannot be modified while it is executing",
            ));
        }
        Ok(())
    }

    fn render_failure(&self, stage: &str, outcome: &StageOutcome) -> StageFailure {
        let code = outcome.code.unwrap_or(ErrorCode::InvalidInput);
        let message = self.render_message(
            code,
            outcome.message.as_deref().unwrap_or_else(|| code.description()),
        );
        let location = match self.detail_level {
            ErrorDetail::Full => outcome.location,
            ErrorDetail::Minimal => None,
        };
        StageFailure {
            stage: stage.to_string(),
            code,
            message,
            location,
        }
    }

    fn render_message(&self, code: ErrorCode, message: &str) -> String {
        match self.detail_level {
            ErrorDetail::Full => sanitize_message(message),
            ErrorDetail::Minimal => code.minimal_message(),
        }
    }
}

/// Invokes the middleware onion around one stage.
///
/// Dispatch is index-based: each layer receives a continuation that simply
/// re-enters this function one index deeper, so no per-invocation heap
/// callables are materialized.
fn run_chain(
    middlewares: &[Box<dyn Middleware>],
    index: usize,
    stage: &dyn Stage,
    context: &Context,
) -> StageOutcome {
    match middlewares.get(index) {
        Some(middleware) => {
            let mut next = || run_chain(middlewares, index + 1, stage, context);
            middleware.around(stage.name(), context, &mut next)
        }
        None => stage.run(context),
    }
}

/// Clears the re-entrancy flag on every exit path, including panics
struct ExecGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for ExecGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
