pub mod context;
pub mod error;
pub mod keys;
pub mod middleware;
pub mod middlewares;
pub mod pipeline;
pub mod stage;

pub use context::{Context, ContextLimits, Value};
pub use error::EngineError;
pub use middleware::Middleware;
pub use pipeline::{
    ErrorDetail, FailureDecision, FailureHandler, FaultTolerance, MAX_MIDDLEWARES, MAX_STAGES,
    Pipeline, PipelineOutcome, StageFailure,
};
pub use stage::{FnStage, Stage, StageOutcome};
