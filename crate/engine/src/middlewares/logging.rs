use crate::context::Context;
use crate::middleware::Middleware;
use crate::stage::StageOutcome;

/// Emits a tracing event around every stage
#[derive(Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for LoggingMiddleware {
    fn name(&self) -> &str {
        "logging"
    }

    fn around(
        &self,
        stage_name: &str,
        _context: &Context,
        next: &mut dyn FnMut() -> StageOutcome,
    ) -> StageOutcome {
        tracing::debug!(stage = stage_name, "stage starting");
        let outcome = next();
        if outcome.succeeded {
            tracing::debug!(stage = stage_name, "stage finished");
        } else {
            tracing::warn!(
                stage = stage_name,
                code = outcome.code.map(|c| c.code()),
                message = outcome.message.as_deref(),
                "stage failed"
            );
        }
        outcome
    }
}
