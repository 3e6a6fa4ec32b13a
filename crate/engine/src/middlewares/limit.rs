use crate::context::Context;
use crate::middleware::Middleware;
use crate::stage::StageOutcome;
use minic_error::ErrorCode;

/// Short-circuits a stage when context memory already exceeds a budget.
///
/// The budget here is independent of the context's own hard limit: it lets
/// an embedder stop the pipeline before a stage runs rather than when the
/// next allocation fails.
pub struct ResourceLimitMiddleware {
    max_memory: usize,
}

impl ResourceLimitMiddleware {
    pub fn new(max_memory: usize) -> Self {
        Self { max_memory }
    }
}

impl Middleware for ResourceLimitMiddleware {
    fn name(&self) -> &str {
        "resource_limit"
    }

    fn around(
        &self,
        stage_name: &str,
        context: &Context,
        next: &mut dyn FnMut() -> StageOutcome,
    ) -> StageOutcome {
        let used = context.memory_usage();
        if used > self.max_memory {
            tracing::warn!(
                stage = stage_name,
                used,
                budget = self.max_memory,
                "stage skipped: memory budget exhausted"
            );
            return StageOutcome::failure(
                ErrorCode::MemoryLimitExceeded,
                format!(
                    "context holds {} bytes before stage '{}', budget is {}",
                    used, stage_name, self.max_memory
                ),
            );
        }
        next()
    }
}
