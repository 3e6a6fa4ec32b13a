use crate::context::Context;
use crate::middleware::Middleware;
use crate::stage::StageOutcome;

/// Records how much tracked context memory each stage adds or frees
#[derive(Default)]
pub struct MemoryAccountingMiddleware;

impl MemoryAccountingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for MemoryAccountingMiddleware {
    fn name(&self) -> &str {
        "memory"
    }

    fn around(
        &self,
        stage_name: &str,
        context: &Context,
        next: &mut dyn FnMut() -> StageOutcome,
    ) -> StageOutcome {
        let before = context.memory_usage();
        let outcome = next();
        let after = context.memory_usage();

        tracing::debug!(
            stage = stage_name,
            before,
            after,
            delta = after as i64 - before as i64,
            "context memory"
        );

        outcome
    }
}
