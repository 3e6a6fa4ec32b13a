use crate::context::Context;
use crate::middleware::Middleware;
use crate::stage::StageOutcome;
use minic_error::ErrorCode;

/// Fails a named stage without running it.
///
/// Used to exercise fault-tolerance policies and failure reporting; also
/// a minimal example of a short-circuiting middleware.
pub struct FaultInjectionMiddleware {
    target_stage: String,
    code: ErrorCode,
}

impl FaultInjectionMiddleware {
    pub fn new(target_stage: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            target_stage: target_stage.into(),
            code,
        }
    }
}

impl Middleware for FaultInjectionMiddleware {
    fn name(&self) -> &str {
        "fault_injection"
    }

    fn around(
        &self,
        stage_name: &str,
        _context: &Context,
        next: &mut dyn FnMut() -> StageOutcome,
    ) -> StageOutcome {
        if stage_name == self.target_stage {
            return StageOutcome::failure(
                self.code,
                format!("injected fault in stage '{stage_name}'"),
            );
        }
        next()
    }
}
