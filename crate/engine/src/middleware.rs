use crate::context::Context;
use crate::stage::StageOutcome;

/// A named interceptor wrapping every stage of a pipeline.
///
/// The engine composes middlewares as an onion: for middlewares added in
/// order `M1, M2, M3`, a stage `S` runs as `M1(M2(M3(S)))`, so `M1`
/// observes first and post-processes last. An implementation may:
///
/// - observe the stage name and context, then call the continuation,
/// - skip the continuation entirely, short-circuiting the stage to any
///   outcome it chooses,
/// - inspect or replace the outcome after the continuation returns.
///
/// The continuation must be invoked at most once.
pub trait Middleware: Send + Sync {
    /// Stable name of the middleware
    fn name(&self) -> &str;

    /// Wraps the execution of one stage
    fn around(
        &self,
        stage_name: &str,
        context: &Context,
        next: &mut dyn FnMut() -> StageOutcome,
    ) -> StageOutcome;
}
