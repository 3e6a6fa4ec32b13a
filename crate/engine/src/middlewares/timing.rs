use crate::context::{Context, Value};
use crate::middleware::Middleware;
use crate::stage::StageOutcome;
use std::time::Instant;

/// Measures wall-clock time per stage.
///
/// The elapsed time is logged and published to the context under
/// `timing.<stage>` in microseconds. Publishing is advisory: a context
/// refusing the entry (budget, capacity) does not fail the stage.
#[derive(Default)]
pub struct TimingMiddleware;

impl TimingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for TimingMiddleware {
    fn name(&self) -> &str {
        "timing"
    }

    fn around(
        &self,
        stage_name: &str,
        context: &Context,
        next: &mut dyn FnMut() -> StageOutcome,
    ) -> StageOutcome {
        let started = Instant::now();
        let outcome = next();
        let elapsed_us = started.elapsed().as_micros() as i64;

        tracing::info!(stage = stage_name, elapsed_us, "stage timed");

        let key = format!("timing.{stage_name}");
        if let Err(error) = context.set(&key, Value::Number(elapsed_us)) {
            tracing::debug!(stage = stage_name, %error, "could not record timing");
        }

        outcome
    }
}
