use std::time::{Duration, Instant};

use tracing::Span;

use super::TraceId;

/// Create a root span for one front-end command.
pub fn root_span(name: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!("root", name = %name, trace_id = %trace_id)
}

/// Awaits `fut` and warns when it took longer than `max`.
pub async fn warn_if_slow<F, T>(label: &'static str, max: Duration, fut: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let start = Instant::now();
    let out = fut.await;
    let elapsed = start.elapsed();
    if elapsed > max {
        tracing::warn!(
            target: "performance",
            label = label,
            elapsed_ms = elapsed.as_millis() as u64,
            "slow operation detected"
        );
    }
    out
}
