//! Retry policies for flood control (`429 Too Many Requests`) and transient
//! HTTP failures.

use std::num::NonZeroU32;
use std::ops::ControlFlow;
use std::time::Duration;

use crate::errors::InvocationError;

/// Controls how the client reacts when a request fails.
pub trait RetryPolicy: Send + Sync + 'static {
    fn should_retry(&self, ctx: &RetryContext) -> ControlFlow<(), Duration>;
}

/// Context passed to [`RetryPolicy::should_retry`] on each failure.
pub struct RetryContext {
    pub method:       &'static str,
    pub fail_count:   NonZeroU32,
    pub slept_so_far: Duration,
    pub error:        InvocationError,
}

/// Never retry.
pub struct NoRetries;
impl RetryPolicy for NoRetries {
    fn should_retry(&self, _: &RetryContext) -> ControlFlow<(), Duration> {
        ControlFlow::Break(())
    }
}

/// Sleep through `retry_after` once and retry HTTP failures once.
///
/// Decode failures and every other API error are returned immediately.
pub struct AutoSleep {
    /// Longer flood waits are returned to the caller instead.
    pub threshold:               Duration,
    /// Delay before repeating a request that failed at the HTTP level.
    pub http_errors_as_flood_of: Option<Duration>,
}

impl Default for AutoSleep {
    fn default() -> Self {
        Self {
            threshold:               Duration::from_secs(60),
            http_errors_as_flood_of: Some(Duration::from_secs(1)),
        }
    }
}

impl RetryPolicy for AutoSleep {
    fn should_retry(&self, ctx: &RetryContext) -> ControlFlow<(), Duration> {
        if ctx.fail_count.get() != 1 {
            return ControlFlow::Break(());
        }
        if let Some(secs) = ctx.error.retry_after() {
            if secs <= self.threshold.as_secs() {
                tracing::info!("[tbo] {} hit flood control; sleeping {secs}s before retry", ctx.method);
                return ControlFlow::Continue(Duration::from_secs(secs));
            }
        }
        if ctx.error.is_transport() {
            if let Some(d) = self.http_errors_as_flood_of {
                tracing::info!("[tbo] {} failed ({}); sleeping {d:?} before retry", ctx.method, ctx.error);
                return ControlFlow::Continue(d);
            }
        }
        ControlFlow::Break(())
    }
}
