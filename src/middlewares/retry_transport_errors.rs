use crate::common::{
    DEFAULT_BACKOFF_INTERVAL, DEFAULT_MAX_JITTER_INTERVAL, DEFAULT_RETRY_ATTEMPTS,
};
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use retry_policies::{RetryDecision, RetryPolicy};
use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
    time::{Duration, Instant},
};
use task_local_extensions::Extensions;

/// Middleware that retries requests which failed before a response was received.
///
/// Only transport failures are retried: connection errors, timeouts, errors while
/// writing the request and I/O errors raised by inner middlewares. A response is never
/// retried, whatever its status code.
///
/// The timeout set on the request is treated as a deadline for all the attempts
/// together: each attempt gets the time that is left, and no retry is scheduled past it.
pub struct RetryTransportErrorsMiddleware {
    retry_policy: DynRetryPolicy,
}

impl RetryTransportErrorsMiddleware {
    pub fn new(retry_policy: DynRetryPolicy) -> Self {
        Self { retry_policy }
    }
}

#[async_trait]
impl Middleware for RetryTransportErrorsMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let deadline = req.timeout().map(|timeout| Instant::now() + *timeout);
        let mut n_past_retries = 0;

        loop {
            let mut attempt = req.try_clone().ok_or_else(|| {
                reqwest_middleware::Error::Middleware(anyhow::anyhow!(
                    "Cannot retry a request with a streaming body"
                ))
            })?;
            if let Some(deadline) = deadline {
                *attempt.timeout_mut() = Some(deadline.saturating_duration_since(Instant::now()));
            }

            let result = next.clone().run(attempt, extensions).await;

            if !matches!(&result, Err(e) if is_transport_failure(e)) {
                return result;
            }

            let wait = match self.retry_policy.should_retry(n_past_retries) {
                RetryDecision::Retry { execute_after } => {
                    (execute_after - Utc::now()).to_std().unwrap_or_default()
                }
                RetryDecision::DoNotRetry => return result,
            };

            // Out of time: surface the last failure
            if deadline.map_or(false, |deadline| Instant::now() + wait >= deadline) {
                return result;
            }

            if let Err(e) = &result {
                tracing::debug!(
                    "Transport failure on attempt {}, retrying in {:?}: {}",
                    n_past_retries + 1,
                    wait,
                    e
                );
            }
            tokio::time::sleep(wait).await;
            n_past_retries += 1;
        }
    }
}

fn is_transport_failure(error: &reqwest_middleware::Error) -> bool {
    match error {
        reqwest_middleware::Error::Reqwest(e) => e.is_connect() || e.is_timeout() || e.is_request(),
        reqwest_middleware::Error::Middleware(e) => e.downcast_ref::<std::io::Error>().is_some(),
    }
}

/// Retry policy waiting a constant interval plus a random jitter between attempts.
#[derive(Debug, Clone, Copy)]
pub struct ConstantBackoff {
    interval: Duration,
    max_jitter: Duration,
    max_attempts: u32,
}

impl ConstantBackoff {
    /// `max_attempts` counts the first attempt too: `1` disables retries.
    pub fn new(interval: Duration, max_jitter: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_jitter,
            max_attempts,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Longest wait between two attempts.
    pub fn max_wait(&self) -> Duration {
        self.interval + self.max_jitter
    }

    fn jitter(&self) -> Duration {
        let max_jitter_micros = self.max_jitter.as_micros() as u64;
        if max_jitter_micros == 0 {
            return Duration::ZERO;
        }

        Duration::from_micros(rand::thread_rng().gen_range(0..=max_jitter_micros))
    }
}

impl Default for ConstantBackoff {
    /// 2 ms between attempts, up to 5 ms jitter, 3 attempts in total.
    fn default() -> Self {
        Self::new(
            DEFAULT_BACKOFF_INTERVAL,
            DEFAULT_MAX_JITTER_INTERVAL,
            DEFAULT_RETRY_ATTEMPTS,
        )
    }
}

impl RetryPolicy for ConstantBackoff {
    fn should_retry(&self, n_past_retries: u32) -> RetryDecision {
        if n_past_retries + 1 >= self.max_attempts {
            return RetryDecision::DoNotRetry;
        }

        let wait = chrono::Duration::from_std(self.interval + self.jitter())
            .unwrap_or_else(|_| chrono::Duration::zero());
        RetryDecision::Retry {
            execute_after: Utc::now() + wait,
        }
    }
}

/// Wrapper type around a retry policy because `dyn RetryPolicy` does not implement `RetryPolicy`.
#[derive(Clone)]
pub struct DynRetryPolicy(pub Arc<dyn RetryPolicy + Send + Sync + 'static>);

impl RetryPolicy for DynRetryPolicy {
    fn should_retry(&self, n_past_retries: u32) -> RetryDecision {
        self.0.should_retry(n_past_retries)
    }
}

impl Debug for DynRetryPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynRetryPolicy").finish_non_exhaustive()
    }
}
