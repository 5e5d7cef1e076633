//! Bounded persistence calls
//!
//! Every order-lifecycle query runs under a per-attempt timeout; transient
//! failures (I/O, pool exhaustion, attempt timeout) are retried a fixed number
//! of times. Anything else propagates on the first failure.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Persistence failure as seen by the lifecycle core
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("persistence call timed out")]
    Timeout,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Timeout => true,
            StoreError::Database(e) => matches!(
                e,
                sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::WorkerCrashed
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Upper bound for one attempt
    pub timeout: Duration,
    /// Extra attempts after a transient failure
    pub retries: u32,
}

impl RetryPolicy {
    pub fn new(timeout: Duration, retries: u32) -> Self {
        Self { timeout, retries }
    }

    /// Same timeout, no retries (non-idempotent inserts)
    pub fn single_attempt(self) -> Self {
        Self { retries: 0, ..self }
    }

    /// Run `op`, retrying transient failures up to `self.retries` times
    pub async fn run<T, F, Fut>(&self, op_name: &'static str, mut op: F) -> Result<T, StoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        let mut attempt = 0;
        loop {
            let result = match tokio::time::timeout(self.timeout, op()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) => StoreError::Database(e),
                Err(_) => StoreError::Timeout,
            };

            if !result.is_transient() || attempt >= self.retries {
                return Err(result);
            }

            attempt += 1;
            tracing::warn!(op = op_name, attempt, error = %result, "Transient persistence failure, retrying");
        }
    }
}
