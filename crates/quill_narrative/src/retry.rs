//! Bounded retry around a stage's model call.

use quill_core::{FailureCause, RetrySettings, StageFailure};
use std::future::Future;
use std::time::Duration;
use tokio_retry2::{
    Retry, RetryError,
    strategy::{FixedInterval, jitter},
};
use tracing::warn;

/// How many times a stage may call the model, and which failures end it early.
///
/// # Examples
///
/// ```
/// use quill_core::{FailureCause, RetrySettings};
/// use quill_narrative::RetryPolicy;
///
/// let policy = RetryPolicy::from_settings(&RetrySettings::default());
/// assert_eq!(policy.max_attempts(), 2);
/// assert!(policy.should_retry(FailureCause::Timeout));
/// assert!(!policy.should_retry(FailureCause::ModelNotFound));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
    non_retryable: Vec<FailureCause>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_settings(&RetrySettings::default())
    }
}

impl RetryPolicy {
    /// Policy from configuration. A missing model never retries.
    pub fn from_settings(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: (*settings.max_attempts()).max(1),
            backoff: Duration::from_millis(*settings.backoff_ms()),
            non_retryable: vec![FailureCause::ModelNotFound, FailureCause::FallbackExhausted],
        }
    }

    /// Also stop immediately on `cause`.
    pub fn with_non_retryable(mut self, cause: FailureCause) -> Self {
        if !self.non_retryable.contains(&cause) {
            self.non_retryable.push(cause);
        }
        self
    }

    /// Total calls allowed, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Whether another attempt is worth making after `cause`.
    pub fn should_retry(&self, cause: FailureCause) -> bool {
        !self.non_retryable.contains(&cause)
    }

    /// Run `operation` until it succeeds, fails permanently or runs out of attempts.
    ///
    /// The last failure is returned when every attempt fails.
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<T, StageFailure>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, StageFailure>>,
    {
        let retries = self.max_attempts.saturating_sub(1) as usize;
        let strategy = FixedInterval::new(self.backoff).map(jitter).take(retries);

        Retry::spawn(strategy, move || {
            let attempt = operation();
            async move {
                match attempt.await {
                    Ok(value) => Ok(value),
                    Err(failure) if self.should_retry(*failure.cause()) => {
                        warn!(cause = %failure.cause(), detail = %failure.detail(), "Stage attempt failed, may retry");
                        Err(RetryError::Transient {
                            err: failure,
                            retry_after: None,
                        })
                    }
                    Err(failure) => {
                        warn!(cause = %failure.cause(), "Stage attempt failed permanently");
                        Err(RetryError::Permanent(failure))
                    }
                }
            }
        })
        .await
    }
}
