use std::future::Future;
use tokio::time::Duration;

use crate::config::Config;
use crate::error::{ClientError, ClientErrorKind};

/// Backoff policy for transient transport failures.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt. Zero sends each request once.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
    pub retry_on: Vec<ClientErrorKind>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
            backoff_factor: 2.0,
            retry_on: vec![
                ClientErrorKind::Network,
                ClientErrorKind::Timeout,
                ClientErrorKind::RateLimited,
                ClientErrorKind::Upstream,
            ],
        }
    }
}

impl RetryConfig {
    pub fn from_config(config: &Config) -> Self {
        Self::default().with_max_retries(config.max_retries)
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Wait before the `retry`-th retry (1-based), capped at `max_delay`.
    pub fn delay_before(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry.saturating_sub(1)).unwrap_or(i32::MAX);
        let secs = self.initial_delay.as_secs_f64() * self.backoff_factor.powi(exponent);
        Duration::try_from_secs_f64(secs)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

#[derive(Debug, Clone)]
pub struct RetryHandler {
    config: RetryConfig,
}

impl RetryHandler {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Runs `operation` until it succeeds, fails with a non-transient error,
    /// or the retry budget is spent. `target` names the request in logs.
    pub async fn retry<F, Fut, T>(&self, target: &str, operation: F) -> Result<T, ClientError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut retries = 0;

        loop {
            let error = match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => error,
            };

            if !self.should_retry(&error) {
                return Err(error);
            }
            if retries >= self.config.max_retries {
                if retries > 0 {
                    log::warn!(
                        "{} still failing after {} attempts ({:?}): {}",
                        target,
                        retries + 1,
                        error.error_type(),
                        error
                    );
                }
                return Err(error);
            }

            retries += 1;
            let delay = self.config.delay_before(retries);
            log::warn!(
                "{} failed ({:?}): {}. Retry {}/{} in {:?}",
                target,
                error.error_type(),
                error,
                retries,
                self.config.max_retries,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn should_retry(&self, error: &ClientError) -> bool {
        self.config.retry_on.contains(&error.error_type())
    }
}
