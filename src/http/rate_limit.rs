use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Spaces request starts so that at most `max_per_minute` go out per minute.
#[derive(Debug)]
pub struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    /// `max_per_minute == 0` disables throttling.
    pub fn new(max_per_minute: u32) -> Self {
        let min_interval = if max_per_minute > 0 {
            Duration::from_secs_f64(60.0 / max_per_minute as f64)
        } else {
            Duration::ZERO
        };

        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until the next request may start.
    pub async fn acquire(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        // Lock is held across the sleep so waiters queue up in order
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
