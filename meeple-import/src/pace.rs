//! Minimum-interval pacing between network calls.
//!
//! The batch driver must not hammer the commerce API: a configurable delay
//! is enforced between consecutive calls, reads and writes alike. The pacer
//! is injected into the driver rather than inlined so the interval is
//! visible, testable configuration.

use tokio::time::{Duration, Instant, sleep};

/// Enforces a minimum interval between consecutive `wait` calls.
#[derive(Debug)]
pub struct Pacer {
    min_interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// Sleep until at least the configured interval has passed since the
    /// previous call. The first call returns immediately.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn enforces_interval_between_calls() {
        let mut pacer = Pacer::new(Duration::from_millis(300));
        let start = Instant::now();
        pacer.wait().await;
        pacer.wait().await;
        pacer.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn first_call_is_immediate() {
        let mut pacer = Pacer::new(Duration::from_secs(10));
        let start = Instant::now();
        pacer.wait().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
