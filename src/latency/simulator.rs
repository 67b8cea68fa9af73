//! Latency simulation.
//!
//! # Responsibilities
//! - Delay delivery of an already computed response by a fixed duration
//! - Abandon delivery when the caller cancels
//!
//! # Design Decisions
//! - Uses Tokio's timer; the delay is the only suspension point of a request
//! - The delay starts after dispatch, so store mutations are already committed
//! - Cancellation drops the response; it does not roll back the mutation

use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::config::LatencyConfig;

/// The caller cancelled before the response was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("request cancelled before the response was delivered")]
pub struct Cancelled;

/// Applies a fixed artificial delay before a result becomes observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySimulator {
    delay: Duration,
}

impl LatencySimulator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn from_config(config: &LatencyConfig) -> Self {
        Self::new(Duration::from_millis(config.delay_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the delay unconditionally.
    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    /// Deliver `value` after the delay unless `cancel` fires first.
    pub async fn deliver<T>(&self, value: T, cancel: &CancellationToken) -> Result<T, Cancelled> {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        if self.delay.is_zero() {
            return Ok(value);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(delay_ms = self.delay.as_millis() as u64, "Delivery cancelled during simulated latency");
                Err(Cancelled)
            }
            _ = tokio::time::sleep(self.delay) => Ok(value),
        }
    }
}

impl Default for LatencySimulator {
    fn default() -> Self {
        Self::from_config(&LatencyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_delivers_after_delay() {
        let sim = LatencySimulator::new(Duration::from_millis(300));
        let start = Instant::now();

        let value = sim.deliver(42, &CancellationToken::new()).await;

        assert_eq!(value, Ok(42));
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_delay() {
        let sim = LatencySimulator::new(Duration::from_millis(300));
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let start = Instant::now();
        let result = sim.deliver("stale", &token).await;

        assert_eq!(result, Err(Cancelled));
        assert!(start.elapsed() < Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_already_cancelled() {
        let sim = LatencySimulator::none();
        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(sim.deliver((), &token).await, Err(Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait() {
        let sim = LatencySimulator::from_config(&LatencyConfig { delay_ms: 50 });
        let start = Instant::now();
        sim.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(LatencySimulator::default().delay(), Duration::from_millis(300));
    }
}
