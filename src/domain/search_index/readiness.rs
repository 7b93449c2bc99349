use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tokio::time::Instant;

use crate::domain::DomainError;

/// Bounded exponential-backoff polling used to wait for index changes to propagate
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReadinessPolicy {
    #[serde(with = "millis")]
    pub initial_delay: Duration,
    #[serde(with = "millis")]
    pub max_delay: Duration,
    pub multiplier: f64,
    #[serde(with = "millis")]
    pub timeout: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
            multiplier: 2.0,
            timeout: Duration::from_secs(60),
        }
    }
}

impl ReadinessPolicy {
    /// Delay before poll number `attempt` (zero-based), capped at `max_delay`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.max(1.0).powi(attempt as i32);
        let delay = self.initial_delay.as_secs_f64() * factor;

        Duration::from_secs_f64(delay.min(self.max_delay.as_secs_f64()))
    }

    /// Poll `probe` until it reports `true`.
    ///
    /// Returns the number of polls made. Probe errors abort immediately;
    /// running past `timeout` yields [`DomainError::Timeout`].
    pub async fn wait_until<F, Fut>(&self, what: &str, mut probe: F) -> Result<u32, DomainError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool, DomainError>>,
    {
        let deadline = Instant::now() + self.timeout;
        let mut attempt = 0;

        loop {
            attempt += 1;

            if probe().await? {
                tracing::debug!(condition = what, attempts = attempt, "Condition reached");
                return Ok(attempt);
            }

            let delay = self.delay_for(attempt - 1);
            if Instant::now() + delay > deadline {
                return Err(DomainError::timeout(format!(
                    "{} not reached after {} polls within {:?}",
                    what, attempt, self.timeout
                )));
            }

            tracing::debug!(
                condition = what,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "Condition not reached yet, backing off"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(timeout_ms: u64) -> ReadinessPolicy {
        ReadinessPolicy {
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
            multiplier: 2.0,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    #[test]
    fn test_delay_grows_and_caps() {
        let policy = ReadinessPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(500));
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(10), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_wait_until_succeeds_after_retries() {
        let calls = AtomicU32::new(0);
        let calls = &calls;

        let attempts = fast_policy(1_000)
            .wait_until("ready", || async move {
                Ok::<_, DomainError>(calls.fetch_add(1, Ordering::SeqCst) >= 2)
            })
            .await
            .unwrap();

        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn test_wait_until_times_out() {
        let err = fast_policy(10)
            .wait_until("never", || async { Ok::<_, DomainError>(false) })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Timeout { .. }));
        assert!(err.to_string().contains("never"));
    }

    #[tokio::test]
    async fn test_wait_until_propagates_probe_error() {
        let err = fast_policy(1_000)
            .wait_until("broken", || async {
                Err::<bool, _>(DomainError::provider("http", "503"))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Provider { .. }));
    }

    #[test]
    fn test_deserialize_from_millis() {
        let policy: ReadinessPolicy = serde_json::from_value(serde_json::json!({
            "initial_delay": 250,
            "max_delay": 2000,
            "multiplier": 1.5,
            "timeout": 30000
        }))
        .unwrap();

        assert_eq!(policy.initial_delay, Duration::from_millis(250));
        assert_eq!(policy.timeout, Duration::from_secs(30));
    }
}
