//! Wait - Generic bounded poll-until-condition primitive
//!
//! Remote resources transition through states asynchronously (pending,
//! available, deleting, deleted). Handlers block on those transitions with
//! a bounded retry loop: probe, sleep, probe again, until the predicate
//! reports ready or the attempt budget is exhausted. The loop is generic
//! over the probe so every resource type shares one implementation.

use std::future::Future;
use std::time::Duration;

use crate::provider::{ProviderError, ProviderResult};

/// Outcome of a single probe
#[derive(Debug, Clone, PartialEq)]
pub enum Poll<T> {
    /// Target condition holds; carry the evidence out of the loop
    Ready(T),
    /// Condition not reached yet, probe again after the delay
    Pending,
}

/// Bounds for a wait loop
#[derive(Debug, Clone)]
pub struct WaitConfig {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 120,
            delay: Duration::from_secs(5),
        }
    }
}

impl WaitConfig {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

/// Wait loop failure
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    #[error("condition not reached after {attempts} attempts")]
    TimedOut { attempts: u32 },

    #[error(transparent)]
    Probe(#[from] ProviderError),
}

/// Repeatedly run `poll` until it reports `Poll::Ready`, sleeping between
/// attempts. A probe error aborts immediately; exhausting the attempt
/// budget yields `WaitError::TimedOut`. There is no cancellation surface.
pub async fn wait_until<F, Fut, T>(config: &WaitConfig, mut poll: F) -> Result<T, WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ProviderResult<Poll<T>>>,
{
    for attempt in 1..=config.max_attempts {
        match poll().await? {
            Poll::Ready(value) => return Ok(value),
            Poll::Pending => {
                if attempt < config.max_attempts {
                    tokio::time::sleep(config.delay).await;
                }
            }
        }
    }

    Err(WaitError::TimedOut {
        attempts: config.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config(max_attempts: u32) -> WaitConfig {
        WaitConfig::new(max_attempts, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn ready_on_first_probe() {
        let result: Result<&str, _> =
            wait_until(&fast_config(3), || async { Ok(Poll::Ready("available")) }).await;
        assert_eq!(result.unwrap(), "available");
    }

    #[tokio::test]
    async fn pending_then_ready() {
        let probes = AtomicU32::new(0);
        let result = wait_until(&fast_config(5), || {
            let n = probes.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Ok(Poll::Pending)
                } else {
                    Ok(Poll::Ready(n))
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 2);
        assert_eq!(probes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausted_attempts_time_out() {
        let result: Result<(), _> =
            wait_until(&fast_config(3), || async { Ok(Poll::Pending) }).await;
        assert!(matches!(result, Err(WaitError::TimedOut { attempts: 3 })));
    }

    #[tokio::test]
    async fn probe_error_aborts() {
        let probes = AtomicU32::new(0);
        let result: Result<(), _> = wait_until(&fast_config(5), || {
            probes.fetch_add(1, Ordering::SeqCst);
            async { Err(ProviderError::new("describe failed")) }
        })
        .await;
        assert!(matches!(result, Err(WaitError::Probe(_))));
        assert_eq!(probes.load(Ordering::SeqCst), 1);
    }
}
