//! Global cooldown gate for rate-limited remote APIs.
//!
//! Calls routed through one gate are serialized, and each call starts at
//! least `cooldown` after the previous one finished.

use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Serializes calls and spaces them by a fixed cooldown.
#[derive(Debug)]
pub struct CooldownGate {
    cooldown: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl CooldownGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_call: Mutex::new(None),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Waits out the cooldown, then runs `call` while holding the gate.
    pub async fn run<F, Fut, T>(&self, call: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let mut last_call = self.last_call.lock().await;
        if let Some(finished) = *last_call {
            let elapsed = finished.elapsed();
            if elapsed < self.cooldown {
                let wait = self.cooldown - elapsed;
                tracing::debug!(wait_ms = wait.as_millis() as u64, "Waiting for API cooldown");
                sleep(wait).await;
            }
        }
        let output = call().await;
        *last_call = Some(Instant::now());
        output
    }
}
