//! Request pacing for the rate-limited text-generation service
//!
//! Sections are issued strictly sequentially with a fixed delay after each
//! successful call and a shorter backoff after a failure. The clock is
//! injected through the `Sleeper` trait so the policy is testable without
//! real delays.

use std::future::Future;
use std::time::Duration;

use crate::config::AnalysisConfig;

/// Injectable sleep source
pub trait Sleeper {
    /// Suspend for the given duration
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Production sleeper backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Fixed-interval pacing policy for the section requests
#[derive(Debug, Clone)]
pub struct Pacer<S> {
    section_delay: Duration,
    failure_backoff: Duration,
    sleeper: S,
}

impl<S: Sleeper> Pacer<S> {
    /// Build a pacer from the analysis configuration
    pub fn new(config: &AnalysisConfig, sleeper: S) -> Self {
        Self {
            section_delay: config.section_delay,
            failure_backoff: config.failure_backoff,
            sleeper,
        }
    }

    /// Delay imposed after a successful section call
    pub async fn after_success(&self) {
        self.sleeper.sleep(self.section_delay).await;
    }

    /// Shorter backoff imposed after a failed section call
    pub async fn after_failure(&self) {
        self.sleeper.sleep(self.failure_backoff).await;
    }
}
