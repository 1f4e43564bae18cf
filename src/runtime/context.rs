//! # Controller Context
//!
//! State shared by the watch loop callbacks: the stateless reconciler plus
//! the per-object error backoff, which belongs to the dispatch layer.

use crate::config::ControllerConfig;
use crate::controller::backoff::FibonacciBackoff;
use crate::controller::reconciler::Reconciler;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::warn;

/// Backoff state for a specific Wordpress
#[derive(Debug, Clone)]
pub struct BackoffState {
    pub backoff: FibonacciBackoff,
    pub error_count: u32,
}

impl BackoffState {
    fn new(config: &ControllerConfig) -> Self {
        Self {
            backoff: FibonacciBackoff::new(config.backoff_min_secs, config.backoff_max_secs),
            error_count: 0,
        }
    }
}

#[derive(Debug)]
pub struct ControllerContext {
    pub reconciler: Reconciler,
    pub config: ControllerConfig,
    /// Keyed by `namespace/name`
    backoff_states: Mutex<HashMap<String, BackoffState>>,
}

impl ControllerContext {
    #[must_use]
    pub fn new(reconciler: Reconciler, config: ControllerConfig) -> Self {
        Self {
            reconciler,
            config,
            backoff_states: Mutex::new(HashMap::new()),
        }
    }

    /// Advance the backoff for `key`, returning the delay and the error count
    pub fn next_error_backoff(&self, key: &str) -> (Duration, u32) {
        match self.backoff_states.lock() {
            Ok(mut states) => {
                let state = states
                    .entry(key.to_string())
                    .or_insert_with(|| BackoffState::new(&self.config));
                state.error_count += 1;
                (state.backoff.next_backoff(), state.error_count)
            }
            Err(e) => {
                warn!("Failed to lock backoff_states: {}, using minimum backoff", e);
                (Duration::from_secs(self.config.backoff_min_secs), 0)
            }
        }
    }

    /// Forget the error history of `key` after a successful reconciliation
    /// or once the object is gone
    pub fn reset_backoff(&self, key: &str) {
        if let Ok(mut states) = self.backoff_states.lock() {
            states.remove(key);
        }
    }

    #[cfg(test)]
    pub(crate) fn tracks(&self, key: &str) -> bool {
        self.backoff_states
            .lock()
            .is_ok_and(|states| states.contains_key(key))
    }
}
