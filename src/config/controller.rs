//! # Controller Configuration
//!
//! Controller-level settings loaded from environment variables.

use crate::constants::{
    DEFAULT_BACKOFF_MAX_SECS, DEFAULT_BACKOFF_MIN_SECS, DEFAULT_CONFLICT_REQUEUE_SECS,
    DEFAULT_MAX_CONCURRENT_RECONCILIATIONS, DEFAULT_METRICS_PORT, DEFAULT_RESYNC_INTERVAL_SECS,
};
use std::time::Duration;
use tracing::warn;

/// Output format for the global tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("text") {
            LogFormat::Text
        } else {
            LogFormat::Json
        }
    }
}

/// Controller-level configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
/// Environment variables are populated from a ConfigMap using `envFrom` in the deployment.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Delay before re-asserting a fully reconciled Wordpress (seconds)
    pub resync_interval_secs: u64,
    /// Requeue delay after a write conflict on the Wordpress object (seconds)
    pub conflict_requeue_secs: u64,
    /// First delay of the per-object Fibonacci error backoff (seconds)
    pub backoff_min_secs: u64,
    /// Cap of the per-object Fibonacci error backoff (seconds)
    pub backoff_max_secs: u64,
    /// Port for `/metrics`, `/healthz` and `/readyz`
    pub metrics_port: u16,
    /// Namespace to watch; `None` watches every namespace
    pub watch_namespace: Option<String>,
    /// Maximum concurrent reconciliations across different Wordpress objects
    pub max_concurrent_reconciliations: u16,
    /// Global log level (error, warn, info, debug, trace); `RUST_LOG` wins when set
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: LogFormat,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            resync_interval_secs: DEFAULT_RESYNC_INTERVAL_SECS,
            conflict_requeue_secs: DEFAULT_CONFLICT_REQUEUE_SECS,
            backoff_min_secs: DEFAULT_BACKOFF_MIN_SECS,
            backoff_max_secs: DEFAULT_BACKOFF_MAX_SECS,
            metrics_port: DEFAULT_METRICS_PORT,
            watch_namespace: None,
            max_concurrent_reconciliations: DEFAULT_MAX_CONCURRENT_RECONCILIATIONS,
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            resync_interval_secs: parse_or(
                &lookup,
                "RESYNC_INTERVAL_SECS",
                defaults.resync_interval_secs,
            ),
            conflict_requeue_secs: parse_or(
                &lookup,
                "CONFLICT_REQUEUE_SECS",
                defaults.conflict_requeue_secs,
            ),
            backoff_min_secs: parse_or(&lookup, "BACKOFF_MIN_SECS", defaults.backoff_min_secs),
            backoff_max_secs: parse_or(&lookup, "BACKOFF_MAX_SECS", defaults.backoff_max_secs),
            metrics_port: parse_or(&lookup, "METRICS_PORT", defaults.metrics_port),
            watch_namespace: lookup("WATCH_NAMESPACE").filter(|ns| !ns.trim().is_empty()),
            max_concurrent_reconciliations: parse_or(
                &lookup,
                "MAX_CONCURRENT_RECONCILIATIONS",
                defaults.max_concurrent_reconciliations,
            ),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT").map_or(defaults.log_format, |v| LogFormat::parse(&v)),
        }
    }

    /// Get resync duration
    pub fn resync_interval(&self) -> Duration {
        Duration::from_secs(self.resync_interval_secs)
    }

    /// Get conflict requeue duration
    pub fn conflict_requeue(&self) -> Duration {
        Duration::from_secs(self.conflict_requeue_secs)
    }
}

/// Parse `key` from the lookup or return the default, warning when the value is malformed
fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(
                variable = key,
                value = raw.as_str(),
                "Invalid value, using default {}",
                default
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ControllerConfig::from_lookup(lookup(&[]));
        assert_eq!(config.resync_interval(), Duration::from_secs(300));
        assert_eq!(config.conflict_requeue(), Duration::from_secs(1));
        assert_eq!(config.metrics_port, 8080);
        assert_eq!(config.watch_namespace, None);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = ControllerConfig::from_lookup(lookup(&[
            ("RESYNC_INTERVAL_SECS", "30"),
            ("METRICS_PORT", "9090"),
            ("WATCH_NAMESPACE", "blogs"),
            ("LOG_FORMAT", "TEXT"),
            ("MAX_CONCURRENT_RECONCILIATIONS", "4"),
        ]));
        assert_eq!(config.resync_interval(), Duration::from_secs(30));
        assert_eq!(config.metrics_port, 9090);
        assert_eq!(config.watch_namespace.as_deref(), Some("blogs"));
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.max_concurrent_reconciliations, 4);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = ControllerConfig::from_lookup(lookup(&[
            ("RESYNC_INTERVAL_SECS", "five minutes"),
            ("WATCH_NAMESPACE", "  "),
        ]));
        assert_eq!(config.resync_interval_secs, 300);
        assert_eq!(config.watch_namespace, None);
    }

    #[test]
    fn test_each_malformed_variable_falls_back_independently() {
        let config = ControllerConfig::from_lookup(lookup(&[
            ("BACKOFF_MIN_SECS", "-3"),
            ("BACKOFF_MAX_SECS", "60"),
            ("METRICS_PORT", "70000"),
        ]));
        assert_eq!(config.backoff_min_secs, 5);
        assert_eq!(config.backoff_max_secs, 60);
        assert_eq!(config.metrics_port, 8080);
    }
}
