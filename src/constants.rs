//! # Constants
//!
//! Shared constants used throughout the operator.
//!
//! These values represent reasonable defaults and can be overridden via
//! environment variables where applicable.

/// Default HTTP server port for metrics and health probes
pub const DEFAULT_METRICS_PORT: u16 = 8080;

/// Default delay between successful reconciliations (seconds)
/// Re-asserts dependent resources even when no watched object changed
pub const DEFAULT_RESYNC_INTERVAL_SECS: u64 = 300;

/// Default requeue delay after an optimistic-concurrency conflict (seconds)
pub const DEFAULT_CONFLICT_REQUEUE_SECS: u64 = 1;

/// Default Fibonacci backoff starting value for reconciliation errors (seconds)
pub const DEFAULT_BACKOFF_MIN_SECS: u64 = 5;

/// Default Fibonacci backoff maximum value for reconciliation errors (seconds)
pub const DEFAULT_BACKOFF_MAX_SECS: u64 = 300;

/// Default limit on reconciliations running at the same time
pub const DEFAULT_MAX_CONCURRENT_RECONCILIATIONS: u16 = 10;

/// Field manager / controller name reported to the API server
pub const CONTROLLER_NAME: &str = "wordpress-operator";

/// Environment variables holding the dependent-resource configuration
pub const ENV_SECRET_NAME: &str = "WORDPRESS_SECRET_NAME";
pub const ENV_SECRET_KEY: &str = "WORDPRESS_SECRET_KEY";
pub const ENV_IMAGE_MYSQL: &str = "WORDPRESS_IMAGE_MYSQL";
pub const ENV_IMAGE_WORDPRESS: &str = "WORDPRESS_IMAGE_WORDPRESS";
pub const ENV_PVC_SIZE: &str = "WORDPRESS_PVC_SIZE";
