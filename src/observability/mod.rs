//! # Observability
//!
//! Prometheus metrics collection. Logging goes through `tracing` directly.

pub mod metrics;

// Re-export for convenience
pub use metrics::*;
