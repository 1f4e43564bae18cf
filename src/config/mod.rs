//! # Configuration
//!
//! - `controller`: runtime settings with defaults (resync, backoff, probes, logging)
//! - `resources`: required inputs for the dependent-resource generators

mod controller;
mod resources;

pub use controller::{ControllerConfig, LogFormat};
pub use resources::{ConfigError, ResourceConfig};
