//! Wordpress Operator Library
//!
//! This library provides the core functionality for the Wordpress operator:
//! a Kubernetes controller that stands up a MySQL-backed WordPress install
//! for every `Wordpress` custom resource.
//! Tests are included in the module files and under `tests/`.
//!
//! ## Quick Start
//!
//! ```rust
//! use wordpress_operator::prelude::*;
//! ```
//!
//! This brings commonly used types and traits into scope. For more specific imports,
//! use the individual modules.

// Re-export modules so they can be tested
pub mod config;
pub mod constants;
pub mod controller;
pub mod crd;
pub mod observability;
pub mod prelude;
pub mod runtime;
