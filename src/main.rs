//! # Wordpress Operator
//!
//! A Kubernetes controller that turns a `Wordpress` custom resource into a
//! running WordPress site backed by MySQL.
//!
//! ## Overview
//!
//! For every `Wordpress` the controller:
//!
//! 1. **Registers a finalizer** - before anything is created
//! 2. **Creates dependents** - credential Secret, two volume claims, the MySQL and
//!    WordPress Deployments and their Services, leaving existing objects alone
//! 3. **Reports progress** - one `<field>Created` condition per dependent
//! 4. **Cleans up volumes** - deletes both volume claims on teardown unless
//!    `retainVolumes` is set
//!
//! Everything else is garbage collected through owner references.

use anyhow::Result;
use wordpress_operator::runtime::{initialize, run_watch_loop};

#[tokio::main]
async fn main() -> Result<()> {
    let init = initialize().await?;
    run_watch_loop(init.client, init.context, init.server_state).await
}
