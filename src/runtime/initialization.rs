//! # Initialization
//!
//! Controller initialization logic including rustls setup, tracing, metrics,
//! server startup, configuration and Kubernetes client setup.

use crate::config::{ControllerConfig, LogFormat, ResourceConfig};
use crate::controller::reconciler::Reconciler;
use crate::controller::server::{start_server, ServerState};
use crate::controller::store::KubeStateStore;
use crate::observability;
use crate::runtime::context::ControllerContext;
use anyhow::{anyhow, bail, Context, Result};
use kube::Client;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Initialization result containing all necessary components for the controller
pub struct InitializationResult {
    /// Kubernetes client
    pub client: Client,
    /// Reconciler plus dispatch-layer state
    pub context: Arc<ControllerContext>,
    /// Server state for health checks
    pub server_state: Arc<ServerState>,
}

impl std::fmt::Debug for InitializationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitializationResult")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Initialize the controller runtime
///
/// This function handles:
/// - rustls crypto provider setup
/// - Tracing subscriber setup
/// - Configuration loading (a bad resource configuration aborts startup)
/// - Metrics registration
/// - HTTP server startup
/// - Kubernetes client creation
/// - Reconciler setup
pub async fn initialize() -> Result<InitializationResult> {
    // Must happen before any rustls client is built
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        bail!("Failed to install rustls crypto provider");
    }

    let controller_config = ControllerConfig::from_env();
    init_tracing(&controller_config)?;

    info!("Starting Wordpress Operator");
    info!(
        "Build info: datetime={}, git_hash={}",
        env!("BUILD_DATETIME"),
        env!("BUILD_GIT_HASH")
    );

    let resources = ResourceConfig::from_env().context("Invalid resource configuration")?;
    info!(
        secret = resources.secret_name.as_str(),
        mysql_image = resources.mysql_image.as_str(),
        wordpress_image = resources.wordpress_image.as_str(),
        pvc_size = resources.pvc_size.as_str(),
        "Loaded resource configuration"
    );

    observability::metrics::register_metrics()?;

    let server_state = Arc::new(ServerState::default());
    let server_state_clone = Arc::clone(&server_state);
    let server_port = controller_config.metrics_port;
    tokio::spawn(async move {
        if let Err(e) = start_server(server_port, server_state_clone).await {
            error!("HTTP server error: {}", e);
        }
    });

    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;

    let store = Arc::new(KubeStateStore::new(client.clone()));
    let reconciler = Reconciler::new(
        store,
        Arc::new(resources),
        controller_config.resync_interval(),
    );
    let context = Arc::new(ControllerContext::new(reconciler, controller_config));

    info!("Controller initialized, starting watch loop...");

    Ok(InitializationResult {
        client,
        context,
        server_state,
    })
}

/// Install the global subscriber; `RUST_LOG` takes precedence over `LOG_LEVEL`
fn init_tracing(config: &ControllerConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log level")?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    }
    .map_err(|e| anyhow!("Failed to initialize tracing subscriber: {e}"))
}
