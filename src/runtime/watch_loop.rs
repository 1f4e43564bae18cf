//! # Watch Loop
//!
//! Controller watch loop that monitors Wordpress resources and their owned
//! Secrets, Deployments and Services, and triggers reconciliation when
//! changes are detected.

use crate::controller::reconciler::{ReconcileAction, ReconcilerError};
use crate::controller::server::ServerState;
use crate::crd::Wordpress;
use crate::observability;
use crate::runtime::context::ControllerContext;
use crate::runtime::error_policy::{handle_reconciliation_error, handle_stream_error, object_key};
use futures::StreamExt;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Secret, Service};
use k8s_openapi::NamespaceResourceScope;
use kube::api::Api;
use kube::{Client, Resource, ResourceExt};
use kube_runtime::controller::{self, Action};
use kube_runtime::{watcher, Controller};
use std::future::Future;
use std::io;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Run the controller until SIGINT/SIGTERM
///
/// Each Wordpress is reconciled by at most one task at a time; different
/// objects run concurrently up to `MAX_CONCURRENT_RECONCILIATIONS`.
pub async fn run_watch_loop(
    client: Client,
    ctx: Arc<ControllerContext>,
    server_state: Arc<ServerState>,
) -> Result<(), anyhow::Error> {
    let namespace = ctx.config.watch_namespace.clone();
    match namespace.as_deref() {
        Some(ns) => info!("Watching Wordpress resources in namespace {}", ns),
        None => info!("Watching Wordpress resources in all namespaces"),
    }

    let wordpresses: Api<Wordpress> = scoped_api(&client, namespace.as_deref());
    let controller_config =
        controller::Config::default().concurrency(ctx.config.max_concurrent_reconciliations);

    server_state.is_ready.store(true, Ordering::Relaxed);

    // Mark not ready as soon as shutdown starts so traffic drains first
    tokio::spawn(mark_not_ready_on(shutdown_signal(), Arc::clone(&server_state)));

    info!("Starting controller watch loop...");
    let stream_ctx = Arc::clone(&ctx);

    Controller::new(wordpresses, watcher::Config::default().any_semantic())
        .owns(
            scoped_api::<Secret>(&client, namespace.as_deref()),
            watcher::Config::default(),
        )
        .owns(
            scoped_api::<Deployment>(&client, namespace.as_deref()),
            watcher::Config::default(),
        )
        .owns(
            scoped_api::<Service>(&client, namespace.as_deref()),
            watcher::Config::default(),
        )
        .with_config(controller_config)
        .shutdown_on_signal()
        .run(reconcile, handle_reconciliation_error, ctx)
        .for_each(|result| {
            match result {
                Ok((object, action)) => {
                    debug!(resource = %object, action = ?action, "watch.event.reconciled");
                }
                Err(e) => handle_stream_error(&e, &stream_ctx),
            }
            futures::future::ready(())
        })
        .await;

    server_state.is_ready.store(false, Ordering::Relaxed);
    info!("Controller stopped gracefully");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM, whichever comes first
async fn shutdown_signal() -> io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

/// Drop readiness once `signal` fires.
///
/// A listener that could not be registered leaves readiness untouched; the
/// probe then only goes down when the watch loop returns.
async fn mark_not_ready_on(
    signal: impl Future<Output = io::Result<()>>,
    server_state: Arc<ServerState>,
) {
    match signal.await {
        Ok(()) => {
            info!("Received shutdown signal, waiting for in-flight reconciliations to complete...");
            server_state.is_ready.store(false, Ordering::Relaxed);
        }
        Err(e) => {
            warn!(error = %e, "Failed to listen for shutdown signals");
        }
    }
}

/// Reconcile one Wordpress and record metrics around it
async fn reconcile(
    obj: Arc<Wordpress>,
    ctx: Arc<ControllerContext>,
) -> Result<Action, ReconcilerError> {
    let start = Instant::now();
    let namespace = obj.namespace().unwrap_or_default();
    let name = obj.name_any();

    observability::metrics::increment_reconciliations();
    let result = ctx.reconciler.reconcile(&namespace, &name).await;
    observability::metrics::observe_reconciliation_duration(start.elapsed().as_secs_f64());

    let action = result?;
    ctx.reset_backoff(&object_key(&obj));
    debug!(
        resource.namespace = namespace.as_str(),
        resource.name = name.as_str(),
        action = action.as_str(),
        "reconciled"
    );
    if action != ReconcileAction::Done {
        observability::metrics::increment_requeues(action.as_str());
    }
    Ok(action.into())
}

fn scoped_api<K>(client: &Client, namespace: Option<&str>) -> Api<K>
where
    K: Resource<Scope = NamespaceResourceScope>,
    <K as Resource>::DynamicType: Default,
{
    match namespace {
        Some(ns) => Api::namespaced(client.clone(), ns),
        None => Api::all(client.clone()),
    }
}
