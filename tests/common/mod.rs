//! Common test utilities for reconciliation tests
//!
//! Provides an in-memory [`StateStore`] that behaves like a small API server:
//! creates never overwrite, finalizer updates are checked against the
//! `resourceVersion`, an object marked for deletion disappears once its last
//! finalizer is removed, and owned dependents are garbage collected with it.
//! Every call is recorded so tests can assert on ordering.

#![allow(dead_code, reason = "Each test binary uses a different subset of helpers")]

use async_trait::async_trait;
use kube::error::ErrorResponse;
use kube::{Resource, ResourceExt};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wordpress_operator::prelude::*;

pub const RESYNC: Duration = Duration::from_secs(300);

/// A single gateway call as seen by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get,
    Create(ResourceKind),
    Update,
    Delete(ResourceKind),
    UpdateStatus,
}

/// `(api kind, namespace, name)`
type ObjectKey = (&'static str, String, String);

#[derive(Default)]
struct State {
    wordpresses: HashMap<(String, String), Wordpress>,
    objects: BTreeMap<ObjectKey, DependentResource>,
    calls: Vec<Call>,
    /// Successful writes only
    writes: Vec<Call>,
    failing_creates: HashMap<ResourceKind, u32>,
    failing_deletes: HashMap<ResourceKind, u32>,
    conflicting_updates: u32,
    failing_status_updates: u32,
    next_resource_version: u64,
}

impl State {
    fn bump_version(&mut self, wordpress: &mut Wordpress) {
        self.next_resource_version += 1;
        wordpress.metadata.resource_version = Some(self.next_resource_version.to_string());
    }

    fn take_failure(counter: &mut HashMap<ResourceKind, u32>, kind: ResourceKind) -> bool {
        match counter.get_mut(&kind) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }

    /// Drop every dependent owned by `uid`, like the garbage collector would
    fn collect_garbage(&mut self, uid: &str) {
        self.objects.retain(|_, object| {
            !object
                .metadata()
                .owner_references
                .iter()
                .flatten()
                .any(|owner| owner.uid == uid)
        });
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

pub fn server_error() -> StoreError {
    StoreError::from(kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message: "etcdserver: request timed out".to_string(),
        reason: "InternalError".to_string(),
        code: 500,
    }))
}

pub fn resource_config() -> ResourceConfig {
    ResourceConfig {
        secret_name: "mysql-pass".to_string(),
        secret_key: "password".to_string(),
        mysql_image: "mysql:5.6".to_string(),
        wordpress_image: "wordpress:4.8-apache".to_string(),
        pvc_size: "20Gi".to_string(),
    }
}

pub fn blog(retain_volumes: bool) -> Wordpress {
    let mut wordpress = Wordpress::new(
        "blog",
        WordpressSpec {
            sql_root_password: "p@ss".to_string(),
            retain_volumes,
        },
    );
    wordpress.metadata.namespace = Some("ns1".to_string());
    wordpress.metadata.uid = Some("5d1e3c3a-8f0e-4f6b-9a51-6f1c2d3e4b5a".to_string());
    wordpress
}

pub fn reconciler(store: &InMemoryStore) -> Reconciler {
    Reconciler::new(Arc::new(store.clone()), Arc::new(resource_config()), RESYNC)
}

impl InMemoryStore {
    pub fn with(wordpress: Wordpress) -> Self {
        let store = Self::default();
        store.insert(wordpress);
        store
    }

    pub fn insert(&self, mut wordpress: Wordpress) {
        let mut state = self.state.lock().unwrap();
        state.bump_version(&mut wordpress);
        let key = (wordpress.namespace().unwrap_or_default(), wordpress.name_any());
        state.wordpresses.insert(key, wordpress);
    }

    pub fn wordpress(&self, namespace: &str, name: &str) -> Option<Wordpress> {
        self.state
            .lock()
            .unwrap()
            .wordpresses
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    /// What `kubectl delete` does to an object carrying finalizers
    pub fn request_deletion(&self, namespace: &str, name: &str) {
        let mut state = self.state.lock().unwrap();
        let key = (namespace.to_string(), name.to_string());
        let mut wordpress = state.wordpresses.remove(&key).expect("object exists");
        wordpress.metadata.deletion_timestamp =
            Some(serde_json::from_value(serde_json::json!("2024-01-01T00:00:00Z")).unwrap());
        state.bump_version(&mut wordpress);
        state.wordpresses.insert(key, wordpress);
    }

    pub fn object(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Option<DependentResource> {
        self.state
            .lock()
            .unwrap()
            .objects
            .get(&(kind.api_kind(), namespace.to_string(), name.to_string()))
            .cloned()
    }

    pub fn object_count(&self) -> usize {
        self.state.lock().unwrap().objects.len()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn clear_calls(&self) {
        let mut state = self.state.lock().unwrap();
        state.calls.clear();
        state.writes.clear();
    }

    pub fn fail_creates(&self, kind: ResourceKind, times: u32) {
        self.state.lock().unwrap().failing_creates.insert(kind, times);
    }

    pub fn fail_deletes(&self, kind: ResourceKind, times: u32) {
        self.state.lock().unwrap().failing_deletes.insert(kind, times);
    }

    pub fn fail_status_updates(&self, times: u32) {
        self.state.lock().unwrap().failing_status_updates = times;
    }

    /// Make the next finalizer update lose an optimistic-concurrency race
    pub fn conflict_next_update(&self) {
        self.state.lock().unwrap().conflicting_updates += 1;
    }
}

#[async_trait]
impl StateStore for InMemoryStore {
    async fn get_wordpress(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Wordpress>, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Get);
        Ok(state
            .wordpresses
            .get(&(namespace.to_string(), name.to_string()))
            .cloned())
    }

    async fn create(&self, resource: &DependentResource) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let kind = resource.kind();
        state.calls.push(Call::Create(kind));

        if State::take_failure(&mut state.failing_creates, kind) {
            return Err(server_error());
        }
        let key = (
            kind.api_kind(),
            resource.namespace().to_string(),
            resource.name().to_string(),
        );
        if state.objects.contains_key(&key) {
            return Err(StoreError::AlreadyExists);
        }
        state.objects.insert(key, resource.clone());
        state.writes.push(Call::Create(kind));
        Ok(())
    }

    async fn update(&self, wordpress: &Wordpress) -> Result<Wordpress, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Update);

        if state.conflicting_updates > 0 {
            state.conflicting_updates -= 1;
            return Err(StoreError::Conflict);
        }
        let key = (wordpress.namespace().unwrap_or_default(), wordpress.name_any());
        let Some(stored) = state.wordpresses.get(&key) else {
            return Err(StoreError::NotFound);
        };
        if stored.meta().resource_version != wordpress.meta().resource_version {
            return Err(StoreError::Conflict);
        }

        let mut updated = wordpress.clone();
        // Status is only written through the status subresource
        updated.status = stored.status.clone();
        state.bump_version(&mut updated);
        state.writes.push(Call::Update);

        if updated.meta().deletion_timestamp.is_some() && updated.finalizers().is_empty() {
            state.wordpresses.remove(&key);
            let uid = updated.uid().unwrap_or_default();
            state.collect_garbage(&uid);
        } else {
            state.wordpresses.insert(key, updated.clone());
        }
        Ok(updated)
    }

    async fn delete(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Delete(kind));

        if State::take_failure(&mut state.failing_deletes, kind) {
            return Err(server_error());
        }
        let key = (kind.api_kind(), namespace.to_string(), name.to_string());
        if state.objects.remove(&key).is_none() {
            return Err(StoreError::NotFound);
        }
        state.writes.push(Call::Delete(kind));
        Ok(())
    }

    async fn update_status(&self, wordpress: &Wordpress) -> Result<Wordpress, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::UpdateStatus);

        if state.failing_status_updates > 0 {
            state.failing_status_updates -= 1;
            return Err(server_error());
        }

        let key = (wordpress.namespace().unwrap_or_default(), wordpress.name_any());
        let Some(mut stored) = state.wordpresses.get(&key).cloned() else {
            return Err(StoreError::NotFound);
        };
        stored.status = wordpress.status.clone();
        state.bump_version(&mut stored);
        state.wordpresses.insert(key, stored.clone());
        state.writes.push(Call::UpdateStatus);
        Ok(stored)
    }
}
