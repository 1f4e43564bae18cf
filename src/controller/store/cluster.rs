//! [`StateStore`] backed by the Kubernetes API.

use super::{StateStore, StoreError};
use crate::constants::CONTROLLER_NAME;
use crate::controller::resources::{DependentResource, ResourceKind};
use crate::crd::Wordpress;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, Secret, Service};
use k8s_openapi::NamespaceResourceScope;
use kube::api::{Api, DeleteParams, Patch, PatchParams, PostParams};
use kube::{Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, instrument};

/// Production gateway wrapping a `kube::Client`
#[derive(Clone)]
pub struct KubeStateStore {
    client: Client,
}

impl Debug for KubeStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeStateStore").finish_non_exhaustive()
    }
}

impl KubeStateStore {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn post_params() -> PostParams {
        PostParams {
            field_manager: Some(CONTROLLER_NAME.to_string()),
            ..Default::default()
        }
    }

    async fn create_namespaced<K>(&self, namespace: &str, object: &K) -> Result<(), StoreError>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Serialize + Debug,
        <K as Resource>::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        api.create(&Self::post_params(), object).await?;
        Ok(())
    }

    async fn delete_namespaced<K>(&self, namespace: &str, name: &str) -> Result<(), StoreError>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
        <K as Resource>::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        api.delete(name, &DeleteParams::default()).await?;
        Ok(())
    }
}

#[async_trait]
impl StateStore for KubeStateStore {
    async fn get_wordpress(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Wordpress>, StoreError> {
        let api: Api<Wordpress> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.get_opt(name).await?)
    }

    #[instrument(
        skip_all,
        fields(kind = %resource.kind(), namespace = resource.namespace(), name = resource.name())
    )]
    async fn create(&self, resource: &DependentResource) -> Result<(), StoreError> {
        let namespace = resource.namespace();
        match resource {
            DependentResource::Credential(secret) => {
                self.create_namespaced(namespace, secret).await
            }
            DependentResource::DatabaseVolumeClaim(claim)
            | DependentResource::AppVolumeClaim(claim) => {
                self.create_namespaced(namespace, claim).await
            }
            DependentResource::DatabaseWorkload(deployment)
            | DependentResource::AppWorkload(deployment) => {
                self.create_namespaced(namespace, deployment).await
            }
            DependentResource::DatabaseExposure(service)
            | DependentResource::AppExposure(service) => {
                self.create_namespaced(namespace, service).await
            }
        }?;
        debug!("created {}", resource.kind().api_kind());
        Ok(())
    }

    #[instrument(
        skip_all,
        fields(namespace = %wordpress.namespace().unwrap_or_default(), name = %wordpress.name_any())
    )]
    async fn update(&self, wordpress: &Wordpress) -> Result<Wordpress, StoreError> {
        let namespace = wordpress.namespace().unwrap_or_default();
        let api: Api<Wordpress> = Api::namespaced(self.client.clone(), &namespace);
        Ok(api
            .replace(&wordpress.name_any(), &Self::post_params(), wordpress)
            .await?)
    }

    #[instrument(skip(self))]
    async fn delete(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        match kind {
            ResourceKind::Credential => self.delete_namespaced::<Secret>(namespace, name).await,
            ResourceKind::DatabaseVolumeClaim | ResourceKind::AppVolumeClaim => {
                self.delete_namespaced::<PersistentVolumeClaim>(namespace, name)
                    .await
            }
            ResourceKind::DatabaseWorkload | ResourceKind::AppWorkload => {
                self.delete_namespaced::<Deployment>(namespace, name).await
            }
            ResourceKind::DatabaseExposure | ResourceKind::AppExposure => {
                self.delete_namespaced::<Service>(namespace, name).await
            }
        }
    }

    async fn update_status(&self, wordpress: &Wordpress) -> Result<Wordpress, StoreError> {
        let namespace = wordpress.namespace().unwrap_or_default();
        let api: Api<Wordpress> = Api::namespaced(self.client.clone(), &namespace);
        let status_patch = serde_json::json!({
            "status": serde_json::to_value(&wordpress.status)?
        });
        Ok(api
            .patch_status(
                &wordpress.name_any(),
                &PatchParams::apply(CONTROLLER_NAME),
                &Patch::Merge(&status_patch),
            )
            .await?)
    }
}
