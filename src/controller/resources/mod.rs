//! # Dependent Resources
//!
//! Pure builders for the seven objects that make up a Wordpress install.
//!
//! [`generate`] maps a [`ResourceKind`] to its target object. It performs no
//! I/O and only uses ordered maps, so the same `Wordpress` and
//! [`ResourceConfig`] always produce identical objects.
//!
//! Every object except the two volume claims carries a controller owner
//! reference and is garbage collected by the API server with its owner. The
//! claims are deliberately unowned so they can outlive the `Wordpress` when
//! `retainVolumes` is set.

mod credential;
mod exposure;
mod labels;
mod volume;
mod workload;

pub use labels::{Tier, TierLabels, APP_LABEL_VALUE};

use crate::config::ResourceConfig;
use crate::crd::Wordpress;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, Secret, Service};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use kube::{Resource, ResourceExt};
use std::fmt;

/// Name of the MySQL volume claim
pub const MYSQL_PVC_NAME: &str = "mysql-pv-claim";
/// Name of the WordPress volume claim
pub const WORDPRESS_PVC_NAME: &str = "wp-pv-claim";
/// Name shared by the MySQL Deployment and its headless Service
/// (also the database host handed to WordPress)
pub const MYSQL_NAME: &str = "wordpress-mysql";
/// Name shared by the WordPress Deployment and its LoadBalancer Service
pub const WORDPRESS_NAME: &str = "wordpress";

/// The fixed set of dependent resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Credential,
    DatabaseVolumeClaim,
    AppVolumeClaim,
    DatabaseWorkload,
    DatabaseExposure,
    AppWorkload,
    AppExposure,
}

impl ResourceKind {
    /// Creation order. Workloads come after the credential and the claims they mount.
    pub const RECONCILE_ORDER: [ResourceKind; 7] = [
        ResourceKind::Credential,
        ResourceKind::DatabaseVolumeClaim,
        ResourceKind::AppVolumeClaim,
        ResourceKind::DatabaseWorkload,
        ResourceKind::DatabaseExposure,
        ResourceKind::AppWorkload,
        ResourceKind::AppExposure,
    ];

    /// Kinds the finalizer deletes explicitly (they carry no owner reference)
    pub const VOLUME_CLAIMS: [ResourceKind; 2] =
        [ResourceKind::DatabaseVolumeClaim, ResourceKind::AppVolumeClaim];

    /// Field name used to build the `<field>Created` condition type
    #[must_use]
    pub fn condition_field(self) -> &'static str {
        match self {
            ResourceKind::Credential => "secret",
            ResourceKind::DatabaseVolumeClaim => "mysqlPVC",
            ResourceKind::AppVolumeClaim => "wordpressPVC",
            ResourceKind::DatabaseWorkload => "mysqlDeployment",
            ResourceKind::DatabaseExposure => "mysqlService",
            ResourceKind::AppWorkload => "wordpressDeployment",
            ResourceKind::AppExposure => "wordpressService",
        }
    }

    #[must_use]
    pub fn condition_type(self) -> String {
        format!("{}Created", self.condition_field())
    }

    /// Kubernetes kind of the generated object
    #[must_use]
    pub fn api_kind(self) -> &'static str {
        match self {
            ResourceKind::Credential => "Secret",
            ResourceKind::DatabaseVolumeClaim | ResourceKind::AppVolumeClaim => {
                "PersistentVolumeClaim"
            }
            ResourceKind::DatabaseWorkload | ResourceKind::AppWorkload => "Deployment",
            ResourceKind::DatabaseExposure | ResourceKind::AppExposure => "Service",
        }
    }

    /// Well-known object name for this kind
    #[must_use]
    pub fn object_name(self, config: &ResourceConfig) -> &str {
        match self {
            ResourceKind::Credential => &config.secret_name,
            ResourceKind::DatabaseVolumeClaim => MYSQL_PVC_NAME,
            ResourceKind::AppVolumeClaim => WORDPRESS_PVC_NAME,
            ResourceKind::DatabaseWorkload | ResourceKind::DatabaseExposure => MYSQL_NAME,
            ResourceKind::AppWorkload | ResourceKind::AppExposure => WORDPRESS_NAME,
        }
    }

    /// Whether the object is tied to the Wordpress lifecycle by an owner reference
    #[must_use]
    pub fn is_owned(self) -> bool {
        !matches!(
            self,
            ResourceKind::DatabaseVolumeClaim | ResourceKind::AppVolumeClaim
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.condition_field())
    }
}

/// A generated dependent object, tagged by kind
#[derive(Debug, Clone, PartialEq)]
pub enum DependentResource {
    Credential(Secret),
    DatabaseVolumeClaim(PersistentVolumeClaim),
    AppVolumeClaim(PersistentVolumeClaim),
    DatabaseWorkload(Deployment),
    DatabaseExposure(Service),
    AppWorkload(Deployment),
    AppExposure(Service),
}

impl DependentResource {
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            DependentResource::Credential(_) => ResourceKind::Credential,
            DependentResource::DatabaseVolumeClaim(_) => ResourceKind::DatabaseVolumeClaim,
            DependentResource::AppVolumeClaim(_) => ResourceKind::AppVolumeClaim,
            DependentResource::DatabaseWorkload(_) => ResourceKind::DatabaseWorkload,
            DependentResource::DatabaseExposure(_) => ResourceKind::DatabaseExposure,
            DependentResource::AppWorkload(_) => ResourceKind::AppWorkload,
            DependentResource::AppExposure(_) => ResourceKind::AppExposure,
        }
    }

    #[must_use]
    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            DependentResource::Credential(o) => &o.metadata,
            DependentResource::DatabaseVolumeClaim(o) | DependentResource::AppVolumeClaim(o) => {
                &o.metadata
            }
            DependentResource::DatabaseWorkload(o) | DependentResource::AppWorkload(o) => {
                &o.metadata
            }
            DependentResource::DatabaseExposure(o) | DependentResource::AppExposure(o) => {
                &o.metadata
            }
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.metadata().name.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        self.metadata().namespace.as_deref().unwrap_or_default()
    }
}

/// Build the target object for `kind`
#[must_use]
pub fn generate(
    kind: ResourceKind,
    wordpress: &Wordpress,
    config: &ResourceConfig,
) -> DependentResource {
    match kind {
        ResourceKind::Credential => {
            DependentResource::Credential(credential::build_secret(wordpress, config))
        }
        ResourceKind::DatabaseVolumeClaim => DependentResource::DatabaseVolumeClaim(
            volume::build_claim(wordpress, MYSQL_PVC_NAME, config),
        ),
        ResourceKind::AppVolumeClaim => DependentResource::AppVolumeClaim(volume::build_claim(
            wordpress,
            WORDPRESS_PVC_NAME,
            config,
        )),
        ResourceKind::DatabaseWorkload => {
            DependentResource::DatabaseWorkload(workload::build_mysql(wordpress, config))
        }
        ResourceKind::DatabaseExposure => {
            DependentResource::DatabaseExposure(exposure::build_mysql(wordpress))
        }
        ResourceKind::AppWorkload => {
            DependentResource::AppWorkload(workload::build_wordpress(wordpress, config))
        }
        ResourceKind::AppExposure => {
            DependentResource::AppExposure(exposure::build_wordpress(wordpress))
        }
    }
}

/// Metadata shared by every dependent object
fn object_meta(wordpress: &Wordpress, name: &str, owned: bool) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: wordpress.namespace(),
        owner_references: if owned { owner_references(wordpress) } else { None },
        ..Default::default()
    }
}

fn owner_references(wordpress: &Wordpress) -> Option<Vec<OwnerReference>> {
    wordpress.controller_owner_ref(&()).map(|owner| vec![owner])
}
