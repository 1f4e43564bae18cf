//! Single-replica Deployments for MySQL and WordPress.
//!
//! Both pods read the root password through a `secretKeyRef`, never as a
//! literal value, and mount their tier's volume claim.

use super::labels::{Tier, TierLabels};
use super::{
    object_meta, ResourceKind, MYSQL_NAME, MYSQL_PVC_NAME, WORDPRESS_NAME, WORDPRESS_PVC_NAME,
};
use crate::config::ResourceConfig;
use crate::crd::Wordpress;
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EnvVar, EnvVarSource, PersistentVolumeClaimVolumeSource, PodSpec,
    PodTemplateSpec, SecretKeySelector, Volume, VolumeMount,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};

const MYSQL_PORT: i32 = 3306;
const WORDPRESS_PORT: i32 = 80;

/// Pieces that differ between the two workloads
struct WorkloadParts<'a> {
    name: &'a str,
    kind: ResourceKind,
    tier: Tier,
    container_name: &'a str,
    image: &'a str,
    port: i32,
    env: Vec<EnvVar>,
    volume_name: &'a str,
    mount_path: &'a str,
    claim_name: &'a str,
}

pub(super) fn build_mysql(wordpress: &Wordpress, config: &ResourceConfig) -> Deployment {
    build(
        wordpress,
        WorkloadParts {
            name: MYSQL_NAME,
            kind: ResourceKind::DatabaseWorkload,
            tier: Tier::Mysql,
            container_name: "mysql",
            image: &config.mysql_image,
            port: MYSQL_PORT,
            env: vec![secret_env("MYSQL_ROOT_PASSWORD", config)],
            volume_name: "mysql-persistent-storage",
            mount_path: "/var/lib/mysql",
            claim_name: MYSQL_PVC_NAME,
        },
    )
}

pub(super) fn build_wordpress(wordpress: &Wordpress, config: &ResourceConfig) -> Deployment {
    build(
        wordpress,
        WorkloadParts {
            name: WORDPRESS_NAME,
            kind: ResourceKind::AppWorkload,
            tier: Tier::Frontend,
            container_name: "wordpress",
            image: &config.wordpress_image,
            port: WORDPRESS_PORT,
            env: vec![
                EnvVar {
                    name: "WORDPRESS_DB_HOST".to_string(),
                    value: Some(MYSQL_NAME.to_string()),
                    ..Default::default()
                },
                secret_env("WORDPRESS_DB_PASSWORD", config),
            ],
            volume_name: "wordpress-persistent-storage",
            mount_path: "/var/www/html",
            claim_name: WORDPRESS_PVC_NAME,
        },
    )
}

fn secret_env(name: &str, config: &ResourceConfig) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value_from: Some(EnvVarSource {
            secret_key_ref: Some(SecretKeySelector {
                name: config.secret_name.clone(),
                key: config.secret_key.clone(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn build(wordpress: &Wordpress, parts: WorkloadParts<'_>) -> Deployment {
    let labels = TierLabels(parts.tier);
    let mut metadata = object_meta(wordpress, parts.name, parts.kind.is_owned());
    metadata.labels = Some(labels.object());

    Deployment {
        metadata,
        spec: Some(DeploymentSpec {
            replicas: Some(1),
            selector: LabelSelector {
                match_labels: Some(labels.selector()),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels.selector()),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: parts.container_name.to_string(),
                        image: Some(parts.image.to_string()),
                        env: Some(parts.env),
                        ports: Some(vec![ContainerPort {
                            name: Some(parts.container_name.to_string()),
                            container_port: parts.port,
                            ..Default::default()
                        }]),
                        volume_mounts: Some(vec![VolumeMount {
                            name: parts.volume_name.to_string(),
                            mount_path: parts.mount_path.to_string(),
                            ..Default::default()
                        }]),
                        ..Default::default()
                    }],
                    volumes: Some(vec![Volume {
                        name: parts.volume_name.to_string(),
                        persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
                            claim_name: parts.claim_name.to_string(),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }]),
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}
