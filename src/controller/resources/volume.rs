//! Persistent volume claims for the database and application data.

use super::object_meta;
use crate::config::ResourceConfig;
use crate::crd::Wordpress;
use k8s_openapi::api::core::v1::{
    PersistentVolumeClaim, PersistentVolumeClaimSpec, VolumeResourceRequirements,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use std::collections::BTreeMap;

/// ReadWriteOnce claim requesting `pvc_size` of storage.
///
/// Claims are never owned; the finalizer decides whether they survive.
pub(super) fn build_claim(
    wordpress: &Wordpress,
    name: &str,
    config: &ResourceConfig,
) -> PersistentVolumeClaim {
    PersistentVolumeClaim {
        metadata: object_meta(wordpress, name, false),
        spec: Some(PersistentVolumeClaimSpec {
            access_modes: Some(vec!["ReadWriteOnce".to_string()]),
            resources: Some(VolumeResourceRequirements {
                requests: Some(BTreeMap::from([(
                    "storage".to_string(),
                    Quantity(config.pvc_size.clone()),
                )])),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}
