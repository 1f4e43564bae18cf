//! Secret holding the MySQL root password.

use super::{object_meta, ResourceKind};
use crate::config::ResourceConfig;
use crate::crd::Wordpress;
use k8s_openapi::api::core::v1::Secret;
use std::collections::BTreeMap;

/// Opaque Secret with `{secret_key: sqlRootPassword}` as string data.
///
/// The API server encodes `stringData` into `data` on write.
pub(super) fn build_secret(wordpress: &Wordpress, config: &ResourceConfig) -> Secret {
    Secret {
        metadata: object_meta(
            wordpress,
            &config.secret_name,
            ResourceKind::Credential.is_owned(),
        ),
        type_: Some("Opaque".to_string()),
        string_data: Some(BTreeMap::from([(
            config.secret_key.clone(),
            wordpress.spec.sql_root_password.clone(),
        )])),
        ..Default::default()
    }
}
