//! # Wordpress Spec
//!
//! The `Wordpress` custom resource describing a MySQL-backed WordPress install.

use serde::{Deserialize, Serialize};

/// Finalizer placed on every `Wordpress` before any dependent resource is created.
///
/// Its presence keeps the API server from completing a delete until the
/// operator has decided what happens to the volume claims.
pub const WORDPRESS_FINALIZER: &str = "wordpress.example.com";

/// Wordpress Custom Resource Definition
///
/// # Example
///
/// ```yaml
/// apiVersion: example.com/v1
/// kind: Wordpress
/// metadata:
///   name: blog
///   namespace: ns1
/// spec:
///   sqlRootPassword: p@ss
///   retainVolumes: false
/// ```
#[derive(
    kube::CustomResource, Debug, Clone, PartialEq, Deserialize, Serialize, schemars::JsonSchema,
)]
#[kube(
    kind = "Wordpress",
    group = "example.com",
    version = "v1",
    plural = "wordpresses",
    shortname = "wp",
    namespaced,
    derive = "PartialEq",
    status = "crate::crd::WordpressStatus",
    printcolumn = r#"{"name":"Retain Volumes", "type":"boolean", "jsonPath":".spec.retainVolumes"}, {"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct WordpressSpec {
    /// Plaintext MySQL root password, written into the shared credential Secret
    pub sql_root_password: String,
    /// Keep the MySQL and WordPress volume claims when this resource is deleted
    /// Default: false (claims are deleted with the resource)
    #[serde(default = "default_false")]
    pub retain_volumes: bool,
}

/// Default value for boolean false
pub fn default_false() -> bool {
    false
}
