//! Services in front of the two workloads.

use super::labels::{Tier, TierLabels};
use super::{object_meta, ResourceKind, MYSQL_NAME, WORDPRESS_NAME};
use crate::crd::Wordpress;
use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};

/// Headless, cluster-internal Service for MySQL
pub(super) fn build_mysql(wordpress: &Wordpress) -> Service {
    let mut service = build(
        wordpress,
        MYSQL_NAME,
        ResourceKind::DatabaseExposure,
        Tier::Mysql,
        "mysql",
        3306,
    );
    if let Some(spec) = service.spec.as_mut() {
        spec.cluster_ip = Some("None".to_string());
    }
    service
}

/// Externally reachable LoadBalancer Service for WordPress
pub(super) fn build_wordpress(wordpress: &Wordpress) -> Service {
    let mut service = build(
        wordpress,
        WORDPRESS_NAME,
        ResourceKind::AppExposure,
        Tier::Frontend,
        "wordpress",
        80,
    );
    if let Some(spec) = service.spec.as_mut() {
        spec.type_ = Some("LoadBalancer".to_string());
    }
    service
}

fn build(
    wordpress: &Wordpress,
    name: &str,
    kind: ResourceKind,
    tier: Tier,
    port_name: &str,
    port: i32,
) -> Service {
    let labels = TierLabels(tier);
    let mut metadata = object_meta(wordpress, name, kind.is_owned());
    metadata.labels = Some(labels.object());

    Service {
        metadata,
        spec: Some(ServiceSpec {
            selector: Some(labels.selector()),
            ports: Some(vec![ServicePort {
                name: Some(port_name.to_string()),
                port,
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}
