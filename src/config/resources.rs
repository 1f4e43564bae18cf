//! # Resource Configuration
//!
//! Fixed inputs for the dependent-resource generators: the shared credential
//! Secret's name and key, the two container images and the volume claim size.
//!
//! Read once at startup. Unlike the controller settings these have no
//! defaults, so a missing or malformed value stops the process before the
//! watch loop starts.

use crate::constants::{
    ENV_IMAGE_MYSQL, ENV_IMAGE_WORDPRESS, ENV_PVC_SIZE, ENV_SECRET_KEY, ENV_SECRET_NAME,
};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Kubernetes quantity: a decimal number with an optional binary or decimal suffix
static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+)?(Ki|Mi|Gi|Ti|Pi|Ei|k|M|G|T|P|E)?$")
        .expect("quantity pattern is a valid regex")
});

/// Errors raised while loading the resource configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),
    #[error("environment variable {name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Configuration consumed by the resource generators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConfig {
    /// Name of the Secret holding the MySQL root password
    pub secret_name: String,
    /// Key inside that Secret
    pub secret_key: String,
    /// Image for the MySQL Deployment
    pub mysql_image: String,
    /// Image for the WordPress Deployment
    pub wordpress_image: String,
    /// Storage request for both volume claims, e.g. `20Gi`
    pub pvc_size: String,
}

impl ResourceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let config = Self {
            secret_name: required(ENV_SECRET_NAME)?,
            secret_key: required(ENV_SECRET_KEY)?,
            mysql_image: required(ENV_IMAGE_MYSQL)?,
            wordpress_image: required(ENV_IMAGE_WORDPRESS)?,
            pvc_size: required(ENV_PVC_SIZE)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !QUANTITY.is_match(&self.pvc_size) {
            return Err(ConfigError::Invalid {
                name: ENV_PVC_SIZE,
                value: self.pvc_size.clone(),
                reason: "expected a Kubernetes quantity such as 20Gi",
            });
        }
        if !is_dns_subdomain(&self.secret_name) {
            return Err(ConfigError::Invalid {
                name: ENV_SECRET_NAME,
                value: self.secret_name.clone(),
                reason: "expected a lowercase RFC 1123 subdomain",
            });
        }
        Ok(())
    }
}

fn is_dns_subdomain(name: &str) -> bool {
    name.len() <= 253
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
        && name.starts_with(|c: char| c.is_ascii_alphanumeric())
        && name.ends_with(|c: char| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(overrides: &[(&str, &str)]) -> HashMap<String, String> {
        let mut map: HashMap<String, String> = [
            (ENV_SECRET_NAME, "mysql-pass"),
            (ENV_SECRET_KEY, "password"),
            (ENV_IMAGE_MYSQL, "mysql:5.6"),
            (ENV_IMAGE_WORDPRESS, "wordpress:4.8-apache"),
            (ENV_PVC_SIZE, "20Gi"),
        ]
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
        for (k, v) in overrides {
            map.insert((*k).to_string(), (*v).to_string());
        }
        map
    }

    fn load(map: &HashMap<String, String>) -> Result<ResourceConfig, ConfigError> {
        ResourceConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_loads_all_values_verbatim() {
        let config = load(&env(&[])).unwrap();
        assert_eq!(config.secret_name, "mysql-pass");
        assert_eq!(config.secret_key, "password");
        assert_eq!(config.mysql_image, "mysql:5.6");
        assert_eq!(config.wordpress_image, "wordpress:4.8-apache");
        assert_eq!(config.pvc_size, "20Gi");
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        let mut map = env(&[]);
        map.remove(ENV_IMAGE_MYSQL);
        assert_eq!(load(&map), Err(ConfigError::Missing(ENV_IMAGE_MYSQL)));
    }

    #[test]
    fn test_blank_variable_counts_as_missing() {
        let map = env(&[(ENV_SECRET_KEY, "  ")]);
        assert_eq!(load(&map), Err(ConfigError::Missing(ENV_SECRET_KEY)));
    }

    #[test]
    fn test_malformed_pvc_size_is_rejected() {
        for bad in ["twenty", "20GB", "-1Gi", "1.Gi"] {
            let result = load(&env(&[(ENV_PVC_SIZE, bad)]));
            assert!(
                matches!(result, Err(ConfigError::Invalid { name: ENV_PVC_SIZE, .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_valid_quantities_accepted() {
        for good in ["1Gi", "500Mi", "1.5Gi", "10G", "1024"] {
            assert!(load(&env(&[(ENV_PVC_SIZE, good)])).is_ok(), "{good}");
        }
    }

    #[test]
    fn test_secret_name_must_be_dns_subdomain() {
        let result = load(&env(&[(ENV_SECRET_NAME, "Mysql_Pass")]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                name: ENV_SECRET_NAME,
                ..
            })
        ));
    }
}
