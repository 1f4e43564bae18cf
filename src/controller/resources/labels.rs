//! Label sets shared by the Deployments and Services.

use std::collections::BTreeMap;

/// Value of the `app` label on every workload object
pub const APP_LABEL_VALUE: &str = "wordpress";

const APP_LABEL: &str = "app";
const TIER_LABEL: &str = "tier";

/// Application tier a workload or its exposure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Mysql,
    Frontend,
}

impl Tier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Mysql => "mysql",
            Tier::Frontend => "frontend",
        }
    }
}

/// Label sets derived from a tier
#[derive(Debug, Clone, Copy)]
pub struct TierLabels(pub Tier);

impl TierLabels {
    /// Labels on the Deployment/Service object itself
    #[must_use]
    pub fn object(self) -> BTreeMap<String, String> {
        BTreeMap::from([(APP_LABEL.to_string(), APP_LABEL_VALUE.to_string())])
    }

    /// Selector and pod template labels
    #[must_use]
    pub fn selector(self) -> BTreeMap<String, String> {
        let mut labels = self.object();
        labels.insert(TIER_LABEL.to_string(), self.0.as_str().to_string());
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_adds_tier_to_object_labels() {
        let labels = TierLabels(Tier::Mysql);
        assert_eq!(labels.object().len(), 1);
        assert_eq!(labels.selector()["app"], "wordpress");
        assert_eq!(labels.selector()["tier"], "mysql");
        assert_eq!(TierLabels(Tier::Frontend).selector()["tier"], "frontend");
    }
}
