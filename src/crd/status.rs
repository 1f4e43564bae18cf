//! # Wordpress Status
//!
//! Status types and the condition merge rules.
//!
//! Conditions are keyed by `type`: at most one entry per type is kept, and the
//! list stays sorted by type so repeated serializations are byte-identical.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Status of the Wordpress resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordpressStatus {
    /// Conditions represent the latest available observations
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// Tri-state status of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl ConditionStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        }
    }
}

/// Condition represents a timestamped observation of the resource
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition, e.g. `secretCreated`
    pub r#type: String,
    /// Status of the condition (True, False, Unknown)
    pub status: ConditionStatus,
    /// Machine-readable reason for the last transition
    #[serde(default)]
    pub reason: String,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Last time the status changed (RFC3339)
    #[serde(default)]
    pub last_transition_time: Option<String>,
}

impl Condition {
    pub fn new(
        r#type: impl Into<String>,
        status: ConditionStatus,
        reason: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            r#type: r#type.into(),
            status,
            reason: reason.into(),
            message: message.into(),
            last_transition_time: Some(now.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }

    fn same_observation(&self, other: &Condition) -> bool {
        self.status == other.status && self.reason == other.reason && self.message == other.message
    }
}

impl WordpressStatus {
    /// Merge a condition into the list.
    ///
    /// Returns `true` when the stored conditions changed and the status needs
    /// to be persisted. An identical status/reason/message is a no-op. A new
    /// reason or message replaces the entry but keeps the previous
    /// `last_transition_time`; only a status change moves the timestamp.
    pub fn set_condition(&mut self, condition: Condition) -> bool {
        match self
            .conditions
            .iter_mut()
            .find(|existing| existing.r#type == condition.r#type)
        {
            None => {
                self.conditions.push(condition);
                self.conditions.sort_by(|a, b| a.r#type.cmp(&b.r#type));
                true
            }
            Some(existing) if existing.same_observation(&condition) => false,
            Some(existing) => {
                let mut condition = condition;
                if existing.status == condition.status {
                    condition
                        .last_transition_time
                        .clone_from(&existing.last_transition_time);
                }
                *existing = condition;
                true
            }
        }
    }

    #[must_use]
    pub fn condition(&self, r#type: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.r#type == r#type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, minute, 0).unwrap()
    }

    fn created(r#type: &str, status: ConditionStatus, now: DateTime<Utc>) -> Condition {
        Condition::new(r#type, status, "operatorCreated", "secret has been created", now)
    }

    #[test]
    fn test_insert_new_condition() {
        let mut status = WordpressStatus::default();
        assert!(status.set_condition(created("secretCreated", ConditionStatus::True, at(0))));
        assert_eq!(status.conditions.len(), 1);
        assert_eq!(
            status.conditions[0].last_transition_time.as_deref(),
            Some("2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn test_identical_condition_is_noop() {
        let mut status = WordpressStatus::default();
        status.set_condition(created("secretCreated", ConditionStatus::True, at(0)));

        let changed = status.set_condition(created("secretCreated", ConditionStatus::True, at(5)));

        assert!(!changed);
        assert_eq!(status.conditions.len(), 1);
        assert_eq!(
            status.conditions[0].last_transition_time.as_deref(),
            Some("2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn test_status_change_bumps_transition_time() {
        let mut status = WordpressStatus::default();
        status.set_condition(created("secretCreated", ConditionStatus::False, at(0)));

        let changed = status.set_condition(created("secretCreated", ConditionStatus::True, at(5)));

        assert!(changed);
        let condition = status.condition("secretCreated").unwrap();
        assert_eq!(condition.status, ConditionStatus::True);
        assert_eq!(
            condition.last_transition_time.as_deref(),
            Some("2024-01-01T00:05:00Z")
        );
    }

    #[test]
    fn test_message_change_keeps_transition_time() {
        let mut status = WordpressStatus::default();
        status.set_condition(created("secretCreated", ConditionStatus::True, at(0)));

        let changed = status.set_condition(Condition::new(
            "secretCreated",
            ConditionStatus::True,
            "operatorCreated",
            "secret was recreated",
            at(5),
        ));

        assert!(changed);
        let condition = status.condition("secretCreated").unwrap();
        assert_eq!(condition.message, "secret was recreated");
        assert_eq!(
            condition.last_transition_time.as_deref(),
            Some("2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn test_conditions_sorted_and_unique_by_type() {
        let mut status = WordpressStatus::default();
        status.set_condition(created("wordpressServiceCreated", ConditionStatus::True, at(0)));
        status.set_condition(created("mysqlPVCCreated", ConditionStatus::True, at(0)));
        status.set_condition(created("secretCreated", ConditionStatus::True, at(0)));
        status.set_condition(created("mysqlPVCCreated", ConditionStatus::False, at(1)));

        let types: Vec<&str> = status.conditions.iter().map(|c| c.r#type.as_str()).collect();
        assert_eq!(
            types,
            vec!["mysqlPVCCreated", "secretCreated", "wordpressServiceCreated"]
        );
    }

    #[test]
    fn test_condition_status_serializes_as_kubernetes_strings() {
        let condition = created("secretCreated", ConditionStatus::Unknown, at(0));
        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(value["status"], "Unknown");
        assert_eq!(value["type"], "secretCreated");
        assert_eq!(value["lastTransitionTime"], "2024-01-01T00:00:00Z");
        assert_eq!(ConditionStatus::True.as_str(), "True");
    }
}
