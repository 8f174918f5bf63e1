use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload handed to the external event update operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    /// Empty when the modal creates rather than edits.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub event_name: String,
    pub event_owner: String,
    pub event_days: u32,
    pub event_hours: u32,
    pub event_budget: f64,
    pub max_accounts: u32,
    /// Epoch seconds composed from the date and time inputs.
    pub event_on: i64,
    #[serde(default)]
    pub event_status: String,
    /// Seed fields the modal does not edit.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload handed to the external lease update operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseUpdate {
    #[serde(default)]
    pub lease_status_reason: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub event_id: String,
    pub budget_amount: f64,
    pub budget_notification_emails: Vec<String>,
    /// Epoch seconds composed from the date and time inputs.
    pub expires_on: i64,
    /// Seed fields the modal does not edit.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn event_reads_camel_case_and_keeps_unknown_fields() {
        let event: EventUpdate = serde_json::from_value(json!({
            "id": "e1",
            "eventName": "kickoff",
            "eventOwner": "owner@domain.org",
            "eventDays": 1,
            "eventHours": 8,
            "eventBudget": 10.5,
            "maxAccounts": 3,
            "eventOn": 100,
            "eventStatus": "Waiting",
            "region": "eu-west-1"
        }))
        .unwrap();
        assert_eq!(event.id, "e1");
        assert_eq!(event.event_hours, 8);
        assert_eq!(event.event_budget, 10.5);
        assert_eq!(event.extra.get("region"), Some(&json!("eu-west-1")));
    }

    #[test]
    fn event_defaults_missing_identity() {
        let event: EventUpdate = serde_json::from_value(json!({
            "eventOwner": "owner@domain.org",
            "eventDays": 0,
            "eventHours": 8,
            "eventBudget": 0.0,
            "maxAccounts": 1,
            "eventOn": 0
        }))
        .unwrap();
        assert_eq!(event.id, "");
        assert_eq!(event.event_status, "");
        assert!(event.extra.is_empty());
    }

    #[test]
    fn lease_writes_camel_case() {
        let lease = LeaseUpdate {
            lease_status_reason: "Active".into(),
            user: "u@domain.org".into(),
            event_id: "a1".into(),
            budget_amount: 10.0,
            budget_notification_emails: vec!["u@domain.org".into()],
            expires_on: 42,
            extra: Map::new(),
        };
        let value = serde_json::to_value(&lease).unwrap();
        assert_eq!(value["leaseStatusReason"], json!("Active"));
        assert_eq!(value["budgetNotificationEmails"], json!(["u@domain.org"]));
        assert_eq!(value["expiresOn"], json!(42));
    }
}
