//! Form state for one open modal: seed item, raw inputs, derived validity.

use std::collections::BTreeMap;

use chrono::FixedOffset;
use serde_json::{Map, Value};

use super::field::Form;
use crate::model::{FieldValue, Schema, ValidationError, compose_timestamp, split_timestamp};

/// Per-field validity. Keys absent from the map are implicitly valid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldValidity(BTreeMap<&'static str, bool>);

impl FieldValidity {
    /// Validity of `key`; `true` for fields outside the required set.
    pub fn get(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(true)
    }

    /// `true` iff every entry is valid.
    pub fn all_valid(&self) -> bool {
        self.0.values().all(|&valid| valid)
    }

    /// Keys of the entries that failed validation.
    pub fn invalid_keys(&self) -> Vec<&'static str> {
        self.0
            .iter()
            .filter(|&(_, &valid)| !valid)
            .map(|(&key, _)| key)
            .collect()
    }

    /// Iterates all `(key, valid)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.0.iter().map(|(&key, &valid)| (key, valid))
    }
}

/// Mutable raw copy of the item being edited.
///
/// Nothing derived is stored: validity and the composed timestamp are
/// recomputed from the current raw text on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    schema: Schema,
    seed: Map<String, Value>,
    form: Form,
    offset: FixedOffset,
}

impl FormState {
    /// Seeds a fresh form from the item carried by an open event.
    ///
    /// Date and time inputs are rendered from the seed's timestamp when it has
    /// one; otherwise the raw seed inputs are used with `-` date separators
    /// turned into `/`.
    pub fn open(schema: Schema, seed: Map<String, Value>, offset: FixedOffset) -> Self {
        let mut form = Form::new(schema.fields());
        let derived = seed
            .get(schema.timestamp_key())
            .and_then(Value::as_i64)
            .and_then(|ts| split_timestamp(ts, offset));

        for spec in schema.fields() {
            let raw = seed_text(seed.get(spec.key));
            let value = if spec.key == schema.date_key() {
                derived
                    .as_ref()
                    .map(|(date, _)| date.clone())
                    .unwrap_or_else(|| raw.replace('-', "/"))
            } else if spec.key == schema.time_key() {
                derived.as_ref().map(|(_, time)| time.clone()).unwrap_or(raw)
            } else {
                raw
            };
            form.set_value(spec.key, value);
        }

        Self {
            schema,
            seed,
            form,
            offset,
        }
    }

    /// The schema this form validates against.
    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// The item the form was opened with.
    pub fn seed(&self) -> &Map<String, Value> {
        &self.seed
    }

    /// The raw field values.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Raw text of the field with `key`.
    pub fn value(&self, key: &str) -> &str {
        self.form.value(key)
    }

    /// Replaces the raw text of a field. Returns `false` for unknown keys.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) -> bool {
        self.form.set_value(key, value)
    }

    /// Composes the derived timestamp from the current date and time inputs.
    pub fn timestamp(&self) -> Result<i64, ValidationError> {
        compose_timestamp(
            self.value(self.schema.date_key()),
            self.value(self.schema.time_key()),
            self.offset,
        )
    }

    /// Validity of every gating field plus the derived timestamp.
    pub fn validity(&self) -> FieldValidity {
        let mut entries: BTreeMap<&'static str, bool> = self
            .form
            .fields()
            .iter()
            .filter(|f| f.spec.kind.is_gating())
            .map(|f| (f.spec.key, f.is_valid()))
            .collect();
        entries.insert(self.schema.timestamp_key(), self.timestamp().is_ok());
        FieldValidity(entries)
    }

    /// `true` iff every required field validates. Gates the Save control.
    pub fn is_valid(&self) -> bool {
        self.validity().all_valid()
    }

    /// Parses every field, returning `None` if any gating field is invalid.
    pub fn validated(&self) -> Option<ValidForm<'_>> {
        let values = self
            .form
            .fields()
            .iter()
            .map(|f| f.spec.kind.parse(&f.value).map(|value| (f.spec.key, value)))
            .collect::<Result<Vec<_>, _>>()
            .ok()?;
        let timestamp = self.timestamp().ok()?;
        Some(ValidForm {
            schema: self.schema,
            seed: &self.seed,
            values,
            timestamp,
        })
    }
}

/// Parsed field values of a form that passed validation.
///
/// Only [`FormState::validated`] constructs one, so holding a `ValidForm` is
/// proof the form was valid when it was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidForm<'a> {
    schema: Schema,
    seed: &'a Map<String, Value>,
    values: Vec<(&'static str, FieldValue)>,
    timestamp: i64,
}

impl ValidForm<'_> {
    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn seed(&self) -> &Map<String, Value> {
        self.seed
    }

    /// Parsed values in schema order.
    pub fn values(&self) -> &[(&'static str, FieldValue)] {
        &self.values
    }

    /// The composed epoch timestamp.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

/// Renders a seed value as raw input text.
fn seed_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| seed_text(Some(item)))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn event_on() -> i64 {
        Utc.with_ymd_and_hms(2099, 1, 1, 10, 0, 0).unwrap().timestamp()
    }

    fn event_seed() -> Map<String, Value> {
        let Value::Object(map) = json!({
            "id": "",
            "eventName": "testname",
            "eventOwner": "testemail@domain.org",
            "eventDays": "10",
            "eventHours": "8",
            "eventBudget": "10",
            "maxAccounts": "10",
            "eventDateInput": "2099-01-01",
            "eventTimeInput": "10:00",
            "eventStatus": "Waiting",
            "eventOn": event_on(),
        }) else {
            unreachable!()
        };
        map
    }

    fn open_event() -> FormState {
        FormState::open(Schema::Event, event_seed(), utc())
    }

    mod seeding {
        use super::*;

        #[test]
        fn copies_raw_values() {
            let state = open_event();
            assert_eq!(state.value("eventOwner"), "testemail@domain.org");
            assert_eq!(state.value("eventDays"), "10");
            assert_eq!(state.value("eventName"), "testname");
        }

        #[test]
        fn renders_date_and_time_from_timestamp() {
            let state = open_event();
            assert_eq!(state.value("eventDateInput"), "2099/01/01");
            assert_eq!(state.value("eventTimeInput"), "10:00");
        }

        #[test]
        fn normalises_dashed_seed_date_without_timestamp() {
            let mut seed = event_seed();
            seed.remove("eventOn");
            let state = FormState::open(Schema::Event, seed, utc());
            assert_eq!(state.value("eventDateInput"), "2099/01/01");
            assert_eq!(state.value("eventTimeInput"), "10:00");
        }

        #[test]
        fn numbers_and_lists_become_text() {
            let Value::Object(seed) = json!({
                "budgetAmount": 12.5,
                "budgetNotificationEmails": ["a@domain.org", "b@domain.org"],
                "expiresOn": event_on(),
            }) else {
                unreachable!()
            };
            let state = FormState::open(Schema::Lease, seed, utc());
            assert_eq!(state.value("budgetAmount"), "12.5");
            assert_eq!(
                state.value("budgetNotificationEmails"),
                "a@domain.org, b@domain.org"
            );
        }

        #[test]
        fn missing_fields_are_empty() {
            let state = FormState::open(Schema::Lease, Map::new(), utc());
            assert_eq!(state.form().values(), vec!["", "", "", ""]);
            assert!(!state.is_valid());
        }

        #[test]
        fn keeps_seed() {
            let state = open_event();
            assert_eq!(state.seed().get("eventStatus"), Some(&json!("Waiting")));
        }
    }

    mod aggregation {
        use super::*;

        #[test]
        fn valid_seed_is_valid() {
            let state = open_event();
            assert!(state.is_valid());
            assert!(state.validity().invalid_keys().is_empty());
        }

        #[test]
        fn one_invalid_field_disables() {
            let mut state = open_event();
            state.set_value("eventOwner", "testowner##");
            assert!(!state.is_valid());
            assert_eq!(state.validity().invalid_keys(), vec!["eventOwner"]);
        }

        #[test]
        fn restoring_field_re_enables() {
            let mut state = open_event();
            state.set_value("maxAccounts", "5a");
            assert!(!state.is_valid());
            state.set_value("maxAccounts", "10");
            assert!(state.is_valid());
        }

        #[test]
        fn each_gating_field_independently_disables() {
            let bad = [
                ("eventOwner", "testowner##"),
                ("eventDateInput", "2021-01-01"),
                ("eventTimeInput", "10"),
                ("eventDays", "1x"),
                ("eventHours", "25"),
                ("maxAccounts", "5a"),
                ("eventBudget", "5a"),
            ];
            for (key, value) in bad {
                let mut state = open_event();
                state.set_value(key, value);
                assert!(!state.is_valid(), "{key}={value} should disable save");
                assert!(!state.validity().get(key), "{key} should be invalid");
            }
        }

        #[test]
        fn free_text_never_gates() {
            let mut state = open_event();
            state.set_value("eventName", "");
            assert!(state.is_valid());
            assert!(state.validity().get("eventName"));
        }

        #[test]
        fn empty_days_is_valid() {
            let mut state = open_event();
            state.set_value("eventDays", "");
            assert!(state.is_valid());
        }

        #[test]
        fn bad_date_also_invalidates_timestamp() {
            let mut state = open_event();
            state.set_value("eventDateInput", "2021-01-01");
            let validity = state.validity();
            assert!(!validity.get("eventDateInput"));
            assert!(!validity.get("eventOn"));
        }

        #[test]
        fn unknown_keys_are_implicitly_valid() {
            let state = open_event();
            assert!(state.validity().get("somethingElse"));
        }

        #[test]
        fn validated_agrees_with_is_valid() {
            let mut state = open_event();
            assert!(state.validated().is_some());
            state.set_value("eventHours", "25");
            assert!(state.validated().is_none());
            state.set_value("eventHours", "24");
            assert!(state.validated().is_some());
        }
    }

    mod timestamp {
        use super::*;

        #[test]
        fn composed_from_current_inputs() {
            let mut state = open_event();
            assert_eq!(state.timestamp(), Ok(event_on()));
            state.set_value("eventTimeInput", "11:00");
            assert_eq!(state.timestamp(), Ok(event_on() + 3600));
        }

        #[test]
        fn never_stale_after_invalid_edit() {
            let mut state = open_event();
            state.set_value("eventDateInput", "2099-01-01");
            assert!(state.timestamp().is_err());
            assert!(state.validated().is_none());
        }

        #[test]
        fn valid_form_carries_timestamp() {
            let state = open_event();
            let valid = state.validated().unwrap();
            assert_eq!(valid.timestamp(), event_on());
            assert_eq!(valid.schema(), Schema::Event);
            assert_eq!(valid.values().len(), Schema::Event.fields().len());
        }
    }
}
