//! Submission: payload assembly and hand-off to the external update operation.
//!
//! The payload is the seed item with every edited field replaced by its parsed
//! value and the raw date/time inputs replaced by the composed timestamp.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::form::ValidForm;
use crate::model::{EventUpdate, FieldValue, LeaseUpdate, Schema};

/// A payload that does not fit the update operation's contract.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// A seed field has the wrong JSON type (e.g. a numeric `id`).
    #[error("{schema} payload does not match the update contract: {source}")]
    Contract {
        schema: Schema,
        #[source]
        source: serde_json::Error,
    },
}

/// The outgoing update, one variant per resource kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Event(EventUpdate),
    Lease(LeaseUpdate),
}

impl Payload {
    /// Builds the payload from a validated form.
    pub fn assemble(form: ValidForm<'_>) -> Result<Self, SubmitError> {
        let schema = form.schema();
        let mut map = form.seed().clone();
        map.remove(schema.date_key());
        map.remove(schema.time_key());
        for (key, value) in form.values() {
            if let Some(json) = to_json(value) {
                map.insert((*key).to_string(), json);
            }
        }
        map.insert(
            schema.timestamp_key().to_string(),
            Value::from(form.timestamp()),
        );

        let object = Value::Object(map);
        let result = match schema {
            Schema::Event => serde_json::from_value(object).map(Payload::Event),
            Schema::Lease => serde_json::from_value(object).map(Payload::Lease),
        };
        result.map_err(|source| SubmitError::Contract { schema, source })
    }

    /// The resource kind this payload updates.
    pub fn schema(&self) -> Schema {
        match self {
            Self::Event(_) => Schema::Event,
            Self::Lease(_) => Schema::Lease,
        }
    }
}

/// Parsed field value as it appears on the wire. Date and time halves have
/// no wire form of their own; the timestamp replaces them.
fn to_json(value: &FieldValue) -> Option<Value> {
    match value {
        FieldValue::Text(s) => Some(Value::String(s.clone())),
        FieldValue::Emails(list) => Some(Value::Array(
            list.iter().cloned().map(Value::String).collect(),
        )),
        FieldValue::Count(n) => Some(Value::from(*n)),
        FieldValue::Amount(amount) => Some(Value::from(*amount)),
        FieldValue::Date(_) | FieldValue::Time(_) => None,
    }
}

/// The external update operations. Their effects are opaque to the modal.
pub trait Updater {
    type Error;

    fn update_event(&mut self, event: &EventUpdate) -> Result<(), Self::Error>;

    fn update_lease(&mut self, lease: &LeaseUpdate) -> Result<(), Self::Error>;
}

/// Hands `payload` to the matching update operation, exactly once.
pub fn submit<U: Updater + ?Sized>(payload: &Payload, updater: &mut U) -> Result<(), U::Error> {
    tracing::info!(schema = %payload.schema(), "submitting update");
    match payload {
        Payload::Event(event) => updater.update_event(event),
        Payload::Lease(lease) => updater.update_lease(lease),
    }
}

/// Collects submitted payloads in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<EventUpdate>,
    pub leases: Vec<LeaseUpdate>,
}

#[cfg(test)]
impl Updater for Recorder {
    type Error = std::convert::Infallible;

    fn update_event(&mut self, event: &EventUpdate) -> Result<(), Self::Error> {
        self.events.push(event.clone());
        Ok(())
    }

    fn update_lease(&mut self, lease: &LeaseUpdate) -> Result<(), Self::Error> {
        self.leases.push(lease.clone());
        Ok(())
    }
}

/// Extracts the JSON object from a seed value.
pub fn seed_object(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
