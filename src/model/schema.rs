use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::FieldKind;

/// Static description of one editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name of the field in the seed item and payload.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Hint shown while the field is empty.
    pub placeholder: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn new(
        key: &'static str,
        label: &'static str,
        placeholder: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            key,
            label,
            placeholder,
            kind,
        }
    }
}

static EVENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("eventName", "Event name", "", FieldKind::Text),
    FieldSpec::new(
        "eventOwner",
        "Event owner email address",
        "owner@example.org",
        FieldKind::Email,
    ),
    FieldSpec::new("eventDateInput", "Event date", "YYYY/MM/DD", FieldKind::Date),
    FieldSpec::new("eventTimeInput", "Event time", "00:00", FieldKind::Time),
    FieldSpec::new(
        "eventDays",
        "Duration (days)",
        "0",
        FieldKind::Count { allow_empty: true },
    ),
    FieldSpec::new(
        "eventHours",
        "Duration (hours)",
        "8",
        FieldKind::Bounded { max: 24 },
    ),
    FieldSpec::new(
        "maxAccounts",
        "Maximum number of AWS accounts",
        "0",
        FieldKind::Count { allow_empty: false },
    ),
    FieldSpec::new("eventBudget", "Budget in USD", "0", FieldKind::Amount),
];

static LEASE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("budgetAmount", "Budget in USD", "0", FieldKind::Amount),
    FieldSpec::new(
        "budgetNotificationEmails",
        "Budget notification emails",
        "a@example.org, b@example.org",
        FieldKind::EmailList,
    ),
    FieldSpec::new("expiresDateInput", "Expiry date", "YYYY/MM/DD", FieldKind::Date),
    FieldSpec::new("expiresTimeInput", "Expiry time", "00:00", FieldKind::Time),
];

/// The resource a modal edits, and with it the field set it validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    Event,
    Lease,
}

impl Schema {
    /// Editable fields in display order.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Event => EVENT_FIELDS,
            Self::Lease => LEASE_FIELDS,
        }
    }

    /// Looks up a field by its wire name.
    pub fn field(self, key: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|spec| spec.key == key)
    }

    /// Key of the raw date input.
    pub fn date_key(self) -> &'static str {
        match self {
            Self::Event => "eventDateInput",
            Self::Lease => "expiresDateInput",
        }
    }

    /// Key of the raw time input.
    pub fn time_key(self) -> &'static str {
        match self {
            Self::Event => "eventTimeInput",
            Self::Lease => "expiresTimeInput",
        }
    }

    /// Key of the epoch timestamp derived from the date and time inputs.
    pub fn timestamp_key(self) -> &'static str {
        match self {
            Self::Event => "eventOn",
            Self::Lease => "expiresOn",
        }
    }

    /// Seed fields shown read-only in the modal header.
    pub fn display_keys(self) -> &'static [&'static str] {
        match self {
            Self::Event => &["id", "eventStatus"],
            Self::Lease => &["user", "eventId", "leaseStatusReason"],
        }
    }

    /// Whether saving must pass through the typed confirmation step.
    pub fn requires_confirmation(self) -> bool {
        matches!(self, Self::Lease)
    }

    /// Modal title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Event => "Edit Event",
            Self::Lease => "Edit Lease",
        }
    }
}

#[mutants::skip]
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event => f.write_str("event"),
            Self::Lease => f.write_str("lease"),
        }
    }
}
