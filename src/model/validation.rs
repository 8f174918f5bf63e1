use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use thiserror::Error;

/// Validation errors for raw form input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("email address cannot be empty")]
    EmptyEmail,
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("not a whole number: {0}")]
    InvalidInteger(String),
    #[error("{value} is outside 0..={max}")]
    OutOfRange { value: u32, max: u32 },
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("date must be YYYY/MM/DD: {0}")]
    InvalidDate(String),
    #[error("time must be HH:MM: {0}")]
    InvalidTime(String),
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$").expect("valid hardcoded regex")
});

// `\d` would admit non-ASCII digits.
static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid hardcoded regex"));

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+(\.[0-9]*)?|\.[0-9]+)$").expect("valid hardcoded regex")
});

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}/[0-9]{2}/[0-9]{2}$").expect("valid hardcoded regex"));

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid hardcoded regex"));

/// Validates an email address of the form `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    match email {
        "" => Err(ValidationError::EmptyEmail),
        s if EMAIL_RE.is_match(s) => Ok(()),
        _ => Err(ValidationError::InvalidEmail(email.to_string())),
    }
}

/// Parses a comma-separated list of email addresses.
///
/// Blank entries are skipped, so an empty string yields an empty list.
pub fn validate_email_list(raw: &str) -> Result<Vec<String>, ValidationError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| validate_email(s).map(|()| s.to_string()))
        .collect()
}

/// Parses a non-negative whole number made only of ASCII digits.
///
/// With `allow_empty`, an empty string means zero.
pub fn validate_count(raw: &str, allow_empty: bool) -> Result<u32, ValidationError> {
    if raw.is_empty() && allow_empty {
        return Ok(0);
    }
    if !DIGITS_RE.is_match(raw) {
        return Err(ValidationError::InvalidInteger(raw.to_string()));
    }
    raw.parse()
        .map_err(|_| ValidationError::InvalidInteger(raw.to_string()))
}

/// Parses a whole number that must lie in `0..=max`.
pub fn validate_bounded(raw: &str, max: u32) -> Result<u32, ValidationError> {
    let value = validate_count(raw, false)?;
    if value > max {
        return Err(ValidationError::OutOfRange { value, max });
    }
    Ok(value)
}

/// Parses a non-negative decimal amount with at most one decimal point.
pub fn validate_amount(raw: &str) -> Result<f64, ValidationError> {
    if !AMOUNT_RE.is_match(raw) {
        return Err(ValidationError::InvalidAmount(raw.to_string()));
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::InvalidAmount(raw.to_string())),
    }
}

/// Parses a calendar date in the `YYYY/MM/DD` display mask.
///
/// `2021-01-01` is rejected even though it names a real day.
pub fn validate_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    if !DATE_RE.is_match(raw) {
        return Err(ValidationError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y/%m/%d")
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

/// Parses a 24-hour `HH:MM` time.
pub fn validate_time(raw: &str) -> Result<NaiveTime, ValidationError> {
    if !TIME_RE.is_match(raw) {
        return Err(ValidationError::InvalidTime(raw.to_string()));
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| ValidationError::InvalidTime(raw.to_string()))
}

/// The validator applied to a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; never blocks submission.
    Text,
    Email,
    EmailList,
    /// Non-negative integer (days, max accounts).
    Count { allow_empty: bool },
    /// Integer in `0..=max` (hours).
    Bounded { max: u32 },
    /// Decimal amount (budget).
    Amount,
    Date,
    Time,
}

/// A raw field value after successful validation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Emails(Vec<String>),
    Count(u32),
    Amount(f64),
    Date(NaiveDate),
    Time(NaiveTime),
}

impl FieldKind {
    /// Parses `raw` with this kind's validator.
    pub fn parse(self, raw: &str) -> Result<FieldValue, ValidationError> {
        match self {
            Self::Text => Ok(FieldValue::Text(raw.to_string())),
            Self::Email => validate_email(raw).map(|()| FieldValue::Text(raw.to_string())),
            Self::EmailList => validate_email_list(raw).map(FieldValue::Emails),
            Self::Count { allow_empty } => validate_count(raw, allow_empty).map(FieldValue::Count),
            Self::Bounded { max } => validate_bounded(raw, max).map(FieldValue::Count),
            Self::Amount => validate_amount(raw).map(FieldValue::Amount),
            Self::Date => validate_date(raw).map(FieldValue::Date),
            Self::Time => validate_time(raw).map(FieldValue::Time),
        }
    }

    /// Returns `true` if `raw` passes this kind's validator.
    pub fn is_valid(self, raw: &str) -> bool {
        self.parse(raw).is_ok()
    }

    /// Returns `true` if this kind takes part in the submit gate.
    pub fn is_gating(self) -> bool {
        !matches!(self, Self::Text)
    }
}
