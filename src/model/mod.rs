mod payload;
mod schema;
mod timestamp;
mod validation;

pub use payload::{EventUpdate, LeaseUpdate};
pub use schema::{FieldSpec, Schema};
pub use timestamp::{compose_timestamp, split_timestamp};
pub use validation::{
    FieldKind, FieldValue, ValidationError, validate_amount, validate_bounded, validate_count,
    validate_date, validate_email, validate_email_list, validate_time,
};
