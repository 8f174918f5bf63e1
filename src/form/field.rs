//! Raw text values for the fields of one schema.

use crate::model::{FieldSpec, ValidationError};

/// A single field within a [`Form`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Static description: key, label, validator kind.
    pub spec: &'static FieldSpec,
    /// Current raw text.
    pub value: String,
}

impl FormField {
    /// Creates an empty field for `spec`.
    pub fn new(spec: &'static FieldSpec) -> Self {
        Self {
            spec,
            value: String::new(),
        }
    }

    /// Validation error for the current text, if any.
    pub fn error(&self) -> Option<ValidationError> {
        self.spec.kind.parse(&self.value).err()
    }

    /// Returns `true` if the current text passes the field's validator.
    pub fn is_valid(&self) -> bool {
        self.spec.kind.is_valid(&self.value)
    }
}

/// An ordered set of raw field values.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    fields: Vec<FormField>,
}

impl Form {
    /// Creates a form with one empty field per spec.
    pub fn new(specs: &'static [FieldSpec]) -> Self {
        Self {
            fields: specs.iter().map(FormField::new).collect(),
        }
    }

    /// Returns the value of the field with `key`, or an empty string if there is none.
    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.spec.key == key)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    /// Replaces the value of the field with `key`.
    ///
    /// Returns `false` if the form has no such field.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.spec.key == key) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Returns the field at `index`.
    pub fn field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }

    /// Returns all field values as a vector of string slices.
    pub fn values(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.value.as_str()).collect()
    }

    /// Returns a reference to the fields.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
