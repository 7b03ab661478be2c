// Field validation errors

use crate::Params;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rule that rejected a field's value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name that failed validation
    pub field_name: String,

    /// Error code of the failing rule
    pub error_code: String,

    /// Parameters for rendering the error message
    pub params: Params,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field_name: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            error_code: error_code.into(),
            params: Params::new(),
        }
    }

    /// Set the error parameters
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Render as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "field_name": self.field_name,
            "error_code": self.error_code,
            "params": self.params.to_json(),
        })
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field_name, self.error_code)
    }
}

impl std::error::Error for FieldError {}

/// Collection of field errors, in the order they were reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub errors: Vec<FieldError>,
}

impl FieldErrors {
    /// Create a new field errors collection
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Add an error
    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Get errors for a specific field
    pub fn get_field_errors(&self, field: &str) -> Vec<&FieldError> {
        self.errors
            .iter()
            .filter(|e| e.field_name == field)
            .collect()
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "errors": self.errors.iter().map(FieldError::to_json).collect::<Vec<_>>()
        })
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl From<Vec<FieldError>> for FieldErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::new(errors)
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
