//! Engine error types
//!
//! These cover configuration and construction problems only. A value that
//! fails a rule is reported as a [`FieldError`](crate::FieldError), never as an
//! [`Error`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The descriptor string does not follow `name[:key[=value][|key[=value]]...]`
    #[error("Malformed descriptor '{descriptor}': {reason}")]
    MalformedDescriptor { descriptor: String, reason: String },

    /// No rule is registered under this class name
    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    /// No filter is registered under this class name
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// A parameter was missing or could not be interpreted
    #[error("Invalid parameter '{param}' for {name}: {reason}")]
    InvalidParameter {
        name: String,
        param: String,
        reason: String,
    },

    /// A rule referenced a record store the registry does not know
    #[error("Unknown record store: {0}")]
    UnknownStore(String),

    /// The request body could not be decoded into a field mapping
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Failed to load rule set: {0}")]
    ConfigLoad(String),

    #[error("Failed to parse rule set: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(descriptor: &str, reason: impl Into<String>) -> Self {
        Error::MalformedDescriptor {
            descriptor: descriptor.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_param(name: &str, param: &str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name: name.to_string(),
            param: param.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
