//! Compact rule and filter descriptors
//!
//! A descriptor names a rule or filter and carries its parameters in one
//! string:
//!
//! ```text
//! name[:param1[=value1][|param2[=value2]...]]
//! ```
//!
//! A parameter without `=value` is the flag `true`. A value containing `,`
//! becomes a list, except for the `exp` parameter which holds a regular
//! expression.
//!
//! ```
//! use sieve_validation::{Descriptor, ParamValue};
//!
//! let descriptor = Descriptor::parse("text:required|min=3|tags=b,i").unwrap();
//! assert_eq!(descriptor.class_name, "Text");
//! assert_eq!(descriptor.params.get("required"), Some(&ParamValue::Flag(true)));
//! assert_eq!(descriptor.params.get_str("min"), Some("3"));
//! assert_eq!(descriptor.params.get("tags"), Some(&ParamValue::from(vec!["b", "i"])));
//! ```

use crate::params::{PATTERN_PARAM, ParamValue, Params};
use crate::{Error, Result};
use std::str::FromStr;

/// Separates the identifier from the parameter string
pub const NAME_SEPARATOR: char = ':';

/// Separates parameters
pub const PARAM_SEPARATOR: char = '|';

/// Separates a parameter key from its value
pub const VALUE_SEPARATOR: char = '=';

/// Separates list items inside a value
pub const LIST_SEPARATOR: char = ',';

/// A parsed descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    /// Identifier with its first letter capitalized (`htmlTags` -> `HtmlTags`)
    pub class_name: String,
    pub params: Params,
}

impl Descriptor {
    /// Parse a descriptor string
    pub fn parse(descriptor: &str) -> Result<Self> {
        let trimmed = descriptor.trim();
        let (identifier, raw_params) = match trimmed.split_once(NAME_SEPARATOR) {
            Some((identifier, raw_params)) => (identifier, raw_params),
            None => (trimmed, ""),
        };

        if identifier.is_empty() {
            return Err(Error::malformed(descriptor, "missing identifier"));
        }
        if identifier.chars().any(char::is_whitespace) {
            return Err(Error::malformed(descriptor, "identifier contains whitespace"));
        }

        Ok(Self {
            class_name: class_name(identifier),
            params: parse_params(descriptor, raw_params)?,
        })
    }
}

impl FromStr for Descriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Capitalize an identifier into its registry class name
pub fn class_name(identifier: &str) -> String {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn parse_params(descriptor: &str, raw: &str) -> Result<Params> {
    let mut params = Params::new();
    if raw.is_empty() {
        return Ok(params);
    }

    for token in raw.split(PARAM_SEPARATOR) {
        let (key, value) = parse_param(descriptor, token)?;
        params.insert(key, value);
    }

    Ok(params)
}

fn parse_param(descriptor: &str, token: &str) -> Result<(String, ParamValue)> {
    let (key, value) = match token.split_once(VALUE_SEPARATOR) {
        Some((key, value)) => (key, Some(value)),
        None => (token, None),
    };

    if key.is_empty() {
        return Err(Error::malformed(
            descriptor,
            format!("empty parameter name in '{}'", token),
        ));
    }

    let value = match value {
        None => ParamValue::Flag(true),
        Some(value) if key != PATTERN_PARAM && value.contains(LIST_SEPARATOR) => {
            ParamValue::List(value.split(LIST_SEPARATOR).map(String::from).collect())
        }
        Some(value) => ParamValue::Text(value.to_string()),
    };

    Ok((key.to_string(), value))
}
