//! Descriptor-driven validation and sanitization
//!
//! Attach filters and rules to the fields of a flat data mapping, then run a
//! filter pass followed by a validation pass that reports every failing rule.
//! Filters and rules are built from short descriptors such as
//! `regexp:exp=/^[0-9]+$/` or `text:required|min=2|max=64`, resolved through
//! a [`Registry`] of named factories.
//!
//! # Examples
//!
//! ## Basic Validation
//!
//! ```
//! use sieve_validation::Validator;
//! use serde_json::json;
//!
//! let data = json!({"name": "  Ann  ", "age": "forty"});
//! let mut validator = Validator::new(data.as_object().cloned().unwrap());
//!
//! validator
//!     .add_filter_descriptor(None, "trim").unwrap()
//!     .add_rule_descriptor(Some("name"), "text:required|min=2", None).unwrap()
//!     .add_rule_descriptor(Some("age"), "integer", Some("AGE_NOT_A_NUMBER")).unwrap();
//!
//! assert!(!validator.filter_and_validate(None));
//! assert_eq!(validator.get("name"), json!("Ann"));
//!
//! let errors = validator.field_errors();
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors.get_field_errors("age")[0].error_code, "AGE_NOT_A_NUMBER");
//! ```
//!
//! ## Custom Rules
//!
//! ```
//! use sieve_validation::{CallbackRule, Registry, Validator};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let registry = Registry::new().with_rule("Even", |_, params| {
//!     Ok(Box::new(CallbackRule::with_params("Even", "NOT_EVEN_ERROR", params, |value| {
//!         value.as_i64().is_some_and(|n| n % 2 == 0)
//!     })))
//! });
//!
//! let data = json!({"count": 3}).as_object().cloned().unwrap();
//! let mut validator = Validator::with_registry(data, Arc::new(registry));
//! validator.add_rule_descriptor(Some("count"), "even", None).unwrap();
//!
//! assert!(!validator.validate(None));
//! assert_eq!(validator.errors()[0].error_code, "NOT_EVEN_ERROR");
//! ```
//!
//! ## Rule Sets
//!
//! ```
//! use sieve_validation::RuleSetConfig;
//! use serde_json::json;
//!
//! let config = RuleSetConfig::from_toml_str(r#"
//!     [fields.code]
//!     filters = ["upperCase"]
//!     rules = ["regexp:exp=/^[A-Z]{3}$/|required"]
//! "#).unwrap();
//!
//! let data = json!({"code": "abc"});
//! let mut validator = config.validator(data.as_object().cloned().unwrap()).unwrap();
//! assert!(validator.filter_and_validate(None));
//! ```

pub mod builder;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod errors;
pub mod filters;
pub mod format;
mod html;
pub mod params;
pub mod pipe;
pub mod registry;
pub mod rules;
pub mod traits;
pub mod validator;

pub use builder::{FilterBuilder, RuleBuilder};
pub use config::{FieldConfig, FileFormat, RuleEntry, RuleSetConfig};
pub use descriptor::Descriptor;
pub use error::{Error, Result};
pub use errors::{FieldError, FieldErrors};
pub use filters::{
    EmptyToNull, FnFilter, HtmlChars, LowerCase, Sanitize, SpecialcharsDecode, Trim, UpperCase,
};
pub use format::Format;
pub use params::{ParamValue, Params};
pub use pipe::{ErrorResponse, IncomingRequest, ValidatedHandler, ValidationPipe};
pub use registry::{FilterFactory, Registry, RuleFactory};
pub use rules::{
    CallbackRule, Exists, FormatRule, HtmlTags, MemoryStore, RecordStore, Regexp, Required, Text,
};
pub use traits::{Filter, Rule, RuleKind, RuleMeta, is_empty_value};
pub use validator::{CallbackProvider, Data, ErrorCallback, ValidCallback, Validator, WILDCARD};
