// Sieve - declarative filtering and validation for request payloads
//
// Filters and rules are attached to fields from compact descriptors such as
// `text:required|max=64`, then run as a filter pass and a validation pass.

// Re-export the engine
pub use sieve_validation::*;

// Re-export the value type fields are stored as
pub use serde_json::{Value, json};

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        CallbackRule,
        Data,
        Error,
        FieldError,
        FieldErrors,
        Filter,
        FilterBuilder,
        FnFilter,
        IncomingRequest,
        Params,
        Registry,
        Result,
        Rule,
        RuleBuilder,
        RuleSetConfig,
        ValidatedHandler,
        ValidationPipe,
        Validator,
        Value,
        json,
    };
}
