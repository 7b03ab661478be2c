// Request adapter: builds a validator from route parameters and the parsed body

use crate::{Data, Error, ErrorCallback, FieldErrors, Registry, Result, ValidCallback, Validator};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// The parts of an HTTP request the validator needs
#[derive(Debug, Clone, Default)]
pub struct IncomingRequest {
    pub route_params: IndexMap<String, String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl IncomingRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.route_params.insert(key.into(), value.into());
        self
    }

    pub fn with_json(mut self, body: &Value) -> Self {
        self.content_type = Some(JSON_CONTENT_TYPE.to_string());
        self.body = body.to_string().into_bytes();
        self
    }

    pub fn with_form(mut self, body: impl Into<String>) -> Self {
        self.content_type = Some(FORM_CONTENT_TYPE.to_string());
        self.body = body.into().into_bytes();
        self
    }

    pub fn with_body(mut self, content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.content_type = Some(content_type.into());
        self.body = body.into();
        self
    }

    /// Media type without parameters, lowercased
    fn media_type(&self) -> Option<String> {
        self.content_type
            .as_deref()
            .and_then(|value| value.split(';').next())
            .map(|media| media.trim().to_ascii_lowercase())
    }

    /// Decode the body into a field mapping.
    ///
    /// Only JSON objects and form bodies produce fields. Other JSON values and
    /// unknown content types yield `None`.
    pub fn parsed_body(&self) -> Result<Option<Data>> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        match self.media_type().as_deref() {
            Some(JSON_CONTENT_TYPE) => {
                let value: Value = serde_json::from_slice(&self.body)
                    .map_err(|e| Error::InvalidBody(format!("Invalid JSON: {}", e)))?;
                match value {
                    Value::Object(map) => Ok(Some(map)),
                    _ => Ok(None),
                }
            }
            Some(FORM_CONTENT_TYPE) => decode_form(&self.body).map(Some),
            _ => Ok(None),
        }
    }

    /// Route parameters overlaid with the parsed body
    pub fn merge_data(&self) -> Result<Data> {
        let mut data: Data = self
            .route_params
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();

        if let Some(body) = self.parsed_body()? {
            data.extend(body);
        }

        Ok(data)
    }
}

/// `key[]=a&key[]=b` collects into a list; a repeated plain key keeps the last value
fn decode_form(body: &[u8]) -> Result<Data> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
        .map_err(|e| Error::InvalidBody(format!("Invalid form body: {}", e)))?;

    let mut data = Data::new();
    for (key, value) in pairs {
        match key.strip_suffix("[]") {
            Some(list_key) => {
                let entry = data
                    .entry(list_key.to_string())
                    .or_insert_with(|| Value::Array(Vec::new()));
                match entry {
                    Value::Array(items) => items.push(Value::String(value)),
                    other => *other = Value::Array(vec![Value::String(value)]),
                }
            }
            None => {
                data.insert(key, Value::String(value));
            }
        }
    }

    Ok(data)
}

/// A handler that supplies validation callbacks on demand
pub trait ValidatedHandler: Send + Sync + 'static {
    /// Callback run when validation succeeds
    fn data_valid_callback(&self) -> Option<ValidCallback> {
        None
    }

    /// Callback run when validation fails
    fn validation_error_callback(&self) -> Option<ErrorCallback> {
        None
    }
}

/// HTTP-style response describing validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// Builds validators for incoming requests and hands them to handlers
#[derive(Debug, Clone)]
pub struct ValidationPipe {
    registry: Arc<Registry>,
}

impl ValidationPipe {
    pub fn new() -> Self {
        Self::with_registry(Registry::shared())
    }

    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Create a validator over the merged request data whose callbacks are
    /// fetched from `handler` on first validation
    pub fn validator_for<H: ValidatedHandler>(
        &self,
        handler: &Arc<H>,
        request: &IncomingRequest,
    ) -> Result<Validator> {
        let data = request.merge_data()?;
        debug!("Validating request with {} field(s)", data.len());

        let valid_handler = Arc::clone(handler);
        let error_handler = Arc::clone(handler);

        Ok(
            Validator::with_registry(data, Arc::clone(&self.registry)).with_providers(
                Some(Box::new(move || valid_handler.data_valid_callback())),
                Some(Box::new(move || error_handler.validation_error_callback())),
            ),
        )
    }

    /// Invoke `f` with the handler, the request and a prepared validator
    pub fn dispatch<H, F, R>(&self, handler: Arc<H>, request: &IncomingRequest, f: F) -> Result<R>
    where
        H: ValidatedHandler,
        F: FnOnce(&H, &IncomingRequest, Validator) -> R,
    {
        let validator = self.validator_for(&handler, request)?;
        Ok(f(&handler, request, validator))
    }

    /// Transform field errors to a JSON error response
    pub fn error_response(errors: &FieldErrors) -> ErrorResponse {
        ErrorResponse {
            status: 400,
            headers: HashMap::from([(
                "Content-Type".to_string(),
                JSON_CONTENT_TYPE.to_string(),
            )]),
            body: errors.to_json().to_string().into_bytes(),
        }
    }
}

impl Default for ValidationPipe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct SignupHandler {
        log: Arc<Mutex<Vec<String>>>,
        fetched: Arc<Mutex<usize>>,
    }

    impl ValidatedHandler for SignupHandler {
        fn data_valid_callback(&self) -> Option<ValidCallback> {
            *self.fetched.lock().unwrap() += 1;
            let log = Arc::clone(&self.log);
            Some(Box::new(move |validator: &Validator| {
                log.lock().unwrap().push(format!("valid {}", validator.get("user")));
            }))
        }

        fn validation_error_callback(&self) -> Option<ErrorCallback> {
            let log = Arc::clone(&self.log);
            Some(Box::new(move |errors: &[crate::FieldError]| {
                log.lock().unwrap().push(format!("invalid {}", errors[0]));
            }))
        }
    }

    #[test]
    fn test_merge_json_over_route_params() {
        let request = IncomingRequest::new()
            .with_route_param("id", "7")
            .with_route_param("lang", "en")
            .with_json(&json!({"lang": "de", "tags": ["a"]}));

        let data = request.merge_data().unwrap();
        assert_eq!(Value::Object(data), json!({"id": "7", "lang": "de", "tags": ["a"]}));
    }

    #[test]
    fn test_non_object_bodies_contribute_nothing() {
        let request = IncomingRequest::new()
            .with_route_param("id", "7")
            .with_json(&json!([1, 2]));
        assert_eq!(Value::Object(request.merge_data().unwrap()), json!({"id": "7"}));

        let request = IncomingRequest::new().with_body("text/plain", "id=9");
        assert!(request.merge_data().unwrap().is_empty());

        assert!(IncomingRequest::new().merge_data().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_body() {
        let request = IncomingRequest::new().with_body("application/json; charset=utf-8", "{oops");
        assert!(matches!(request.merge_data(), Err(Error::InvalidBody(_))));
    }

    #[test]
    fn test_form_body() {
        let request = IncomingRequest::new().with_form("name=Ann+Lee&tag[]=a&tag[]=b&name=Bo");
        let data = request.merge_data().unwrap();

        assert_eq!(data["name"], json!("Bo"));
        assert_eq!(data["tag"], json!(["a", "b"]));
    }

    #[test]
    fn test_dispatch_resolves_handler_callbacks_once() {
        let handler = Arc::new(SignupHandler::default());
        let pipe = ValidationPipe::new();
        let request = IncomingRequest::new().with_json(&json!({"user": " ann "}));

        let valid = pipe
            .dispatch(Arc::clone(&handler), &request, |_, _, mut validator| {
                validator.add_rule_descriptor(Some("user"), "required", None).unwrap();
                let first = validator.validate(None);
                let second = validator.validate(None);
                first && second
            })
            .unwrap();

        assert!(valid);
        assert_eq!(*handler.fetched.lock().unwrap(), 1);
        assert_eq!(*handler.log.lock().unwrap(), vec!["valid \"ann\"", "valid \"ann\""]);
    }

    #[test]
    fn test_error_callback_from_handler() {
        let handler = Arc::new(SignupHandler::default());
        let request = IncomingRequest::new().with_route_param("user", "");

        let mut validator = ValidationPipe::new().validator_for(&handler, &request).unwrap();
        validator.add_rule_descriptor(Some("user"), "required", None).unwrap();

        assert!(!validator.validate(None));
        assert_eq!(*handler.log.lock().unwrap(), vec!["invalid user: FIELD_REQUIRED_ERROR"]);
    }

    #[test]
    fn test_error_response() {
        let error = crate::FieldError::new("email", "EMAIL_NOT_VALID_ERROR");
        let errors = FieldErrors::new(vec![error]);
        let response = ValidationPipe::error_response(&errors);

        assert_eq!(response.status, 400);
        assert_eq!(response.headers["Content-Type"], "application/json");
        let body: Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["errors"][0]["field_name"], json!("email"));
    }
}
