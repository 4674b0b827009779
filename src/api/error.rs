use serde_json::Value;
use thiserror::Error;

/// Which side of the wire a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response: connection refused, DNS, timeout
    Transport,
    /// The service rejected the input field by field
    Validation,
    /// Any other non-2xx answer
    Server,
    /// A 2xx answer whose body did not have the expected shape
    Decode,
}

/// Error payload fields the service may put in a non-2xx body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
    /// Flattened field-validation messages, in field order
    pub field_errors: Vec<String>,
}

impl ErrorBody {
    /// Parse leniently; bodies that are not JSON objects yield an empty payload
    pub fn parse(raw: &str) -> Self {
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
            return Self::default();
        };

        let text_field = |name: &str| {
            map.get(name)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let mut field_errors = Vec::new();
        if let Some(errors) = map.get("errors") {
            collect_messages(errors, &mut field_errors);
        }

        Self {
            error: text_field("error"),
            message: text_field("message"),
            field_errors,
        }
    }
}

fn collect_messages(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) if !s.trim().is_empty() => out.push(s.trim().to_string()),
        Value::Array(items) => items.iter().for_each(|item| collect_messages(item, out)),
        Value::Object(fields) => fields.values().for_each(|item| collect_messages(item, out)),
        _ => {}
    }
}

/// Failure of a single request/response round trip
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),

    #[error("Request failed with status code {status}")]
    Status { status: u16, body: ErrorBody },

    #[error("{0}")]
    Decode(String),
}

impl ApiError {
    /// Map a reqwest failure (no usable response) into the taxonomy
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }

    /// Map a non-2xx response into the taxonomy
    pub fn from_status(status: u16, raw_body: &str) -> Self {
        ApiError::Status {
            status,
            body: ErrorBody::parse(raw_body),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) => ErrorKind::Transport,
            ApiError::Status { body, .. } if !body.field_errors.is_empty() => ErrorKind::Validation,
            ApiError::Status { .. } => ErrorKind::Server,
            ApiError::Decode(_) => ErrorKind::Decode,
        }
    }

    /// User-facing message: service `error`, then service `message`, then
    /// the transport-level text, then `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        let from_service = match self {
            ApiError::Status { body, .. } => body.error.clone().or_else(|| body.message.clone()),
            _ => None,
        };

        from_service
            .or_else(|| Some(self.to_string()).filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Field-validation messages joined into one line, if the service sent any
    pub fn validation_message(&self) -> Option<String> {
        match self {
            ApiError::Status { body, .. } if !body.field_errors.is_empty() => {
                Some(body.field_errors.join(", "))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_message_prefers_structured_error() {
        let err = ApiError::from_status(400, r#"{"error":"Email already registered","message":"Bad Request"}"#);
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.user_message("Registration failed"), "Email already registered");
    }

    #[test]
    fn test_message_falls_back_to_generic_message() {
        let err = ApiError::from_status(500, r#"{"message":"Internal failure"}"#);
        assert_eq!(err.user_message("Failed"), "Internal failure");
    }

    #[test]
    fn test_message_falls_back_to_status_text() {
        let err = ApiError::from_status(404, "<html>Not Found</html>");
        assert_eq!(err.user_message("Failed"), "Request failed with status code 404");

        let err = ApiError::from_status(502, r#"{"error":"   "}"#);
        assert_eq!(err.user_message("Failed"), "Request failed with status code 502");
    }

    #[test]
    fn test_message_uses_fallback_when_transport_text_is_empty() {
        let err = ApiError::Network(String::new());
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn test_validation_errors_are_flattened() {
        let err = ApiError::from_status(
            400,
            r#"{"title":"One or more validation errors occurred.",
                "errors":{"Title":["too short","must not be blank"],"Description":["required"]}}"#,
        );
        assert_eq!(err.kind(), ErrorKind::Validation);

        let joined = err.validation_message().unwrap();
        assert!(joined.contains("too short, must not be blank"));
        assert!(joined.contains("required"));
        assert_eq!(joined.matches(", ").count(), 2);
    }

    #[test]
    fn test_non_object_body_is_empty_payload() {
        assert_eq!(ErrorBody::parse("[1,2]"), ErrorBody::default());
        assert_eq!(ErrorBody::parse(""), ErrorBody::default());
    }
}
