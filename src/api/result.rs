use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::debug;

use super::error::ApiError;

/// Outcome of a gateway call
///
/// Serializes as `{"success":true,"data":...}` or `{"success":false,"error":"..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    Success { data: T },
    Failure { error: String },
}

impl<T> ApiResult<T> {
    pub fn success(data: T) -> Self {
        ApiResult::Success { data }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ApiResult::Failure {
            error: error.into(),
        }
    }

    /// Normalize a round trip, resolving the error message with `fallback`
    /// as the last resort
    pub fn from_outcome(outcome: Result<T, ApiError>, fallback: &str) -> Self {
        match outcome {
            Ok(data) => ApiResult::success(data),
            Err(err) => {
                let message = err.user_message(fallback);
                debug!(kind = ?err.kind(), %message, "{}", fallback);
                ApiResult::failure(message)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResult::Success { data } => Some(data),
            ApiResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ApiResult::Success { .. } => None,
            ApiResult::Failure { error } => Some(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            ApiResult::Success { data } => ApiResult::Success { data: f(data) },
            ApiResult::Failure { error } => ApiResult::Failure { error },
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            ApiResult::Success { data } => Ok(data),
            ApiResult::Failure { error } => Err(error),
        }
    }
}

impl<T: Serialize> Serialize for ApiResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut envelope = serializer.serialize_struct("ApiResult", 2)?;
        match self {
            ApiResult::Success { data } => {
                envelope.serialize_field("success", &true)?;
                envelope.serialize_field("data", data)?;
            }
            ApiResult::Failure { error } => {
                envelope.serialize_field("success", &false)?;
                envelope.serialize_field("error", error)?;
            }
        }
        envelope.end()
    }
}
