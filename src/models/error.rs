use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error payload returned by the REST API.
#[derive(Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct ErrorResponse {
    /// Machine readable error code, e.g. `EMPTY_INPUT`.
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}
