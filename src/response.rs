//! The JSON envelope shared by every API response.

use serde::Serialize;

/// The body of every API response.
///
/// Successful responses set `success` to `true` and carry `data` and/or a
/// `message`. Failed responses set `success` to `false` and carry either a
/// single `error` or a list of validation `errors`.
#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct ApiResponse<T = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    /// A successful response wrapping `data`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            count: None,
            error: None,
            errors: None,
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl ApiResponse {
    /// A successful response with only a message.
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_owned()),
            data: None,
            count: None,
            error: None,
            errors: None,
        }
    }

    /// A failed response with a single error message.
    pub fn error(error: &str) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            count: None,
            error: Some(error.to_owned()),
            errors: None,
        }
    }

    /// A failed response listing every validation error.
    pub fn errors(errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            count: None,
            error: None,
            errors: Some(errors),
        }
    }
}
