use thiserror::Error;

/// Error returned by response construction and formatting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    // Validation errors
    #[error("{0}")]
    InvalidArgument(String),
}

impl ResponseError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ResponseError::InvalidArgument(message.into())
    }

    /// Convert to HTTP status code
    pub fn status_code(&self) -> i64 {
        match self {
            // 400 Bad Request
            ResponseError::InvalidArgument(_) => 400,
        }
    }
}

/// Result type for response operations
pub type ResponseResult<T> = Result<T, ResponseError>;

/// Convert specific error types to ResponseError
pub trait ToResponseError {
    fn to_response_error(self) -> ResponseError;
}

impl ToResponseError for serde_json::Error {
    fn to_response_error(self) -> ResponseError {
        ResponseError::InvalidArgument(format!("JSON serialization error: {}", self))
    }
}

impl ToResponseError for aws_lambda_events::http::header::InvalidHeaderName {
    fn to_response_error(self) -> ResponseError {
        ResponseError::InvalidArgument(format!("invalid header name: {}", self))
    }
}

impl ToResponseError for aws_lambda_events::http::header::InvalidHeaderValue {
    fn to_response_error(self) -> ResponseError {
        ResponseError::InvalidArgument(format!("invalid header value: {}", self))
    }
}
