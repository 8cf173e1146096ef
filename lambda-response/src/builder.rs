use crate::aws::lambda_events::response::{GatewayResponse, Headers};
use crate::errors::{ResponseError, ResponseResult, ToResponseError};
use crate::options::{ResponseOptions, SendOptions};

use lambda_runtime::Error;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Error-first completion callback supplied by the invocation context
pub type Completion = Arc<dyn Fn(Option<Error>, GatewayResponse) + Send + Sync>;

#[derive(Default)]
pub struct ResponseBuilderConfig {
    pub completion: Option<Completion>,
}

impl ResponseBuilderConfig {
    pub fn new<F>(completion: F) -> Self
    where
        F: Fn(Option<Error>, GatewayResponse) + Send + Sync + 'static,
    {
        Self {
            completion: Some(Arc::new(completion)),
        }
    }
}

/// Formats gateway responses and hands them to the completion callback
#[derive(Clone)]
pub struct ResponseBuilder {
    completion: Completion,
}

impl fmt::Debug for ResponseBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBuilder").finish_non_exhaustive()
    }
}

impl ResponseBuilder {
    pub fn new(config: ResponseBuilderConfig) -> ResponseResult<Self> {
        let completion = config
            .completion
            .ok_or_else(|| ResponseError::invalid_argument("options.completion is not defined"))?;
        Ok(Self { completion })
    }

    pub fn from_fn<F>(completion: F) -> Self
    where
        F: Fn(Option<Error>, GatewayResponse) + Send + Sync + 'static,
    {
        Self {
            completion: Arc::new(completion),
        }
    }

    /// Reply with 200
    #[instrument(skip_all, name = "lambda_response.builder.success")]
    pub async fn success(&self, options: ResponseOptions) -> ResponseResult<()> {
        self.send(options.with_status(200)).await
    }

    /// Reply with 500
    #[instrument(skip_all, name = "lambda_response.builder.error")]
    pub async fn error(&self, options: ResponseOptions) -> ResponseResult<()> {
        self.send(options.with_status(500)).await
    }

    #[instrument(skip_all, name = "lambda_response.builder.custom")]
    pub async fn custom(&self, options: SendOptions) -> ResponseResult<()> {
        self.send(options).await
    }

    /// Validates the options, builds the response and invokes the completion.
    /// Nothing is sent when validation fails.
    #[instrument(skip_all, name = "lambda_response.builder.send", fields(status = ?options.status))]
    pub async fn send(&self, options: SendOptions) -> ResponseResult<()> {
        let response = build_response(options)?;
        debug!(
            "completing with status {} (headers: {}, body: {})",
            response.status_code,
            response.headers.is_some(),
            response.body.is_some()
        );
        (self.completion)(None, response);
        Ok(())
    }
}

fn build_response(options: SendOptions) -> ResponseResult<GatewayResponse> {
    let status_code = match options.status {
        Some(status) if status != 0 => status,
        _ => return Err(ResponseError::invalid_argument("options.status is not defined")),
    };

    let mut response = GatewayResponse::new(status_code);
    response.headers = options.headers.filter(|headers: &Headers| !headers.is_empty());
    response.body = match options.body {
        Some(body) => serialize_body(body)?,
        None => None,
    };
    Ok(response)
}

/// Strings pass through verbatim; other values become compact JSON.
/// Empty-like values produce no body.
fn serialize_body(body: Value) -> ResponseResult<Option<String>> {
    match body {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(text) if text.is_empty() => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(ref n) if n.as_f64() == Some(0.0) => Ok(None),
        other => serde_json::to_string(&other)
            .map(Some)
            .map_err(|e| e.to_response_error()),
    }
}
