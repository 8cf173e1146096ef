use super::response::{apigw_response, GatewayResponse};
use crate::builder::ResponseBuilder;
use crate::errors::{ResponseError, ResponseResult};
use crate::options::{ResponseOptions, SendOptions};

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use tokio::sync::oneshot;
use tracing::{info, instrument, warn};

pub struct LambdaEventRequestHandler {}

impl LambdaEventRequestHandler {
    /// Request body as JSON, or as a JSON string when it does not parse
    pub fn body_value(request: &ApiGatewayProxyRequest) -> Option<Value> {
        let body = request.body.as_deref().filter(|body| !body.is_empty())?;
        Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
    }

    /// `status` query string parameter, if present
    pub fn status_param(request: &ApiGatewayProxyRequest) -> ResponseResult<Option<i64>> {
        match request.query_string_parameters.first("status") {
            Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
                ResponseError::InvalidArgument(format!("status {} is not a number", raw))
            }),
            None => Ok(None),
        }
    }

    /// Runs `handler` with a builder whose completion feeds the Lambda return value.
    /// A handler failing with `ResponseError` is answered with that error's status,
    /// any other failure, or a handler that never completes, with a 500.
    #[instrument(skip(event, handler), name = "aws.lambda_events.request.respond_with")]
    pub async fn respond_with<F, Fut>(
        event: LambdaEvent<ApiGatewayProxyRequest>,
        handler: F,
    ) -> Result<ApiGatewayProxyResponse, Error>
    where
        F: FnOnce(LambdaEvent<ApiGatewayProxyRequest>, ResponseBuilder) -> Fut,
        Fut: Future<Output = Result<(), Error>>,
    {
        let (tx, rx) = oneshot::channel::<GatewayResponse>();
        let slot = Mutex::new(Some(tx));
        let builder = ResponseBuilder::from_fn(move |_, response| match take_sender(&slot) {
            Some(sender) => {
                let _ = sender.send(response);
            }
            None => warn!("completion already issued, dropping {}", response.status_code),
        });

        if let Err(e) = handler(event, builder.clone()).await {
            info!("handler failed: {}", e);
            create_error_response(&builder, e).await?;
        }
        drop(builder);

        match rx.await {
            Ok(response) => Ok(response.into_apigw_response()?),
            Err(_) => {
                warn!("handler finished without completing");
                Ok(apigw_response(500, Some("Internal Error".into()), None))
            }
        }
    }
}

/// Reply through `builder` with an error body; validation failures keep their own status
async fn create_error_response(builder: &ResponseBuilder, error: Error) -> ResponseResult<()> {
    let body = serde_json::json!({ "error": error.to_string() });
    match error.downcast_ref::<ResponseError>() {
        Some(response_error) => {
            builder
                .custom(SendOptions::new(response_error.status_code()).with_body(body))
                .await
        }
        None => builder.error(ResponseOptions::new().with_body(body)).await,
    }
}

/// Takes the pending sender, even if a previous holder of the lock panicked
fn take_sender<T>(slot: &Mutex<Option<T>>) -> Option<T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner).take()
}
