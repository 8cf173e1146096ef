mod requests;

use crate::requests::EchoResponse;

use lambda_response::aws::lambda_events::request::LambdaEventRequestHandler;
use lambda_response::config::{get_config, ResponseConfig};
use lambda_response::{ResponseBuilder, ResponseOptions};

use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing::{debug, info, instrument};

/// Echoes the request body back. A `status` query parameter selects the status code;
/// requests without a body get their method and path back.
async fn echo(
    event: LambdaEvent<ApiGatewayProxyRequest>,
    builder: ResponseBuilder,
    config: &ResponseConfig,
) -> Result<(), Error> {
    let request = &event.payload;
    let status = LambdaEventRequestHandler::status_param(request)?;

    let options = ResponseOptions::new().with_headers(config.default_headers());
    let options = match LambdaEventRequestHandler::body_value(request) {
        Some(body) => options.with_body(body),
        None => options.with_json_body(&EchoResponse {
            method: request.http_method.as_str().to_string(),
            path: request.path.clone().unwrap_or_default(),
        })?,
    };

    match status {
        Some(status) => {
            info!("Echoing with custom status {}", status);
            builder.custom(options.with_status(status)).await?
        }
        None => builder.success(options).await?,
    }
    Ok(())
}

#[instrument(name = "lambda.echo.handler")]
async fn handler(
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    debug!("handling lambda req: {:?}", event);
    LambdaEventRequestHandler::respond_with(event, |event, builder| {
        echo(event, builder, get_config())
    })
    .await
}

// Custom allocator configuration
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_response::tracer::init_tracing();
    info!("Starting echo function");
    lambda_runtime::run(service_fn(handler)).await
}
