use crate::errors::{ResponseResult, ToResponseError};

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use std::collections::HashMap;

pub type Headers = HashMap<String, String>;

/// Response object handed to the completion callback
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl GatewayResponse {
    pub fn new(status_code: i64) -> Self {
        Self {
            status_code,
            headers: None,
            body: None,
        }
    }

    /// Build the runtime's proxy response, validating header names and values
    pub fn into_apigw_response(self) -> ResponseResult<ApiGatewayProxyResponse> {
        let headers = match self.headers {
            Some(headers) => Some(to_header_map(headers)?),
            None => None,
        };
        Ok(apigw_response(
            self.status_code,
            self.body.map(Body::from),
            headers,
        ))
    }
}

impl TryFrom<GatewayResponse> for ApiGatewayProxyResponse {
    type Error = crate::errors::ResponseError;

    fn try_from(response: GatewayResponse) -> Result<Self, Self::Error> {
        response.into_apigw_response()
    }
}

pub fn apigw_response(
    status_code: i64,
    body: Option<Body>,
    headers: Option<HeaderMap>,
) -> ApiGatewayProxyResponse {
    ApiGatewayProxyResponse {
        status_code,
        body,
        headers: headers.unwrap_or_default(),
        ..Default::default()
    }
}

fn to_header_map(headers: Headers) -> ResponseResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| e.to_response_error())?;
        let value = HeaderValue::from_str(&value).map_err(|e| e.to_response_error())?;
        map.insert(name, value);
    }
    Ok(map)
}
