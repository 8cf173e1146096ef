use crate::aws::lambda_events::response::Headers;
use crate::errors::{ResponseError, ResponseResult, ToResponseError};

use serde::Serialize;
use serde_json::{Map, Value};

/// Options accepted by `success` and `error`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseOptions {
    pub headers: Option<Headers>,
    pub body: Option<Value>,
}

/// Options accepted by `custom` and `send`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendOptions {
    pub status: Option<i64>,
    pub headers: Option<Headers>,
    pub body: Option<Value>,
}

impl ResponseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_json_body<T: Serialize>(mut self, body: &T) -> ResponseResult<Self> {
        self.body = Some(serde_json::to_value(body).map_err(|e| e.to_response_error())?);
        Ok(self)
    }

    pub fn with_status(self, status: i64) -> SendOptions {
        SendOptions {
            status: Some(status),
            headers: self.headers,
            body: self.body,
        }
    }
}

impl SendOptions {
    pub fn new(status: i64) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_json_body<T: Serialize>(mut self, body: &T) -> ResponseResult<Self> {
        self.body = Some(serde_json::to_value(body).map_err(|e| e.to_response_error())?);
        Ok(self)
    }
}

impl TryFrom<Value> for ResponseOptions {
    type Error = ResponseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut fields = into_fields(value)?;
        Ok(Self {
            headers: parse_headers(fields.remove("headers"))?,
            body: fields.remove("body").filter(|body| !body.is_null()),
        })
    }
}

/// Untyped options as they arrive in an event payload. A missing status is
/// left for `send` to reject; a status of the wrong type is rejected here.
impl TryFrom<Value> for SendOptions {
    type Error = ResponseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut fields = into_fields(value)?;
        Ok(Self {
            status: parse_status(fields.remove("status"))?,
            headers: parse_headers(fields.remove("headers"))?,
            body: fields.remove("body").filter(|body| !body.is_null()),
        })
    }
}

fn into_fields(value: Value) -> ResponseResult<Map<String, Value>> {
    match value {
        Value::Null => Ok(Map::new()),
        Value::Object(fields) => Ok(fields),
        _ => Err(ResponseError::invalid_argument("options is not an object")),
    }
}

fn parse_status(value: Option<Value>) -> ResponseResult<Option<i64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .map(Some)
            .ok_or_else(|| ResponseError::invalid_argument("options.status is not a number")),
        Some(_) => Err(ResponseError::invalid_argument(
            "options.status is not a number",
        )),
    }
}

fn parse_headers(value: Option<Value>) -> ResponseResult<Option<Headers>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(fields)) => fields
            .into_iter()
            .map(|(name, value)| match value {
                Value::String(value) => Ok((name, value)),
                _ => Err(ResponseError::InvalidArgument(format!(
                    "options.headers.{} is not a string",
                    name
                ))),
            })
            .collect::<ResponseResult<Headers>>()
            .map(Some),
        Some(_) => Err(ResponseError::invalid_argument(
            "options.headers is not an object",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fluent_options() {
        let options = ResponseOptions::new()
            .with_header("Content-Type", "application/json")
            .with_body(json!({ "data": "test" }));

        assert_eq!(
            options.headers.as_ref().unwrap().get("Content-Type").unwrap(),
            "application/json"
        );
        assert_eq!(options.body, Some(json!({ "data": "test" })));

        let send = options.with_status(201);
        assert_eq!(send.status, Some(201));
        assert_eq!(send.body, Some(json!({ "data": "test" })));
    }

    #[test]
    fn test_with_json_body() {
        #[derive(Serialize)]
        struct Payload {
            data: &'static str,
        }

        let options = SendOptions::new(200)
            .with_json_body(&Payload { data: "test" })
            .unwrap();
        assert_eq!(options.body, Some(json!({ "data": "test" })));
    }

    #[test]
    fn test_send_options_from_value() {
        let options = SendOptions::try_from(json!({
            "status": 999,
            "headers": { "Content-Type": "application/json" },
            "body": { "data": "test" }
        }))
        .unwrap();

        assert_eq!(options.status, Some(999));
        assert_eq!(options.headers.unwrap().len(), 1);
        assert_eq!(options.body, Some(json!({ "data": "test" })));
    }

    #[test]
    fn test_send_options_missing_status_is_left_empty() {
        let options = SendOptions::try_from(json!({})).unwrap();
        assert_eq!(options, SendOptions::default());

        let options = SendOptions::try_from(Value::Null).unwrap();
        assert_eq!(options.status, None);
    }

    #[test]
    fn test_send_options_non_numeric_status() {
        let err = SendOptions::try_from(json!({ "status": "test" })).unwrap_err();
        assert_eq!(
            err,
            ResponseError::invalid_argument("options.status is not a number")
        );
    }

    #[test]
    fn test_send_options_integral_float_status() {
        let options = SendOptions::try_from(json!({ "status": 404.0 })).unwrap();
        assert_eq!(options.status, Some(404));

        let err = SendOptions::try_from(json!({ "status": 404.5 })).unwrap_err();
        assert_eq!(
            err,
            ResponseError::invalid_argument("options.status is not a number")
        );
    }

    #[test]
    fn test_options_must_be_object() {
        assert!(SendOptions::try_from(json!("test")).is_err());
        assert!(ResponseOptions::try_from(json!([1, 2])).is_err());
    }

    #[test]
    fn test_headers_must_be_strings() {
        let err = ResponseOptions::try_from(json!({ "headers": { "X-Count": 1 } })).unwrap_err();
        assert_eq!(
            err,
            ResponseError::invalid_argument("options.headers.X-Count is not a string")
        );

        let err = ResponseOptions::try_from(json!({ "headers": "nope" })).unwrap_err();
        assert!(matches!(err, ResponseError::InvalidArgument(_)));
    }
}
