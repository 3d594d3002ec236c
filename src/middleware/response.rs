use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{Map, Value};

/// Wrapper for API responses. Every success body carries `success: true` and
/// a `message` string; extra payload fields are merged into the top level so
/// the wire shape matches the `{success, message, ...}` contract.
#[derive(Debug)]
pub struct ApiResponse {
    message: String,
    data: Option<Value>,
    status_code: Option<StatusCode>,
}

impl ApiResponse {
    /// A bare `{success, message}` response with 200 OK
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            status_code: None,
        }
    }

    /// A response with extra top-level fields. `data` must serialize to a
    /// JSON object; its entries are merged beside `success` and `message`.
    pub fn with_data(message: impl Into<String>, data: Value) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            status_code: None,
        }
    }

    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let mut body = Map::new();
        body.insert("success".into(), Value::Bool(true));
        body.insert("message".into(), Value::String(self.message));

        if let Some(data) = self.data {
            match data {
                Value::Object(fields) => {
                    for (key, value) in fields {
                        body.insert(key, value);
                    }
                }
                other => {
                    // Non-object payloads land under a data key
                    body.insert("data".into(), other);
                }
            }
        }

        (status, Json(Value::Object(body))).into_response()
    }
}

/// Handler result type: success envelope or ApiError
pub type ApiResult = Result<ApiResponse, crate::error::ApiError>;
