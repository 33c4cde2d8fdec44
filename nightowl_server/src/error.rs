use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nightowl_core::schedule::error::GenerationError;
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Serialize)]
pub struct ErrorServer {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip)]
    pub status: u16,
}

impl std::fmt::Display for ErrorServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl IntoResponse for ErrorServer {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<GenerationError> for ErrorServer {
    fn from(err: GenerationError) -> Self {
        ErrorServer {
            status: err.status_code(),
            details: Some(json!({ "kind": err.kind() })),
            error: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ErrorServer {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonSyntaxError(_) => "MalformedBody",
            JsonRejection::JsonDataError(_) => "InvalidBody",
            JsonRejection::MissingJsonContentType(_) => "MissingContentType",
            _ => "InvalidRequest",
        };

        ErrorServer {
            status: rejection.status().as_u16(),
            details: Some(json!({ "kind": kind })),
            error: rejection.body_text(),
        }
    }
}
