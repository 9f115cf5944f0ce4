use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pipedag_core::PipelineError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),
}

pub type Result<T> = std::result::Result<T, ServerError>;

/// One entry of a validation failure body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationBody {
    pub detail: Vec<ValidationDetail>,
}

/// Errors a request handler can answer with
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request validation failed: {0}")]
    Validation(#[from] PipelineError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn body(&self) -> ValidationBody {
        let ApiError::Validation(err) = self;
        let detail = match err {
            PipelineError::Syntax {
                line,
                column,
                message,
            } => ValidationDetail {
                kind: "json_invalid".to_string(),
                loc: vec!["body".to_string()],
                msg: strip_position(message),
                line: *line,
                column: *column,
            },
            PipelineError::Shape {
                line,
                column,
                message,
            } => ValidationDetail {
                kind: "value_error".to_string(),
                loc: field_location(message),
                msg: strip_position(message),
                line: *line,
                column: *column,
            },
            other => ValidationDetail {
                kind: "body_error".to_string(),
                loc: vec!["body".to_string()],
                msg: other.to_string(),
                line: 0,
                column: 0,
            },
        };
        ValidationBody {
            detail: vec![detail],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

// serde_json appends " at line N column M"; the position has its own fields
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

// "missing field `edges`" names the offending field; other messages do not
fn field_location(message: &str) -> Vec<String> {
    let mut loc = vec!["body".to_string()];
    if let Some(rest) = message.strip_prefix("missing field `") {
        if let Some(end) = rest.find('`') {
            loc.push(rest[..end].to_string());
        }
    }
    loc
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Server answered {status}: {body}")]
    Status { status: u16, body: String },
}
