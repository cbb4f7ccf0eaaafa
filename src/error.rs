use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("object store error: {0}")]
    S3(#[from] aws_sdk_s3::Error),

    #[error("history table error: {0}")]
    Dynamo(#[from] aws_sdk_dynamodb::Error),

    #[error("malformed table request: {0}")]
    TableRequest(#[from] aws_sdk_dynamodb::error::BuildError),

    #[error("table `{0}` did not become active in time")]
    TableNotActive(String),

    #[error("malformed history row: {0}")]
    MalformedRow(String),

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("trigger request failed: {0}")]
    Trigger(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("generating response for AppError: {self:?}");

        let status = match &self {
            Self::MalformedRow(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = json!({
            "statusCode": status.as_u16(),
            "body": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
