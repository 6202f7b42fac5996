use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use crate::error::HttpError;

/// Body of every reply the comment form reads: `{"statusCode": .., "msg": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub msg: String,
}

impl StatusResponse {
    pub fn new(status_code: u16, msg: impl Into<String>) -> Self {
        Self {
            status_code,
            msg: msg.into(),
        }
    }
}

/// A `StatusResponse` plus the choice of transport status.
///
/// The deployed frontend only reads the body, so the transport status stays 200
/// unless `mirror` is set.
pub struct Reply {
    pub body: StatusResponse,
    pub mirror: bool,
}

impl Reply {
    pub fn new(body: StatusResponse, mirror: bool) -> Self {
        Self { body, mirror }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let status = if self.mirror {
            StatusCode::from_u16(self.body.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            StatusCode::OK
        };
        (status, Json(self.body)).into_response()
    }
}

#[derive(Serialize)]
pub struct ErrorRouting {
    pub status: String,
    pub message: String,
}

pub type HttpResult<T> = Result<T, HttpError>;
