use axum::{
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    extract::{FromRequest, Request},
    Form,
    Json,
};
use serde::de::DeserializeOwned;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    error::Error,
};
use crate::dto::StatusResponse;

pub const MAX_NAME_LENGTH: usize = 25;
pub const MAX_EMAIL_LENGTH: usize = 60;

#[derive(Debug, PartialEq)]
pub enum ErrorMessage {
    EmptySlug,
    EmptyName,
    EmptyEmail,
    EmptyComment,
    ExceededMaxNameLength(usize),
    ExceededMaxEmailLength(usize),
    ProcessingFailed,
    FailedReachApi,
    UnsupportedBody,
}

#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub message: String,
}

impl ErrorMessage {
    fn get_message(&self) -> String {
        match self {
            ErrorMessage::EmptySlug => "Error: slug cannot be empty.".to_string(),
            ErrorMessage::EmptyName => "Error: name cannot be empty.".to_string(),
            ErrorMessage::EmptyEmail => "Error: email cannot be empty.".to_string(),
            ErrorMessage::EmptyComment => "Error: comment cannot be empty.".to_string(),
            ErrorMessage::ExceededMaxNameLength(max_length) => format!("Error: name cannot be more than {} characters.", max_length),
            ErrorMessage::ExceededMaxEmailLength(max_length) => format!("Error: email cannot be more than {} characters.", max_length),
            ErrorMessage::ProcessingFailed => "There was an error processing your request. Please try again later.".to_string(),
            ErrorMessage::FailedReachApi => "Error: Failed to reach API. Please try again later.".to_string(),
            ErrorMessage::UnsupportedBody => "Error: expected a form-encoded or JSON body.".to_string(),
        }
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.get_message())
    }
}

impl HttpError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HttpError {
            status,
            message: message.into(),
        }
    }
    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }
    pub fn unsupported_media_type(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, message)
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "HttpError: message: {}, status: {}",
            self.message, self.status
        )
    }
}

impl Error for HttpError {}

// Validation failures are all 422.
impl From<ErrorMessage> for HttpError {
    fn from(message: ErrorMessage) -> Self {
        HttpError::unprocessable_entity(message.to_string())
    }
}

impl From<HttpError> for StatusResponse {
    fn from(err: HttpError) -> Self {
        StatusResponse::new(err.status.as_u16(), err.message)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(StatusResponse::from(self))).into_response()
    }
}

/// Accepts either `application/x-www-form-urlencoded` or `application/json`.
/// Rejections are rendered in the same `{statusCode, msg}` shape as every other reply.
pub struct BodyParser<T>(pub T);
impl<S, T> FromRequest<S> for BodyParser<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req.headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if content_type.starts_with("application/json") {
            match Json::<T>::from_request(req, state).await {
                Ok(value) => Ok(Self(value.0)),
                Err(rejection) => Err(HttpError::new(rejection.status(), rejection.body_text())),
            }
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            match Form::<T>::from_request(req, state).await {
                Ok(value) => Ok(Self(value.0)),
                Err(rejection) => Err(HttpError::new(rejection.status(), rejection.body_text())),
            }
        } else {
            Err(HttpError::unsupported_media_type(ErrorMessage::UnsupportedBody.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_messages_carry_limits() {
        assert_eq!(
            ErrorMessage::ExceededMaxNameLength(MAX_NAME_LENGTH).to_string(),
            "Error: name cannot be more than 25 characters."
        );
        assert_eq!(
            ErrorMessage::ExceededMaxEmailLength(MAX_EMAIL_LENGTH).to_string(),
            "Error: email cannot be more than 60 characters."
        );
    }

    #[test]
    fn test_http_error_to_status_response() {
        let body = StatusResponse::from(HttpError::unprocessable_entity(ErrorMessage::EmptySlug.to_string()));
        assert_eq!(body.status_code, 422);
        assert_eq!(body.msg, "Error: slug cannot be empty.");
    }
}
