use crate::api::ErrorResponse;
use crate::validation::ValidationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// Error returned by handlers, rendered as `{"message": ...}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<shared::Error> for ApiError {
    fn from(err: shared::Error) -> Self {
        match err {
            shared::Error::NotFound => Self::not_found("Not found"),
            shared::Error::InvalidSession(session) => {
                Self::bad_request(format!("Invalid session '{session}'"))
            }
            shared::Error::InvalidInput(reason) => Self::bad_request(reason),
            shared::Error::Upstream(reason) => {
                error!("Spreadsheet request failed: {}", reason);
                Self::new(StatusCode::BAD_GATEWAY, "Spreadsheet request failed")
            }
            other => {
                error!("Request failed: {}", other);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (shared::Error::NotFound, StatusCode::NOT_FOUND),
            (shared::Error::InvalidSession("x".into()), StatusCode::BAD_REQUEST),
            (shared::Error::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (
                shared::Error::ColumnNotFound {
                    column: "Day 1 FN".into(),
                    tab: "Day 1".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (shared::Error::Upstream("x".into()), StatusCode::BAD_GATEWAY),
            (shared::Error::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (shared::Error::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }

    #[test]
    fn test_invalid_session_message() {
        let err = ApiError::from(shared::Error::InvalidSession("lunch".into()));
        assert_eq!(err.message, "Invalid session 'lunch'");
    }
}
