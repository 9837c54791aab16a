use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use netpath_core::ErrorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Failure of a single request, rendered as an [`ErrorBody`].
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Network(#[from] netpath_core::Error),

    #[error("Invalid JSON payload: {0}")]
    Payload(#[from] JsonPayloadError),

    #[error("No route for {method} {path}")]
    RouteNotFound { method: String, path: String },
}

/// JSON envelope returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub title: String,
    pub detail: String,
}

impl ApiError {
    pub fn title(&self) -> &'static str {
        match self {
            ApiError::Network(e) => e.kind().name(),
            ApiError::Payload(_) => "InvalidPayload",
            ApiError::RouteNotFound { .. } => "RouteNotFound",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Network(e) => match e.kind() {
                ErrorKind::ArgumentMissing | ErrorKind::ValidationFailed => StatusCode::BAD_REQUEST,
                ErrorKind::AlreadyExists => StatusCode::CONFLICT,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
            },
            ApiError::Payload(e) => e.status_code(),
            ApiError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Server-side failures keep their detail in the log only
        let detail = if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "request failed");
            status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(ErrorBody {
            status: status.as_u16(),
            title: self.title().to_string(),
            detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netpath_core::Error;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::ArgumentMissing { argument: "host" }, StatusCode::BAD_REQUEST),
            (
                Error::AlreadyExists {
                    entity: "host",
                    field: "name",
                    value: "a".into(),
                },
                StatusCode::CONFLICT,
            ),
            (Error::NotFound { host: "a".into() }, StatusCode::NOT_FOUND),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status_code(), expected);
        }
    }

    #[test]
    fn test_server_errors_hide_detail() {
        let err = ApiError::Payload(JsonPayloadError::Serialize(
            serde_json::from_str::<u8>("x").unwrap_err(),
        ));
        assert!(err.status_code().is_server_error());

        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
