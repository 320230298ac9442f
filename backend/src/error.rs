//! The error taxonomy shared by every component, and its HTTP mapping.
//!
//! Provider-specific failures (identity provider, spreadsheet service,
//! registry storage) are reclassified into one of these five variants at the
//! component boundary; handlers simply bubble them up with `?` and actix turns
//! them into JSON error responses via `ResponseError`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    /// No session, expired session, or a failed credential refresh.
    #[error("{0}")]
    Unauthenticated(String),
    /// Missing required field or malformed identifier.
    #[error("{0}")]
    InvalidArgument(String),
    /// The remote service denied access to the resource.
    #[error("{0}")]
    Forbidden(String),
    /// Form id, spreadsheet, or sheet absent.
    #[error("{0}")]
    NotFound(String),
    /// Unclassified remote or storage failure.
    #[error("{0}")]
    Unknown(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_map_to_expected_statuses() {
        let cases = [
            (ApiError::Unauthenticated("a".into()), 401),
            (ApiError::InvalidArgument("b".into()), 400),
            (ApiError::Forbidden("c".into()), 403),
            (ApiError::NotFound("d".into()), 404),
            (ApiError::Unknown("e".into()), 500),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code().as_u16(), status);
        }
    }

    #[test]
    fn response_body_carries_the_message() {
        let err = ApiError::NotFound("form not found".into());
        assert_eq!(err.to_string(), "form not found");
    }
}
