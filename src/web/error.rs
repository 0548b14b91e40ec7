//! Error responses for the REST API.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::service::ServiceError;

/// Error body: `{status, message, timestamp}` plus per-field `errors`
/// for validation failures
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

/// Service error on its way out as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    /// A validation failure for a single field
    pub fn field(field: &str, message: &str) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), message.to_string());
        Self(ServiceError::Validation(errors))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Processing(_) | ServiceError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.0 {
            ServiceError::Validation(errors) => ErrorBody {
                status: status.as_u16(),
                message: "Validation error".to_string(),
                timestamp: Utc::now(),
                errors: Some(errors),
            },
            ServiceError::Store(e) => {
                log::error!("Storage failure: {}", e);
                ErrorBody {
                    status: status.as_u16(),
                    message: format!("An unexpected error occurred: {}", e),
                    timestamp: Utc::now(),
                    errors: None,
                }
            }
            other => ErrorBody {
                status: status.as_u16(),
                message: other.to_string(),
                timestamp: Utc::now(),
                errors: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError(ServiceError::NotFound(1)).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::field("iterations", "too small").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError(ServiceError::Processing("boom".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_body_shape() {
        let mut errors = BTreeMap::new();
        errors.insert("initial_state".to_string(), "required".to_string());
        let body = ErrorBody {
            status: 400,
            message: "Validation error".to_string(),
            timestamp: Utc::now(),
            errors: Some(errors),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], 400);
        assert_eq!(json["errors"]["initial_state"], "required");
    }
}
