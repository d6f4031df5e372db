//! Error types and error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

/// Crate error type
#[derive(Debug, Error)]
pub enum ThiepCuoiError {
    /// Custom data failed the card template's required-field check
    #[error("Invalid or missing required data")]
    InvalidCardData,

    /// No card template with this id (or it is inactive)
    #[error("Card template not found: {0}")]
    CardTemplateNotFound(i64),

    /// No customized card with this id
    #[error("Customized card not found: {0}")]
    CustomizedCardNotFound(i64),

    /// Field validation failed on an input struct
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias using [`ThiepCuoiError`]
pub type Result<T, E = ThiepCuoiError> = std::result::Result<T, E>;

impl ThiepCuoiError {
    /// HTTP status this error maps to
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCardData | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::CardTemplateNotFound(_) | Self::CustomizedCardNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Serialization(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ThiepCuoiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::Validation(errors) => {
                let details: BTreeMap<_, _> = errors
                    .field_errors()
                    .into_iter()
                    .filter_map(|(field, field_errors)| {
                        field_errors.first().map(|error| {
                            let message = error
                                .message
                                .as_ref()
                                .map_or_else(|| error.code.to_string(), ToString::to_string);
                            (field.to_string(), message)
                        })
                    })
                    .collect();
                json!({ "error": "Invalid data", "details": details })
            }
            Self::Serialization(e) => {
                tracing::error!(error = %e, "Serialization failed");
                json!({ "error": "Internal server error" })
            }
            Self::Config(e) => {
                tracing::error!(error = %e, "Configuration error");
                json!({ "error": "Internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1, message = "Name must not be blank"))]
        name: String,
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ThiepCuoiError::InvalidCardData.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ThiepCuoiError::CardTemplateNotFound(7).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ThiepCuoiError::CustomizedCardNotFound(7).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ThiepCuoiError::Config("bad".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_errors_map_to_bad_request() {
        let errors = Named {
            name: String::new(),
        }
        .validate()
        .unwrap_err();
        let response = ThiepCuoiError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_card_data_response() {
        let response = ThiepCuoiError::InvalidCardData.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ThiepCuoiError::CardTemplateNotFound(3).to_string(),
            "Card template not found: 3"
        );
    }
}
