use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{message}")]
    Validation { message: String, fields: Vec<String> },

    #[error("Invalid data_type: {0}. Must be 'exercise', 'diet', or 'sleep'")]
    UnknownDataType(String),

    #[error("Service unavailable: {backend}")]
    Upstream { backend: String, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn missing_fields(fields: Vec<String>) -> Self {
        AppError::Validation {
            message: format!("Missing required fields: {}", fields.join(", ")),
            fields,
        }
    }

    /// Stable machine-readable error kind carried in every response body.
    fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "auth_error",
            AppError::NotFound(_) => "not_found",
            AppError::Validation { .. } | AppError::UnknownDataType(_) => "validation_error",
            AppError::Upstream { .. } => "upstream_unavailable",
            AppError::Database(_) | AppError::Internal(_) => "internal_error",
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort();
        AppError::Validation {
            message: format!("Invalid fields: {}", fields.join(", ")),
            fields,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation { message, .. } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::UnknownDataType(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Upstream { backend, reason } => {
                tracing::warn!(backend = %backend, reason = %reason, "Backend unreachable");
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        let mut error = json!({
            "kind": self.kind(),
            "message": message,
            "code": status.as_u16(),
        });
        match &self {
            AppError::Validation { fields, .. } if !fields.is_empty() => {
                error["fields"] = json!(fields);
            }
            AppError::Upstream { backend, .. } => {
                error["backend"] = json!(backend);
            }
            _ => {}
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_enumerates_fields() {
        let err = AppError::missing_fields(vec!["meal_type".into(), "calories".into()]);
        let msg = err.to_string();
        assert!(msg.contains("meal_type"));
        assert!(msg.contains("calories"));
        assert_eq!(err.kind(), "validation_error");
    }

    #[test]
    fn test_unknown_data_type_names_value_and_allowed_set() {
        let err = AppError::UnknownDataType("flying".into());
        let msg = err.to_string();
        assert!(msg.contains("flying"));
        assert!(msg.contains("exercise"));
        assert!(msg.contains("diet"));
        assert!(msg.contains("sleep"));
    }

    #[test]
    fn test_upstream_error_names_backend() {
        let err = AppError::Upstream {
            backend: "auth-service".into(),
            reason: "connection refused".into(),
        };
        assert!(err.to_string().contains("auth-service"));
        assert_eq!(err.kind(), "upstream_unavailable");
    }
}
