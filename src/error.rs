use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reasons a listing source could not be turned into a table
#[derive(Debug, Error)]
pub enum LoadError {
    /// The configured path does not exist
    #[error("Listing source not found: {}", .path.display())]
    SourceMissing { path: PathBuf },

    /// The file exists but could not be read as a sheet
    #[error("Failed to parse {}: {detail}", .path.display())]
    SourceUnparseable { path: PathBuf, detail: String },
}

impl LoadError {
    pub fn unparseable(path: &Path, detail: impl fmt::Display) -> Self {
        Self::SourceUnparseable {
            path: path.to_path_buf(),
            detail: detail.to_string(),
        }
    }
}

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Malformed or incomplete client request
    InvalidRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::InvalidRequest(_) => "invalid_request",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::InvalidRequest("missing q".to_string());
        assert_eq!(error.to_string(), "Invalid request: missing q");
    }

    #[test]
    fn test_load_error_display() {
        let error = LoadError::unparseable(Path::new("phones.xlsx"), "bad zip");
        assert_eq!(error.to_string(), "Failed to parse phones.xlsx: bad zip");

        let error = LoadError::SourceMissing {
            path: PathBuf::from("phones.xlsx"),
        };
        assert_eq!(error.to_string(), "Listing source not found: phones.xlsx");
    }

    #[test]
    fn test_error_type_name() {
        assert_eq!(
            error_type_name(&AppError::InvalidRequest("test".to_string())),
            "invalid_request"
        );
    }

    #[tokio::test]
    async fn test_error_response() {
        let error = AppError::InvalidRequest("query parameter 'q' is required".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
