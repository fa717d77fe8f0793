use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;
use thiserror::Error;

/// 對外唯一的錯誤訊息，不暴露內部原因
pub const GENERIC_FAILURE_BODY: &str = "Error generating ticket";

#[derive(Error, Debug)]
pub enum TicketError {
    #[error("Failed to save counter state to {}: {source}", path.display())]
    StateSave {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode counter state: {0}")]
    StateEncode(#[from] serde_json::Error),

    #[error("Ticket rendering failed: {message}")]
    Render { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Rendering,
    Configuration,
    System,
}

impl TicketError {
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StateSave { .. } | Self::StateEncode(_) => ErrorCategory::Storage,
            Self::Render { .. } => ErrorCategory::Rendering,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Storage => "Unable to persist the ticket counter".to_string(),
            ErrorCategory::Rendering => "Unable to render the ticket document".to_string(),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Storage => {
                "Check that the state file directory exists, is writable and has free space"
            }
            ErrorCategory::Rendering => "Report the failure; the counter has already advanced",
            ErrorCategory::Configuration => {
                "Review the TOML file and command line flags (see --help)"
            }
            ErrorCategory::System => "Check file permissions and that the port is free",
        }
    }
}

impl IntoResponse for TicketError {
    fn into_response(self) -> Response {
        tracing::error!(
            category = ?self.category(),
            error = %self,
            "❌ Ticket request failed"
        );

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            GENERIC_FAILURE_BODY,
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, TicketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let save = TicketError::StateSave {
            path: PathBuf::from("counter.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(save.category(), ErrorCategory::Storage);
        assert_eq!(TicketError::render("boom").category(), ErrorCategory::Rendering);
        assert_eq!(
            TicketError::ConfigError {
                message: "bad".to_string()
            }
            .category(),
            ErrorCategory::Configuration
        );
    }

    #[test]
    fn test_state_save_display_names_path() {
        let err = TicketError::StateSave {
            path: PathBuf::from("/var/lib/tickets/counter.json"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        let text = err.to_string();
        assert!(text.contains("/var/lib/tickets/counter.json"));
        assert!(text.contains("disk full"));
    }

    #[test]
    fn test_into_response_is_generic_500() {
        let response = TicketError::render("font table missing").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }
}
