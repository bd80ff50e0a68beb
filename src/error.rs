//! Client error types
//!
//! Every failure a view can hit ends up as a `ClientError`. Views turn it
//! into user-facing text with [`ClientError::user_message`].

use thiserror::Error;

/// Errors that can occur while talking to the InternSight backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced an HTTP response (connect, DNS, timeout...)
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Backend error {status}: {}", message.as_deref().unwrap_or("no message"))]
    Backend {
        status: u16,
        message: Option<String>,
    },

    /// An operation that needs an identity ran without a session
    #[error("Not logged in")]
    NoSession,

    /// A required form field was left empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The backend answered with a body we could not understand
    #[error("Parse error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Text to show the user for this failure.
    ///
    /// A non-empty message reported by the backend wins; anything else
    /// (transport failures, undecodable bodies, missing messages) falls back
    /// to the call site's `default`.
    pub fn user_message(&self, default: &str) -> String {
        match self {
            ClientError::Backend {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ClientError::NoSession => crate::session::LOGIN_PROMPT.to_string(),
            ClientError::MissingField(field) => format!("Please fill out the {} field.", field),
            _ => default.to_string(),
        }
    }

    /// HTTP status reported by the backend, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Backend { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_wins() {
        let err = ClientError::Backend {
            status: 400,
            message: Some("Email already registered".to_string()),
        };
        assert_eq!(err.user_message("An error occurred"), "Email already registered");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_missing_or_blank_message_falls_back() {
        let err = ClientError::Backend {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("An error occurred"), "An error occurred");

        let err = ClientError::Backend {
            status: 500,
            message: Some("   ".to_string()),
        };
        assert_eq!(err.user_message("An error occurred"), "An error occurred");

        let err = ClientError::Decode("expected value".to_string());
        assert_eq!(err.user_message("Error fetching applications."), "Error fetching applications.");
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::Backend {
            status: 404,
            message: None,
        };
        assert_eq!(err.to_string(), "Backend error 404: no message");

        let err = ClientError::MissingField("company");
        assert_eq!(err.to_string(), "Missing required field: company");
        assert_eq!(err.user_message("x"), "Please fill out the company field.");
    }

    #[test]
    fn test_no_session_prompt() {
        let err = ClientError::NoSession;
        assert_eq!(
            err.user_message("ignored"),
            "Please log in to access your applications."
        );
    }
}
