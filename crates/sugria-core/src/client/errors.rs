//! Submission error taxonomy and server-response mapping.
//!
//! Status codes never leave this module: the wizard only sees a
//! [`SubmitError`] carrying the message to show.

use serde::Deserialize;
use thiserror::Error;

use crate::models::FormKind;

/// Why a submission did not go through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The server rejected the data (HTTP 400)
    #[error("{message}")]
    Validation { message: String },

    /// Duplicate submission (HTTP 409)
    #[error("{message}")]
    Conflict { message: String },

    /// The feature is disabled server-side (HTTP 403)
    #[error("{message}")]
    Forbidden { message: String },

    /// The request never reached the server
    #[error("{message}")]
    Network { message: String },

    /// Any other failure
    #[error("{message}")]
    Unknown { message: String },
}

impl SubmitError {
    /// Message shown to the user.
    pub fn message(&self) -> &str {
        match self {
            SubmitError::Validation { message }
            | SubmitError::Conflict { message }
            | SubmitError::Forbidden { message }
            | SubmitError::Network { message }
            | SubmitError::Unknown { message } => message,
        }
    }
}

/// Fixed messages for one form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorMessages {
    /// 400 with no usable server message
    pub invalid: &'static str,
    pub conflict: &'static str,
    pub forbidden: &'static str,
    pub network: &'static str,
}

impl ErrorMessages {
    pub fn for_kind(kind: FormKind) -> Self {
        match kind {
            FormKind::Join => Self {
                invalid: "Invalid data provided",
                conflict: "A member with this email already exists",
                forbidden: "Membership registration is currently disabled",
                network: "Unable to connect to the server. Please try again later.",
            },
            FormKind::Update => Self {
                invalid: "Invalid data provided",
                conflict: "A member with this email already exists",
                forbidden: "Membership updates are currently disabled",
                network: "Unable to connect to the server. Please try again later.",
            },
            FormKind::Program => Self {
                invalid: "Invalid application data",
                conflict: "You have already submitted an application for this program",
                forbidden: "Program applications are currently closed",
                network: "Network Error",
            },
        }
    }
}

/// Raw server or transport messages and their user-facing rewording.
const FRIENDLY_MESSAGES: &[(&str, &str)] = &[
    (
        "Email already exists",
        "An account with this email already exists. Please try logging in instead.",
    ),
    (
        "Failed to fetch",
        "Unable to connect to our servers. Please check your internet connection and try again.",
    ),
    (
        "Network Error",
        "You appear to be offline. Please check your internet connection and try again.",
    ),
    ("Invalid email format", "Please enter a valid email address."),
    (
        "Invalid phone number",
        "Please enter a valid phone number starting with 0 or +234.",
    ),
    (
        "Please check your form details",
        "Some of your information appears to be incorrect. Please review and try again.",
    ),
    (
        "Failed to join",
        "We couldn't complete your registration at this time. Please try again in a few minutes.",
    ),
    (
        "Failed to submit application",
        "We couldn't submit your application. Please try again in a few minutes.",
    ),
    (
        "Please enter valid phone numbers for both personal and emergency contacts",
        "Please ensure both phone numbers start with 0 or +234.",
    ),
    (
        "Invalid application data",
        "Please ensure all required fields are filled correctly.",
    ),
    (
        "Missing required fields",
        "Please fill in all required fields before submitting.",
    ),
    (
        "Invalid file format",
        "Please upload files in the correct format (PDF, DOC, or DOCX).",
    ),
    ("File size too large", "Please ensure all uploaded files are under 5MB."),
    ("Invalid date format", "Please enter dates in the correct format."),
    ("Invalid program selection", "Please select a valid program."),
];

/// Fallback when nothing better is known.
pub const DEFAULT_MESSAGE: &str =
    "Something unexpected happened. Please try again or contact support if the problem persists.";

/// Reword a known raw message; unknown messages pass through unchanged and
/// an empty message becomes [`DEFAULT_MESSAGE`].
pub fn humanize(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return DEFAULT_MESSAGE.to_string();
    }
    FRIENDLY_MESSAGES
        .iter()
        .find(|(raw, _)| *raw == trimmed)
        .map(|(_, friendly)| (*friendly).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageField {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Error body returned by the API.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    message: Option<MessageField>,
    #[serde(default)]
    error: Option<ErrorDetail>,
}

impl ErrorBody {
    /// Parse a response body, treating anything unparsable as empty.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// `error.message`, else `message` (lists joined by newlines).
    pub fn best_message(&self) -> Option<String> {
        let nested = self
            .error
            .as_ref()
            .and_then(|e| e.message.clone())
            .filter(|m| !m.trim().is_empty());
        nested.or_else(|| match &self.message {
            Some(MessageField::One(m)) if !m.trim().is_empty() => Some(m.clone()),
            Some(MessageField::Many(list)) if !list.is_empty() => Some(list.join("\n")),
            _ => None,
        })
    }
}

/// Map a non-success response to a [`SubmitError`].
pub fn classify(kind: FormKind, status: u16, body: &str) -> SubmitError {
    let messages = ErrorMessages::for_kind(kind);
    let server = ErrorBody::parse(body).best_message();
    match status {
        400 => SubmitError::Validation {
            message: humanize(&server.unwrap_or_else(|| messages.invalid.to_string())),
        },
        409 => SubmitError::Conflict {
            message: messages.conflict.to_string(),
        },
        403 => SubmitError::Forbidden {
            message: messages.forbidden.to_string(),
        },
        _ => SubmitError::Unknown {
            message: humanize(&server.unwrap_or_else(|| "Server error".to_string())),
        },
    }
}

/// Error for a request that never got a response.
pub fn network(kind: FormKind) -> SubmitError {
    SubmitError::Network {
        message: humanize(ErrorMessages::for_kind(kind).network),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_validation_prefers_nested_message() {
        let body = r#"{"message": "outer", "error": {"message": "Invalid program selection"}}"#;
        assert_eq!(
            classify(FormKind::Program, 400, body),
            SubmitError::Validation {
                message: "Please select a valid program.".into()
            }
        );
    }

    #[test]
    fn test_classify_validation_joins_message_list() {
        let body = r#"{"message": ["firstName should not be empty", "email must be an email"]}"#;
        let err = classify(FormKind::Join, 400, body);
        assert_eq!(
            err.message(),
            "firstName should not be empty\nemail must be an email"
        );
    }

    #[test]
    fn test_classify_validation_fallbacks() {
        assert_eq!(
            classify(FormKind::Join, 400, "").message(),
            "Invalid data provided"
        );
        assert_eq!(
            classify(FormKind::Program, 400, "{}").message(),
            "Please ensure all required fields are filled correctly."
        );
    }

    #[test]
    fn test_classify_conflict_ignores_server_text() {
        let body = r#"{"message": "duplicate key value violates unique constraint"}"#;
        assert_eq!(
            classify(FormKind::Join, 409, body),
            SubmitError::Conflict {
                message: "A member with this email already exists".into()
            }
        );
        assert_eq!(
            classify(FormKind::Program, 409, body).message(),
            "You have already submitted an application for this program"
        );
    }

    #[test]
    fn test_classify_forbidden_and_unknown() {
        assert_eq!(
            classify(FormKind::Join, 403, "{}").message(),
            "Membership registration is currently disabled"
        );
        assert_eq!(
            classify(FormKind::Join, 500, "<html>").message(),
            "Server error"
        );
        assert_eq!(
            classify(FormKind::Program, 502, r#"{"message": "Upstream down"}"#).message(),
            "Upstream down"
        );
    }

    #[test]
    fn test_network_messages() {
        assert_eq!(
            network(FormKind::Join).message(),
            "Unable to connect to the server. Please try again later."
        );
        assert_eq!(
            network(FormKind::Program).message(),
            "You appear to be offline. Please check your internet connection and try again."
        );
    }

    #[test]
    fn test_humanize_defaults() {
        assert_eq!(humanize("  "), DEFAULT_MESSAGE);
        assert_eq!(humanize("Something odd"), "Something odd");
        assert_eq!(
            humanize("Invalid email format"),
            "Please enter a valid email address."
        );
    }
}
