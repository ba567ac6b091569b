//! Short confirmation and failure notices.

use std::fmt;

/// One-line outcome of an operation that has nothing else to show.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "**{label}** {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Signed out");
        assert_eq!(format!("{success}"), "**Success:** Signed out\n");

        let failure = OperationStatus::failure("Not signed in");
        assert!(format!("{failure}").contains("Error:"));
    }
}
