//! Outcome wrappers for submissions and admin changes.

use std::fmt;

use crate::{
    models::{Collection, FormKind},
    params::RecordId,
    wizard::SubmitOutcome,
};

/// Confirmation shown after a successful submission.
///
/// # Examples
///
/// ```rust
/// use sugria_core::{display::SubmitResult, models::FormKind, wizard::SubmitOutcome};
///
/// let result = SubmitResult(SubmitOutcome {
///     kind: FormKind::Program,
///     reference: Some("APP-0042".into()),
///     message: None,
/// });
/// assert!(result.to_string().contains("APP-0042"));
/// ```
pub struct SubmitResult(pub SubmitOutcome);

impl fmt::Display for SubmitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headline = match self.0.kind {
            FormKind::Join => "Welcome to the movement! Your membership registration was received.",
            FormKind::Program => "Your program application was submitted successfully.",
            FormKind::Update => "Your membership details were updated.",
        };
        writeln!(f, "# Submitted")?;
        writeln!(f)?;
        writeln!(f, "{headline}")?;
        if let Some(reference) = &self.0.reference {
            writeln!(f)?;
            writeln!(f, "- **Reference**: {reference}")?;
        }
        if let Some(message) = &self.0.message {
            writeln!(f)?;
            writeln!(f, "> {message}")?;
        }
        Ok(())
    }
}

/// Confirmation shown after deleting an admin record.
pub struct DeleteResult(pub RecordId);

impl fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = match self.0.collection {
            Collection::Members => "member",
            Collection::Applications => "application",
        };
        writeln!(f, "Deleted {noun} {}", self.0.id)
    }
}
