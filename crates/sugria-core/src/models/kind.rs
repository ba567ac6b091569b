//! Form kind enumeration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which public form a record belongs to.
///
/// The kind decides which sections exist in a
/// [`SubmissionRecord`](super::SubmissionRecord) and which optional fields are
/// active: `Update` activates `personal.workEmail` and the recovery token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    /// Membership join form
    Join,

    /// Funding program application
    Program,

    /// Member record update, reached through an emailed token link
    Update,
}

impl FromStr for FormKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "join" => Ok(FormKind::Join),
            "program" | "apply" => Ok(FormKind::Program),
            "update" => Ok(FormKind::Update),
            _ => Err(format!("Invalid form kind: {s}")),
        }
    }
}

impl FormKind {
    /// All form kinds, in menu order.
    pub const ALL: [FormKind; 3] = [FormKind::Join, FormKind::Program, FormKind::Update];

    /// Convert to the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Join => "join",
            FormKind::Program => "program",
            FormKind::Update => "update",
        }
    }
}
