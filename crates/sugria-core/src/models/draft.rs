//! Stored form drafts.

use jiff::Timestamp;

use super::{FileCache, FormKind, SubmissionRecord};
use crate::wizard::{Wizard, WizardState};

/// A wizard persisted between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub record: SubmissionRecord,
    pub state: WizardState,
    pub cache: FileCache,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Draft {
    pub fn kind(&self) -> FormKind {
        self.record.kind
    }

    /// Rebuild the wizard this draft was saved from.
    pub fn into_wizard(self) -> Wizard {
        Wizard::restore(self.record, self.state, self.cache)
    }
}
