//! Multi-step wizard controller.
//!
//! A [`Wizard`] owns one [`SubmissionRecord`], the current step index, the
//! [`FileCache`] and the submission lifecycle of one form:
//!
//! ```text
//!            next (valid)          next (valid)
//!   ┌────────┐ ───────▶ ┌────────┐ ───────▶ ┌──────────┐  submit ok  ┌───────────┐
//!   │ step 0 │          │ step 1 │          │ step N-1 │ ──────────▶ │ submitted │
//!   └────────┘ ◀─────── └────────┘ ◀─────── └──────────┘             └───────────┘
//!                 prev                 prev       │ submit failed        │
//!                                                 └──▶ stays, error set  └──▶ reset to step 0
//! ```
//!
//! Forward moves are gated by the current step's validation; backward moves
//! never validate. Submission runs whole-record validation, then hands the
//! encoded request to a [`Submitter`](crate::client::Submitter).
//!
//! # Examples
//!
//! ```rust
//! use sugria_core::models::{FieldValue, FormKind};
//! use sugria_core::wizard::Wizard;
//!
//! let mut wizard = Wizard::new(FormKind::Join);
//! assert!(wizard.next().is_err());
//! assert_eq!(wizard.state().step, 0);
//!
//! wizard.change_field("personal", "fullName", FieldValue::Text("Ada Obi".into()))?;
//! assert_eq!(wizard.record().text("personal", "fullName"), "Ada Obi");
//! # Ok::<(), sugria_core::PortalError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    forms::{FormSchema, StepSpec, StepView},
    models::{FieldValue, FileCache, FormKind, SubmissionRecord, TokenGrant},
    validation::ValidationResult,
};

mod submit;
mod transitions;

#[cfg(test)]
mod tests;

pub use submit::SubmitOutcome;

/// Navigation and submission state of one wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    /// Zero-based index of the current step
    pub step: usize,

    /// Set while a submission is in flight
    #[serde(default)]
    pub submitting: bool,

    /// Last form-level error, e.g. a failed submission
    #[serde(default)]
    pub error: Option<String>,
}

/// One form in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    schema: FormSchema,
    record: SubmissionRecord,
    state: WizardState,
    cache: FileCache,
    errors: ValidationResult,
}

impl Wizard {
    /// A fresh wizard on step 0 with an empty record.
    pub fn new(kind: FormKind) -> Self {
        let schema = FormSchema::for_kind(kind);
        let record = schema.empty_record();
        Self {
            schema,
            record,
            state: WizardState::default(),
            cache: FileCache::default(),
            errors: ValidationResult::default(),
        }
    }

    /// A fresh update wizard for a validated link: the token is kept on the
    /// record and `personal.email` is prefilled from the grant.
    pub fn for_update(token: impl Into<String>, grant: &TokenGrant) -> Self {
        let mut wizard = Self::new(FormKind::Update);
        wizard.record.token = Some(token.into());
        wizard.prefill_email(&grant.email);
        wizard
    }

    /// Rebuild a wizard from persisted parts.
    ///
    /// The step index is clamped into range and sections missing from the
    /// stored record are added empty.
    pub fn restore(record: SubmissionRecord, state: WizardState, cache: FileCache) -> Self {
        let schema = FormSchema::for_kind(record.kind);
        let mut record = record;
        for step in &schema.steps {
            let section = record.sections.entry(step.section.to_string()).or_default();
            for spec in &step.fields {
                if section.get(spec.name).is_none() {
                    section.set(spec.name, spec.empty_value());
                }
            }
        }
        let state = WizardState {
            step: state.step.min(schema.last_step()),
            ..state
        };
        Self {
            schema,
            record,
            state,
            cache,
            errors: ValidationResult::default(),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.schema.kind
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn record(&self) -> &SubmissionRecord {
        &self.record
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn cache(&self) -> &FileCache {
        &self.cache
    }

    /// Inline errors of the current step from the last validation.
    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn is_last_step(&self) -> bool {
        self.state.step == self.schema.last_step()
    }

    pub fn current_step(&self) -> &StepSpec {
        &self.schema.steps[self.state.step]
    }

    /// Render the current step.
    pub fn view(&self) -> StepView {
        let step = self.current_step();
        let empty = Default::default();
        let section = self.record.section(step.section).unwrap_or(&empty);
        let mut view = step.render(section, &self.errors);
        view.form = self.schema.title.to_string();
        view.index = self.state.step;
        view.count = self.schema.step_count();
        view.error = self.state.error.clone();
        view.submitting = self.state.submitting;
        view
    }

    fn prefill_email(&mut self, email: &str) {
        if let Some(personal) = self.record.section_mut("personal") {
            personal.set("email", FieldValue::Text(email.to_string()));
        }
    }
}
