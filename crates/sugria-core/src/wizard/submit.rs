//! Submission lifecycle.
//!
//! Submitting is split into [`Wizard::begin_submit`] and
//! [`Wizard::finish_submit`] so a caller can persist the `submitting` flag
//! while the request is in flight. [`Wizard::submit`] runs both around a
//! [`Submitter`].

use log::{info, warn};

use super::Wizard;
use crate::{
    client::{encode, ServerResponse, SubmitError, Submission, Submitter},
    error::{PortalError, Result},
    models::FormKind,
};

/// What a successful submission returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub kind: FormKind,
    /// Identifier of the created record, when the server returns one
    pub reference: Option<String>,
    /// Server message, if any
    pub message: Option<String>,
}

impl Wizard {
    /// Validate the whole record, encode it and mark the wizard as
    /// submitting.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::SubmissionInProgress` if a submission is already
    /// running, `PortalError::Navigation` when not on the last step, and
    /// `PortalError::Incomplete` or `PortalError::Validation` when the record
    /// is not ready. Validation failures are also kept as the wizard's error.
    pub fn begin_submit(&mut self) -> Result<Submission> {
        if self.state.submitting {
            return Err(PortalError::SubmissionInProgress);
        }
        if !self.is_last_step() {
            return Err(PortalError::Navigation(format!(
                "Complete all steps before submitting (currently on step {} of {}).",
                self.state.step + 1,
                self.schema.step_count()
            )));
        }

        let prepared = self
            .schema
            .validate_record(&self.record)
            .and_then(|()| encode(&self.record));
        let submission = match prepared {
            Ok(submission) => submission,
            Err(e) => {
                self.state.error = Some(e.to_string());
                return Err(e);
            }
        };

        self.state.submitting = true;
        self.state.error = None;
        info!("Submitting {} form", self.kind().as_str());
        Ok(submission)
    }

    /// Apply the result of a submission started with
    /// [`Wizard::begin_submit`].
    ///
    /// On success the record, file cache, token and step are cleared. On
    /// failure the record is kept, the step stays on the last one and the
    /// mapped message becomes the wizard's error.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Submission` carrying the mapped error.
    pub fn finish_submit(
        &mut self,
        result: std::result::Result<ServerResponse, SubmitError>,
    ) -> Result<SubmitOutcome> {
        self.state.submitting = false;
        match result {
            Ok(response) => {
                let outcome = SubmitOutcome {
                    kind: self.kind(),
                    reference: response.reference(),
                    message: response.message().map(str::to_string),
                };
                info!("{} form submitted", self.kind().as_str());
                self.clear();
                Ok(outcome)
            }
            Err(e) => {
                warn!("{} form submission failed: {e}", self.kind().as_str());
                self.state.error = Some(e.message().to_string());
                Err(PortalError::Submission(e))
            }
        }
    }

    /// Validate, send and apply the result in one go.
    ///
    /// # Errors
    ///
    /// See [`Wizard::begin_submit`] and [`Wizard::finish_submit`].
    pub async fn submit<S: Submitter>(&mut self, submitter: &S) -> Result<SubmitOutcome> {
        let submission = self.begin_submit()?;
        let result = submitter.submit(&submission).await;
        self.finish_submit(result)
    }
}
