//! Form operations: each loads the draft, applies one wizard transition and
//! stores the draft again.

use log::{debug, info, warn};

use super::Portal;
use crate::{
    client::Submitter,
    error::{PortalError, Result},
    forms::StepView,
    models::{Draft, FileAttachment, FormKind, Section},
    params::{AttachFile, DetachFile, FillSection, SetField, StartForm},
    wizard::{SubmitOutcome, Wizard},
};

impl Portal {
    /// Start a form, or resume its draft.
    ///
    /// An update form needs a link token: it is validated against the API and
    /// the draft is created with the email the link was issued for. A stored
    /// update draft for the same token is resumed without asking the API
    /// again.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::InvalidLink` if the token is missing or rejected.
    pub async fn start_form(&self, params: &StartForm) -> Result<StepView> {
        let kind = params.kind;
        let existing = if params.restart {
            None
        } else {
            self.load_draft(kind).await?
        };

        let wizard = match (kind, existing) {
            (FormKind::Update, existing) => {
                let token = params
                    .token
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty());
                match (token, existing) {
                    (None, Some(draft)) => draft.into_wizard(),
                    (Some(token), Some(draft)) if draft.record.token.as_deref() == Some(token) => {
                        draft.into_wizard()
                    }
                    (None, None) => return Err(PortalError::InvalidLink),
                    (Some(token), _) => {
                        let grant = self.client()?.validate_token(token).await?;
                        Wizard::for_update(token, &grant)
                    }
                }
            }
            (_, Some(draft)) => {
                debug!("Resuming {} draft", kind.as_str());
                draft.into_wizard()
            }
            (_, None) => Wizard::new(kind),
        };

        info!("Started {} form on step {}", kind.as_str(), wizard.state().step);
        self.store(wizard).await
    }

    /// The wizard for `kind` as stored.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::DraftNotFound` if the form was never started.
    pub async fn load_form(&self, kind: FormKind) -> Result<Wizard> {
        self.load_draft(kind)
            .await?
            .map(Draft::into_wizard)
            .ok_or(PortalError::DraftNotFound { kind })
    }

    /// Current step of a started form.
    pub async fn show_form(&self, kind: FormKind) -> Result<StepView> {
        Ok(self.load_form(kind).await?.view())
    }

    /// Every stored draft, most recently updated first.
    pub async fn list_forms(&self) -> Result<Vec<Draft>> {
        self.with_db(|db| db.list_drafts()).await
    }

    pub async fn set_field(&self, params: &SetField) -> Result<StepView> {
        let mut wizard = self.load_form(params.kind).await?;
        wizard.set_input(&params.section, &params.field, &params.value)?;
        self.store(wizard).await
    }

    /// Attach a file on disk. Size and type are checked before the draft
    /// changes.
    pub async fn attach_file(&self, params: &AttachFile) -> Result<StepView> {
        let mut wizard = self.load_form(params.kind).await?;
        let path = params.path.clone();
        let file = tokio::task::spawn_blocking(move || FileAttachment::from_path(path))
            .await??;
        wizard.attach_file(&params.section, &params.field, file)?;
        self.store(wizard).await
    }

    pub async fn detach_file(&self, params: &DetachFile) -> Result<StepView> {
        let mut wizard = self.load_form(params.kind).await?;
        wizard.detach_file(&params.section, &params.field)?;
        self.store(wizard).await
    }

    /// Replace a whole section from text answers.
    pub async fn fill_section(&self, params: &FillSection) -> Result<StepView> {
        let mut wizard = self.load_form(params.kind).await?;
        let step = wizard
            .schema()
            .step_for_section(&params.section)
            .ok_or_else(|| {
                PortalError::invalid_input(params.section.as_str())
                    .with_reason(format!("unknown section '{}'", params.section))
            })?;

        let mut values = Section::default();
        for (field, raw) in &params.values {
            values.set(field.as_str(), step.parse_input(field, raw)?);
        }
        wizard.replace_section(&params.section, values)?;
        self.store(wizard).await
    }

    /// Advance one step. A blocked step leaves the draft unchanged.
    pub async fn next_step(&self, kind: FormKind) -> Result<StepView> {
        let mut wizard = self.load_form(kind).await?;
        wizard.next()?;
        self.store(wizard).await
    }

    pub async fn prev_step(&self, kind: FormKind) -> Result<StepView> {
        let mut wizard = self.load_form(kind).await?;
        wizard.prev()?;
        self.store(wizard).await
    }

    /// Discard entered data and return to step 0.
    pub async fn reset_form(&self, kind: FormKind) -> Result<StepView> {
        let mut wizard = self.load_form(kind).await?;
        wizard.reset();
        self.store(wizard).await
    }

    /// Delete the draft altogether. Returns whether one existed.
    pub async fn discard_form(&self, kind: FormKind) -> Result<bool> {
        self.with_db(move |db| db.delete_draft(kind)).await
    }

    /// Submit a form through the configured API client.
    pub async fn submit_form(&self, kind: FormKind) -> Result<SubmitOutcome> {
        let client = self.client()?;
        self.submit_with(kind, &client).await
    }

    /// Submit a form through `submitter`.
    ///
    /// The `submitting` flag is claimed in the store before the request goes
    /// out, so a second invocation, even one racing this one, sees the form
    /// as locked. On success the draft is deleted; on failure it is kept with
    /// the mapped error.
    pub async fn submit_with<S: Submitter>(
        &self,
        kind: FormKind,
        submitter: &S,
    ) -> Result<SubmitOutcome> {
        let mut wizard = self.load_form(kind).await?;
        let submission = match wizard.begin_submit() {
            Ok(submission) => submission,
            Err(e) => {
                if !matches!(e, PortalError::SubmissionInProgress) {
                    self.save(wizard).await?;
                }
                return Err(e);
            }
        };
        let (claimed, mut wizard) = self
            .with_db(move |db| Ok((db.claim_submission(&wizard)?, wizard)))
            .await?;
        if !claimed {
            warn!("{} form is already being submitted", kind.as_str());
            return Err(PortalError::SubmissionInProgress);
        }

        let result = submitter.submit(&submission).await;
        match wizard.finish_submit(result) {
            Ok(outcome) => {
                self.discard_form(kind).await?;
                Ok(outcome)
            }
            Err(e) => {
                self.save(wizard).await?;
                Err(e)
            }
        }
    }

    async fn load_draft(&self, kind: FormKind) -> Result<Option<Draft>> {
        self.with_db(move |db| db.get_draft(kind)).await
    }

    /// Persist the wizard and hand it back.
    pub(crate) async fn save(&self, wizard: Wizard) -> Result<Wizard> {
        self.with_db(move |db| {
            db.save_draft(&wizard)?;
            Ok(wizard)
        })
        .await
    }

    /// Persist the wizard and render its current step.
    async fn store(&self, wizard: Wizard) -> Result<StepView> {
        Ok(self.save(wizard).await?.view())
    }
}
