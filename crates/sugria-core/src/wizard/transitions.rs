//! Record edits and step navigation.

use log::{debug, info};

use super::{Wizard, WizardState};
use crate::{
    error::{PortalError, Result},
    models::{FieldValue, FileAttachment, Section},
    validation::ValidationResult,
};

impl Wizard {
    fn ensure_idle(&self) -> Result<()> {
        if self.state.submitting {
            Err(PortalError::SubmissionInProgress)
        } else {
            Ok(())
        }
    }

    fn section_mut(&mut self, section: &str) -> Result<&mut Section> {
        self.record.section_mut(section).ok_or_else(|| {
            PortalError::invalid_input(section).with_reason(format!("unknown section '{section}'"))
        })
    }

    /// Set one field through the step that owns its section.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::SubmissionInProgress` while submitting and
    /// `PortalError::InvalidInput` for unknown, read-only or mistyped fields.
    pub fn change_field(&mut self, section: &str, field: &str, value: FieldValue) -> Result<()> {
        self.ensure_idle()?;
        let step = self
            .schema
            .step_for_section(section)
            .cloned()
            .ok_or_else(|| {
                PortalError::invalid_input(format!("{section}.{field}"))
                    .with_reason(format!("unknown section '{section}'"))
            })?;
        step.change(self.section_mut(section)?, field, value)?;
        self.clear_error_for(section, field);
        Ok(())
    }

    /// Parse raw text input for a field and set it.
    ///
    /// # Errors
    ///
    /// As [`Wizard::change_field`], plus unparsable flag values.
    pub fn set_input(&mut self, section: &str, field: &str, raw: &str) -> Result<()> {
        let value = self
            .schema
            .step_for_section(section)
            .ok_or_else(|| {
                PortalError::invalid_input(format!("{section}.{field}"))
                    .with_reason(format!("unknown section '{section}'"))
            })?
            .parse_input(field, raw)?;
        self.change_field(section, field, value)
    }

    /// Attach a file to an upload slot and remember it in the file cache.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Validation` when the file breaks the slot's
    /// size or type rules; the slot is left unchanged.
    pub fn attach_file(&mut self, section: &str, field: &str, file: FileAttachment) -> Result<()> {
        self.ensure_idle()?;
        let spec = self.schema.field(section, field)?;
        if !spec.is_file() {
            return Err(PortalError::invalid_input(format!("{section}.{field}"))
                .with_reason("not a file field"));
        }
        let value = FieldValue::File(Some(file.clone()));
        if let Some(message) = spec.check(&value) {
            let mut errors = ValidationResult::default();
            errors.insert(format!("{section}.{field}"), message);
            return Err(PortalError::Validation { errors });
        }

        self.change_field(section, field, value)?;
        info!("Attached '{}' to {section}.{field}", file.file_name);
        self.cache.remember(format!("{section}.{field}"), file);
        Ok(())
    }

    /// Empty an upload slot and forget its cached file.
    ///
    /// # Errors
    ///
    /// As [`Wizard::change_field`].
    pub fn detach_file(&mut self, section: &str, field: &str) -> Result<()> {
        self.change_field(section, field, FieldValue::File(None))?;
        self.cache.forget(&format!("{section}.{field}"));
        Ok(())
    }

    /// Replace a whole section at once.
    ///
    /// Fields absent from `values` are emptied, read-only fields keep their
    /// current value, and upload slots left empty are restored from the file
    /// cache.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::InvalidInput` if any value names an unknown or
    /// read-only field or has the wrong type; the section is then unchanged.
    pub fn replace_section(&mut self, section: &str, values: Section) -> Result<()> {
        self.ensure_idle()?;
        let step = self
            .schema
            .step_for_section(section)
            .cloned()
            .ok_or_else(|| {
                PortalError::invalid_input(section)
                    .with_reason(format!("unknown section '{section}'"))
            })?;

        let current = self.section_mut(section)?.clone();
        let mut replacement = step.empty_section();
        for spec in step.fields.iter().filter(|f| f.read_only) {
            if let Some(value) = current.get(spec.name) {
                replacement.set(spec.name, value.clone());
            }
        }
        for (field, value) in values.iter() {
            step.change(&mut replacement, field, value.clone())?;
        }

        *self.section_mut(section)? = replacement;
        self.restore_files(section);
        self.errors = ValidationResult::default();
        self.state.error = None;
        debug!("Replaced section {section}");
        Ok(())
    }

    /// Advance to the next step if the current one is valid.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Validation` with the step's field errors (the
    /// step index is unchanged), or `PortalError::Navigation` on the last
    /// step, where the form must be submitted instead.
    pub fn next(&mut self) -> Result<()> {
        self.ensure_idle()?;
        if self.is_last_step() {
            return Err(PortalError::Navigation(
                "This is the last step. Submit the form instead.".to_string(),
            ));
        }

        let step = self.current_step();
        let errors = self
            .record
            .section(step.section)
            .map(|section| step.validate(section))
            .unwrap_or_default();
        if !errors.is_valid() {
            debug!("Step {} blocked by {} error(s)", self.state.step, errors.len());
            self.errors = errors.clone();
            return Err(PortalError::Validation { errors });
        }

        self.enter(self.state.step + 1);
        Ok(())
    }

    /// Go back one step. Never validates.
    ///
    /// Leaving the last step restores every upload slot from the file cache.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Navigation` on the first step and
    /// `PortalError::SubmissionInProgress` while submitting.
    pub fn prev(&mut self) -> Result<()> {
        self.ensure_idle()?;
        if self.state.step == 0 {
            return Err(PortalError::Navigation(
                "Already at the first step.".to_string(),
            ));
        }

        if self.is_last_step() {
            let sections: Vec<&'static str> = self.schema.steps.iter().map(|s| s.section).collect();
            for section in sections {
                self.restore_files(section);
            }
        }
        self.enter(self.state.step - 1);
        Ok(())
    }

    /// Discard everything and return to step 0.
    ///
    /// An update wizard keeps its token and prefilled email so the link does
    /// not have to be validated again.
    pub fn reset(&mut self) {
        let token = self.record.token.take();
        let email = self.record.text("personal", "email").to_string();

        self.clear();
        if token.is_some() {
            self.record.token = token;
            self.prefill_email(&email);
        }
        info!("Reset {} form", self.kind().as_str());
    }

    /// Back to an empty record on step 0, dropping the token too.
    pub(super) fn clear(&mut self) {
        self.record = self.schema.empty_record();
        self.state = WizardState::default();
        self.cache.clear();
        self.errors = ValidationResult::default();
    }

    /// Move to `index` and mount the entered step.
    fn enter(&mut self, index: usize) {
        self.state.step = index;
        self.state.error = None;

        let section = self.schema.steps[index].section;
        self.restore_files(section);
        let step = &self.schema.steps[index];
        self.errors = self
            .record
            .section(section)
            .map(|s| step.mount(s))
            .unwrap_or_default();
        debug!("Entered step {index} ({})", step.title);
    }

    /// Put cached uploads back into empty slots of `section`.
    fn restore_files(&mut self, section: &str) {
        let Some(step) = self.schema.step_for_section(section) else {
            return;
        };
        let slots: Vec<&'static str> = step
            .fields
            .iter()
            .filter(|f| f.is_file())
            .map(|f| f.name)
            .collect();

        for field in slots {
            let slot = format!("{section}.{field}");
            let Some(cached) = self.cache.get(&slot).cloned() else {
                continue;
            };
            if let Some(target) = self.record.section_mut(section) {
                if target.file(field).is_none() {
                    debug!("Restored {slot} from file cache");
                    target.set(field, FieldValue::File(Some(cached)));
                }
            }
        }
    }

    fn clear_error_for(&mut self, section: &str, field: &str) {
        if self.current_step().section == section {
            let mut remaining = ValidationResult::default();
            for (name, message) in self.errors.iter().filter(|(name, _)| *name != field) {
                remaining.insert(name, message);
            }
            self.errors = remaining;
        }
        self.state.error = None;
    }
}
