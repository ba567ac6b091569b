//! Step component contract: render, change, validate and mount.
//!
//! A step only ever reads and writes its own section. Navigation decisions
//! belong to the wizard; a step merely reports whether its section is valid.

use log::debug;

use super::{FieldKind, FieldSpec, StepSpec};
use crate::{
    error::{PortalError, Result},
    models::{FieldValue, Section},
    validation::ValidationResult,
};

/// One field as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub kind: String,
    pub value: String,
    pub required: bool,
    pub read_only: bool,
    pub placeholder: Option<String>,
    pub error: Option<String>,
}

/// Rendered state of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub form: String,
    pub title: String,
    pub section: String,
    /// Zero-based step index
    pub index: usize,
    pub count: usize,
    pub fields: Vec<FieldView>,
    /// Form-level error, e.g. the last submission failure
    pub error: Option<String>,
    /// Set while a submission is in flight
    pub submitting: bool,
}

impl StepView {
    /// Completion percentage shown in the progress bar.
    pub fn progress(&self) -> usize {
        if self.count == 0 {
            return 0;
        }
        (self.index + 1) * 100 / self.count
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.count
    }
}

fn display_value(value: Option<&FieldValue>) -> String {
    match value {
        Some(FieldValue::Text(text)) => text.clone(),
        Some(FieldValue::Flag(true)) => "yes".to_string(),
        Some(FieldValue::Flag(false)) => "no".to_string(),
        Some(FieldValue::File(Some(file))) => format!("{} ({} bytes)", file.file_name, file.size),
        Some(FieldValue::File(None)) | None => String::new(),
    }
}

impl StepSpec {
    /// Build the view of this step over `section`, with inline `errors`.
    pub fn render(&self, section: &Section, errors: &ValidationResult) -> StepView {
        let fields = self
            .fields
            .iter()
            .map(|spec| FieldView {
                name: spec.name.to_string(),
                label: spec.label.to_string(),
                kind: spec.kind.describe(),
                value: display_value(section.get(spec.name)),
                required: spec.is_required(section),
                read_only: spec.read_only,
                placeholder: spec.placeholder.map(str::to_string),
                error: errors.get(spec.name).map(str::to_string),
            })
            .collect();

        StepView {
            form: String::new(),
            title: self.title.to_string(),
            section: self.section.to_string(),
            index: 0,
            count: 0,
            fields,
            error: None,
            submitting: false,
        }
    }

    /// Update one field of this step's section.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::InvalidInput` for unknown or read-only fields and
    /// for values of the wrong type.
    pub fn change(&self, section: &mut Section, field: &str, value: FieldValue) -> Result<()> {
        let spec = self.editable(field)?;
        if !spec.accepts(&value) {
            return Err(PortalError::invalid_input(format!("{}.{field}", self.section))
                .with_reason(format!("expected {}", spec.kind.describe())));
        }
        debug!("Changing {}.{field}", self.section);
        section.set(field, value);
        Ok(())
    }

    /// Parse raw user input for `field` into a value of the right type.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::InvalidInput` for unknown or read-only fields,
    /// file fields (use an attachment instead) and unrecognised flag values.
    pub fn parse_input(&self, field: &str, raw: &str) -> Result<FieldValue> {
        let spec = self.editable(field)?;
        match spec.kind {
            FieldKind::Flag => match raw.trim().to_lowercase().as_str() {
                "true" | "yes" | "y" | "1" | "on" => Ok(FieldValue::Flag(true)),
                "false" | "no" | "n" | "0" | "off" | "" => Ok(FieldValue::Flag(false)),
                other => Err(PortalError::invalid_input(format!("{}.{field}", self.section))
                    .with_reason(format!("'{other}' is not yes or no"))),
            },
            FieldKind::File(_) => {
                Err(PortalError::invalid_input(format!("{}.{field}", self.section))
                    .with_reason("file fields take an attachment, not text"))
            }
            _ => Ok(FieldValue::Text(raw.to_string())),
        }
    }

    /// Validate this step's section: required checks first, then the field
    /// rules on every non-empty value.
    pub fn validate(&self, section: &Section) -> ValidationResult {
        let mut result = ValidationResult::default();
        for spec in &self.fields {
            let empty = spec.empty_value();
            let value = section.get(spec.name).unwrap_or(&empty);
            if let Some(message) = spec.check_required(value) {
                if spec.is_required(section) {
                    result.insert(spec.name, message);
                }
                continue;
            }
            if let Some(message) = spec.check(value) {
                result.insert(spec.name, message);
            }
        }
        result
    }

    /// Checks run when the step is entered.
    ///
    /// Absent uploads are tolerated; any upload already present is
    /// re-validated so a restored file that no longer passes is flagged.
    pub fn mount(&self, section: &Section) -> ValidationResult {
        let mut result = ValidationResult::default();
        for spec in self.fields.iter().filter(|f| f.is_file()) {
            if let Some(value) = section.get(spec.name).filter(|v| !v.is_empty()) {
                if let Some(message) = spec.check(value) {
                    result.insert(spec.name, message);
                }
            }
        }
        result
    }

    /// Summary labels of required fields left empty.
    pub fn missing(&self, section: &Section) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|spec| spec.is_required(section))
            .filter(|spec| section.get(spec.name).map_or(true, FieldValue::is_empty))
            .map(FieldSpec::summary_label)
            .collect()
    }

    fn editable(&self, field: &str) -> Result<&FieldSpec> {
        let spec = self.field_spec(field).ok_or_else(|| {
            PortalError::invalid_input(format!("{}.{field}", self.section))
                .with_reason(format!("unknown field '{field}' in step '{}'", self.title))
        })?;
        if spec.read_only {
            return Err(PortalError::invalid_input(format!("{}.{field}", self.section))
                .with_reason("this field is read-only"));
        }
        Ok(spec)
    }
}
