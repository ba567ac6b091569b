//! Form schemas and step components.
//!
//! Every public form is described by a [`FormSchema`]: an ordered list of
//! [`StepSpec`]s, each owning exactly one section of the
//! [`SubmissionRecord`]. A step knows its fields ([`FieldSpec`]), which of
//! them are required, and which validators apply. The wizard never inspects
//! fields directly; it asks the current step to render, change, validate and
//! mount its section (see [`step`]).
//!
//! ```text
//! FormSchema (program)
//! ├── StepSpec "Select Program"      → section "program"
//! ├── StepSpec "Personal Information"→ section "personal"
//! ├── ...
//! └── StepSpec "Declaration"         → section "declaration"
//!          └── FieldSpec { name, label, kind, requirement, rules }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use sugria_core::forms::FormSchema;
//! use sugria_core::models::FormKind;
//!
//! let schema = FormSchema::for_kind(FormKind::Program);
//! assert_eq!(schema.step_count(), 7);
//! assert_eq!(schema.step(0).unwrap().title, "Select Program");
//!
//! let record = schema.empty_record();
//! assert!(record.section("declaration").is_some());
//! ```

use crate::{
    error::{PortalError, Result},
    models::{FieldValue, FormKind, Section, SubmissionRecord},
    validation::{
        validate_choice, validate_date_of_birth, validate_domain_email, validate_email,
        validate_file, validate_full_name, validate_phone_number, validate_positive_number,
        validate_required, FileRules, ValidationResult, REQUIRED_MESSAGE,
    },
};

mod join;
mod program;
pub mod step;

pub use program::PROGRAMS;
pub use step::{FieldView, StepView};

/// Message shown when a phone number cannot be normalized.
pub const PHONE_HINT: &str =
    "Please enter a valid Nigerian phone number (e.g., 08012345678 or +2348012345678)";

/// One selectable option of a choice field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

pub const GENDERS: &[Choice] = &[
    Choice { value: "male", label: "Male" },
    Choice { value: "female", label: "Female" },
    Choice { value: "other", label: "Other" },
];

/// Input type of a field. The kind decides the empty value, the accepted
/// [`FieldValue`] variant and the format check.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    Phone,
    Date,
    Number,
    Choice(&'static [Choice]),
    Flag,
    File(FileRules),
}

impl FieldKind {
    /// Short description used in rendered views.
    pub fn describe(&self) -> String {
        match self {
            FieldKind::Text | FieldKind::LongText => "text".to_string(),
            FieldKind::Email => "email".to_string(),
            FieldKind::Phone => "phone".to_string(),
            FieldKind::Date => "date, YYYY-MM-DD".to_string(),
            FieldKind::Number => "number".to_string(),
            FieldKind::Choice(options) => options
                .iter()
                .map(|c| c.value)
                .collect::<Vec<_>>()
                .join(" | "),
            FieldKind::Flag => "yes | no".to_string(),
            FieldKind::File(rules) => format!("file: {}", rules.describe_types()),
        }
    }

    fn empty_value(&self) -> FieldValue {
        match self {
            FieldKind::Flag => FieldValue::Flag(false),
            FieldKind::File(_) => FieldValue::File(None),
            _ => FieldValue::Text(String::new()),
        }
    }

    fn accepts(&self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (FieldKind::Flag, FieldValue::Flag(_))
                | (FieldKind::File(_), FieldValue::File(_))
                | (
                    FieldKind::Text
                        | FieldKind::LongText
                        | FieldKind::Email
                        | FieldKind::Phone
                        | FieldKind::Date
                        | FieldKind::Number
                        | FieldKind::Choice(_),
                    FieldValue::Text(_)
                )
        )
    }
}

/// When a field must be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
    /// Required only while the named flag of the same section is set
    When(&'static str),
}

/// Extra checks on top of the kind's format check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// At least a first and a last name
    FullName,
    /// Date of birth at least this many whole years ago
    MinAge(i16),
    /// Email address on the given domain, `@` included
    Domain(&'static str),
}

/// Definition of one field of a step.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub requirement: Requirement,
    pub read_only: bool,
    pub placeholder: Option<&'static str>,
    prompt: Option<&'static str>,
    invalid: Option<&'static str>,
    summary: Option<&'static str>,
    rules: Vec<Rule>,
}

impl FieldSpec {
    /// A required field.
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            requirement: Requirement::Required,
            read_only: false,
            placeholder: None,
            prompt: None,
            invalid: None,
            summary: None,
            rules: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.requirement = Requirement::Optional;
        self
    }

    pub fn required_when(mut self, flag: &'static str) -> Self {
        self.requirement = Requirement::When(flag);
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }

    /// Message shown when the field is required but empty.
    pub fn prompt(mut self, message: &'static str) -> Self {
        self.prompt = Some(message);
        self
    }

    /// Message shown instead of the validator's when the format check fails.
    pub fn invalid(mut self, message: &'static str) -> Self {
        self.invalid = Some(message);
        self
    }

    /// Label used in the aggregated missing-fields message at submission.
    pub fn summary(mut self, label: &'static str) -> Self {
        self.summary = Some(label);
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Value of a freshly created record.
    pub fn empty_value(&self) -> FieldValue {
        self.kind.empty_value()
    }

    /// Whether `value` has the variant this field stores.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        self.kind.accepts(value)
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, FieldKind::File(_))
    }

    /// Whether the field must be filled in, given the rest of its section.
    pub fn is_required(&self, section: &Section) -> bool {
        match self.requirement {
            Requirement::Required => true,
            Requirement::Optional => false,
            Requirement::When(flag) => section.flag(flag),
        }
    }

    /// Label listed in the missing-fields message.
    pub fn summary_label(&self) -> &'static str {
        self.summary.unwrap_or(self.label)
    }

    /// Message for a field left empty, `None` once it has a value.
    ///
    /// Text goes through [`validate_required`]; the field's own prompt, when
    /// it has one, replaces the generic message.
    pub fn check_required(&self, value: &FieldValue) -> Option<String> {
        let message = match value {
            FieldValue::Text(text) => validate_required(text)?,
            FieldValue::File(None) => "Please select a file".to_string(),
            FieldValue::Flag(false) => REQUIRED_MESSAGE.to_string(),
            FieldValue::File(Some(_)) | FieldValue::Flag(true) => return None,
        };
        Some(self.prompt.map_or(message, str::to_string))
    }

    /// Run the format check and extra rules on a non-empty value.
    pub fn check(&self, value: &FieldValue) -> Option<String> {
        let text = value.as_text().trim();
        let format_error = match &self.kind {
            FieldKind::Email => validate_email(text),
            FieldKind::Phone => (!validate_phone_number(text)).then(|| PHONE_HINT.to_string()),
            FieldKind::Date => validate_date_of_birth(text, self.min_age()),
            FieldKind::Number => validate_positive_number(text),
            FieldKind::Choice(options) => {
                let values: Vec<&str> = options.iter().map(|c| c.value).collect();
                validate_choice(text, &values)
            }
            FieldKind::File(rules) => validate_file(value.as_file(), rules)
                .err()
                .map(|e| e.to_string()),
            FieldKind::Text | FieldKind::LongText | FieldKind::Flag => None,
        };
        if let Some(message) = format_error {
            return Some(self.invalid.map(str::to_string).unwrap_or(message));
        }

        self.rules.iter().find_map(|rule| match rule {
            Rule::FullName => validate_full_name(text),
            Rule::Domain(domain) => validate_domain_email(text, domain),
            Rule::MinAge(_) => None,
        })
    }

    fn min_age(&self) -> i16 {
        self.rules
            .iter()
            .find_map(|rule| match rule {
                Rule::MinAge(age) => Some(*age),
                _ => None,
            })
            .unwrap_or(0)
    }
}

/// One wizard step: a title, the section it owns and its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSpec {
    pub title: &'static str,
    pub section: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl StepSpec {
    pub fn new(title: &'static str, section: &'static str) -> Self {
        Self {
            title,
            section,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Field definition by name.
    pub fn field_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Section with every field set to its empty value.
    pub fn empty_section(&self) -> Section {
        self.fields
            .iter()
            .map(|f| (f.name.to_string(), f.empty_value()))
            .collect()
    }
}

/// The complete definition of one public form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    pub kind: FormKind,
    pub title: &'static str,
    pub steps: Vec<StepSpec>,
}

impl FormSchema {
    /// Schema of the given form.
    pub fn for_kind(kind: FormKind) -> Self {
        match kind {
            FormKind::Join => join::join_schema(),
            FormKind::Update => join::update_schema(),
            FormKind::Program => program::program_schema(),
        }
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, index: usize) -> Option<&StepSpec> {
        self.steps.get(index)
    }

    pub fn last_step(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Step owning `section`.
    pub fn step_for_section(&self, section: &str) -> Option<&StepSpec> {
        self.steps.iter().find(|s| s.section == section)
    }

    /// Field definition by section and name.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::InvalidInput` for an unknown section or field.
    pub fn field(&self, section: &str, field: &str) -> Result<&FieldSpec> {
        let step = self.step_for_section(section).ok_or_else(|| {
            PortalError::invalid_input(format!("{section}.{field}")).with_reason(format!(
                "unknown section '{section}' for the {} form",
                self.kind.as_str()
            ))
        })?;
        step.field_spec(field).ok_or_else(|| {
            PortalError::invalid_input(format!("{section}.{field}"))
                .with_reason(format!("unknown field '{field}' in section '{section}'"))
        })
    }

    /// A record with every section and field initialised to empty values.
    pub fn empty_record(&self) -> SubmissionRecord {
        let mut record = SubmissionRecord::new(self.kind);
        for step in &self.steps {
            record
                .sections
                .insert(step.section.to_string(), step.empty_section());
        }
        record
    }

    /// Whole-record validation run before submission.
    ///
    /// Missing required fields across all sections are reported together by
    /// label; only when nothing is missing are the field rules checked.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Incomplete` listing every missing field, or
    /// `PortalError::Validation` keyed by `section.field`.
    pub fn validate_record(&self, record: &SubmissionRecord) -> Result<()> {
        let empty = Section::default();
        let mut missing = Vec::new();
        for step in &self.steps {
            let section = record.section(step.section).unwrap_or(&empty);
            missing.extend(step.missing(section));
        }
        if !missing.is_empty() {
            return Err(PortalError::Incomplete {
                message: format!(
                    "Please fill in all required fields:\n{}",
                    missing.join("\n")
                ),
            });
        }

        let mut errors = ValidationResult::default();
        for step in &self.steps {
            let section = record.section(step.section).unwrap_or(&empty);
            errors.extend_prefixed(step.section, step.validate(section));
        }
        if errors.is_valid() {
            Ok(())
        } else {
            Err(PortalError::Validation { errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileAttachment;

    #[test]
    fn test_schemas_have_expected_steps() {
        let titles = |kind| {
            FormSchema::for_kind(kind)
                .steps
                .iter()
                .map(|s| s.title)
                .collect::<Vec<_>>()
        };
        assert_eq!(
            titles(FormKind::Join),
            vec!["Personal Information", "Emergency Contact", "Education"]
        );
        assert_eq!(titles(FormKind::Update).len(), 3);
        assert_eq!(
            titles(FormKind::Program),
            vec![
                "Select Program",
                "Personal Information",
                "Farm Details",
                "Grant Purpose",
                "Training Preferences",
                "Motivation Statement",
                "Declaration"
            ]
        );
    }

    #[test]
    fn test_empty_record_defaults() {
        let record = FormSchema::for_kind(FormKind::Program).empty_record();
        assert_eq!(
            record.field("declaration", "agreed"),
            Some(&FieldValue::Flag(false))
        );
        assert_eq!(record.field("grant", "budget"), Some(&FieldValue::File(None)));
        assert_eq!(record.text("farm", "size"), "");
        assert!(record.token.is_none());
    }

    #[test]
    fn test_update_schema_differs_from_join() {
        let join = FormSchema::for_kind(FormKind::Join);
        let update = FormSchema::for_kind(FormKind::Update);
        assert!(join.field("personal", "workEmail").is_err());
        assert!(update.field("personal", "email").unwrap().read_only);
        assert!(!join.field("personal", "email").unwrap().read_only);
    }

    #[test]
    fn test_field_lookup_errors() {
        let schema = FormSchema::for_kind(FormKind::Join);
        let err = schema.field("farm", "size").unwrap_err();
        assert!(err.to_string().contains("unknown section 'farm'"));
        let err = schema.field("personal", "shoeSize").unwrap_err();
        assert!(err.to_string().contains("unknown field 'shoeSize'"));
    }

    #[test]
    fn test_validate_record_lists_missing_labels() {
        let schema = FormSchema::for_kind(FormKind::Program);
        let mut record = schema.empty_record();
        record
            .set_field("program", "category", FieldValue::Text("rural".into()))
            .unwrap();

        let err = schema.validate_record(&record).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Please fill in all required fields:\n"));
        assert!(!message.contains("Program Category"));
        assert!(message.contains("\nBudget Document"));
        assert!(message.contains("\nDeclaration Agreement"));
        assert!(!message.contains("Previous Training ID"));
    }

    #[test]
    fn test_conditional_requirement() {
        let schema = FormSchema::for_kind(FormKind::Program);
        let spec = schema.field("program", "trainingId").unwrap();
        let mut section = schema.step(0).unwrap().empty_section();
        assert!(!spec.is_required(&section));
        section.set("previousTraining", FieldValue::Flag(true));
        assert!(spec.is_required(&section));
    }

    #[test]
    fn test_field_check_uses_kind_and_rules() {
        let schema = FormSchema::for_kind(FormKind::Update);
        let work = schema.field("personal", "workEmail").unwrap();
        assert_eq!(
            work.check(&FieldValue::Text("ada@gmail.com".into())).as_deref(),
            Some("Please enter a valid @sugria.com email address")
        );
        assert!(work.check(&FieldValue::Text("ada@sugria.com".into())).is_none());

        let phone = schema.field("emergency", "phoneNumber").unwrap();
        assert_eq!(
            phone.check(&FieldValue::Text("12345".into())).as_deref(),
            Some(PHONE_HINT)
        );
    }

    #[test]
    fn test_file_field_accepts_only_files() {
        let schema = FormSchema::for_kind(FormKind::Program);
        let budget = schema.field("grant", "budget").unwrap();
        assert!(budget.accepts(&FieldValue::File(None)));
        assert!(!budget.accepts(&FieldValue::Text("budget.pdf".into())));

        let image = FileAttachment::new("budget.png", "image/png", 10, "/tmp/budget.png");
        assert_eq!(
            budget.check(&FieldValue::File(Some(image))).as_deref(),
            Some("File must be PDF, DOC, or DOCX")
        );
    }
}
