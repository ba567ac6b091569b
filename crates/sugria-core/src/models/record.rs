//! Submission record: the data a wizard collects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{FileAttachment, FormKind};
use crate::error::{PortalError, Result};

/// A single field value inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    /// Free text, choices, dates and numbers as typed
    Text(String),

    /// Checkbox-style boolean
    Flag(bool),

    /// Upload slot, empty until a file is attached
    File(Option<FileAttachment>),
}

impl FieldValue {
    /// Text content, or `""` for non-text values.
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// Boolean content, `false` for non-flag values.
    pub fn as_flag(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }

    /// Attached file, if any.
    pub fn as_file(&self) -> Option<&FileAttachment> {
        match self {
            FieldValue::File(file) => file.as_ref(),
            _ => None,
        }
    }

    /// Whether the value counts as "not filled in": blank text, an unset
    /// flag, or an empty upload slot.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Flag(b) => !b,
            FieldValue::File(f) => f.is_none(),
        }
    }
}

/// One named namespace of fields, owned by one wizard step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section(BTreeMap<String, FieldValue>);

impl Section {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Set `field`, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.0.insert(field.into(), value)
    }

    /// Text of `field`, or `""` when absent.
    pub fn text(&self, field: &str) -> &str {
        self.get(field).map(FieldValue::as_text).unwrap_or("")
    }

    /// Flag of `field`, or `false` when absent.
    pub fn flag(&self, field: &str) -> bool {
        self.get(field).is_some_and(FieldValue::as_flag)
    }

    /// Attachment in `field`, if any.
    pub fn file(&self, field: &str) -> Option<&FileAttachment> {
        self.get(field).and_then(FieldValue::as_file)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for Section {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything a wizard collects, grouped into independent sections.
///
/// One record type serves all three forms. The [`FormKind`] decides which
/// sections exist; the recovery `token` is only set for
/// [`FormKind::Update`].
///
/// # Examples
///
/// ```rust
/// use sugria_core::forms::FormSchema;
/// use sugria_core::models::{FieldValue, FormKind};
///
/// let mut record = FormSchema::for_kind(FormKind::Join).empty_record();
/// record.set_field("personal", "fullName", FieldValue::Text("Ada Obi".into()))?;
/// assert_eq!(record.text("personal", "fullName"), "Ada Obi");
/// assert_eq!(record.text("emergency", "name"), "");
/// # Ok::<(), sugria_core::PortalError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Form this record belongs to
    pub kind: FormKind,

    /// Sections keyed by name
    pub sections: BTreeMap<String, Section>,

    /// Recovery token for the update form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl SubmissionRecord {
    /// An empty record with no sections. Use
    /// [`FormSchema::empty_record`](crate::forms::FormSchema::empty_record)
    /// for a record initialised with every field of a form.
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            sections: BTreeMap::new(),
            token: None,
        }
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }

    /// Set one field of one section. Other sections are never touched.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::InvalidInput` if the section does not exist.
    pub fn set_field(&mut self, section: &str, field: &str, value: FieldValue) -> Result<()> {
        let target = self.sections.get_mut(section).ok_or_else(|| {
            PortalError::invalid_input(format!("{section}.{field}"))
                .with_reason(format!("unknown section '{section}'"))
        })?;
        target.set(field, value);
        Ok(())
    }

    pub fn field(&self, section: &str, field: &str) -> Option<&FieldValue> {
        self.section(section).and_then(|s| s.get(field))
    }

    /// Text of `section.field`, or `""` when absent.
    pub fn text(&self, section: &str, field: &str) -> &str {
        self.section(section).map(|s| s.text(field)).unwrap_or("")
    }

    /// Flag of `section.field`, or `false` when absent.
    pub fn flag(&self, section: &str, field: &str) -> bool {
        self.section(section).is_some_and(|s| s.flag(field))
    }

    /// Attachment in `section.field`, if any.
    pub fn file(&self, section: &str, field: &str) -> Option<&FileAttachment> {
        self.section(section).and_then(|s| s.file(field))
    }

    /// Every attached file as `(section, field, attachment)`.
    pub fn attachments(&self) -> impl Iterator<Item = (&str, &str, &FileAttachment)> {
        self.sections.iter().flat_map(|(section, fields)| {
            fields
                .iter()
                .filter_map(move |(field, value)| value.as_file().map(|f| (section.as_str(), field, f)))
        })
    }
}
