//! Upload validation for document and identity attachments.

use thiserror::Error;

use crate::models::FileAttachment;

/// Default upload limit: 5 MiB.
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// One accepted file type: its MIME aliases, extensions and display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedType {
    pub mimes: &'static [&'static str],
    pub extensions: &'static [&'static str],
    pub label: &'static str,
}

pub const PDF: AllowedType = AllowedType {
    mimes: &["application/pdf"],
    extensions: &["pdf"],
    label: "PDF",
};

pub const DOC: AllowedType = AllowedType {
    mimes: &["application/msword"],
    extensions: &["doc"],
    label: "DOC",
};

pub const DOCX: AllowedType = AllowedType {
    mimes: &["application/vnd.openxmlformats-officedocument.wordprocessingml.document"],
    extensions: &["docx"],
    label: "DOCX",
};

pub const JPEG: AllowedType = AllowedType {
    mimes: &["image/jpeg", "image/jpg"],
    extensions: &["jpg", "jpeg"],
    label: "JPG",
};

pub const PNG: AllowedType = AllowedType {
    mimes: &["image/png"],
    extensions: &["png"],
    label: "PNG",
};

const DOCUMENT_TYPES: &[AllowedType] = &[PDF, DOC, DOCX];
const IDENTITY_TYPES: &[AllowedType] = &[PDF, JPEG, PNG];

/// Limits applied to one upload slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRules {
    pub max_size: u64,
    pub allowed: &'static [AllowedType],
}

impl FileRules {
    /// PDF, DOC or DOCX up to 5 MiB.
    pub const fn documents() -> Self {
        Self {
            max_size: MAX_FILE_SIZE,
            allowed: DOCUMENT_TYPES,
        }
    }

    /// PDF, JPEG or PNG up to 5 MiB, for proof-of-identity uploads.
    pub const fn identity() -> Self {
        Self {
            max_size: MAX_FILE_SIZE,
            allowed: IDENTITY_TYPES,
        }
    }

    /// Same types with a different size limit.
    pub const fn with_max_size(self, max_size: u64) -> Self {
        Self { max_size, ..self }
    }

    /// Human-readable list of accepted types, e.g. `PDF, DOC, or DOCX`.
    pub fn describe_types(&self) -> String {
        let labels: Vec<&str> = self.allowed.iter().map(|t| t.label).collect();
        match labels.as_slice() {
            [] => String::new(),
            [only] => (*only).to_string(),
            [a, b] => format!("{a} or {b}"),
            [rest @ .., last] => format!("{}, or {last}", rest.join(", ")),
        }
    }

    fn accepts(&self, file: &FileAttachment) -> bool {
        let declared = file.content_type.trim().to_lowercase();
        if declared.is_empty() || declared == "application/octet-stream" {
            let Some(ext) = file.extension() else {
                return false;
            };
            self.allowed.iter().any(|t| t.extensions.contains(&ext.as_str()))
        } else {
            self.allowed.iter().any(|t| t.mimes.contains(&declared.as_str()))
        }
    }
}

impl Default for FileRules {
    fn default() -> Self {
        Self::documents()
    }
}

/// Why an upload was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("Please select a file")]
    Missing,
    #[error("File size must be less than {}MB", max / (1024 * 1024))]
    TooLarge { size: u64, max: u64 },
    #[error("File must be {expected}")]
    UnsupportedType { found: String, expected: String },
}

/// Check an optional attachment against `rules`.
///
/// Size is checked before type, so an oversized file is rejected whatever
/// its type.
///
/// # Examples
///
/// ```rust
/// use sugria_core::models::FileAttachment;
/// use sugria_core::validation::{validate_file, FileError, FileRules};
///
/// let budget = FileAttachment::new("budget.pdf", "application/pdf", 1024, "/tmp/budget.pdf");
/// assert!(validate_file(Some(&budget), &FileRules::documents()).is_ok());
/// assert_eq!(validate_file(None, &FileRules::documents()), Err(FileError::Missing));
/// ```
pub fn validate_file(file: Option<&FileAttachment>, rules: &FileRules) -> Result<(), FileError> {
    let file = file.ok_or(FileError::Missing)?;

    if file.size > rules.max_size {
        return Err(FileError::TooLarge {
            size: file.size,
            max: rules.max_size,
        });
    }

    if !rules.accepts(file) {
        return Err(FileError::UnsupportedType {
            found: file.content_type.clone(),
            expected: rules.describe_types(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(name: &str, mime: &str, size: u64) -> FileAttachment {
        FileAttachment::new(name, mime, size, format!("/tmp/{name}"))
    }

    #[test]
    fn test_missing_file() {
        assert_eq!(
            validate_file(None, &FileRules::documents()),
            Err(FileError::Missing)
        );
        assert_eq!(FileError::Missing.to_string(), "Please select a file");
    }

    #[test]
    fn test_oversized_file_rejected_regardless_of_type() {
        let rules = FileRules::documents();
        for mime in ["application/pdf", "image/png", "text/plain", ""] {
            let file = attachment("big.pdf", mime, MAX_FILE_SIZE + 1);
            let err = validate_file(Some(&file), &rules).unwrap_err();
            assert!(matches!(err, FileError::TooLarge { .. }), "mime {mime}");
            assert_eq!(err.to_string(), "File size must be less than 5MB");
        }
    }

    #[test]
    fn test_exact_limit_accepted() {
        let file = attachment("budget.pdf", "application/pdf", MAX_FILE_SIZE);
        assert!(validate_file(Some(&file), &FileRules::documents()).is_ok());
    }

    #[test]
    fn test_type_outside_allowed_set_rejected() {
        let image = attachment("budget.png", "image/png", 10);
        let err = validate_file(Some(&image), &FileRules::documents()).unwrap_err();
        assert_eq!(err.to_string(), "File must be PDF, DOC, or DOCX");

        // identity slot accepts images but not word documents
        assert!(validate_file(Some(&image), &FileRules::identity()).is_ok());
        let doc = attachment("id.doc", "application/msword", 10);
        let err = validate_file(Some(&doc), &FileRules::identity()).unwrap_err();
        assert_eq!(err.to_string(), "File must be PDF, JPG, or PNG");
    }

    #[test]
    fn test_extension_fallback_when_mime_unreliable() {
        let rules = FileRules::documents();
        let docx = attachment("plan.DOCX", "application/octet-stream", 10);
        assert!(validate_file(Some(&docx), &rules).is_ok());

        let unknown = attachment("plan.xls", "", 10);
        assert!(validate_file(Some(&unknown), &rules).is_err());

        let no_ext = attachment("plan", "", 10);
        assert!(validate_file(Some(&no_ext), &rules).is_err());
    }

    #[test]
    fn test_custom_limit() {
        let rules = FileRules::documents().with_max_size(1024);
        let file = attachment("budget.pdf", "application/pdf", 2048);
        assert!(matches!(
            validate_file(Some(&file), &rules),
            Err(FileError::TooLarge { size: 2048, max: 1024 })
        ));
    }

    #[test]
    fn test_describe_types() {
        assert_eq!(FileRules::documents().describe_types(), "PDF, DOC, or DOCX");
        let two = FileRules {
            max_size: 1,
            allowed: &[PDF, PNG],
        };
        assert_eq!(two.describe_types(), "PDF or PNG");
    }
}
