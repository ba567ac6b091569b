//! Field validators.
//!
//! Every function here is pure and deterministic: it takes a primitive value
//! (or a file handle) and returns an error message, a boolean, or a typed
//! error. Validators know nothing about which step or section called them;
//! the form schemas in [`crate::forms`] decide which validator applies to
//! which field.
//!
//! # Examples
//!
//! ```rust
//! use sugria_core::validation::{format_phone_number, validate_email, validate_required};
//!
//! assert!(validate_required("   ").is_some());
//! assert!(validate_email("ada@sugria.com").is_none());
//! assert_eq!(format_phone_number("08012345678").unwrap(), "+2348012345678");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub mod date;
pub mod file;
pub mod phone;

pub use date::{validate_date_of_birth, validate_date_of_birth_on};
pub use file::{validate_file, FileError, FileRules, MAX_FILE_SIZE};
pub use phone::{format_phone_number, validate_phone_number, PhoneError};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Message for a required value that was left blank.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Fails if the value is empty or whitespace-only.
pub fn validate_required(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(REQUIRED_MESSAGE.to_string())
    } else {
        None
    }
}

/// Fails unless the value has a `local@domain.tld` shape.
pub fn validate_email(value: &str) -> Option<String> {
    if EMAIL_RE.is_match(value.trim()) {
        None
    } else {
        Some("Please enter a valid email address".to_string())
    }
}

/// Fails unless the value is an email address on the given domain.
///
/// `domain` includes the `@`, e.g. `"@sugria.com"`.
pub fn validate_domain_email(value: &str, domain: &str) -> Option<String> {
    let value = value.trim();
    if validate_email(value).is_none() && value.to_lowercase().ends_with(domain) {
        None
    } else {
        Some(format!("Please enter a valid {domain} email address"))
    }
}

/// Fails unless the value contains at least a first and a last name.
pub fn validate_full_name(value: &str) -> Option<String> {
    if value.split_whitespace().count() < 2 {
        Some("Please enter both first and last name".to_string())
    } else {
        None
    }
}

/// Fails unless the value parses as a number greater than zero.
pub fn validate_positive_number(value: &str) -> Option<String> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => None,
        _ => Some("Please enter a valid number greater than 0".to_string()),
    }
}

/// Fails unless the value is one of `options`.
pub fn validate_choice(value: &str, options: &[&str]) -> Option<String> {
    if options.contains(&value) {
        None
    } else {
        Some(format!("Please choose one of: {}", options.join(", ")))
    }
}

/// Per-field validation outcome for one step or one whole record.
///
/// Maps field name to error message, keeping the order in which errors were
/// found. An empty result means every field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationResult(Vec<(String, String)>);

impl ValidationResult {
    /// Record an error for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.0.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = message,
            None => self.0.push((field, message)),
        }
    }

    /// Error message for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    /// Whether `field` has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Whether no field has an error.
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(field, message)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// Append every entry of `other`, prefixing field names with `prefix`.
    pub fn extend_prefixed(&mut self, prefix: &str, other: ValidationResult) {
        for (field, message) in other.0 {
            self.insert(format!("{prefix}.{field}"), message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("").is_some());
        assert!(validate_required(" \t\n").is_some());
        assert!(validate_required("Ada").is_none());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ada@example.com").is_none());
        assert!(validate_email("  ada@example.org ").is_none());
        assert!(validate_email("ada@example").is_some());
        assert!(validate_email("ada example@x.com").is_some());
        assert!(validate_email("@example.com").is_some());
        assert!(validate_email("").is_some());
    }

    #[test]
    fn test_validate_domain_email() {
        assert!(validate_domain_email("ada@sugria.com", "@sugria.com").is_none());
        assert!(validate_domain_email("Ada@SUGRIA.com", "@sugria.com").is_none());
        let err = validate_domain_email("ada@gmail.com", "@sugria.com").unwrap();
        assert_eq!(err, "Please enter a valid @sugria.com email address");
    }

    #[test]
    fn test_validate_full_name() {
        assert!(validate_full_name("Ada Obi").is_none());
        assert!(validate_full_name("Ada Chioma Obi").is_none());
        assert!(validate_full_name("Ada").is_some());
        assert!(validate_full_name("  Ada   ").is_some());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("2.5").is_none());
        assert!(validate_positive_number(" 10 ").is_none());
        assert!(validate_positive_number("0").is_some());
        assert!(validate_positive_number("-3").is_some());
        assert!(validate_positive_number("two").is_some());
        assert!(validate_positive_number("NaN").is_some());
    }

    #[test]
    fn test_validate_choice() {
        let options = ["in-person", "virtual"];
        assert!(validate_choice("virtual", &options).is_none());
        let err = validate_choice("hybrid", &options).unwrap();
        assert_eq!(err, "Please choose one of: in-person, virtual");
    }

    #[test]
    fn test_validation_result_replaces_and_keeps_order() {
        let mut result = ValidationResult::default();
        assert!(result.is_valid());

        result.insert("b", "first");
        result.insert("a", "second");
        result.insert("b", "replaced");

        let entries: Vec<_> = result.iter().collect();
        assert_eq!(entries, vec![("b", "replaced"), ("a", "second")]);
        assert_eq!(result.get("a"), Some("second"));
        assert!(!result.is_valid());
    }

    #[test]
    fn test_validation_result_prefixed_merge() {
        let mut step = ValidationResult::default();
        step.insert("size", "Please enter a valid number greater than 0");

        let mut all = ValidationResult::default();
        all.extend_prefixed("farm", step);
        assert!(all.contains("farm.size"));
    }
}
