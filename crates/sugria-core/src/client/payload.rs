//! Encoding of a [`SubmissionRecord`] into a request for the API.
//!
//! | Form    | Method | Path                          | Body      |
//! |---------|--------|-------------------------------|-----------|
//! | join    | POST   | `/members/join-movement`      | JSON      |
//! | update  | PUT    | `/members/update/{token}`     | JSON      |
//! | program | POST   | `/programs/applications`      | multipart |

use jiff::civil::Date;
use serde::Serialize;

use crate::{
    error::{PortalError, Result},
    models::{FileAttachment, FormKind, SubmissionRecord},
    validation::format_phone_number,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

/// Request body of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(serde_json::Value),
    /// Text parts in order, then file parts keyed by part name
    Multipart {
        fields: Vec<(String, String)>,
        files: Vec<(String, FileAttachment)>,
    },
}

/// A fully encoded request, ready for a [`Submitter`](super::Submitter).
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub kind: FormKind,
    pub method: Method,
    /// Path relative to the API base URL
    pub path: String,
    /// Identifier appended to `path` as one escaped segment
    pub resource: Option<String>,
    pub body: Body,
}

impl Submission {
    /// Text value of a multipart field, if this is a multipart body.
    pub fn form_field(&self, name: &str) -> Option<&str> {
        match &self.body {
            Body::Multipart { fields, .. } => fields
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            Body::Json(_) => None,
        }
    }

    /// File part of a multipart body, if any.
    pub fn file_part(&self, name: &str) -> Option<&FileAttachment> {
        match &self.body {
            Body::Multipart { files, .. } => files
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, file)| file),
            Body::Json(_) => None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmergencyContactBody<'a> {
    name: &'a str,
    relationship: &'a str,
    phone_number: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EducationBody<'a> {
    highest_level: &'a str,
    institution_name: &'a str,
    field_of_study: &'a str,
    other_certifications: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MemberBody<'a> {
    first_name: &'a str,
    last_name: String,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    work_email: Option<&'a str>,
    date_of_birth: String,
    gender: String,
    nationality: &'a str,
    phone_number: String,
    residential_address: &'a str,
    emergency_contact: EmergencyContactBody<'a>,
    education: EducationBody<'a>,
}

fn phone(record: &SubmissionRecord, section: &str, field: &str) -> Result<String> {
    format_phone_number(record.text(section, field)).map_err(|e| {
        PortalError::invalid_input(format!("{section}.{field}")).with_reason(e.to_string())
    })
}

/// `YYYY-MM-DD` as an ISO timestamp at midnight UTC.
fn midnight_utc(value: &str) -> Result<String> {
    let date: Date = value.trim().parse().map_err(|e: jiff::Error| {
        PortalError::invalid_input("personal.dateOfBirth").with_reason(e.to_string())
    })?;
    Ok(format!("{date}T00:00:00.000Z"))
}

/// Split a full name at the first run of whitespace.
fn split_name(full_name: &str) -> (&str, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or("");
    (first, parts.collect::<Vec<_>>().join(" "))
}

fn member_body(record: &SubmissionRecord) -> Result<serde_json::Value> {
    let update = record.kind == FormKind::Update;
    let (first_name, last_name) = split_name(record.text("personal", "fullName"));
    let certifications = record.text("education", "certifications").trim();
    let other_certifications = match (certifications.is_empty(), update) {
        (false, _) => Some(certifications),
        (true, false) => Some("None"),
        (true, true) => None,
    };

    let body = MemberBody {
        first_name,
        last_name,
        email: record.text("personal", "email").trim(),
        work_email: update.then(|| record.text("personal", "workEmail").trim()),
        date_of_birth: midnight_utc(record.text("personal", "dateOfBirth"))?,
        gender: record.text("personal", "gender").to_lowercase(),
        nationality: record.text("personal", "nationality"),
        phone_number: phone(record, "personal", "phoneNumber")?,
        residential_address: record.text("personal", "address"),
        emergency_contact: EmergencyContactBody {
            name: record.text("emergency", "name"),
            relationship: record.text("emergency", "relationship"),
            phone_number: phone(record, "emergency", "phoneNumber")?,
        },
        education: EducationBody {
            highest_level: record.text("education", "level"),
            institution_name: record.text("education", "institution"),
            field_of_study: record.text("education", "fieldOfStudy"),
            other_certifications,
        },
    };
    Ok(serde_json::to_value(body)?)
}

/// Numeric string in its shortest form, e.g. `"2.50"` becomes `"2.5"`.
fn canonical_number(value: &str) -> Result<String> {
    let number: f64 = value.trim().parse().map_err(|_| {
        PortalError::invalid_input("farm.size").with_reason(format!("'{value}' is not a number"))
    })?;
    Ok(number.to_string())
}

fn program_body(record: &SubmissionRecord) -> Result<Body> {
    let text = |section: &str, field: &str| record.text(section, field).to_string();
    let mut fields = vec![
        ("program[category]".to_string(), text("program", "category")),
        (
            "program[previousTraining]".to_string(),
            record.flag("program", "previousTraining").to_string(),
        ),
    ];
    let training_id = record.text("program", "trainingId").trim();
    if !training_id.is_empty() {
        fields.push(("program[trainingId]".to_string(), training_id.to_string()));
    }

    fields.extend([
        ("personal[fullName]".to_string(), text("personal", "fullName")),
        ("personal[email]".to_string(), text("personal", "email")),
        (
            "personal[phoneNumber]".to_string(),
            phone(record, "personal", "phoneNumber")?,
        ),
        ("personal[address]".to_string(), text("personal", "address")),
        ("personal[gender]".to_string(), text("personal", "gender")),
        ("personal[dateOfBirth]".to_string(), text("personal", "dateOfBirth")),
        ("farm[location]".to_string(), text("farm", "location")),
        (
            "farm[size]".to_string(),
            canonical_number(record.text("farm", "size"))?,
        ),
        ("farm[type]".to_string(), text("farm", "type")),
        ("farm[practices]".to_string(), text("farm", "practices")),
        ("farm[challenges]".to_string(), text("farm", "challenges")),
        ("grant[outcomes]".to_string(), text("grant", "outcomes")),
        ("training[preference]".to_string(), text("training", "preference")),
        ("motivation[statement]".to_string(), text("motivation", "statement")),
        (
            "motivation[implementation]".to_string(),
            text("motivation", "implementation"),
        ),
        (
            "declaration[agreed]".to_string(),
            record.flag("declaration", "agreed").to_string(),
        ),
        (
            "declaration[officerName]".to_string(),
            text("declaration", "officerName"),
        ),
    ]);

    let files = [("budget", "grant", "budget"), ("identity", "motivation", "identity")]
        .into_iter()
        .filter_map(|(part, section, field)| {
            record
                .file(section, field)
                .map(|file| (part.to_string(), file.clone()))
        })
        .collect();

    Ok(Body::Multipart { fields, files })
}

/// Encode a validated record into the request for its form.
///
/// # Errors
///
/// Returns `PortalError::InvalidInput` for values that cannot be encoded
/// (unparsable dates, numbers or phone numbers) and `PortalError::InvalidLink`
/// for an update record without a token.
pub fn encode(record: &SubmissionRecord) -> Result<Submission> {
    let (method, path, resource, body) = match record.kind {
        FormKind::Join => (
            Method::Post,
            "/members/join-movement",
            None,
            Body::Json(member_body(record)?),
        ),
        FormKind::Update => {
            let token = record
                .token
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .ok_or(PortalError::InvalidLink)?;
            (
                Method::Put,
                "/members/update",
                Some(token.to_string()),
                Body::Json(member_body(record)?),
            )
        }
        FormKind::Program => (
            Method::Post,
            "/programs/applications",
            None,
            program_body(record)?,
        ),
    };

    Ok(Submission {
        kind: record.kind,
        method,
        path: path.to_string(),
        resource,
        body,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{forms::FormSchema, models::FieldValue};

    fn text(record: &mut SubmissionRecord, section: &str, field: &str, value: &str) {
        record
            .set_field(section, field, FieldValue::Text(value.to_string()))
            .expect("Failed to set field");
    }

    fn create_join_record(kind: FormKind) -> SubmissionRecord {
        let mut record = FormSchema::for_kind(kind).empty_record();
        text(&mut record, "personal", "fullName", "Ada  Chioma Obi");
        text(&mut record, "personal", "email", "ada@example.com");
        text(&mut record, "personal", "dateOfBirth", "1990-04-12");
        text(&mut record, "personal", "gender", "Female");
        text(&mut record, "personal", "nationality", "Nigerian");
        text(&mut record, "personal", "phoneNumber", "0801 234 5678");
        text(&mut record, "personal", "address", "12 Farm Road, Abuja");
        text(&mut record, "emergency", "name", "Musa Obi");
        text(&mut record, "emergency", "relationship", "Brother");
        text(&mut record, "emergency", "phoneNumber", "2349087654321");
        text(&mut record, "education", "level", "degree");
        text(&mut record, "education", "institution", "University of Abuja");
        text(&mut record, "education", "fieldOfStudy", "Agronomy");
        record
    }

    #[test]
    fn test_encode_join() {
        let record = create_join_record(FormKind::Join);
        let submission = encode(&record).expect("Failed to encode");

        assert_eq!(submission.method, Method::Post);
        assert_eq!(submission.path, "/members/join-movement");
        let Body::Json(body) = submission.body else {
            panic!("expected a JSON body");
        };
        assert_eq!(body["firstName"], "Ada");
        assert_eq!(body["lastName"], "Chioma Obi");
        assert_eq!(body["dateOfBirth"], "1990-04-12T00:00:00.000Z");
        assert_eq!(body["gender"], "female");
        assert_eq!(body["phoneNumber"], "+2348012345678");
        assert_eq!(body["residentialAddress"], "12 Farm Road, Abuja");
        assert_eq!(
            body["emergencyContact"],
            json!({"name": "Musa Obi", "relationship": "Brother", "phoneNumber": "+2349087654321"})
        );
        assert_eq!(body["education"]["otherCertifications"], "None");
        assert!(body.get("workEmail").is_none());
    }

    #[test]
    fn test_encode_update_requires_token() {
        let mut record = create_join_record(FormKind::Update);
        text(&mut record, "personal", "workEmail", "ada@sugria.com");
        assert!(matches!(encode(&record), Err(PortalError::InvalidLink)));

        record.token = Some("abc123".into());
        let submission = encode(&record).expect("Failed to encode");
        assert_eq!(submission.method, Method::Put);
        assert_eq!(submission.path, "/members/update");
        assert_eq!(submission.resource.as_deref(), Some("abc123"));
        let Body::Json(body) = submission.body else {
            panic!("expected a JSON body");
        };
        assert_eq!(body["workEmail"], "ada@sugria.com");
        assert!(body["education"]["otherCertifications"].is_null());
    }

    #[test]
    fn test_encode_program_multipart() {
        let mut record = FormSchema::for_kind(FormKind::Program).empty_record();
        text(&mut record, "program", "category", "rural");
        text(&mut record, "personal", "phoneNumber", "08012345678");
        text(&mut record, "farm", "size", "2.50");
        record
            .set_field("declaration", "agreed", FieldValue::Flag(true))
            .unwrap();
        let budget = FileAttachment::new("budget.pdf", "application/pdf", 10, "/tmp/budget.pdf");
        record
            .set_field("grant", "budget", FieldValue::File(Some(budget.clone())))
            .unwrap();

        let submission = encode(&record).expect("Failed to encode");
        assert_eq!(submission.path, "/programs/applications");
        assert_eq!(submission.form_field("program[category]"), Some("rural"));
        assert_eq!(submission.form_field("program[previousTraining]"), Some("false"));
        assert_eq!(submission.form_field("program[trainingId]"), None);
        assert_eq!(
            submission.form_field("personal[phoneNumber]"),
            Some("+2348012345678")
        );
        assert_eq!(submission.form_field("farm[size]"), Some("2.5"));
        assert_eq!(submission.form_field("declaration[agreed]"), Some("true"));
        assert_eq!(submission.file_part("budget"), Some(&budget));
        assert!(submission.file_part("identity").is_none());
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("Ada"), ("Ada", String::new()));
        assert_eq!(split_name("  Ada   Obi "), ("Ada", "Obi".to_string()));
    }

    #[test]
    fn test_canonical_number() {
        assert_eq!(canonical_number("2.50").unwrap(), "2.5");
        assert_eq!(canonical_number("10").unwrap(), "10");
        assert!(canonical_number("ten").is_err());
    }
}
