use std::{future::Future, sync::Mutex};

use serde_json::json;

use super::{Wizard, WizardState};
use crate::{
    client::{Body, ServerResponse, SubmitError, Submission, Submitter},
    error::PortalError,
    models::{FieldValue, FileAttachment, FileCache, FormKind, TokenGrant},
    validation::MAX_FILE_SIZE,
};

struct MockSubmitter {
    response: Result<ServerResponse, SubmitError>,
    calls: Mutex<Vec<Submission>>,
}

impl MockSubmitter {
    fn accepting() -> Self {
        Self {
            response: Ok(ServerResponse {
                status: 201,
                body: json!({"message": "Application received", "data": {"applicationId": "APP-0042"}}),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing(error: SubmitError) -> Self {
        Self {
            response: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Submitter for MockSubmitter {
    fn submit(
        &self,
        submission: &Submission,
    ) -> impl Future<Output = Result<ServerResponse, SubmitError>> + Send {
        self.calls.lock().unwrap().push(submission.clone());
        std::future::ready(self.response.clone())
    }
}

fn pdf(name: &str) -> FileAttachment {
    FileAttachment::new(name, "application/pdf", 2048, format!("/tmp/{name}"))
}

fn set(wizard: &mut Wizard, section: &str, field: &str, value: &str) {
    wizard
        .set_input(section, field, value)
        .unwrap_or_else(|e| panic!("Failed to set {section}.{field}: {e}"));
}

fn fill_join_step(wizard: &mut Wizard) {
    match wizard.state().step {
        0 => {
            set(wizard, "personal", "fullName", "Ada Obi");
            if wizard.kind() == FormKind::Join {
                set(wizard, "personal", "email", "ada@example.com");
            } else {
                set(wizard, "personal", "workEmail", "ada@sugria.com");
            }
            set(wizard, "personal", "dateOfBirth", "1990-04-12");
            set(wizard, "personal", "gender", "female");
            set(wizard, "personal", "nationality", "Nigerian");
            set(wizard, "personal", "phoneNumber", "08012345678");
            set(wizard, "personal", "address", "12 Farm Road, Abuja");
        }
        1 => {
            set(wizard, "emergency", "name", "Musa Obi");
            set(wizard, "emergency", "relationship", "Brother");
            set(wizard, "emergency", "phoneNumber", "+234 809 876 5432");
        }
        _ => {
            set(wizard, "education", "level", "degree");
            set(wizard, "education", "institution", "University of Abuja");
            set(wizard, "education", "fieldOfStudy", "Agronomy");
        }
    }
}

fn completed_join(kind: FormKind) -> Wizard {
    let mut wizard = match kind {
        FormKind::Update => Wizard::for_update(
            "tok-123",
            &TokenGrant {
                email: "ada@example.com".into(),
                kind: "member".into(),
            },
        ),
        _ => Wizard::new(kind),
    };
    for _ in 0..2 {
        fill_join_step(&mut wizard);
        wizard.next().expect("Failed to advance");
    }
    fill_join_step(&mut wizard);
    wizard
}

fn fill_program_step(wizard: &mut Wizard) {
    match wizard.current_step().section {
        "program" => set(wizard, "program", "category", "rural"),
        "personal" => {
            set(wizard, "personal", "fullName", "Ngozi Eze");
            set(wizard, "personal", "email", "ngozi@example.com");
            set(wizard, "personal", "phoneNumber", "08012345678");
            set(wizard, "personal", "address", "Plot 4, Jos");
            set(wizard, "personal", "gender", "female");
            set(wizard, "personal", "dateOfBirth", "1985-02-01");
        }
        "farm" => {
            set(wizard, "farm", "location", "Jos, Plateau");
            set(wizard, "farm", "size", "2.50");
            set(wizard, "farm", "type", "Maize and goats");
            set(wizard, "farm", "practices", "Rain-fed");
            set(wizard, "farm", "challenges", "Irrigation");
        }
        "grant" => {
            set(wizard, "grant", "outcomes", "Double the yield");
            wizard
                .attach_file("grant", "budget", pdf("budget.pdf"))
                .expect("Failed to attach budget");
        }
        "training" => set(wizard, "training", "preference", "virtual"),
        "motivation" => {
            set(wizard, "motivation", "statement", "I want to grow");
            set(wizard, "motivation", "implementation", "Train my cooperative");
            wizard
                .attach_file("motivation", "identity", pdf("id.pdf"))
                .expect("Failed to attach identity");
        }
        _ => {
            set(wizard, "declaration", "agreed", "yes");
            set(wizard, "declaration", "officerName", "Musa Bello");
        }
    }
}

fn completed_program() -> Wizard {
    let mut wizard = Wizard::new(FormKind::Program);
    while !wizard.is_last_step() {
        fill_program_step(&mut wizard);
        wizard.next().expect("Failed to advance");
    }
    fill_program_step(&mut wizard);
    wizard
}

#[test]
fn test_next_blocked_by_empty_required_fields() {
    let mut wizard = Wizard::new(FormKind::Join);
    let err = wizard.next().unwrap_err();

    let PortalError::Validation { errors } = err else {
        panic!("expected a validation error");
    };
    assert!(errors.contains("fullName"));
    assert!(errors.contains("phoneNumber"));
    assert_eq!(wizard.state().step, 0);
    assert_eq!(wizard.errors(), &errors);
    assert!(wizard.view().fields.iter().any(|f| f.error.is_some()));
}

#[test]
fn test_change_clears_inline_error() {
    let mut wizard = Wizard::new(FormKind::Join);
    let _ = wizard.next();
    assert!(wizard.errors().contains("fullName"));

    set(&mut wizard, "personal", "fullName", "Ada Obi");
    assert!(!wizard.errors().contains("fullName"));
    assert!(wizard.errors().contains("email"));
}

#[test]
fn test_prev_never_validates() {
    let mut wizard = Wizard::new(FormKind::Join);
    fill_join_step(&mut wizard);
    wizard.next().expect("Failed to advance");

    set(&mut wizard, "emergency", "phoneNumber", "123");
    wizard.prev().expect("Failed to go back");
    assert_eq!(wizard.state().step, 0);
    assert_eq!(wizard.record().text("emergency", "phoneNumber"), "123");

    let err = wizard.prev().unwrap_err();
    assert!(matches!(err, PortalError::Navigation(_)));
}

#[test]
fn test_next_on_last_step_is_rejected() {
    let mut wizard = completed_join(FormKind::Join);
    assert!(wizard.is_last_step());
    assert!(matches!(wizard.next(), Err(PortalError::Navigation(_))));
    assert_eq!(wizard.state().step, 2);
}

#[test]
fn test_submit_before_last_step_is_rejected() {
    let mut wizard = Wizard::new(FormKind::Join);
    assert!(matches!(
        wizard.begin_submit(),
        Err(PortalError::Navigation(_))
    ));
}

#[tokio::test]
async fn test_successful_submit_resets_wizard() {
    let mut wizard = completed_join(FormKind::Join);
    let submitter = MockSubmitter::accepting();

    let outcome = wizard.submit(&submitter).await.expect("Failed to submit");
    assert_eq!(outcome.kind, FormKind::Join);
    assert_eq!(outcome.reference.as_deref(), Some("APP-0042"));
    assert_eq!(submitter.call_count(), 1);

    assert_eq!(wizard.state(), &WizardState::default());
    assert_eq!(wizard.record().text("personal", "fullName"), "");
    assert!(wizard.cache().is_empty());

    let calls = submitter.calls.lock().unwrap();
    let Body::Json(body) = &calls[0].body else {
        panic!("expected a JSON body");
    };
    assert_eq!(body["phoneNumber"], "+2348012345678");
    assert_eq!(body["emergencyContact"]["phoneNumber"], "+2348098765432");
}

#[tokio::test]
async fn test_conflict_keeps_record_and_step() {
    let mut wizard = completed_join(FormKind::Join);
    let before = wizard.record().clone();
    let submitter = MockSubmitter::failing(SubmitError::Conflict {
        message: "A member with this email already exists".into(),
    });

    let err = wizard.submit(&submitter).await.unwrap_err();
    assert!(matches!(
        err,
        PortalError::Submission(SubmitError::Conflict { .. })
    ));
    assert_eq!(wizard.record(), &before);
    assert_eq!(wizard.state().step, 2);
    assert!(!wizard.state().submitting);
    assert_eq!(
        wizard.view().error.as_deref(),
        Some("A member with this email already exists")
    );
}

#[tokio::test]
async fn test_missing_budget_rejected_before_network() {
    let mut wizard = completed_program();
    wizard
        .detach_file("grant", "budget")
        .expect("Failed to detach budget");
    let submitter = MockSubmitter::accepting();

    let err = wizard.submit(&submitter).await.unwrap_err();
    let PortalError::Incomplete { message } = err else {
        panic!("expected an incomplete-record error");
    };
    assert!(message.starts_with("Please fill in all required fields:"));
    assert!(message.lines().any(|l| l == "Budget Document"));
    assert_eq!(submitter.call_count(), 0);
    assert_eq!(wizard.state().error.as_deref(), Some(message.as_str()));
}

#[tokio::test]
async fn test_program_submission_encodes_multipart() {
    let mut wizard = completed_program();
    let submitter = MockSubmitter::accepting();
    wizard.submit(&submitter).await.expect("Failed to submit");

    let calls = submitter.calls.lock().unwrap();
    let submission = &calls[0];
    assert_eq!(submission.path, "/programs/applications");
    assert_eq!(submission.form_field("farm[size]"), Some("2.5"));
    assert_eq!(submission.form_field("declaration[agreed]"), Some("true"));
    assert_eq!(
        submission.file_part("budget").map(|f| f.file_name.as_str()),
        Some("budget.pdf")
    );
    assert_eq!(
        submission.file_part("identity").map(|f| f.file_name.as_str()),
        Some("id.pdf")
    );
}

#[test]
fn test_file_cache_restores_upload_when_leaving_last_step() {
    let mut wizard = completed_program();
    wizard
        .record
        .section_mut("grant")
        .unwrap()
        .set("budget", FieldValue::File(None));
    assert!(wizard.record().file("grant", "budget").is_none());

    wizard.prev().expect("Failed to go back");
    assert_eq!(
        wizard
            .record()
            .file("grant", "budget")
            .map(|f| f.file_name.as_str()),
        Some("budget.pdf")
    );
}

#[test]
fn test_file_cache_restores_upload_on_step_entry() {
    let mut wizard = Wizard::new(FormKind::Program);
    while wizard.current_step().section != "training" {
        fill_program_step(&mut wizard);
        wizard.next().expect("Failed to advance");
    }
    wizard
        .record
        .section_mut("grant")
        .unwrap()
        .set("budget", FieldValue::File(None));

    wizard.prev().expect("Failed to go back");
    assert_eq!(wizard.current_step().section, "grant");
    assert!(wizard.record().file("grant", "budget").is_some());
    assert!(wizard.errors().is_valid());
}

#[test]
fn test_detach_forgets_cached_file() {
    let mut wizard = completed_program();
    wizard.detach_file("grant", "budget").unwrap();
    wizard.prev().expect("Failed to go back");
    assert!(wizard.record().file("grant", "budget").is_none());
    assert!(wizard.cache().get("grant.budget").is_none());
}

#[test]
fn test_attach_rejects_oversized_file() {
    let mut wizard = Wizard::new(FormKind::Program);
    let huge = FileAttachment::new(
        "budget.pdf",
        "application/pdf",
        MAX_FILE_SIZE + 1,
        "/tmp/budget.pdf",
    );

    let err = wizard.attach_file("grant", "budget", huge).unwrap_err();
    let PortalError::Validation { errors } = err else {
        panic!("expected a validation error");
    };
    assert_eq!(
        errors.get("grant.budget"),
        Some("File size must be less than 5MB")
    );
    assert!(wizard.record().file("grant", "budget").is_none());
    assert!(wizard.cache().is_empty());
}

#[test]
fn test_submitting_locks_edits_and_navigation() {
    let mut wizard = completed_join(FormKind::Join);
    let _submission = wizard.begin_submit().expect("Failed to begin submit");
    assert!(wizard.state().submitting);

    assert!(matches!(
        wizard.set_input("education", "institution", "Other"),
        Err(PortalError::SubmissionInProgress)
    ));
    assert!(matches!(
        wizard.prev(),
        Err(PortalError::SubmissionInProgress)
    ));
    assert!(matches!(
        wizard.begin_submit(),
        Err(PortalError::SubmissionInProgress)
    ));

    let _ = wizard.finish_submit(Err(SubmitError::Network {
        message: "Unable to connect to the server. Please try again later.".into(),
    }));
    assert!(!wizard.state().submitting);
    wizard.prev().expect("Failed to go back");
}

#[test]
fn test_update_wizard_prefills_read_only_email() {
    let mut wizard = completed_join(FormKind::Update);
    assert_eq!(wizard.record().text("personal", "email"), "ada@example.com");
    assert_eq!(wizard.record().token.as_deref(), Some("tok-123"));

    let err = wizard
        .set_input("personal", "email", "other@example.com")
        .unwrap_err();
    assert!(err.to_string().contains("read-only"));

    wizard.reset();
    assert_eq!(wizard.state().step, 0);
    assert_eq!(wizard.record().text("personal", "fullName"), "");
    assert_eq!(wizard.record().text("personal", "email"), "ada@example.com");
    assert_eq!(wizard.record().token.as_deref(), Some("tok-123"));
}

#[tokio::test]
async fn test_update_submission_uses_token() {
    let mut wizard = completed_join(FormKind::Update);
    let submitter = MockSubmitter::accepting();
    wizard.submit(&submitter).await.expect("Failed to submit");

    let calls = submitter.calls.lock().unwrap();
    assert_eq!(calls[0].path, "/members/update");
    assert_eq!(calls[0].resource.as_deref(), Some("tok-123"));
    assert!(wizard.record().token.is_none());
}

#[test]
fn test_reset_clears_everything() {
    let mut wizard = completed_program();
    wizard.reset();
    assert_eq!(wizard.state().step, 0);
    assert!(wizard.cache().is_empty());
    assert_eq!(wizard.record(), &crate::forms::FormSchema::for_kind(FormKind::Program).empty_record());
}

#[test]
fn test_restore_clamps_step_and_fills_sections() {
    let record = crate::models::SubmissionRecord::new(FormKind::Join);
    let state = WizardState {
        step: 9,
        submitting: false,
        error: None,
    };
    let wizard = Wizard::restore(record, state, FileCache::default());
    assert_eq!(wizard.state().step, 2);
    assert!(wizard.record().section("education").is_some());
    assert_eq!(wizard.view().index, 2);
    assert!(wizard.view().is_last());
}
