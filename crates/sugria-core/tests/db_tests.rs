use sugria_core::{
    models::{AdminSession, FieldValue, FileAttachment, FormKind},
    wizard::Wizard,
    Database,
};
use jiff::Timestamp;
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();
    assert!(temp_file.path().exists());
    assert!(db.list_drafts().expect("Failed to list drafts").is_empty());
    assert!(db.get_session().expect("Failed to get session").is_none());
}

#[test]
fn test_reopening_existing_database() {
    let (temp_file, mut db) = create_test_db();
    db.save_draft(&Wizard::new(FormKind::Join))
        .expect("Failed to save draft");
    drop(db);

    let db = Database::new(temp_file.path()).expect("Failed to reopen database");
    assert_eq!(db.list_drafts().expect("Failed to list drafts").len(), 1);
}

#[test]
fn test_draft_round_trip() {
    let (_temp_file, mut db) = create_test_db();

    let mut wizard = Wizard::new(FormKind::Program);
    wizard
        .set_input("program", "category", "suburban")
        .expect("Failed to set field");
    wizard.next().expect("Failed to advance");
    wizard
        .attach_file(
            "grant",
            "budget",
            FileAttachment::new("budget.pdf", "application/pdf", 512, "/tmp/budget.pdf"),
        )
        .expect("Failed to attach file");
    db.save_draft(&wizard).expect("Failed to save draft");

    let draft = db
        .get_draft(FormKind::Program)
        .expect("Failed to get draft")
        .expect("Draft should exist");
    assert_eq!(draft.kind(), FormKind::Program);
    assert_eq!(draft.state.step, 1);
    assert_eq!(draft.cache.len(), 1);

    let restored = draft.into_wizard();
    assert_eq!(restored.record(), wizard.record());
    assert_eq!(
        restored.record().field("program", "category"),
        Some(&FieldValue::Text("suburban".into()))
    );
    assert!(restored.record().file("grant", "budget").is_some());
}

#[test]
fn test_save_replaces_draft_of_same_kind() {
    let (_temp_file, mut db) = create_test_db();

    let mut wizard = Wizard::new(FormKind::Join);
    db.save_draft(&wizard).expect("Failed to save draft");
    let first = db.get_draft(FormKind::Join).unwrap().unwrap();

    wizard
        .set_input("personal", "fullName", "Ada Obi")
        .expect("Failed to set field");
    db.save_draft(&wizard).expect("Failed to save draft");
    db.save_draft(&Wizard::new(FormKind::Program))
        .expect("Failed to save draft");

    let second = db.get_draft(FormKind::Join).unwrap().unwrap();
    assert_eq!(second.record.text("personal", "fullName"), "Ada Obi");
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);
    assert_eq!(db.list_drafts().unwrap().len(), 2);
}

/// A Join wizard on its last step with every section filled in
fn completed_join_wizard() -> Wizard {
    let mut wizard = Wizard::new(FormKind::Join);
    for (field, value) in [
        ("fullName", "Ada Obi"),
        ("email", "ada@example.com"),
        ("dateOfBirth", "1990-04-12"),
        ("gender", "female"),
        ("nationality", "Nigerian"),
        ("phoneNumber", "08012345678"),
        ("address", "12 Farm Road"),
    ] {
        wizard.set_input("personal", field, value).unwrap();
    }
    wizard.next().unwrap();
    for (field, value) in [
        ("name", "Musa Obi"),
        ("relationship", "Brother"),
        ("phoneNumber", "08098765432"),
    ] {
        wizard.set_input("emergency", field, value).unwrap();
    }
    wizard.next().unwrap();
    for (field, value) in [
        ("level", "diploma"),
        ("institution", "Federal Polytechnic"),
        ("fieldOfStudy", "Agriculture"),
    ] {
        wizard.set_input("education", field, value).unwrap();
    }
    wizard
}

#[test]
fn test_submitting_flag_is_persisted() {
    let (_temp_file, mut db) = create_test_db();

    let mut wizard = completed_join_wizard();
    wizard.begin_submit().expect("Failed to begin submit");
    db.save_draft(&wizard).expect("Failed to save draft");

    let mut restored = db.get_draft(FormKind::Join).unwrap().unwrap().into_wizard();
    assert!(restored.state().submitting);
    assert!(restored
        .set_input("education", "institution", "Other")
        .is_err());
}

#[test]
fn test_claim_submission_is_exclusive() {
    let (temp_file, mut db) = create_test_db();
    let wizard = completed_join_wizard();
    db.save_draft(&wizard).expect("Failed to save draft");

    // Both invocations loaded the draft before either claimed it
    let mut first = wizard.clone();
    let mut second = wizard;
    first.begin_submit().expect("Failed to begin submit");
    second.begin_submit().expect("Failed to begin submit");

    let mut other = Database::new(temp_file.path()).expect("Failed to open second connection");
    assert!(db.claim_submission(&first).expect("Failed to claim draft"));
    assert!(!other.claim_submission(&second).expect("Failed to claim draft"));

    let stored = db.get_draft(FormKind::Join).unwrap().unwrap();
    assert!(stored.state.submitting);
}

#[test]
fn test_claim_submission_needs_a_draft() {
    let (_temp_file, mut db) = create_test_db();
    let mut wizard = completed_join_wizard();
    wizard.begin_submit().expect("Failed to begin submit");

    assert!(!db.claim_submission(&wizard).expect("Failed to claim draft"));
    assert!(db.get_draft(FormKind::Join).unwrap().is_none());
}

#[test]
fn test_delete_draft() {
    let (_temp_file, mut db) = create_test_db();
    db.save_draft(&Wizard::new(FormKind::Join)).unwrap();

    assert!(db.delete_draft(FormKind::Join).expect("Failed to delete draft"));
    assert!(!db.delete_draft(FormKind::Join).expect("Failed to delete draft"));
    assert!(db.get_draft(FormKind::Join).unwrap().is_none());
}

#[test]
fn test_session_round_trip() {
    let (_temp_file, mut db) = create_test_db();

    let session = AdminSession {
        email: "admin@sugria.com".into(),
        role: "admin".into(),
        token: Some("jwt-token".into()),
        signed_in_at: Timestamp::now(),
    };
    db.save_session(&session).expect("Failed to save session");
    assert_eq!(db.get_session().unwrap(), Some(session.clone()));

    let replacement = AdminSession {
        email: "other@sugria.com".into(),
        token: None,
        ..session
    };
    db.save_session(&replacement).expect("Failed to save session");
    assert_eq!(db.get_session().unwrap(), Some(replacement));

    assert!(db.clear_session().expect("Failed to clear session"));
    assert!(db.get_session().unwrap().is_none());
    assert!(!db.clear_session().unwrap());
}
