//! Data models for forms, drafts and the admin back-office.
//!
//! This module contains the core domain models of the portal: the
//! [`SubmissionRecord`] a wizard fills in, the [`FileAttachment`]s it holds,
//! and the records the admin API returns. Display implementations for these
//! models are located in [`crate::display`] to keep data structures apart
//! from presentation logic.
//!
//! # Record Layout
//!
//! ```text
//! SubmissionRecord (kind = program)
//! ├── program      { category, previousTraining, trainingId }
//! ├── personal     { fullName, email, phoneNumber, ... }
//! ├── farm         { location, size, type, ... }
//! ├── grant        { outcomes, budget: File }
//! ├── training     { preference }
//! ├── motivation   { statement, implementation, identity: File }
//! └── declaration  { agreed: Flag, officerName }
//! ```
//!
//! Each wizard step owns exactly one section. Which sections exist is decided
//! by the [`FormKind`] through [`crate::forms::FormSchema`].

pub mod admin;
pub mod attachment;
pub mod draft;
pub mod kind;
pub mod record;
pub mod session;


pub use admin::{
    ApplicantDeclaration, ApplicantFarm, ApplicantGrant, ApplicantMotivation, ApplicantPersonal,
    ApplicantProgram, ApplicantTraining, Application, ApplicationStatus, Collection,
    DashboardStats, DocumentKind, Education, EmergencyContact, Envelope, FileAction, Member, Page,
    PageMeta, TokenGrant, TrainingId,
};
pub use attachment::{FileAttachment, FileCache};
pub use draft::Draft;
pub use kind::FormKind;
pub use record::{FieldValue, Section, SubmissionRecord};
pub use session::{AdminSession, Session};
