//! Core library for the SUGRiA portal.
//!
//! This crate holds everything behind the public forms and the admin
//! back-office: field validators, form schemas, the multi-step wizard, the
//! submission and admin API clients, a local SQLite store for drafts and the
//! admin session, and markdown display wrappers.
//!
//! # Layers
//!
//! ```text
//! validation ◀── forms ◀── wizard ──▶ client ──▶ REST API
//!                              │
//!                   portal ────┴──▶ db (drafts, session)
//! ```
//!
//! - [`validation`]: pure field validators
//! - [`forms`]: one [`forms::FormSchema`] per form, made of steps that each
//!   own one section of the record
//! - [`wizard`]: step navigation, file cache and submission lifecycle
//! - [`client`]: payload encoding, error mapping, admin calls
//! - [`portal`]: the facade interfaces talk to
//!
//! # Quick Start
//!
//! ```rust
//! use sugria_core::{models::FormKind, wizard::Wizard, PortalError};
//!
//! let mut wizard = Wizard::new(FormKind::Join);
//! wizard.set_input("personal", "phoneNumber", "0801")?;
//!
//! match wizard.next() {
//!     Err(PortalError::Validation { errors }) => {
//!         assert!(errors.contains("phoneNumber"));
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! # Ok::<(), PortalError>(())
//! ```

pub mod client;
pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod forms;
pub mod listing;
pub mod models;
pub mod params;
pub mod portal;
pub mod validation;
pub mod wizard;

// Re-export commonly used types
pub use client::{ApiClient, SubmitError, Submitter};
pub use config::ApiConfig;
pub use db::Database;
pub use error::{PortalError, Result};
pub use forms::{FormSchema, StepView};
pub use models::{FormKind, SubmissionRecord};
pub use portal::{Portal, PortalBuilder};
pub use wizard::{SubmitOutcome, Wizard};
