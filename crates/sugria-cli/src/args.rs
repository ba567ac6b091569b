//! Command-line argument definitions using clap.
//!
//! Argument structs here carry clap attributes only; each converts into the
//! matching `sugria_core::params` struct so the core stays free of any CLI
//! framework:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Portal
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use sugria_core::{
    config::API_URL_ENV,
    models::{ApplicationStatus, Collection, DocumentKind, FormKind},
    params::{
        AttachFile, DeleteRecord, DetachFile, FetchDocument, ListRecords, Login, SetField,
        StartForm,
    },
};

/// SUGRiA portal: fill in the public forms and run the back-office
///
/// Forms are filled one step at a time. Progress is kept in a local draft,
/// so every command picks up where the last one left off.
#[derive(Parser)]
#[command(version, about, name = "sugria")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/sugria/sugria.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Base URL of the SUGRiA API
    #[arg(long, global = true, env = API_URL_ENV)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Join the movement as a member
    #[command(alias = "j")]
    Join {
        #[command(subcommand)]
        command: FormCommands,
    },
    /// Apply to a funding program
    #[command(alias = "a")]
    Apply {
        #[command(subcommand)]
        command: FormCommands,
    },
    /// Update your membership through an emailed link
    #[command(alias = "u")]
    Update {
        #[command(subcommand)]
        command: FormCommands,
    },
    /// Back-office operations
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
    /// List forms in progress
    #[command(alias = "ls")]
    Drafts,
}

/// `section.field` address of a form field, e.g. `personal.email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    pub section: String,
    pub field: String,
}

fn parse_field_path(raw: &str) -> Result<FieldPath, String> {
    match raw.split_once('.') {
        Some((section, field)) if !section.is_empty() && !field.is_empty() => Ok(FieldPath {
            section: section.to_string(),
            field: field.to_string(),
        }),
        _ => Err(format!("expected SECTION.FIELD, got '{raw}'")),
    }
}

/// Start a form, or resume the one in progress
#[derive(ClapArgs)]
pub struct StartArgs {
    /// Token from the update link (update form only)
    #[arg(long)]
    pub token: Option<String>,
    /// Throw away the form in progress and start over
    #[arg(long)]
    pub restart: bool,
}

impl StartArgs {
    pub fn into_params(self, kind: FormKind) -> StartForm {
        StartForm {
            kind,
            token: self.token,
            restart: self.restart,
        }
    }
}

/// Set one field
#[derive(ClapArgs)]
pub struct SetArgs {
    /// Field to set, as SECTION.FIELD
    #[arg(value_parser = parse_field_path)]
    pub field: FieldPath,
    /// New value; `yes`/`no` for checkboxes, empty to clear
    pub value: String,
}

impl SetArgs {
    pub fn into_params(self, kind: FormKind) -> SetField {
        SetField {
            kind,
            section: self.field.section,
            field: self.field.field,
            value: self.value,
        }
    }
}

/// Attach a file to an upload field
#[derive(ClapArgs)]
pub struct AttachArgs {
    /// Upload field, as SECTION.FIELD
    #[arg(value_parser = parse_field_path)]
    pub field: FieldPath,
    /// File to attach
    pub path: PathBuf,
}

impl AttachArgs {
    pub fn into_params(self, kind: FormKind) -> AttachFile {
        AttachFile {
            kind,
            section: self.field.section,
            field: self.field.field,
            path: self.path,
        }
    }
}

/// Remove the file from an upload field
#[derive(ClapArgs)]
pub struct DetachArgs {
    /// Upload field, as SECTION.FIELD
    #[arg(value_parser = parse_field_path)]
    pub field: FieldPath,
}

impl DetachArgs {
    pub fn into_params(self, kind: FormKind) -> DetachFile {
        DetachFile {
            kind,
            section: self.field.section,
            field: self.field.field,
        }
    }
}

/// Fill a whole section from a JSON file of answers
#[derive(ClapArgs)]
pub struct FillArgs {
    /// Section to replace, e.g. `personal`
    pub section: String,
    /// JSON object mapping field names to answers
    pub file: PathBuf,
}

#[derive(Subcommand)]
pub enum FormCommands {
    /// Start the form, or resume the one in progress
    Start(StartArgs),
    /// Show the current step
    #[command(alias = "s")]
    Show,
    /// Review every answer given so far
    Review,
    /// Set one field of any step
    Set(SetArgs),
    /// Attach a file to an upload field
    Attach(AttachArgs),
    /// Remove an attached file
    Detach(DetachArgs),
    /// Replace a whole section from a JSON answers file
    Fill(FillArgs),
    /// Validate the current step and move to the next one
    #[command(alias = "n")]
    Next,
    /// Go back one step
    #[command(alias = "b")]
    Back,
    /// Validate everything and submit the form
    Submit,
    /// Clear every answer and go back to the first step
    Reset,
    /// Delete the form in progress
    Discard,
}

/// Sign in to the back-office
#[derive(ClapArgs)]
pub struct LoginArgs {
    /// Admin email address
    pub email: String,
    /// Admin password
    #[arg(long, env = "SUGRIA_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl From<LoginArgs> for Login {
    fn from(val: LoginArgs) -> Self {
        Login {
            email: val.email,
            password: val.password,
        }
    }
}

/// Application review status
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    Approved,
    Rejected,
}

impl From<StatusArg> for ApplicationStatus {
    fn from(val: StatusArg) -> Self {
        match val {
            StatusArg::Pending => ApplicationStatus::Pending,
            StatusArg::Approved => ApplicationStatus::Approved,
            StatusArg::Rejected => ApplicationStatus::Rejected,
        }
    }
}

/// List records, filtered and paged locally
#[derive(ClapArgs)]
pub struct ListArgs {
    /// Case-insensitive search on name, email or id
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only applications with this status
    #[arg(long)]
    pub status: Option<StatusArg>,
    /// Page to show
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

impl ListArgs {
    pub fn into_params(self, collection: Collection) -> ListRecords {
        ListRecords {
            collection,
            query: self.search,
            status: self.status.map(Into::into),
            page: self.page,
        }
    }
}

/// Delete a record permanently
#[derive(ClapArgs)]
pub struct DeleteArgs {
    /// Record id
    pub id: String,
    /// Confirm the deletion
    #[arg(long)]
    pub yes: bool,
}

impl DeleteArgs {
    pub fn into_params(self, collection: Collection) -> DeleteRecord {
        DeleteRecord {
            collection,
            id: self.id,
            confirmed: self.yes,
        }
    }
}

#[derive(Subcommand)]
pub enum RecordCommands {
    /// List records
    #[command(aliases = ["l", "ls"])]
    List(ListArgs),
    /// Show one record
    #[command(alias = "s")]
    Show {
        /// Record id
        id: String,
    },
    /// Delete one record
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum DocumentArg {
    Budget,
    Identity,
}

impl From<DocumentArg> for DocumentKind {
    fn from(val: DocumentArg) -> Self {
        match val {
            DocumentArg::Budget => DocumentKind::Budget,
            DocumentArg::Identity => DocumentKind::Identity,
        }
    }
}

/// Print the link to an application document, or download it
#[derive(ClapArgs)]
pub struct DocumentArgs {
    /// Application id
    pub id: String,
    /// Which document
    pub document: DocumentArg,
    /// Download the file instead of printing its link
    #[arg(long)]
    pub download: bool,
    /// File or existing directory to save a download to
    #[arg(short, long, requires = "download")]
    pub output: Option<PathBuf>,
}

impl From<DocumentArgs> for FetchDocument {
    fn from(val: DocumentArgs) -> Self {
        FetchDocument {
            id: val.id,
            document: val.document.into(),
            output: val.output,
        }
    }
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Sign in
    Login(LoginArgs),
    /// Sign out
    Logout,
    /// Show who is signed in
    Whoami,
    /// Member and application counts
    Stats,
    /// Registered members
    #[command(alias = "m")]
    Members {
        #[command(subcommand)]
        command: RecordCommands,
    },
    /// Program applications
    #[command(alias = "a")]
    Applications {
        #[command(subcommand)]
        command: RecordCommands,
    },
    /// Uploaded application documents
    #[command(alias = "doc")]
    Document(DocumentArgs),
}
