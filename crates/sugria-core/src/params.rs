//! Parameter structures for portal operations.
//!
//! These structures carry what an interface collected from the user into the
//! [`Portal`](crate::portal::Portal) without depending on any interface
//! framework. The CLI defines `clap` argument structs and converts them into
//! these with `From`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │     Portal      │
//! │  (clap derives) │───▶│ (serde derives) │───▶│   operations    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::{ApplicationStatus, Collection, DocumentKind, FormKind};

/// Start (or resume) a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartForm {
    pub kind: FormKind,
    /// Update-link token; required for [`FormKind::Update`]
    #[serde(default)]
    pub token: Option<String>,
    /// Discard an existing draft instead of resuming it
    #[serde(default)]
    pub restart: bool,
}

/// Set one field from raw text input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetField {
    pub kind: FormKind,
    pub section: String,
    pub field: String,
    pub value: String,
}

/// Attach a file on disk to an upload slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachFile {
    pub kind: FormKind,
    pub section: String,
    pub field: String,
    pub path: PathBuf,
}

/// Empty an upload slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetachFile {
    pub kind: FormKind,
    pub section: String,
    pub field: String,
}

/// Replace a whole section from raw text answers, e.g. loaded from a JSON
/// answers file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillSection {
    pub kind: FormKind,
    pub section: String,
    pub values: BTreeMap<String, String>,
}

/// Admin credentials. Checked by the server only.
#[derive(Clone, Serialize, Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Login {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Login")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// List one admin collection with client-side filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRecords {
    pub collection: Collection,
    /// Case-insensitive search text
    #[serde(default)]
    pub query: Option<String>,
    /// Application status filter; ignored for members
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
    /// One-based page of the filtered rows
    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

impl ListRecords {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            query: None,
            status: None,
            page: 1,
        }
    }
}

/// Identify one admin record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordId {
    pub collection: Collection,
    pub id: String,
}

/// Delete one admin record. Refused unless `confirmed` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRecord {
    pub collection: Collection,
    pub id: String,
    #[serde(default)]
    pub confirmed: bool,
}

/// Download an uploaded application document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchDocument {
    pub id: String,
    pub document: DocumentKind,
    /// Where to write a downloaded file. A directory receives the file under
    /// its server name; none means the current directory.
    #[serde(default)]
    pub output: Option<PathBuf>,
}
