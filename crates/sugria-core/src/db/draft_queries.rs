//! Draft persistence: at most one in-progress wizard per form kind.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{Draft, FileCache, FormKind, SubmissionRecord},
    wizard::{Wizard, WizardState},
};

const UPSERT_DRAFT_SQL: &str = "INSERT INTO drafts (kind, record, state, file_cache, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
     ON CONFLICT(kind) DO UPDATE SET record = excluded.record, state = excluded.state, \
     file_cache = excluded.file_cache, updated_at = excluded.updated_at";
const CLAIM_SUBMISSION_SQL: &str = "UPDATE drafts SET record = ?2, state = ?3, file_cache = ?4, updated_at = ?5 \
     WHERE kind = ?1 AND COALESCE(json_extract(state, '$.submitting'), 0) = 0";
const SELECT_DRAFT_SQL: &str =
    "SELECT record, state, file_cache, created_at, updated_at FROM drafts WHERE kind = ?1";
const SELECT_DRAFTS_SQL: &str =
    "SELECT record, state, file_cache, created_at, updated_at FROM drafts ORDER BY updated_at DESC";
const DELETE_DRAFT_SQL: &str = "DELETE FROM drafts WHERE kind = ?1";

fn json_column<T: serde::de::DeserializeOwned>(row: &Row<'_>, index: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(index)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

fn timestamp_column(row: &Row<'_>, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

fn draft_from_row(row: &Row<'_>) -> rusqlite::Result<Draft> {
    Ok(Draft {
        record: json_column::<SubmissionRecord>(row, 0)?,
        state: json_column::<WizardState>(row, 1)?,
        cache: json_column::<FileCache>(row, 2)?,
        created_at: timestamp_column(row, 3)?,
        updated_at: timestamp_column(row, 4)?,
    })
}

impl super::Database {
    /// Stores the wizard as the draft for its form kind, replacing any
    /// earlier draft of that kind.
    pub fn save_draft(&mut self, wizard: &Wizard) -> Result<()> {
        let record = serde_json::to_string(wizard.record())?;
        let state = serde_json::to_string(wizard.state())?;
        let cache = serde_json::to_string(wizard.cache())?;
        let now = Timestamp::now().to_string();

        self.connection
            .execute(
                UPSERT_DRAFT_SQL,
                params![wizard.kind().as_str(), record, state, cache, now],
            )
            .db_context("Failed to save draft")?;
        Ok(())
    }

    /// Stores a wizard that has just begun submitting, but only if the stored
    /// draft is not already submitting.
    ///
    /// The check and the write are one statement, so of several invocations
    /// racing to submit the same form exactly one gets `true`. A missing
    /// draft also yields `false`.
    pub fn claim_submission(&mut self, wizard: &Wizard) -> Result<bool> {
        let record = serde_json::to_string(wizard.record())?;
        let state = serde_json::to_string(wizard.state())?;
        let cache = serde_json::to_string(wizard.cache())?;
        let now = Timestamp::now().to_string();

        let affected = self
            .connection
            .execute(
                CLAIM_SUBMISSION_SQL,
                params![wizard.kind().as_str(), record, state, cache, now],
            )
            .db_context("Failed to claim draft for submission")?;
        Ok(affected == 1)
    }

    /// Retrieves the draft for `kind`, if one is stored.
    pub fn get_draft(&self, kind: FormKind) -> Result<Option<Draft>> {
        self.connection
            .query_row(SELECT_DRAFT_SQL, params![kind.as_str()], draft_from_row)
            .optional()
            .db_context("Failed to query draft")
    }

    /// Lists every stored draft, most recently updated first.
    pub fn list_drafts(&self) -> Result<Vec<Draft>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_DRAFTS_SQL)
            .db_context("Failed to prepare query")?;
        let drafts = stmt
            .query_map([], draft_from_row)
            .db_context("Failed to query drafts")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read draft")?;
        Ok(drafts)
    }

    /// Deletes the draft for `kind`. Returns whether one existed.
    pub fn delete_draft(&mut self, kind: FormKind) -> Result<bool> {
        let affected = self
            .connection
            .execute(DELETE_DRAFT_SQL, params![kind.as_str()])
            .db_context("Failed to delete draft")?;
        Ok(affected > 0)
    }
}
