//! Admin session persistence. A single row: signing in replaces it.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result},
    models::AdminSession,
};

const UPSERT_SESSION_SQL: &str = "INSERT INTO admin_session (id, email, role, token, signed_in_at) \
     VALUES (1, ?1, ?2, ?3, ?4) \
     ON CONFLICT(id) DO UPDATE SET email = excluded.email, role = excluded.role, \
     token = excluded.token, signed_in_at = excluded.signed_in_at";
const SELECT_SESSION_SQL: &str =
    "SELECT email, role, token, signed_in_at FROM admin_session WHERE id = 1";
const DELETE_SESSION_SQL: &str = "DELETE FROM admin_session";

impl super::Database {
    pub fn save_session(&mut self, session: &AdminSession) -> Result<()> {
        self.connection
            .execute(
                UPSERT_SESSION_SQL,
                params![
                    session.email,
                    session.role,
                    session.token,
                    session.signed_in_at.to_string()
                ],
            )
            .db_context("Failed to save admin session")?;
        Ok(())
    }

    pub fn get_session(&self) -> Result<Option<AdminSession>> {
        self.connection
            .query_row(SELECT_SESSION_SQL, [], |row| {
                Ok(AdminSession {
                    email: row.get(0)?,
                    role: row.get(1)?,
                    token: row.get(2)?,
                    signed_in_at: row.get::<_, String>(3)?.parse::<Timestamp>().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
                    })?,
                })
            })
            .optional()
            .db_context("Failed to query admin session")
    }

    /// Forgets the signed-in administrator. Returns whether one was stored.
    pub fn clear_session(&mut self) -> Result<bool> {
        let affected = self
            .connection
            .execute(DELETE_SESSION_SQL, [])
            .db_context("Failed to clear admin session")?;
        Ok(affected > 0)
    }
}
