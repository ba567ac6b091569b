//! High-level portal API joining the wizard, the local store and the API
//! clients.
//!
//! The [`Portal`] is the only thing an interface talks to. Every form
//! operation loads the draft for its form kind, applies one wizard
//! transition and stores the draft again; admin operations restore the
//! session from the store and pass it to the admin client.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   form_ops      │    │     Wizard      │    │  Database       │
//! │   admin_ops     │───▶│   ApiClient     │───▶│  REST API       │
//! │                 │    │                 │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     Portal facade        Domain logic          Persistence / remote
//! ```
//!
//! SQLite work runs on `spawn_blocking` with a fresh connection per call, so
//! a `Portal` holds only paths and configuration.
//!
//! # Examples
//!
//! ```rust,no_run
//! use sugria_core::{models::FormKind, params::StartForm, PortalBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let portal = PortalBuilder::new()
//!     .with_database_path(Some("/tmp/sugria.db"))
//!     .with_api_url(Some("https://api.example.org"))
//!     .build()
//!     .await?;
//!
//! let view = portal
//!     .start_form(&StartForm { kind: FormKind::Join, token: None, restart: false })
//!     .await?;
//! assert_eq!(view.index, 0);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    client::ApiClient,
    config::ApiConfig,
    db::Database,
    error::Result,
};

pub mod admin_ops;
pub mod builder;
pub mod form_ops;


pub use builder::PortalBuilder;

/// Main portal interface.
pub struct Portal {
    pub(crate) db_path: PathBuf,
    pub(crate) api_url: Option<String>,
}

impl Portal {
    pub(crate) fn new(db_path: PathBuf, api_url: Option<String>) -> Self {
        Self { db_path, api_url }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// API client for the configured base URL, falling back to
    /// `SUGRIA_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Configuration` if no valid URL is configured.
    pub fn client(&self) -> Result<ApiClient> {
        let config = match &self.api_url {
            Some(url) => ApiConfig::parse(url)?,
            None => ApiConfig::from_env()?,
        };
        Ok(ApiClient::new(config))
    }

    /// Run `op` against a fresh database connection off the async runtime.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await?
    }
}
