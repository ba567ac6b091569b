//! Builder for creating and configuring Portal instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Portal;
use crate::{
    db::Database,
    error::{PortalError, Result},
};

/// Builder for creating and configuring Portal instances.
#[derive(Debug, Clone, Default)]
pub struct PortalBuilder {
    database_path: Option<PathBuf>,
    api_url: Option<String>,
}

impl PortalBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/sugria/sugria.db` or `~/.local/share/sugria/sugria.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the base API URL. Without one, `SUGRIA_API_URL` is read when an
    /// operation first needs the API.
    pub fn with_api_url<S: Into<String>>(mut self, url: Option<S>) -> Self {
        if let Some(url) = url {
            self.api_url = Some(url.into());
        }
        self
    }

    /// Builds the configured portal instance.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::FileSystem` if the database directory cannot be
    /// created and `PortalError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<Portal> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PortalError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), PortalError>(())
        })
        .await??;

        Ok(Portal::new(db_path, self.api_url))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("sugria")
            .place_data_file("sugria.db")
            .map_err(|e| PortalError::XdgDirectory(e.to_string()))
    }
}
