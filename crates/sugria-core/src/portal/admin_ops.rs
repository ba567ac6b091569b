//! Admin back-office operations.
//!
//! The signed-in administrator is kept in the local store and handed to every
//! call as an explicit [`Session`]. A `401` from the API forgets it.

use std::path::PathBuf;

use log::{info, warn};

use super::Portal;
use crate::{
    client::ApiClient,
    error::{PortalError, Result},
    listing::{paginate, search, with_status, Paged, PAGE_SIZE},
    models::{
        AdminSession, Application, Collection, DashboardStats, DocumentKind, FileAction, Member,
        Session,
    },
    params::{DeleteRecord, FetchDocument, ListRecords, Login, RecordId},
};

/// Page size requested when pulling a whole collection for client-side
/// filtering.
const FETCH_ALL_LIMIT: u64 = 100_000;

impl Portal {
    /// Sign in and remember the session.
    pub async fn login(&self, params: &Login) -> Result<AdminSession> {
        let session = self
            .client()?
            .login(params.email.trim(), &params.password)
            .await?;
        let stored = session.clone();
        self.with_db(move |db| db.save_session(&stored)).await?;
        Ok(session)
    }

    /// Forget the stored session. Returns who was signed in, if anyone.
    pub async fn logout(&self) -> Result<Option<AdminSession>> {
        let session = self.session().await?.logout();
        self.with_db(|db| db.clear_session()).await?;
        if let Some(user) = &session {
            info!("Admin {} signed out", user.email);
        }
        Ok(session)
    }

    /// Session context restored from the store.
    pub async fn session(&self) -> Result<Session> {
        let user = self.with_db(|db| db.get_session()).await?;
        Ok(Session::restore(user))
    }

    /// Headline counts for the dashboard.
    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let (client, user) = self.admin().await?;
        self.signed_out_on_401(client.stats(&user).await).await
    }

    /// Members matching `params`, one page at a time.
    pub async fn list_members(&self, params: &ListRecords) -> Result<Paged<Member>> {
        let (client, user) = self.admin().await?;
        let page = self
            .signed_out_on_401(
                client
                    .list::<Member>(&user, Collection::Members, 1, FETCH_ALL_LIMIT)
                    .await,
            )
            .await?;
        let rows = search(page.data, params.query.as_deref().unwrap_or(""));
        Ok(paginate(rows, params.page, PAGE_SIZE))
    }

    /// Applications matching `params`, one page at a time.
    pub async fn list_applications(&self, params: &ListRecords) -> Result<Paged<Application>> {
        let (client, user) = self.admin().await?;
        let page = self
            .signed_out_on_401(
                client
                    .list::<Application>(&user, Collection::Applications, 1, FETCH_ALL_LIMIT)
                    .await,
            )
            .await?;
        let rows = with_status(page.data, params.status);
        let rows = search(rows, params.query.as_deref().unwrap_or(""));
        Ok(paginate(rows, params.page, PAGE_SIZE))
    }

    pub async fn show_member(&self, id: &str) -> Result<Member> {
        let (client, user) = self.admin().await?;
        self.signed_out_on_401(client.fetch(&user, Collection::Members, id).await)
            .await
    }

    pub async fn show_application(&self, id: &str) -> Result<Application> {
        let (client, user) = self.admin().await?;
        self.signed_out_on_401(client.fetch(&user, Collection::Applications, id).await)
            .await
    }

    /// Delete a member or application. Refused unless confirmed.
    pub async fn delete_record(&self, params: &DeleteRecord) -> Result<RecordId> {
        if !params.confirmed {
            return Err(PortalError::invalid_input("confirm").with_reason(format!(
                "deleting {} {} cannot be undone; confirm to proceed",
                params.collection.as_str(),
                params.id
            )));
        }
        let (client, user) = self.admin().await?;
        self.signed_out_on_401(client.delete(&user, params.collection, &params.id).await)
            .await?;
        Ok(RecordId {
            collection: params.collection,
            id: params.id.clone(),
        })
    }

    /// Address of an application document, for opening in a browser.
    pub async fn document_url(&self, id: &str, document: DocumentKind) -> Result<String> {
        let (client, _) = self.admin().await?;
        Ok(client.application_file_url(id, document, FileAction::View))
    }

    /// Download an application document and write it to disk.
    ///
    /// Without an explicit output file the document is saved under the
    /// server's file name (or `<id>-<document>` when the server sends none),
    /// either in the given directory or in the current one.
    pub async fn download_document(&self, params: &FetchDocument) -> Result<PathBuf> {
        let (client, user) = self.admin().await?;
        let file = self
            .signed_out_on_401(
                client
                    .download_application_file(&user, &params.id, params.document)
                    .await,
            )
            .await?;

        let file_name = file
            .file_name
            .clone()
            .unwrap_or_else(|| format!("{}-{}", params.id, params.document.as_str()));
        let target = match params.output.clone() {
            Some(path) if path.is_dir() => path.join(file_name),
            Some(path) => path,
            None => PathBuf::from(file_name),
        };
        tokio::fs::write(&target, &file.bytes)
            .await
            .map_err(|e| PortalError::FileSystem {
                path: target.clone(),
                source: e,
            })?;
        info!("Saved {} bytes to {}", file.bytes.len(), target.display());
        Ok(target)
    }

    /// API client plus the signed-in administrator.
    async fn admin(&self) -> Result<(ApiClient, AdminSession)> {
        let user = self
            .session()
            .await?
            .current()
            .cloned()
            .ok_or(PortalError::NotAuthenticated)?;
        Ok((self.client()?, user))
    }

    /// Forget the stored session when the API says it is no longer valid.
    async fn signed_out_on_401<T>(&self, result: Result<T>) -> Result<T> {
        if matches!(result, Err(PortalError::NotAuthenticated)) {
            warn!("Admin session rejected by the server; signing out");
            self.with_db(|db| db.clear_session()).await?;
        }
        result
    }
}
