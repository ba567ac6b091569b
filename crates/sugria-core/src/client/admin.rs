//! Admin back-office calls.
//!
//! Every call except `login` takes the current [`AdminSession`]; the bearer
//! token is attached when the server issued one.

use std::path::Path;

use jiff::Timestamp;
use log::{debug, info, warn};
use reqwest::{header, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};

use super::{errors::ErrorBody, ApiClient};
use crate::{
    error::{PortalError, Result},
    models::{
        AdminSession, Collection, DashboardStats, DocumentKind, Envelope, FileAction, Page,
    },
};

const CONNECT_ERROR: &str = "Unable to connect to the server. Please try again later.";

/// A document fetched from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    /// Name suggested by the server, if any
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default, Deserialize)]
struct LoginGrant {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default, alias = "accessToken")]
    token: Option<String>,
}

fn authorize(request: RequestBuilder, session: &AdminSession) -> RequestBuilder {
    match &session.token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

fn connect_error(e: reqwest::Error) -> PortalError {
    warn!("Admin request failed: {e}");
    PortalError::Admin {
        message: CONNECT_ERROR.to_string(),
    }
}

/// Turn a non-success response into an error; pass successes through.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(PortalError::NotAuthenticated);
    }
    let body = response.text().await.unwrap_or_default();
    let message = ErrorBody::parse(&body)
        .best_message()
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
    warn!("Admin request rejected with status {status}: {message}");
    Err(PortalError::Admin { message })
}

/// File name from a `Content-Disposition` header.
///
/// Only the final path component is kept, so a name like `../x` or `/etc/x`
/// can never point outside the directory it is saved in.
fn disposition_file_name(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|part| {
        let name = part.strip_prefix("filename=")?.trim_matches('"');
        let name = Path::new(name).file_name()?.to_str()?;
        (!name.is_empty() && name != "." && name != "..").then(|| name.to_string())
    })
}

impl ApiClient {
    /// Sign in. Credentials are checked by the server only.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Admin` with the server's message (or "Invalid
    /// email or password") when the credentials are rejected.
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminSession> {
        let url = self.config.endpoint("/admin/login");
        let response = self
            .http
            .post(&url)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(connect_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = ErrorBody::parse(&body)
                .best_message()
                .unwrap_or_else(|| "Invalid email or password".to_string());
            warn!("Login rejected with status {status}");
            return Err(PortalError::Admin { message });
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let grant_value = body.get("data").cloned().unwrap_or(body);
        let grant: LoginGrant = serde_json::from_value(grant_value).unwrap_or_default();

        info!("Admin {email} signed in");
        Ok(AdminSession {
            email: grant.email.unwrap_or_else(|| email.to_string()),
            role: grant.role.unwrap_or_else(|| "admin".to_string()),
            token: grant.token,
            signed_in_at: Timestamp::now(),
        })
    }

    async fn admin_get<T: DeserializeOwned>(&self, session: &AdminSession, path: &str) -> Result<T> {
        let url = self.config.endpoint(path);
        debug!("GET {url}");
        let response = authorize(self.http.get(&url), session)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(connect_error)?;
        let envelope: Envelope<T> = check(response).await?.json().await.map_err(|e| {
            PortalError::Admin {
                message: format!("Invalid response format: {e}"),
            }
        })?;
        Ok(envelope.data)
    }

    /// Headline member and application counts.
    pub async fn stats(&self, session: &AdminSession) -> Result<DashboardStats> {
        self.admin_get(session, "/admin/stats/counts").await
    }

    /// One page of members or applications.
    pub async fn list<T: DeserializeOwned>(
        &self,
        session: &AdminSession,
        collection: Collection,
        page: u64,
        limit: u64,
    ) -> Result<Page<T>> {
        let path = format!("/admin/{}?page={page}&limit={limit}", collection.as_str());
        self.admin_get(session, &path).await
    }

    /// A single member or application by id.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        session: &AdminSession,
        collection: Collection,
        id: &str,
    ) -> Result<T> {
        let path = format!("/admin/{}/{id}", collection.as_str());
        self.admin_get(session, &path).await
    }

    /// Delete a member or application.
    pub async fn delete(&self, session: &AdminSession, collection: Collection, id: &str) -> Result<()> {
        let url = self
            .config
            .endpoint(&format!("/admin/{}/{id}", collection.as_str()));
        debug!("DELETE {url}");
        let response = authorize(self.http.delete(&url), session)
            .send()
            .await
            .map_err(connect_error)?;
        check(response).await?;
        info!("Deleted {} {id}", collection.as_str());
        Ok(())
    }

    /// URL of an uploaded application document.
    pub fn application_file_url(&self, id: &str, document: DocumentKind, action: FileAction) -> String {
        self.config.endpoint(&format!(
            "/programs/applications/{id}/files/{}/{}",
            document.as_str(),
            action.as_str()
        ))
    }

    /// Download an uploaded application document.
    pub async fn download_application_file(
        &self,
        session: &AdminSession,
        id: &str,
        document: DocumentKind,
    ) -> Result<DownloadedFile> {
        let url = self.application_file_url(id, document, FileAction::Download);
        debug!("GET {url}");
        let response = authorize(self.http.get(&url), session)
            .send()
            .await
            .map_err(connect_error)?;
        let response = check(response).await.map_err(|e| match e {
            PortalError::Admin { .. } => PortalError::Admin {
                message: "Failed to download document".to_string(),
            },
            other => other,
        })?;

        let header_value = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let file_name = header_value(header::CONTENT_DISPOSITION)
            .as_deref()
            .and_then(disposition_file_name);
        let content_type = header_value(header::CONTENT_TYPE);
        let bytes = response.bytes().await.map_err(connect_error)?.to_vec();

        Ok(DownloadedFile {
            file_name,
            content_type,
            bytes,
        })
    }
}
