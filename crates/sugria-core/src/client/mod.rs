//! HTTP clients for the SUGRiA API.
//!
//! The submission pipeline is split in two so the wizard can be driven
//! without a network:
//!
//! ```text
//! SubmissionRecord ──encode──▶ Submission ──Submitter::submit──▶ ServerResponse
//!                   (payload)              (ApiClient / test double)   or SubmitError
//! ```
//!
//! [`ApiClient`] is the production [`Submitter`] built on `reqwest`; it also
//! carries the token-validation and admin calls.

use std::future::Future;

use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::config::ApiConfig;

mod admin;
pub mod errors;
pub mod payload;
mod token;

pub use admin::DownloadedFile;
pub use errors::{classify, humanize, ErrorMessages, SubmitError};
pub use payload::{encode, Body, Method, Submission};

/// Successful API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerResponse {
    pub status: u16,
    pub body: Value,
}

impl ServerResponse {
    /// `message` field of the body, if any.
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    /// Identifier of the created record, when the server returns one.
    pub fn reference(&self) -> Option<String> {
        let data = self.body.get("data")?;
        ["applicationId", "id", "memberId"]
            .iter()
            .find_map(|key| match data.get(key)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

/// Sends an encoded submission.
pub trait Submitter {
    fn submit(
        &self,
        submission: &Submission,
    ) -> impl Future<Output = Result<ServerResponse, SubmitError>> + Send;
}

/// Client for the SUGRiA REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn multipart(
        fields: &[(String, String)],
        files: &[(String, crate::models::FileAttachment)],
    ) -> Result<Form, SubmitError> {
        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name.clone(), value.clone());
        }
        for (name, file) in files {
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|e| SubmitError::Unknown {
                    message: format!("Unable to read attached file '{}': {e}", file.file_name),
                })?;
            let part = Part::bytes(bytes)
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)
                .map_err(|e| SubmitError::Unknown {
                    message: format!("Invalid content type for '{}': {e}", file.file_name),
                })?;
            form = form.part(name.clone(), part);
        }
        Ok(form)
    }
}

impl Submitter for ApiClient {
    async fn submit(&self, submission: &Submission) -> Result<ServerResponse, SubmitError> {
        let url = match &submission.resource {
            Some(resource) => self.config.endpoint_with(&submission.path, resource),
            None => self.config.endpoint(&submission.path),
        };
        info!(
            "Submitting {} form: {} {url}",
            submission.kind.as_str(),
            submission.method.as_str()
        );

        let request = match submission.method {
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
        };
        let request = match &submission.body {
            Body::Json(body) => request.json(body),
            Body::Multipart { fields, files } => {
                request.multipart(Self::multipart(fields, files).await?)
            }
        };

        let response = request.send().await.map_err(|e| {
            warn!("Submission request failed: {e}");
            errors::network(submission.kind)
        })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            warn!("Submission rejected with status {status}");
            return Err(classify(submission.kind, status.as_u16(), &text));
        }

        debug!("Submission accepted with status {status}");
        Ok(ServerResponse {
            status: status.as_u16(),
            body: serde_json::from_str(&text).unwrap_or(Value::Null),
        })
    }
}
