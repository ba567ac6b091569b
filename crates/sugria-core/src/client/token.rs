use log::{info, warn};

use super::ApiClient;
use crate::{
    error::{PortalError, Result},
    models::{Envelope, TokenGrant},
};

impl ApiClient {
    /// Check an update-link token and return the email it was issued for.
    ///
    /// # Errors
    ///
    /// Any failure (empty token, transport error, non-2xx status, malformed
    /// body) yields `PortalError::InvalidLink`.
    pub async fn validate_token(&self, token: &str) -> Result<TokenGrant> {
        let token = token.trim();
        if token.is_empty() || token.contains('/') {
            return Err(PortalError::InvalidLink);
        }

        let url = self.config.endpoint_with("/members/validate", token);
        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!("Token validation request failed: {e}");
            PortalError::InvalidLink
        })?;

        if !response.status().is_success() {
            warn!("Token rejected with status {}", response.status());
            return Err(PortalError::InvalidLink);
        }

        let grant = response
            .json::<Envelope<TokenGrant>>()
            .await
            .map_err(|e| {
                warn!("Malformed token validation response: {e}");
                PortalError::InvalidLink
            })?
            .data;
        info!("Update link validated for {}", grant.email);
        Ok(grant)
    }
}
