//! API configuration.

use reqwest::Url;

use crate::error::{PortalError, Result};

/// Environment variable holding the base API URL.
pub const API_URL_ENV: &str = "SUGRIA_API_URL";

/// Base URL of the SUGRiA REST API.
///
/// # Examples
///
/// ```rust
/// use sugria_core::config::ApiConfig;
///
/// let config = ApiConfig::parse("https://api.sugria.com/")?;
/// assert_eq!(config.endpoint("/members/join-movement"), "https://api.sugria.com/members/join-movement");
/// # Ok::<(), sugria_core::PortalError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    url: Url,
}

impl ApiConfig {
    /// Parse and normalize a base URL.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Configuration` if the URL is empty, unparsable,
    /// or not `http`/`https`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(PortalError::configuration(format!(
                "{API_URL_ENV} is not set"
            )));
        }
        let url = Url::parse(raw).map_err(|e| {
            PortalError::configuration(format!("Invalid API URL '{raw}': {e}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PortalError::configuration(format!(
                "Invalid API URL '{raw}': scheme must be http or https"
            )));
        }
        Ok(Self {
            base_url: url.as_str().trim_end_matches('/').to_string(),
            url,
        })
    }

    /// Read the base URL from [`API_URL_ENV`].
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Configuration` if the variable is missing or
    /// invalid.
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var(API_URL_ENV).map_err(|_| {
            PortalError::configuration(format!("{API_URL_ENV} is not set"))
        })?;
        Self::parse(&raw)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an API path such as `/admin/login`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Absolute URL of `path` followed by `segment`, percent-encoded so that
    /// characters like `/`, `?` and `#` stay inside that one segment.
    pub fn endpoint_with(&self, path: &str, segment: &str) -> String {
        let mut url = self.url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|part| !part.is_empty()))
                .push(segment);
        }
        url.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_trailing_slash() {
        let config = ApiConfig::parse("http://localhost:5001/").unwrap();
        assert_eq!(config.base_url(), "http://localhost:5001");
        assert_eq!(
            config.endpoint("admin/stats/counts"),
            "http://localhost:5001/admin/stats/counts"
        );
    }

    #[test]
    fn test_parse_keeps_base_path() {
        let config = ApiConfig::parse("https://example.com/api/v1").unwrap();
        assert_eq!(
            config.endpoint("/members/validate/abc"),
            "https://example.com/api/v1/members/validate/abc"
        );
    }

    #[test]
    fn test_endpoint_with_escapes_segment() {
        let config = ApiConfig::parse("https://example.com/api/").unwrap();
        assert_eq!(
            config.endpoint_with("/members/update", "tok-123"),
            "https://example.com/api/members/update/tok-123"
        );
        assert_eq!(
            config.endpoint_with("/members/validate", "a?b#c/d"),
            "https://example.com/api/members/validate/a%3Fb%23c%2Fd"
        );
    }

    #[test]
    fn test_parse_rejects_bad_urls() {
        for raw in ["", "   ", "not a url", "ftp://example.com"] {
            let err = ApiConfig::parse(raw).unwrap_err();
            assert!(
                matches!(err, PortalError::Configuration { .. }),
                "{raw:?} should be a configuration error"
            );
        }
    }
}
