//! Client configuration

use shared::Locale;
use std::time::Duration;

/// Default API base when `ESTATE_API_URL` is not set
pub const DEFAULT_BASE_URL: &str = "https://api.realestate.com/api";

/// Route the form returns to after a successful save
pub const DEFAULT_LIST_ROUTE: &str = "/dashboard/properties";

/// Client configuration for the property back-office API
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ESTATE_API_URL | https://api.realestate.com/api | API base URL |
/// | ESTATE_API_TOKEN | (none) | Bearer token |
/// | ESTATE_LOCALE | en | Default content locale |
/// | ESTATE_REQUEST_TIMEOUT_SECS | 30 | Request timeout |
/// | ESTATE_REDIRECT_DELAY_MS | 1500 | Delay before leaving the form after a save |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "https://api.realestate.com/api")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Locale used when none (or an unsupported one) is requested
    pub default_locale: Locale,

    /// How long the success message stays up before redirecting
    pub redirect_delay: Duration,

    /// Route of the property list view
    pub list_route: String,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            default_locale: Locale::DEFAULT,
            redirect_delay: Duration::from_millis(1500),
            list_route: DEFAULT_LIST_ROUTE.to_string(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Missing or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        let mut config =
            Self::new(std::env::var("ESTATE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()));
        config.token = std::env::var("ESTATE_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        config.default_locale = Locale::parse_or_default(std::env::var("ESTATE_LOCALE").ok().as_deref());
        if let Some(timeout) = std::env::var("ESTATE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = timeout;
        }
        if let Some(ms) = std::env::var("ESTATE_REDIRECT_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.redirect_delay = Duration::from_millis(ms);
        }
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the default locale
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// Set the post-save redirect delay
    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Resolve a requested locale code against the supported set
    pub fn resolve_locale(&self, code: Option<&str>) -> Locale {
        code.and_then(|c| c.parse().ok())
            .unwrap_or(self.default_locale)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://localhost:8080")
            .with_token("abc")
            .with_timeout(5)
            .with_locale(Locale::Ru)
            .with_redirect_delay(Duration::from_millis(10));
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, 5);
        assert_eq!(config.redirect_delay, Duration::from_millis(10));
        assert_eq!(config.list_route, DEFAULT_LIST_ROUTE);
    }

    #[test]
    fn test_resolve_locale_falls_back_to_configured_default() {
        let config = ClientConfig::default().with_locale(Locale::Ru);
        assert_eq!(config.resolve_locale(Some("de")), Locale::Ru);
        assert_eq!(config.resolve_locale(None), Locale::Ru);
        assert_eq!(config.resolve_locale(Some("en")), Locale::En);
    }
}
