//! Application configuration management with security considerations.
//!
//! All values come from environment variables and are read exactly once at
//! startup. The resulting [`AppConfig`] is validated and then handed to the
//! components that need it (webhook verifier, Send API client) through the
//! web application state.
//!
//! # Security Notes
//! - Sensitive fields are clearly marked and must never be logged
//! - Production environments should inject secrets from a secret manager

use envconfig::Envconfig;
use log::LevelFilter;
use std::str::FromStr;

/// Application configuration with security-aware field management.
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// SENSITIVE: Token shared with the platform for the subscription handshake
    pub verify_token: String,

    /// SENSITIVE: Page access token attached to every Send API call
    pub page_access_token: String,

    /// SENSITIVE: App secret used to check `X-Hub-Signature-256`.
    /// When unset (or blank) incoming payloads are not signature checked.
    pub app_secret: Option<String>,

    /// Host address for web server binding (NON-SENSITIVE)
    #[envconfig(default = "0.0.0.0")]
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(default = "8080")]
    pub web_server_port: u16,

    /// Platform Graph API host (NON-SENSITIVE)
    #[envconfig(default = "https://graph.facebook.com")]
    pub graph_api_url: String,

    /// Graph API version used in the send endpoint path (NON-SENSITIVE)
    #[envconfig(default = "v2.6")]
    pub graph_api_version: String,

    /// Static page served at `/` (NON-SENSITIVE)
    #[envconfig(default = "index.html")]
    pub index_page_path: String,

    /// Log level filter: "error", "warn", "info", "debug", "trace" or "off"
    #[envconfig(default = "info")]
    pub log_level: String,
}

impl AppConfig {
    /// Loads the configuration from the process environment and validates it.
    pub fn load() -> anyhow::Result<Self> {
        let app_config = AppConfig::init_from_env().map_err(|e| {
            anyhow::anyhow!(
                "Be sure to set 'VERIFY_TOKEN' & 'PAGE_ACCESS_TOKEN' env vars! ({e})"
            )
        })?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Rejects blank secrets and unparsable optional values.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.verify_token.trim().is_empty() {
            anyhow::bail!("Be sure to set 'VERIFY_TOKEN' env var! it must not be blank");
        }

        if self.page_access_token.trim().is_empty() {
            anyhow::bail!("Be sure to set 'PAGE_ACCESS_TOKEN' env var! it must not be blank");
        }

        self.log_level_filter()?;

        Ok(())
    }

    /// App secret, ignoring a blank value
    pub fn app_secret(&self) -> Option<&str> {
        self.app_secret
            .as_deref()
            .filter(|secret| !secret.trim().is_empty())
    }

    pub fn log_level_filter(&self) -> anyhow::Result<LevelFilter> {
        LevelFilter::from_str(self.log_level.trim())
            .map_err(|_| anyhow::anyhow!("invalid LOG_LEVEL value: '{}'", self.log_level))
    }

    /// Constructs the Send API endpoint for sending messages
    pub fn send_msg_endpoint(&self) -> String {
        format!(
            "{host}/{version}/me/messages",
            host = self.graph_api_url.trim_end_matches('/'),
            version = self.graph_api_version.trim_matches('/'),
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    pub(crate) fn test_config() -> AppConfig {
        config_from(&[("VERIFY_TOKEN", "verify-me"), ("PAGE_ACCESS_TOKEN", "page-token")])
            .unwrap()
    }

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, envconfig::Error> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::init_from_hashmap(&vars)
    }

    #[test]
    fn test_defaults_applied() {
        let app_config = test_config();

        assert!(app_config.validate().is_ok());
        assert_eq!(app_config.web_server_host, "0.0.0.0");
        assert_eq!(app_config.web_server_port, 8080);
        assert_eq!(app_config.index_page_path, "index.html");
        assert!(app_config.app_secret().is_none());
        assert_eq!(app_config.log_level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_missing_secret_fails() {
        assert!(config_from(&[("VERIFY_TOKEN", "verify-me")]).is_err());
        assert!(config_from(&[("PAGE_ACCESS_TOKEN", "page-token")]).is_err());
    }

    #[test]
    fn test_blank_secret_fails_validation() {
        let app_config =
            config_from(&[("VERIFY_TOKEN", "   "), ("PAGE_ACCESS_TOKEN", "page-token")]).unwrap();
        assert!(app_config.validate().is_err());

        let app_config =
            config_from(&[("VERIFY_TOKEN", "verify-me"), ("PAGE_ACCESS_TOKEN", "")]).unwrap();
        assert!(app_config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level_fails_validation() {
        let app_config = config_from(&[
            ("VERIFY_TOKEN", "verify-me"),
            ("PAGE_ACCESS_TOKEN", "page-token"),
            ("LOG_LEVEL", "loud"),
        ])
        .unwrap();

        assert!(app_config.validate().is_err());
    }

    #[test]
    fn test_blank_app_secret_is_ignored() {
        let mut app_config = test_config();
        app_config.app_secret = Some("  ".into());
        assert!(app_config.app_secret().is_none());

        app_config.app_secret = Some("shh".into());
        assert_eq!(app_config.app_secret(), Some("shh"));
    }

    #[test]
    fn test_send_msg_endpoint() {
        let mut app_config = test_config();
        assert_eq!(
            app_config.send_msg_endpoint(),
            "https://graph.facebook.com/v2.6/me/messages"
        );

        app_config.graph_api_url = "http://localhost:9000/".into();
        app_config.graph_api_version = "v19.0".into();
        assert_eq!(
            app_config.send_msg_endpoint(),
            "http://localhost:9000/v19.0/me/messages"
        );
    }
}
