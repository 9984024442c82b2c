//! Client configuration.
//!
//! Credentials are not modelled here; callers that need `Authorization` or
//! `Harvest-Account-Id` headers pass them through `default_headers` or add
//! them in their transport.

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.harvestapp.com/v2";

/// Settings applied to every request built by `HarvestClient`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            default_headers: Vec::new(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Reads `HARVEST_BASE_URL` and `HARVEST_USER_AGENT`, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("HARVEST_BASE_URL") {
            config = config.with_base_url(&base_url);
        }
        if let Ok(user_agent) = std::env::var("HARVEST_USER_AGENT") {
            config.user_agent = user_agent;
        }
        config
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers.push((name.to_string(), value.to_string()));
        self
    }
}

fn default_user_agent() -> String {
    format!("harvest-core/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_harvest_v2() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.harvestapp.com/v2");
        assert!(config.user_agent.starts_with("harvest-core/"));
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("http://localhost:3000/");
        assert_eq!(config.base_url, "http://localhost:3000");
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"user_agent":"MyApp (ops@example.com)"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.user_agent, "MyApp (ops@example.com)");
    }

    #[test]
    fn from_env_reads_overrides_and_falls_back() {
        std::env::set_var("HARVEST_BASE_URL", "http://localhost:3000/");
        std::env::set_var("HARVEST_USER_AGENT", "MyApp (ops@example.com)");
        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.user_agent, "MyApp (ops@example.com)");

        std::env::remove_var("HARVEST_BASE_URL");
        std::env::remove_var("HARVEST_USER_AGENT");
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
    }

    #[test]
    fn headers_accumulate_in_order() {
        let config = ClientConfig::default()
            .with_header("Harvest-Account-Id", "42")
            .with_header("Authorization", "Bearer token");
        assert_eq!(config.default_headers[0].0, "Harvest-Account-Id");
        assert_eq!(config.default_headers[1].1, "Bearer token");
    }
}
