//! Client Configuration
//!
//! Where the API lives and how long search input must be quiet before a
//! request goes out.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default quiet period for the search box, in milliseconds.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Absolute origin the `/api/...` paths are resolved against.
    /// Empty means "same origin", which only works where relative URLs do.
    pub base_url: String,
    pub search_debounce_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Join an API path onto the base URL without doubling the slash.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "");
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_url_for_trims_slashes() {
        let config = ClientConfig::default().with_base_url("http://localhost:8080/");
        assert_eq!(config.url_for("/api/items"), "http://localhost:8080/api/items");
        assert_eq!(config.url_for("api/items"), "http://localhost:8080/api/items");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ClientConfig = serde_json::from_str(r#"{"baseUrl":"https://sortbox.app"}"#).unwrap();
        assert_eq!(config.base_url, "https://sortbox.app");
        assert_eq!(config.search_debounce_ms, DEFAULT_SEARCH_DEBOUNCE_MS);
    }

    #[test]
    fn test_debounce_from_millis_field() {
        let config: ClientConfig = serde_json::from_str(r#"{"searchDebounceMs":250}"#).unwrap();
        assert_eq!(config.search_debounce(), Duration::from_millis(250));
    }
}
