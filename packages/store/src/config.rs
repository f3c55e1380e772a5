//! # Client configuration: `gatorpool.toml`
//!
//! The web binary embeds a `gatorpool.toml` at build time and parses it with
//! [`GatorPoolConfig::from_toml`]. Every field has a default, so an empty file
//! is a valid configuration.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080"
//!
//! [geocoding]
//! access_token = ""
//! debounce_ms = 500        # wait after the last keystroke before searching
//! min_query_chars = 3      # shorter queries clear results without a request
//! max_results = 5
//! style = "mapbox/streets-v12"
//!
//! [map]
//! center_lat = 29.6436     # University of Florida
//! center_lng = -82.3549
//! center_label = "University of Florida"
//! zoom = 13.0
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`GatorPoolConfig`] | Top-level config with TOML (de)serialisation, builder overrides and the canonical filename. |
//! | [`ApiConfig`] | Backend base URL. |
//! | [`GeocodingConfig`] | Provider token, autocomplete tuning and static map style. |
//! | [`MapConfig`] | Default map center used before the user picks a place. |

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid gatorpool.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialise config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GatorPoolConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme, host and optional port. No trailing slash needed.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeocodingConfig {
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_style")]
    pub style: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(default = "default_center_lng")]
    pub center_lng: f64,
    #[serde(default = "default_center_label")]
    pub center_label: String,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_min_query_chars() -> usize {
    3
}

fn default_max_results() -> usize {
    5
}

fn default_style() -> String {
    "mapbox/streets-v12".to_string()
}

fn default_center_lat() -> f64 {
    29.6436
}

fn default_center_lng() -> f64 {
    -82.3549
}

fn default_center_label() -> String {
    "University of Florida".to_string()
}

fn default_zoom() -> f64 {
    13.0
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
            max_results: default_max_results(),
            style: default_style(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            center_label: default_center_label(),
            zoom: default_zoom(),
        }
    }
}

impl GatorPoolConfig {
    /// Builder method to point at a different backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder method to set the geocoding provider token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.geocoding.access_token = token.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "gatorpool.toml"
    }

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = GatorPoolConfig::from_toml("").unwrap();
        assert_eq!(config, GatorPoolConfig::default());
        assert_eq!(config.geocoding.debounce_ms, 500);
        assert_eq!(config.geocoding.min_query_chars, 3);
        assert_eq!(config.geocoding.max_results, 5);
        assert_eq!(config.map.center_label, "University of Florida");
    }

    #[test]
    fn test_partial_sections() {
        let config = GatorPoolConfig::from_toml(
            r#"
            [api]
            base_url = "https://api.gatorpool.app"

            [geocoding]
            debounce_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.gatorpool.app");
        assert_eq!(config.geocoding.debounce_ms, 250);
        assert_eq!(config.geocoding.max_results, 5);
        assert_eq!(config.map, MapConfig::default());
    }

    #[test]
    fn test_builder_and_roundtrip() {
        let config = GatorPoolConfig::default()
            .with_base_url("https://api.example.edu/")
            .with_access_token("pk.test");
        assert_eq!(config.api.base_url, "https://api.example.edu");

        let text = config.to_toml().unwrap();
        let parsed = GatorPoolConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = GatorPoolConfig::from_toml("[api\nbase_url = 1").unwrap_err();
        assert!(err.to_string().starts_with("invalid gatorpool.toml"));
    }
}
