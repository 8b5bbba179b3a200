// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub mime: MimeConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

/// Site-wide negotiation settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Language assumed when a request carries no Accept-Language header
    #[serde(default = "default_language")]
    pub default_language: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_language() -> String {
    crate::negotiation::DEFAULT_LANGUAGE.to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Minimum level written: error, warn, info or debug
    #[serde(default = "default_level")]
    pub level: String,
    /// Directive log format (common, json, or custom pattern)
    #[serde(default = "default_format")]
    pub format: String,
    /// Info log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_level() -> String {
    "info".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_format() -> String {
    "common".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

/// Extra MIME aliases, e.g. `report = "application/vnd.example.report"`
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct MimeConfig {
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

/// Download configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    /// MIME type reported when sniffing recognises nothing
    #[serde(default = "default_fallback_type")]
    pub fallback_type: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_fallback_type() -> String {
    crate::http::mime::OCTET_STREAM.to_string()
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            fallback_type: default_fallback_type(),
        }
    }
}
