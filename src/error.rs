//! Crate error type
//!
//! Malformed Accept-Language entries never reach this type: the negotiator
//! skips them in place.

use std::path::PathBuf;

/// Errors surfaced to the request handler
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Download source is missing or cannot be read
    #[error("file not found or unreadable: {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `relative` and `full` were both set and disagree
    #[error("conflicting url options: relative={relative}, full={full}")]
    InvalidOptionCombination { relative: bool, full: bool },

    /// Writing a response body or removing a sent file failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A value bound for a header line contains a control character
    #[error("invalid {header} header value: {value:?}")]
    InvalidHeaderValue { header: &'static str, value: String },

    /// Safe64 input could not be decoded
    #[error("safe64 decode failed: {0}")]
    Codec(#[from] base64::DecodeError),

    /// Raw (unserialized) Safe64 mode only carries strings
    #[error("safe64 raw mode needs a string value")]
    RawValueNotString,

    /// Raw Safe64 payload is not UTF-8
    #[error("safe64 payload is not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config: {0}")]
    Config(#[from] config::ConfigError),

    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
