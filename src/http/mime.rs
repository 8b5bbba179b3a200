//! MIME type lookup module
//!
//! Maps short aliases (usually file extensions, e.g. `json`) to full MIME
//! types. The built-in table can be extended per site through configuration.

use std::collections::HashMap;

/// Fallback for content nothing recognises
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Resolves a short alias to a full MIME type
pub trait MimeLookup {
    fn lookup(&self, alias: &str) -> Option<String>;
}

/// Built-in alias for `alias`, case-insensitive
///
/// # Examples
/// ```
/// use sitekit::http::mime::builtin_alias;
/// assert_eq!(builtin_alias("json"), Some("application/json"));
/// assert_eq!(builtin_alias("MP4"), Some("video/mp4"));
/// assert_eq!(builtin_alias("nope"), None);
/// ```
pub fn builtin_alias(alias: &str) -> Option<&'static str> {
    let alias = alias.to_ascii_lowercase();
    let mime = match alias.as_str() {
        // Text
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css",
        "txt" | "text" | "md" => "text/plain; charset=utf-8",
        "csv" => "text/csv",
        "xml" => "application/xml",

        // JavaScript/WASM
        "js" | "mjs" | "javascript" => "application/javascript",
        "json" => "application/json",
        "wasm" => "application/wasm",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "bmp" => "image/bmp",

        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogg" | "ogv" => "video/ogg",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",

        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "eot" => "application/vnd.ms-fontobject",

        // Documents and archives
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        "tar" => "application/x-tar",
        "bin" | "binary" => OCTET_STREAM,

        _ => return None,
    };
    Some(mime)
}

/// Content-Type for a file extension, octet-stream when unknown
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    extension.and_then(builtin_alias).unwrap_or(OCTET_STREAM)
}

/// Alias table: site-specific entries layered over the built-in ones
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    extra: HashMap<String, String>,
}

impl AliasTable {
    /// Table with built-in aliases only
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or override an alias
    #[must_use]
    pub fn with_alias(mut self, alias: &str, mime: impl Into<String>) -> Self {
        self.extra.insert(alias.to_ascii_lowercase(), mime.into());
        self
    }

    /// Add several aliases at once (config-driven)
    #[must_use]
    pub fn with_aliases<'a>(
        self,
        aliases: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Self {
        aliases
            .into_iter()
            .fold(self, |table, (alias, mime)| table.with_alias(alias, mime.clone()))
    }
}

impl MimeLookup for AliasTable {
    fn lookup(&self, alias: &str) -> Option<String> {
        self.extra
            .get(&alias.to_ascii_lowercase())
            .cloned()
            .or_else(|| builtin_alias(alias).map(ToString::to_string))
    }
}
