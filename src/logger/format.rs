//! Directive log format module
//!
//! Supports multiple log formats:
//! - `common` (single human-readable line)
//! - `json` (JSON structured logging)
//! - Custom patterns with variables

use chrono::Local;

/// What kind of response a directive produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Redirect,
    Attachment,
    Inline,
}

impl DirectiveKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Redirect => "redirect",
            Self::Attachment => "attachment",
            Self::Inline => "inline",
        }
    }
}

/// One issued redirect or download
#[derive(Debug, Clone)]
pub struct DirectiveLogEntry {
    /// When the directive was built
    pub time: chrono::DateTime<Local>,
    pub kind: DirectiveKind,
    /// Request path the directive answers
    pub request_uri: String,
    /// Redirect location or download filename
    pub target: String,
    /// Download MIME type
    pub mime: Option<String>,
    /// Download body size in bytes
    pub bytes: Option<u64>,
    /// Status the calling framework is expected to send
    pub status: u16,
}

impl DirectiveLogEntry {
    pub fn redirect(request_uri: &str, location: &str) -> Self {
        Self {
            time: Local::now(),
            kind: DirectiveKind::Redirect,
            request_uri: request_uri.to_string(),
            target: location.to_string(),
            mime: None,
            bytes: None,
            status: 302,
        }
    }

    pub fn download(
        request_uri: &str,
        filename: &str,
        mime: &str,
        bytes: u64,
        inline: bool,
    ) -> Self {
        Self {
            time: Local::now(),
            kind: if inline {
                DirectiveKind::Inline
            } else {
                DirectiveKind::Attachment
            },
            request_uri: request_uri.to_string(),
            target: filename.to_string(),
            mime: Some(mime.to_string()),
            bytes: Some(bytes),
            status: 200,
        }
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    /// `[$time_local] $kind $request_uri -> $target [$mime $bytes] $status`
    fn format_common(&self) -> String {
        let detail = match (&self.mime, self.bytes) {
            (Some(mime), Some(bytes)) => format!(" ({mime}, {bytes} bytes)"),
            _ => String::new(),
        };
        format!(
            "[{}] {} {} -> {}{} {}",
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.kind.as_str().to_ascii_uppercase(),
            self.request_uri,
            self.target,
            detail,
            self.status,
        )
    }

    fn format_json(&self) -> String {
        serde_json::json!({
            "time": self.time.to_rfc3339(),
            "kind": self.kind.as_str(),
            "request_uri": self.request_uri,
            "target": self.target,
            "mime": self.mime,
            "bytes": self.bytes,
            "status": self.status,
        })
        .to_string()
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables:
    /// - `$time_local` - Local time in Common Log Format
    /// - `$time_iso8601` - ISO 8601 timestamp
    /// - `$kind` - redirect, attachment or inline
    /// - `$request_uri` - Request path
    /// - `$target` - Redirect location or download filename
    /// - `$mime` - Download MIME type (`-` for redirects)
    /// - `$bytes` - Download size (`-` for redirects)
    /// - `$status` - Expected response status
    fn format_custom(&self, pattern: &str) -> String {
        pattern
            .replace(
                "$time_local",
                &self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string(),
            )
            .replace("$time_iso8601", &self.time.to_rfc3339())
            .replace("$kind", self.kind.as_str())
            .replace("$request_uri", &self.request_uri)
            .replace("$target", &self.target)
            .replace("$mime", self.mime.as_deref().unwrap_or("-"))
            .replace(
                "$bytes",
                &self.bytes.map_or_else(|| "-".to_string(), |b| b.to_string()),
            )
            .replace("$status", &self.status.to_string())
    }
}
