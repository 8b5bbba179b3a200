//! Content sniffing module
//!
//! Guesses a MIME type from the bytes themselves (magic numbers, markup
//! prefixes, JSON and plain-text checks). Used for downloads that do not
//! name their type.

use super::mime::{self, OCTET_STREAM};
use serde::de::IgnoredAny;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// How many leading bytes of a file are inspected
const SNIFF_LEN: u64 = 8192;

/// Reported for zero-length content
pub const EMPTY: &str = "application/x-empty";

/// Detects the MIME type of content
pub trait ContentProber {
    /// MIME type of an in-memory buffer
    fn probe(&self, bytes: &[u8]) -> String;

    /// MIME type of a file on disk
    fn probe_file(&self, path: &Path) -> io::Result<String>;
}

/// Magic-number based prober
#[derive(Debug, Clone)]
pub struct MagicProber {
    fallback: String,
}

impl Default for MagicProber {
    fn default() -> Self {
        Self::new(OCTET_STREAM)
    }
}

impl MagicProber {
    /// Prober reporting `fallback` for unrecognised binary data
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
        }
    }

    fn sniff(&self, bytes: &[u8]) -> String {
        sniff_magic(bytes, false).map_or_else(|| self.fallback.clone(), ToString::to_string)
    }
}

impl ContentProber for MagicProber {
    fn probe(&self, bytes: &[u8]) -> String {
        if bytes.is_empty() {
            return EMPTY.to_string();
        }
        if looks_like_json(bytes) {
            return "application/json".to_string();
        }
        self.sniff(bytes)
    }

    fn probe_file(&self, path: &Path) -> io::Result<String> {
        let mut head = Vec::new();
        let mut file = File::open(path)?;
        (&mut file).take(SNIFF_LEN).read_to_end(&mut head)?;

        if head.is_empty() {
            return Ok(EMPTY.to_string());
        }

        // Anything past the window means the head may end mid-character
        let truncated = file.read(&mut [0u8; 1])? > 0;

        if starts_like_json(&head) {
            let is_json = if truncated {
                serde_json::from_reader::<_, IgnoredAny>(BufReader::new(File::open(path)?)).is_ok()
            } else {
                looks_like_json(&head)
            };
            if is_json {
                return Ok("application/json".to_string());
            }
        }

        match sniff_magic(&head, truncated) {
            Some(found) => Ok(found.to_string()),
            // Unknown bytes: trust a recognised extension over the fallback
            None => {
                let by_ext = mime::get_content_type(path.extension().and_then(|e| e.to_str()));
                Ok(if by_ext == OCTET_STREAM {
                    self.fallback.clone()
                } else {
                    by_ext.to_string()
                })
            }
        }
    }
}

/// Recognise well-known signatures, markup and plain text
///
/// With `truncated`, `bytes` is only a prefix of the content and an
/// incomplete UTF-8 sequence at its very end does not disqualify text.
fn sniff_magic(bytes: &[u8], truncated: bool) -> Option<&'static str> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xff\xd8\xff", "image/jpeg"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"%PDF-", "application/pdf"),
        (b"PK\x03\x04", "application/zip"),
        (b"\x1f\x8b", "application/gzip"),
        (b"\0asm", "application/wasm"),
        (b"ID3", "audio/mpeg"),
        (b"fLaC", "audio/flac"),
        (b"OggS", "audio/ogg"),
        (b"wOFF", "font/woff"),
        (b"wOF2", "font/woff2"),
    ];

    if let Some(&(_, found)) = SIGNATURES.iter().find(|(magic, _)| bytes.starts_with(magic)) {
        return Some(found);
    }

    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") {
        match &bytes[8..12] {
            b"WEBP" => return Some("image/webp"),
            b"WAVE" => return Some("audio/x-wav"),
            b"AVI " => return Some("video/x-msvideo"),
            _ => {}
        }
    }

    if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        return Some("video/mp4");
    }

    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) if truncated && e.error_len().is_none() => {
            std::str::from_utf8(&bytes[..e.valid_up_to()]).ok()?
        }
        Err(_) => return None,
    };
    if text.chars().any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r' | '\x0c')) {
        return None;
    }

    let lead = text.trim_start().to_ascii_lowercase();
    if lead.starts_with("<!doctype html") || lead.starts_with("<html") {
        Some("text/html")
    } else if lead.starts_with("<?xml") {
        Some("text/xml")
    } else {
        Some("text/plain")
    }
}

/// First non-blank byte opens an object or array
fn starts_like_json(bytes: &[u8]) -> bool {
    let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
    matches!(first, Some(b'{' | b'['))
}

/// Complete JSON object or array
fn looks_like_json(bytes: &[u8]) -> bool {
    starts_like_json(bytes) && serde_json::from_slice::<IgnoredAny>(bytes).is_ok()
}
