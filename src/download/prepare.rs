//! Download preparation
//!
//! Resolves MIME type, filename and size for a [`DownloadRequest`] and
//! builds the header set the client will receive.

use super::directive::{Body, DownloadDirective};
use super::request::{DownloadRequest, Source};
use crate::env::Environment;
use crate::error::{Error, Result};
use crate::http::mime::MimeLookup;
use crate::http::sink::{check_header_value, HeaderList, HeaderSink};
use crate::http::sniff::ContentProber;
use crate::logger::{self, DirectiveLogEntry};
use crate::url::current_request_uri;
use std::fs::{self, File};
use std::io;
use std::path::Path;

/// Prepare a download
///
/// A file source is checked before anything else: a missing or unreadable
/// file fails with [`Error::FileNotFound`] and no headers are produced.
///
/// The resolved MIME type and the client-facing filename must be free of
/// control characters, else [`Error::InvalidHeaderValue`] is returned.
///
/// MIME resolution order:
/// 1. `mime_type` containing `/`, used verbatim
/// 2. `mime_type` as an alias through `mime_lookup`, or verbatim on a miss
/// 3. `prober` on the content bytes or on the file
pub fn prepare_download(
    env: &Environment,
    request: DownloadRequest,
    mime_lookup: &dyn MimeLookup,
    prober: &dyn ContentProber,
) -> Result<DownloadDirective> {
    let DownloadRequest {
        source,
        mime_type,
        filename,
        inline,
        delete_after_send,
    } = request;

    let (mime, filename, size, body) = match source {
        Source::Content { name, bytes } => {
            let mime = match resolve_declared_mime(mime_type.as_deref(), mime_lookup) {
                Some(mime) => mime,
                None => prober.probe(&bytes),
            };
            let size = bytes.len() as u64;
            (mime, name, size, Body::Content(bytes))
        }
        Source::File(path) => {
            let size = readable_file_size(&path)?;
            let mime = match resolve_declared_mime(mime_type.as_deref(), mime_lookup) {
                Some(mime) => mime,
                None => prober.probe_file(&path).map_err(|source| Error::FileNotFound {
                    path: path.clone(),
                    source,
                })?,
            };
            let filename = filename.unwrap_or_else(|| base_name(&path));
            (
                mime,
                filename,
                size,
                Body::File {
                    path,
                    delete_after_send,
                },
            )
        }
    };

    check_header_value("Content-Type", &mime)?;
    check_header_value("Content-Disposition", &filename)?;
    let headers = download_headers(&mime, &filename, size, inline);

    logger::log_directive(&DirectiveLogEntry::download(
        &current_request_uri(env, false),
        &filename,
        &mime,
        size,
        inline,
    ));

    Ok(DownloadDirective::new(headers, body, filename, mime, size))
}

/// MIME type from the caller's declaration, if there is one
fn resolve_declared_mime(declared: Option<&str>, mime_lookup: &dyn MimeLookup) -> Option<String> {
    let declared = declared?;
    if declared.contains('/') {
        return Some(declared.to_string());
    }
    match mime_lookup.lookup(declared) {
        Some(mime) => Some(mime),
        None => {
            logger::log_debug(&format!("Unknown MIME alias '{declared}', sending it verbatim"));
            Some(declared.to_string())
        }
    }
}

/// Size of a regular file that can be opened for reading
fn readable_file_size(path: &Path) -> Result<u64> {
    let not_found = |source: io::Error| Error::FileNotFound {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(not_found)?;
    if !metadata.is_file() {
        return Err(not_found(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    File::open(path).map_err(not_found)?;
    Ok(metadata.len())
}

/// Final path component, lossily converted
fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Escape a filename for a quoted header parameter
fn quote(filename: &str) -> String {
    filename.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Header lines for a download, in emission order
fn download_headers(mime: &str, filename: &str, size: u64, inline: bool) -> HeaderList {
    let mut headers = HeaderList::new();
    if inline {
        headers.emit("Content-Type", mime);
        return headers;
    }

    let quoted = quote(filename);
    headers.emit("Content-Description", "File Transfer");
    headers.emit("Content-Type", &format!("{mime}; name=\"{quoted}\""));
    headers.emit(
        "Content-Disposition",
        &format!("attachment; filename=\"{quoted}\""),
    );
    headers.emit("Content-Transfer-Encoding", "binary");
    headers.emit("Expires", "0");
    headers.emit("Cache-Control", "must-revalidate");
    headers.emit("Content-Length", &size.to_string());
    headers
}
