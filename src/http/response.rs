//! HTTP response building module
//!
//! Turns redirect and download directives (and the errors that replace
//! them) into hyper responses.

use crate::download::{Body, DownloadDirective};
use crate::error::{Error, Result};
use crate::url::RedirectDirective;
use http_body_util::Full;
use hyper::body::{Body as HttpBody, Bytes, Frame, SizeHint};
use hyper::{HeaderMap, Response};
use std::convert::Infallible;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::fs;

/// Response body for a download
///
/// When built from a file marked for deletion, the file is removed once
/// the final frame has been handed to hyper. Dropping the body before that
/// (client gone, connection aborted) leaves the file in place.
#[derive(Debug)]
pub struct DownloadBody {
    inner: Full<Bytes>,
    delete_on_end: Option<PathBuf>,
}

impl DownloadBody {
    fn new(data: Bytes, delete_on_end: Option<PathBuf>) -> Self {
        Self {
            inner: Full::new(data),
            delete_on_end,
        }
    }

    fn finish(&mut self) {
        if let Some(path) = self.delete_on_end.take() {
            if let Err(e) = std::fs::remove_file(&path) {
                crate::logger::log_error(&format!(
                    "Failed to remove sent file '{}': {e}",
                    path.display()
                ));
            }
        }
    }
}

impl HttpBody for DownloadBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<std::result::Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        let polled = Pin::new(&mut this.inner).poll_frame(cx);
        if polled.is_ready() && this.inner.is_end_stream() {
            this.finish();
        }
        polled
    }

    // Stay open until the pending deletion has run, even for empty files
    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream() && self.delete_on_end.is_none()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

/// Build 302 redirect response from a directive
pub fn build_redirect_response(directive: &RedirectDirective) -> Response<Full<Bytes>> {
    build_redirect_response_with_code(directive, 302)
}

/// Build redirect response with a specific 3xx status
pub fn build_redirect_response_with_code(
    directive: &RedirectDirective,
    status: u16,
) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Location", directive.location())
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Redirecting...")))
        .unwrap_or_else(|e| {
            log_build_error("redirect", &e);
            build_500_response()
        })
}

/// Build 200 download response, reading a file body with tokio
///
/// A file marked for deletion stays on disk until hyper has polled the
/// whole body; a failed read leaves it in place.
pub async fn build_download_response(
    directive: DownloadDirective,
) -> Result<Response<DownloadBody>> {
    let (headers, body) = directive.into_parts();

    let body = match body {
        Body::Content(bytes) => DownloadBody::new(Bytes::from(bytes), None),
        Body::File {
            path,
            delete_after_send,
        } => {
            let data = fs::read(&path)
                .await
                .map_err(|source| Error::FileNotFound {
                    path: path.clone(),
                    source,
                })?;
            DownloadBody::new(Bytes::from(data), delete_after_send.then_some(path))
        }
    };

    let mut header_map = HeaderMap::new();
    headers.replay(&mut header_map);

    let mut response = Response::new(body);
    *response.headers_mut() = header_map;
    Ok(response)
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("500 Internal Server Error")))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("500 Internal Server Error")))
        })
}

/// Map a helper error onto the response a handler should send
///
/// The error itself is logged; clients only see the status text.
pub fn build_error_response(error: &Error) -> Response<Full<Bytes>> {
    match error {
        Error::FileNotFound { .. } => {
            crate::logger::log_warning(&error.to_string());
            build_404_response()
        }
        _ => {
            crate::logger::log_error(&error.to_string());
            build_500_response()
        }
    }
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::{prepare_download, DownloadRequest};
    use crate::env::Environment;
    use crate::http::mime::AliasTable;
    use crate::http::sniff::MagicProber;
    use crate::url::{redirect, UrlOptions};
    use http_body_util::BodyExt;

    fn env() -> Environment {
        Environment::new("example.com", 443).with_secure(true)
    }

    fn prepare(request: DownloadRequest) -> DownloadDirective {
        prepare_download(&env(), request, &AliasTable::new(), &MagicProber::default()).unwrap()
    }

    #[test]
    fn test_redirect_response() {
        let directive = redirect(&env(), "/next", &UrlOptions::new()).unwrap();
        let response = build_redirect_response(&directive);
        assert_eq!(response.status(), 302);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "https://example.com/next"
        );

        let moved = build_redirect_response_with_code(&directive, 301);
        assert_eq!(moved.status(), 301);
    }

    #[tokio::test]
    async fn test_download_response_content() {
        let directive = prepare(DownloadRequest::content("notes.txt", "remember"));
        let response = build_download_response(directive).await.unwrap();

        assert_eq!(response.status(), 200);
        let headers = response.headers();
        assert_eq!(headers.get("content-length").unwrap(), "8");
        assert_eq!(
            headers.get("content-disposition").unwrap(),
            "attachment; filename=\"notes.txt\""
        );

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"remember");
    }

    #[tokio::test]
    async fn test_download_response_file_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("once.txt");
        std::fs::write(&path, "one shot").unwrap();

        let request = DownloadRequest::file(&path).delete_after_send(true).inline(true);
        let response = build_download_response(prepare(request)).await.unwrap();

        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.headers().get("content-type").unwrap(), "text/plain");
        // Still there until the body has been consumed
        assert!(path.exists());
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"one shot");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_download_response_dropped_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kept.txt");
        std::fs::write(&path, "not sent").unwrap();

        let request = DownloadRequest::file(&path).delete_after_send(true);
        let response = build_download_response(prepare(request)).await.unwrap();
        drop(response);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_download_response_empty_file_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();

        let request = DownloadRequest::file(&path).delete_after_send(true);
        let response = build_download_response(prepare(request)).await.unwrap();
        assert!(!response.body().is_end_stream());
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_unbuildable_redirect_is_server_error() {
        // hyper only accepts visible ASCII in header values
        let directive = redirect(&env(), "/caf\u{e9}", &UrlOptions::new()).unwrap();
        let response = build_redirect_response(&directive);
        assert_eq!(response.status(), 500);
        assert!(response.headers().get("location").is_none());
    }

    #[test]
    fn test_error_responses() {
        let missing = prepare_download(
            &env(),
            DownloadRequest::file("/no/such/file"),
            &AliasTable::new(),
            &MagicProber::default(),
        )
        .unwrap_err();
        assert_eq!(build_error_response(&missing).status(), 404);

        let conflict = Error::InvalidOptionCombination {
            relative: true,
            full: true,
        };
        assert_eq!(build_error_response(&conflict).status(), 500);
    }
}
