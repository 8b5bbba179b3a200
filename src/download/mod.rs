//! File download streaming
//!
//! [`prepare_download`] works out headers and body source up front;
//! the returned [`DownloadDirective`] performs the effects (headers, body,
//! optional file removal) when the caller executes it.

mod directive;
mod prepare;
mod request;

pub use directive::{Body, DownloadDirective};
pub use prepare::prepare_download;
pub use request::{DownloadRequest, Source};
