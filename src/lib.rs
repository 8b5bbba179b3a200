//! Request helpers for HTTP handlers
//!
//! - [`negotiation`]: Accept-Language ranking and User-Agent checks
//! - [`url`]: canonical site URLs and redirect directives
//! - [`download`]: file download directives with correct headers
//!
//! Every operation takes an explicit [`env::Environment`] snapshot and
//! reports effects as directives or through a [`http::HeaderSink`].

pub mod codec;
pub mod config;
pub mod download;
pub mod env;
pub mod error;
pub mod http;
pub mod logger;
pub mod negotiation;
pub mod url;

pub use error::{Error, Result};
