//! Content negotiation from client request headers
//!
//! Pure functions over header values or an [`Environment`](crate::env::Environment) snapshot.

pub mod client;
pub mod language;

pub use client::{ie_version, is_ie};
pub use language::{
    accept_language, parse_accept_language, parse_accept_language_or, LanguagePreference,
    DEFAULT_LANGUAGE,
};
