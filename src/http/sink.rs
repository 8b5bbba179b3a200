//! Header emission sink
//!
//! Directives never write headers anywhere on their own; they hand each
//! header line to a [`HeaderSink`] in the order the client should see them.

use crate::error::{Error, Result};
use hyper::header::{HeaderName, HeaderValue};
use hyper::HeaderMap;

/// Reject values that would break out of a single header line
///
/// Tab is the only control character allowed inside a field value.
pub fn check_header_value(header: &'static str, value: &str) -> Result<()> {
    if value.chars().any(|c| c.is_control() && c != '\t') {
        return Err(Error::InvalidHeaderValue {
            header,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Receives header lines one at a time, in order
pub trait HeaderSink {
    fn emit(&mut self, name: &str, value: &str);
}

/// Adapts a plain `FnMut(name, value)` callback into a sink
pub struct FnSink<F>(pub F);

impl<F: FnMut(&str, &str)> HeaderSink for FnSink<F> {
    fn emit(&mut self, name: &str, value: &str) {
        (self.0)(name, value);
    }
}

/// Appends to a hyper header map; lines hyper rejects are logged and dropped
impl HeaderSink for HeaderMap {
    fn emit(&mut self, name: &str, value: &str) {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.append(name, value);
            }
            _ => crate::logger::log_warning(&format!(
                "Dropping invalid header line: {name}: {value}"
            )),
        }
    }
}

/// Ordered list of emitted header lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderList(Vec<(String, String)>);

impl HeaderList {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// First value recorded for `name` (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replay every line into another sink
    pub fn replay(&self, sink: &mut impl HeaderSink) {
        for (name, value) in &self.0 {
            sink.emit(name, value);
        }
    }
}

impl HeaderSink for HeaderList {
    fn emit(&mut self, name: &str, value: &str) {
        self.0.push((name.to_string(), value.to_string()));
    }
}
