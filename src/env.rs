//! Request environment snapshot
//!
//! Everything the helpers know about the current request arrives through an
//! [`Environment`] value. Nothing in this crate reads process-wide request
//! state, so every operation can be reproduced from the same snapshot.

use std::collections::BTreeMap;

/// Read-only request metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Header values keyed by lowercased header name
    headers: BTreeMap<String, String>,
    /// Whether the request arrived over TLS
    pub is_secure: bool,
    /// Server name, without port
    pub host: String,
    /// Port the server accepted the request on
    pub port: u16,
    /// Request path, without query string
    pub request_path: String,
    /// Query string without the leading `?` (empty when absent)
    pub query_string: String,
    /// Path of the executing script or handler (empty when unknown)
    pub script_name: String,
}

impl Environment {
    /// Plain-HTTP environment for `host:port` at path `/`
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            headers: BTreeMap::new(),
            is_secure: false,
            host: host.into(),
            port,
            request_path: "/".to_string(),
            query_string: String::new(),
            script_name: String::new(),
        }
    }

    #[must_use]
    pub fn with_secure(mut self, is_secure: bool) -> Self {
        self.is_secure = is_secure;
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.request_path = path.into();
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query_string = query.into();
        self
    }

    #[must_use]
    pub fn with_script_name(mut self, script_name: impl Into<String>) -> Self {
        self.script_name = script_name.into();
        self
    }

    /// Add a header; a later value for the same name replaces the earlier one
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Iterate over `(lowercased name, value)` pairs
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let env = Environment::new("example.com", 80).with_header("Accept-Language", "fr");
        assert_eq!(env.header("accept-language"), Some("fr"));
        assert_eq!(env.header("ACCEPT-LANGUAGE"), Some("fr"));
        assert_eq!(env.header("user-agent"), None);
    }

    #[test]
    fn test_defaults() {
        let env = Environment::new("example.com", 8080);
        assert!(!env.is_secure);
        assert_eq!(env.request_path, "/");
        assert!(env.query_string.is_empty());
        assert_eq!(env.headers().count(), 0);
    }
}
