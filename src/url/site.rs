//! Canonical site URL construction
//!
//! Works out protocol, host and port for the running site from the request
//! environment, honouring explicit overrides.

use crate::env::Environment;

pub const DEFAULT_HTTP_PORT: u16 = 80;
pub const DEFAULT_HTTPS_PORT: u16 = 443;

/// Base URL of the site, e.g. `https://example.com` or `http://example.com:8080`
///
/// Protocol: `ssl` when given, else `env.is_secure`.
/// Port suffix: `port` when given; none when only `ssl` was forced;
/// otherwise `env.port` unless it is the protocol's default.
///
/// # Examples
/// ```
/// use sitekit::env::Environment;
/// use sitekit::url::resolve_base_url;
///
/// let env = Environment::new("example.com", 443).with_secure(true);
/// assert_eq!(resolve_base_url(&env, None, None), "https://example.com");
/// assert_eq!(resolve_base_url(&env, Some(false), Some(8080)), "http://example.com:8080");
/// ```
pub fn resolve_base_url(env: &Environment, ssl: Option<bool>, port: Option<u16>) -> String {
    let secure = ssl.unwrap_or(env.is_secure);
    let proto = if secure { "https" } else { "http" };

    let port_suffix = match (port, ssl) {
        (Some(port), _) => format!(":{port}"),
        (None, Some(_)) => String::new(),
        (None, None) => {
            let default_port = if secure {
                DEFAULT_HTTPS_PORT
            } else {
                DEFAULT_HTTP_PORT
            };
            if env.port == default_port {
                String::new()
            } else {
                format!(":{}", env.port)
            }
        }
    };

    format!("{proto}://{}{port_suffix}", env.host)
}

/// Path of the current request, optionally with its query string
///
/// Always starts with `/`.
pub fn current_request_uri(env: &Environment, include_query: bool) -> String {
    let mut uri = format!("/{}", env.request_path.trim_start_matches('/'));
    if include_query && !env.query_string.is_empty() {
        uri.push('?');
        uri.push_str(&env.query_string);
    }
    uri
}

/// Full URL of the current request, query string included
pub fn current_url(env: &Environment) -> String {
    resolve_base_url(env, None, None) + &current_request_uri(env, true)
}

/// Absolute URL for a site path, auto-detecting protocol and port
pub fn site_url(env: &Environment, path: &str) -> String {
    format!(
        "{}/{}",
        resolve_base_url(env, None, None),
        path.trim_start_matches('/')
    )
}

/// Executing script path, or only its final component when `full` is false
pub fn script_name(env: &Environment, full: bool) -> &str {
    if full {
        return &env.script_name;
    }
    env.script_name
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}
