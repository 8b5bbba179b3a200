//! Environment extraction from hyper requests

use crate::env::Environment;
use hyper::Request;

/// Snapshot the parts of `req` the helpers need
///
/// `is_secure` and `server_port` describe the listener the request came in
/// on; hyper does not record either on the request itself. Repeated header
/// lines are folded into one value (`; ` for `Cookie`, `, ` otherwise);
/// values that are not visible ASCII are skipped.
pub fn environment_from_request<B>(
    req: &Request<B>,
    is_secure: bool,
    server_port: u16,
) -> Environment {
    let host = req
        .headers()
        .get(hyper::header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(strip_port)
        .filter(|h| !h.is_empty())
        .or_else(|| req.uri().host())
        .unwrap_or("localhost")
        .to_string();

    let mut env = Environment::new(host, server_port)
        .with_secure(is_secure)
        .with_path(req.uri().path())
        .with_query(req.uri().query().unwrap_or_default());

    for name in req.headers().keys() {
        let values: Vec<&str> = req
            .headers()
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        if values.is_empty() {
            continue;
        }
        let separator = if name == hyper::header::COOKIE { "; " } else { ", " };
        env = env.with_header(name.as_str(), values.join(separator));
    }
    env
}

/// Remove a `:port` suffix, keeping bracketed IPv6 literals intact
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    host.split(':').next().unwrap_or(host)
}
