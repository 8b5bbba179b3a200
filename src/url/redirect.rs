//! Redirect directives
//!
//! [`redirect`] never ends the request itself. It returns a
//! [`RedirectDirective`] and the calling handler decides how to stop.

use super::site::{current_request_uri, resolve_base_url};
use crate::env::Environment;
use crate::error::{Error, Result};
use crate::http::sink::{check_header_value, HeaderSink};
use crate::logger::{self, DirectiveLogEntry};

/// Redirect options
///
/// `relative` and `full` are opposites; setting both to values that
/// disagree is an error. With neither set, a `:` in the target marks it as
/// a full URL. `ssl` and `port` only apply to relative targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlOptions {
    pub relative: Option<bool>,
    pub full: Option<bool>,
    pub ssl: Option<bool>,
    pub port: Option<u16>,
}

impl UrlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn relative(mut self, relative: bool) -> Self {
        self.relative = Some(relative);
        self
    }

    #[must_use]
    pub const fn full(mut self, full: bool) -> Self {
        self.full = Some(full);
        self
    }

    #[must_use]
    pub const fn ssl(mut self, ssl: bool) -> Self {
        self.ssl = Some(ssl);
        self
    }

    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Decide how `target` is to be treated
    pub fn classify(&self, target: &str) -> Result<TargetKind> {
        let relative = match (self.relative, self.full) {
            (Some(relative), Some(full)) if relative == full => {
                return Err(Error::InvalidOptionCombination { relative, full });
            }
            (Some(relative), _) => relative,
            (None, Some(full)) => !full,
            (None, None) => !target.contains(':'),
        };

        Ok(if relative {
            TargetKind::Relative
        } else {
            TargetKind::Absolute
        })
    }
}

/// Whether a redirect target still needs the site base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A site path, prefixed with the base URL
    Relative,
    /// A full URL, used as-is
    Absolute,
}

/// A redirect the caller must issue before ending the response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDirective {
    location: String,
}

impl RedirectDirective {
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Emit the `Location` header; nothing further should be written after it
    pub fn emit(&self, sink: &mut impl HeaderSink) {
        sink.emit("Location", &self.location);
    }
}

/// Build a redirect to `target`
///
/// A target carrying CR, LF or another control character fails with
/// [`Error::InvalidHeaderValue`] and nothing is logged.
///
/// # Examples
/// ```
/// use sitekit::env::Environment;
/// use sitekit::url::{redirect, UrlOptions};
///
/// let env = Environment::new("example.com", 80);
/// let to = redirect(&env, "/login", &UrlOptions::new()).unwrap();
/// assert_eq!(to.location(), "http://example.com/login");
/// ```
pub fn redirect(
    env: &Environment,
    target: &str,
    options: &UrlOptions,
) -> Result<RedirectDirective> {
    let location = match options.classify(target)? {
        TargetKind::Relative => resolve_base_url(env, options.ssl, options.port) + target,
        TargetKind::Absolute => target.to_string(),
    };
    check_header_value("Location", &location)?;

    logger::log_directive(&DirectiveLogEntry::redirect(
        &current_request_uri(env, false),
        &location,
    ));
    Ok(RedirectDirective { location })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::sink::HeaderList;

    fn env() -> Environment {
        Environment::new("example.com", 8080).with_path("/current")
    }

    #[test]
    fn test_relative_target_gets_base_url() {
        let directive = redirect(&env(), "/foo", &UrlOptions::new()).unwrap();
        assert_eq!(directive.location(), format!("{}/foo", resolve_base_url(&env(), None, None)));

        let mut headers = HeaderList::new();
        directive.emit(&mut headers);
        assert_eq!(headers.get("Location"), Some("http://example.com:8080/foo"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_absolute_target_unchanged() {
        let directive = redirect(&env(), "https://other.test/x", &UrlOptions::new()).unwrap();
        assert_eq!(directive.location(), "https://other.test/x");
    }

    #[test]
    fn test_ssl_and_port_options() {
        let secure = redirect(&env(), "/pay", &UrlOptions::new().ssl(true)).unwrap();
        assert_eq!(secure.location(), "https://example.com/pay");

        let ported = redirect(&env(), "/pay", &UrlOptions::new().ssl(true).port(8443)).unwrap();
        assert_eq!(ported.location(), "https://example.com:8443/pay");
    }

    #[test]
    fn test_explicit_classification_overrides_colon_rule() {
        // A path containing ':' forced relative
        let forced = redirect(&env(), "/time/12:30", &UrlOptions::new().relative(true)).unwrap();
        assert_eq!(forced.location(), "http://example.com:8080/time/12:30");

        let forced = redirect(&env(), "/time/12:30", &UrlOptions::new().full(false)).unwrap();
        assert_eq!(forced.location(), "http://example.com:8080/time/12:30");

        // A colon-free target forced absolute
        let kept = redirect(&env(), "elsewhere", &UrlOptions::new().full(true)).unwrap();
        assert_eq!(kept.location(), "elsewhere");
    }

    #[test]
    fn test_agreeing_options_accepted() {
        let opts = UrlOptions::new().relative(true).full(false);
        assert_eq!(opts.classify("x:y").unwrap(), TargetKind::Relative);
        let opts = UrlOptions::new().relative(false).full(true);
        assert_eq!(opts.classify("/x").unwrap(), TargetKind::Absolute);
    }

    #[test]
    fn test_conflicting_options_rejected() {
        let err = redirect(&env(), "/x", &UrlOptions::new().relative(true).full(true)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidOptionCombination { relative: true, full: true }
        ));
        assert!(UrlOptions::new().relative(false).full(false).classify("/x").is_err());
    }

    #[test]
    fn test_line_breaks_in_target_rejected() {
        let err = redirect(&env(), "/x\r\nSet-Cookie: evil=1", &UrlOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidHeaderValue { header: "Location", .. }
        ));

        let opts = UrlOptions::new().full(true);
        assert!(redirect(&env(), "https://other.test/\nx", &opts).is_err());
    }

    #[test]
    fn test_redirect_is_repeatable() {
        let a = redirect(&env(), "/foo", &UrlOptions::new()).unwrap();
        let b = redirect(&env(), "/foo", &UrlOptions::new()).unwrap();
        assert_eq!(a, b);
    }
}
