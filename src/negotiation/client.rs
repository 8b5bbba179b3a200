//! User-Agent inspection
//!
//! Detects Internet Explorer (classic `MSIE` tokens and the `Trident`
//! engine used by IE 11) so handlers can pick legacy-safe output.

use crate::env::Environment;

/// User-Agent header of the current request
pub fn user_agent(env: &Environment) -> Option<&str> {
    env.header("user-agent")
}

/// Whether `ua` identifies Internet Explorer
pub fn is_ie(ua: Option<&str>) -> bool {
    ua.is_some_and(|ua| {
        let ua = ua.to_ascii_lowercase();
        ua.contains("msie") || ua.contains("trident")
    })
}

/// Internet Explorer version string, if `ua` is IE
///
/// # Examples
/// ```
/// use sitekit::negotiation::client::ie_version;
///
/// let ua = "Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1)";
/// assert_eq!(ie_version(Some(ua)).as_deref(), Some("8.0"));
/// assert_eq!(ie_version(Some("Mozilla/5.0 (X11; Linux x86_64)")), None);
/// ```
pub fn ie_version(ua: Option<&str>) -> Option<String> {
    let ua = ua.filter(|ua| !ua.is_empty())?;
    msie_version(ua).or_else(|| trident_version(ua))
}

/// `MSIE <version>;`
fn msie_version(ua: &str) -> Option<String> {
    let (_, rest) = ua.split_once("MSIE ")?;
    let (version, _) = rest.split_once(';')?;
    Some(version.to_string())
}

/// `Trident/<d>.<d>; rv:<version>`
fn trident_version(ua: &str) -> Option<String> {
    ua.match_indices("Trident/").find_map(|(idx, token)| {
        let rest = &ua[idx + token.len()..];
        let rest = skip_digits(rest, 2)?;
        let mut chars = rest.chars();
        chars.next()?;
        let rest = skip_digits(chars.as_str(), 2)?;
        let rest = rest.strip_prefix("; rv:")?;
        let version: String = rest.chars().take_while(char::is_ascii_digit).collect();
        (!version.is_empty()).then_some(version)
    })
}

/// Skip between one and `max` ASCII digits
fn skip_digits(s: &str, max: usize) -> Option<&str> {
    let count = s.bytes().take(max).take_while(u8::is_ascii_digit).count();
    (count > 0).then(|| &s[count..])
}
