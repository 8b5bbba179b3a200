//! Accept-Language parsing
//!
//! Turns a header such as `en-US,en;q=0.8,fr;q=0.5` into language tags
//! ranked by quality value. Entries that do not parse are dropped without
//! failing the whole header.

use crate::env::Environment;
use serde::Serialize;

/// Tag returned when the client sent no Accept-Language header at all
pub const DEFAULT_LANGUAGE: &str = "en";

/// Longest allowed tag segment
const MAX_SEGMENT_LEN: usize = 8;

/// A language tag with its quality value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguagePreference {
    /// Tag as sent by the client (case preserved)
    pub tag: String,
    /// Quality in `[0, 1]`
    pub quality: f32,
}

impl LanguagePreference {
    pub fn new(tag: impl Into<String>, quality: f32) -> Self {
        Self {
            tag: tag.into(),
            quality,
        }
    }

    /// Primary subtag, e.g. `en` for `en-US`
    pub fn primary(&self) -> &str {
        self.tag.split('-').next().unwrap_or(&self.tag)
    }
}

/// An entry that does not match `tag[-subtag][;q=value]`
#[derive(Debug, PartialEq, Eq)]
struct MalformedHeaderEntry;

/// Parse an Accept-Language header value
///
/// `None` (header absent) yields `[en;q=1]`. A present header with no
/// valid entries yields an empty list.
///
/// # Examples
/// ```
/// use sitekit::negotiation::parse_accept_language;
///
/// let langs = parse_accept_language(Some("en-US,en;q=0.8,fr;q=0.5"));
/// let tags: Vec<&str> = langs.iter().map(|l| l.tag.as_str()).collect();
/// assert_eq!(tags, ["en-US", "en", "fr"]);
/// ```
pub fn parse_accept_language(header: Option<&str>) -> Vec<LanguagePreference> {
    parse_accept_language_or(header, DEFAULT_LANGUAGE)
}

/// Same as [`parse_accept_language`] with a caller-chosen fallback tag
pub fn parse_accept_language_or(
    header: Option<&str>,
    default_tag: &str,
) -> Vec<LanguagePreference> {
    let Some(header) = header else {
        return vec![LanguagePreference::new(default_tag, 1.0)];
    };

    let mut langs: Vec<LanguagePreference> = Vec::new();
    for entry in header.split(',') {
        let Ok(parsed) = parse_entry(entry) else {
            continue;
        };
        // A repeated tag keeps its first position but takes the newer quality
        match langs.iter_mut().find(|l| l.tag == parsed.tag) {
            Some(existing) => existing.quality = parsed.quality,
            None => langs.push(parsed),
        }
    }

    // Vec::sort_by is stable, so equal qualities keep header order
    langs.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    langs
}

/// Parse the Accept-Language header carried by `env`
pub fn accept_language(env: &Environment) -> Vec<LanguagePreference> {
    parse_accept_language(env.header("accept-language"))
}

/// Parse one comma-separated entry
fn parse_entry(entry: &str) -> Result<LanguagePreference, MalformedHeaderEntry> {
    let (tag, params) = match entry.split_once(';') {
        Some((tag, params)) => (tag.trim(), Some(params)),
        None => (entry.trim(), None),
    };

    if !is_valid_tag(tag) {
        return Err(MalformedHeaderEntry);
    }

    let quality = match params {
        Some(params) => parse_quality_param(params)?,
        None => 1.0,
    };

    Ok(LanguagePreference::new(tag, quality))
}

/// `segment ("-" segment)?` with 1-8 alphanumerics per segment
fn is_valid_tag(tag: &str) -> bool {
    let mut segments = tag.split('-');
    let valid_segment = |s: &str| {
        !s.is_empty() && s.len() <= MAX_SEGMENT_LEN && s.bytes().all(|b| b.is_ascii_alphanumeric())
    };

    match (segments.next(), segments.next(), segments.next()) {
        (Some(primary), None, None) => valid_segment(primary),
        (Some(primary), Some(sub), None) => valid_segment(primary) && valid_segment(sub),
        _ => false,
    }
}

/// Parse `q = value`, tolerating whitespace around `=`
fn parse_quality_param(params: &str) -> Result<f32, MalformedHeaderEntry> {
    let params = params.trim();
    let Some(rest) = params.strip_prefix('q').or_else(|| params.strip_prefix('Q')) else {
        return Err(MalformedHeaderEntry);
    };
    let Some(value) = rest.trim_start().strip_prefix('=') else {
        return Err(MalformedHeaderEntry);
    };
    parse_quality(value.trim())
}

/// `1`, `1.0…`, `0` or `0.` followed by digits
fn parse_quality(value: &str) -> Result<f32, MalformedHeaderEntry> {
    let well_formed = match value.split_once('.') {
        None => value == "0" || value == "1",
        Some(("0", frac)) => !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()),
        Some(("1", frac)) => !frac.is_empty() && frac.bytes().all(|b| b == b'0'),
        Some(_) => false,
    };

    if !well_formed {
        return Err(MalformedHeaderEntry);
    }
    value.parse::<f32>().map_err(|_| MalformedHeaderEntry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(langs: &[LanguagePreference]) -> Vec<&str> {
        langs.iter().map(|l| l.tag.as_str()).collect()
    }

    #[test]
    fn test_absent_header_defaults_to_english() {
        assert_eq!(
            parse_accept_language(None),
            vec![LanguagePreference::new("en", 1.0)]
        );
    }

    #[test]
    fn test_custom_default() {
        assert_eq!(
            parse_accept_language_or(None, "de"),
            vec![LanguagePreference::new("de", 1.0)]
        );
    }

    #[test]
    fn test_ranked_example() {
        assert_eq!(
            parse_accept_language(Some("en-US,en;q=0.8,fr;q=0.5")),
            vec![
                LanguagePreference::new("en-US", 1.0),
                LanguagePreference::new("en", 0.8),
                LanguagePreference::new("fr", 0.5),
            ]
        );
    }

    #[test]
    fn test_sorted_descending() {
        let langs = parse_accept_language(Some("fr;q=0.3, de;q=0.9, ja, es;q=0.5"));
        assert_eq!(tags(&langs), ["ja", "de", "es", "fr"]);
        for pair in langs.windows(2) {
            assert!(pair[0].quality >= pair[1].quality);
        }
        assert!(langs.iter().all(|l| (0.0..=1.0).contains(&l.quality)));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let langs = parse_accept_language(Some("nl;q=0.5,da,sv;q=0.5,no"));
        assert_eq!(tags(&langs), ["da", "no", "nl", "sv"]);
    }

    #[test]
    fn test_whitespace_is_ignored() {
        let langs = parse_accept_language(Some("  en-GB ; q = 0.7 ,  it ;Q=0.2"));
        assert_eq!(
            langs,
            vec![
                LanguagePreference::new("en-GB", 0.7),
                LanguagePreference::new("it", 0.2),
            ]
        );
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let langs = parse_accept_language(Some(
            "en;q=2, *, toolongsegment, a-b-c, fr;q=0.6, de;level=1, ,pt;q=abc, es;q=0.",
        ));
        assert_eq!(langs, vec![LanguagePreference::new("fr", 0.6)]);
    }

    #[test]
    fn test_zero_and_one_qualities() {
        let langs = parse_accept_language(Some("xx;q=0, yy;q=1, zz;q=1.000, ww;q=0.05"));
        assert_eq!(tags(&langs), ["yy", "zz", "ww", "xx"]);
        assert!((langs[3].quality).abs() < f32::EPSILON);
    }

    #[test]
    fn test_no_valid_entries_is_empty() {
        assert!(parse_accept_language(Some("")).is_empty());
        assert!(parse_accept_language(Some("*;q=0.5, ???")).is_empty());
    }

    #[test]
    fn test_duplicate_tag_last_quality_wins() {
        let langs = parse_accept_language(Some("en;q=0.2, fr;q=0.5, en;q=0.9"));
        assert_eq!(
            langs,
            vec![
                LanguagePreference::new("en", 0.9),
                LanguagePreference::new("fr", 0.5),
            ]
        );
    }

    #[test]
    fn test_input_is_not_mutated_and_parse_is_repeatable() {
        let header = String::from("en-US,en;q=0.8");
        let first = parse_accept_language(Some(&header));
        let second = parse_accept_language(Some(&header));
        assert_eq!(first, second);
        assert_eq!(header, "en-US,en;q=0.8");
    }

    #[test]
    fn test_from_environment() {
        let env =
            Environment::new("example.com", 80).with_header("Accept-Language", "pt-BR,pt;q=0.4");
        assert_eq!(tags(&accept_language(&env)), ["pt-BR", "pt"]);

        let bare = Environment::new("example.com", 80);
        assert_eq!(tags(&accept_language(&bare)), ["en"]);
    }

    #[test]
    fn test_primary_subtag() {
        assert_eq!(LanguagePreference::new("en-US", 1.0).primary(), "en");
        assert_eq!(LanguagePreference::new("fr", 1.0).primary(), "fr");
    }
}
