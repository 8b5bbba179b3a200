//! Common response header presets

use super::sink::HeaderSink;
use chrono::{DateTime, Utc};

/// HTTP-date layout (RFC 9110 IMF-fixdate)
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Long-past date used when a caller asks for an `Expires` header without one
pub const EXPIRED_DATE: &str = "Thu, 22 Jun 2000 18:45:00 GMT";

/// `Expires` handling for [`nocache`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expires {
    /// Only `Cache-Control`
    Omit,
    /// `Expires: Thu, 22 Jun 2000 18:45:00 GMT`
    Past,
    /// A specific instant
    At(DateTime<Utc>),
}

/// `Content-Type: application/json`
pub fn json(sink: &mut impl HeaderSink) {
    sink.emit("Content-Type", "application/json");
}

/// `Content-Type: application/xml`, or `text/xml` for legacy clients
pub fn xml(sink: &mut impl HeaderSink, text: bool) {
    let mime = if text { "text/xml" } else { "application/xml" };
    sink.emit("Content-Type", mime);
}

/// Headers telling clients and proxies not to cache the response
pub fn nocache(sink: &mut impl HeaderSink, expires: &Expires) {
    sink.emit("Cache-Control", "no-cache, must-revalidate");
    match expires {
        Expires::Omit => {}
        Expires::Past => sink.emit("Expires", EXPIRED_DATE),
        Expires::At(at) => sink.emit("Expires", &http_date(at)),
    }
}

/// Format an instant as an HTTP-date
pub fn http_date(at: &DateTime<Utc>) -> String {
    at.format(HTTP_DATE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::sink::HeaderList;
    use chrono::TimeZone;

    #[test]
    fn test_json_and_xml() {
        let mut headers = HeaderList::new();
        json(&mut headers);
        xml(&mut headers, false);
        xml(&mut headers, true);
        let values: Vec<&str> = headers.iter().map(|(_, v)| v).collect();
        assert_eq!(values, ["application/json", "application/xml", "text/xml"]);
    }

    #[test]
    fn test_nocache_variants() {
        let mut plain = HeaderList::new();
        nocache(&mut plain, &Expires::Omit);
        assert_eq!(plain.names(), ["Cache-Control"]);

        let mut past = HeaderList::new();
        nocache(&mut past, &Expires::Past);
        assert_eq!(past.get("Expires"), Some(EXPIRED_DATE));

        let at = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        let mut dated = HeaderList::new();
        nocache(&mut dated, &Expires::At(at));
        assert_eq!(dated.get("Expires"), Some("Tue, 05 Mar 2024 07:08:09 GMT"));
    }
}
