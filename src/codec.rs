//! Safe64 encoding
//!
//! Serializes a value to JSON and wraps it in URL-safe base64, so it can
//! travel in a query string, a path segment or a cookie.

use crate::error::{Error, Result};
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Safe64 options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Safe64Options {
    /// Keep trailing `=` padding
    pub padding: bool,
    /// Serialize to JSON first; when false only strings are accepted and
    /// their bytes are encoded as-is
    pub serialize: bool,
}

impl Default for Safe64Options {
    fn default() -> Self {
        Self {
            padding: false,
            serialize: true,
        }
    }
}

impl Safe64Options {
    fn engine(self) -> &'static base64::engine::GeneralPurpose {
        if self.padding {
            &URL_SAFE
        } else {
            &URL_SAFE_NO_PAD
        }
    }
}

/// Encode `data` as a Safe64 string
///
/// # Examples
/// ```
/// use sitekit::codec::{decode_data, encode_data, Safe64Options};
///
/// let opts = Safe64Options::default();
/// let token = encode_data(&vec![1, 2, 3], &opts).unwrap();
/// let back: Vec<u32> = decode_data(&token, &opts).unwrap();
/// assert_eq!(back, [1, 2, 3]);
/// ```
pub fn encode_data<T: Serialize + ?Sized>(data: &T, opts: &Safe64Options) -> Result<String> {
    let raw = if opts.serialize {
        serde_json::to_vec(data)?
    } else {
        match serde_json::to_value(data)? {
            serde_json::Value::String(s) => s.into_bytes(),
            _ => return Err(Error::RawValueNotString),
        }
    };
    Ok(opts.engine().encode(raw))
}

/// Decode a Safe64 string produced by [`encode_data`]
pub fn decode_data<T: DeserializeOwned>(encoded: &str, opts: &Safe64Options) -> Result<T> {
    let raw = opts.engine().decode(encoded.trim())?;
    if opts.serialize {
        Ok(serde_json::from_slice(&raw)?)
    } else {
        let text = String::from_utf8(raw)?;
        Ok(serde_json::from_value(serde_json::Value::String(text))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Ticket {
        user: String,
        admin: bool,
    }

    #[test]
    fn test_struct_survives() {
        let opts = Safe64Options::default();
        let ticket = Ticket {
            user: "ana".to_string(),
            admin: false,
        };
        let token = encode_data(&ticket, &opts).unwrap();
        assert!(!token.contains(['+', '/', '=']));
        assert_eq!(decode_data::<Ticket>(&token, &opts).unwrap(), ticket);
    }

    #[test]
    fn test_padding_option() {
        let padded = Safe64Options {
            padding: true,
            serialize: true,
        };
        let token = encode_data("ab", &padded).unwrap();
        assert!(token.ends_with('='));
        assert_eq!(decode_data::<String>(&token, &padded).unwrap(), "ab");
    }

    #[test]
    fn test_raw_string_mode() {
        let raw = Safe64Options {
            padding: false,
            serialize: false,
        };
        let token = encode_data("hello?", &raw).unwrap();
        assert_eq!(token, "aGVsbG8_");
        assert_eq!(decode_data::<String>(&token, &raw).unwrap(), "hello?");
    }

    #[test]
    fn test_raw_mode_strings_only() {
        let raw = Safe64Options {
            padding: false,
            serialize: false,
        };
        let err = encode_data(&vec![1, 2], &raw).unwrap_err();
        assert!(matches!(err, Error::RawValueNotString));

        let not_utf8 = URL_SAFE_NO_PAD.encode([0xff, 0xfe, b'a']);
        let err = decode_data::<String>(&not_utf8, &raw).unwrap_err();
        assert!(matches!(err, Error::Utf8(_)));
    }

    #[test]
    fn test_garbage_rejected() {
        let opts = Safe64Options::default();
        assert!(decode_data::<BTreeMap<String, String>>("!!not base64!!", &opts).is_err());
        let not_json = URL_SAFE_NO_PAD.encode("plain");
        assert!(decode_data::<BTreeMap<String, String>>(&not_json, &opts).is_err());
    }
}
