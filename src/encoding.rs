//! Percent-encoding for URL query and form-body components

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters that are never escaped: ASCII alphanumerics plus the
/// RFC 3986 unreserved marks. Everything else round-trips through a
/// compliant URL decoder.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `value` for inclusion in a URL query or form body.
///
/// ASCII bytes listed in `ignore` pass through unescaped on top of the
/// unreserved set. Non-ASCII characters are always encoded byte-wise as
/// UTF-8. The empty string encodes to the empty string.
///
/// ```rust
/// use courier::encoding::encode;
///
/// assert_eq!(encode("a b", b""), "a%20b");
/// assert_eq!(encode("a+b", b"+"), "a+b");
/// assert_eq!(encode("", b""), "");
/// ```
pub fn encode(value: &str, ignore: &[u8]) -> String {
    match ignore.split_first() {
        None => utf8_percent_encode(value, UNRESERVED).to_string(),
        Some((&first, rest)) => {
            let set: &'static AsciiSet = Box::leak(Box::new(
                rest.iter()
                    .fold(UNRESERVED.remove(first), |set, &byte| set.remove(byte)),
            ));
            utf8_percent_encode(value, set).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() {
        assert_eq!(encode("", b""), "");
    }

    #[test]
    fn test_space_is_escaped() {
        let encoded = encode("a b", b"");
        assert!(!encoded.contains(' '));
        assert_eq!(encoded, "a%20b");
    }

    #[test]
    fn test_unreserved_untouched() {
        assert_eq!(encode("AZaz09-._~", b""), "AZaz09-._~");
    }

    #[test]
    fn test_reserved_escaped() {
        assert_eq!(encode("a=b&c", b""), "a%3Db%26c");
        assert_eq!(encode("a+b", b""), "a%2Bb");
    }

    #[test]
    fn test_ignore_set() {
        assert_eq!(encode("a+b", b"+"), "a+b");
        assert_eq!(encode("a+b-c", b"+-"), "a+b-c");
        // ignored bytes do not leak into other characters
        assert_eq!(encode("a b+c", b"+"), "a%20b+c");
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(encode("é", b""), "%C3%A9");
    }

    #[test]
    fn test_decoder_round_trip() {
        let original = "key with spaces & symbols=100%";
        let encoded = encode(original, b"");
        let decoded = percent_encoding::percent_decode_str(&encoded)
            .decode_utf8()
            .unwrap();
        assert_eq!(decoded, original);
    }
}
