//! Query-string parsing

use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use url::Url;

/// Parse a `key=value&key=value` string into a mapping.
///
/// Each pair must split on `=` into exactly two parts; malformed pairs
/// are silently dropped. Later duplicate keys overwrite earlier ones.
/// Percent-escapes are decoded in both keys and values; a literal `+`
/// is left intact.
///
/// ```rust
/// use courier::query;
///
/// let fields = query::parse("x=1&y=a%20b&bad");
/// assert_eq!(fields["x"], "1");
/// assert_eq!(fields["y"], "a b");
/// assert!(!fields.contains_key("bad"));
/// ```
pub fn parse(query: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();

    for pair in query.split('&') {
        let mut parts = pair.split('=');
        if let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) {
            fields.insert(decode(key), decode(value));
        }
    }

    fields
}

/// Parse the query component of a URL.
///
/// The substring after the first `?` is parsed with [`parse`]; a URL
/// without a query yields an empty mapping.
pub fn parse_url(url: &Url) -> HashMap<String, String> {
    match url.query() {
        Some(query) => parse(query),
        None => HashMap::new(),
    }
}

/// Parse a query string held as raw bytes.
///
/// The bytes are decoded as UTF-8 first; undecodable input yields an
/// empty mapping rather than an error.
pub fn parse_bytes(bytes: &[u8]) -> HashMap<String, String> {
    match std::str::from_utf8(bytes) {
        Ok(text) => parse(text),
        Err(_) => HashMap::new(),
    }
}

fn decode(component: &str) -> String {
    percent_decode_str(component).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let fields = parse("x=1&y=2");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["x"], "1");
        assert_eq!(fields["y"], "2");
    }

    #[test]
    fn test_malformed_pairs_dropped() {
        let fields = parse("x=1&bad&y=2&a=b=c");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["x"], "1");
        assert_eq!(fields["y"], "2");
    }

    #[test]
    fn test_last_duplicate_wins() {
        let fields = parse("k=first&k=second");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["k"], "second");
    }

    #[test]
    fn test_percent_decoding() {
        let fields = parse("q=a%20b&note=100%25");
        assert_eq!(fields["q"], "a b");
        assert_eq!(fields["note"], "100%");
    }

    #[test]
    fn test_plus_left_intact() {
        let fields = parse("range=1+2");
        assert_eq!(fields["range"], "1+2");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_url() {
        let url = Url::parse("https://x.com/p?x=1&y=2&bad").unwrap();
        let fields = parse_url(&url);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["x"], "1");
        assert_eq!(fields["y"], "2");
    }

    #[test]
    fn test_parse_url_without_query() {
        let url = Url::parse("https://x.com/p").unwrap();
        assert!(parse_url(&url).is_empty());
    }

    #[test]
    fn test_parse_bytes() {
        let fields = parse_bytes(b"x=1&y=2");
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_parse_bytes_invalid_utf8() {
        assert!(parse_bytes(&[0x78, 0x3d, 0xff, 0xfe]).is_empty());
    }
}
