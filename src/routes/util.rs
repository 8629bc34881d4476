//! Shared URL/form parsing utilities for route handlers.

/// Parse URL-encoded form body into key-value pairs.
/// Handles `key=value&key2=value2` format (from HTMX POST bodies).
pub fn parse_form_body(body: &str) -> Vec<(String, String)> {
    if body.is_empty() {
        return Vec::new();
    }
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let val = parts.next().unwrap_or("");
            Some((percent_decode(key), percent_decode(val)))
        })
        .collect()
}

/// Percent-decode a URL-encoded value. Escapes are decoded as raw bytes and
/// reassembled as UTF-8, so multi-byte text (`%E5%A5%BD`) survives.
pub fn percent_decode(input: &str) -> String {
    let mut out: Vec<u8> = Vec::with_capacity(input.len());
    let mut bytes = input.bytes();
    while let Some(b) = bytes.next() {
        match b {
            b'%' => {
                let hi = bytes.next();
                let lo = bytes.next();
                match (hi.and_then(hex_val), lo.and_then(hex_val)) {
                    (Some(h), Some(l)) => out.push(h << 4 | l),
                    _ => {
                        out.push(b'%');
                        out.extend(hi);
                        out.extend(lo);
                    }
                }
            }
            b'+' => out.push(b' '),
            _ => out.push(b),
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Parse a query string into key-value pairs.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let q = query.strip_prefix('?').unwrap_or(query);
    parse_form_body(q)
}

/// Helper to get a value by key from a list of key-value pairs.
pub fn get_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// JSON payload of a POST: the raw body when it already looks like JSON,
/// otherwise the form field `key`.
pub fn json_payload(body: &str, key: &str) -> String {
    let trimmed = body.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed.to_string();
    }
    let params = parse_form_body(body);
    get_param(&params, key).unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_form_body_works() {
        let pairs = parse_form_body("q=Q1&answer=hello&source=curated");
        assert_eq!(pairs.len(), 3);
        assert_eq!(get_param(&pairs, "q"), Some("Q1"));
        assert_eq!(get_param(&pairs, "source"), Some("curated"));
    }

    #[test]
    fn parse_form_body_empty() {
        let pairs = parse_form_body("");
        assert!(pairs.is_empty());
    }

    #[test]
    fn percent_decode_plus_as_space() {
        assert_eq!(percent_decode("hello+world"), "hello world");
    }

    #[test]
    fn percent_decode_hex() {
        assert_eq!(percent_decode("hello%20world"), "hello world");
        assert_eq!(percent_decode("a%2Bb%3D"), "a+b=");
    }

    #[test]
    fn percent_decode_utf8() {
        // "好き"
        assert_eq!(percent_decode("%E5%A5%BD%E3%81%8D"), "好き");
        assert_eq!(percent_decode("line1%0Aline2"), "line1\nline2");
    }

    #[test]
    fn percent_decode_keeps_malformed_escape() {
        assert_eq!(percent_decode("100%zz"), "100%zz");
        assert_eq!(percent_decode("50%"), "50%");
    }

    #[test]
    fn parse_query_strips_prefix() {
        let pairs = parse_query("?foo=bar");
        assert_eq!(get_param(&pairs, "foo"), Some("bar"));
    }

    #[test]
    fn json_payload_prefers_raw_json() {
        assert_eq!(json_payload(r#" {"a":1} "#, "config"), r#"{"a":1}"#);
        assert_eq!(json_payload("config=%7B%7D", "config"), "{}");
        assert_eq!(json_payload("other=1", "config"), "");
    }
}
