//! Escaping helpers for generated markup and inline scripts.

/// Escape text for use in HTML element content or a quoted attribute.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a string as a JS string literal that is safe inside `<script>`.
pub fn js_string(input: &str) -> String {
    serde_json::to_string(input)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

/// `hx-vals` attribute value carrying a single key, already HTML-escaped.
pub fn hx_vals(key: &str, value: &str) -> String {
    let mut map = serde_json::Map::new();
    map.insert(key.to_string(), serde_json::Value::String(value.to_string()));
    escape(&serde_json::Value::Object(map).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn leaves_japanese_untouched() {
        assert_eq!(escape("好きな食べ物は？"), "好きな食べ物は？");
    }

    #[test]
    fn js_string_cannot_close_script() {
        let lit = js_string("</script><script>alert(1)");
        assert!(!lit.contains("</script>"));
        assert!(lit.starts_with('"') && lit.ends_with('"'));
    }

    #[test]
    fn hx_vals_is_escaped_json() {
        assert_eq!(hx_vals("q", "a\"b"), "{&quot;q&quot;:&quot;a\\&quot;b&quot;}");
    }
}
