//! Document-safe text encoding for attribute values.
//!
//! Markup characters become entity references and line breaks or tabs become
//! numeric character references, so any string survives a trip through an
//! attribute unchanged. Leading and trailing spaces are encoded as well, which
//! keeps them intact when a reader trims the raw attribute. Encoded text is
//! written to the document as-is.

use quick_xml::escape::{escape, unescape};

const SPACE: &str = "&#32;";

pub fn to_document_safe(text: &str) -> String {
    let escaped = escape(text);
    let body = escaped.trim_matches(' ');
    let leading = escaped.len() - escaped.trim_start_matches(' ').len();
    let trailing = if body.is_empty() {
        0
    } else {
        escaped.len() - escaped.trim_end_matches(' ').len()
    };

    let mut out = String::with_capacity(text.len() + SPACE.len() * (leading + trailing));
    out.push_str(&SPACE.repeat(leading));
    for ch in body.chars() {
        match ch {
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(ch),
        }
    }
    out.push_str(&SPACE.repeat(trailing));
    out
}

/// Returns `None` when `text` contains a malformed or unknown reference.
pub fn from_document_safe(text: &str) -> Option<String> {
    unescape(text).ok().map(|s| s.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(to_document_safe("images/logo.png"), "images/logo.png");
        assert_eq!(from_document_safe("images/logo.png").as_deref(), Some("images/logo.png"));
    }

    #[test]
    fn test_markup_characters() {
        let encoded = to_document_safe(r#"C:\art\"a" & <b>'s.png"#);
        assert_eq!(encoded, r#"C:\art\&quot;a&quot; &amp; &lt;b&gt;&apos;s.png"#);
        assert_eq!(from_document_safe(&encoded).as_deref(), Some(r#"C:\art\"a" & <b>'s.png"#));
    }

    #[test]
    fn test_whitespace_controls() {
        let encoded = to_document_safe("a\nb\tc\r");
        assert_eq!(encoded, "a&#10;b&#9;c&#13;");
        assert_eq!(from_document_safe(&encoded).as_deref(), Some("a\nb\tc\r"));
    }

    #[test]
    fn test_edge_spaces_survive_trimming() {
        let encoded = to_document_safe("  a b ");
        assert_eq!(encoded, "&#32;&#32;a b&#32;");
        assert_eq!(encoded.trim(), encoded);
        assert_eq!(from_document_safe(&encoded).as_deref(), Some("  a b "));

        let blank = to_document_safe("   ");
        assert_eq!(blank, "&#32;&#32;&#32;");
        assert_eq!(from_document_safe(&blank).as_deref(), Some("   "));
    }

    #[test]
    fn test_malformed_reference() {
        assert_eq!(from_document_safe("broken &bogus; ref"), None);
        assert_eq!(from_document_safe("dangling & amp"), None);
    }
}
