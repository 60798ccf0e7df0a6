use std::borrow::Cow;

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;

const PREDEFINED: [&str; 5] = ["&", "<", ">", "\"", "'"];

// Use LeftmostLongest so `&amp;` wins over the bare `&#` prefix pattern
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;", "&#"])
        .expect("Failed to build XML unescaper")
});

/// Unescape XML entity and character references in a single pass.
///
/// The five predefined entities and decimal/hex character references are
/// replaced. Unknown or malformed references are left unchanged, and a
/// replacement is never re-scanned.
///
/// # Examples
///
/// ```
/// use wordml_dom::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&#65;&#x42;"), "AB");
/// assert_eq!(unescape_xml("&amp;#65;"), "&#65;");
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// ```
pub fn unescape_xml(s: &str) -> Cow<'_, str> {
    if memchr::memchr(b'&', s.as_bytes()).is_none() {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut cursor = 0;
    for m in XML_UNESCAPER.find_iter(s) {
        if m.start() < cursor {
            continue;
        }
        out.push_str(&s[cursor..m.start()]);
        let pattern = m.pattern().as_usize();
        if pattern < PREDEFINED.len() {
            out.push_str(PREDEFINED[pattern]);
            cursor = m.end();
            continue;
        }
        // Character reference: `&#` followed by digits and `;`
        let rest = &s[m.end()..];
        match memchr::memchr(b';', rest.as_bytes())
            .and_then(|semi| decode_char_ref(&rest[..semi]).map(|c| (c, semi)))
        {
            Some((c, semi)) => {
                out.push(c);
                cursor = m.end() + semi + 1;
            },
            None => {
                out.push_str("&#");
                cursor = m.end();
            },
        }
    }
    out.push_str(&s[cursor..]);
    Cow::Owned(out)
}

/// Resolve the body of a general reference (the text between `&` and `;`).
///
/// Returns `None` for entities that are neither predefined nor numeric.
///
/// # Examples
///
/// ```
/// use wordml_dom::common::xml::resolve_reference;
/// assert_eq!(resolve_reference("amp"), Some('&'));
/// assert_eq!(resolve_reference("#x20AC"), Some('€'));
/// assert_eq!(resolve_reference("nbsp"), None);
/// ```
pub fn resolve_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => name.strip_prefix('#').and_then(decode_char_ref),
    }
}

fn decode_char_ref(body: &str) -> Option<char> {
    let code = match body.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => body.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_borrows_plain_text() {
        assert!(matches!(unescape_xml("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unescape_mixed_references() {
        assert_eq!(unescape_xml("a &lt; b &#38;&#38; c"), "a < b && c");
        assert_eq!(unescape_xml("&quot;x&apos;"), "\"x'");
    }

    #[test]
    fn test_unescape_malformed_char_refs() {
        assert_eq!(unescape_xml("&#zz;"), "&#zz;");
        assert_eq!(unescape_xml("&#65"), "&#65");
        assert_eq!(unescape_xml("&#xD800;"), "&#xD800;");
    }

    #[test]
    fn test_resolve_reference_numeric() {
        assert_eq!(resolve_reference("#65"), Some('A'));
        assert_eq!(resolve_reference("#X41"), Some('A'));
        assert_eq!(resolve_reference("#"), None);
    }
}
