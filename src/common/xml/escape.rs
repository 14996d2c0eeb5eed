use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Built once, shared by every writer
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "\n", "\r", "\t"])
        .expect("Failed to build XML escaper")
});

/// Escape a string for use inside a double-quoted XML attribute or text node.
///
/// Line breaks and tabs become character references so that attribute
/// normalization does not fold them into spaces.
///
/// # Examples
///
/// ```
/// use pro6doc::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// assert_eq!(escape_xml("one\ntwo"), "one&#10;two");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(
        s,
        &["&amp;", "&lt;", "&gt;", "&quot;", "&#10;", "&#13;", "&#9;"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_xml("Amazing Grace"), "Amazing Grace");
        assert_eq!(escape_xml("你好"), "你好");
    }

    #[test]
    fn test_apostrophe_kept_tab_escaped() {
        assert_eq!(escape_xml("It's\tok"), "It's&#9;ok");
    }
}
