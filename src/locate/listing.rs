//! Anchor extraction from directory-index HTML.
//!
//! Build servers expose their tree as a generated index page; the only part
//! of it discovery cares about is the `href` of each anchor tag. [`hrefs`]
//! scans the document once and yields raw href values in document order —
//! filtering and deduplication belong to the caller.
//!
//! The scan is a regex over anchor tags rather than a full HTML parse:
//! malformed markup cannot fail, it simply does not match.

use std::sync::LazyLock;

use regex::Regex;

static ANCHOR_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
        .expect("valid regex")
});

/// Yield the `href` value of every anchor tag in `html`, in document order.
///
/// Quoted (single or double) and bare attribute values are supported; every
/// other tag and attribute is ignored.
pub fn hrefs(html: &str) -> impl Iterator<Item = &str> {
    ANCHOR_HREF.captures_iter(html).filter_map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_hrefs_in_document_order() {
        let html = r#"
            <html><body><pre>
            <a href="../">Parent</a>
            <a href="0.9.0.1/">0.9.0.1/</a>
            <a class="odd" href="1.2.3.4567/">1.2.3.4567/</a>
            </pre></body></html>
        "#;
        let found: Vec<_> = hrefs(html).collect();
        assert_eq!(found, ["../", "0.9.0.1/", "1.2.3.4567/"]);
    }

    #[test]
    fn supports_single_quoted_and_bare_values() {
        let html = "<A HREF='a/'>x</A> <a href=b/>y</a>";
        let found: Vec<_> = hrefs(html).collect();
        assert_eq!(found, ["a/", "b/"]);
    }

    #[test]
    fn ignores_non_anchor_markup() {
        let html = r#"<link href="style.css"><img src="x.png"><a href="keep/">k</a>"#;
        let found: Vec<_> = hrefs(html).collect();
        assert_eq!(found, ["keep/"]);
    }

    #[test]
    fn malformed_html_yields_nothing_instead_of_failing() {
        assert_eq!(hrefs("<a href=").count(), 0);
        assert_eq!(hrefs("<<<>>> not html at all").count(), 0);
        assert_eq!(hrefs("").count(), 0);
    }
}
