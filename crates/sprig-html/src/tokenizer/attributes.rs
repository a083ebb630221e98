//! Tag name and attribute extraction from a tag token.

use sprig_dom::AttributesMap;

/// Tag name and attributes read out of one tag token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagData {
    /// First fragment of the tag, as written. Empty for a degenerate tag
    /// such as `<>`.
    pub name: String,
    /// Attribute name to value; later duplicates overwrite earlier ones.
    pub attributes: AttributesMap,
}

/// Extract the tag name and attributes of a tag token.
///
/// ```
/// use sprig_html::tokenizer::attributes::extract_tag;
///
/// let tag = extract_tag(r#"<a href="/x y" download>"#);
/// assert_eq!(tag.name, "a");
/// assert_eq!(tag.attributes["href"], "/x y");
/// assert_eq!(tag.attributes["download"], "");
/// ```
#[must_use]
pub fn extract_tag(token: &str) -> TagData {
    let mut fragments = split_fragments(strip_markers(token)).into_iter();

    let Some(name) = fragments.next() else {
        return TagData::default();
    };

    let mut attributes = AttributesMap::new();
    for fragment in fragments {
        let (key, value) = parse_attribute(fragment);
        let _ = attributes.insert(key.to_string(), value.to_string());
    }

    TagData {
        name: name.to_string(),
        attributes,
    }
}

/// Remove the leading `</` or `<` and the trailing `/>` or `>`.
#[must_use]
pub fn strip_markers(token: &str) -> &str {
    let inner = token
        .strip_prefix("</")
        .or_else(|| token.strip_prefix('<'))
        .unwrap_or(token);
    inner
        .strip_suffix("/>")
        .or_else(|| inner.strip_suffix('>'))
        .unwrap_or(inner)
}

/// Split tag content on whitespace, keeping quoted spans whole.
///
/// A `"` or `'` opens a span that runs to the next occurrence of the same
/// quote, whitespace included. Quote characters stay in the fragment.
/// Returned fragments are never empty.
#[must_use]
pub fn split_fragments(content: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut start: Option<usize> = None;
    let mut quote: Option<char> = None;

    for (i, c) in content.char_indices() {
        if let Some(open) = quote {
            if c == open {
                quote = None;
            }
            continue;
        }

        if c.is_whitespace() {
            if let Some(s) = start.take() {
                fragments.push(&content[s..i]);
            }
            continue;
        }

        if start.is_none() {
            start = Some(i);
        }
        if c == '"' || c == '\'' {
            quote = Some(c);
        }
    }

    if let Some(s) = start {
        fragments.push(&content[s..]);
    }
    fragments
}

/// Split one fragment on its first `=` into name and unquoted value.
fn parse_attribute(fragment: &str) -> (&str, &str) {
    match fragment.split_once('=') {
        Some((name, value)) => (name, unquote(value)),
        None => (fragment, ""),
    }
}

/// Strip one layer of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|q| value.strip_prefix(q).and_then(|v| v.strip_suffix(q)))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markers_prefers_longest() {
        assert_eq!(strip_markers("</div>"), "div");
        assert_eq!(strip_markers("<br/>"), "br");
        assert_eq!(strip_markers("<img src=x />"), "img src=x ");
        assert_eq!(strip_markers("<p>"), "p");
        assert_eq!(strip_markers("<>"), "");
    }

    #[test]
    fn test_quoted_spans_keep_whitespace() {
        assert_eq!(
            split_fragments(r#"div class="a b  c" id='x y' hidden"#),
            vec!["div", r#"class="a b  c""#, "id='x y'", "hidden"]
        );
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        assert_eq!(split_fragments(r#"a title="x y"#), vec!["a", r#"title="x y"#]);
    }

    #[test]
    fn test_value_split_on_first_equals_only() {
        let tag = extract_tag(r#"<a href="/q?a=1&b=2">"#);
        assert_eq!(tag.attributes["href"], "/q?a=1&b=2");
    }

    #[test]
    fn test_duplicate_attribute_last_wins() {
        let tag = extract_tag(r#"<p id="one" id="two">"#);
        assert_eq!(tag.attributes.len(), 1);
        assert_eq!(tag.attributes["id"], "two");
    }

    #[test]
    fn test_single_quotes_are_stripped() {
        let tag = extract_tag("<p class='x y'>");
        assert_eq!(tag.attributes["class"], "x y");
    }

    #[test]
    fn test_lone_quote_value_is_kept() {
        let tag = extract_tag(r#"<p title=">"#);
        assert_eq!(tag.attributes["title"], "\"");
    }

    #[test]
    fn test_empty_tag_yields_no_name() {
        assert_eq!(extract_tag("<>"), TagData::default());
        assert_eq!(extract_tag("<   >"), TagData::default());
    }

    #[test]
    fn test_doctype_fragments() {
        let tag = extract_tag("<!DOCTYPE html>");
        assert_eq!(tag.name, "!DOCTYPE");
        assert_eq!(tag.attributes["html"], "");
    }
}
