//! Token classification.
//!
//! Decides, from the shape of a raw token alone, how the tree builder must
//! treat it. Checks run in a fixed order: closing tag, then void or
//! self-closing tag, then opening tag, else text.

use super::token::TokenKind;
use crate::options::VoidElementMatching;

/// Elements that never have content or a closing tag.
///
/// <http://xahlee.info/js/html5_non-closing_tag.html>
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Raw token prefixes for [`VoidElementMatching::LegacyPrefix`]. `<co` stands
/// in for `<col`.
const LEGACY_VOID_PREFIXES: [&str; 14] = [
    "<area", "<base", "<br", "<co", "<embed", "<hr", "<img", "<input", "<link", "<meta", "<param",
    "<source", "<track", "<wbr",
];

/// Classify a raw token.
#[must_use]
pub fn classify(token: &str, matching: VoidElementMatching) -> TokenKind {
    if token.starts_with("</") {
        return TokenKind::Close;
    }

    if token.starts_with('<') && token.ends_with('>') {
        if is_no_closing(token, matching) {
            return TokenKind::NoClosing;
        }
        return TokenKind::Open;
    }

    TokenKind::NoTag
}

/// Returns true for void elements, markup declarations (`<!...>`) and
/// explicitly self-closed tags (`.../>`).
#[must_use]
pub fn is_no_closing(token: &str, matching: VoidElementMatching) -> bool {
    if token.starts_with("<!") || token.ends_with("/>") {
        return true;
    }

    match matching {
        VoidElementMatching::Exact => VOID_ELEMENTS.contains(&raw_tag_name(token)),
        VoidElementMatching::LegacyPrefix => LEGACY_VOID_PREFIXES
            .iter()
            .any(|prefix| token.starts_with(prefix)),
    }
}

/// The tag name as it appears right after `<`: everything up to the first
/// whitespace, `/` or `>`.
fn raw_tag_name(token: &str) -> &str {
    let inner = token.strip_prefix('<').unwrap_or(token);
    let end = inner
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(inner.len());
    &inner[..end]
}
