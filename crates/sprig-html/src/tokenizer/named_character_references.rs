//! Character reference table and text unescaping.
//!
//! Only a fixed, small set of references is recognised; anything else is
//! left in the text untouched.

use std::borrow::Cow;

/// Recognised references, written exactly as they must appear in the text
/// (leading `&` and trailing `;` included), and their replacements.
static CHARACTER_REFERENCES: [(&str, &str); 8] = [
    ("&#39;", "'"),
    ("&#x27;", "'"),
    ("&apos;", "'"),
    ("&quot;", "\""),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&nbsp;", "\u{00A0}"),
    ("&amp;", "&"),
];

/// Longest entry in [`CHARACTER_REFERENCES`], in bytes.
const LONGEST_REFERENCE: usize = 6;

/// Look up a character reference.
///
/// The `reference` must include the leading `&` and trailing `;`.
///
/// # Example
/// ```
/// use sprig_html::tokenizer::named_character_references::lookup_entity;
///
/// assert_eq!(lookup_entity("&amp;"), Some("&"));
/// assert_eq!(lookup_entity("&copy;"), None);
/// assert_eq!(lookup_entity("amp;"), None);
/// ```
#[must_use]
pub fn lookup_entity(reference: &str) -> Option<&'static str> {
    CHARACTER_REFERENCES
        .iter()
        .find(|(name, _)| *name == reference)
        .map(|(_, replacement)| *replacement)
}

/// Replace every recognised reference in `text` with its character.
///
/// The scan runs once, left to right, and never looks at text it has already
/// produced: `&amp;quot;` becomes `&quot;`, not `"`. Text without any `&` is
/// returned borrowed.
#[must_use]
pub fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let candidate = tail
            .bytes()
            .take(LONGEST_REFERENCE)
            .position(|b| b == b';')
            .map(|semi| &tail[..=semi]);

        if let Some((reference, replacement)) =
            candidate.and_then(|r| lookup_entity(r).map(|rep| (r, rep)))
        {
            out.push_str(replacement);
            rest = &tail[reference.len()..];
        } else {
            out.push('&');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}
