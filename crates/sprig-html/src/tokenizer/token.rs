use strum_macros::Display;

/// A raw lexical span of the input.
///
/// The tokenizer only finds boundaries; whether a token is an opening tag,
/// a closing tag, a void tag or text is decided later by
/// [`crate::tokenizer::classifier::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The exact source text of the span, markers included.
    pub data: String,
    /// Byte offset of the span's first character in the input.
    pub position: usize,
}

impl Token {
    /// Create a token from its text and starting byte offset.
    #[must_use]
    pub fn new(data: impl Into<String>, position: usize) -> Self {
        Self {
            data: data.into(),
            position,
        }
    }

    /// Returns true if the span starts like a tag but was never closed
    /// with `>`.
    #[must_use]
    pub fn is_unterminated_tag(&self) -> bool {
        self.data.starts_with('<') && !self.data.ends_with('>')
    }
}

/// How the tree builder treats a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenKind {
    /// `<tag ...>`: appended, then becomes the insertion point.
    Open,
    /// `</tag>`: moves the insertion point to its parent.
    Close,
    /// Void elements, `<!...>` declarations and `.../>`: appended without
    /// descending.
    NoClosing,
    /// Plain text.
    NoTag,
}
