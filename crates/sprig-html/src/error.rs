//! Errors surfaced by the tree builder.
//!
//! Almost every malformed input is absorbed into a degraded tree and reported
//! as a [`crate::ParseIssue`]. Only the policies selected in
//! [`crate::ParseOptions`] turn a situation into an error.

/// A parse failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A closing tag appeared while the insertion point was the document
    /// root, under [`crate::UnbalancedClosePolicy::Reject`].
    #[error("closing tag `{tag}` at byte {position} has no open element to close")]
    UnbalancedClose {
        /// Raw text of the closing tag token.
        tag: String,
        /// Byte offset of the token in the input.
        position: usize,
        /// Index of the token in the token stream.
        token_index: usize,
    },
}
