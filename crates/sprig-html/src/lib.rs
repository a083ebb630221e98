//! Lightweight markup tokenizer and tree builder for sprig.
//!
//! # Scope
//!
//! This crate implements a three-stage pipeline:
//! - **Tokenizer** - one pass splitting markup into tag spans and text runs
//! - **Classifier / attribute extractor** - decides open, close, void or text
//!   per token and reads tag names and quoted attribute values
//! - **Tree builder** - appends nodes under a single insertion point
//!
//! Text nodes are unescaped against a small fixed table of character
//! references. The resulting [`DomTree`] answers id, class and tag queries.
//!
//! ```
//! let tree = sprig_html::parse(r#"<div id="a"><p class="x y">Hi</p></div>"#);
//! let document = tree.document();
//!
//! let div = document.find_by_id("a").unwrap();
//! assert_eq!(div.tag, "div");
//!
//! let ps = document.find_all_by_class_name("y");
//! assert_eq!(ps.len(), 1);
//! assert_eq!(ps[0].text_content(), "Hi");
//! ```
//!
//! # Not Implemented
//!
//! - HTML5 insertion modes, implied end tags, foster parenting
//! - Full character reference resolution
//! - Nesting validation
//! - Quote-aware tag boundaries (`>` inside an attribute value ends the tag)
//! - Whitespace around `=` in attributes (`class = "a"` does not parse)

/// Errors surfaced by the tree builder.
pub mod error;
/// Parser configuration.
pub mod options;
/// Tree construction.
pub mod parser;
/// Tokenization, classification and attribute extraction.
pub mod tokenizer;

pub use error::ParseError;
pub use options::{ParseOptions, UnbalancedClosePolicy, VoidElementMatching};
pub use parser::{IssueKind, ParseIssue, TreeBuilder};
pub use sprig_dom::{AttributesMap, DomTree, Element, ElementRef, NodeId};
pub use tokenizer::{MarkupTokenizer, Token, TokenKind};

/// Parse markup with default options.
///
/// Total over any input: malformed markup produces a degraded tree, never an
/// error. Empty input yields a lone document root.
#[must_use]
pub fn parse(markup: &str) -> DomTree {
    TreeBuilder::new(tokenizer::tokenize(markup)).run()
}

/// Parse markup with the given options.
///
/// # Errors
///
/// Returns [`ParseError::UnbalancedClose`] if `options` selects
/// [`UnbalancedClosePolicy::Reject`] and a closing tag has no open element.
pub fn parse_with_options(markup: &str, options: ParseOptions) -> Result<DomTree, ParseError> {
    TreeBuilder::new(tokenizer::tokenize(markup))
        .with_options(options)
        .try_run()
        .map(|(tree, _)| tree)
}
