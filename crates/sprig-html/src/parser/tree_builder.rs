use strum_macros::Display;

use sprig_common::warning::warn_once;
use sprig_dom::{DomTree, Element, NodeId};

use crate::error::ParseError;
use crate::options::{ParseOptions, UnbalancedClosePolicy};
use crate::tokenizer::{Token, TokenKind, classify, extract_tag, unescape};

/// Category of a recovered parse problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IssueKind {
    /// A `<` with no closing `>`; the span became a text node.
    MalformedTag,
    /// A closing tag with no open element; the insertion point stayed at the root.
    UnbalancedClose,
    /// A closing tag whose name differs from the element it closed.
    MismatchedClose,
    /// A tag with no name, such as `<>`.
    EmptyTag,
    /// Elements still open when the input ended.
    UnclosedElement,
}

impl IssueKind {
    /// One-line description used as the terminal warning.
    ///
    /// Fixed per kind so the warning log stays bounded no matter how many
    /// documents are parsed; offsets and tag text live in
    /// [`ParseIssue::message`].
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::MalformedTag => "`<` without a closing `>`",
            Self::UnbalancedClose => "closing tag with no open element",
            Self::MismatchedClose => "closing tag name differs from the element it closes",
            Self::EmptyTag => "tag with no name",
            Self::UnclosedElement => "elements still open at end of input",
        }
    }
}

/// A problem the tree builder recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What went wrong.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
    /// Index into the token stream where this issue was encountered.
    pub token_index: usize,
    /// Byte offset in the input.
    pub position: usize,
}

/// Builds the element tree from a token stream.
///
/// The only structural state is the insertion point: the element that
/// receives the next appended node. It starts at the document root and moves
/// down on opening tags and up on closing tags.
///
/// | token       | action                                          |
/// |-------------|-------------------------------------------------|
/// | `Open`      | append element, insertion point moves into it   |
/// | `Close`     | insertion point moves to its parent             |
/// | `NoClosing` | append element, insertion point unchanged       |
/// | `NoTag`     | append unescaped text, insertion point unchanged |
pub struct TreeBuilder {
    /// Element tree under construction. `NodeId::ROOT` is the document.
    tree: DomTree,

    /// Where the next node is appended.
    insertion_point: NodeId,

    /// Input tokens from the tokenizer.
    tokens: Vec<Token>,

    /// Current position in token stream.
    token_index: usize,

    options: ParseOptions,

    /// Problems recovered from so far.
    issues: Vec<ParseIssue>,
}

impl TreeBuilder {
    /// Create a tree builder from a token stream, with default options.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tree: DomTree::new(),
            insertion_point: NodeId::ROOT,
            tokens,
            token_index: 0,
            options: ParseOptions::new(),
            issues: Vec::new(),
        }
    }

    /// Replace the parse options.
    #[must_use]
    pub const fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Get all parse issues encountered so far.
    #[must_use]
    pub fn get_issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// The element that will receive the next appended node.
    #[must_use]
    pub const fn insertion_point(&self) -> NodeId {
        self.insertion_point
    }

    /// The tree as built so far.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Process the next token and return how it was classified, or `None`
    /// once the stream is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnbalancedClose`] under
    /// [`UnbalancedClosePolicy::Reject`]. The offending token is consumed.
    pub fn step(&mut self) -> Option<Result<TokenKind, ParseError>> {
        let token = self.tokens.get(self.token_index)?.clone();
        let result = self.process_token(&token);
        self.token_index += 1;
        Some(result)
    }

    /// Run the builder and return the tree.
    ///
    /// Never fails. Under [`UnbalancedClosePolicy::Reject`] the tree built up
    /// to the offending closing tag is returned; use [`Self::try_run`] to see
    /// the error.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Run the builder and return both the tree and any parse issues.
    ///
    /// An error under [`UnbalancedClosePolicy::Reject`] stops the run and is
    /// returned as the last issue.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        while let Some(result) = self.step() {
            if let Err(err) = result {
                self.record_error(&err);
                break;
            }
        }
        self.finish()
    }

    /// Run the builder, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnbalancedClose`] when a closing tag has no
    /// open element and the policy is [`UnbalancedClosePolicy::Reject`].
    pub fn try_run(mut self) -> Result<(DomTree, Vec<ParseIssue>), ParseError> {
        while let Some(result) = self.step() {
            let _ = result?;
        }
        Ok(self.finish())
    }

    fn process_token(&mut self, token: &Token) -> Result<TokenKind, ParseError> {
        let kind = classify(&token.data, self.options.void_elements);
        match kind {
            TokenKind::Open => {
                self.insertion_point = self.insert_element(token);
            }
            TokenKind::NoClosing => {
                let _ = self.insert_element(token);
            }
            TokenKind::Close => self.close_element(token)?,
            TokenKind::NoTag => self.insert_text(token),
        }
        Ok(kind)
    }

    fn insert_element(&mut self, token: &Token) -> NodeId {
        let tag = extract_tag(&token.data);
        if tag.name.is_empty() {
            self.parse_warning(
                IssueKind::EmptyTag,
                format!("tag `{}` has no name", token.data),
                token,
            );
        }
        self.tree
            .append_child(self.insertion_point, Element::new(tag.name, tag.attributes))
    }

    fn close_element(&mut self, token: &Token) -> Result<(), ParseError> {
        if token.is_unterminated_tag() {
            self.parse_warning(
                IssueKind::MalformedTag,
                format!("closing tag at byte {} is never closed", token.position),
                token,
            );
        }

        let Some(parent) = self.tree.parent(self.insertion_point) else {
            return match self.options.unbalanced_close {
                UnbalancedClosePolicy::Clamp => {
                    self.parse_warning(
                        IssueKind::UnbalancedClose,
                        format!("closing tag `{}` has no open element", token.data),
                        token,
                    );
                    Ok(())
                }
                UnbalancedClosePolicy::Reject => Err(ParseError::UnbalancedClose {
                    tag: token.data.clone(),
                    position: token.position,
                    token_index: self.token_index,
                }),
            };
        };

        let closing = extract_tag(&token.data).name;
        let open = self
            .tree
            .get(self.insertion_point)
            .map(|el| el.tag.as_str())
            .unwrap_or_default();
        if closing != open {
            let message = format!("closing tag `{}` closes <{open}>", token.data);
            self.parse_warning(IssueKind::MismatchedClose, message, token);
        }

        self.insertion_point = parent;
        Ok(())
    }

    fn insert_text(&mut self, token: &Token) {
        if token.is_unterminated_tag() {
            self.parse_warning(
                IssueKind::MalformedTag,
                format!("`<` at byte {} is never closed", token.position),
                token,
            );
        }

        if !self.options.keep_whitespace_text && token.data.trim().is_empty() {
            return;
        }

        let text = Element::text(unescape(&token.data));
        let _ = self.tree.append_child(self.insertion_point, text);
    }

    fn finish(mut self) -> (DomTree, Vec<ParseIssue>) {
        let open = self.tree.ancestors(self.insertion_point).count();
        if open > 0 {
            warn_once("Tree Builder", IssueKind::UnclosedElement.summary());
            self.issues.push(ParseIssue {
                kind: IssueKind::UnclosedElement,
                message: format!("{open} element(s) still open at end of input"),
                token_index: self.token_index,
                position: self.tokens.last().map_or(0, |t| t.position),
            });
        }
        (self.tree, self.issues)
    }

    /// Keep a fatal error in the issue list when the caller asked for a tree
    /// regardless.
    fn record_error(&mut self, err: &ParseError) {
        let ParseError::UnbalancedClose {
            position,
            token_index,
            ..
        } = err;
        self.issues.push(ParseIssue {
            kind: IssueKind::UnbalancedClose,
            message: err.to_string(),
            token_index: *token_index,
            position: *position,
        });
    }

    /// Record a recovered problem.
    ///
    /// Logs the kind's summary via sprig-common's warning system and stores
    /// the detailed issue for later retrieval.
    fn parse_warning(&mut self, kind: IssueKind, message: String, token: &Token) {
        warn_once("Tree Builder", kind.summary());
        self.issues.push(ParseIssue {
            kind,
            message,
            token_index: self.token_index,
            position: token.position,
        });
    }
}
