//! Parser configuration.
//!
//! There is no configuration file or environment lookup; callers build a
//! [`ParseOptions`] value and hand it to the tree builder.

use strum_macros::{Display, EnumString};

/// What the tree builder does with a closing tag that has no open element
/// left to close (the insertion point is already the document root).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum UnbalancedClosePolicy {
    /// Keep the insertion point at the root, record an issue and continue.
    #[default]
    Clamp,
    /// Stop parsing and report [`crate::ParseError::UnbalancedClose`].
    Reject,
}

/// How tag names are matched against the void element set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum VoidElementMatching {
    /// The tag name must equal a void element name.
    #[default]
    Exact,
    /// The raw token must start with `<` followed by a void element name.
    ///
    /// `col` is matched through the shorter `co` prefix, so any tag starting
    /// with `co` (`code`, `colgroup`, ...) is treated as void.
    LegacyPrefix,
}

/// Options controlling a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Policy for closing tags with no open ancestor.
    pub unbalanced_close: UnbalancedClosePolicy,
    /// Void element recognition mode.
    pub void_elements: VoidElementMatching,
    /// Whether text runs made only of whitespace become text nodes.
    pub keep_whitespace_text: bool,
}

impl ParseOptions {
    /// Default options: clamp unbalanced closes, exact void names, keep all text.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            unbalanced_close: UnbalancedClosePolicy::Clamp,
            void_elements: VoidElementMatching::Exact,
            keep_whitespace_text: true,
        }
    }

    /// Set the unbalanced closing tag policy.
    #[must_use]
    pub const fn with_unbalanced_close(mut self, policy: UnbalancedClosePolicy) -> Self {
        self.unbalanced_close = policy;
        self
    }

    /// Set the void element matching mode.
    #[must_use]
    pub const fn with_void_elements(mut self, matching: VoidElementMatching) -> Self {
        self.void_elements = matching;
        self
    }

    /// Keep or drop whitespace-only text runs.
    #[must_use]
    pub const fn with_whitespace_text(mut self, keep: bool) -> Self {
        self.keep_whitespace_text = keep;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
