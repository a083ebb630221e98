//! Tree construction from the token stream.

/// Insertion-point state machine that appends nodes to the tree.
pub mod tree_builder;

pub use tree_builder::{IssueKind, ParseIssue, TreeBuilder};
