//! Markup tokenizer module.
//!
//! Lexical scanning of raw markup plus the per-token stages that run before
//! tree construction: classification and attribute extraction. Text
//! unescaping lives here too since it only ever applies to text tokens.

/// Tag name and attribute extraction.
pub mod attributes;
/// Token classification into open, close, void and text.
pub mod classifier;
/// Single-pass span scanner.
pub mod core;
/// Character reference table and unescaping.
pub mod named_character_references;
/// Token types produced by the tokenizer.
pub mod token;

pub use attributes::{TagData, extract_tag};
pub use classifier::classify;
pub use self::core::{MarkupTokenizer, tokenize};
pub use named_character_references::unescape;
pub use token::{Token, TokenKind};
