//! Common utilities for the sprig markup parser.
//!
//! This crate provides shared infrastructure used by all sprig components:
//! - **Warning System** - deduplicated, colored terminal output for input the
//!   parser recovered from

pub mod warning;
