//! Markdown tree serialization.
//!
//! The crate turns an mdast-shaped [`Node`] tree into Markdown text that
//! parses back to the same tree: literal text is escaped only where it would
//! otherwise read as markup, adjacent blocks are separated so they cannot
//! merge, and list markers are chosen so nested or neighbouring lists stay
//! apart.
//!
//! ## Modules
//!
//! - [`ast`]: the document tree
//! - [`options`]: stylistic settings and extension points
//! - [`serialize`]: the serializer itself
//! - [`parse`]: building a tree from Markdown with pulldown-cmark
//! - [`error`]: error types

pub mod ast;
pub mod error;
pub mod options;
pub mod parse;
pub mod serialize;

pub use ast::Node;
pub use error::{OptionsError, SerializeError};
pub use options::{ListItemIndent, Options, Settings};
pub use parse::from_markdown;
pub use serialize::to_markdown;
