//! Turning a document tree back into Markdown.
//!
//! [`to_markdown`] resolves the [`Options`] into a fresh [`State`] and hands
//! the tree to the handler registered for its kind. Handlers recurse through
//! [`State::container_flow`] and [`State::container_phrasing`], open
//! [`Construct`]s while they render, and pass every literal through
//! [`State::safe`] so that it reads back as the same text.
//!
//! ## Modules
//!
//! - [`state`]: the per-serialization context and its scope guards
//! - [`handle`]: node handlers, one module per kind
//! - [`container`]: flow and phrasing children
//! - [`join`]: separators between flow siblings
//! - [`safe`]: context-aware escaping
//! - [`track`]: output line/column bookkeeping
//! - [`construct`]: names of the constructs handlers open
//! - [`format`]: choices between equivalent forms
//! - [`text`]: string helpers

pub mod construct;
pub mod container;
pub mod format;
pub mod handle;
pub mod join;
pub mod safe;
pub mod state;
pub mod text;
pub mod track;

pub use construct::Construct;
pub use handle::{Builtin, NodeHandler};
pub use join::{Join, JoinRule};
pub use safe::{SafeConfig, UnsafePattern};
pub use state::{Exit, Info, Isolated, State};
pub use track::{Position, Tracker};

use crate::ast::Node;
use crate::error::SerializeError;
use crate::options::Options;

/// Serializes `tree` to Markdown.
///
/// Non-empty output ends with exactly the line ending the last block
/// produced, or a `\n` when it produced none.
pub fn to_markdown(tree: &Node, options: &Options) -> Result<String, SerializeError> {
    log::debug!("serializing {} tree", tree.kind());
    let mut state = State::new(options)?;

    let mut result = state.handle(tree, None, &Info::new("\n", "\n", Position::default()))?;
    if !result.is_empty() && !result.ends_with(['\n', '\r']) {
        result.push('\n');
    }

    log::debug!("serialized {} bytes", result.len());
    Ok(result)
}

#[cfg(test)]
pub(crate) fn render(tree: &Node) -> String {
    render_with(tree, crate::options::Settings::default())
}

#[cfg(test)]
pub(crate) fn render_with(tree: &Node, settings: crate::options::Settings) -> String {
    match to_markdown(tree, &settings.into()) {
        Ok(value) => value,
        Err(err) => panic!("serialization failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_output_stays_empty() {
        assert_eq!(render(&Node::root(Vec::new())), "");
        assert_eq!(render(&Node::paragraph(vec![Node::text("")])), "");
    }

    #[test]
    fn existing_line_ending_is_kept() {
        assert_eq!(render(&Node::html("<a>\n")), "<a>\n");
        assert_eq!(render(&Node::html("<a>\r")), "<a>\r");
    }

    #[test]
    fn state_is_fresh_per_call() {
        let tree = Node::List(crate::ast::List {
            children: vec![Node::list_item(Vec::new())],
            ..Default::default()
        });
        let options = Options::default();
        let first = to_markdown(&tree, &options).unwrap();
        let second = to_markdown(&tree, &options).unwrap();
        assert_eq!(first, second);
    }
}
