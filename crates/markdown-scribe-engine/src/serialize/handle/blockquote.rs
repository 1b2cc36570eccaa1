use crate::ast::Node;
use crate::error::SerializeError;
use crate::serialize::text::indent_lines;
use crate::serialize::{Construct, Info, State, Tracker};

/// Marks every line of a block quote.
pub const PREFIX: &str = "> ";

pub fn blockquote(node: &Node, state: &mut State, info: &Info<'_>) -> Result<String, SerializeError> {
    let mut state = state.enter(Construct::Blockquote);
    let mut tracker = Tracker::new(info.position);
    tracker.advance(PREFIX);
    tracker.shift(PREFIX.len());

    let value = state.container_flow(node, tracker.current())?;
    Ok(indent_lines(&value, |line, _, blank| {
        if blank {
            format!(">{line}")
        } else {
            format!("{PREFIX}{line}")
        }
    }))
}

#[cfg(test)]
mod tests {
    use crate::ast::Node;
    use crate::serialize::render;
    use pretty_assertions::assert_eq;

    #[test]
    fn prefixes_every_line() {
        let tree = Node::blockquote(vec![Node::paragraph(vec![Node::text("a\nb")])]);
        assert_eq!(render(&tree), "> a\n> b\n");
    }

    #[test]
    fn blank_lines_get_a_bare_marker() {
        let tree = Node::blockquote(vec![
            Node::paragraph(vec![Node::text("a")]),
            Node::paragraph(vec![Node::text("b")]),
        ]);
        assert_eq!(render(&tree), "> a\n>\n> b\n");
    }

    #[test]
    fn nests() {
        let tree = Node::blockquote(vec![Node::blockquote(vec![Node::paragraph(vec![
            Node::text("a"),
        ])])]);
        assert_eq!(render(&tree), "> > a\n");
    }

    #[test]
    fn empty_quote_is_a_marker() {
        assert_eq!(render(&Node::blockquote(Vec::new())), ">\n");
    }
}
