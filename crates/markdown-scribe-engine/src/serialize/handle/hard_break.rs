use crate::serialize::{Info, State};

/// A hard line break.
///
/// Where a line ending is not allowed (an ATX heading), a space stands in,
/// or nothing when whitespace already precedes it.
pub fn hard_break(state: &State, info: &Info<'_>) -> String {
    let line_ending_unsafe = state
        .unsafe_patterns()
        .iter()
        .any(|compiled| compiled.pattern.character == '\n' && compiled.pattern.in_scope(state.stack()));

    if !line_ending_unsafe {
        "\\\n".to_string()
    } else if info.before.contains([' ', '\t']) {
        String::new()
    } else {
        " ".to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Node;
    use crate::serialize::render;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_the_line_ending() {
        let tree = Node::paragraph(vec![Node::text("a"), Node::Break, Node::text("b")]);
        assert_eq!(render(&tree), "a\\\nb\n");
    }

    #[test]
    fn becomes_a_space_in_atx_headings() {
        let tree = Node::heading(3, vec![Node::text("a"), Node::Break, Node::text("b")]);
        assert_eq!(render(&tree), "### a b\n");
    }

    #[test]
    fn disappears_after_whitespace_in_atx_headings() {
        let tree = Node::heading(3, vec![Node::text("a "), Node::Break, Node::text("b")]);
        assert_eq!(render(&tree), "### a b\n");
    }
}
