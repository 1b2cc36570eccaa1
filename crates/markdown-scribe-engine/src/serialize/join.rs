//! Separators between adjacent flow nodes.

use std::rc::Rc;

use crate::ast::Node;
use crate::serialize::State;
use crate::serialize::format::{format_code_as_indented, format_heading_as_setext};

/// How two adjacent flow nodes are separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// `n` blank lines, so `n + 1` line endings.
    BlankLines(usize),
    /// The nodes would merge when adjacent; an empty comment goes between.
    Interrupt,
}

impl Join {
    pub const INTERRUPT: &'static str = "\n\n<!---->\n\n";

    pub fn separator(self) -> String {
        match self {
            Join::BlankLines(count) => "\n".repeat(count + 1),
            Join::Interrupt => Self::INTERRUPT.to_string(),
        }
    }
}

impl From<bool> for Join {
    /// `true` allows the default blank line, `false` forbids adjacency.
    fn from(allowed: bool) -> Self {
        if allowed {
            Join::BlankLines(1)
        } else {
            Join::Interrupt
        }
    }
}

/// Decides the separator between `left` and `right` inside `parent`, or
/// defers to rules registered before it by returning `None`.
pub type JoinRule = Rc<dyn Fn(&Node, &Node, &Node, &State) -> Option<Join>>;

pub fn default_join_rules() -> Vec<JoinRule> {
    let defaults: JoinRule = Rc::new(join_defaults);
    vec![defaults]
}

/// The separators every serialization needs to stay unambiguous.
pub fn join_defaults(left: &Node, right: &Node, parent: &Node, state: &State) -> Option<Join> {
    // Indented code would continue a list item or the code before it.
    if let Node::Code(code) = right {
        let left_continues = match left {
            Node::List(_) => true,
            Node::Code(left) => format_code_as_indented(left, state),
            _ => false,
        };
        if left_continues && format_code_as_indented(code, state) {
            return Some(Join::Interrupt);
        }
    }

    // Lists with the same marker would merge.
    if let (Node::List(left), Node::List(right)) = (left, right) {
        let other_set = if left.ordered {
            state.settings.bullet_ordered_other.is_some()
        } else {
            state.settings.bullet_other.is_some()
        };
        if left.ordered == right.ordered && !other_set {
            return Some(Join::Interrupt);
        }
    }

    let spread = parent.spread()?;
    let keeps_blank_line = matches!(left, Node::Paragraph(_))
        && match right {
            Node::Paragraph(_) | Node::Definition(_) => true,
            Node::Heading(_) => format_heading_as_setext(right, state),
            _ => false,
        };
    if keeps_blank_line {
        return None;
    }
    Some(Join::BlankLines(usize::from(spread)))
}

/// Consecutive definitions without blank lines between them.
pub fn join_definitions(left: &Node, right: &Node, _parent: &Node, _state: &State) -> Option<Join> {
    matches!((left, right), (Node::Definition(_), Node::Definition(_))).then_some(Join::BlankLines(0))
}

impl State {
    /// The separator between two siblings, asking the most recently
    /// registered join rule first.
    pub fn between(&self, left: &Node, right: &Node, parent: &Node) -> String {
        let join = self
            .join_rules()
            .iter()
            .rev()
            .find_map(|rule| rule(left, right, parent, self))
            .unwrap_or(Join::BlankLines(1));

        if join == Join::Interrupt {
            log::debug!(
                "separating {} and {} with an empty comment",
                left.kind(),
                right.kind()
            );
        }
        join.separator()
    }
}
