use crate::ast::{ListItem, Node};
use crate::error::SerializeError;
use crate::options::ListItemIndent;
use crate::serialize::text::indent_lines;
use crate::serialize::{Construct, Info, State, Tracker};

/// Columns between tab stops, which `tab` indents round up to.
pub const TAB_SIZE: usize = 4;

pub fn list_item(
    node: &Node,
    item: &ListItem,
    parent: Option<&Node>,
    state: &mut State,
    info: &Info<'_>,
) -> Result<String, SerializeError> {
    let bullet = match state.bullet_current {
        Some(bullet) => bullet,
        None => state.settings.check_bullet()?,
    };

    let (marker, widest) = match parent {
        Some(Node::List(list)) if list.ordered => {
            let start = u64::from(list.start.unwrap_or(1));
            let increment = state.settings.increment_list_marker();
            let number = |index: usize| {
                if increment {
                    start + index as u64
                } else {
                    start
                }
            };
            let index = state.index_stack().last().copied().unwrap_or(0);
            let last = list.children.len().saturating_sub(1);

            let marker = format!("{}{bullet}", number(index));
            let widest = format!("{}{bullet}", number(last)).len().max(marker.len());
            (marker, widest)
        }
        _ => (bullet.to_string(), 1),
    };

    let spread = item.spread || matches!(parent, Some(Node::List(list)) if list.spread);
    let mut size = widest + 1;
    match state.settings.list_item_indent() {
        ListItemIndent::Tab => size = size.div_ceil(TAB_SIZE) * TAB_SIZE,
        ListItemIndent::Mixed if spread => size = size.div_ceil(TAB_SIZE) * TAB_SIZE,
        ListItemIndent::One | ListItemIndent::Mixed => {}
    }

    let first_line = format!("{marker}{}", " ".repeat(size - marker.len()));
    let mut tracker = Tracker::new(info.position);
    tracker.advance(&first_line);
    tracker.shift(size);

    let mut state = state.enter(Construct::ListItem);
    let value = state.container_flow(node, tracker.current())?;

    Ok(indent_lines(&value, |line, index, blank| match (index, blank) {
        (0, true) => marker.clone(),
        (0, false) => format!("{first_line}{line}"),
        (_, true) => String::new(),
        (_, false) => format!("{}{line}", " ".repeat(size)),
    }))
}
