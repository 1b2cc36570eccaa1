//! Serializing the children of a node, as blocks or as inline content.

use crate::ast::Node;
use crate::error::SerializeError;
use crate::serialize::{Info, Position, State, Tracker};

impl State {
    /// Serializes the children of `parent` as blocks, separated by what the
    /// join rules decide.
    pub fn container_flow(
        &mut self,
        parent: &Node,
        position: Position,
    ) -> Result<String, SerializeError> {
        let children = parent.children();
        let mut tracker = Tracker::new(position);
        let mut result = String::new();

        self.index_stack.push(0);
        for (index, child) in children.iter().enumerate() {
            if let Some(current) = self.index_stack.last_mut() {
                *current = index;
            }

            let info = Info::new("\n", "\n", tracker.current());
            let value = self.handle(child, Some(parent), &info)?;
            result.push_str(tracker.advance(&value));

            if !matches!(child, Node::List(_)) {
                self.bullet_last_used = None;
            }

            if let Some(next) = children.get(index + 1) {
                let separator = self.between(child, next, parent);
                result.push_str(tracker.advance(&separator));
            }
        }
        self.index_stack.pop();

        Ok(result)
    }

    /// Serializes the children of `parent` as inline content.
    ///
    /// Each child is escaped against the last character the previous child
    /// produced and the first one the next child will produce.
    pub fn container_phrasing(
        &mut self,
        parent: &Node,
        info: &Info<'_>,
    ) -> Result<String, SerializeError> {
        let children = parent.children();
        let mut tracker = Tracker::new(info.position);
        let mut results: Vec<String> = Vec::with_capacity(children.len());
        let mut before = info.before.to_string();

        self.index_stack.push(0);
        for (index, child) in children.iter().enumerate() {
            if let Some(current) = self.index_stack.last_mut() {
                *current = index;
            }

            let after = match children.get(index + 1) {
                Some(next) => {
                    let peek_info = Info::new("", "", tracker.current());
                    self.peek(next, Some(parent), &peek_info)?
                        .map(String::from)
                        .unwrap_or_default()
                }
                None => info.after.to_string(),
            };

            // A line ending before html would let it start a block.
            if matches!(child, Node::Html(_))
                && matches!(before.as_str(), "\n" | "\r")
                && let Some(last) = results.last_mut()
            {
                trim_line_ending(last);
                last.push(' ');
                before = " ".to_string();

                tracker = Tracker::new(info.position);
                for result in &results {
                    tracker.advance(result);
                }
            }

            let child_info = Info::new(&before, &after, tracker.current());
            let value = self.handle(child, Some(parent), &child_info)?;
            tracker.advance(&value);
            before = value.chars().last().map(String::from).unwrap_or_default();
            results.push(value);
        }
        self.index_stack.pop();

        Ok(results.concat())
    }
}

fn trim_line_ending(value: &mut String) {
    if value.ends_with("\r\n") {
        value.truncate(value.len() - 2);
    } else if value.ends_with(['\n', '\r']) {
        value.truncate(value.len() - 1);
    }
}
