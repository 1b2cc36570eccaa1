use crate::ast::Node;
use crate::error::SerializeError;
use crate::serialize::{Construct, Info, State, Tracker};

pub fn strong(node: &Node, state: &mut State, info: &Info<'_>) -> Result<String, SerializeError> {
    let marker = state.settings.check_strong()?.to_string().repeat(2);
    let mut state = state.enter(Construct::Strong);
    let mut tracker = Tracker::new(info.position);
    let mut value = tracker.advance(&marker).to_string();

    let content = state.container_phrasing(
        node,
        &Info::new(&value, &marker, tracker.current()),
    )?;
    value.push_str(tracker.advance(&content));
    value.push_str(tracker.advance(&marker));
    Ok(value)
}
