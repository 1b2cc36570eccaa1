use crate::ast::Node;
use crate::error::SerializeError;
use crate::serialize::text::has_phrasing_child;
use crate::serialize::{Info, State};

pub fn root(node: &Node, state: &mut State, info: &Info<'_>) -> Result<String, SerializeError> {
    if has_phrasing_child(node) {
        state.container_phrasing(node, info)
    } else {
        state.container_flow(node, info.position)
    }
}
