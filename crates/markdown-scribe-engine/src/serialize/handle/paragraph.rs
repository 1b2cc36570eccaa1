use crate::ast::Node;
use crate::error::SerializeError;
use crate::serialize::{Construct, Info, State};

pub fn paragraph(node: &Node, state: &mut State, info: &Info<'_>) -> Result<String, SerializeError> {
    let mut state = state.enter(Construct::Paragraph);
    let mut state = state.enter(Construct::Phrasing);
    state.container_phrasing(node, info)
}
