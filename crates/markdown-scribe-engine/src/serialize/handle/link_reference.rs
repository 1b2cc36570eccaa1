use crate::ast::{LinkReference, Node, ReferenceType};
use crate::error::SerializeError;
use crate::serialize::text::association;
use crate::serialize::{Construct, Info, SafeConfig, State, Tracker};

pub const PEEK: char = '[';

pub fn link_reference(
    node: &Node,
    reference: &LinkReference,
    state: &mut State,
    info: &Info<'_>,
) -> Result<String, SerializeError> {
    let mut state = state.enter(Construct::LinkReference);
    let mut tracker = Tracker::new(info.position);
    let mut value = tracker.advance("[").to_string();

    let text = {
        let mut state = state.enter(Construct::Label);
        state.container_phrasing(node, &Info::new(&value, "]", tracker.current()))?
    };
    value.push_str(tracker.advance(&text));
    value.push_str(tracker.advance("]["));

    let label = association(reference.label.as_deref(), &reference.identifier);
    close_reference(
        &mut state,
        &mut tracker,
        &mut value,
        &text,
        &label,
        reference.reference_type,
    );
    Ok(value)
}

/// Finishes `[text][` with the reference label, or with the collapsed or
/// shortcut form when the text already names the definition.
pub(crate) fn close_reference(
    state: &mut State,
    tracker: &mut Tracker,
    value: &mut String,
    text: &str,
    label: &str,
    reference_type: ReferenceType,
) {
    let reference = {
        let mut state = state.isolate();
        let state = state.enter(Construct::Reference);
        state.safe(label, SafeConfig::new(value, "]"))
    };

    if reference_type == ReferenceType::Full || text.is_empty() || text != reference {
        value.push_str(tracker.advance(&reference));
        value.push_str(tracker.advance("]"));
    } else if reference_type == ReferenceType::Shortcut {
        value.pop();
    } else {
        value.push_str(tracker.advance("]"));
    }
}
