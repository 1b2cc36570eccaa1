use crate::ast::ImageReference;
use crate::error::SerializeError;
use crate::serialize::handle::link_reference::close_reference;
use crate::serialize::text::association;
use crate::serialize::{Construct, Info, SafeConfig, State, Tracker};

pub fn image_reference(
    image: &ImageReference,
    state: &mut State,
    info: &Info<'_>,
) -> Result<String, SerializeError> {
    let mut state = state.enter(Construct::ImageReference);
    let mut tracker = Tracker::new(info.position);
    let mut value = tracker.advance("![").to_string();

    let alt = {
        let state = state.enter(Construct::Label);
        state.safe(&image.alt, SafeConfig::new(&value, "]"))
    };
    value.push_str(tracker.advance(&alt));
    value.push_str(tracker.advance("]["));

    let label = association(image.label.as_deref(), &image.identifier);
    close_reference(
        &mut state,
        &mut tracker,
        &mut value,
        &alt,
        &label,
        image.reference_type,
    );
    Ok(value)
}
