use crate::ast::Image;
use crate::error::SerializeError;
use crate::serialize::handle::link::destination_and_title;
use crate::serialize::{Construct, Info, SafeConfig, State, Tracker};

pub const PEEK: char = '!';

pub fn image(image: &Image, state: &mut State, info: &Info<'_>) -> Result<String, SerializeError> {
    let quote = state.settings.check_quote()?;
    let mut state = state.enter(Construct::Image);
    let mut tracker = Tracker::new(info.position);
    let mut value = tracker.advance("![").to_string();

    {
        let state = state.enter(Construct::Label);
        let alt = state.safe(&image.alt, SafeConfig::new(&value, "]"));
        value.push_str(tracker.advance(&alt));
        value.push_str(tracker.advance("]("));
    }

    destination_and_title(
        &mut state,
        &mut tracker,
        &mut value,
        &image.url,
        image.title.as_deref(),
        quote,
    );
    value.push_str(tracker.advance(")"));
    Ok(value)
}
