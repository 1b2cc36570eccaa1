use crate::ast::{Link, Node};
use crate::error::SerializeError;
use crate::serialize::format::{format_link_as_autolink, needs_enclosed_destination};
use crate::serialize::{Construct, Info, SafeConfig, State, Tracker};

pub fn peek(link: &Link, state: &State) -> char {
    if format_link_as_autolink(link, state) {
        '<'
    } else {
        '['
    }
}

pub fn link(
    node: &Node,
    link: &Link,
    state: &mut State,
    info: &Info<'_>,
) -> Result<String, SerializeError> {
    let quote = state.settings.check_quote()?;
    let mut tracker = Tracker::new(info.position);

    if format_link_as_autolink(link, state) {
        let mut state = state.isolate();
        let mut state = state.enter(Construct::Autolink);
        let mut value = tracker.advance("<").to_string();
        let content =
            state.container_phrasing(node, &Info::new(&value, ">", tracker.current()))?;
        value.push_str(tracker.advance(&content));
        value.push_str(tracker.advance(">"));
        return Ok(value);
    }

    let mut state = state.enter(Construct::Link);
    let mut value = tracker.advance("[").to_string();
    {
        let mut state = state.enter(Construct::Label);
        let content =
            state.container_phrasing(node, &Info::new(&value, "](", tracker.current()))?;
        value.push_str(tracker.advance(&content));
        value.push_str(tracker.advance("]("));
    }

    destination_and_title(
        &mut state,
        &mut tracker,
        &mut value,
        &link.url,
        link.title.as_deref(),
        quote,
    );
    value.push_str(tracker.advance(")"));
    Ok(value)
}

/// Writes the `dest "title"` part of a link or image resource.
///
/// The destination is enclosed in `<` and `>` when it holds spaces or
/// controls, or when it is empty but a title follows.
pub(crate) fn destination_and_title(
    state: &mut State,
    tracker: &mut Tracker,
    value: &mut String,
    url: &str,
    title: Option<&str>,
    quote: char,
) {
    let title = title.filter(|title| !title.is_empty());

    if (url.is_empty() && title.is_some()) || needs_enclosed_destination(url) {
        let state = state.enter(Construct::DestinationLiteral);
        value.push_str(tracker.advance("<"));
        let escaped = state.safe(url, SafeConfig::new(value, ">"));
        value.push_str(tracker.advance(&escaped));
        value.push_str(tracker.advance(">"));
    } else {
        let state = state.enter(Construct::DestinationRaw);
        let after = if title.is_some() { " " } else { ")" };
        let escaped = state.safe(url, SafeConfig::new(value, after));
        value.push_str(tracker.advance(&escaped));
    }

    if let Some(title) = title {
        let state = state.enter(Construct::title(quote));
        value.push_str(tracker.advance(&format!(" {quote}")));
        let quote = quote.to_string();
        let escaped = state.safe(title, SafeConfig::new(value, &quote));
        value.push_str(tracker.advance(&escaped));
        value.push_str(tracker.advance(&quote));
    }
}
