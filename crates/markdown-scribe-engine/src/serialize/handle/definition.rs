use crate::ast::Definition;
use crate::error::SerializeError;
use crate::serialize::format::needs_enclosed_destination;
use crate::serialize::text::association;
use crate::serialize::{Construct, Info, SafeConfig, State, Tracker};

pub fn definition(
    definition: &Definition,
    state: &mut State,
    info: &Info<'_>,
) -> Result<String, SerializeError> {
    let quote = state.settings.check_quote()?;
    let mut state = state.enter(Construct::Definition);
    let mut tracker = Tracker::new(info.position);
    let mut value = tracker.advance("[").to_string();

    {
        let state = state.enter(Construct::Label);
        let label = association(definition.label.as_deref(), &definition.identifier);
        let escaped = state.safe(&label, SafeConfig::new(&value, "]"));
        value.push_str(tracker.advance(&escaped));
        value.push_str(tracker.advance("]: "));
    }

    let title = definition.title.as_deref().filter(|title| !title.is_empty());
    let url = definition.url.as_str();

    if url.is_empty() || needs_enclosed_destination(url) {
        let state = state.enter(Construct::DestinationLiteral);
        value.push_str(tracker.advance("<"));
        let escaped = state.safe(url, SafeConfig::new(&value, ">"));
        value.push_str(tracker.advance(&escaped));
        value.push_str(tracker.advance(">"));
    } else {
        let state = state.enter(Construct::DestinationRaw);
        let after = if title.is_some() { " " } else { "\n" };
        let escaped = state.safe(url, SafeConfig::new(&value, after));
        value.push_str(tracker.advance(&escaped));
    }

    if let Some(title) = title {
        let state = state.enter(Construct::title(quote));
        value.push_str(tracker.advance(&format!(" {quote}")));
        let quote = quote.to_string();
        let escaped = state.safe(title, SafeConfig::new(&value, &quote));
        value.push_str(tracker.advance(&escaped));
        value.push_str(tracker.advance(&quote));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use crate::ast::{Definition, Node};
    use crate::options::Settings;
    use crate::serialize::{render, render_with};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn definition(label: Option<&str>, url: &str, title: Option<&str>) -> Node {
        Node::Definition(Definition {
            identifier: "a".to_string(),
            label: label.map(str::to_string),
            url: url.to_string(),
            title: title.map(str::to_string),
        })
    }

    #[rstest]
    #[case(Some("A"), "b", None, "[A]: b\n")]
    #[case(None, "b", None, "[a]: b\n")]
    #[case(Some("A"), "", None, "[A]: <>\n")]
    #[case(Some("A"), "b c", None, "[A]: <b c>\n")]
    #[case(Some("A"), "b", Some("c"), "[A]: b \"c\"\n")]
    #[case(Some("A"), "b", Some("c\"d"), "[A]: b \"c\\\"d\"\n")]
    #[case(Some("A]"), "b", None, "[A\\]]: b\n")]
    #[case(Some("A"), "b(c)", None, "[A]: b\\(c\\)\n")]
    fn writes_definitions(
        #[case] label: Option<&str>,
        #[case] url: &str,
        #[case] title: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(render(&definition(label, url, title)), expected);
    }

    #[test]
    fn apostrophe_titles() {
        let settings = Settings {
            quote: Some('\''),
            ..Settings::default()
        };
        assert_eq!(
            render_with(&definition(Some("A"), "b", Some("c'd")), settings),
            "[A]: b 'c\\'d'\n"
        );
    }

    #[test]
    fn identifier_is_decoded() {
        let node = Node::Definition(Definition {
            identifier: "a&amp;b".to_string(),
            url: "c".to_string(),
            ..Definition::default()
        });
        assert_eq!(render(&node), "[a&b]: c\n");
    }
}
