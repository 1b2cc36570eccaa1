use crate::ast::Node;
use crate::error::SerializeError;
use crate::serialize::{Construct, Info, State, Tracker};

pub fn emphasis(node: &Node, state: &mut State, info: &Info<'_>) -> Result<String, SerializeError> {
    let marker = state.settings.check_emphasis()?.to_string();
    let mut state = state.enter(Construct::Emphasis);
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

#[cfg(test)]
mod tests {
    use crate::ast::Node;
    use crate::options::Settings;
    use crate::serialize::{render, render_with};
    use pretty_assertions::assert_eq;

    #[test]
    fn asterisks_by_default() {
        let tree = Node::paragraph(vec![Node::emphasis(vec![Node::text("a")])]);
        assert_eq!(render(&tree), "*a*\n");
    }

    #[test]
    fn underscores_on_request() {
        let settings = Settings {
            emphasis: Some('_'),
            ..Settings::default()
        };
        assert_eq!(
            render_with(&Node::emphasis(vec![Node::text("a")]), settings),
            "_a_\n"
        );
    }

    #[test]
    fn rejects_other_markers() {
        let options = Settings {
            emphasis: Some('+'),
            ..Settings::default()
        }
        .into();
        let err = crate::to_markdown(&Node::emphasis(Vec::new()), &options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot serialize emphasis with `+` for `options.emphasis`, expected `*`, or `_`"
        );
    }
}
