use crate::ast::Node;
use crate::error::SerializeError;
use crate::serialize::format::format_heading_as_setext;
use crate::serialize::safe::character_reference;
use crate::serialize::{Construct, Info, State, Tracker};

pub const ATX_MARKER: char = '#';

/// Rank the heading is written at.
pub fn rank(depth: u8) -> usize {
    usize::from(depth.clamp(1, 6))
}

pub fn heading(
    node: &Node,
    depth: u8,
    state: &mut State,
    info: &Info<'_>,
) -> Result<String, SerializeError> {
    let rank = rank(depth);
    let mut tracker = Tracker::new(info.position);

    if format_heading_as_setext(node, state) {
        let mut state = state.enter(Construct::HeadingSetext);
        let mut state = state.enter(Construct::Phrasing);
        let value = state.container_phrasing(node, &Info::new("\n", "\n", tracker.current()))?;

        let underline = if rank == 1 { '=' } else { '-' };
        let last_line = value.rsplit(['\r', '\n']).next().unwrap_or_default();
        let width = last_line.chars().count();
        return Ok(format!("{value}\n{}", underline.to_string().repeat(width)));
    }

    let sequence = ATX_MARKER.to_string().repeat(rank);
    let mut state = state.enter(Construct::HeadingAtx);
    let mut state = state.enter(Construct::Phrasing);
    tracker.advance(&sequence);
    tracker.advance(" ");
    let mut value = state.container_phrasing(node, &Info::new("# ", "\n", tracker.current()))?;

    // Leading whitespace would be eaten as part of the opening sequence.
    if let Some(first) = value.chars().next().filter(|c| matches!(c, ' ' | '\t')) {
        value.replace_range(..first.len_utf8(), &character_reference(first));
    }

    let mut result = if value.is_empty() {
        sequence.clone()
    } else {
        format!("{sequence} {value}")
    };
    if state.settings.close_atx() {
        result.push(' ');
        result.push_str(&sequence);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::ast::Node;
    use crate::options::Settings;
    use crate::serialize::{render, render_with};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, "# a\n")]
    #[case(1, "# a\n")]
    #[case(3, "### a\n")]
    #[case(6, "###### a\n")]
    #[case(9, "###### a\n")]
    fn clamps_the_rank(#[case] depth: u8, #[case] expected: &str) {
        assert_eq!(render(&Node::heading(depth, vec![Node::text("a")])), expected);
    }

    #[test]
    fn empty_heading_is_just_the_sequence() {
        assert_eq!(render(&Node::heading(2, Vec::new())), "##\n");
    }

    #[test]
    fn closing_sequence_on_request() {
        let settings = Settings {
            close_atx: Some(true),
            ..Settings::default()
        };
        assert_eq!(
            render_with(&Node::heading(2, vec![Node::text("a")]), settings),
            "## a ##\n"
        );
    }

    #[test]
    fn leading_whitespace_is_encoded() {
        assert_eq!(
            render(&Node::heading(1, vec![Node::text(" a")])),
            "# &#x20;a\n"
        );
    }

    #[test]
    fn trailing_hashes_are_escaped() {
        assert_eq!(
            render(&Node::heading(1, vec![Node::text("a #")])),
            "# a \\#\n"
        );
    }

    #[test]
    fn setext_on_request() {
        let settings = Settings {
            setext: Some(true),
            ..Settings::default()
        };
        assert_eq!(
            render_with(&Node::heading(1, vec![Node::text("abc")]), settings.clone()),
            "abc\n===\n"
        );
        assert_eq!(
            render_with(&Node::heading(2, vec![Node::text("ab")]), settings.clone()),
            "ab\n--\n"
        );
        assert_eq!(
            render_with(&Node::heading(3, vec![Node::text("a")]), settings),
            "### a\n"
        );
    }

    #[test]
    fn multiline_content_forces_setext() {
        assert_eq!(
            render(&Node::heading(1, vec![Node::text("a\nbc")])),
            "a\nbc\n==\n"
        );
    }

    #[test]
    fn line_ending_in_deep_heading_is_encoded() {
        assert_eq!(
            render(&Node::heading(3, vec![Node::text("a\nb")])),
            "### a&#xA;b\n"
        );
    }
}
