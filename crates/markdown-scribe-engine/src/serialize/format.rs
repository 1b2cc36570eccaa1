//! Decisions about which of several equivalent forms a node takes.

use crate::ast::{Code, Link, Node};
use crate::serialize::State;
use crate::serialize::text::has_line_ending;

/// Whether code can be written as an indented block instead of fenced.
///
/// Needs no info string, some non-whitespace content, and no blank first or
/// last line (those would be lost).
pub fn format_code_as_indented(code: &Code, state: &State) -> bool {
    let value = code.value.as_str();
    let has_content = value.chars().any(|c| !matches!(c, ' ' | '\r' | '\n'))
        && !value.chars().all(|c| matches!(c, ' ' | '\t'));
    let blank_start = value
        .trim_start_matches([' ', '\t'])
        .starts_with(['\r', '\n']);
    let blank_end = value.trim_end_matches([' ', '\t']).ends_with(['\r', '\n']);

    !state.settings.fences()
        && code.lang.as_deref().is_none_or(str::is_empty)
        && has_content
        && !blank_start
        && !blank_end
}

/// Whether a heading gets a setext underline instead of `#` marks.
///
/// Only ranks 1 and 2 have an underline form. It is used when asked for, and
/// is the only form that can hold content spanning lines.
pub fn format_heading_as_setext(node: &Node, state: &State) -> bool {
    let Node::Heading(heading) = node else {
        return false;
    };
    heading.depth < 3
        && !node.to_plain_string().is_empty()
        && (state.settings.setext() || has_literal_break(node))
}

fn has_literal_break(node: &Node) -> bool {
    match node {
        Node::Break => true,
        node => {
            node.value().is_some_and(has_line_ending)
                || node.children().iter().any(has_literal_break)
        }
    }
}

/// Whether a link can be written as `<url>`.
pub fn format_link_as_autolink(link: &Link, state: &State) -> bool {
    let [Node::Text(text)] = link.children.as_slice() else {
        return false;
    };
    let url = link.url.as_str();

    !state.settings.resource_link()
        && !url.is_empty()
        && link.title.as_deref().is_none_or(str::is_empty)
        && (text.value == url || url.strip_prefix("mailto:") == Some(text.value.as_str()))
        && has_scheme(url)
        && !url.chars().any(|c| c <= ' ' || matches!(c, '<' | '>' | '\x7f'))
}

/// `[a-z][a-z+.-]+:` at the start, case-insensitively.
fn has_scheme(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme.len() >= 2
        && chars.all(|c| c.is_ascii_alphabetic() || matches!(c, '+' | '.' | '-'))
}

/// Whether a destination has to be wrapped in `<` and `>`.
pub fn needs_enclosed_destination(url: &str) -> bool {
    url.chars().any(|c| c <= ' ' || c == '\x7f')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Text;
    use crate::options::{Options, Settings};
    use rstest::rstest;

    fn state() -> State {
        State::new(&Options::default()).unwrap()
    }

    #[rstest]
    #[case("a", true)]
    #[case("  a\n\n b", true)]
    #[case("", false)]
    #[case("   ", false)]
    #[case("\t", false)]
    #[case(" \t ", false)]
    #[case("\t\t", false)]
    #[case("\n\na", false)]
    #[case(" \na", false)]
    #[case("a\n\n", false)]
    #[case("a\n \t", false)]
    fn indented_code(#[case] value: &str, #[case] expected: bool) {
        let code = Code {
            value: value.to_string(),
            ..Code::default()
        };
        assert_eq!(format_code_as_indented(&code, &state()), expected);
    }

    #[test]
    fn code_with_lang_is_fenced() {
        let code = Code {
            lang: Some("rs".to_string()),
            value: "a".to_string(),
            ..Code::default()
        };
        assert!(!format_code_as_indented(&code, &state()));
    }

    #[test]
    fn fences_option_disables_indenting() {
        let state = State::new(
            &Settings {
                fences: Some(true),
                ..Settings::default()
            }
            .into(),
        )
        .unwrap();
        assert!(!format_code_as_indented(&Code {
            value: "a".to_string(),
            ..Code::default()
        }, &state));
    }

    #[rstest]
    #[case(1, vec![Node::text("a\nb")], true)]
    #[case(2, vec![Node::text("a"), Node::Break, Node::text("b")], true)]
    #[case(3, vec![Node::text("a\nb")], false)]
    #[case(1, vec![Node::text("a")], false)]
    #[case(1, vec![Node::Break], false)]
    fn setext_for_multiline_headings(
        #[case] depth: u8,
        #[case] children: Vec<Node>,
        #[case] expected: bool,
    ) {
        let heading = Node::heading(depth, children);
        assert_eq!(format_heading_as_setext(&heading, &state()), expected);
    }

    #[rstest]
    #[case("https://a.b", "https://a.b", true)]
    #[case("mailto:a@b.c", "a@b.c", true)]
    #[case("tel:123", "tel:123", true)]
    #[case("https://a.b", "other", false)]
    #[case("a.b", "a.b", false)]
    #[case("x:y", "x:y", false)]
    #[case("https://a b", "https://a b", false)]
    fn autolinks(#[case] url: &str, #[case] text: &str, #[case] expected: bool) {
        let link = Link {
            url: url.to_string(),
            title: None,
            children: vec![Node::Text(Text {
                value: text.to_string(),
            })],
        };
        assert_eq!(format_link_as_autolink(&link, &state()), expected);
    }
}
