//! String helpers shared by handlers.

use crate::ast::Node;

/// Maps every line of `value`, keeping the original line endings.
///
/// `map` receives the line, its 0-based index, and whether it is empty.
pub fn indent_lines(value: &str, mut map: impl FnMut(&str, usize, bool) -> String) -> String {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;
    let mut line = 0;

    while let Some(index) = rest.find(['\r', '\n']) {
        let ending = if rest[index..].starts_with("\r\n") { 2 } else { 1 };
        let content = &rest[..index];
        result.push_str(&map(content, line, content.is_empty()));
        result.push_str(&rest[index..index + ending]);
        rest = &rest[index + ending..];
        line += 1;
    }

    result.push_str(&map(rest, line, rest.is_empty()));
    result
}

/// Length of the longest run of `character` in `value`.
pub fn longest_streak(value: &str, character: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in value.chars() {
        if c == character {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Whether `value` contains a line ending.
pub fn has_line_ending(value: &str) -> bool {
    value.contains(['\r', '\n'])
}

/// The text a reference or definition is labelled with.
///
/// Prefers the source `label`; otherwise decodes the normalized
/// `identifier` back from its escapes and character references.
pub fn association(label: Option<&str>, identifier: &str) -> String {
    match label {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => decode_string(identifier),
    }
}

/// Resolves backslash escapes and character references.
pub fn decode_string(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(index) = rest.find(['\\', '&']) {
        result.push_str(&rest[..index]);
        let tail = &rest[index..];

        if let Some(escaped) = tail.strip_prefix('\\') {
            match escaped.chars().next() {
                Some(c) if c.is_ascii_punctuation() => {
                    result.push(c);
                    rest = &escaped[1..];
                }
                _ => {
                    result.push('\\');
                    rest = escaped;
                }
            }
            continue;
        }

        match reference_len(tail) {
            Some(len) => {
                result.push_str(&html_escape::decode_html_entities(&tail[..len]));
                rest = &tail[len..];
            }
            None => {
                result.push('&');
                rest = &tail[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// Byte length of a `&name;`, `&#123;` or `&#x1F;` reference at the start of
/// `value`.
fn reference_len(value: &str) -> Option<usize> {
    let body = value.strip_prefix('&')?;
    let end = body.find(';')?;
    let name = &body[..end];

    let valid = if let Some(hex) = name
        .strip_prefix("#x")
        .or_else(|| name.strip_prefix("#X"))
    {
        (1..=6).contains(&hex.len()) && hex.chars().all(|c| c.is_ascii_hexdigit())
    } else if let Some(decimal) = name.strip_prefix('#') {
        (1..=7).contains(&decimal.len()) && decimal.chars().all(|c| c.is_ascii_digit())
    } else {
        (1..=31).contains(&name.len()) && name.chars().all(|c| c.is_ascii_alphanumeric())
    };

    valid.then_some(end + 2)
}

/// Whether a root holds inline content and must be serialized as phrasing.
pub fn has_phrasing_child(node: &Node) -> bool {
    node.children().iter().any(Node::is_phrasing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn indent_lines_keeps_line_endings() {
        let out = indent_lines("a\r\n\nb\rc", |line, index, blank| {
            if blank {
                String::new()
            } else {
                format!("{index}:{line}")
            }
        });
        assert_eq!(out, "0:a\r\n\n2:b\r3:c");
    }

    #[test]
    fn indent_lines_maps_empty_input_once() {
        let mut calls = 0;
        indent_lines("", |_, _, blank| {
            assert!(blank);
            calls += 1;
            String::new()
        });
        assert_eq!(calls, 1);
    }

    #[rstest]
    #[case("", 0)]
    #[case("a`b", 1)]
    #[case("``a```b`", 3)]
    fn longest_backtick_streak(#[case] value: &str, #[case] expected: usize) {
        assert_eq!(longest_streak(value, '`'), expected);
    }

    #[rstest]
    #[case("a", "a")]
    #[case("a\\*b", "a*b")]
    #[case("a\\b", "a\\b")]
    #[case("&amp;", "&")]
    #[case("&#x41;&#66;", "AB")]
    #[case("&b;", "&b;")]
    #[case("a&b", "a&b")]
    #[case("\\&amp;", "&amp;")]
    fn decodes_identifiers(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(decode_string(value), expected);
    }

    #[test]
    fn label_wins_over_identifier() {
        assert_eq!(association(Some("A"), "a"), "A");
        assert_eq!(association(None, "a&amp;b"), "a&b");
        assert_eq!(association(Some(""), "x"), "x");
    }
}
