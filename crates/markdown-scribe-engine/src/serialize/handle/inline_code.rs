use std::collections::HashSet;

use crate::serialize::State;

pub const PEEK: char = '`';

pub fn inline_code(value: &str, state: &State) -> String {
    let sequence = "`".repeat(fence_len(value));
    let mut value = value.to_string();

    let edge = |c: char| matches!(c, ' ' | '\r' | '\n');
    let has_content = value.chars().any(|c| !edge(c));
    let space_wrapped = value.starts_with(edge) && value.ends_with(edge);
    if has_content && (space_wrapped || value.starts_with('`') || value.ends_with('`')) {
        value = format!(" {value} ");
    }

    // A line ending followed by something that starts a block would split
    // the code span when reparsed.
    for compiled in state.unsafe_patterns() {
        if !compiled.pattern.at_break {
            continue;
        }
        let mut from = 0;
        while from <= value.len() {
            let Some((line_ending, end)) = compiled
                .regex
                .find_at(&value, from)
                .map(|found| (found.start(), found.end()))
            else {
                break;
            };
            let crlf = value[line_ending..].starts_with('\n') && value[..line_ending].ends_with('\r');
            let start = if crlf { line_ending - 1 } else { line_ending };
            value.replace_range(start..=line_ending, " ");
            from = if crlf { end - 1 } else { end };
        }
    }

    format!("{sequence}{value}{sequence}")
}

/// Length of the shortest backtick run that does not occur in `value`.
fn fence_len(value: &str) -> usize {
    let mut runs = HashSet::new();
    let mut current = 0;
    for c in value.chars() {
        if c == '`' {
            current += 1;
        } else if current > 0 {
            runs.insert(current);
            current = 0;
        }
    }
    if current > 0 {
        runs.insert(current);
    }

    (1..).find(|len| !runs.contains(len)).unwrap_or(1)
}
