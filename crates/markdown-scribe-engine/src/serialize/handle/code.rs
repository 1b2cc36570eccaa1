use crate::ast::Code;
use crate::error::SerializeError;
use crate::serialize::format::format_code_as_indented;
use crate::serialize::text::{indent_lines, longest_streak};
use crate::serialize::{Construct, Info, SafeConfig, State, Tracker};

/// Indent of an indented code block.
pub const INDENT: &str = "    ";

/// Shortest fence allowed.
pub const MIN_FENCE: usize = 3;

/// Backslashes are literal in info strings, so a backtick there has to be
/// a character reference.
const INFO_ENCODE: &[char] = &['`'];

pub fn code(code: &Code, state: &mut State, info: &Info<'_>) -> Result<String, SerializeError> {
    let marker = state.settings.check_fence()?;
    let raw = code.value.as_str();

    if format_code_as_indented(code, state) {
        let _state = state.enter(Construct::CodeIndented);
        return Ok(indent_lines(raw, |line, _, blank| {
            if blank {
                line.to_string()
            } else {
                format!("{INDENT}{line}")
            }
        }));
    }

    let (lang_construct, meta_construct) = if marker == '`' {
        (
            Construct::CodeFencedLangGraveAccent,
            Construct::CodeFencedMetaGraveAccent,
        )
    } else {
        (Construct::CodeFencedLangTilde, Construct::CodeFencedMetaTilde)
    };

    let mut tracker = Tracker::new(info.position);
    let sequence = marker
        .to_string()
        .repeat((longest_streak(raw, marker) + 1).max(MIN_FENCE));
    let mut state = state.enter(Construct::CodeFenced);
    let mut value = tracker.advance(&sequence).to_string();

    if let Some(lang) = code.lang.as_deref().filter(|lang| !lang.is_empty()) {
        {
            let state = state.enter(lang_construct);
            let escaped = state.safe(lang, SafeConfig::new(&value, " ").encode(INFO_ENCODE));
            value.push_str(tracker.advance(&escaped));
        }

        if let Some(meta) = code.meta.as_deref().filter(|meta| !meta.is_empty()) {
            let state = state.enter(meta_construct);
            value.push_str(tracker.advance(" "));
            let escaped = state.safe(meta, SafeConfig::new(&value, "\n").encode(INFO_ENCODE));
            value.push_str(tracker.advance(&escaped));
        }
    }

    value.push_str(tracker.advance("\n"));
    if !raw.is_empty() {
        value.push_str(tracker.advance(raw));
        value.push_str(tracker.advance("\n"));
    }
    value.push_str(tracker.advance(&sequence));

    Ok(value)
}
