//! The escaping engine.
//!
//! [`State::safe`] makes a literal string safe to place between `before` and
//! `after` in the output, given the constructs currently open. Characters an
//! in-scope [`UnsafePattern`] flags are backslash-escaped when they are ASCII
//! punctuation and replaced by a character reference (`&#xA;`) otherwise.
//!
//! ## Modules
//!
//! - [`pattern`]: declarative rules and their compiled form
//! - [`defaults`]: the rules every serialization starts with

pub mod defaults;
pub mod pattern;

use std::collections::BTreeMap;

pub use defaults::default_unsafe_patterns;
pub use pattern::{CompiledPattern, UnsafePattern};

use crate::serialize::State;

/// Surrounding output for a [`State::safe`] call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafeConfig<'a> {
    /// Output directly before the value (or a stand-in like `"\n"`).
    pub before: &'a str,
    /// Output directly after the value.
    pub after: &'a str,
    /// Flagged characters that must be encoded as references even when they
    /// are punctuation, for places where backslashes are literal.
    pub encode: &'a [char],
}

impl<'a> SafeConfig<'a> {
    pub fn new(before: &'a str, after: &'a str) -> Self {
        Self {
            before,
            after,
            encode: &[],
        }
    }

    #[must_use]
    pub fn encode(mut self, characters: &'a [char]) -> Self {
        self.encode = characters;
        self
    }
}

/// Why a position was flagged: whether every pattern flagging it depended
/// on the preceding and the following characters.
#[derive(Debug, Clone, Copy)]
struct Reason {
    before: bool,
    after: bool,
}

impl State {
    /// Escapes `input` for output between `config.before` and `config.after`.
    ///
    /// Literal backslashes that precede punctuation are doubled so they stay
    /// literal.
    pub fn safe(&self, input: &str, config: SafeConfig<'_>) -> String {
        let value = format!("{}{}{}", config.before, input, config.after);
        let mut flagged: BTreeMap<usize, Reason> = BTreeMap::new();

        for compiled in self.unsafe_patterns() {
            if !compiled.pattern.in_scope(self.stack()) {
                continue;
            }

            let before = compiled.pattern.has_leading_context();
            let after = compiled.pattern.after.is_some();

            for position in compiled.positions(&value) {
                flagged
                    .entry(position)
                    .and_modify(|reason| {
                        reason.before &= before;
                        reason.after &= after;
                    })
                    .or_insert(Reason { before, after });
            }
        }

        let flagged: Vec<(usize, Reason)> = flagged.into_iter().collect();
        let mut start = config.before.len();
        let end = value.len() - config.after.len();
        let mut result = String::with_capacity(value.len());

        for (index, &(position, reason)) in flagged.iter().enumerate() {
            // Inside the surrounding context, or already encoded.
            if position < start || position >= end {
                continue;
            }

            // The neighbour is escaped on its own account, which already
            // breaks the sequence this position was flagged for.
            let next_escaped = position + 1 < end
                && flagged.get(index + 1).is_some_and(|&(next, other)| {
                    next == position + 1 && reason.after && !other.before && !other.after
                });
            let previous_escaped = index
                .checked_sub(1)
                .and_then(|i| flagged.get(i))
                .is_some_and(|&(previous, other)| {
                    previous + 1 == position && reason.before && !other.before && !other.after
                });
            if next_escaped || previous_escaped {
                continue;
            }

            let Some(character) = value[position..].chars().next() else {
                continue;
            };

            if start != position {
                result.push_str(&escape_backslashes(&value[start..position], "\\"));
            }
            start = position;

            if character.is_ascii_punctuation() && !config.encode.contains(&character) {
                result.push('\\');
            } else {
                result.push_str(&character_reference(character));
                start += character.len_utf8();
            }
        }

        result.push_str(&escape_backslashes(&value[start..end], config.after));
        result
    }
}

/// `&#x…;` for `character`, with uppercase hex digits.
pub fn character_reference(character: char) -> String {
    format!("&#x{:X};", u32::from(character))
}

/// Doubles backslashes that would otherwise escape the punctuation after
/// them, looking into `after` for the final one.
fn escape_backslashes(value: &str, after: &str) -> String {
    let next_bytes = value.as_bytes().iter().chain(after.as_bytes()).skip(1);
    let mut result = String::with_capacity(value.len());
    let mut start = 0;

    for ((index, byte), next) in value.bytes().enumerate().zip(next_bytes) {
        if byte == b'\\' && next.is_ascii_punctuation() {
            result.push_str(&value[start..index]);
            result.push('\\');
            start = index;
        }
    }

    result.push_str(&value[start..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::serialize::Construct;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn state() -> State {
        State::new(&Options::default()).unwrap()
    }

    #[rstest]
    #[case("a\\*b", "", "a\\\\*b")]
    #[case("a\\b", "", "a\\b")]
    #[case("a\\", "*", "a\\\\")]
    #[case("a\\", "b", "a\\")]
    #[case("\\\\", "*", "\\\\\\\\")]
    #[case("\\\\", "", "\\\\\\")]
    fn doubles_backslashes_before_punctuation(
        #[case] value: &str,
        #[case] after: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(escape_backslashes(value, after), expected);
    }

    #[test]
    fn references_use_uppercase_hex() {
        assert_eq!(character_reference('\n'), "&#xA;");
        assert_eq!(character_reference('`'), "&#x60;");
        assert_eq!(character_reference('é'), "&#xE9;");
    }

    #[test]
    fn escapes_only_inside_scope() {
        let mut state = state();
        assert_eq!(state.safe("*a*", SafeConfig::new("\n", "\n")), "*a*");

        let state = state.enter(Construct::Phrasing);
        assert_eq!(state.safe("*a*", SafeConfig::new("\n", "\n")), "\\*a\\*");
    }

    #[test]
    fn context_is_not_escaped() {
        let mut state = state();
        let state = state.enter(Construct::Phrasing);
        assert_eq!(state.safe("a", SafeConfig::new("*", "*")), "a");
    }

    #[test]
    fn after_context_can_flag_the_last_character() {
        let mut state = state();
        let state = state.enter(Construct::Phrasing);
        assert_eq!(state.safe("a!", SafeConfig::new("", "[")), "a\\!");
    }

    #[test]
    fn non_punctuation_is_encoded() {
        let mut state = state();
        let state = state.enter(Construct::Phrasing);
        assert_eq!(state.safe("a  ", SafeConfig::new("\n", "\n")), "a &#x20;");
    }

    #[test]
    fn encode_set_forces_references() {
        let mut state = state();
        let state = state.enter(Construct::CodeFencedLangGraveAccent);
        assert_eq!(
            state.safe("a`b", SafeConfig::new("```", " ").encode(&['`'])),
            "a&#x60;b"
        );
    }

    #[test]
    fn escape_consumed_by_neighbour_is_skipped() {
        let mut state = state();
        let state = state.enter(Construct::Phrasing);
        // `!` is only unsafe before `[`, which is escaped itself.
        assert_eq!(state.safe("![a]", SafeConfig::new("\n", "\n")), "!\\[a]");
    }

    #[rstest]
    #[case("+ a", "\\+ a")]
    #[case("+a", "+a")]
    #[case("--a", "\\--a")]
    #[case("1. a", "1\\. a")]
    #[case("1) a", "1\\) a")]
    #[case("1.2.3. asd", "1.2.3. asd")]
    #[case("> a\n> b\nc >", "\\> a\n\\> b\nc >")]
    #[case("&amp", "\\&amp")]
    #[case("a\\\nb", "a\\\\\nb")]
    #[case("[a]: b", "\\[a]: b")]
    #[case("![](a.jpg)", "!\\[]\\(a.jpg)")]
    #[case("a\n=", "a\n\\=")]
    #[case("<a\nb>", "\\<a\nb>")]
    fn escapes_block_and_inline_starts(#[case] input: &str, #[case] expected: &str) {
        let mut state = state();
        let state = state.enter(Construct::Phrasing);
        assert_eq!(state.safe(input, SafeConfig::new("\n", "\n")), expected);
    }
}
