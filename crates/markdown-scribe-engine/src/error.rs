use thiserror::Error;

/// A stylistic option holds a value outside its accepted set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("Cannot serialize items with `{0}` for `options.bullet`, expected `*`, `+`, or `-`")]
    Bullet(char),
    #[error(
        "Cannot serialize items with `{0}` for `options.bulletOther`, expected `*`, `+`, or `-`"
    )]
    BulletOther(char),
    #[error("Expected `bullet` (`{bullet}`) and `bulletOther` (`{other}`) to be different")]
    BulletNotDistinct { bullet: char, other: char },
    #[error("Cannot serialize items with `{0}` for `options.bulletOrdered`, expected `.` or `)`")]
    BulletOrdered(char),
    #[error(
        "Cannot serialize items with `{0}` for `options.bulletOrderedOther`, expected `.` or `)`"
    )]
    BulletOrderedOther(char),
    #[error(
        "Expected `bulletOrdered` (`{bullet}`) and `bulletOrderedOther` (`{other}`) to be different"
    )]
    BulletOrderedNotDistinct { bullet: char, other: char },
    #[error("Cannot serialize emphasis with `{0}` for `options.emphasis`, expected `*`, or `_`")]
    Emphasis(char),
    #[error("Cannot serialize strong with `{0}` for `options.strong`, expected `*`, or `_`")]
    Strong(char),
    #[error("Cannot serialize code with `{0}` for `options.fence`, expected `` ` `` or `~`")]
    Fence(char),
    #[error("Cannot serialize title with `{0}` for `options.quote`, expected `\"`, or `'`")]
    Quote(char),
    #[error("Cannot serialize rules with `{0}` for `options.rule`, expected `*`, `-`, or `_`")]
    Rule(char),
    #[error(
        "Cannot serialize rules with repetition `{0}` for `options.ruleRepetition`, expected `3` or more"
    )]
    RuleRepetition(usize),
    #[error(
        "Cannot serialize items with `{0}` for `options.listItemIndent`, expected `tab`, `one`, or `mixed`"
    )]
    ListItemIndent(String),
}

/// Serialization aborted; no partial output is produced.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error("Cannot handle unknown node `{0}`")]
    UnknownNode(String),
    #[error("Cannot handle value `{0}`, expected node")]
    InvalidNode(String),
    #[error("Handler for `{expected}` was given a `{found}` node")]
    MismatchedNode {
        expected: &'static str,
        found: String,
    },
    #[error("Invalid unsafe pattern for `{character}`: {source}")]
    Pattern {
        character: char,
        source: regex::Error,
    },
}

impl SerializeError {
    pub(crate) fn mismatched(expected: &'static str, found: &crate::ast::Node) -> Self {
        SerializeError::MismatchedNode {
            expected,
            found: found.kind().to_string(),
        }
    }
}
