use regex::Regex;

use crate::error::SerializeError;
use crate::serialize::Construct;

/// A character that must be escaped under certain conditions.
///
/// `before` and `after` are regular expression fragments for what has to
/// surround the character; `at_break` requires it to start a line (after
/// optional spaces and tabs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsafePattern {
    pub character: char,
    pub in_construct: Vec<Construct>,
    pub not_in_construct: Vec<Construct>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub at_break: bool,
}

impl UnsafePattern {
    pub fn new(character: char) -> Self {
        Self {
            character,
            in_construct: Vec::new(),
            not_in_construct: Vec::new(),
            before: None,
            after: None,
            at_break: false,
        }
    }

    #[must_use]
    pub fn at_break(mut self) -> Self {
        self.at_break = true;
        self
    }

    #[must_use]
    pub fn before(mut self, expression: &str) -> Self {
        self.before = Some(expression.to_string());
        self
    }

    #[must_use]
    pub fn after(mut self, expression: &str) -> Self {
        self.after = Some(expression.to_string());
        self
    }

    #[must_use]
    pub fn inside(mut self, constructs: impl IntoIterator<Item = Construct>) -> Self {
        self.in_construct.extend(constructs);
        self
    }

    #[must_use]
    pub fn outside(mut self, constructs: impl IntoIterator<Item = Construct>) -> Self {
        self.not_in_construct.extend(constructs);
        self
    }

    /// Whether this pattern applies given the active constructs.
    ///
    /// No `in_construct` means everywhere; no `not_in_construct` excludes
    /// nothing.
    pub fn in_scope(&self, stack: &[Construct]) -> bool {
        let included = self.in_construct.is_empty()
            || stack.iter().any(|c| self.in_construct.contains(c));
        let excluded = !self.not_in_construct.is_empty()
            && stack.iter().any(|c| self.not_in_construct.contains(c));
        included && !excluded
    }

    /// Whether a match's leading context is captured in group 1.
    pub(crate) fn has_leading_context(&self) -> bool {
        self.at_break || self.before.is_some()
    }

    fn expression(&self) -> String {
        let mut leading = String::new();
        if self.at_break {
            leading.push_str(r"[\r\n][\t ]*");
        }
        if let Some(before) = &self.before {
            leading.push_str(&format!("(?:{before})"));
        }

        let mut source = String::new();
        if !leading.is_empty() {
            source.push_str(&format!("({leading})"));
        }
        source.push_str(&regex::escape(&self.character.to_string()));
        if let Some(after) = &self.after {
            source.push_str(&format!("(?:{after})"));
        }
        source
    }
}

/// An [`UnsafePattern`] with its expression compiled once per serialization.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub pattern: UnsafePattern,
    pub regex: Regex,
}

impl CompiledPattern {
    pub fn compile(pattern: UnsafePattern) -> Result<Self, SerializeError> {
        let regex = Regex::new(&pattern.expression()).map_err(|source| SerializeError::Pattern {
            character: pattern.character,
            source,
        })?;
        Ok(Self { pattern, regex })
    }

    /// Byte offsets of every flagged character in `value`.
    pub fn positions<'a>(&'a self, value: &'a str) -> impl Iterator<Item = usize> + 'a {
        let leading = self.pattern.has_leading_context();
        self.regex.captures_iter(value).filter_map(move |caps| {
            let whole = caps.get(0)?;
            let skip = if leading {
                caps.get(1).map_or(0, |m| m.len())
            } else {
                0
            };
            Some(whole.start() + skip)
        })
    }
}
