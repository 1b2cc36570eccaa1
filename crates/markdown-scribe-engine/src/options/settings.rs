use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

/// How far list item content is indented from its marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ListItemIndent {
    /// Marker width plus one, rounded up to a tab stop.
    #[default]
    Tab,
    /// Marker width plus one.
    One,
    /// `One` in tight lists and items, `Tab` in spread ones.
    Mixed,
}

impl FromStr for ListItemIndent {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tab" => Ok(ListItemIndent::Tab),
            "one" | "1" => Ok(ListItemIndent::One),
            "mixed" => Ok(ListItemIndent::Mixed),
            other => Err(OptionsError::ListItemIndent(other.to_string())),
        }
    }
}

impl TryFrom<String> for ListItemIndent {
    type Error = OptionsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ListItemIndent> for String {
    fn from(value: ListItemIndent) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ListItemIndent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ListItemIndent::Tab => "tab",
            ListItemIndent::One => "one",
            ListItemIndent::Mixed => "mixed",
        })
    }
}

/// Stylistic choices. Unset fields fall back to their defaults when read
/// through the `check_*` accessors, which also reject unsupported values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Unordered list marker: `*`, `+` or `-`.
    pub bullet: Option<char>,
    /// Marker used when `bullet` would be ambiguous.
    pub bullet_other: Option<char>,
    /// Ordered list delimiter: `.` or `)`.
    pub bullet_ordered: Option<char>,
    pub bullet_ordered_other: Option<char>,
    /// `*` or `_`.
    pub emphasis: Option<char>,
    /// `*` or `_`.
    pub strong: Option<char>,
    /// Code fence character: `` ` `` or `~`.
    pub fence: Option<char>,
    /// Always fence code, even when indenting would do.
    pub fences: Option<bool>,
    /// Title delimiter: `"` or `'`.
    pub quote: Option<char>,
    /// Thematic break character: `*`, `-` or `_`.
    pub rule: Option<char>,
    pub rule_repetition: Option<usize>,
    pub rule_spaces: Option<bool>,
    /// Close ATX headings with a matching `#` sequence.
    pub close_atx: Option<bool>,
    /// Underline rank 1 and 2 headings.
    pub setext: Option<bool>,
    pub list_item_indent: Option<ListItemIndent>,
    pub increment_list_marker: Option<bool>,
    /// Never use autolinks.
    pub resource_link: Option<bool>,
    /// No blank line between consecutive definitions.
    pub tight_definitions: Option<bool>,
}

macro_rules! overlay_fields {
    ($base:ident, $top:ident, $($field:ident),+ $(,)?) => {
        $(
            if $top.$field.is_some() {
                $base.$field = $top.$field;
            }
        )+
    };
}

impl Settings {
    /// Replaces every field `top` sets.
    pub fn overlay(&mut self, top: &Settings) {
        overlay_fields!(
            self,
            top,
            bullet,
            bullet_other,
            bullet_ordered,
            bullet_ordered_other,
            emphasis,
            strong,
            fence,
            fences,
            quote,
            rule,
            rule_repetition,
            rule_spaces,
            close_atx,
            setext,
            list_item_indent,
            increment_list_marker,
            resource_link,
            tight_definitions,
        );
    }

    /// Checks every stylistic choice up front.
    pub fn validate(&self) -> Result<(), OptionsError> {
        self.check_bullet_other()?;
        self.check_bullet_ordered_other()?;
        self.check_emphasis()?;
        self.check_strong()?;
        self.check_fence()?;
        self.check_quote()?;
        self.check_rule()?;
        self.check_rule_repetition()?;
        Ok(())
    }

    pub fn check_bullet(&self) -> Result<char, OptionsError> {
        match self.bullet.unwrap_or('*') {
            marker @ ('*' | '+' | '-') => Ok(marker),
            other => Err(OptionsError::Bullet(other)),
        }
    }

    pub fn check_bullet_other(&self) -> Result<char, OptionsError> {
        let bullet = self.check_bullet()?;
        let Some(other) = self.bullet_other else {
            return Ok(if bullet == '*' { '-' } else { '*' });
        };
        if !matches!(other, '*' | '+' | '-') {
            return Err(OptionsError::BulletOther(other));
        }
        if other == bullet {
            return Err(OptionsError::BulletNotDistinct { bullet, other });
        }
        Ok(other)
    }

    pub fn check_bullet_ordered(&self) -> Result<char, OptionsError> {
        match self.bullet_ordered.unwrap_or('.') {
            marker @ ('.' | ')') => Ok(marker),
            other => Err(OptionsError::BulletOrdered(other)),
        }
    }

    pub fn check_bullet_ordered_other(&self) -> Result<char, OptionsError> {
        let bullet = self.check_bullet_ordered()?;
        let Some(other) = self.bullet_ordered_other else {
            return Ok(if bullet == '.' { ')' } else { '.' });
        };
        if !matches!(other, '.' | ')') {
            return Err(OptionsError::BulletOrderedOther(other));
        }
        if other == bullet {
            return Err(OptionsError::BulletOrderedNotDistinct { bullet, other });
        }
        Ok(other)
    }

    pub fn check_emphasis(&self) -> Result<char, OptionsError> {
        match self.emphasis.unwrap_or('*') {
            marker @ ('*' | '_') => Ok(marker),
            other => Err(OptionsError::Emphasis(other)),
        }
    }

    pub fn check_strong(&self) -> Result<char, OptionsError> {
        match self.strong.unwrap_or('*') {
            marker @ ('*' | '_') => Ok(marker),
            other => Err(OptionsError::Strong(other)),
        }
    }

    pub fn check_fence(&self) -> Result<char, OptionsError> {
        match self.fence.unwrap_or('`') {
            marker @ ('`' | '~') => Ok(marker),
            other => Err(OptionsError::Fence(other)),
        }
    }

    pub fn check_quote(&self) -> Result<char, OptionsError> {
        match self.quote.unwrap_or('"') {
            marker @ ('"' | '\'') => Ok(marker),
            other => Err(OptionsError::Quote(other)),
        }
    }

    pub fn check_rule(&self) -> Result<char, OptionsError> {
        match self.rule.unwrap_or('*') {
            marker @ ('*' | '-' | '_') => Ok(marker),
            other => Err(OptionsError::Rule(other)),
        }
    }

    pub fn check_rule_repetition(&self) -> Result<usize, OptionsError> {
        match self.rule_repetition.unwrap_or(3) {
            count if count >= 3 => Ok(count),
            count => Err(OptionsError::RuleRepetition(count)),
        }
    }

    pub fn list_item_indent(&self) -> ListItemIndent {
        self.list_item_indent.unwrap_or_default()
    }

    pub fn fences(&self) -> bool {
        self.fences.unwrap_or(false)
    }

    pub fn rule_spaces(&self) -> bool {
        self.rule_spaces.unwrap_or(false)
    }

    pub fn close_atx(&self) -> bool {
        self.close_atx.unwrap_or(false)
    }

    pub fn setext(&self) -> bool {
        self.setext.unwrap_or(false)
    }

    pub fn increment_list_marker(&self) -> bool {
        self.increment_list_marker.unwrap_or(true)
    }

    pub fn resource_link(&self) -> bool {
        self.resource_link.unwrap_or(false)
    }

    pub fn tight_definitions(&self) -> bool {
        self.tight_definitions.unwrap_or(false)
    }
}
