//! Line/column bookkeeping over emitted text.
//!
//! A [`Tracker`] knows nothing about markup. It is advanced past every
//! string a handler commits to, so nested serializers can be told where in
//! the final output their first character will land, including the columns
//! taken by container prefixes (`> `, list item indents) that are only added
//! once the container finishes.

/// Where the next emitted character lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 1-indexed output line.
    pub line: usize,
    /// 1-indexed output column.
    pub column: usize,
    /// Columns every following line will be indented by enclosing containers.
    pub line_shift: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            line: 1,
            column: 1,
            line_shift: 0,
        }
    }
}

/// Advances a [`Position`] past committed text.
#[derive(Debug, Clone)]
pub struct Tracker {
    line: usize,
    column: usize,
    line_shift: usize,
}

impl Tracker {
    pub fn new(start: Position) -> Self {
        Self {
            line: start.line,
            column: start.column,
            line_shift: start.line_shift,
        }
    }

    #[must_use]
    pub fn current(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
            line_shift: self.line_shift,
        }
    }

    /// Every line after the current one gains `delta` columns of prefix.
    pub fn shift(&mut self, delta: usize) {
        self.line_shift += delta;
    }

    /// Moves past `value` and hands it back so callers can chain into their
    /// output buffer.
    pub fn advance<'a>(&mut self, value: &'a str) -> &'a str {
        let (breaks, tail) = split_line_endings(value);
        if breaks == 0 {
            self.column += tail.chars().count();
        } else {
            self.line += breaks;
            self.column = 1 + tail.chars().count() + self.line_shift;
        }
        value
    }
}

/// Counts `\r\n`, `\r` and `\n` sequences and returns the text after the last.
fn split_line_endings(value: &str) -> (usize, &str) {
    let bytes = value.as_bytes();
    let mut breaks = 0;
    let mut tail_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                breaks += 1;
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                tail_start = i;
            }
            b'\n' => {
                breaks += 1;
                i += 1;
                tail_start = i;
            }
            _ => i += 1,
        }
    }

    (breaks, &value[tail_start..])
}
