/// Raw HTML always starts with a tag or comment opener.
pub const PEEK: char = '<';
