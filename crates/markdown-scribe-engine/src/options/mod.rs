//! Serializer configuration.
//!
//! [`Settings`] holds the stylistic choices (markers, toggles); [`Options`]
//! adds the registry extension points (node handlers, unsafe patterns, join
//! rules) and nested extensions. Layers are combined by [`Registry::configure`].
//!
//! ## Modules
//!
//! - [`settings`]: stylistic choices and their validation

pub mod settings;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub use settings::{ListItemIndent, Settings};

use crate::ast::Node;
use crate::serialize::{Join, JoinRule, NodeHandler, State, UnsafePattern};

/// Options for one serialization, or one extension layer of them.
#[derive(Clone, Default)]
pub struct Options {
    pub settings: Settings,
    pub handlers: HashMap<String, Rc<dyn NodeHandler>>,
    pub unsafe_patterns: Vec<UnsafePattern>,
    pub join: Vec<JoinRule>,
    /// Applied before this layer's own fields, which therefore win.
    pub extensions: Vec<Options>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Registers `handler` for nodes of `kind`, replacing any earlier one.
    #[must_use]
    pub fn handler(mut self, kind: impl Into<String>, handler: impl NodeHandler + 'static) -> Self {
        self.handlers.insert(kind.into(), Rc::new(handler));
        self
    }

    #[must_use]
    pub fn unsafe_pattern(mut self, pattern: UnsafePattern) -> Self {
        self.unsafe_patterns.push(pattern);
        self
    }

    /// Adds a join rule; rules added later are consulted first.
    #[must_use]
    pub fn join_rule(
        mut self,
        rule: impl Fn(&Node, &Node, &Node, &State) -> Option<Join> + 'static,
    ) -> Self {
        self.join.push(Rc::new(rule));
        self
    }

    #[must_use]
    pub fn extension(mut self, extension: Options) -> Self {
        self.extensions.push(extension);
        self
    }
}

impl From<Settings> for Options {
    fn from(settings: Settings) -> Self {
        Options::new().with_settings(settings)
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.handlers.keys().collect();
        kinds.sort();
        f.debug_struct("Options")
            .field("settings", &self.settings)
            .field("handlers", &kinds)
            .field("unsafe_patterns", &self.unsafe_patterns)
            .field("join", &self.join.len())
            .field("extensions", &self.extensions)
            .finish()
    }
}

/// Everything the layers resolve to.
#[derive(Clone, Default)]
pub struct Registry {
    pub settings: Settings,
    pub handlers: HashMap<String, Rc<dyn NodeHandler>>,
    pub unsafe_patterns: Vec<UnsafePattern>,
    pub join: Vec<JoinRule>,
}

impl Registry {
    /// Applies `options` on top of what is already registered.
    ///
    /// Precedence, highest first: a layer's own fields, its first-listed
    /// extension, later extensions, their nested extensions. Unsafe patterns
    /// and join rules accumulate in application order, so higher-precedence
    /// join rules are consulted first.
    pub fn configure(&mut self, options: &Options) {
        for extension in options.extensions.iter().rev() {
            self.configure(extension);
        }

        self.settings.overlay(&options.settings);
        self.unsafe_patterns
            .extend(options.unsafe_patterns.iter().cloned());
        self.join.extend(options.join.iter().cloned());
        for (kind, handler) in &options.handlers {
            self.handlers.insert(kind.clone(), Rc::clone(handler));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strong(marker: char) -> Settings {
        Settings {
            strong: Some(marker),
            ..Settings::default()
        }
    }

    #[test]
    fn own_fields_beat_extensions() {
        let options = Options::from(strong('*')).extension(strong('_').into());
        let mut registry = Registry::default();
        registry.configure(&options);
        assert_eq!(registry.settings.strong, Some('*'));
    }

    #[test]
    fn extensions_beat_their_nested_extensions() {
        let options =
            Options::new().extension(Options::from(strong('*')).extension(strong('_').into()));
        let mut registry = Registry::default();
        registry.configure(&options);
        assert_eq!(registry.settings.strong, Some('*'));
    }

    #[test]
    fn first_listed_extension_wins() {
        let options = Options::new()
            .extension(strong('_').into())
            .extension(strong('*').into());
        let mut registry = Registry::default();
        registry.configure(&options);
        assert_eq!(registry.settings.strong, Some('_'));
    }

    #[test]
    fn patterns_accumulate() {
        let options = Options::new()
            .unsafe_pattern(UnsafePattern::new('a'))
            .extension(Options::new().unsafe_pattern(UnsafePattern::new('b')));
        let mut registry = Registry::default();
        registry.configure(&options);
        let characters: Vec<_> = registry
            .unsafe_patterns
            .iter()
            .map(|p| p.character)
            .collect();
        assert_eq!(characters, vec!['b', 'a']);
    }
}
