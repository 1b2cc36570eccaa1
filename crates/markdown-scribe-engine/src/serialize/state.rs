//! The context threaded through one serialization.

use std::collections::HashMap;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use crate::ast::Node;
use crate::error::SerializeError;
use crate::options::{Options, Registry, Settings};
use crate::serialize::handle::builtin_handlers;
use crate::serialize::join::{JoinRule, default_join_rules, join_definitions};
use crate::serialize::safe::{CompiledPattern, default_unsafe_patterns};
use crate::serialize::{Construct, NodeHandler, Position};

/// Where a node's output lands and what surrounds it.
///
/// `before` and `after` are the characters (or stand-ins like `"\n"`)
/// directly outside the node's output, used for escaping decisions.
#[derive(Debug, Clone, Copy)]
pub struct Info<'a> {
    pub before: &'a str,
    pub after: &'a str,
    pub position: Position,
}

impl<'a> Info<'a> {
    pub fn new(before: &'a str, after: &'a str, position: Position) -> Self {
        Self {
            before,
            after,
            position,
        }
    }
}

/// Mutable state of one serialization.
///
/// Created fresh for every call to [`to_markdown`](super::to_markdown) from
/// the resolved [`Options`].
pub struct State {
    pub(crate) stack: Vec<Construct>,
    pub(crate) index_stack: Vec<usize>,
    pub settings: Settings,
    handlers: HashMap<String, Rc<dyn NodeHandler>>,
    unsafe_patterns: Vec<CompiledPattern>,
    join: Vec<JoinRule>,
    /// Marker the list being rendered uses for its items.
    pub(crate) bullet_current: Option<char>,
    /// Marker of the previous sibling list, if the previous sibling was one.
    pub(crate) bullet_last_used: Option<char>,
}

impl State {
    /// Resolves `options` on top of the built-in handlers, patterns and join
    /// rules, and validates the stylistic settings.
    pub fn new(options: &Options) -> Result<Self, SerializeError> {
        let mut registry = Registry {
            settings: Settings::default(),
            handlers: builtin_handlers(),
            unsafe_patterns: default_unsafe_patterns(),
            join: default_join_rules(),
        };
        registry.configure(options);

        // Consulted last, so list spread and custom rules still win.
        if registry.settings.tight_definitions() {
            registry.join.insert(0, Rc::new(join_definitions));
        }
        registry.settings.validate()?;

        let unsafe_patterns = registry
            .unsafe_patterns
            .into_iter()
            .map(CompiledPattern::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            stack: Vec::new(),
            index_stack: Vec::new(),
            settings: registry.settings,
            handlers: registry.handlers,
            unsafe_patterns,
            join: registry.join,
            bullet_current: None,
            bullet_last_used: None,
        })
    }

    /// Constructs currently open, outermost first.
    pub fn stack(&self) -> &[Construct] {
        &self.stack
    }

    /// Index of the child being rendered, per open container.
    pub fn index_stack(&self) -> &[usize] {
        &self.index_stack
    }

    pub fn unsafe_patterns(&self) -> &[CompiledPattern] {
        &self.unsafe_patterns
    }

    pub fn join_rules(&self) -> &[JoinRule] {
        &self.join
    }

    /// Opens `construct` until the returned guard is dropped.
    pub fn enter(&mut self, construct: Construct) -> Exit<'_> {
        log::trace!("enter {construct}");
        self.stack.push(construct);
        Exit { state: self }
    }

    /// Hides every open construct until the returned guard is dropped.
    ///
    /// Used for text whose escaping must not depend on where it sits, like
    /// autolinks and reference labels.
    pub fn isolate(&mut self) -> Isolated<'_> {
        let saved = mem::take(&mut self.stack);
        Isolated { state: self, saved }
    }

    /// Serializes `node` with the handler registered for its kind.
    pub fn handle(
        &mut self,
        node: &Node,
        parent: Option<&Node>,
        info: &Info<'_>,
    ) -> Result<String, SerializeError> {
        let handler = self.handler(node)?;
        log::trace!(
            "handle {} at {}:{}",
            node.kind(),
            info.position.line,
            info.position.column
        );
        handler.handle(node, parent, self, info)
    }

    /// The first character `node` would serialize to.
    ///
    /// Uses the handler's cheap peek when it has one and renders the node
    /// otherwise. Nodes without a handler peek as nothing; they fail once
    /// they are handled for real.
    pub fn peek(
        &mut self,
        node: &Node,
        parent: Option<&Node>,
        info: &Info<'_>,
    ) -> Result<Option<char>, SerializeError> {
        let Ok(handler) = self.handler(node) else {
            return Ok(None);
        };
        match handler.peek(node, self)? {
            Some(character) => Ok(Some(character)),
            None => Ok(handler.handle(node, parent, self, info)?.chars().next()),
        }
    }

    fn handler(&self, node: &Node) -> Result<Rc<dyn NodeHandler>, SerializeError> {
        let kind = node.kind();
        if kind.is_empty() {
            return Err(SerializeError::InvalidNode(format!("{node:?}")));
        }
        self.handlers
            .get(kind)
            .cloned()
            .ok_or_else(|| SerializeError::UnknownNode(kind.to_string()))
    }
}

/// Closes a construct opened with [`State::enter`] when dropped.
pub struct Exit<'a> {
    state: &'a mut State,
}

impl Deref for Exit<'_> {
    type Target = State;

    fn deref(&self) -> &State {
        self.state
    }
}

impl DerefMut for Exit<'_> {
    fn deref_mut(&mut self) -> &mut State {
        self.state
    }
}

impl Drop for Exit<'_> {
    fn drop(&mut self) {
        if let Some(construct) = self.state.stack.pop() {
            log::trace!("exit {construct}");
        }
    }
}

/// Restores the constructs hidden by [`State::isolate`] when dropped.
pub struct Isolated<'a> {
    state: &'a mut State,
    saved: Vec<Construct>,
}

impl Deref for Isolated<'_> {
    type Target = State;

    fn deref(&self) -> &State {
        self.state
    }
}

impl DerefMut for Isolated<'_> {
    fn deref_mut(&mut self) -> &mut State {
        self.state
    }
}

impl Drop for Isolated<'_> {
    fn drop(&mut self) {
        self.state.stack = mem::take(&mut self.saved);
    }
}
