//! Per-kind node handlers.
//!
//! Every node kind is serialized by a [`NodeHandler`] looked up by
//! [`Node::kind`]. The built-in kinds are covered by [`Builtin`]; extensions
//! register their own handlers (any matching closure works) to override
//! those or to serialize [`Node::Custom`] kinds.
//!
//! ## Modules
//!
//! One module per node kind, each owning that kind's markers and layout.

pub mod blockquote;
pub mod code;
pub mod definition;
pub mod emphasis;
pub mod hard_break;
pub mod heading;
pub mod html;
pub mod image;
pub mod image_reference;
pub mod inline_code;
pub mod link;
pub mod link_reference;
pub mod list;
pub mod list_item;
pub mod paragraph;
pub mod root;
pub mod strong;
pub mod text;
pub mod thematic_break;

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::Node;
use crate::error::SerializeError;
use crate::serialize::{Info, State};

/// Serializes one kind of node.
pub trait NodeHandler {
    fn handle(
        &self,
        node: &Node,
        parent: Option<&Node>,
        state: &mut State,
        info: &Info<'_>,
    ) -> Result<String, SerializeError>;

    /// The first character [`handle`](Self::handle) would produce, when it
    /// is known without rendering.
    fn peek(&self, _node: &Node, _state: &State) -> Result<Option<char>, SerializeError> {
        Ok(None)
    }
}

impl<F> NodeHandler for F
where
    F: Fn(&Node, Option<&Node>, &mut State, &Info<'_>) -> Result<String, SerializeError>,
{
    fn handle(
        &self,
        node: &Node,
        parent: Option<&Node>,
        state: &mut State,
        info: &Info<'_>,
    ) -> Result<String, SerializeError> {
        self(node, parent, state, info)
    }
}

/// The handlers for the node kinds the tree model defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Blockquote,
    Break,
    Code,
    Definition,
    Emphasis,
    Heading,
    Html,
    Image,
    ImageReference,
    InlineCode,
    Link,
    LinkReference,
    List,
    ListItem,
    Paragraph,
    Root,
    Strong,
    Text,
    ThematicBreak,
}

impl Builtin {
    pub const ALL: [Builtin; 19] = [
        Builtin::Blockquote,
        Builtin::Break,
        Builtin::Code,
        Builtin::Definition,
        Builtin::Emphasis,
        Builtin::Heading,
        Builtin::Html,
        Builtin::Image,
        Builtin::ImageReference,
        Builtin::InlineCode,
        Builtin::Link,
        Builtin::LinkReference,
        Builtin::List,
        Builtin::ListItem,
        Builtin::Paragraph,
        Builtin::Root,
        Builtin::Strong,
        Builtin::Text,
        Builtin::ThematicBreak,
    ];

    /// The node kind this handler is registered for.
    pub fn kind(self) -> &'static str {
        match self {
            Builtin::Blockquote => "blockquote",
            Builtin::Break => "break",
            Builtin::Code => "code",
            Builtin::Definition => "definition",
            Builtin::Emphasis => "emphasis",
            Builtin::Heading => "heading",
            Builtin::Html => "html",
            Builtin::Image => "image",
            Builtin::ImageReference => "imageReference",
            Builtin::InlineCode => "inlineCode",
            Builtin::Link => "link",
            Builtin::LinkReference => "linkReference",
            Builtin::List => "list",
            Builtin::ListItem => "listItem",
            Builtin::Paragraph => "paragraph",
            Builtin::Root => "root",
            Builtin::Strong => "strong",
            Builtin::Text => "text",
            Builtin::ThematicBreak => "thematicBreak",
        }
    }
}

impl NodeHandler for Builtin {
    fn handle(
        &self,
        node: &Node,
        parent: Option<&Node>,
        state: &mut State,
        info: &Info<'_>,
    ) -> Result<String, SerializeError> {
        match (self, node) {
            (Builtin::Blockquote, Node::Blockquote(_)) => blockquote::blockquote(node, state, info),
            (Builtin::Break, Node::Break) => Ok(hard_break::hard_break(state, info)),
            (Builtin::Code, Node::Code(code)) => code::code(code, state, info),
            (Builtin::Definition, Node::Definition(definition)) => {
                definition::definition(definition, state, info)
            }
            (Builtin::Emphasis, Node::Emphasis(_)) => emphasis::emphasis(node, state, info),
            (Builtin::Heading, Node::Heading(heading)) => {
                heading::heading(node, heading.depth, state, info)
            }
            (Builtin::Html, Node::Html(html)) => Ok(html.value.clone()),
            (Builtin::Image, Node::Image(image)) => image::image(image, state, info),
            (Builtin::ImageReference, Node::ImageReference(image)) => {
                image_reference::image_reference(image, state, info)
            }
            (Builtin::InlineCode, Node::InlineCode(code)) => {
                Ok(inline_code::inline_code(&code.value, state))
            }
            (Builtin::Link, Node::Link(link)) => link::link(node, link, state, info),
            (Builtin::LinkReference, Node::LinkReference(reference)) => {
                link_reference::link_reference(node, reference, state, info)
            }
            (Builtin::List, Node::List(list)) => list::list(node, list, parent, state, info),
            (Builtin::ListItem, Node::ListItem(item)) => {
                list_item::list_item(node, item, parent, state, info)
            }
            (Builtin::Paragraph, Node::Paragraph(_)) => paragraph::paragraph(node, state, info),
            (Builtin::Root, Node::Root(_)) => root::root(node, state, info),
            (Builtin::Strong, Node::Strong(_)) => strong::strong(node, state, info),
            (Builtin::Text, Node::Text(text)) => Ok(text::text(&text.value, state, info)),
            (Builtin::ThematicBreak, Node::ThematicBreak) => thematic_break::thematic_break(state),
            (handler, node) => Err(SerializeError::mismatched(handler.kind(), node)),
        }
    }

    fn peek(&self, node: &Node, state: &State) -> Result<Option<char>, SerializeError> {
        let character = match (self, node) {
            (Builtin::Emphasis, _) => state.settings.check_emphasis()?,
            (Builtin::Strong, _) => state.settings.check_strong()?,
            (Builtin::Html, _) => html::PEEK,
            (Builtin::Image | Builtin::ImageReference, _) => image::PEEK,
            (Builtin::InlineCode, _) => inline_code::PEEK,
            (Builtin::Link, Node::Link(link)) => link::peek(link, state),
            (Builtin::LinkReference, _) => link_reference::PEEK,
            _ => return Ok(None),
        };
        Ok(Some(character))
    }
}

/// Every [`Builtin`] keyed by the node kind it serializes.
pub fn builtin_handlers() -> HashMap<String, Rc<dyn NodeHandler>> {
    Builtin::ALL
        .into_iter()
        .map(|builtin| {
            let handler: Rc<dyn NodeHandler> = Rc::new(builtin);
            (builtin.kind().to_string(), handler)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Custom;
    use crate::options::Options;
    use crate::serialize::Position;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_kinds_match_node_kinds() {
        let handlers = builtin_handlers();
        for kind in [
            "root",
            "paragraph",
            "heading",
            "thematicBreak",
            "blockquote",
            "list",
            "listItem",
            "html",
            "code",
            "definition",
            "text",
            "emphasis",
            "strong",
            "inlineCode",
            "break",
            "link",
            "image",
            "linkReference",
            "imageReference",
        ] {
            assert!(handlers.contains_key(kind), "no handler for {kind}");
        }
        assert_eq!(handlers.len(), Builtin::ALL.len());
    }

    #[test]
    fn builtin_rejects_other_kinds() {
        let mut state = State::new(&Options::default()).unwrap();
        let err = Builtin::Heading
            .handle(
                &Node::text("a"),
                None,
                &mut state,
                &Info::new("\n", "\n", Position::default()),
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "Handler for `heading` was given a `text` node");
    }

    #[test]
    fn closures_serialize_custom_kinds() {
        let options = Options::new().handler(
            "toml",
            |node: &Node,
             _: Option<&Node>,
             _: &mut State,
             _: &Info<'_>|
             -> Result<String, SerializeError> {
                Ok(format!("+++\n{}\n+++", node.value().unwrap_or_default()))
            },
        );
        let node = Node::root(vec![Node::Custom(Custom {
            kind: "toml".to_string(),
            value: Some("a = 1".to_string()),
            children: Vec::new(),
        })]);
        assert_eq!(
            crate::to_markdown(&node, &options).unwrap(),
            "+++\na = 1\n+++\n"
        );
    }
}
