//! The document tree consumed by the serializer.
//!
//! Nodes follow the mdast shape: every variant is tagged by `type` when
//! (de)serialized, containers own a `children` sequence and leaves carry a raw
//! `value`. The serializer only ever reads a tree; it never mutates one.

use serde::{Deserialize, Serialize};

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Root(Root),
    Paragraph(Paragraph),
    Heading(Heading),
    ThematicBreak,
    Blockquote(Blockquote),
    List(List),
    ListItem(ListItem),
    Html(Html),
    Code(Code),
    Definition(Definition),
    Text(Text),
    Emphasis(Emphasis),
    Strong(Strong),
    InlineCode(InlineCode),
    Break,
    Link(Link),
    Image(Image),
    LinkReference(LinkReference),
    ImageReference(ImageReference),
    /// A node kind the core has no built-in handler for.
    ///
    /// Dispatched by its `kind` string, so extensions can register handlers
    /// for it. An empty `kind` is not a node at all.
    Custom(Custom),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Root {
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Rank of the heading; out of range values are clamped to `1..=6`.
    #[serde(default)]
    pub depth: u8,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blockquote {
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    #[serde(default)]
    pub ordered: bool,
    /// Number of the first item of an ordered list (defaults to 1).
    #[serde(default)]
    pub start: Option<u32>,
    #[serde(default)]
    pub spread: bool,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub spread: bool,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Html {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub meta: Option<String>,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emphasis {
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strong {
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineCode {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub alt: String,
}

/// How a reference names its definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceType {
    /// `[text]`
    Shortcut,
    /// `[text][]`
    Collapsed,
    /// `[text][label]`
    #[default]
    Full,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReference {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub reference_type: ReferenceType,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReference {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub reference_type: ReferenceType,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Custom {
    pub kind: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    /// The kind name used to look up this node's handler.
    pub fn kind(&self) -> &str {
        match self {
            Node::Root(_) => "root",
            Node::Paragraph(_) => "paragraph",
            Node::Heading(_) => "heading",
            Node::ThematicBreak => "thematicBreak",
            Node::Blockquote(_) => "blockquote",
            Node::List(_) => "list",
            Node::ListItem(_) => "listItem",
            Node::Html(_) => "html",
            Node::Code(_) => "code",
            Node::Definition(_) => "definition",
            Node::Text(_) => "text",
            Node::Emphasis(_) => "emphasis",
            Node::Strong(_) => "strong",
            Node::InlineCode(_) => "inlineCode",
            Node::Break => "break",
            Node::Link(_) => "link",
            Node::Image(_) => "image",
            Node::LinkReference(_) => "linkReference",
            Node::ImageReference(_) => "imageReference",
            Node::Custom(custom) => &custom.kind,
        }
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root(n) => &n.children,
            Node::Paragraph(n) => &n.children,
            Node::Heading(n) => &n.children,
            Node::Blockquote(n) => &n.children,
            Node::List(n) => &n.children,
            Node::ListItem(n) => &n.children,
            Node::Emphasis(n) => &n.children,
            Node::Strong(n) => &n.children,
            Node::Link(n) => &n.children,
            Node::LinkReference(n) => &n.children,
            Node::Custom(n) => &n.children,
            Node::ThematicBreak
            | Node::Html(_)
            | Node::Code(_)
            | Node::Definition(_)
            | Node::Text(_)
            | Node::InlineCode(_)
            | Node::Break
            | Node::Image(_)
            | Node::ImageReference(_) => &[],
        }
    }

    /// The raw literal value of leaf nodes that carry one.
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Html(n) => Some(&n.value),
            Node::Code(n) => Some(&n.value),
            Node::Text(n) => Some(&n.value),
            Node::InlineCode(n) => Some(&n.value),
            Node::Custom(n) => n.value.as_deref(),
            _ => None,
        }
    }

    /// Whether this node is inline content.
    pub fn is_phrasing(&self) -> bool {
        matches!(
            self,
            Node::Break
                | Node::Emphasis(_)
                | Node::Image(_)
                | Node::ImageReference(_)
                | Node::InlineCode(_)
                | Node::Link(_)
                | Node::LinkReference(_)
                | Node::Strong(_)
                | Node::Text(_)
        )
    }

    /// Whether a list's or list item's `spread` field applies to the joins
    /// between this node's children.
    pub fn spread(&self) -> Option<bool> {
        match self {
            Node::List(list) => Some(list.spread),
            Node::ListItem(item) => Some(item.spread),
            _ => None,
        }
    }

    /// Concatenated text content: literal values plus image alt text.
    pub fn to_plain_string(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Image(image) => out.push_str(&image.alt),
            Node::ImageReference(image) => out.push_str(&image.alt),
            node => match node.value() {
                Some(value) => out.push_str(value),
                None => node.children().iter().for_each(|child| child.collect_text(out)),
            },
        }
    }
}

/// Shorthand constructors used by the parser adapter and tests.
impl Node {
    pub fn root(children: Vec<Node>) -> Self {
        Node::Root(Root { children })
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(Paragraph { children })
    }

    pub fn heading(depth: u8, children: Vec<Node>) -> Self {
        Node::Heading(Heading { depth, children })
    }

    pub fn blockquote(children: Vec<Node>) -> Self {
        Node::Blockquote(Blockquote { children })
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text {
            value: value.into(),
        })
    }

    pub fn emphasis(children: Vec<Node>) -> Self {
        Node::Emphasis(Emphasis { children })
    }

    pub fn strong(children: Vec<Node>) -> Self {
        Node::Strong(Strong { children })
    }

    pub fn inline_code(value: impl Into<String>) -> Self {
        Node::InlineCode(InlineCode {
            value: value.into(),
        })
    }

    pub fn html(value: impl Into<String>) -> Self {
        Node::Html(Html {
            value: value.into(),
        })
    }

    pub fn code(value: impl Into<String>) -> Self {
        Node::Code(Code {
            value: value.into(),
            ..Code::default()
        })
    }

    pub fn list_item(children: Vec<Node>) -> Self {
        Node::ListItem(ListItem {
            spread: false,
            children,
        })
    }

    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Link(Link {
            url: url.into(),
            title: None,
            children,
        })
    }
}
