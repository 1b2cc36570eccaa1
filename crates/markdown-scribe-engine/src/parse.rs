//! Building a document tree from Markdown with pulldown-cmark.
//!
//! Only CommonMark is recognised. Link reference definitions are reported
//! by pulldown-cmark separately from the event stream; they are placed back
//! at the top level in source order.

use pulldown_cmark::{
    CodeBlockKind, CowStr, Event, LinkType, Options as ParseOptions, Parser, Tag, TagEnd,
};

use crate::ast::{
    Code, Definition, Html, Image, ImageReference, Link, LinkReference, List, ListItem, Node,
    ReferenceType,
};

/// Parses `input` into a root node.
pub fn from_markdown(input: &str) -> Node {
    let parser = Parser::new_ext(input, ParseOptions::empty());

    let mut definitions: Vec<(usize, Node)> = parser
        .reference_definitions()
        .iter()
        .map(|(label, definition)| {
            let node = Node::Definition(Definition {
                identifier: normalize_identifier(label),
                label: Some(label.to_string()),
                url: definition.dest.to_string(),
                title: definition.title.as_ref().map(|title| title.to_string()),
            });
            (definition.span.start, node)
        })
        .collect();
    definitions.sort_by_key(|(start, _)| *start);
    let mut definitions = definitions.into_iter().peekable();

    let mut builder = TreeBuilder::new();
    for (event, range) in parser.into_offset_iter() {
        if builder.at_top_level() && matches!(event, Event::Start(_) | Event::Rule) {
            while let Some((_, definition)) =
                definitions.next_if(|(start, _)| *start < range.start)
            {
                builder.push(definition);
            }
        }
        builder.event(event);
    }
    definitions.for_each(|(_, definition)| builder.push(definition));

    builder.finish()
}

/// Case-folded label with inner whitespace collapsed.
fn normalize_identifier(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn reference_type(link_type: LinkType) -> Option<ReferenceType> {
    match link_type {
        LinkType::Reference => Some(ReferenceType::Full),
        LinkType::Collapsed => Some(ReferenceType::Collapsed),
        LinkType::Shortcut => Some(ReferenceType::Shortcut),
        _ => None,
    }
}

fn non_empty(value: CowStr<'_>) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn strip_final_line_ending(mut value: String) -> String {
    if value.ends_with("\r\n") {
        value.truncate(value.len() - 2);
    } else if value.ends_with(['\n', '\r']) {
        value.truncate(value.len() - 1);
    }
    value
}

enum Frame {
    Root,
    /// `implicit` paragraphs wrap the bare inline content of tight items.
    Paragraph {
        implicit: bool,
    },
    Heading(u8),
    Blockquote,
    Code {
        lang: Option<String>,
        meta: Option<String>,
        value: String,
    },
    Html(String),
    List {
        start: Option<u64>,
    },
    Item {
        spread: bool,
    },
    Emphasis,
    Strong,
    Link {
        url: String,
        title: Option<String>,
    },
    LinkReference {
        label: String,
        reference_type: ReferenceType,
    },
    Image {
        url: String,
        title: Option<String>,
    },
    ImageReference {
        label: String,
        reference_type: ReferenceType,
    },
    /// Tags of disabled extensions; their children go to the parent.
    Transparent,
}

struct TreeBuilder {
    frames: Vec<(Frame, Vec<Node>)>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            frames: vec![(Frame::Root, Vec::new())],
        }
    }

    fn at_top_level(&self) -> bool {
        self.frames.len() == 1
    }

    fn push(&mut self, node: Node) {
        if let Some((_, children)) = self.frames.last_mut() {
            children.push(node);
        }
    }

    fn push_text(&mut self, text: &str) {
        match self.frames.last_mut() {
            Some((Frame::Code { value, .. } | Frame::Html(value), _)) => value.push_str(text),
            Some((_, children)) => match children.last_mut() {
                Some(Node::Text(last)) => last.value.push_str(text),
                _ => children.push(Node::text(text)),
            },
            None => {}
        }
    }

    fn open(&mut self, frame: Frame) {
        self.frames.push((frame, Vec::new()));
    }

    /// Inline content directly inside an item belongs to a paragraph.
    fn ensure_inline_parent(&mut self) {
        if matches!(self.frames.last(), Some((Frame::Item { .. }, _))) {
            self.open(Frame::Paragraph { implicit: true });
        }
    }

    fn close_implicit_paragraph(&mut self) {
        if matches!(
            self.frames.last(),
            Some((Frame::Paragraph { implicit: true }, _))
        ) {
            self.close();
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(TagEnd::Paragraph) => self.close(),
            Event::End(_) => {
                self.close_implicit_paragraph();
                self.close();
            }
            Event::Text(text) => {
                self.ensure_inline_parent();
                self.push_text(&text);
            }
            Event::Code(code) => {
                self.ensure_inline_parent();
                self.push(Node::inline_code(code.to_string()));
            }
            Event::Html(html) => self.push_text(&html),
            Event::InlineHtml(html) => {
                self.ensure_inline_parent();
                self.push(Node::html(html.to_string()));
            }
            Event::SoftBreak => {
                self.ensure_inline_parent();
                self.push_text("\n");
            }
            Event::HardBreak => {
                self.ensure_inline_parent();
                self.push(Node::Break);
            }
            Event::Rule => {
                self.close_implicit_paragraph();
                self.push(Node::ThematicBreak);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let block = matches!(
            tag,
            Tag::Paragraph
                | Tag::Heading { .. }
                | Tag::BlockQuote(_)
                | Tag::CodeBlock(_)
                | Tag::HtmlBlock
                | Tag::List(_)
                | Tag::Item
        );
        if block {
            self.close_implicit_paragraph();
        } else {
            self.ensure_inline_parent();
        }

        let frame = match tag {
            Tag::Paragraph => {
                if let Some((Frame::Item { spread }, _)) = self.frames.last_mut() {
                    *spread = true;
                }
                Frame::Paragraph { implicit: false }
            }
            Tag::Heading { level, .. } => Frame::Heading(level as u8),
            Tag::BlockQuote(_) => Frame::Blockquote,
            Tag::CodeBlock(kind) => {
                let (lang, meta) = match kind {
                    CodeBlockKind::Fenced(info) => split_info_string(&info),
                    CodeBlockKind::Indented => (None, None),
                };
                Frame::Code {
                    lang,
                    meta,
                    value: String::new(),
                }
            }
            Tag::HtmlBlock => Frame::Html(String::new()),
            Tag::List(start) => Frame::List { start },
            Tag::Item => Frame::Item { spread: false },
            Tag::Emphasis => Frame::Emphasis,
            Tag::Strong => Frame::Strong,
            Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            } => match reference_type(link_type) {
                Some(reference_type) => Frame::LinkReference {
                    label: id.to_string(),
                    reference_type,
                },
                None => {
                    let url = if link_type == LinkType::Email {
                        format!("mailto:{dest_url}")
                    } else {
                        dest_url.to_string()
                    };
                    Frame::Link {
                        url,
                        title: non_empty(title),
                    }
                }
            },
            Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            } => match reference_type(link_type) {
                Some(reference_type) => Frame::ImageReference {
                    label: id.to_string(),
                    reference_type,
                },
                None => Frame::Image {
                    url: dest_url.to_string(),
                    title: non_empty(title),
                },
            },
            _ => Frame::Transparent,
        };
        self.open(frame);
    }

    fn close(&mut self) {
        if self.at_top_level() {
            return;
        }
        let Some((frame, children)) = self.frames.pop() else {
            return;
        };

        let node = match frame {
            Frame::Root => Node::root(children),
            Frame::Transparent => {
                children.into_iter().for_each(|child| self.push(child));
                return;
            }
            Frame::Paragraph { .. } => Node::paragraph(children),
            Frame::Heading(depth) => Node::heading(depth, children),
            Frame::Blockquote => Node::blockquote(children),
            Frame::Code { lang, meta, value } => Node::Code(Code {
                lang,
                meta,
                value: strip_final_line_ending(value),
            }),
            Frame::Html(value) => Node::Html(Html {
                value: strip_final_line_ending(value),
            }),
            Frame::List { start } => {
                let spread = children
                    .iter()
                    .any(|item| item.spread().unwrap_or(false));
                Node::List(List {
                    ordered: start.is_some(),
                    start: start.and_then(|start| u32::try_from(start).ok()),
                    spread,
                    children,
                })
            }
            Frame::Item { spread } => Node::ListItem(ListItem { spread, children }),
            Frame::Emphasis => Node::emphasis(children),
            Frame::Strong => Node::strong(children),
            Frame::Link { url, title } => Node::Link(Link {
                url,
                title,
                children,
            }),
            Frame::LinkReference {
                label,
                reference_type,
            } => Node::LinkReference(LinkReference {
                identifier: normalize_identifier(&label),
                label: Some(label),
                reference_type,
                children,
            }),
            Frame::Image { url, title } => Node::Image(Image {
                url,
                title,
                alt: Node::root(children).to_plain_string(),
            }),
            Frame::ImageReference {
                label,
                reference_type,
            } => Node::ImageReference(ImageReference {
                identifier: normalize_identifier(&label),
                label: Some(label),
                reference_type,
                alt: Node::root(children).to_plain_string(),
            }),
        };
        self.push(node);
    }

    fn finish(mut self) -> Node {
        while !self.at_top_level() {
            self.close();
        }
        match self.frames.pop() {
            Some((_, children)) => Node::root(children),
            None => Node::root(Vec::new()),
        }
    }
}

/// Splits a fence info string into its first word and the rest.
fn split_info_string(info: &str) -> (Option<String>, Option<String>) {
    let info = info.trim();
    if info.is_empty() {
        return (None, None);
    }
    match info.split_once([' ', '\t']) {
        Some((lang, meta)) => {
            let meta = meta.trim();
            (
                Some(lang.to_string()),
                (!meta.is_empty()).then(|| meta.to_string()),
            )
        }
        None => (Some(info.to_string()), None),
    }
}
