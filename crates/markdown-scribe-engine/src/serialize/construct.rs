use std::fmt;

/// A syntactic construct the serializer can be inside of.
///
/// Handlers push these onto the [`State`](super::State) stack while they
/// render; unsafe patterns are scoped by them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Construct {
    Autolink,
    Blockquote,
    CodeFenced,
    CodeFencedLangGraveAccent,
    CodeFencedLangTilde,
    CodeFencedMetaGraveAccent,
    CodeFencedMetaTilde,
    CodeIndented,
    Definition,
    DestinationLiteral,
    DestinationRaw,
    Emphasis,
    HeadingAtx,
    HeadingSetext,
    Image,
    ImageReference,
    Label,
    Link,
    LinkReference,
    List,
    ListItem,
    Paragraph,
    /// Inline content, where most escapes apply.
    Phrasing,
    Reference,
    Strong,
    TitleApostrophe,
    TitleQuote,
    /// A construct introduced by an extension.
    Custom(String),
}

impl Construct {
    /// Spans whose content is never parsed for nested inline constructs.
    pub const FULL_PHRASING_SPANS: [Construct; 6] = [
        Construct::Autolink,
        Construct::DestinationLiteral,
        Construct::DestinationRaw,
        Construct::Reference,
        Construct::TitleQuote,
        Construct::TitleApostrophe,
    ];

    pub fn name(&self) -> &str {
        match self {
            Construct::Autolink => "autolink",
            Construct::Blockquote => "blockquote",
            Construct::CodeFenced => "codeFenced",
            Construct::CodeFencedLangGraveAccent => "codeFencedLangGraveAccent",
            Construct::CodeFencedLangTilde => "codeFencedLangTilde",
            Construct::CodeFencedMetaGraveAccent => "codeFencedMetaGraveAccent",
            Construct::CodeFencedMetaTilde => "codeFencedMetaTilde",
            Construct::CodeIndented => "codeIndented",
            Construct::Definition => "definition",
            Construct::DestinationLiteral => "destinationLiteral",
            Construct::DestinationRaw => "destinationRaw",
            Construct::Emphasis => "emphasis",
            Construct::HeadingAtx => "headingAtx",
            Construct::HeadingSetext => "headingSetext",
            Construct::Image => "image",
            Construct::ImageReference => "imageReference",
            Construct::Label => "label",
            Construct::Link => "link",
            Construct::LinkReference => "linkReference",
            Construct::List => "list",
            Construct::ListItem => "listItem",
            Construct::Paragraph => "paragraph",
            Construct::Phrasing => "phrasing",
            Construct::Reference => "reference",
            Construct::Strong => "strong",
            Construct::TitleApostrophe => "titleApostrophe",
            Construct::TitleQuote => "titleQuote",
            Construct::Custom(name) => name,
        }
    }

    /// The title construct matching a quote marker.
    pub fn title(quote: char) -> Self {
        if quote == '"' {
            Construct::TitleQuote
        } else {
            Construct::TitleApostrophe
        }
    }
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
