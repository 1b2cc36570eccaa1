use super::UnsafePattern;
use crate::serialize::Construct::{self, *};

const FENCED_LANG: [Construct; 2] = [CodeFencedLangGraveAccent, CodeFencedLangTilde];

const SINGLE_LINE: [Construct; 6] = [
    CodeFencedLangGraveAccent,
    CodeFencedLangTilde,
    CodeFencedMetaGraveAccent,
    CodeFencedMetaTilde,
    DestinationLiteral,
    HeadingAtx,
];

/// The characters that can turn literal text into markup, and where.
pub fn default_unsafe_patterns() -> Vec<UnsafePattern> {
    let p = UnsafePattern::new;
    let spans = Construct::FULL_PHRASING_SPANS;

    vec![
        // Whitespace around line endings is eaten by the parser.
        p('\t').after(r"[\r\n]").inside([Phrasing]),
        p('\t').before(r"[\r\n]").inside([Phrasing]),
        p('\t').inside(FENCED_LANG),
        p('\r').inside(SINGLE_LINE),
        p('\n').inside(SINGLE_LINE),
        p(' ').after(r"[\r\n]").inside([Phrasing]),
        p(' ').before(r"[\r\n]").inside([Phrasing]),
        p(' ').inside(FENCED_LANG),
        // `!` before a link or reference makes it an image.
        p('!').after(r"\[").inside([Phrasing]).outside(spans.clone()),
        p('"').inside([TitleQuote]),
        p('#').at_break(),
        p('#').inside([HeadingAtx]).after(r"(?:[\r\n]|$)"),
        // Character references.
        p('&').after(r"[#A-Za-z]").inside([Phrasing]),
        p('\'').inside([TitleApostrophe]),
        p('(').inside([DestinationRaw]),
        // `](` continues a link or image.
        p('(').before(r"\]").inside([Phrasing]).outside(spans.clone()),
        // Ordered list items, or the end of a raw destination.
        p(')').at_break().before(r"[0-9]+"),
        p(')').inside([DestinationRaw]),
        // Thematic breaks, list items, emphasis, strong.
        p('*').at_break().after(r"(?:[ \t\r\n*])"),
        p('*').inside([Phrasing]).outside(spans.clone()),
        p('+').at_break().after(r"(?:[ \t\r\n])"),
        // Thematic breaks, list items, setext underlines.
        p('-').at_break().after(r"(?:[ \t\r\n-])"),
        p('.').at_break().before(r"[0-9]+").after(r"(?:[ \t\r\n]|$)"),
        // HTML, autolinks, or the end of a literal destination.
        p('<').at_break().after(r"[!/?A-Za-z]"),
        p('<')
            .after(r"[!/?A-Za-z]")
            .inside([Phrasing])
            .outside(spans.clone()),
        p('<').inside([DestinationLiteral]),
        p('=').at_break(),
        p('>').at_break(),
        p('>').inside([DestinationLiteral]),
        p('[').at_break(),
        p('[').inside([Phrasing]).outside(spans.clone()),
        p('[').inside([Label, Reference]),
        // A backslash before a line ending is a hard break. Other backslashes
        // are doubled by the escaper itself.
        p('\\').after(r"[\r\n]").inside([Phrasing]),
        p(']').inside([Label, Reference]),
        p('_').at_break(),
        p('_').inside([Phrasing]).outside(spans.clone()),
        p('`').at_break(),
        p('`').inside([CodeFencedLangGraveAccent, CodeFencedMetaGraveAccent]),
        p('`').inside([Phrasing]).outside(spans),
        p('~').at_break(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::safe::CompiledPattern;

    #[test]
    fn every_default_pattern_compiles() {
        for pattern in default_unsafe_patterns() {
            let character = pattern.character;
            assert!(
                CompiledPattern::compile(pattern).is_ok(),
                "pattern for {character:?} failed to compile"
            );
        }
    }
}
