//! Recognition of inline markup: escapes, font markers, code spans and links.
//!
//! [`recognize`] classifies the construct at a byte offset without side effects; the
//! scanner decides what to do with it. [`render_fragment`] applies the same rules to a
//! detached piece of text such as a header title.

use crate::dialect::Macros;
use crate::event::{Event, Font};
use crate::options::EmphasisMarkers;
use crate::state::FontState;

/// Characters after which a font marker may open.
const OPENERS: &str = "({[,.;`'\" \t\n\r";

/// Characters kept in front of a link's closing directive.
const LINK_PUNCT: &str = ".,)]}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A single character, possibly produced by an escape.
    Char(char),
    /// Source text copied as is.
    Literal(&'a str),
    /// A bold or italic marker; `marker` is the source text it covers.
    Marker { font: Font, marker: &'a str },
    /// Contents of a back-tick span.
    Code(&'a str),
    /// A back-tick with no closing partner.
    UnclosedCode,
    Link(LinkMatch<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkMatch<'a> {
    pub title: &'a str,
    pub target: &'a str,
    pub punct: Option<char>,
}

impl<'a> LinkMatch<'a> {
    /// A link whose target is `man` is a manual page reference: `[page section](man)`.
    pub fn event(&self) -> Event<'a> {
        if self.target == "man" {
            let title = self.title.trim();
            let (page, section) = match title.split_once(' ') {
                Some((page, section)) => (page, Some(section.trim())),
                None => (title, None),
            };
            Event::ManRef {
                page,
                section,
                punct: self.punct,
            }
        } else {
            Event::Link {
                title: self.title,
                target: self.target,
                punct: self.punct,
            }
        }
    }
}

/// Classifies the construct at `pos`. Returns the token and the bytes it covers, which
/// is never zero while `pos` is inside `src`.
pub fn recognize(
    src: &str,
    pos: usize,
    markers: EmphasisMarkers,
    links: bool,
) -> (Token<'_>, usize) {
    let rest = &src[pos..];
    let Some(ch) = rest.chars().next() else {
        return (Token::Literal(""), 0);
    };

    match ch {
        '\\' => escape(rest),
        '*' | '_' => {
            let doubled = rest[1..].starts_with(ch);
            let len = if doubled { 2 } else { 1 };
            let font = match (markers, ch) {
                (EmphasisMarkers::Standard, _) if doubled => Font::Bold,
                (EmphasisMarkers::Standard, _) => Font::Italic,
                (EmphasisMarkers::Alternate, '*') => Font::Bold,
                (EmphasisMarkers::Alternate, _) => Font::Italic,
            };
            (
                Token::Marker {
                    font,
                    marker: &rest[..len],
                },
                len,
            )
        }
        '`' => match rest[1..].find('`') {
            Some(end) => (Token::Code(&rest[1..1 + end]), end + 2),
            None => (Token::UnclosedCode, 1),
        },
        '[' if rest[1..].starts_with('^') => (Token::Literal(&rest[..2]), 2),
        '[' if links => link(rest, 0).unwrap_or((Token::Char('['), 1)),
        '!' if links && rest[1..].starts_with('[') => {
            link(rest, 1).unwrap_or((Token::Char('!'), 1))
        }
        _ => (Token::Char(ch), ch.len_utf8()),
    }
}

fn escape(rest: &str) -> (Token<'_>, usize) {
    let Some(next) = rest[1..].chars().next() else {
        return (Token::Char('\\'), 1);
    };
    let mapped = match next {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'f' => '\x0c',
        'b' => '\x08',
        'a' => '\x07',
        'e' => '\x1b',
        other => other,
    };
    (Token::Char(mapped), 1 + next.len_utf8())
}

/// `[title](target)` with `skip` leading bytes before the bracket.
fn link(rest: &str, skip: usize) -> Option<(Token<'_>, usize)> {
    let open = skip + 1;
    let close = open + rest[open..].find(']')?;
    if !rest[close + 1..].starts_with('(') {
        return None;
    }
    let target_start = close + 2;
    let target_end = target_start + rest[target_start..].find(')')?;
    let mut len = target_end + 1;
    let punct = rest[len..].chars().next().filter(|ch| LINK_PUNCT.contains(*ch));
    if punct.is_some() {
        len += 1;
    }
    Some((
        Token::Link(LinkMatch {
            title: &rest[open..close],
            target: &rest[target_start..target_end],
            punct,
        }),
        len,
    ))
}

/// Text to append for a font marker, updating `fonts`.
///
/// An open font is always closed. Opening needs `prev`, the source character before the
/// marker, to be absent or one of the opening characters; after `,`, `;` or `.` a blank
/// is inserted first. A marker that can do neither stays literal.
pub fn marker_text(
    fonts: &mut FontState,
    font: Font,
    marker: &str,
    prev: Option<char>,
    macros: &dyn Macros,
) -> String {
    let open = match font {
        Font::Bold => &mut fonts.bold_open,
        _ => &mut fonts.italic_open,
    };
    if *open {
        *open = false;
        return macros.font(Font::Previous).to_string();
    }
    let prev = prev.unwrap_or(' ');
    if !OPENERS.contains(prev) {
        return marker.to_string();
    }
    *open = true;
    let mut text = String::new();
    if matches!(prev, ';' | ',' | '.') {
        text.push(' ');
    }
    text.push_str(macros.font(font));
    text
}

/// Wraps the contents of a code span in the dialect's fixed-width font.
pub fn code_text(code: &str, macros: &dyn Macros) -> String {
    format!(
        "{}{}{}",
        macros.font(Font::CodeOpen),
        code,
        macros.font(Font::CodeClose)
    )
}

/// Applies escapes, font markers and code spans to `text`; links stay literal and fonts
/// left open are closed at the end.
pub fn render_fragment(text: &str, markers: EmphasisMarkers, macros: &dyn Macros) -> String {
    let mut out = String::with_capacity(text.len());
    let mut fonts = FontState::default();
    let mut pos = 0;
    while pos < text.len() {
        let (token, len) = recognize(text, pos, markers, false);
        match token {
            Token::Char(ch) => out.push(ch),
            Token::Literal(literal) => out.push_str(literal),
            Token::Marker { font, marker } => {
                let prev = text[..pos].chars().next_back();
                out.push_str(&marker_text(&mut fonts, font, marker, prev, macros));
            }
            Token::Code(code) => out.push_str(&code_text(code, macros)),
            Token::UnclosedCode => out.push('`'),
            Token::Link(_) => {}
        }
        pos += len;
    }
    for open in [fonts.bold_open, fonts.italic_open] {
        if open {
            out.push_str(macros.font(Font::Previous));
        }
    }
    out
}
