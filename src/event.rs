//! Structural events passed from the scanner to a dialect.

use crate::synopsis::SynopsisBlock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// Column alignment taken from a table delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn tbl_key(self) -> char {
        match self {
            Align::Left => 'l',
            Align::Center => 'c',
            Align::Right => 'r',
        }
    }
}

/// Font switches appended inline to the line being composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Bold,
    Italic,
    Previous,
    CodeOpen,
    CodeClose,
}

/// Everything a dialect knows how to render. Text lines are not events; they are written
/// by the emitter directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    /// Renders nothing; only brings the block quote depth up to date.
    Sync,
    QuoteOpen,
    QuoteClose,
    ParagraphBreak,
    LineBreak,
    /// Markdown header level (1..) with its already formatted text.
    Header {
        level: usize,
        text: &'a str,
    },
    /// Opens a definition paragraph; the term follows as text.
    Term,
    CodeOpen,
    /// One verbatim line of a code block, without its newline.
    CodeLine(&'a str),
    CodeClose,
    ListOpen {
        kind: ListKind,
        depth: usize,
    },
    ListClose {
        kind: ListKind,
        depth: usize,
    },
    ItemOpen {
        kind: ListKind,
        number: u64,
        depth: usize,
    },
    ItemEnd {
        kind: ListKind,
        depth: usize,
    },
    Link {
        title: &'a str,
        target: &'a str,
        punct: Option<char>,
    },
    ManRef {
        page: &'a str,
        section: Option<&'a str>,
        punct: Option<char>,
    },
    BoxOpen,
    BoxClose,
    TableOpen {
        columns: &'a [Align],
        header: bool,
    },
    TableRow(&'a [String]),
    TableClose,
    Synopsis(&'a SynopsisBlock),
}

/// Heading rank shared by every dialect: `#` and `##` are sections, `###` a sub-section,
/// anything deeper the smallest heading.
pub fn heading_rank(level: usize) -> usize {
    match level {
        0..=2 => 1,
        3 => 2,
        _ => 3,
    }
}
