//! The single forward pass over a document.
//!
//! The scanner owns the cursor, the list stack and the line buffer. Start-of-line
//! constructs are recognized by [`crate::block`], inline ones by [`crate::inline`];
//! everything recognized is turned into text lines and [`Event`]s for the emitter as
//! soon as it is seen.

use crate::block::{self, ListMarker};
use crate::dialect::{Macros, TitleInfo};
use crate::emitter::Emitter;
use crate::error::{MdroffError, Result};
use crate::event::Event;
use crate::inline::{self, Token};
use crate::normalize::squeeze;
use crate::options::{ConvertOptions, SynopsisStyle};
use crate::state::{LineBuffer, ListStack, MAX_LIST_DEPTH, ScannerState};
use crate::synopsis::{self, COMMAND_KEYWORD, SYNTAX_KEYWORD};
use crate::table;
use crate::title::{leading_whitespace, title_header};
use chrono::Local;
use log::{debug, warn};
use std::io::Write;

const GENERATED_BANNER: &[&str] = &[
    ".\\# roff document",
    concat!(
        ".\\# DO NOT MODIFY THIS FILE! It was generated by ",
        env!("CARGO_PKG_NAME")
    ),
];

pub struct Scanner<'a, W: Write> {
    src: &'a str,
    options: &'a ConvertOptions,
    macros: &'static dyn Macros,
    emitter: Emitter<W>,
    state: ScannerState,
    lists: ListStack,
    line: LineBuffer,
}

impl<'a, W: Write> Scanner<'a, W> {
    pub fn new(src: &'a str, options: &'a ConvertOptions, out: W) -> Self {
        let macros = options.dialect.macros();
        Self {
            src,
            options,
            macros,
            emitter: Emitter::new(out, macros),
            state: ScannerState::new(),
            lists: ListStack::default(),
            line: LineBuffer::default(),
        }
    }

    /// Converts the whole document and returns the sink.
    pub fn run(mut self, docname: &str) -> Result<W> {
        debug!("converting '{docname}' as {}", self.options.dialect);
        self.prologue(docname)?;
        while self.state.pos < self.src.len() {
            self.step()?;
        }
        self.finish()
    }

    fn prologue(&mut self, docname: &str) -> Result<()> {
        let mut head = String::new();
        for line in GENERATED_BANNER {
            head.push_str(line);
            head.push('\n');
        }
        head.push_str(self.macros.loader());
        head.push('\n');

        let mut header = None;
        if self.macros.claims_title_line() {
            let skip = leading_whitespace(self.src);
            self.state.pos = skip;
            if let Some((line, consumed)) = title_header(&self.src[skip..]) {
                header = Some(line);
                self.state.pos = skip + consumed;
            }
        }
        let info = TitleInfo {
            docname,
            header,
            date: self
                .options
                .date
                .unwrap_or_else(|| Local::now().date_naive()),
        };
        self.macros.title_block(&info, &mut head);
        self.emitter.raw(&head)
    }

    fn step(&mut self) -> Result<()> {
        if self.state.in_code_block {
            return self.code_line();
        }
        if self.rest().starts_with('\\') {
            self.state.at_line_start = false;
        } else if self.state.at_line_start && self.line_start()? {
            return Ok(());
        }
        if self.state.pos >= self.src.len() {
            return Ok(());
        }
        if self.rest().starts_with('\n') {
            return self.newline();
        }
        self.inline_step()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.state.pos..]
    }

    fn line_number(&self) -> usize {
        self.src[..self.state.pos].matches('\n').count() + 1
    }

    /// Handles the constructs that only count at the start of a line. Returns `true`
    /// when the line start was fully handled.
    fn line_start(&mut self) -> Result<bool> {
        self.state.at_line_start = false;
        self.state.quote_depth = 0;
        self.emitter.set_quote_depth(self.state.quote_depth);

        let (depth, len) = block::quote_markers(self.rest());
        if depth > 0 {
            self.state.pos += len;
            self.flush()?;
            self.state.quote_depth = depth;
            self.emitter.set_quote_depth(self.state.quote_depth);
            self.emitter.emit(&Event::Sync)?;
        }

        if let Some(len) = block::blank_line(self.rest()) {
            self.state.pos += len;
            self.flush()?;
            if let Some(frame) = self.lists.top().copied() {
                let depth = self.lists.depth();
                self.emitter.emit(&Event::ItemEnd {
                    kind: frame.kind,
                    depth,
                })?;
                self.emitter.emit(&Event::ListClose {
                    kind: frame.kind,
                    depth,
                })?;
                self.lists.pop();
                debug!("closed list at depth {depth} on blank line");
            }
            self.emitter.emit(&Event::ParagraphBreak)?;
            self.state.at_line_start = true;
            return Ok(true);
        }

        if let Some(header) = block::header_line(self.rest()) {
            self.state.pos += header.len;
            self.header(header)?;
            self.state.at_line_start = true;
            return Ok(true);
        }

        if self.state.section == "SYNOPSIS" && self.synopsis()? {
            return Ok(true);
        }

        if let Some(marker) = block::list_marker(self.rest()) {
            if marker.indent == 0 || !self.lists.is_empty() {
                self.flush()?;
                self.list_item(marker)?;
                self.state.pos += marker.len;
                return Ok(true);
            }
        }

        if let Some(len) = block::fence(self.rest()) {
            self.state.pos += len;
            self.flush()?;
            self.state.in_code_block = true;
            self.emitter.emit(&Event::CodeOpen)?;
            self.state.at_line_start = true;
            return Ok(true);
        }

        if self.rest().starts_with('|') {
            if let Some((table, len)) = table::parse(self.rest()) {
                self.state.pos += len;
                self.flush()?;
                self.emitter.emit(&Event::TableOpen {
                    columns: &table.columns,
                    header: table.header,
                })?;
                for row in &table.rows {
                    self.emitter.emit(&Event::TableRow(row))?;
                }
                self.emitter.emit(&Event::TableClose)?;
                self.state.at_line_start = true;
                return Ok(true);
            }
        }

        if self.line.is_blank() {
            if let Some(len) = block::ruler_line(self.rest()) {
                self.state.pos += len;
                self.state.at_line_start = true;
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn header(&mut self, header: block::HeaderLine<'a>) -> Result<()> {
        self.flush()?;
        if header.boxed {
            self.emitter.emit(&Event::BoxOpen)?;
            self.emitter.emit(&Event::LineBreak)?;
            self.emitter.text(header.raw)?;
            self.emitter.emit(&Event::LineBreak)?;
            return self.emitter.emit(&Event::BoxClose);
        }

        if header.level == 2 {
            self.state.section = header.text.trim().to_string();
            debug!("entering section '{}'", self.state.section);
            if self.options.official {
                self.state.suppress_output = self.options.is_suppressed(&self.state.section);
                self.emitter.set_suppressed(self.state.suppress_output);
            }
        }

        if header.level >= 4 && self.macros.run_in_headings() {
            self.emitter.emit(&Event::Term)?;
            let (term, _) = synopsis::highlight_command(header.text);
            return self.emitter.text(&squeeze(&term));
        }

        let text = inline::render_fragment(header.text, self.options.emphasis, self.macros);
        self.emitter.emit(&Event::Header {
            level: header.level,
            text: squeeze(&text).as_str(),
        })
    }

    /// Block synopses and highlighted command lines of a SYNOPSIS section.
    fn synopsis(&mut self) -> Result<bool> {
        let style = self.options.synopsis_style;
        let has_syntax = self.rest().starts_with(SYNTAX_KEYWORD);
        let block_style = self.macros.block_synopsis();
        if block_style.is_some_and(|block| block == style || has_syntax) {
            self.flush()?;
            if has_syntax {
                self.state.pos += SYNTAX_KEYWORD.len();
            }
            let (block, len) = synopsis::parse_block(self.rest());
            self.state.pos += len;
            debug!("synopsis block for '{}'", block.program);
            self.emitter.emit(&Event::Synopsis(&block))?;
            return Ok(true);
        }

        let has_command = self.rest().starts_with(COMMAND_KEYWORD);
        if self.macros.highlights_commands() && (style == SynopsisStyle::Highlight || has_command)
        {
            self.flush()?;
            if has_command {
                self.state.pos += COMMAND_KEYWORD.len();
            }
            let (text, len) = synopsis::highlight_command(self.rest());
            self.state.pos += len;
            self.line.push_str(&text);
            self.flush()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn list_item(&mut self, marker: ListMarker) -> Result<()> {
        match self.lists.top().copied() {
            None => self.open_list(marker)?,
            Some(top) if marker.indent > top.indent => self.open_list(marker)?,
            Some(_) => {
                while let Some(top) = self.lists.top().copied() {
                    if self.lists.depth() == 1 || marker.indent >= top.indent {
                        break;
                    }
                    let depth = self.lists.depth();
                    self.emitter.emit(&Event::ItemEnd {
                        kind: top.kind,
                        depth,
                    })?;
                    self.emitter.emit(&Event::ListClose {
                        kind: top.kind,
                        depth,
                    })?;
                    self.lists.pop();
                }
                if let Some(top) = self.lists.top().copied() {
                    self.emitter.emit(&Event::ItemEnd {
                        kind: top.kind,
                        depth: self.lists.depth(),
                    })?;
                }
            }
        }

        let number = self.lists.next_number(marker.number);
        let kind = self.lists.top().map_or(marker.kind, |top| top.kind);
        self.emitter.emit(&Event::ItemOpen {
            kind,
            number,
            depth: self.lists.depth(),
        })
    }

    fn open_list(&mut self, marker: ListMarker) -> Result<()> {
        let depth = self
            .lists
            .push(marker.kind, marker.indent)
            .ok_or_else(|| MdroffError::ListTooDeep {
                line: self.line_number(),
                max: MAX_LIST_DEPTH,
            })?;
        debug!("opened {:?} list at depth {depth}", marker.kind);
        self.emitter.emit(&Event::ListOpen {
            kind: marker.kind,
            depth,
        })
    }

    fn code_line(&mut self) -> Result<()> {
        let rest = self.rest();
        let len = block::line_len(rest);
        self.state.pos += len;
        if block::fence(rest).is_some() {
            self.state.in_code_block = false;
            self.state.at_line_start = true;
            return self.emitter.emit(&Event::CodeClose);
        }
        let line = rest[..len].trim_end_matches(['\n', '\r']);
        self.emitter.emit(&Event::CodeLine(line))
    }

    /// A newline inside running text: either the end of a setext header or a soft break.
    fn newline(&mut self) -> Result<()> {
        let next = self.state.pos + 1;
        self.state.at_line_start = true;
        let Some(len) = block::ruler_line(&self.src[next..]) else {
            self.line.soft_break();
            self.state.pos = next;
            return Ok(());
        };
        self.state.pos = next + len;
        if self.line.is_blank() {
            self.line.take();
            return Ok(());
        }
        let (before, title) = self.line.split_last_line();
        self.write_text(&before)?;
        self.emitter.emit(&Event::Header {
            level: 1,
            text: squeeze(&title).as_str(),
        })
    }

    fn inline_step(&mut self) -> Result<()> {
        let pos = self.state.pos;
        let (token, len) = inline::recognize(self.src, pos, self.options.emphasis, true);
        match token {
            Token::Char(ch) => self.line.push(ch),
            Token::Literal(text) => self.line.push_str(text),
            Token::Marker { font, marker } => {
                let prev = self.src[..pos].chars().next_back();
                let text =
                    inline::marker_text(&mut self.state.fonts, font, marker, prev, self.macros);
                self.line.push_str(&text);
            }
            Token::Code(code) => self.line.push_str(&inline::code_text(code, self.macros)),
            Token::UnclosedCode => {
                return Err(MdroffError::UnterminatedCodeSpan {
                    line: self.line_number(),
                });
            }
            Token::Link(link) => {
                self.flush()?;
                self.emitter.emit(&link.event())?;
            }
        }
        self.state.pos += len.max(1);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let text = self.line.take();
        self.write_text(&text)
    }

    fn write_text(&mut self, raw: &str) -> Result<()> {
        let text = squeeze(raw);
        if text.is_empty() {
            return Ok(());
        }
        self.emitter.text(&text)
    }

    fn finish(mut self) -> Result<W> {
        self.flush()?;
        if self.state.in_code_block {
            warn!("code block left open at end of input");
        }
        let fonts = self.state.fonts;
        if fonts.bold_open || fonts.italic_open {
            warn!(
                "font left open at end of input (bold: {}, italic: {})",
                fonts.bold_open, fonts.italic_open
            );
        }
        while let Some(frame) = self.lists.top().copied() {
            let depth = self.lists.depth();
            self.emitter.emit(&Event::ItemEnd {
                kind: frame.kind,
                depth,
            })?;
            self.emitter.emit(&Event::ListClose {
                kind: frame.kind,
                depth,
            })?;
            self.lists.pop();
        }
        self.emitter.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Dialect;
    use chrono::NaiveDate;

    fn body(dialect: Dialect, src: &str) -> String {
        let mut options = ConvertOptions::new(dialect);
        options.date = NaiveDate::from_ymd_opt(2026, 10, 19);
        let out = Scanner::new(src, &options, Vec::new())
            .run("doc")
            .expect("conversion");
        let text = String::from_utf8(out).expect("utf-8");
        let loader = dialect.macros().loader();
        let start = text.find(loader).expect("loader") + loader.len() + 1;
        text[start..].to_string()
    }

    #[test]
    fn paragraphs_are_folded_and_separated() {
        assert_eq!(
            body(Dialect::Mm, "one\ntwo\n\nthree\n"),
            "one two\n.P\nthree\n"
        );
    }

    #[test]
    fn ordered_items_take_their_written_number() {
        assert_eq!(
            body(Dialect::Ms, "3. a\n1. b\n"),
            ".IP 3. 4\na\n.IP 1. 4\nb\n"
        );
        assert_eq!(
            body(Dialect::Ms, "1. a\n5. b\n"),
            ".IP 1. 4\na\n.IP 5. 4\nb\n"
        );
    }

    #[test]
    fn nested_lists_close_on_dedent() {
        let out = body(Dialect::Mdoc, "- a\n  - b\n- c\n");
        assert_eq!(
            out,
            ".Dd $Mdocdate: Oct 19 2026 $\n.Dt doc 7\n.Os\n\
             .Bl -bullet -offset indent\n.It\na\n\
             .Bl -dash -offset indent\n.It\nb\n.El\n\
             .It\nc\n.El\n"
        );
    }

    #[test]
    fn setext_header_splits_buffered_lines() {
        assert_eq!(
            body(Dialect::Mm, "intro\nTitle\n=====\nbody\n"),
            "intro\n.H 1 \"Title\"\nbody\n"
        );
    }

    #[test]
    fn escaped_marker_is_not_a_list() {
        assert_eq!(body(Dialect::Mm, "\\- not a list\n"), "- not a list\n");
    }

    #[test]
    fn unterminated_code_span_reports_line() {
        let options = ConvertOptions::new(Dialect::Man);
        let err = Scanner::new("ok\nbad `span\n", &options, Vec::new())
            .run("doc")
            .unwrap_err();
        assert!(matches!(err, MdroffError::UnterminatedCodeSpan { line: 2 }));
    }

    #[test]
    fn too_deep_lists_fail() {
        let mut src = String::new();
        for depth in 0..=MAX_LIST_DEPTH {
            src.push_str(&" ".repeat(depth));
            src.push_str("- item\n");
        }
        let options = ConvertOptions::new(Dialect::Man);
        let err = Scanner::new(&src, &options, Vec::new())
            .run("doc")
            .unwrap_err();
        assert!(matches!(
            err,
            MdroffError::ListTooDeep {
                line: 33,
                max: MAX_LIST_DEPTH
            }
        ));
    }

    #[test]
    fn kind_follows_receiving_list() {
        let out = body(Dialect::Mm, "- a\n1. b\n");
        assert_eq!(out, ".BL\n.LI\na\n.LI\nb\n.LE\n");
    }
}
