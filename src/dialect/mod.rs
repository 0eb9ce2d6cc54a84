//! Per-dialect rendering of structural events.
//!
//! Each macro package implements [`Macros`]; the emitter hands it one [`Event`] at a time
//! and writes whatever lands in the output string. Adding a dialect means adding one
//! implementation and one [`Dialect`] variant.

mod man;
mod mdoc;
mod mm;
mod mom;
mod ms;

use crate::event::{Align, Event, Font};
use crate::options::{Dialect, SynopsisStyle};
use chrono::NaiveDate;

pub use man::Man;
pub use mdoc::Mdoc;
pub use mm::Mm;
pub use mom::Mom;
pub use ms::Ms;

/// What the title block is built from.
#[derive(Debug, Clone, Copy)]
pub struct TitleInfo<'a> {
    pub docname: &'a str,
    /// Text after `# ` of a leading title line, when the dialect consumed one.
    pub header: Option<&'a str>,
    pub date: NaiveDate,
}

pub trait Macros: Sync {
    fn dialect(&self) -> Dialect;

    /// Directive that loads the macro package.
    fn loader(&self) -> &'static str;

    /// Whether a leading `# ...` line feeds the title block instead of the body.
    fn claims_title_line(&self) -> bool {
        false
    }

    fn title_block(&self, info: &TitleInfo<'_>, out: &mut String);

    fn font(&self, font: Font) -> &'static str {
        match font {
            Font::Bold => "\\fB",
            Font::Italic => "\\fI",
            Font::Previous => "\\fP",
            Font::CodeOpen => "\u{2018}\\f[CR]",
            Font::CodeClose => "\\fP\u{2019}",
        }
    }

    /// Whether headers of level 4 and deeper become definition paragraphs.
    fn run_in_headings(&self) -> bool {
        false
    }

    /// The block synopsis form this dialect renders, if any.
    fn block_synopsis(&self) -> Option<SynopsisStyle> {
        None
    }

    /// Whether SYNOPSIS command lines can be highlighted inline.
    fn highlights_commands(&self) -> bool {
        false
    }

    fn render(&self, event: &Event<'_>, out: &mut String);
}

impl Dialect {
    pub fn macros(self) -> &'static dyn Macros {
        match self {
            Dialect::Man => &Man,
            Dialect::Mdoc => &Mdoc,
            Dialect::Mm => &Mm,
            Dialect::Mom => &Mom,
            Dialect::Ms => &Ms,
        }
    }
}

pub(crate) fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Writes a text line, guarding a leading control character with `\&`.
pub(crate) fn push_text(out: &mut String, text: &str) {
    if text.starts_with('.') || text.starts_with('\'') {
        out.push_str("\\&");
    }
    push_line(out, text);
}

/// Quotes a macro argument when roff would otherwise split it.
pub(crate) fn quote_arg(value: &str) -> String {
    if value.is_empty() || value.contains(char::is_whitespace) {
        format!("\"{}\"", value.replace('"', "\\(dq"))
    } else {
        value.to_string()
    }
}

/// Date format used inside title blocks, e.g. `Oct 19 2026`.
pub(crate) fn title_date(date: NaiveDate) -> String {
    date.format("%b %-d %Y").to_string()
}

/// Writes a code line, switching the control character around lines that start with
/// a dot.
pub(crate) fn code_line(out: &mut String, line: &str, switch: (&str, &str)) {
    if line.starts_with('.') {
        push_line(out, switch.0);
        push_line(out, line);
        push_line(out, switch.1);
    } else if line.starts_with('\'') {
        out.push_str("\\&");
        push_line(out, line);
    } else {
        push_line(out, line);
    }
}

pub(crate) const CC_SWITCH: (&str, &str) = (".cc !", "!cc .");

pub(crate) fn punct_suffix(punct: Option<char>) -> String {
    punct.map(|ch| format!(" {ch}")).unwrap_or_default()
}

/// `title <target>` for dialects without hyperlink macros.
pub(crate) fn plain_link(out: &mut String, title: &str, target: &str, punct: Option<char>) {
    let mut line = if title.is_empty() || title == target {
        format!("<{target}>")
    } else {
        format!("{title} <{target}>")
    };
    if let Some(ch) = punct {
        line.push(ch);
    }
    push_text(out, &line);
}

/// `page(section)` in bold for dialects without a cross-reference macro.
pub(crate) fn plain_man_ref(
    macros: &dyn Macros,
    out: &mut String,
    page: &str,
    section: Option<&str>,
    punct: Option<char>,
) {
    let mut line = format!(
        "{}{}{}",
        macros.font(Font::Bold),
        page,
        macros.font(Font::Previous)
    );
    if let Some(section) = section {
        line.push_str(&format!("({section})"));
    }
    if let Some(ch) = punct {
        line.push(ch);
    }
    push_line(out, &line);
}

/// tbl preamble: one bold format line for the header row, one plain line for the body.
pub(crate) fn table_open(out: &mut String, columns: &[Align], header: bool) {
    push_line(out, ".TS");
    push_line(out, "tab(|);");
    let format = |suffix: &str| {
        columns
            .iter()
            .map(|align| format!("{}{}", align.tbl_key(), suffix))
            .collect::<Vec<_>>()
            .join(" ")
    };
    if header {
        push_line(out, &format("B"));
    }
    push_line(out, &format!("{}.", format("")));
}

pub(crate) fn table_row(out: &mut String, cells: &[String]) {
    let cells = cells
        .iter()
        .map(|cell| {
            if cell.starts_with('.') || cell.starts_with('\'') || cell == "_" || cell == "=" {
                format!("\\&{cell}")
            } else {
                cell.clone()
            }
        })
        .collect::<Vec<_>>();
    push_line(out, &cells.join("|"));
}

/// Events rendered the same way by every dialect.
pub(crate) fn render_shared(event: &Event<'_>, out: &mut String) {
    match event {
        Event::TableOpen { columns, header } => table_open(out, columns, *header),
        Event::TableRow(cells) => table_row(out, cells),
        Event::TableClose => push_line(out, ".TE"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_arg_wraps_blank_values() {
        assert_eq!(quote_arg("LS"), "LS");
        assert_eq!(quote_arg(""), "\"\"");
        assert_eq!(quote_arg("Oct 19 2026"), "\"Oct 19 2026\"");
    }

    #[test]
    fn code_line_switches_control_character() {
        let mut out = String::new();
        code_line(&mut out, ".TH x", CC_SWITCH);
        code_line(&mut out, "plain", CC_SWITCH);
        code_line(&mut out, "'quoted", CC_SWITCH);
        assert_eq!(out, ".cc !\n.TH x\n!cc .\nplain\n\\&'quoted\n");
    }

    #[test]
    fn table_preamble_lists_alignments() {
        let mut out = String::new();
        table_open(&mut out, &[Align::Left, Align::Right], true);
        assert_eq!(out, ".TS\ntab(|);\nlB rB\nl r.\n");
    }

    #[test]
    fn table_rows_protect_leading_dots() {
        let mut out = String::new();
        table_row(&mut out, &[".hidden".to_string(), "b".to_string()]);
        assert_eq!(out, "\\&.hidden|b\n");
    }

    #[test]
    fn every_dialect_reports_itself() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.macros().dialect(), dialect);
        }
    }
}
