use super::{
    CC_SWITCH, Macros, TitleInfo, code_line, plain_link, plain_man_ref,
    push_line, render_shared,
};
use crate::event::{Event, ListKind, heading_rank};
use crate::options::Dialect;

/// Memorandum macros (`m.tmac`). Block quotes are not rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mm;

impl Macros for Mm {
    fn dialect(&self) -> Dialect {
        Dialect::Mm
    }

    fn loader(&self) -> &'static str {
        ".do mso m.tmac"
    }

    fn title_block(&self, _info: &TitleInfo<'_>, _out: &mut String) {}

    fn render(&self, event: &Event<'_>, out: &mut String) {
        match event {
            Event::Sync | Event::QuoteOpen | Event::QuoteClose => {}
            Event::ParagraphBreak | Event::Term => push_line(out, ".P"),
            Event::LineBreak => push_line(out, ".br"),
            Event::Header { level, text } => push_line(
                out,
                &format!(
                    ".H {} \"{}\"",
                    heading_rank(*level),
                    text.replace('"', "\\(dq")
                ),
            ),
            Event::CodeOpen => push_line(out, ".DS I"),
            Event::CodeLine(line) => code_line(out, line, CC_SWITCH),
            Event::CodeClose => push_line(out, ".DE"),
            Event::ListOpen { kind, .. } => match kind {
                ListKind::Ordered => push_line(out, ".AL"),
                ListKind::Unordered => push_line(out, ".BL"),
            },
            Event::ListClose { .. } => push_line(out, ".LE"),
            Event::ItemOpen { .. } => push_line(out, ".LI"),
            Event::ItemEnd { .. } => {}
            Event::Link {
                title,
                target,
                punct,
            } => plain_link(out, title, target, *punct),
            Event::ManRef {
                page,
                section,
                punct,
            } => plain_man_ref(self, out, page, *section, *punct),
            Event::BoxOpen => push_line(out, ".FT B"),
            Event::BoxClose => push_line(out, ".FT P"),
            other => render_shared(other, out),
        }
    }
}
