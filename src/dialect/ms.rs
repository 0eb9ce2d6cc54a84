use super::{
    CC_SWITCH, Macros, TitleInfo, code_line, plain_link, plain_man_ref,
    push_line, push_text, render_shared,
};
use crate::event::{Event, ListKind};
use crate::options::Dialect;

/// Commented cover-sheet template written after a `.TL` title.
const COVER_TEMPLATE: &[&str] = &[
    ".\\# .AU",
    ".\\# Author",
    ".\\# .AI",
    ".\\# Author's institution(s)",
    ".\\# .ND date",
    ".\\# .AB",
    ".\\# Abstract; to be placed on the cover sheet of a paper.",
    ".\\# Line length is 5/6 of normal; use .ll here to change.",
    ".\\# .AE",
];

/// The ms macro set (`ms.tmac`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Ms;

impl Macros for Ms {
    fn dialect(&self) -> Dialect {
        Dialect::Ms
    }

    fn loader(&self) -> &'static str {
        ".do mso ms.tmac"
    }

    fn claims_title_line(&self) -> bool {
        true
    }

    fn title_block(&self, info: &TitleInfo<'_>, out: &mut String) {
        if let Some(title) = info.header {
            push_line(out, ".TL");
            push_text(out, title.trim());
            for line in COVER_TEMPLATE {
                push_line(out, line);
            }
            push_line(out, ".PP");
        }
    }

    fn render(&self, event: &Event<'_>, out: &mut String) {
        match event {
            Event::Sync => {}
            Event::QuoteOpen => push_line(out, ".RS"),
            Event::QuoteClose => push_line(out, ".RE"),
            Event::ParagraphBreak | Event::Term => push_line(out, ".PP"),
            Event::LineBreak => push_line(out, ".br"),
            Event::Header { text, .. } => {
                push_line(out, ".SH");
                push_text(out, text);
                push_line(out, ".PP");
            }
            Event::CodeOpen => push_line(out, ".DS I"),
            Event::CodeLine(line) => code_line(out, line, CC_SWITCH),
            Event::CodeClose => push_line(out, ".DE"),
            Event::ListOpen { depth, .. } if *depth > 1 => push_line(out, ".RS"),
            Event::ListClose { depth, .. } if *depth > 1 => push_line(out, ".RE"),
            Event::ListOpen { .. } | Event::ListClose { .. } | Event::ItemEnd { .. } => {}
            Event::ItemOpen { kind, number, .. } => match kind {
                ListKind::Unordered => push_line(out, ".IP \\(bu 4"),
                ListKind::Ordered => push_line(out, &format!(".IP {number}. 4")),
            },
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
            Event::BoxOpen => push_line(out, ".B1"),
            Event::BoxClose => push_line(out, ".B2"),
            other => render_shared(other, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn title_line_becomes_cover_title() {
        let mut out = String::new();
        let info = TitleInfo {
            docname: "doc",
            header: Some("A Paper"),
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        };
        Ms.title_block(&info, &mut out);
        assert!(out.starts_with(".TL\nA Paper\n.\\# .AU\n"));
        assert!(out.ends_with(".\\# .AE\n.PP\n"));
    }

    #[test]
    fn headers_restart_paragraphs() {
        let mut out = String::new();
        Ms.render(
            &Event::Header {
                level: 2,
                text: "Intro",
            },
            &mut out,
        );
        assert_eq!(out, ".SH\nIntro\n.PP\n");
    }

    #[test]
    fn plain_links_keep_punctuation() {
        let mut out = String::new();
        Ms.render(
            &Event::Link {
                title: "Example",
                target: "https://x.test",
                punct: Some('.'),
            },
            &mut out,
        );
        assert_eq!(out, "Example <https://x.test>.\n");
    }
}
