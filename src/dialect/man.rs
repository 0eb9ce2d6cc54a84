use super::{
    CC_SWITCH, Macros, TitleInfo, code_line, punct_suffix, push_line, push_text, quote_arg,
    render_shared, title_date,
};
use crate::event::{Event, ListKind, heading_rank};
use crate::options::{Dialect, SynopsisStyle};
use crate::synopsis;
use crate::title::TitleLine;

/// Linux man pages (`man.tmac`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Man;

impl Macros for Man {
    fn dialect(&self) -> Dialect {
        Dialect::Man
    }

    fn loader(&self) -> &'static str {
        ".do mso man.tmac"
    }

    fn claims_title_line(&self) -> bool {
        true
    }

    fn title_block(&self, info: &TitleInfo<'_>, out: &mut String) {
        match info.header {
            Some(line) => {
                let title = TitleLine::parse(line);
                let date = title
                    .date
                    .map(str::to_string)
                    .unwrap_or_else(|| title_date(info.date));
                let mut heading = format!(
                    ".TH {} {} {}",
                    quote_arg(&title.name),
                    quote_arg(title.section),
                    quote_arg(&date)
                );
                if !title.rest.is_empty() {
                    heading.push(' ');
                    heading.push_str(title.rest);
                }
                push_line(out, &heading);
            }
            None => push_line(
                out,
                &format!(
                    ".TH {} 7 {} document",
                    quote_arg(info.docname),
                    info.date.format("%Y-%m-%d")
                ),
            ),
        }
    }

    fn run_in_headings(&self) -> bool {
        true
    }

    fn block_synopsis(&self) -> Option<SynopsisStyle> {
        Some(SynopsisStyle::Sy)
    }

    fn highlights_commands(&self) -> bool {
        true
    }

    fn render(&self, event: &Event<'_>, out: &mut String) {
        match event {
            Event::Sync => {}
            Event::QuoteOpen => push_line(out, ".RS"),
            Event::QuoteClose => push_line(out, ".RE"),
            Event::ParagraphBreak => push_line(out, ".PP"),
            Event::LineBreak => push_line(out, ".br"),
            Event::Header { level, text } => {
                let name = if heading_rank(*level) == 1 { ".SH" } else { ".SS" };
                push_line(out, &format!("{name} {text}"));
            }
            Event::Term => push_line(out, ".TP"),
            Event::CodeOpen => {
                push_line(out, ".in +4n");
                push_line(out, ".EX");
            }
            Event::CodeLine(line) => code_line(out, line, CC_SWITCH),
            Event::CodeClose => {
                push_line(out, ".EE");
                push_line(out, ".in");
            }
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
            } => {
                let (open, close) = if target.contains('@') {
                    (".MT", ".ME")
                } else {
                    (".UR", ".UE")
                };
                push_line(out, &format!("{open} {target}"));
                if !title.is_empty() && title != target {
                    push_text(out, title);
                }
                push_line(out, &format!("{close}{}", punct_suffix(*punct)));
            }
            Event::ManRef {
                page,
                section,
                punct,
            } => {
                let mut line = format!(".BR {page}");
                match section {
                    Some(section) => {
                        line.push_str(&format!(" ({section})"));
                        if let Some(ch) = punct {
                            line.push(*ch);
                        }
                    }
                    None => line.push_str(&punct_suffix(*punct)),
                }
                push_line(out, &line);
            }
            Event::BoxOpen => push_line(out, ".B"),
            Event::BoxClose => push_line(out, ".FT P"),
            Event::Synopsis(block) => out.push_str(&synopsis::render_sy(block)),
            other => render_shared(other, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn render(event: Event<'_>) -> String {
        let mut out = String::new();
        Man.render(&event, &mut out);
        out
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn title_from_header_line() {
        let mut out = String::new();
        let info = TitleInfo {
            docname: "ignored",
            header: Some("ls 1 2021-03-09 GNU"),
            date: date(),
        };
        Man.title_block(&info, &mut out);
        assert_eq!(out, ".TH LS 1 2021-03-09 GNU\n");
    }

    #[test]
    fn title_defaults_date_to_today() {
        let mut out = String::new();
        let info = TitleInfo {
            docname: "ignored",
            header: Some("ls 1"),
            date: date(),
        };
        Man.title_block(&info, &mut out);
        assert_eq!(out, ".TH LS 1 \"Oct 19 2026\"\n");
    }

    #[test]
    fn title_synthesized_from_document_name() {
        let mut out = String::new();
        let info = TitleInfo {
            docname: "notes",
            header: None,
            date: date(),
        };
        Man.title_block(&info, &mut out);
        assert_eq!(out, ".TH notes 7 2026-10-19 document\n");
    }

    #[test]
    fn links_keep_punctuation_after_close() {
        let out = render(Event::Link {
            title: "Example",
            target: "https://x.test",
            punct: Some('.'),
        });
        assert_eq!(out, ".UR https://x.test\nExample\n.UE .\n");
    }

    #[test]
    fn mail_links_use_mail_macros() {
        let out = render(Event::Link {
            title: "me@x.test",
            target: "me@x.test",
            punct: None,
        });
        assert_eq!(out, ".MT me@x.test\n.ME\n");
    }

    #[test]
    fn man_reference_with_section() {
        let out = render(Event::ManRef {
            page: "ls",
            section: Some("1"),
            punct: Some(','),
        });
        assert_eq!(out, ".BR ls (1),\n");
    }

    #[test]
    fn nested_lists_shift_margin() {
        assert_eq!(
            render(Event::ListOpen {
                kind: ListKind::Unordered,
                depth: 1
            }),
            ""
        );
        assert_eq!(
            render(Event::ListOpen {
                kind: ListKind::Unordered,
                depth: 2
            }),
            ".RS\n"
        );
        assert_eq!(
            render(Event::ItemOpen {
                kind: ListKind::Ordered,
                number: 5,
                depth: 1
            }),
            ".IP 5. 4\n"
        );
    }

    #[test]
    fn headers_map_to_sections() {
        assert_eq!(render(Event::Header { level: 1, text: "Title" }), ".SH Title\n");
        assert_eq!(render(Event::Header { level: 2, text: "NAME" }), ".SH NAME\n");
        assert_eq!(render(Event::Header { level: 3, text: "Sub" }), ".SS Sub\n");
    }
}
