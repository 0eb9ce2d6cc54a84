use super::{
    CC_SWITCH, Macros, TitleInfo, code_line, punct_suffix, push_line, render_shared, title_date,
};
use crate::event::{Event, ListKind, heading_rank};
use crate::options::{Dialect, SynopsisStyle};
use crate::synopsis;
use crate::title::TitleLine;

/// BSD manual pages (`mdoc.tmac`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Mdoc;

impl Macros for Mdoc {
    fn dialect(&self) -> Dialect {
        Dialect::Mdoc
    }

    fn loader(&self) -> &'static str {
        ".do mso mdoc.tmac"
    }

    fn claims_title_line(&self) -> bool {
        true
    }

    fn title_block(&self, info: &TitleInfo<'_>, out: &mut String) {
        let (name, section, date) = match info.header {
            Some(line) => {
                let title = TitleLine::parse(line);
                let date = title
                    .date
                    .map(str::to_string)
                    .unwrap_or_else(|| title_date(info.date));
                (title.name, title.section.to_string(), date)
            }
            None => (
                info.docname.to_string(),
                "7".to_string(),
                title_date(info.date),
            ),
        };
        push_line(out, &format!(".Dd $Mdocdate: {date} $"));
        push_line(out, &format!(".Dt {name} {section}"));
        push_line(out, ".Os");
    }

    fn block_synopsis(&self) -> Option<SynopsisStyle> {
        Some(SynopsisStyle::Nm)
    }

    fn render(&self, event: &Event<'_>, out: &mut String) {
        match event {
            Event::Sync => {}
            Event::QuoteOpen => push_line(out, ".Bd -ragged -offset indent"),
            Event::QuoteClose => push_line(out, ".Ed"),
            Event::ParagraphBreak | Event::Term => push_line(out, ".Pp"),
            Event::LineBreak => push_line(out, ".br"),
            Event::Header { level, text } => {
                let name = if heading_rank(*level) == 1 { ".Sh" } else { ".Ss" };
                push_line(out, &format!("{name} {text}"));
            }
            Event::CodeOpen => push_line(out, ".Bd -literal -offset indent"),
            Event::CodeLine(line) => code_line(out, line, CC_SWITCH),
            Event::CodeClose => push_line(out, ".Ed"),
            Event::ListOpen { kind, depth } => match kind {
                ListKind::Ordered => push_line(out, ".Bl -enum -offset indent"),
                ListKind::Unordered => {
                    let mark = if depth % 2 == 1 { "bullet" } else { "dash" };
                    push_line(out, &format!(".Bl -{mark} -offset indent"));
                }
            },
            Event::ListClose { .. } => push_line(out, ".El"),
            Event::ItemOpen { .. } => push_line(out, ".It"),
            Event::ItemEnd { .. } => {}
            Event::Link {
                title,
                target,
                punct,
            } => {
                let bare = title.is_empty() || title == target;
                let line = match (target.contains('@'), bare) {
                    (true, true) => format!(".Mt {target}"),
                    (true, false) => format!(".An {title} Aq Mt {target}"),
                    (false, true) => format!(".Lk {target}"),
                    (false, false) => {
                        format!(".Lk {target} \"{}\"", title.replace('"', "\\(dq"))
                    }
                };
                push_line(out, &format!("{line}{}", punct_suffix(*punct)));
            }
            Event::ManRef {
                page,
                section,
                punct,
            } => {
                let mut line = format!(".Xr {page}");
                if let Some(section) = section {
                    line.push(' ');
                    line.push_str(section);
                }
                line.push_str(&punct_suffix(*punct));
                push_line(out, &line);
            }
            Event::BoxOpen => push_line(out, ".FT B"),
            Event::BoxClose => push_line(out, ".FT P"),
            Event::Synopsis(block) => out.push_str(&synopsis::render_nm(block)),
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
        Mdoc.render(&event, &mut out);
        out
    }

    #[test]
    fn title_block_from_header_line() {
        let mut out = String::new();
        let info = TitleInfo {
            docname: "doc",
            header: Some("tool 8"),
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        };
        Mdoc.title_block(&info, &mut out);
        assert_eq!(out, ".Dd $Mdocdate: Jan 5 2026 $\n.Dt TOOL 8\n.Os\n");
    }

    #[test]
    fn bullet_style_alternates_with_depth() {
        let open = |depth| {
            render(Event::ListOpen {
                kind: ListKind::Unordered,
                depth,
            })
        };
        assert_eq!(open(1), ".Bl -bullet -offset indent\n");
        assert_eq!(open(2), ".Bl -dash -offset indent\n");
    }

    #[test]
    fn links_and_references() {
        assert_eq!(
            render(Event::Link {
                title: "Example",
                target: "https://x.test",
                punct: Some('.'),
            }),
            ".Lk https://x.test \"Example\" .\n"
        );
        assert_eq!(
            render(Event::ManRef {
                page: "ls",
                section: Some("1"),
                punct: None,
            }),
            ".Xr ls 1\n"
        );
    }
}
