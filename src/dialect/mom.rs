use super::{
    Macros, TitleInfo, code_line, plain_man_ref, push_line, push_text,
    render_shared,
};
use crate::event::{Event, Font, ListKind, heading_rank};
use crate::options::Dialect;

/// The mom macro set (`mom.tmac`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Mom;

const ESC_SWITCH: (&str, &str) = (".ESC_CHAR !", ".ESC_CHAR .");

impl Macros for Mom {
    fn dialect(&self) -> Dialect {
        Dialect::Mom
    }

    fn loader(&self) -> &'static str {
        ".do mso mom.tmac"
    }

    fn title_block(&self, info: &TitleInfo<'_>, out: &mut String) {
        push_line(
            out,
            &format!(".TITLE \"{}\"", info.docname.replace('"', "\\(dq")),
        );
        push_line(out, &format!(".AUTHOR \"{}\"", env!("CARGO_PKG_NAME")));
        push_line(out, ".PAPER A4");
        push_line(out, ".PRINTSTYLE TYPESET");
        push_line(out, ".START");
    }

    fn font(&self, font: Font) -> &'static str {
        match font {
            Font::Bold => "\\*[BD]",
            Font::Italic => "\\*[IT]",
            Font::Previous => "\\*[PREV]",
            Font::CodeOpen => "`\\*[CODE]",
            Font::CodeClose => "\\*[CODE OFF]'",
        }
    }

    fn render(&self, event: &Event<'_>, out: &mut String) {
        match event {
            Event::Sync => {}
            Event::QuoteOpen => push_line(out, ".BLOCKQUOTE"),
            Event::QuoteClose => push_line(out, ".BLOCKQUOTE OFF"),
            Event::ParagraphBreak | Event::Term => push_line(out, ".PP"),
            Event::LineBreak => push_line(out, ".BR"),
            Event::Header { level, text } => push_line(
                out,
                &format!(
                    ".HEADING {} \"{}\"",
                    heading_rank(*level),
                    text.replace('"', "\\(dq")
                ),
            ),
            Event::CodeOpen => push_line(out, ".CODE"),
            Event::CodeLine(line) => code_line(out, line, ESC_SWITCH),
            Event::CodeClose => push_line(out, ".CODE OFF"),
            Event::ListOpen { kind, depth } => {
                let style = match kind {
                    ListKind::Unordered if depth % 2 == 1 => "BULLET",
                    ListKind::Unordered => "DASH",
                    ListKind::Ordered => match *depth {
                        2 => "ALPHA",
                        4 => "alpha",
                        _ => "DIGIT",
                    },
                };
                push_line(out, &format!(".LIST {style}"));
            }
            Event::ListClose { .. } => push_line(out, ".LIST OFF"),
            Event::ItemOpen { .. } => push_line(out, ".ITEM"),
            Event::ItemEnd { .. } => {}
            Event::Link {
                title,
                target,
                punct,
            } => {
                let mut line = format!("{title} \\*[UL]{target}\\*[ULX]");
                if let Some(ch) = punct {
                    line.push(*ch);
                }
                push_text(out, line.trim_start());
            }
            Event::ManRef {
                page,
                section,
                punct,
            } => plain_man_ref(self, out, page, *section, *punct),
            Event::BoxOpen | Event::BoxClose => push_line(out, ".DRH"),
            other => render_shared(other, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(event: Event<'_>) -> String {
        let mut out = String::new();
        Mom.render(&event, &mut out);
        out
    }

    #[test]
    fn ordered_list_style_follows_depth() {
        let open = |depth| {
            render(Event::ListOpen {
                kind: ListKind::Ordered,
                depth,
            })
        };
        assert_eq!(open(1), ".LIST DIGIT\n");
        assert_eq!(open(2), ".LIST ALPHA\n");
        assert_eq!(open(3), ".LIST DIGIT\n");
        assert_eq!(open(4), ".LIST alpha\n");
        assert_eq!(open(7), ".LIST DIGIT\n");
    }

    #[test]
    fn code_lines_switch_escape_character() {
        assert_eq!(
            render(Event::CodeLine(".x")),
            ".ESC_CHAR !\n.x\n.ESC_CHAR .\n"
        );
    }

    #[test]
    fn links_use_underline_strings() {
        assert_eq!(
            render(Event::Link {
                title: "site",
                target: "https://x.test",
                punct: Some(','),
            }),
            "site \\*[UL]https://x.test\\*[ULX],\n"
        );
    }
}
