//! Command-line grammar of SYNOPSIS sections.
//!
//! A block is a program name line followed by one argument per line up to a blank line.
//! Arguments are options when they start with `-` (possibly after `[`), operands
//! otherwise. The man renderer builds `.SY`/`.OP`/`.RI`/`.YS`, the mdoc renderer
//! `.Nm`/`.Op`/`.Ar`. [`highlight_command`] handles the single-line form used by man
//! for `COMMAND:` lines and deep headers.

/// Keyword introducing a block synopsis.
pub const SYNTAX_KEYWORD: &str = "SYNTAX:";
/// Keyword introducing a highlighted command line.
pub const COMMAND_KEYWORD: &str = "COMMAND:";

/// Characters that switch back to the upright font inside a `.SY` argument.
const GRAMMAR_PUNCT: &str = "[].-{}|";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Option,
    Operand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynopsisArg {
    pub kind: ArgKind,
    pub text: String,
}

impl SynopsisArg {
    pub fn new(text: &str) -> Self {
        let kind = if text.trim_start_matches('[').starts_with('-') {
            ArgKind::Option
        } else {
            ArgKind::Operand
        };
        Self {
            kind,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SynopsisBlock {
    pub program: String,
    pub args: Vec<SynopsisArg>,
}

/// Reads a block from `src`, which starts right after any keyword.
///
/// Returns the block and the bytes consumed. Consumption stops on the newline of the
/// terminating blank line, which is left for the caller.
pub fn parse_block(src: &str) -> (SynopsisBlock, usize) {
    let mut pos = src.len() - src.trim_start().len();
    let (program, next) = line_at(src, pos);
    pos = next;

    let mut args = Vec::new();
    loop {
        let blanks = src[pos..]
            .bytes()
            .take_while(|b| matches!(b, b' ' | b'\t'))
            .count();
        let start = pos + blanks;
        if start >= src.len() {
            pos = src.len();
            break;
        }
        if src.as_bytes()[start] == b'\n' {
            pos = start;
            break;
        }
        let (text, next) = line_at(src, start);
        args.push(SynopsisArg::new(text));
        pos = next;
    }

    (
        SynopsisBlock {
            program: program.to_string(),
            args,
        },
        pos,
    )
}

/// The line starting at `pos` without trailing blanks, and the offset after its newline.
fn line_at(src: &str, pos: usize) -> (&str, usize) {
    match src[pos..].find('\n') {
        Some(offset) => (src[pos..pos + offset].trim_end(), pos + offset + 1),
        None => (src[pos..].trim_end(), src.len()),
    }
}

/// `.SY` block for the man dialect.
pub fn render_sy(block: &SynopsisBlock) -> String {
    let mut out = format!(".SY {}\n", block.program);
    for arg in &block.args {
        match arg.kind {
            ArgKind::Option => out.push_str(".OP \\"),
            ArgKind::Operand => out.push_str(".RI "),
        }
        out.push_str(&sy_argument(&arg.text, arg.kind));
        out.push('\n');
    }
    out.push_str(".YS\n");
    out
}

fn sy_argument(text: &str, kind: ArgKind) -> String {
    let (emphasis, punct) = match kind {
        ArgKind::Option => ('I', 'B'),
        ArgKind::Operand => ('R', 'R'),
    };
    let mut out = String::new();
    let mut first = true;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ' ' && first {
            first = false;
            if kind == ArgKind::Operand {
                out.push_str("\\ ");
            }
            out.push(' ');
            continue;
        }
        if !first {
            if ch == ' ' {
                out.push_str("\\fR\\ \\f");
                out.push(emphasis);
                continue;
            }
            if GRAMMAR_PUNCT.contains(ch) {
                out.push_str("\\f");
                out.push(punct);
                out.push(ch);
                while let Some(&next) = chars.peek() {
                    if !GRAMMAR_PUNCT.contains(next) {
                        break;
                    }
                    out.push(next);
                    chars.next();
                }
                out.push_str("\\f");
                out.push(emphasis);
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// `.Nm` block for the mdoc dialect.
pub fn render_nm(block: &SynopsisBlock) -> String {
    let mut out = format!(".Nm {}\n", block.program);
    for arg in &block.args {
        let line = match arg.kind {
            ArgKind::Option => {
                let text = arg.text.as_str();
                let inner = text
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                    .unwrap_or(text);
                format!(".Op {}", nm_arguments(inner))
            }
            ArgKind::Operand => format!(".Ar {}", nm_arguments(&arg.text)),
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Maps grammar characters to mdoc callable macros: a leading `-` to `Fl`, brackets to
/// `Oo`/`Oc`, and a blank before a word to `Ar`.
fn nm_arguments(text: &str) -> String {
    let mut out = String::new();
    let mut prev: Option<char> = None;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '-' if !matches!(prev, Some(p) if p == '-' || p.is_alphanumeric()) => {
                out.push_str(" Fl ")
            }
            '[' => out.push_str(" Oo "),
            ']' => out.push_str(" Oc "),
            ' ' if chars.peek().is_some_and(|next| next.is_alphanumeric()) => {
                out.push_str(" Ar ")
            }
            _ => out.push(ch),
        }
        prev = Some(ch);
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Highlights one command line: the program name bold, options bold, operands italic,
/// grammar punctuation upright. A backslash drops the rest of its line and continues on
/// the next one.
///
/// Returns the formatted text and the bytes consumed; the terminating newline is not
/// consumed.
pub fn highlight_command(src: &str) -> (String, usize) {
    #[derive(PartialEq)]
    enum State {
        Roman,
        Bold,
        Italic,
    }

    fn switch(out: &mut String, state: &mut State, to: State) {
        if *state != to {
            out.push_str(match to {
                State::Roman => "\\fR",
                State::Bold => "\\fB",
                State::Italic => "\\fI",
            });
            *state = to;
        }
    }

    let mut pos = src
        .bytes()
        .take_while(|b| matches!(b, b' ' | b'\t'))
        .count();
    let mut out = String::from("\\fB");
    let name_len = alnum_run(&src[pos..]);
    out.push_str(&src[pos..pos + name_len]);
    pos += name_len;
    out.push_str("\\fR");

    let mut state = State::Roman;
    while let Some(ch) = src[pos..].chars().next() {
        match ch {
            '\\' => {
                pos = src[pos..]
                    .find('\n')
                    .map_or(src.len(), |offset| pos + offset + 1);
                continue;
            }
            '\n' | '\r' => break,
            ' ' | '\t' | '[' | '{' | '(' | ']' | '}' | ')' | ',' | '|' | '.' | '=' => {
                switch(&mut out, &mut state, State::Roman);
                out.push(ch);
                pos += 1;
            }
            '+' | '!' => {
                switch(&mut out, &mut state, State::Bold);
                out.push(ch);
                pos += 1;
            }
            '-' => {
                switch(&mut out, &mut state, State::Bold);
                let dashes = if src[pos + 1..].starts_with('-') { 2 } else { 1 };
                out.push_str(&src[pos..pos + dashes]);
                pos += dashes;
                let word = alnum_run(&src[pos..]);
                out.push_str(&src[pos..pos + word]);
                pos += word;
            }
            _ => {
                switch(&mut out, &mut state, State::Italic);
                out.push(ch);
                pos += ch.len_utf8();
            }
        }
    }
    if state != State::Roman {
        out.push_str("\\fR");
    }
    (out, pos)
}

fn alnum_run(text: &str) -> usize {
    text.char_indices()
        .find(|(_, ch)| !ch.is_alphanumeric())
        .map_or(text.len(), |(idx, _)| idx)
}
