//! The leading `# name section [date] [rest]` line that feeds a title block.

/// Fields of a man-style title line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLine<'a> {
    /// Page name, upper-cased.
    pub name: String,
    pub section: &'a str,
    pub date: Option<&'a str>,
    /// Everything after the date, passed through to `.TH`.
    pub rest: &'a str,
}

impl<'a> TitleLine<'a> {
    pub fn parse(line: &'a str) -> Self {
        let (name, rest) = next_token(line);
        let (section, rest) = next_token(rest);
        let (date, rest) = next_token(rest);
        Self {
            name: name.to_uppercase(),
            section,
            date: (!date.is_empty()).then_some(date),
            rest: rest.trim(),
        }
    }
}

fn next_token(text: &str) -> (&str, &str) {
    let text = text.trim_start_matches([' ', '\t']);
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    (&text[..end], &text[end..])
}

/// Finds a `# ` title line at the start of `src`.
///
/// Returns the text after the marker and the number of bytes to skip: the line, its
/// newline and any whitespace that follows.
pub fn title_header(src: &str) -> Option<(&str, usize)> {
    let bytes = src.as_bytes();
    if bytes.first() != Some(&b'#') || !matches!(bytes.get(1), Some(b' ' | b'\t')) {
        return None;
    }
    let end = src.find('\n').unwrap_or(src.len());
    let line = src[2..end].trim_end_matches('\r');
    let after = (end + 1).min(src.len());
    let skipped = src[after..].len() - src[after..].trim_start().len();
    Some((line, after + skipped))
}

/// Length of the whitespace prefix of `src`.
pub fn leading_whitespace(src: &str) -> usize {
    src.len() - src.trim_start().len()
}
