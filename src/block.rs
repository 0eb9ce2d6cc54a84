//! Recognizers for constructs that only count at the start of a line.
//!
//! Every function looks at `src` positioned on the first byte of a line and reports what
//! it found plus the number of bytes it covers. None of them touch scanner state.

use crate::event::ListKind;

/// A list item marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker {
    pub kind: ListKind,
    /// Blanks before the marker.
    pub indent: usize,
    /// Literal number of an ordered marker.
    pub number: Option<u64>,
    /// Bytes covered by the indentation and the marker.
    pub len: usize,
}

/// `*`, `+` or `-` followed by a blank, or digits followed by `.`.
///
/// The blank after a bullet is left in place; blanks after an ordered marker are
/// included in `len`.
pub fn list_marker(src: &str) -> Option<ListMarker> {
    let bytes = src.as_bytes();
    let indent = blanks(src);
    let rest = &bytes[indent..];

    if matches!(rest.first(), Some(b'*' | b'+' | b'-'))
        && matches!(rest.get(1), Some(b' ' | b'\t'))
    {
        return Some(ListMarker {
            kind: ListKind::Unordered,
            indent,
            number: None,
            len: indent + 1,
        });
    }

    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 || rest.get(digits) != Some(&b'.') {
        return None;
    }
    let number = src[indent..indent + digits].parse::<u64>().ok()?;
    let after = indent + digits + 1;
    Some(ListMarker {
        kind: ListKind::Ordered,
        indent,
        number: Some(number),
        len: after + blanks(&src[after..]),
    })
}

/// A line of at least three `=`, `-` or `*` with optional trailing blanks. The count
/// includes the newline.
pub fn ruler_line(src: &str) -> Option<usize> {
    let bytes = src.as_bytes();
    let mark = *bytes.first()?;
    if !matches!(mark, b'=' | b'-' | b'*') {
        return None;
    }
    let run = bytes.iter().take_while(|&&b| b == mark).count();
    if run < 3 {
        return None;
    }
    let tail = run + bytes[run..]
        .iter()
        .take_while(|b| matches!(b, b' ' | b'\t' | b'\r'))
        .count();
    match bytes.get(tail) {
        None => Some(tail),
        Some(b'\n') => Some(tail + 1),
        Some(_) => None,
    }
}

/// A ```` ``` ```` line. The rest of the line, info string included, is covered.
pub fn fence(src: &str) -> Option<usize> {
    src.starts_with("```").then(|| line_len(src))
}

/// A line holding nothing but blanks. The count includes the newline.
pub fn blank_line(src: &str) -> Option<usize> {
    let bytes = src.as_bytes();
    let run = bytes
        .iter()
        .take_while(|b| matches!(b, b' ' | b'\t' | b'\r'))
        .count();
    (bytes.get(run) == Some(&b'\n')).then_some(run + 1)
}

/// Counts leading `>` markers. Blanks between and after the markers are covered too.
pub fn quote_markers(src: &str) -> (usize, usize) {
    let bytes = src.as_bytes();
    let mut depth = 0;
    let mut pos = 0;
    while bytes.get(pos) == Some(&b'>') {
        depth += 1;
        pos += 1;
        pos += blanks(&src[pos..]);
    }
    (depth, pos)
}

/// A `#` header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLine<'a> {
    pub level: usize,
    /// Text after the markers and their blanks, without the newline.
    pub text: &'a str,
    /// The whole line, markers included.
    pub raw: &'a str,
    /// A line that also ends with `#` draws a box instead of a header.
    pub boxed: bool,
    /// Bytes up to and including the newline.
    pub len: usize,
}

pub fn header_line(src: &str) -> Option<HeaderLine<'_>> {
    if !src.starts_with('#') {
        return None;
    }
    let len = line_len(src);
    let raw = src[..len].trim_end_matches(['\n', '\r']);
    let level = raw.bytes().take_while(|&b| b == b'#').count();
    let text = raw[level..].trim_start_matches([' ', '\t']);
    Some(HeaderLine {
        level,
        text,
        raw,
        boxed: level < raw.trim_end().len() && raw.trim_end().ends_with('#'),
        len,
    })
}

/// Bytes of the line at the start of `src`, newline included.
pub fn line_len(src: &str) -> usize {
    src.find('\n').map_or(src.len(), |idx| idx + 1)
}

fn blanks(src: &str) -> usize {
    src.bytes().take_while(|b| matches!(b, b' ' | b'\t')).count()
}
