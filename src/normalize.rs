//! Whitespace folding applied to every text line before it is written.

/// Collapses whitespace runs and trims both ends.
///
/// A run survives as one space when the character before it is alphanumeric or one of
/// `,;.)}]`, or when the next non-blank character is alphanumeric. Any other run is
/// dropped, which glues font escapes and punctuation to their neighbours.
pub fn squeeze(text: &str) -> String {
    let text = text.trim();
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(ch) = chars.next() {
        if !ch.is_whitespace() {
            out.push(ch);
            prev = Some(ch);
            continue;
        }
        while chars.peek().is_some_and(|next| next.is_whitespace()) {
            chars.next();
        }
        let keeps_after = prev.is_some_and(|p| p.is_alphanumeric() || ",;.)}]".contains(p));
        let keeps_before = chars.peek().is_some_and(|next| next.is_alphanumeric());
        if keeps_after || keeps_before {
            out.push(' ');
            prev = Some(' ');
        }
    }
    out
}
