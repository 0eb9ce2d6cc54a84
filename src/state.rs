//! Mutable state of one conversion: cursor flags, the list stack and the line buffer.

use crate::event::ListKind;

/// Deepest list nesting accepted before conversion fails.
pub const MAX_LIST_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontState {
    pub bold_open: bool,
    pub italic_open: bool,
}

#[derive(Debug, Default)]
pub struct ScannerState {
    pub pos: usize,
    pub at_line_start: bool,
    pub in_code_block: bool,
    pub fonts: FontState,
    /// Block quote depth of the line being read.
    pub quote_depth: usize,
    /// Name of the current `##` section, trimmed.
    pub section: String,
    pub suppress_output: bool,
}

impl ScannerState {
    pub fn new() -> Self {
        Self {
            at_line_start: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFrame {
    pub kind: ListKind,
    pub next_index: u64,
    /// Column of the marker that opened the list.
    pub indent: usize,
}

#[derive(Debug, Default)]
pub struct ListStack {
    frames: Vec<ListFrame>,
}

impl ListStack {
    /// Opens a list. Returns the new depth, or `None` when it would exceed
    /// [`MAX_LIST_DEPTH`].
    pub fn push(&mut self, kind: ListKind, indent: usize) -> Option<usize> {
        if self.frames.len() >= MAX_LIST_DEPTH {
            return None;
        }
        self.frames.push(ListFrame {
            kind,
            next_index: 1,
            indent,
        });
        Some(self.frames.len())
    }

    pub fn pop(&mut self) -> Option<ListFrame> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&ListFrame> {
        self.frames.last()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number for the next item of the innermost list.
    ///
    /// An explicit `seed` restarts ordered counting there; unordered lists keep their
    /// counter untouched.
    pub fn next_number(&mut self, seed: Option<u64>) -> u64 {
        let Some(frame) = self.frames.last_mut() else {
            return 0;
        };
        if frame.kind == ListKind::Unordered {
            return frame.next_index;
        }
        let number = seed.unwrap_or(frame.next_index);
        frame.next_index = number.saturating_add(1);
        number
    }
}

/// Text of the output line being composed.
#[derive(Debug, Default)]
pub struct LineBuffer {
    text: String,
    /// Byte offset where the most recent source line starts in `text`.
    line_start: usize,
}

impl LineBuffer {
    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Folds a source newline into a blank and marks where the next source line starts.
    pub fn soft_break(&mut self) {
        self.text.push(' ');
        self.line_start = self.text.len();
    }

    pub fn take(&mut self) -> String {
        self.line_start = 0;
        std::mem::take(&mut self.text)
    }

    /// Splits off the last source line, leaving the earlier text in the first half.
    pub fn split_last_line(&mut self) -> (String, String) {
        let last = self.text.split_off(self.line_start);
        let before = self.take();
        (before, last)
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_numbers_follow_seed() {
        let mut stack = ListStack::default();
        stack.push(ListKind::Ordered, 0);
        assert_eq!(stack.next_number(Some(3)), 3);
        assert_eq!(stack.next_number(None), 4);
        assert_eq!(stack.next_number(Some(10)), 10);
        assert_eq!(stack.next_number(None), 11);
    }

    #[test]
    fn stack_refuses_to_grow_past_limit() {
        let mut stack = ListStack::default();
        for depth in 1..=MAX_LIST_DEPTH {
            assert_eq!(stack.push(ListKind::Unordered, depth), Some(depth));
        }
        assert_eq!(stack.push(ListKind::Unordered, 99), None);
        assert_eq!(stack.depth(), MAX_LIST_DEPTH);
    }

    #[test]
    fn empty_stack_has_no_number() {
        let mut stack = ListStack::default();
        assert!(stack.is_empty());
        assert_eq!(stack.next_number(Some(4)), 0);
        assert!(stack.top().is_none());
    }

    #[test]
    fn line_buffer_splits_last_source_line() {
        let mut buffer = LineBuffer::default();
        buffer.push_str("intro text");
        buffer.soft_break();
        buffer.push_str("Title");
        let (before, last) = buffer.split_last_line();
        assert_eq!(before, "intro text ");
        assert_eq!(last, "Title");
        assert!(buffer.is_blank());
    }

    #[test]
    fn take_resets_line_start() {
        let mut buffer = LineBuffer::default();
        buffer.push_str("one");
        buffer.soft_break();
        let _ = buffer.take();
        buffer.push_str("two");
        let (before, last) = buffer.split_last_line();
        assert_eq!(before, "");
        assert_eq!(last, "two");
    }
}
