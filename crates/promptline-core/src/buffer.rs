#![forbid(unsafe_code)]

//! The line buffer: the in-progress, uncommitted text being edited.
//!
//! A single-line buffer with a cursor expressed as a grapheme-cluster
//! index, so multi-codepoint clusters (flag emoji, combining marks) edit
//! as one unit. Every operation clamps out-of-range requests instead of
//! rejecting them; nothing here panics or returns an error.
//!
//! # Invariant
//!
//! After every operation, `0 <= cursor <= grapheme_count`.

use unicode_segmentation::UnicodeSegmentation;

/// A single-line editable text buffer with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    /// Text value.
    text: String,
    /// Cursor position (grapheme index).
    cursor: usize,
}

impl LineBuffer {
    /// Create a new empty buffer with the cursor at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the cursor position (grapheme index).
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of grapheme clusters in the buffer.
    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        self.text.graphemes(true).count()
    }

    /// Check whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the buffer content, placing the cursor at end-of-line.
    ///
    /// This is how history entries load: the text is copied in, the
    /// source is never mutated.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.grapheme_count();
    }

    /// Clear all text and reset the cursor to 0.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Set the cursor, clamping to `[0, grapheme_count]`.
    pub fn move_to(&mut self, offset: usize) {
        self.cursor = offset.min(self.grapheme_count());
    }

    /// Move the cursor one grapheme left. No-op at the start.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move the cursor one grapheme right. No-op at the end.
    pub fn move_right(&mut self) {
        if self.cursor < self.grapheme_count() {
            self.cursor += 1;
        }
    }

    /// Insert a character at the cursor and advance it.
    ///
    /// Control characters are filtered to keep the display surface sane.
    /// If the character merges into the previous grapheme (a combining
    /// mark), the cluster count is unchanged and the cursor stays put.
    pub fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }

        let old_count = self.grapheme_count();
        let byte_offset = self.byte_offset(self.cursor);
        self.text.insert(byte_offset, c);

        // Only advance if a new cluster appeared; a combining character
        // that merged leaves the cursor after the merged cluster.
        if self.grapheme_count() > old_count {
            self.cursor += 1;
        }
    }

    /// Delete the grapheme immediately before the cursor. No-op at 0.
    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let byte_start = self.byte_offset(self.cursor - 1);
            let byte_end = self.byte_offset(self.cursor);
            self.text.drain(byte_start..byte_end);
            self.cursor -= 1;
        }
    }

    /// Delete the grapheme at the cursor. No-op at the end.
    pub fn delete_forward(&mut self) {
        if self.cursor < self.grapheme_count() {
            let byte_start = self.byte_offset(self.cursor);
            let byte_end = self.byte_offset(self.cursor + 1);
            self.text.drain(byte_start..byte_end);
        }
    }

    /// Delete the half-open grapheme range `[start, end)`.
    ///
    /// The bounds are order-normalized and clamped; the cursor lands on
    /// the lower bound.
    pub fn delete_range(&mut self, start: usize, end: usize) {
        let max = self.grapheme_count();
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        let (lo, hi) = (lo.min(max), hi.min(max));
        if lo < hi {
            let byte_start = self.byte_offset(lo);
            let byte_end = self.byte_offset(hi);
            self.text.drain(byte_start..byte_end);
        }
        self.cursor = lo.min(self.grapheme_count());
    }

    fn byte_offset(&self, grapheme_idx: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_buffer() {
        let buf = LineBuffer::new();
        assert_eq!(buf.text(), "");
        assert_eq!(buf.cursor(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn insert_advances_cursor() {
        let mut buf = LineBuffer::new();
        buf.insert_char('h');
        buf.insert_char('i');
        assert_eq!(buf.text(), "hi");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn insert_mid_buffer() {
        let mut buf = LineBuffer::new();
        buf.set_text("hllo");
        buf.move_to(1);
        buf.insert_char('e');
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn insert_filters_control_chars() {
        let mut buf = LineBuffer::new();
        buf.insert_char('\x07');
        buf.insert_char('\t');
        assert_eq!(buf.text(), "");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn delete_back() {
        let mut buf = LineBuffer::new();
        buf.set_text("abc");
        buf.delete_back();
        assert_eq!(buf.text(), "ab");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn delete_back_at_start_is_noop() {
        let mut buf = LineBuffer::new();
        buf.set_text("abc");
        buf.move_to(0);
        buf.delete_back();
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn delete_forward() {
        let mut buf = LineBuffer::new();
        buf.set_text("abc");
        buf.move_to(1);
        buf.delete_forward();
        assert_eq!(buf.text(), "ac");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn delete_forward_at_end_is_noop() {
        let mut buf = LineBuffer::new();
        buf.set_text("abc");
        buf.delete_forward();
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.cursor(), 3);
    }

    #[test]
    fn move_to_clamps() {
        let mut buf = LineBuffer::new();
        buf.set_text("ab");
        buf.move_to(99);
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn set_text_places_cursor_at_end() {
        let mut buf = LineBuffer::new();
        buf.set_text("resume");
        assert_eq!(buf.cursor(), 6);
    }

    #[test]
    fn delete_range_is_order_normalized() {
        let mut buf = LineBuffer::new();
        buf.set_text("abcdef");
        buf.delete_range(4, 1);
        assert_eq!(buf.text(), "aef");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn delete_range_clamps_bounds() {
        let mut buf = LineBuffer::new();
        buf.set_text("abc");
        buf.delete_range(1, 99);
        assert_eq!(buf.text(), "a");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn multi_codepoint_grapheme_edits_as_one_unit() {
        let mut buf = LineBuffer::new();
        buf.set_text("a\u{1F1EB}\u{1F1F7}b"); // a, FR flag, b
        assert_eq!(buf.grapheme_count(), 3);
        buf.move_to(2);
        buf.delete_back();
        assert_eq!(buf.text(), "ab");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn combining_mark_merges_without_advancing_cursor() {
        let mut buf = LineBuffer::new();
        buf.insert_char('e');
        assert_eq!(buf.cursor(), 1);
        buf.insert_char('\u{0301}'); // combining acute accent
        assert_eq!(buf.grapheme_count(), 1);
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn insert_then_delete_back_round_trips() {
        let mut buf = LineBuffer::new();
        buf.set_text("foo bar");
        buf.move_to(3);
        let before = buf.clone();
        buf.insert_char('x');
        buf.delete_back();
        assert_eq!(buf, before);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(char),
        DeleteBack,
        DeleteForward,
        MoveTo(usize),
        SetText(String),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<char>().prop_map(Op::Insert),
            Just(Op::DeleteBack),
            Just(Op::DeleteForward),
            (0usize..64).prop_map(Op::MoveTo),
            ".{0,16}".prop_map(Op::SetText),
        ]
    }

    proptest! {
        #[test]
        fn cursor_stays_in_bounds(ops in prop::collection::vec(op_strategy(), 1..64)) {
            let mut buf = LineBuffer::new();
            for op in ops {
                match op {
                    Op::Insert(c) => buf.insert_char(c),
                    Op::DeleteBack => buf.delete_back(),
                    Op::DeleteForward => buf.delete_forward(),
                    Op::MoveTo(n) => buf.move_to(n),
                    Op::SetText(s) => buf.set_text(s),
                }
                prop_assert!(buf.cursor() <= buf.grapheme_count());
            }
        }

        #[test]
        fn insert_delete_back_round_trip(text in "[a-z ]{0,12}", pos in 0usize..16, c in proptest::char::range('a', 'z')) {
            let mut buf = LineBuffer::new();
            buf.set_text(text);
            buf.move_to(pos);
            let before = buf.clone();
            buf.insert_char(c);
            buf.delete_back();
            prop_assert_eq!(buf, before);
        }
    }
}
