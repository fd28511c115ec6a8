#![forbid(unsafe_code)]

//! The echo controller: incremental echo vs full-line redraw.
//!
//! The controller caches the last rendered line text and cursor. After
//! each buffer mutation the session calls [`EchoController::sync`] and
//! the controller diffs buffer against cache:
//!
//! - exactly one grapheme appended with the cursor at the tail before
//!   and after → write just that grapheme (or the mask character);
//! - exactly the final grapheme removed, cursor at the tail both sides
//!   → a minimal rubout;
//! - anything else (interior edit, cursor relocation, history load,
//!   completion substitution) → erase the line, rewrite prompt + buffer,
//!   and step the cursor left from end-of-line to its true offset.
//!
//! The cache always equals the buffer after a sync, so the visible line
//! cannot drift from the editing state.
//!
//! In masked mode every buffer grapheme renders as the mask character;
//! the cache still holds the logical text, which never leaves this
//! module unmasked.

use promptline_core::LineBuffer;
use unicode_segmentation::UnicodeSegmentation;

use crate::op::{RenderOp, RenderSink};

/// Decides between incremental echo and full redraw, and owns the
/// prompt prefix written on each redraw.
#[derive(Debug, Clone)]
pub struct EchoController {
    /// Prompt prefix (may carry SGR styling).
    prompt: String,
    /// Mask character for secret entry.
    mask: char,
    /// Whether echo is currently masked.
    masked: bool,
    /// Last rendered line text (logical, unmasked).
    last_text: String,
    /// Last rendered cursor offset (grapheme index).
    last_cursor: usize,
}

impl EchoController {
    /// Create a controller with the given prompt prefix.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            mask: '*',
            masked: false,
            last_text: String::new(),
            last_cursor: 0,
        }
    }

    /// Set the mask character (builder).
    #[must_use]
    pub fn with_mask(mut self, mask: char) -> Self {
        self.mask = mask;
        self
    }

    /// Current prompt prefix.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Swap the prompt prefix (e.g. to the secret prompt).
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Enable or disable masked echo.
    pub fn set_masked(&mut self, masked: bool) {
        self.masked = masked;
    }

    /// Whether echo is currently masked.
    #[must_use]
    pub fn masked(&self) -> bool {
        self.masked
    }

    /// Write the prompt on a new display line and reset the cache.
    pub fn show_prompt(&mut self, sink: &mut impl RenderSink) {
        sink.apply(RenderOp::Newline);
        sink.apply(RenderOp::Text(self.prompt.clone()));
        self.mark_clean();
    }

    /// Clear the screen, write the prompt at home, and reset the cache.
    pub fn show_prompt_cleared(&mut self, sink: &mut impl RenderSink) {
        sink.apply(RenderOp::ClearScreen);
        sink.apply(RenderOp::Text(self.prompt.clone()));
        self.mark_clean();
    }

    /// Bring the display in line with the buffer.
    pub fn sync(&mut self, buf: &LineBuffer, sink: &mut impl RenderSink) {
        let text = buf.text();
        let cursor = buf.cursor();

        if text == self.last_text && cursor == self.last_cursor {
            return;
        }

        let count = grapheme_count(text);
        let last_count = grapheme_count(&self.last_text);
        let at_tail = cursor == count && self.last_cursor == last_count;

        if at_tail && count == last_count + 1 && text.starts_with(self.last_text.as_str()) {
            let appended = &text[self.last_text.len()..];
            let echo = if self.masked {
                self.mask.to_string()
            } else {
                appended.to_string()
            };
            sink.apply(RenderOp::Text(echo));
            self.remember(text, cursor);
            return;
        }

        if at_tail && count + 1 == last_count && self.last_text.starts_with(text) {
            sink.apply(RenderOp::Rubout);
            self.remember(text, cursor);
            return;
        }

        self.redraw(buf, sink);
    }

    /// Erase the line and rewrite prompt + buffer, repositioning the
    /// cursor by relative steps from end-of-line.
    fn redraw(&mut self, buf: &LineBuffer, sink: &mut impl RenderSink) {
        sink.apply(RenderOp::ClearLine);
        sink.apply(RenderOp::Text(self.prompt.clone()));

        let display = self.display_text(buf.text());
        if !display.is_empty() {
            sink.apply(RenderOp::Text(display));
        }

        let steps = buf.grapheme_count() - buf.cursor();
        if steps > 0 {
            sink.apply(RenderOp::CursorLeft(steps as u16));
        }

        self.remember(buf.text(), buf.cursor());
    }

    fn display_text(&self, text: &str) -> String {
        if self.masked {
            self.mask.to_string().repeat(grapheme_count(text))
        } else {
            text.to_string()
        }
    }

    /// Forget the cached line: the display row is empty (the line was
    /// committed and scrolled away, or the prompt was just rewritten).
    pub fn mark_clean(&mut self) {
        self.last_text.clear();
        self.last_cursor = 0;
    }

    fn remember(&mut self, text: &str, cursor: usize) {
        self.last_text.clear();
        self.last_text.push_str(text);
        self.last_cursor = cursor;
    }
}

fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn buffer(text: &str, cursor: usize) -> LineBuffer {
        let mut buf = LineBuffer::new();
        buf.set_text(text);
        buf.move_to(cursor);
        buf
    }

    fn controller() -> EchoController {
        EchoController::new("$ ")
    }

    #[test]
    fn tail_insert_is_incremental() {
        let mut echo = controller();
        let mut ops: Vec<RenderOp> = Vec::new();
        echo.sync(&buffer("a", 1), &mut ops);
        ops.clear();
        echo.sync(&buffer("ab", 2), &mut ops);
        assert_eq!(ops, vec![RenderOp::Text("b".into())]);
    }

    #[test]
    fn interior_insert_redraws_with_reposition() {
        let mut echo = controller();
        let mut ops: Vec<RenderOp> = Vec::new();
        echo.sync(&buffer("acd", 3), &mut ops);
        ops.clear();
        // Insert 'b' at offset 1: cursor lands at 2 of 4.
        echo.sync(&buffer("abcd", 2), &mut ops);
        assert_eq!(
            ops,
            vec![
                RenderOp::ClearLine,
                RenderOp::Text("$ ".into()),
                RenderOp::Text("abcd".into()),
                RenderOp::CursorLeft(2),
            ]
        );
    }

    #[test]
    fn tail_delete_is_a_rubout() {
        let mut echo = controller();
        let mut ops: Vec<RenderOp> = Vec::new();
        echo.sync(&buffer("ab", 2), &mut ops);
        ops.clear();
        echo.sync(&buffer("a", 1), &mut ops);
        assert_eq!(ops, vec![RenderOp::Rubout]);
    }

    #[test]
    fn cursor_relocation_redraws() {
        let mut echo = controller();
        let mut ops: Vec<RenderOp> = Vec::new();
        echo.sync(&buffer("abc", 3), &mut ops);
        ops.clear();
        echo.sync(&buffer("abc", 1), &mut ops);
        assert_eq!(
            ops,
            vec![
                RenderOp::ClearLine,
                RenderOp::Text("$ ".into()),
                RenderOp::Text("abc".into()),
                RenderOp::CursorLeft(2),
            ]
        );
    }

    #[test]
    fn unchanged_buffer_emits_nothing() {
        let mut echo = controller();
        let mut ops: Vec<RenderOp> = Vec::new();
        echo.sync(&buffer("abc", 3), &mut ops);
        ops.clear();
        echo.sync(&buffer("abc", 3), &mut ops);
        assert!(ops.is_empty());
    }

    #[test]
    fn redraw_with_cursor_at_end_skips_reposition() {
        let mut echo = controller();
        let mut ops: Vec<RenderOp> = Vec::new();
        // History load: fresh cache, non-empty buffer, cursor at end.
        echo.show_prompt(&mut ops);
        ops.clear();
        echo.sync(&buffer("help", 4), &mut ops);
        assert_eq!(
            ops,
            vec![
                RenderOp::ClearLine,
                RenderOp::Text("$ ".into()),
                RenderOp::Text("help".into()),
            ]
        );
    }

    #[test]
    fn masked_incremental_echo_writes_mask() {
        let mut echo = controller();
        echo.set_masked(true);
        let mut ops: Vec<RenderOp> = Vec::new();
        echo.sync(&buffer("s", 1), &mut ops);
        assert_eq!(ops, vec![RenderOp::Text("*".into())]);
    }

    #[test]
    fn masked_redraw_masks_every_grapheme() {
        let mut echo = controller();
        echo.set_masked(true);
        let mut ops: Vec<RenderOp> = Vec::new();
        echo.sync(&buffer("secret", 3), &mut ops);
        assert_eq!(
            ops,
            vec![
                RenderOp::ClearLine,
                RenderOp::Text("$ ".into()),
                RenderOp::Text("******".into()),
                RenderOp::CursorLeft(3),
            ]
        );
    }

    #[test]
    fn show_prompt_resets_cache() {
        let mut echo = controller();
        let mut ops: Vec<RenderOp> = Vec::new();
        echo.sync(&buffer("abc", 3), &mut ops);
        echo.show_prompt(&mut ops);
        ops.clear();
        // Single grapheme on a fresh line goes out incrementally.
        echo.sync(&buffer("x", 1), &mut ops);
        assert_eq!(ops, vec![RenderOp::Text("x".into())]);
    }

    #[test]
    fn multi_grapheme_append_redraws() {
        let mut echo = controller();
        let mut ops: Vec<RenderOp> = Vec::new();
        echo.sync(&buffer("a", 1), &mut ops);
        ops.clear();
        // Completion substituted several graphemes at once.
        echo.sync(&buffer("about", 5), &mut ops);
        assert_eq!(ops[0], RenderOp::ClearLine);
    }

    proptest! {
        #[test]
        fn cache_always_matches_buffer_after_sync(
            texts in prop::collection::vec("[a-z ]{0,10}", 1..24),
            cursors in prop::collection::vec(0usize..16, 1..24),
        ) {
            let mut echo = controller();
            let mut ops: Vec<RenderOp> = Vec::new();
            for (text, cursor) in texts.iter().zip(cursors.iter()) {
                let buf = buffer(text, *cursor);
                echo.sync(&buf, &mut ops);
                prop_assert_eq!(echo.last_text.as_str(), buf.text());
                prop_assert_eq!(echo.last_cursor, buf.cursor());
            }
        }
    }
}
