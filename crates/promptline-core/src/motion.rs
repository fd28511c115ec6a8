#![forbid(unsafe_code)]

//! Word and line motions over the line buffer.
//!
//! The targets (`word_back`, `word_forward`) are pure functions reading
//! the buffer; the deletions splice the computed range out. Words are
//! space-delimited: a motion first crosses any run of spaces, then the
//! adjacent run of non-spaces. Operating at either extreme is a safe
//! no-op for motions; deletions at the extremes degrade to "delete
//! everything on that side".

use unicode_segmentation::UnicodeSegmentation;

use crate::buffer::LineBuffer;

fn is_space(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

/// Offset of the start of the word at or before the cursor.
///
/// From the cursor, skips any spaces leftward, then the run of
/// non-spaces leftward. Returns 0 when the buffer start is reached.
#[must_use]
pub fn word_back(buf: &LineBuffer) -> usize {
    let graphemes: Vec<&str> = buf.text().graphemes(true).collect();
    let mut pos = buf.cursor();

    while pos > 0 && is_space(graphemes[pos - 1]) {
        pos -= 1;
    }
    while pos > 0 && !is_space(graphemes[pos - 1]) {
        pos -= 1;
    }
    pos
}

/// Offset just past the word at the cursor plus any trailing spaces.
///
/// From the cursor, skips the run of non-spaces rightward, then the
/// following run of spaces. Returns the buffer length when the end is
/// reached.
#[must_use]
pub fn word_forward(buf: &LineBuffer) -> usize {
    let graphemes: Vec<&str> = buf.text().graphemes(true).collect();
    let max = graphemes.len();
    let mut pos = buf.cursor().min(max);

    while pos < max && !is_space(graphemes[pos]) {
        pos += 1;
    }
    while pos < max && is_space(graphemes[pos]) {
        pos += 1;
    }
    pos
}

/// Delete from the previous word boundary to the cursor.
pub fn delete_word_back(buf: &mut LineBuffer) {
    let boundary = word_back(buf);
    buf.delete_range(boundary, buf.cursor());
}

/// Delete from the cursor to the next word boundary.
pub fn delete_word_forward(buf: &mut LineBuffer) {
    let boundary = word_forward(buf);
    buf.delete_range(buf.cursor(), boundary);
}

/// Delete `[0, cursor)`; the cursor lands at 0.
///
/// With the cursor already at 0 the whole line is cleared instead.
pub fn kill_to_start(buf: &mut LineBuffer) {
    if buf.cursor() == 0 {
        buf.clear();
    } else {
        buf.delete_range(0, buf.cursor());
    }
}

/// Delete `[cursor, len)`; the cursor is unchanged (now at the new end).
pub fn kill_to_end(buf: &mut LineBuffer) {
    buf.delete_range(buf.cursor(), buf.grapheme_count());
}
