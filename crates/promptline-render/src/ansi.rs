#![forbid(unsafe_code)]

//! ANSI encoding of render directives.
//!
//! A thin translation layer: [`encode_into`] maps each [`RenderOp`] to
//! its escape sequence, and [`AnsiWriter`] adapts any [`io::Write`] as a
//! [`RenderSink`]. Write errors are swallowed: the sink is
//! fire-and-forget by contract and the session must not die because a
//! display went away.

use std::io::{self, Write};

use crate::op::{RenderOp, RenderSink};

/// Erase entire line: CSI 2 K.
const ERASE_LINE: &str = "\x1b[2K";

/// Erase display: CSI 2 J.
const ERASE_DISPLAY: &str = "\x1b[2J";

/// Home the cursor: CSI H.
const CURSOR_HOME: &str = "\x1b[H";

/// Backspace, overwrite with a space, backspace again.
const RUBOUT: &str = "\x08 \x08";

/// Append the escape-sequence encoding of `op` to `out`.
pub fn encode_into(op: &RenderOp, out: &mut String) {
    match op {
        RenderOp::Text(text) => out.push_str(text),
        RenderOp::Newline => out.push_str("\r\n"),
        RenderOp::Rubout => out.push_str(RUBOUT),
        RenderOp::CursorLeft(0) | RenderOp::CursorRight(0) => {}
        RenderOp::CursorLeft(n) => {
            out.push_str(&format!("\x1b[{n}D"));
        }
        RenderOp::CursorRight(n) => {
            out.push_str(&format!("\x1b[{n}C"));
        }
        RenderOp::ClearLine => {
            out.push('\r');
            out.push_str(ERASE_LINE);
        }
        RenderOp::ClearScreen => {
            out.push_str(ERASE_DISPLAY);
            out.push_str(CURSOR_HOME);
        }
    }
}

/// Encode a single directive to its escape-sequence form.
#[must_use]
pub fn encode(op: &RenderOp) -> String {
    let mut out = String::new();
    encode_into(op, &mut out);
    out
}

/// A [`RenderSink`] writing ANSI escape sequences to any [`io::Write`].
#[derive(Debug)]
pub struct AnsiWriter<W: Write> {
    inner: W,
}

impl<W: Write> AnsiWriter<W> {
    /// Wrap a writer. The writer is owned for the sink's lifetime.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap back into the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> RenderSink for AnsiWriter<W> {
    fn apply(&mut self, op: RenderOp) {
        let mut out = String::new();
        encode_into(&op, &mut out);
        // Fire-and-forget: a broken display surface must not take the
        // session down with it.
        let _ = self.inner.write_all(out.as_bytes());
    }
}
