#![forbid(unsafe_code)]

//! Render directives and the write-only sink that consumes them.

/// A single display directive.
///
/// Directives are the whole vocabulary the engine uses to talk to a
/// display surface: styled text plus a handful of discrete cursor and
/// erase motions. The engine never reads back from the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    /// Write text at the cursor. May carry SGR styling; never carries
    /// cursor-motion escapes.
    Text(String),

    /// Start a new display line (carriage return + line feed).
    Newline,

    /// Erase the grapheme just written: backspace, space, backspace.
    Rubout,

    /// Move the cursor left by N columns.
    CursorLeft(u16),

    /// Move the cursor right by N columns.
    CursorRight(u16),

    /// Return to column 0 and erase the entire line.
    ClearLine,

    /// Erase the screen and home the cursor.
    ClearScreen,
}

/// A write-only display surface.
///
/// Sinks are fire-and-forget from the engine's perspective: `apply` has
/// no return value and must not block the session on display errors.
pub trait RenderSink {
    /// Consume one directive.
    fn apply(&mut self, op: RenderOp);
}

/// Recording sink: collects directives for inspection in tests.
impl RenderSink for Vec<RenderOp> {
    fn apply(&mut self, op: RenderOp) {
        self.push(op);
    }
}
