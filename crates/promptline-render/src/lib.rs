#![forbid(unsafe_code)]

//! Promptline render layer: what to draw, decided separately from how to
//! encode it.
//!
//! The echo controller diffs the line buffer against its cached render
//! state and emits [`RenderOp`] directives: incremental echo for tail
//! edits, a full line redraw for everything else. The ANSI encoder is a
//! thin, independently testable translation from directives to escape
//! sequences; hosts that are not ANSI terminals implement [`RenderSink`]
//! themselves and never see an escape byte.
//!
//! # Role in Promptline
//! Sits between `promptline-core` (buffer state) and
//! `promptline-runtime` (which owns the session and decides *when* to
//! render).

pub mod ansi;
pub mod echo;
pub mod op;
pub mod style;

pub use ansi::AnsiWriter;
pub use echo::EchoController;
pub use op::{RenderOp, RenderSink};
pub use style::{Ansi16, Style};
