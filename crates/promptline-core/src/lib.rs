#![forbid(unsafe_code)]

//! Promptline core: the editing primitives of the console engine.
//!
//! This crate has no I/O. It defines the key-event vocabulary hosts feed
//! into the engine, the grapheme-indexed line buffer with its cursor, the
//! word/line motions over it, and the submitted-line history log.
//!
//! # Role in Promptline
//! `promptline-core` is the bottom layer: `promptline-render` reads buffer
//! state to drive echo decisions, and `promptline-runtime` mutates it in
//! response to classified key events.

pub mod buffer;
pub mod event;
pub mod history;
pub mod motion;

pub use buffer::LineBuffer;
pub use event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use history::History;
