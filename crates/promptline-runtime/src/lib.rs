#![forbid(unsafe_code)]

//! Promptline runtime: the session orchestrator.
//!
//! This crate ties the editing primitives and the render layer into a
//! complete interactive console session. It classifies key events,
//! drives the line buffer and history, guards protected commands behind
//! the authentication gate, and mediates the executor boundary.
//!
//! # Key Components
//!
//! - [`Session`] - the exclusively-owned session state machine
//! - [`Msg`] / [`Cmd`] - the message/command contract with the host
//! - [`SessionConfig`] - protected set, credential, prompts, banner
//! - [`AuthGate`] - password challenge state machine with a shared
//!   sliding expiry window
//! - [`CommandExecutor`] / [`Reply`] - the executor boundary
//!
//! # How it fits in the system
//! The runtime is the center of the architecture: hosts feed it
//! [`Msg`]s (key events, executor replies, expiry ticks) and execute
//! the [`Cmd`]s it returns (run the executor, schedule the expiry
//! timer). Rendering flows out through the sink the session owns.

pub mod auth;
pub mod completion;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod keymap;
pub mod session;

pub use auth::{ArmExpiry, AuthGate, AuthState, SecretOutcome};
pub use config::SessionConfig;
pub use error::ExecutorError;
pub use executor::{CommandExecutor, Reply};
pub use keymap::EditorAction;
pub use session::{Cmd, Msg, Session};
