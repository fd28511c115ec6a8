#![forbid(unsafe_code)]

//! The session: one exclusively-owned console state machine.
//!
//! A [`Session`] owns every piece of per-session state (line buffer,
//! history, authentication gate, echo controller, render sink) and is
//! driven by messages:
//!
//! - [`Msg::Key`] for each keystroke,
//! - [`Msg::ExecutorReply`] when the host finishes an executor call,
//! - [`Msg::AuthExpired`] when the host's expiry timer fires.
//!
//! `update` processes one message to completion and returns a [`Cmd`]
//! describing the side effects the host must perform: run the executor
//! with a line, or (re)schedule the authentication expiry timer. While
//! an executor call is pending, keystrokes keep editing the buffer, but
//! further submissions queue and drain one at a time as replies arrive;
//! the prompt only returns once the pending reply has been rendered.
//!
//! # Example
//!
//! ```
//! use promptline_render::RenderOp;
//! use promptline_runtime::{Cmd, Msg, Session, SessionConfig};
//! use promptline_core::{KeyCode, KeyEvent};
//!
//! let mut session = Session::new(SessionConfig::default(), Vec::<RenderOp>::new());
//! session.start();
//! for c in "help".chars() {
//!     session.update(Msg::Key(KeyEvent::new(KeyCode::Char(c))));
//! }
//! let cmd = session.update(Msg::Key(KeyEvent::new(KeyCode::Enter)));
//! assert!(matches!(cmd, Cmd::Run(line) if line == "help"));
//! ```

use std::collections::VecDeque;

use promptline_core::{History, KeyEvent, LineBuffer, motion};
use promptline_render::{Ansi16, EchoController, RenderOp, RenderSink, Style};
use serde_json::Value;
use web_time::{Duration, Instant};

use crate::auth::{AuthGate, SecretOutcome};
use crate::completion;
use crate::config::SessionConfig;
use crate::dispatch;
use crate::error::ExecutorError;
use crate::executor::Reply;
use crate::keymap::{self, EditorAction};

/// A message into the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A keystroke from the host.
    Key(KeyEvent),

    /// The result of the executor call the session asked for.
    ExecutorReply(Result<String, ExecutorError>),

    /// The authentication expiry timer fired.
    ///
    /// Carries the generation from the [`Cmd::ArmExpiry`] that armed
    /// it; stale generations are ignored.
    AuthExpired {
        /// Generation of the arming this firing belongs to.
        generation: u64,
    },
}

/// Side effects for the host to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// No operation.
    None,

    /// Call the executor with this command line, then feed the result
    /// back as [`Msg::ExecutorReply`].
    Run(String),

    /// Schedule [`Msg::AuthExpired`] with this generation after
    /// `window`, replacing any earlier schedule.
    ArmExpiry {
        /// Generation to echo back on expiry.
        generation: u64,
        /// Delay before the timer fires.
        window: Duration,
    },

    /// Execute these commands in order.
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a no-op command.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a batch, collapsing trivial cases.
    #[must_use]
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds
            .into_iter()
            .filter(|cmd| !matches!(cmd, Self::None))
            .collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }
}

/// An interactive console session.
///
/// Generic over the render sink so hosts plug in an
/// [`promptline_render::AnsiWriter`], a DOM bridge, or a plain
/// `Vec<RenderOp>` in tests.
#[derive(Debug)]
pub struct Session<S: RenderSink> {
    config: SessionConfig,
    buffer: LineBuffer,
    history: History,
    auth: AuthGate,
    echo: EchoController,
    sink: S,
    /// An executor call is pending; no second dispatch until it lands.
    in_flight: bool,
    /// Submissions made while a dispatch was in flight.
    queued: VecDeque<String>,
    /// Opaque `data` of the most recent structured reply.
    last_data: Option<Value>,
}

impl<S: RenderSink> Session<S> {
    /// Create a session over a render sink.
    #[must_use]
    pub fn new(config: SessionConfig, sink: S) -> Self {
        let auth = AuthGate::new(
            config.protected.clone(),
            config.credential.clone(),
            config.session_window,
        );
        let echo = EchoController::new(config.prompt.clone()).with_mask(config.mask);
        Self {
            config,
            buffer: LineBuffer::new(),
            history: History::new(),
            auth,
            echo,
            sink,
            in_flight: false,
            queued: VecDeque::new(),
            last_data: None,
        }
    }

    /// Show the welcome banner and the first prompt.
    pub fn start(&mut self) {
        let welcome = self.config.welcome.clone();
        self.write_block(&welcome, Style::new());
        self.echo.show_prompt(&mut self.sink);
    }

    /// Process one message to completion.
    pub fn update(&mut self, msg: Msg) -> Cmd {
        match msg {
            Msg::Key(key) => self.on_key(&key),
            Msg::ExecutorReply(result) => self.on_reply(result),
            Msg::AuthExpired { generation } => self.on_expired(generation),
        }
    }

    /// The line buffer being edited.
    #[must_use]
    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// The history log.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The authentication gate.
    #[must_use]
    pub fn auth(&self) -> &AuthGate {
        &self.auth
    }

    /// The render sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the render sink (e.g. to drain a recording).
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Whether an executor call is currently pending.
    #[must_use]
    pub fn is_dispatch_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Opaque `data` payload of the most recent structured reply.
    #[must_use]
    pub fn last_reply_data(&self) -> Option<&Value> {
        self.last_data.as_ref()
    }

    // --- Key handling ---

    fn on_key(&mut self, key: &KeyEvent) -> Cmd {
        let Some(action) = keymap::classify(key) else {
            return Cmd::none();
        };

        if self.auth.is_awaiting() {
            return self.on_secret_action(action);
        }

        match action {
            EditorAction::Insert(c) => {
                self.buffer.insert_char(c);
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::DeleteBack => {
                self.buffer.delete_back();
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::DeleteForward => {
                self.buffer.delete_forward();
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::DeleteWordBack => {
                motion::delete_word_back(&mut self.buffer);
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::DeleteWordForward => {
                motion::delete_word_forward(&mut self.buffer);
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::KillToStart => {
                motion::kill_to_start(&mut self.buffer);
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::KillToEnd => {
                motion::kill_to_end(&mut self.buffer);
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::MoveLeft => {
                self.buffer.move_left();
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::MoveRight => {
                self.buffer.move_right();
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::MoveLineStart => {
                self.buffer.move_to(0);
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::MoveLineEnd => {
                let end = self.buffer.grapheme_count();
                self.buffer.move_to(end);
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::MoveWordBack => {
                let target = motion::word_back(&self.buffer);
                self.buffer.move_to(target);
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::MoveWordForward => {
                let target = motion::word_forward(&self.buffer);
                self.buffer.move_to(target);
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::HistoryPrev => {
                if let Some(entry) = self.history.previous() {
                    self.buffer.set_text(entry);
                }
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::HistoryNext => {
                match self.history.next() {
                    Some(entry) => self.buffer.set_text(entry),
                    None => self.buffer.clear(),
                }
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::Complete => {
                if let Some(candidate) =
                    completion::complete(self.buffer.text(), &self.config.completions)
                {
                    self.buffer.set_text(candidate);
                }
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::ClearScreen => {
                self.buffer.clear();
                self.echo.show_prompt_cleared(&mut self.sink);
            }
            EditorAction::Cancel => {
                self.buffer.clear();
                self.echo.show_prompt(&mut self.sink);
            }
            EditorAction::Submit => return self.submit(),
        }
        Cmd::none()
    }

    /// Key handling while a secret is being typed: only insert,
    /// backspace, submit, and cancel act; everything else is ignored.
    fn on_secret_action(&mut self, action: EditorAction) -> Cmd {
        match action {
            EditorAction::Insert(c) => {
                self.buffer.insert_char(c);
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::DeleteBack => {
                self.buffer.delete_back();
                self.echo.sync(&self.buffer, &mut self.sink);
            }
            EditorAction::Submit => return self.submit_secret(),
            EditorAction::Cancel => {
                self.auth.cancel();
                self.buffer.clear();
                self.unmask();
                self.echo.show_prompt(&mut self.sink);
            }
            _ => {}
        }
        Cmd::none()
    }

    // --- Submission ---

    fn submit(&mut self) -> Cmd {
        let raw = self.buffer.text().to_string();
        self.buffer.clear();
        self.sink.apply(RenderOp::Newline);
        // The committed line scrolled away; nothing of it remains on
        // the input row.
        self.echo.mark_clean();

        let line = dispatch::normalize(&raw);
        if line.is_empty() {
            self.echo.show_prompt(&mut self.sink);
            return Cmd::none();
        }

        if self.in_flight {
            self.queued.push_back(line);
            return Cmd::none();
        }

        // A challenge popped from the queue and then cancelled can
        // leave earlier submissions parked; dispatch stays first-in
        // first-out.
        if let Some(next) = self.queued.pop_front() {
            self.queued.push_back(line);
            return self.dispatch(next);
        }

        self.dispatch(line)
    }

    fn submit_secret(&mut self) -> Cmd {
        let secret = self.buffer.text().to_string();
        self.buffer.clear();
        self.unmask();

        match self.auth.submit_secret(&secret, Instant::now()) {
            SecretOutcome::Unlocked { line, arm } => {
                #[cfg(feature = "tracing")]
                self.trace("auth_unlocked");
                self.sink.apply(RenderOp::Newline);
                let notice = Style::new()
                    .fg(Ansi16::Green)
                    .paint("\u{2713} Authentication successful");
                self.sink.apply(RenderOp::Text(notice));
                // Blank line between the notice and the command output.
                self.sink.apply(RenderOp::Newline);
                self.sink.apply(RenderOp::Newline);
                self.echo.mark_clean();
                let run = self.dispatch(line);
                Cmd::batch(vec![
                    Cmd::ArmExpiry {
                        generation: arm.generation,
                        window: arm.window,
                    },
                    run,
                ])
            }
            SecretOutcome::Rejected => {
                #[cfg(feature = "tracing")]
                self.trace("auth_rejected");
                self.sink.apply(RenderOp::Newline);
                let notice = Style::new()
                    .fg(Ansi16::Red)
                    .paint("\u{2717} Authentication failed");
                self.sink.apply(RenderOp::Text(notice));
                self.echo.show_prompt(&mut self.sink);
                Cmd::none()
            }
            SecretOutcome::Cancelled => {
                #[cfg(feature = "tracing")]
                self.trace("auth_cancelled");
                self.sink.apply(RenderOp::Newline);
                let notice = Style::new().fg(Ansi16::Yellow).paint("Authentication failed.");
                self.sink.apply(RenderOp::Text(notice));
                self.echo.show_prompt(&mut self.sink);
                Cmd::none()
            }
        }
    }

    // --- Dispatch ---

    /// Dispatch a normalized, non-empty line.
    fn dispatch(&mut self, line: String) -> Cmd {
        let token = dispatch::command_token(&line);

        match token.as_str() {
            "clear" => {
                #[cfg(feature = "tracing")]
                self.trace("builtin_clear");
                self.echo.show_prompt_cleared(&mut self.sink);
                return Cmd::none();
            }
            "reset" => {
                #[cfg(feature = "tracing")]
                self.trace("builtin_reset");
                self.history.clear();
                self.auth.relock();
                self.queued.clear();
                self.sink.apply(RenderOp::ClearScreen);
                let welcome = self.config.welcome.clone();
                self.write_block(&welcome, Style::new());
                self.echo.show_prompt(&mut self.sink);
                return Cmd::none();
            }
            _ => {}
        }

        if self.auth.requires_challenge(&token, Instant::now()) {
            #[cfg(feature = "tracing")]
            self.trace("auth_challenge");
            self.sink.apply(RenderOp::Newline);
            let notice = Style::new()
                .fg(Ansi16::Yellow)
                .paint("This command requires authentication.");
            self.sink.apply(RenderOp::Text(notice));
            self.auth.challenge(line);
            self.echo.set_masked(true);
            self.echo.set_prompt(self.config.secret_prompt.clone());
            self.echo.show_prompt(&mut self.sink);
            return Cmd::none();
        }

        #[cfg(feature = "tracing")]
        self.trace("dispatch_run");
        self.history.record(&line);
        self.in_flight = true;
        Cmd::Run(line)
    }

    // --- Executor replies ---

    fn on_reply(&mut self, result: Result<String, ExecutorError>) -> Cmd {
        self.in_flight = false;

        match result {
            Ok(raw) => {
                let reply = Reply::parse(&raw);
                self.last_data = reply.data;
                let style = if reply.success {
                    Style::new()
                } else {
                    Style::new().fg(Ansi16::BrightRed)
                };
                let output = reply.output;
                self.write_block(&output, style);
            }
            Err(ExecutorError::Unavailable) => {
                let notice = "Command executor not ready yet. Please wait...";
                self.write_block(notice, Style::new().fg(Ansi16::Yellow));
            }
            Err(ExecutorError::Failed(message)) => {
                let notice = format!("Error executing command: {message}");
                self.write_block(&notice, Style::new().fg(Ansi16::Red));
            }
        }

        if let Some(next) = self.queued.pop_front() {
            return self.dispatch(next);
        }

        self.echo.show_prompt(&mut self.sink);
        // Repaint anything typed while the call was pending.
        self.echo.sync(&self.buffer, &mut self.sink);
        Cmd::none()
    }

    // --- Expiry ---

    fn on_expired(&mut self, generation: u64) -> Cmd {
        if self.auth.expire(generation) {
            #[cfg(feature = "tracing")]
            self.trace("auth_expired");
            self.sink.apply(RenderOp::Newline);
            let notice = Style::new()
                .fg(Ansi16::Yellow)
                .paint("Authentication session expired.");
            self.sink.apply(RenderOp::Text(notice));
            self.echo.show_prompt(&mut self.sink);
            self.echo.sync(&self.buffer, &mut self.sink);
        }
        Cmd::none()
    }

    // --- Helpers ---

    fn unmask(&mut self) {
        self.echo.set_masked(false);
        self.echo.set_prompt(self.config.prompt.clone());
    }

    /// Write a possibly multi-line block, one text directive per line.
    ///
    /// No trailing newline: the prompt that follows supplies the break.
    fn write_block(&mut self, text: &str, style: Style) {
        let mut first = true;
        for line in text.lines() {
            if !first {
                self.sink.apply(RenderOp::Newline);
            }
            if !line.is_empty() {
                self.sink.apply(RenderOp::Text(style.paint(line)));
            }
            first = false;
        }
    }

    #[cfg(feature = "tracing")]
    fn trace(&self, operation: &'static str) {
        let _span = tracing::debug_span!(
            "session.update",
            operation,
            in_flight = self.in_flight,
            queued = self.queued.len(),
            history_len = self.history.len()
        )
        .entered();
    }
}
