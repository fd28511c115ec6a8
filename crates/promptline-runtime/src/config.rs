#![forbid(unsafe_code)]

//! Session configuration.
//!
//! Everything a deployment tunes lives here: the protected-command set
//! and its credential, the sliding session window, the prompt strings,
//! the mask character, the welcome banner, and the completion
//! candidates. Defaults mirror the reference deployment.

use std::collections::HashSet;
use std::fmt;

use promptline_render::{Ansi16, Style};
use web_time::Duration;

/// Configuration for a console session.
#[derive(Clone)]
pub struct SessionConfig {
    /// Prompt prefix written on every fresh line (may carry SGR).
    pub prompt: String,

    /// Prompt prefix while a secret is being entered.
    pub secret_prompt: String,

    /// Banner shown at session start and on `reset`.
    pub welcome: String,

    /// Command tokens requiring a password challenge (lowercase).
    pub protected: HashSet<String>,

    /// The fixed credential protected commands are gated behind.
    pub credential: String,

    /// Sliding window during which unlocked commands stay unlocked.
    pub session_window: Duration,

    /// Placeholder character echoed while a secret is typed.
    pub mask: char,

    /// Candidate commands for tab completion.
    pub completions: Vec<String>,
}

impl SessionConfig {
    /// Create a config with the default deployment values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prompt prefix (builder).
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the secret prompt prefix (builder).
    #[must_use]
    pub fn with_secret_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.secret_prompt = prompt.into();
        self
    }

    /// Set the welcome banner (builder).
    #[must_use]
    pub fn with_welcome(mut self, welcome: impl Into<String>) -> Self {
        self.welcome = welcome.into();
        self
    }

    /// Set the protected command set (builder). Tokens are lowercased.
    #[must_use]
    pub fn with_protected<I, T>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.protected = commands
            .into_iter()
            .map(|c| c.into().to_lowercase())
            .collect();
        self
    }

    /// Set the credential (builder).
    #[must_use]
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = credential.into();
        self
    }

    /// Set the sliding session window (builder).
    #[must_use]
    pub fn with_session_window(mut self, window: Duration) -> Self {
        self.session_window = window;
        self
    }

    /// Set the secret mask character (builder).
    #[must_use]
    pub fn with_mask(mut self, mask: char) -> Self {
        self.mask = mask;
        self
    }

    /// Set the tab-completion candidates (builder).
    #[must_use]
    pub fn with_completions<I, T>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.completions = candidates.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        let user = Style::new().fg(Ansi16::BrightCyan).paint("guest");
        let host = Style::new().fg(Ansi16::BrightYellow).paint("console");
        let path = Style::new().fg(Ansi16::BrightBlue).paint("~");
        let help = Style::new().fg(Ansi16::Yellow).paint("help");
        Self {
            prompt: format!("{user}@{host}:{path}$ "),
            secret_prompt: format!("{} ", Style::new().fg(Ansi16::Yellow).paint("Password:")),
            welcome: format!(
                "{}\n\nType '{help}' to see available commands or start exploring.\n",
                Style::new().fg(Ansi16::Cyan).paint("Welcome to the interactive console!"),
            ),
            protected: ["resume".to_string()].into(),
            credential: "foo2025".to_string(),
            session_window: Duration::from_secs(5 * 60),
            mask: '*',
            completions: [
                "help", "ls", "about", "projects", "skills", "contact", "resume", "clear",
                "reset",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

// The credential stays out of debug output.
impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("prompt", &self.prompt)
            .field("secret_prompt", &self.secret_prompt)
            .field("protected", &self.protected)
            .field("credential", &"<redacted>")
            .field("session_window", &self.session_window)
            .field("mask", &self.mask)
            .field("completions", &self.completions)
            .finish_non_exhaustive()
    }
}
