#![forbid(unsafe_code)]

//! The authentication gate: a password challenge in front of protected
//! commands, with one shared sliding session window.
//!
//! # State Machine
//!
//! ```text
//! ┌────────┐  protected, locked   ┌────────────────┐
//! │ Normal │─────────────────────▶│ AwaitingSecret │
//! └────────┘                      └────────────────┘
//!      ▲      match: unlock + arm timer │
//!      │      mismatch/empty: discard   │
//!      └────────────────────────────────┘
//! ```
//!
//! A successful unlock adds the pending command's token to the unlocked
//! set and (re)arms a single shared expiry window; further unlocks
//! refresh the same window rather than stacking timers. The timer is an
//! explicit schedulable event: `arm` hands out a generation number, the
//! host delivers the expiry back with it, and stale generations are
//! ignored. The generation counter is the cancel/reset handle.
//!
//! `is_authenticated` also checks the expiry instant directly, so a
//! host that never delivers the timer event still cannot stretch the
//! window.
//!
//! The secret is compared trimmed, never stored, and never printed.

use std::collections::HashSet;
use std::fmt;

use web_time::{Duration, Instant};

use crate::dispatch;

/// Gate state: either idle or holding a pending command while the
/// secret is typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// No challenge in progress.
    #[default]
    Normal,
    /// A protected submission is parked while the secret is entered.
    AwaitingSecret {
        /// The raw line that triggered the challenge.
        pending: String,
    },
}

/// Request to (re)arm the shared expiry timer.
///
/// Hosts schedule an `AuthExpired` message with this generation after
/// `window`; scheduling replaces any earlier timer for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmExpiry {
    /// Identifies this arming; stale generations are ignored on expiry.
    pub generation: u64,
    /// How long the unlocked set stays valid.
    pub window: Duration,
}

/// Result of submitting a secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretOutcome {
    /// The secret matched: re-dispatch `line` and arm the timer.
    Unlocked {
        /// The pending command, released for normal dispatch.
        line: String,
        /// Timer arming request for the host.
        arm: ArmExpiry,
    },
    /// The secret did not match. The pending command is discarded.
    Rejected,
    /// An empty secret: treated as explicit cancellation.
    Cancelled,
}

/// The authentication gate.
#[derive(Clone)]
pub struct AuthGate {
    protected: HashSet<String>,
    credential: String,
    window: Duration,
    state: AuthState,
    unlocked: HashSet<String>,
    expires_at: Option<Instant>,
    generation: u64,
}

impl AuthGate {
    /// Create a gate for the given protected set and credential.
    #[must_use]
    pub fn new(protected: HashSet<String>, credential: String, window: Duration) -> Self {
        Self {
            protected,
            credential,
            window,
            state: AuthState::Normal,
            unlocked: HashSet::new(),
            expires_at: None,
            generation: 0,
        }
    }

    /// Current gate state.
    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Whether a challenge is in progress.
    #[must_use]
    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, AuthState::AwaitingSecret { .. })
    }

    /// Whether a command token is in the protected set.
    #[must_use]
    pub fn is_protected(&self, token: &str) -> bool {
        self.protected.contains(token)
    }

    /// Whether a token is currently unlocked at `now`.
    #[must_use]
    pub fn is_authenticated(&self, token: &str, now: Instant) -> bool {
        self.unlocked.contains(token) && self.expires_at.is_some_and(|expiry| now < expiry)
    }

    /// Whether submitting this token at `now` must be challenged.
    #[must_use]
    pub fn requires_challenge(&self, token: &str, now: Instant) -> bool {
        self.is_protected(token) && !self.is_authenticated(token, now)
    }

    /// Park a protected submission and start awaiting the secret.
    pub fn challenge(&mut self, line: String) {
        self.state = AuthState::AwaitingSecret { pending: line };
    }

    /// Compare a submitted secret against the credential.
    ///
    /// Whatever the outcome, the gate returns to `Normal` and the
    /// pending command leaves the gate (released on success, dropped
    /// otherwise).
    pub fn submit_secret(&mut self, secret: &str, now: Instant) -> SecretOutcome {
        let AuthState::AwaitingSecret { pending } = core::mem::take(&mut self.state) else {
            return SecretOutcome::Cancelled;
        };

        let secret = secret.trim();
        if secret.is_empty() {
            return SecretOutcome::Cancelled;
        }
        if secret != self.credential {
            return SecretOutcome::Rejected;
        }

        self.unlocked.insert(dispatch::command_token(&pending));
        self.expires_at = Some(now + self.window);
        self.generation += 1;
        SecretOutcome::Unlocked {
            line: pending,
            arm: ArmExpiry {
                generation: self.generation,
                window: self.window,
            },
        }
    }

    /// Abort a challenge without comparing anything.
    ///
    /// Returns `true` if a challenge was actually in progress. The
    /// pending command is discarded, not restored.
    pub fn cancel(&mut self) -> bool {
        if self.is_awaiting() {
            self.state = AuthState::Normal;
            true
        } else {
            false
        }
    }

    /// Handle the expiry timer firing.
    ///
    /// Clears the entire unlocked set when the generation matches the
    /// latest arming and there is anything to clear. A stale generation
    /// (the timer was refreshed after this one was scheduled) does
    /// nothing.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation == self.generation && !self.unlocked.is_empty() {
            self.unlocked.clear();
            self.expires_at = None;
            true
        } else {
            false
        }
    }

    /// Full relock for a session reset: clears the challenge, the
    /// unlocked set, and the window, and invalidates in-flight timers.
    pub fn relock(&mut self) {
        self.state = AuthState::Normal;
        self.unlocked.clear();
        self.expires_at = None;
        self.generation += 1;
    }
}

// The credential stays out of debug output.
impl fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthGate")
            .field("protected", &self.protected)
            .field("state", &self.state)
            .field("unlocked", &self.unlocked)
            .field("expires_at", &self.expires_at)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
