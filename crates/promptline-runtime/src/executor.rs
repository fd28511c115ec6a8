#![forbid(unsafe_code)]

//! The executor boundary: running command lines and parsing replies.
//!
//! The executor is an external collaborator. It receives the full
//! normalized command line and answers with a string that is either a
//! JSON payload `{"success": bool, "output": string, "data"?: any}` or
//! plain text. Plain text (and any string that fails to parse as the
//! payload shape) is treated as success-with-text for backward
//! compatibility.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ExecutorError;

/// A parsed executor reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reply {
    /// Whether the command succeeded. Failures render in error style.
    pub success: bool,

    /// Text to display.
    pub output: String,

    /// Opaque structured payload, passed through untouched for hosts
    /// that want it.
    #[serde(default)]
    pub data: Option<Value>,
}

impl Reply {
    /// A plain successful text reply.
    #[must_use]
    pub fn text(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            data: None,
        }
    }

    /// Parse a raw executor answer.
    ///
    /// Anything that is not a well-formed payload object falls back to
    /// success-with-text carrying the raw string verbatim.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| Self::text(raw))
    }
}

/// The external command executor.
///
/// `run` may suspend in the host's world (a wasm module call, a network
/// round trip); the session never calls it directly. Hosts call it when
/// the session returns a run command and feed the result back as an
/// executor-reply message.
pub trait CommandExecutor {
    /// Execute a full command line (command token plus arguments).
    fn run(&mut self, line: &str) -> Result<String, ExecutorError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_structured_success() {
        let reply = Reply::parse(r#"{"success":true,"output":"hello"}"#);
        assert!(reply.success);
        assert_eq!(reply.output, "hello");
        assert_eq!(reply.data, None);
    }

    #[test]
    fn parses_structured_failure() {
        let reply = Reply::parse(r#"{"success":false,"output":"unknown command"}"#);
        assert!(!reply.success);
        assert_eq!(reply.output, "unknown command");
    }

    #[test]
    fn carries_opaque_data_through() {
        let reply =
            Reply::parse(r#"{"success":true,"output":"ok","data":{"url":"/resume.pdf"}}"#);
        assert_eq!(reply.data, Some(json!({"url": "/resume.pdf"})));
    }

    #[test]
    fn plain_text_falls_back_to_success() {
        let reply = Reply::parse("just some text");
        assert!(reply.success);
        assert_eq!(reply.output, "just some text");
    }

    #[test]
    fn json_missing_fields_falls_back_to_text() {
        let raw = r#"{"output":"no success flag"}"#;
        let reply = Reply::parse(raw);
        assert!(reply.success);
        assert_eq!(reply.output, raw);
    }

    #[test]
    fn non_object_json_falls_back_to_text() {
        let reply = Reply::parse("42");
        assert!(reply.success);
        assert_eq!(reply.output, "42");
    }
}
