use serde::Deserialize;
use serde_json::Value;

use crate::constants::messages;
use crate::error::{MendError, Result};

/// Body of a successful `POST /run`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunOutput {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    /// Some engine builds report under `output` instead of `stdout`.
    #[serde(default)]
    pub output: String,
    /// Execution trace; carried for diagnostics, not shown in the terminal.
    #[serde(default)]
    pub logs: String,
}

impl RunOutput {
    /// Text for the terminal pane: `stdout` wins over `output`, empty
    /// strings are skipped.
    pub fn terminal_text(&self) -> &str {
        first_non_empty(&[&self.stdout, &self.output]).unwrap_or("")
    }

    pub fn stderr_text(&self) -> &str {
        &self.stderr
    }
}

/// Body of a successful `POST /patch`. The engine has shipped the patched
/// code under three different field names over time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatchOutput {
    #[serde(default)]
    pub patch: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub new_code: String,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub ai_reasoning: String,
}

impl PatchOutput {
    /// The patched code, trying `patch`, `code`, `new_code` in that order
    /// and skipping empty strings. The priority order is part of the
    /// backend contract.
    pub fn patched_code(&self) -> Result<&str> {
        first_non_empty(&[&self.patch, &self.code, &self.new_code])
            .ok_or(MendError::MissingField(messages::PATCH_MISSING_CODE))
    }
}

/// One step of a completed repair loop, as reported by `POST /repair`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepairStep {
    pub code: String,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub ai_reasoning: String,
}

/// Body of a successful `POST /repair`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepairOutput {
    #[serde(default)]
    pub history: Vec<RepairStep>,
}

/// Body of a successful `POST /chat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatOutput {
    #[serde(default)]
    pub reply: String,
}

impl ChatOutput {
    pub fn reply_text(&self) -> Result<&str> {
        first_non_empty(&[&self.reply])
            .ok_or(MendError::MissingField(messages::CHAT_MISSING_REPLY))
    }
}

/// Error body the engine sends on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<Value>,
}

/// Flatten an error `detail` to display text. Strings pass through
/// verbatim; structured payloads are JSON-encoded so the UI never
/// receives a non-string message.
pub(crate) fn detail_to_text(detail: Value) -> String {
    match detail {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().find(|s| !s.is_empty()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_terminal_text_prefers_stdout() {
        let out = RunOutput {
            stdout: "hello".into(),
            output: "fallback".into(),
            ..Default::default()
        };
        assert_eq!(out.terminal_text(), "hello");
    }

    #[test]
    fn test_terminal_text_falls_back_to_output() {
        let out = RunOutput {
            output: "fallback".into(),
            ..Default::default()
        };
        assert_eq!(out.terminal_text(), "fallback");
    }

    #[test]
    fn test_terminal_text_skips_empty_but_keeps_whitespace() {
        // A whitespace-only stdout still counts as present.
        let out = RunOutput {
            stdout: " ".into(),
            output: "fallback".into(),
            ..Default::default()
        };
        assert_eq!(out.terminal_text(), " ");
    }

    #[test]
    fn test_patched_code_priority_order() {
        let out = PatchOutput {
            patch: "from patch".into(),
            code: "from code".into(),
            new_code: "from new_code".into(),
            ..Default::default()
        };
        assert_eq!(out.patched_code().unwrap(), "from patch");

        let out = PatchOutput {
            code: "from code".into(),
            new_code: "from new_code".into(),
            ..Default::default()
        };
        assert_eq!(out.patched_code().unwrap(), "from code");

        let out = PatchOutput {
            new_code: "from new_code".into(),
            ..Default::default()
        };
        assert_eq!(out.patched_code().unwrap(), "from new_code");
    }

    #[test]
    fn test_patched_code_missing_everywhere() {
        let out = PatchOutput::default();
        let err = out.patched_code().unwrap_err();
        assert_eq!(err.to_string(), "Patch response missing code");
    }

    #[test]
    fn test_detail_string_passes_through() {
        assert_eq!(detail_to_text(json!("boom")), "boom");
    }

    #[test]
    fn test_detail_object_is_json_encoded() {
        let text = detail_to_text(json!({"loc": ["body", "code"], "msg": "field required"}));
        assert!(text.contains("\"msg\""));
        assert!(text.contains("field required"));
    }

    #[test]
    fn test_repair_output_deserializes_sparse_steps() {
        let out: RepairOutput = serde_json::from_value(json!({
            "history": [
                {"code": "x = 1"},
                {"code": "x = 2", "stdout": "ok", "ai_reasoning": "fixed"}
            ]
        }))
        .unwrap();
        assert_eq!(out.history.len(), 2);
        assert_eq!(out.history[0].stdout, "");
        assert_eq!(out.history[1].ai_reasoning, "fixed");
    }
}
