use serde_json::json;

use super::chat::{ChatThread, ChatTurn};
use super::history::{PatchEntry, PatchHistory};
use crate::constants::{defaults, messages};
use crate::error::{MendError, Result};
use crate::gateway::{PatchOutput, RepairGateway, RepairOutput, RepairStep, RunOutput};

/// One code-repair session: the current code, the patch log, and the display
/// state a UI reads back after every operation.
///
/// The session owns its gateway; construct one per open editor. Operations
/// take `&mut self`, so two requests can never be in flight against the same
/// session at once.
pub struct RepairSession {
    gateway: Box<dyn RepairGateway>,
    current_code: String,
    history: PatchHistory,
    stderr: String,
    terminal_logs: String,
    reasoning: String,
    chat: ChatThread,
    default_iterations: u32,
}

impl RepairSession {
    pub fn new(gateway: Box<dyn RepairGateway>) -> Self {
        Self {
            gateway,
            current_code: String::new(),
            history: PatchHistory::new(),
            stderr: String::new(),
            terminal_logs: String::new(),
            reasoning: String::new(),
            chat: ChatThread::new(),
            default_iterations: defaults::MAX_ITERATIONS,
        }
    }

    pub fn with_default_iterations(mut self, iterations: u32) -> Self {
        self.default_iterations = iterations;
        self
    }

    pub fn current_code(&self) -> &str {
        &self.current_code
    }

    pub fn history(&self) -> &PatchHistory {
        &self.history
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.history.selected()
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn terminal_logs(&self) -> &str {
        &self.terminal_logs
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn chat_turns(&self) -> Vec<ChatTurn> {
        self.chat.turns()
    }

    /// Load code into the session. `None` coerces to the empty string (the
    /// editor change callback can hand over nothing). Stale run output is
    /// cleared so a previous run's error is never shown against fresh code.
    pub fn load_code(&mut self, code: Option<&str>) {
        self.current_code = code.unwrap_or_default().to_string();
        self.stderr.clear();
        self.terminal_logs.clear();
    }

    /// Execute the code once. Uses `code_override` when given, else the
    /// session's current code. On success the terminal pane shows the run's
    /// stdout (or `output`) and the error pane its stderr; on failure the
    /// error pane shows the failure text.
    pub async fn run(&mut self, code_override: Option<&str>) -> Result<RunOutput> {
        let code = code_override.unwrap_or(&self.current_code).to_string();
        if code.trim().is_empty() {
            self.stderr = messages::NO_CODE_TO_RUN.to_string();
            return Err(MendError::EmptyInput(messages::NO_CODE_TO_RUN));
        }

        match self.gateway.run(&code).await {
            Ok(output) => {
                self.terminal_logs = output.terminal_text().to_string();
                self.stderr = output.stderr_text().to_string();
                Ok(output)
            }
            Err(e) => {
                tracing::warn!("run failed: {}", e);
                self.stderr = e.to_string();
                Err(e)
            }
        }
    }

    /// Drive the backend repair loop against the current code and commit its
    /// result. `None` iterations means the session default. On failure the
    /// history stays empty.
    pub async fn start_repair(&mut self, iterations: Option<u32>) -> Result<RepairOutput> {
        if self.current_code.trim().is_empty() {
            self.stderr = messages::NO_CODE_TO_RUN.to_string();
            return Err(MendError::EmptyInput(messages::NO_CODE_TO_RUN));
        }
        let iterations = iterations.unwrap_or(self.default_iterations);
        tracing::debug!("starting repair loop, up to {} iterations", iterations);

        self.history.clear();
        self.reasoning.clear();
        self.terminal_logs = messages::REPAIR_IN_PROGRESS.to_string();

        match self.gateway.repair(&self.current_code, iterations).await {
            Ok(output) => {
                self.terminal_logs.clear();
                self.commit_repair_result(&output.history);
                Ok(output)
            }
            Err(e) => {
                tracing::warn!("repair failed: {}", e);
                self.terminal_logs.clear();
                self.stderr = e.to_string();
                Err(e)
            }
        }
    }

    /// Terminal transition of a successful repair loop: append one chained
    /// patch entry per step, select the last one, and make its code the new
    /// baseline. The loop's final output becomes `current_code` before any
    /// explicit apply; apply/reject then review the individual steps.
    pub fn commit_repair_result(&mut self, steps: &[RepairStep]) {
        let mut previous = self.current_code.clone();
        for step in steps {
            let entry = PatchEntry {
                previous_code: previous,
                next_code: step.code.clone(),
                stdout: step.stdout.clone(),
                stderr: step.stderr.clone(),
                reasoning: step.ai_reasoning.clone(),
                rejected: false,
            };
            previous = step.code.clone();
            self.history.push(entry);
        }

        if !steps.is_empty() {
            tracing::debug!("repair produced {} patches", steps.len());
            self.current_code = previous;
            self.set_selection(Some(self.history.len() - 1));
        }
    }

    /// Request a single corrective patch, one user-paced repair step. The
    /// patch chains off the last history entry (or the current code when the
    /// history is empty) and is appended without touching `current_code`; a
    /// lone patch waits for an explicit apply.
    pub async fn generate_patch(&mut self) -> Result<PatchOutput> {
        let base = match self.history.last() {
            Some(entry) => entry.next_code.clone(),
            None => self.current_code.clone(),
        };
        let logs = self.terminal_logs.clone();

        let output = match self.gateway.patch(&logs, &base).await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("patch failed: {}", e);
                self.stderr = e.to_string();
                return Err(e);
            }
        };

        let patched = match output.patched_code() {
            Ok(code) => code.to_string(),
            Err(e) => {
                self.stderr = e.to_string();
                return Err(e);
            }
        };

        let entry = PatchEntry {
            previous_code: base,
            next_code: patched,
            stdout: output.stdout.clone(),
            stderr: output.stderr.clone(),
            reasoning: output.ai_reasoning.clone(),
            rejected: false,
        };
        let index = self.history.push(entry);
        self.set_selection(Some(index));

        Ok(output)
    }

    /// Accept a patch: its result becomes the baseline code and the cursor
    /// moves to the next entry awaiting review, or clears when this was the
    /// last one. Out-of-range indexes return false with no state change.
    pub fn apply_at(&mut self, index: usize) -> bool {
        let next_code = match self.history.get(index) {
            Some(entry) => entry.next_code.clone(),
            None => return false,
        };
        self.current_code = next_code;

        let next = if index + 1 < self.history.len() {
            Some(index + 1)
        } else {
            None
        };
        self.set_selection(next);
        true
    }

    /// Discard a patch without removing it from the log. The cursor moves to
    /// the nearest later non-rejected entry, or clears when none remains.
    pub fn reject_at(&mut self, index: usize) -> bool {
        if !self.history.mark_rejected(index) {
            return false;
        }
        let next = self.history.next_active_after(index);
        self.set_selection(next);
        true
    }

    /// Move the review cursor. Out-of-range indexes normalize to `None`.
    pub fn select_at(&mut self, index: Option<usize>) {
        self.set_selection(index);
    }

    /// Ask the engine about the current code. The reply, or the failure text,
    /// lands in the transcript as an assistant turn; failures never reach the
    /// error pane.
    pub async fn chat(&mut self, message: &str) -> Result<String> {
        if message.trim().is_empty() {
            return Err(MendError::EmptyInput(messages::EMPTY_CHAT_MESSAGE));
        }

        self.chat.push_user(message);
        let context = json!({
            "code": self.current_code,
            "stderr": self.stderr,
        });

        let reply = match self.gateway.chat(message, context).await {
            Ok(output) => match output.reply_text() {
                Ok(reply) => reply.to_string(),
                Err(e) => {
                    self.chat.push_assistant(e.to_string());
                    return Err(e);
                }
            },
            Err(e) => {
                tracing::warn!("chat failed: {}", e);
                self.chat.push_assistant(e.to_string());
                return Err(e);
            }
        };

        self.chat.push_assistant(&reply);
        Ok(reply)
    }

    /// Clear everything: code, history, display state, transcript. An editor
    /// holding its own buffer must be reloaded by the caller.
    pub fn reset(&mut self) {
        self.current_code.clear();
        self.history.clear();
        self.stderr.clear();
        self.terminal_logs.clear();
        self.reasoning.clear();
        self.chat.clear();
    }

    /// All cursor movement funnels through here so the displayed
    /// stderr/terminal/reasoning always mirror the selected entry.
    fn set_selection(&mut self, index: Option<usize>) {
        self.history.select(index);
        match self.history.selected_entry() {
            Some(entry) => {
                self.stderr = entry.stderr.clone();
                self.terminal_logs = entry.stdout.clone();
                self.reasoning = entry.reasoning.clone();
            }
            None => {
                self.stderr.clear();
                self.terminal_logs.clear();
                self.reasoning.clear();
            }
        }
    }
}
