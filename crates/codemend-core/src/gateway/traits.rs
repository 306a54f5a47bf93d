use serde_json::Value;

use super::wire::{ChatOutput, PatchOutput, RepairOutput, RunOutput};
use crate::error::Result;

/// The repair engine trait. Implementations talk to a backend that can
/// execute code, propose patches, and drive the iterative repair loop.
#[async_trait::async_trait]
pub trait RepairGateway: Send + Sync {
    /// Execute the code once and report its output.
    async fn run(&self, code: &str) -> Result<RunOutput>;

    /// Ask for a single corrective patch, given the code and the terminal
    /// output from its last run.
    async fn patch(&self, logs: &str, code: &str) -> Result<PatchOutput>;

    /// Run the full repair loop: execute, patch, re-execute, up to
    /// `max_iterations` rounds.
    async fn repair(&self, code: &str, max_iterations: u32) -> Result<RepairOutput>;

    /// Free-form question about the code; `context` rides along untouched.
    async fn chat(&self, message: &str, context: Value) -> Result<ChatOutput>;
}
