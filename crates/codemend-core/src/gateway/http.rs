use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::traits::RepairGateway;
use super::wire::{detail_to_text, ChatOutput, ErrorBody, PatchOutput, RepairOutput, RunOutput};
use crate::constants::{defaults, endpoints, messages};
use crate::error::{MendError, Result};

/// HTTP client for the repair engine. One shared `reqwest::Client` with the
/// engine's fixed request timeout; no retries.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client(Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS))?,
            base_url: endpoints::DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Replace the request timeout. Rebuilds the client; the timeout is a
    /// client-level setting in reqwest.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    async fn post_json<T>(&self, route: &str, body: &impl Serialize) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), route);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| MendError::Transport(transport_message(&e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| MendError::Transport(transport_message(&e)))?;

        if !status.is_success() {
            tracing::warn!("{} returned {}", route, status);
            return Err(backend_error(status, text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| MendError::Config(format!("failed to build HTTP client: {}", e)))
}

fn transport_message(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("Request timed out: {}", e)
    } else if e.is_connect() {
        format!("Could not reach repair engine: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// Turn a non-2xx response into a `Backend` error: the `detail` field is
/// flattened to text, and the undecoded body rides along for diagnostics.
fn backend_error(status: reqwest::StatusCode, body: String) -> MendError {
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.detail)
        .map(detail_to_text)
        .unwrap_or_else(|| format!("Repair engine returned {}", status));
    let raw = if body.is_empty() { None } else { Some(body) };
    MendError::backend(message, raw)
}

#[derive(Serialize)]
struct RunRequest<'a> {
    code: &'a str,
}

#[derive(Serialize)]
struct PatchRequest<'a> {
    logs: &'a str,
    code: &'a str,
}

#[derive(Serialize)]
struct RepairRequest<'a> {
    code: &'a str,
    max_iterations: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    context: Value,
}

#[async_trait::async_trait]
impl RepairGateway for HttpGateway {
    async fn run(&self, code: &str) -> Result<RunOutput> {
        if code.trim().is_empty() {
            return Err(MendError::EmptyInput(messages::EMPTY_CODE));
        }
        self.post_json(endpoints::RUN_ROUTE, &RunRequest { code })
            .await
    }

    async fn patch(&self, logs: &str, code: &str) -> Result<PatchOutput> {
        // No blank-code guard: a patch may be requested with empty logs.
        self.post_json(endpoints::PATCH_ROUTE, &PatchRequest { logs, code })
            .await
    }

    async fn repair(&self, code: &str, max_iterations: u32) -> Result<RepairOutput> {
        if code.trim().is_empty() {
            return Err(MendError::EmptyInput(messages::EMPTY_CODE));
        }
        self.post_json(
            endpoints::REPAIR_ROUTE,
            &RepairRequest {
                code,
                max_iterations,
            },
        )
        .await
    }

    async fn chat(&self, message: &str, context: Value) -> Result<ChatOutput> {
        if message.trim().is_empty() {
            return Err(MendError::EmptyInput(messages::EMPTY_CHAT_MESSAGE));
        }
        self.post_json(endpoints::CHAT_ROUTE, &ChatRequest { message, context })
            .await
    }
}
