// ─────────────────────────────────────────────────────────────────────────────
// Backend endpoints
// ─────────────────────────────────────────────────────────────────────────────
pub mod endpoints {
    /// Local repair engine, same default as the dev server.
    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

    pub const RUN_ROUTE: &str = "/run";
    pub const PATCH_ROUTE: &str = "/patch";
    pub const REPAIR_ROUTE: &str = "/repair";
    pub const CHAT_ROUTE: &str = "/chat";
}

// ─────────────────────────────────────────────────────────────────────────────
// Default tunables
// ─────────────────────────────────────────────────────────────────────────────
pub mod defaults {
    /// Repair loop iteration cap sent when the caller does not pick one.
    pub const MAX_ITERATIONS: u32 = 3;

    /// Fixed per-request timeout, matching the engine's worst-case run time.
    pub const REQUEST_TIMEOUT_SECS: u64 = 5;

    /// Chat turns retained before the oldest are dropped.
    pub const MAX_CHAT_TURNS: usize = 100;
}

// ─────────────────────────────────────────────────────────────────────────────
// User-facing messages
// ─────────────────────────────────────────────────────────────────────────────
pub mod messages {
    /// Gateway-level guard for blank code payloads.
    pub const EMPTY_CODE: &str = "Code is empty.";

    /// Session-level guard when running with nothing loaded.
    pub const NO_CODE_TO_RUN: &str = "No code to run";

    pub const EMPTY_CHAT_MESSAGE: &str = "Message cannot be empty";

    pub const PATCH_MISSING_CODE: &str = "Patch response missing code";
    pub const CHAT_MISSING_REPLY: &str = "Chat response missing reply";

    /// Placeholder shown in the terminal pane while a repair is in flight.
    pub const REPAIR_IN_PROGRESS: &str = "Repair in progress...";
}

// ─────────────────────────────────────────────────────────────────────────────
// Config paths
// ─────────────────────────────────────────────────────────────────────────────
pub mod paths {
    pub const CONFIG_DIR: &str = "codemend";
    pub const CONFIG_FILE: &str = "config.toml";
}
