pub mod config;
pub mod constants;
pub mod error;
pub mod gateway;
pub mod patch;
pub mod report;
pub mod session;

// Re-export key types
pub use config::Settings;
pub use error::{MendError, Result};
pub use gateway::{
    ChatOutput, HttpGateway, PatchOutput, RepairGateway, RepairOutput, RepairStep, RunOutput,
};
pub use session::{ChatRole, ChatThread, ChatTurn, PatchEntry, PatchHistory, RepairSession};
