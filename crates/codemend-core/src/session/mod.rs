mod chat;
mod controller;
mod history;

pub use chat::{ChatRole, ChatThread, ChatTurn};
pub use controller::RepairSession;
pub use history::{PatchEntry, PatchHistory};
