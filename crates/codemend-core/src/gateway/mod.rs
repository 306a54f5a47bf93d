mod http;
mod traits;
mod wire;

pub use http::HttpGateway;
pub use traits::RepairGateway;
pub use wire::{ChatOutput, PatchOutput, RepairOutput, RepairStep, RunOutput};
