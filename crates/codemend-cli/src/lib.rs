// Library interface for codemend-cli
// This allows integration tests to access internal modules

// NOTE: Since review.rs is also declared in main.rs, we need to use a path
// attribute to reference the same source file to avoid "file loaded multiple
// times" errors.

#[path = "review.rs"]
pub mod review;

// Re-export commonly used items for easier testing
pub use review::{parse_review_input, ReviewAction, ReviewOutcome};
