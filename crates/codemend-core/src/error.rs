use thiserror::Error;

#[derive(Error, Debug)]
pub enum MendError {
    /// Input rejected before any request was issued.
    #[error("{0}")]
    EmptyInput(&'static str),

    /// Could not reach the repair engine at the transport level. The message
    /// is always plain text; a raw `reqwest::Error` never crosses the
    /// gateway boundary.
    #[error("{0}")]
    Transport(String),

    /// The repair engine answered with a non-success status. `raw` carries
    /// the undecoded response body when one was readable.
    #[error("{message}")]
    Backend {
        message: String,
        raw: Option<String>,
    },

    /// A 2xx response missing a field the contract requires.
    #[error("{0}")]
    MissingField(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MendError {
    pub fn backend(message: impl Into<String>, raw: Option<String>) -> Self {
        Self::Backend {
            message: message.into(),
            raw,
        }
    }

    /// Raw response body attached to a backend failure, if any.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Backend { raw, .. } => raw.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MendError>;
