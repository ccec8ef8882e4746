use std::time::Duration;

/// Errors surfaced by ACL sources, parsing and the serving layer.
///
/// Malformed ACL values are not errors: the transform ignores them. These
/// variants cover failures that abandon a whole refresh cycle or command.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ACL source failed: {message}")]
    Source { message: String },

    #[error("ACL source did not answer within {after:?}")]
    Timeout { after: Duration },

    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl Error {
    pub fn upstream(message: impl Into<String>) -> Self {
        Error::Source {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Whether the failure came from the upstream cluster rather than local input.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::Source { .. } | Error::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
