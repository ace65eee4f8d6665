use thiserror::Error;

/// Top-level error type for locsync.
#[derive(Debug, Error)]
pub enum LocsyncError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Error from the remote translation service.
    #[error("remote error: {0}")]
    Remote(String),

    /// Pre-translation reached a terminal status other than `finished`.
    #[error("pre-translation {id} ended with status '{status}'")]
    PreTranslation { id: String, status: String },

    /// Polling limits ran out before a terminal status was observed.
    #[error("pre-translation {id} still '{status}' after {attempts} status checks")]
    PollTimeout {
        id: String,
        status: String,
        attempts: u32,
    },

    /// Locale file could not be audited.
    #[error("audit error: {0}")]
    Audit(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
