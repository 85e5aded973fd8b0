use thiserror::Error;

/// Errors surfaced by load, save and configuration.
///
/// Lookups never fail: a missing section or key resolves to an empty
/// [`Value`](crate::Value), and malformed lines are kept verbatim.
#[derive(Error, Debug)]
pub enum IniError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid options file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No file name: document was not loaded from disk")]
    MissingPath,
}

pub type Result<T> = std::result::Result<T, IniError>;
