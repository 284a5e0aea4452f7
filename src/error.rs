use thiserror::Error;

/// Canonical error type for the crate.
///
/// Constructing and running a [`LedgerLink`](crate::LedgerLink) never fails;
/// these variants cover configuration, logging and output only.
#[derive(Debug, Error)]
pub enum LedgerLinkError {
    /// Config file path does not exist.
    #[error("config file not found: {path}")]
    ConfigNotFound { path: String },

    /// Config file contents are not valid JSON for [`LinkConfig`](crate::LinkConfig).
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Tracing subscriber could not be installed.
    #[error("logging error: {0}")]
    Logging(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LedgerLinkError {
    /// Process exit code for the `ledgerlink` binary.
    ///
    /// | Code | Meaning             |
    /// |------|---------------------|
    /// | 1    | General error       |
    /// | 2    | Configuration error |
    /// | 10   | IO error            |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ConfigNotFound { .. } | Self::ConfigParse(_) | Self::InvalidConfig(_) => 2,
            Self::Io(_) => 10,
            Self::Logging(_) | Self::Json(_) => 1,
        }
    }
}
