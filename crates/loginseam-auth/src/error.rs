use thiserror::Error;

/// Failure reported through a login completion.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Login provider not configured: {0}")]
    NotConfigured(String),

    #[error("Invalid permission: {0}")]
    InvalidPermission(String),

    #[error("Login dialog failed: {0}")]
    Presentation(String),

    #[error("Login completion dropped without being called")]
    Abandoned,

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Unknown classification policy: {0} (expected \"error-first\" or \"token-first\")")]
    Unknown(String),
}
