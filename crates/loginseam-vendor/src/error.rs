use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VendorError {
    #[error("App ID is not configured")]
    NotConfigured,

    #[error("Invalid permission: {0}")]
    InvalidPermission(String),

    #[error("Could not present login dialog: {0}")]
    Presentation(String),

    #[error("No async runtime available to run the login flow")]
    NoRuntime,

    #[error("Login flow ended before it could complete")]
    Interrupted,
}
