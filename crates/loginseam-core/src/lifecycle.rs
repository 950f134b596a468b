use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset. The SDK only reports rejections.
pub const DEFAULT_LOG_FILTER: &str = "info,loginseam_vendor=warn";

/// Initialize tracing with env filter support.
///
/// Set `RUST_LOG=debug` for verbose output, defaults to [`DEFAULT_LOG_FILTER`].
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
}

pub fn log_startup() {
    tracing::info!("loginseam starting up");
}

pub fn log_shutdown() {
    tracing::info!("loginseam shutting down");
}
