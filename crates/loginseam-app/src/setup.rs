use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use loginseam_auth::{ClassificationPolicy, LoginController, LoginServices, PresentationContext};
use loginseam_core::config::AppConfig;
use loginseam_vendor::{LoginManager, VendorConfig};

/// Bind the real SDK, configured from `[vendor]`.
pub fn create_services(config: &AppConfig) -> LoginServices {
    let vendor = VendorConfig {
        app_id: config.vendor.app_id.clone(),
        token_ttl: Duration::from_secs(config.vendor.token_ttl_secs),
    };
    LoginServices::with_vendor(LoginManager::new(vendor))
}

/// Build the login controller. Permissions given on the command line replace
/// the configured ones.
pub fn create_controller(
    config: &AppConfig,
    services: &LoginServices,
    context: Arc<dyn PresentationContext>,
    permissions: Vec<String>,
) -> Result<LoginController> {
    let policy: ClassificationPolicy = config
        .login
        .policy
        .parse()
        .context("invalid [login] policy")?;
    let permissions = if permissions.is_empty() {
        config.login.permissions.clone()
    } else {
        permissions
    };
    tracing::debug!("Login controller: permissions={permissions:?}, policy={policy:?}");
    Ok(LoginController::from_services(
        services,
        context,
        permissions,
        policy,
    ))
}
