use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::VendorError;
use crate::presenter::{ConsentDecision, ConsentRequest, Presenter};

/// Completion handler for [`LoginManager::log_in`]. Invoked exactly once.
pub type LoginManagerLoginResultBlock =
    Box<dyn FnOnce(Option<LoginManagerLoginResult>, Option<VendorError>) + Send + 'static>;

#[derive(Debug, Clone)]
pub struct VendorConfig {
    pub app_id: String,
    pub token_ttl: Duration,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            token_ttl: Duration::from_secs(3600),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token_string: String,
    pub app_id: String,
    pub permissions: BTreeSet<String>,
    pub expiration_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginManagerLoginResult {
    pub token: Option<AccessToken>,
    pub is_cancelled: bool,
    pub granted_permissions: BTreeSet<String>,
    pub declined_permissions: BTreeSet<String>,
}

/// Entry point of the login SDK.
pub struct LoginManager {
    config: VendorConfig,
}

impl LoginManager {
    pub fn new(config: VendorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VendorConfig {
        &self.config
    }

    /// Start a login flow asking for `permissions`, presenting UI from `from`.
    ///
    /// The handler fires on a runtime worker thread once the user has answered
    /// the consent dialog. Requests rejected up front still complete through
    /// the handler, never by panicking or returning an error. If the flow is
    /// torn down first (runtime shutdown, a panicking presenter) the handler
    /// gets [`VendorError::Interrupted`].
    pub fn log_in(
        &self,
        permissions: &[String],
        from: Arc<dyn Presenter>,
        handler: LoginManagerLoginResultBlock,
    ) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("Login requested outside of a tokio runtime");
            handler(None, Some(VendorError::NoRuntime));
            return;
        };

        let request = ConsentRequest {
            app_id: self.config.app_id.clone(),
            permissions: permissions.to_vec(),
        };
        let rejection = self.validate(&request);
        let token_ttl = self.config.token_ttl;
        let handler = HandlerGuard(Some(handler));

        runtime.spawn_blocking(move || {
            if let Some(err) = rejection {
                tracing::warn!("Login request rejected: {err}");
                handler.complete(None, Some(err));
                return;
            }

            match from.present(&request) {
                Ok(decision) => {
                    tracing::debug!("Consent dialog answered: {decision:?}");
                    handler.complete(Some(build_result(&request, decision, token_ttl)), None);
                }
                Err(e) => handler.complete(None, Some(VendorError::Presentation(e.to_string()))),
            }
        });
    }

    fn validate(&self, request: &ConsentRequest) -> Option<VendorError> {
        if request.app_id.trim().is_empty() {
            return Some(VendorError::NotConfigured);
        }
        if request.permissions.is_empty() {
            return Some(VendorError::InvalidPermission(String::new()));
        }
        request
            .permissions
            .iter()
            .find(|p| !is_valid_permission(p))
            .map(|p| VendorError::InvalidPermission(p.clone()))
    }
}

/// Calls the handler with `Interrupted` if it is dropped unused, e.g. when
/// the blocking task never runs or unwinds.
struct HandlerGuard(Option<LoginManagerLoginResultBlock>);

impl HandlerGuard {
    fn complete(mut self, result: Option<LoginManagerLoginResult>, error: Option<VendorError>) {
        if let Some(handler) = self.0.take() {
            handler(result, error);
        }
    }
}

impl Drop for HandlerGuard {
    fn drop(&mut self) {
        if let Some(handler) = self.0.take() {
            tracing::warn!("Login flow interrupted before completing");
            handler(None, Some(VendorError::Interrupted));
        }
    }
}

fn is_valid_permission(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn build_result(
    request: &ConsentRequest,
    decision: ConsentDecision,
    token_ttl: Duration,
) -> LoginManagerLoginResult {
    let requested: BTreeSet<String> = request.permissions.iter().cloned().collect();
    match decision {
        ConsentDecision::Approved => {
            let issued_at = Utc::now();
            let expiration_date = chrono::Duration::from_std(token_ttl)
                .ok()
                .and_then(|ttl| issued_at.checked_add_signed(ttl))
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            LoginManagerLoginResult {
                token: Some(AccessToken {
                    token_string: uuid::Uuid::new_v4().simple().to_string(),
                    app_id: request.app_id.clone(),
                    permissions: requested.clone(),
                    expiration_date,
                }),
                is_cancelled: false,
                granted_permissions: requested,
                declined_permissions: BTreeSet::new(),
            }
        }
        ConsentDecision::Declined => LoginManagerLoginResult {
            token: None,
            is_cancelled: true,
            granted_permissions: BTreeSet::new(),
            declined_permissions: requested,
        },
    }
}
