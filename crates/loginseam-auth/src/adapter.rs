//! Adapter from the vendor's `LoginManager` to [`LoginProvider`].

use std::sync::Arc;

use loginseam_vendor as vendor;

use crate::error::LoginError;
use crate::result::{AccessToken, LoginResult};
use crate::traits::{
    ConsentDecision, ConsentRequest, LoginCompletion, LoginProvider, PresentationContext,
};

/// Real login provider, delegating to the vendor SDK.
pub struct VendorLoginProvider {
    manager: vendor::LoginManager,
}

impl VendorLoginProvider {
    pub fn new(manager: vendor::LoginManager) -> Self {
        Self { manager }
    }
}

impl LoginProvider for VendorLoginProvider {
    fn log_in(
        &self,
        permissions: &[String],
        context: Arc<dyn PresentationContext>,
        on_complete: LoginCompletion,
    ) {
        tracing::debug!("Starting vendor login for {permissions:?}");
        self.manager.log_in(
            permissions,
            Arc::new(PresenterBridge(context)),
            Box::new(move |result, error| {
                on_complete(result.map(LoginResult::from), error.map(LoginError::from));
            }),
        );
    }
}

/// Lets a [`PresentationContext`] stand in where the SDK wants its own presenter.
struct PresenterBridge(Arc<dyn PresentationContext>);

impl vendor::Presenter for PresenterBridge {
    fn present(
        &self,
        request: &vendor::ConsentRequest,
    ) -> std::io::Result<vendor::ConsentDecision> {
        let request = ConsentRequest {
            app_id: request.app_id.clone(),
            permissions: request.permissions.clone(),
        };
        Ok(match self.0.present(&request)? {
            ConsentDecision::Approved => vendor::ConsentDecision::Approved,
            ConsentDecision::Declined => vendor::ConsentDecision::Declined,
        })
    }
}

impl From<vendor::AccessToken> for AccessToken {
    fn from(t: vendor::AccessToken) -> Self {
        Self {
            token_string: t.token_string,
            app_id: t.app_id,
            permissions: t.permissions,
            expires_at: t.expiration_date,
        }
    }
}

impl From<vendor::LoginManagerLoginResult> for LoginResult {
    fn from(r: vendor::LoginManagerLoginResult) -> Self {
        Self {
            token: r.token.map(AccessToken::from),
            is_cancelled: r.is_cancelled,
            granted_permissions: r.granted_permissions,
            declined_permissions: r.declined_permissions,
        }
    }
}

impl From<vendor::VendorError> for LoginError {
    fn from(e: vendor::VendorError) -> Self {
        let message = e.to_string();
        match e {
            vendor::VendorError::NotConfigured => LoginError::NotConfigured(message),
            vendor::VendorError::InvalidPermission(p) => LoginError::InvalidPermission(p),
            vendor::VendorError::Presentation(msg) => LoginError::Presentation(msg),
            vendor::VendorError::NoRuntime => LoginError::Other(message),
            vendor::VendorError::Interrupted => LoginError::Abandoned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct Answer {
        decision: ConsentDecision,
        shown: AtomicUsize,
    }

    impl Answer {
        fn new(decision: ConsentDecision) -> Arc<Self> {
            Arc::new(Self {
                decision,
                shown: AtomicUsize::new(0),
            })
        }
    }

    impl PresentationContext for Answer {
        fn present(&self, request: &ConsentRequest) -> std::io::Result<ConsentDecision> {
            assert_eq!(request.app_id, "adapter-test");
            self.shown.fetch_add(1, Ordering::SeqCst);
            Ok(self.decision)
        }
    }

    fn provider(app_id: &str) -> VendorLoginProvider {
        VendorLoginProvider::new(vendor::LoginManager::new(vendor::VendorConfig {
            app_id: app_id.into(),
            token_ttl: Duration::from_secs(120),
        }))
    }

    #[tokio::test]
    async fn approval_maps_to_token() {
        let p = provider("adapter-test");
        let ui = Answer::new(ConsentDecision::Approved);
        let response = p
            .log_in_async(&["public_profile".to_string()], ui.clone())
            .await;

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        let token = result.token.unwrap();
        assert_eq!(token.app_id, "adapter-test");
        assert!(token.permissions.contains("public_profile"));
        assert!(!token.is_expired());
        assert_eq!(ui.shown.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn decline_maps_to_cancelled() {
        let p = provider("adapter-test");
        let response = p
            .log_in_async(
                &["public_profile".to_string()],
                Answer::new(ConsentDecision::Declined),
            )
            .await;

        let result = response.result.unwrap();
        assert!(result.is_cancelled);
        assert!(result.token.is_none());
    }

    #[tokio::test]
    async fn vendor_errors_are_translated() {
        let ui = Answer::new(ConsentDecision::Approved);
        let response = provider("")
            .log_in_async(&["public_profile".to_string()], ui.clone())
            .await;
        assert!(matches!(response.error, Some(LoginError::NotConfigured(_))));
        assert_eq!(ui.shown.load(Ordering::SeqCst), 0);

        let response = provider("adapter-test")
            .log_in_async(&["Bad Scope".to_string()], ui)
            .await;
        assert_eq!(
            response.error,
            Some(LoginError::InvalidPermission("Bad Scope".into()))
        );
    }

    #[test]
    fn interrupted_flow_maps_to_abandoned() {
        assert_eq!(
            LoginError::from(vendor::VendorError::Interrupted),
            LoginError::Abandoned
        );
    }
}
