use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::error::LoginError;
use crate::result::{LoginResponse, LoginResult};

/// Single-shot completion for [`LoginProvider::log_in`].
pub type LoginCompletion =
    Box<dyn FnOnce(Option<LoginResult>, Option<LoginError>) + Send + 'static>;

/// Consent prompt shown to the user during a login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentRequest {
    pub app_id: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentDecision {
    Approved,
    Declined,
}

/// The UI surface a login flow presents itself from.
pub trait PresentationContext: Send + Sync {
    fn present(&self, request: &ConsentRequest) -> std::io::Result<ConsentDecision>;
}

/// The one login call application code needs from an authentication SDK.
///
/// Implementations decide when and on which thread `on_complete` runs; callers
/// must only rely on it running at most once.
#[async_trait]
pub trait LoginProvider: Send + Sync {
    fn log_in(
        &self,
        permissions: &[String],
        context: Arc<dyn PresentationContext>,
        on_complete: LoginCompletion,
    );

    /// Await the completion of [`LoginProvider::log_in`] as a single value.
    async fn log_in_async(
        &self,
        permissions: &[String],
        context: Arc<dyn PresentationContext>,
    ) -> LoginResponse {
        let (tx, rx) = oneshot::channel();
        self.log_in(
            permissions,
            context,
            Box::new(move |result, error| {
                let _ = tx.send(LoginResponse { result, error });
            }),
        );
        rx.await
            .unwrap_or_else(|_| LoginResponse::failed(LoginError::Abandoned))
    }
}
