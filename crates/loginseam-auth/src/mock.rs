//! Scripted login provider for tests.

use std::sync::{Arc, RwLock};

use crate::error::LoginError;
use crate::result::LoginResult;
use crate::traits::{LoginCompletion, LoginProvider, PresentationContext};

/// Replays a configured `(result, error)` pair.
///
/// The completion runs inline, before `log_in` returns, so callers can assert
/// on their state right after triggering a login.
#[derive(Default)]
pub struct FakeLoginProvider {
    response: RwLock<(Option<LoginResult>, Option<LoginError>)>,
    calls: RwLock<Vec<Vec<String>>>,
}

impl FakeLoginProvider {
    pub fn new(result: Option<LoginResult>, error: Option<LoginError>) -> Self {
        Self {
            response: RwLock::new((result, error)),
            calls: RwLock::new(Vec::new()),
        }
    }

    /// Change what the next `log_in` replays.
    pub fn configure(&self, result: Option<LoginResult>, error: Option<LoginError>) {
        *self.response.write().unwrap() = (result, error);
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Permissions passed to each `log_in`, oldest first.
    pub fn requested_permissions(&self) -> Vec<Vec<String>> {
        self.calls.read().unwrap().clone()
    }
}

impl LoginProvider for FakeLoginProvider {
    fn log_in(
        &self,
        permissions: &[String],
        _context: Arc<dyn PresentationContext>,
        on_complete: LoginCompletion,
    ) {
        self.calls.write().unwrap().push(permissions.to_vec());
        let (result, error) = self.response.read().unwrap().clone();
        on_complete(result, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ConsentDecision, ConsentRequest};
    use std::sync::Mutex;

    struct NoUi;

    impl PresentationContext for NoUi {
        fn present(&self, _request: &ConsentRequest) -> std::io::Result<ConsentDecision> {
            unreachable!("fake never presents")
        }
    }

    #[test]
    fn replays_configuration_inline() {
        let fake = FakeLoginProvider::new(Some(LoginResult::cancelled()), None);
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        fake.log_in(
            &["public_profile".to_string()],
            Arc::new(NoUi),
            Box::new(move |result, error| {
                *sink.lock().unwrap() = Some((result, error));
            }),
        );

        let (result, error) = seen.lock().unwrap().take().unwrap();
        assert_eq!(result, Some(LoginResult::cancelled()));
        assert!(error.is_none());
        assert_eq!(fake.call_count(), 1);
        assert_eq!(
            fake.requested_permissions(),
            vec![vec!["public_profile".to_string()]]
        );
    }

    #[tokio::test]
    async fn reconfigure_changes_next_reply() {
        let fake = FakeLoginProvider::default();
        let first = fake.log_in_async(&[], Arc::new(NoUi)).await;
        assert_eq!(first.result, None);
        assert_eq!(first.error, None);

        fake.configure(None, Some(LoginError::Other("boom".into())));
        let second = fake.log_in_async(&[], Arc::new(NoUi)).await;
        assert_eq!(second.error, Some(LoginError::Other("boom".into())));
        assert_eq!(fake.call_count(), 2);
    }
}
