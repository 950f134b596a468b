use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::LoginError;
use crate::locator::LoginServices;
use crate::outcome::{ClassificationPolicy, LoginOutcome};
use crate::result::LoginResult;
use crate::traits::{LoginProvider, PresentationContext};

pub const DEFAULT_PERMISSIONS: &[&str] = &["public_profile"];

/// Outcome shared between the controller and in-flight completions.
struct OutcomeState {
    next_attempt: AtomicU64,
    /// Attempt still waiting for its completion, 0 when none.
    open_attempt: AtomicU64,
    tx: watch::Sender<LoginOutcome>,
}

impl OutcomeState {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(LoginOutcome::None);
        Self {
            next_attempt: AtomicU64::new(1),
            open_attempt: AtomicU64::new(0),
            tx,
        }
    }

    fn begin(&self) -> u64 {
        let attempt = self.next_attempt.fetch_add(1, Ordering::SeqCst);
        // Opening the attempt and resetting the value share the channel lock
        // so a completion can never land between the two.
        self.tx.send_modify(|outcome| {
            self.open_attempt.store(attempt, Ordering::SeqCst);
            *outcome = LoginOutcome::None;
        });
        attempt
    }

    fn complete(
        &self,
        attempt: u64,
        policy: ClassificationPolicy,
        result: Option<LoginResult>,
        error: Option<LoginError>,
    ) {
        if let Some(ref e) = error {
            tracing::warn!("Login attempt {attempt} reported error: {e}");
        }
        let classified = policy.classify(result.as_ref(), error.as_ref());
        let mut current = false;
        // Checking the attempt and publishing happen under the channel lock.
        // No logging in here: a log layer that re-enters the controller would
        // deadlock on that lock.
        self.tx.send_if_modified(|outcome| {
            current = self
                .open_attempt
                .compare_exchange(attempt, 0, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok();
            match classified {
                Some(o) if current => {
                    *outcome = o;
                    true
                }
                _ => false,
            }
        });

        if !current {
            tracing::debug!("Ignoring completion for superseded login attempt {attempt}");
            return;
        }
        match classified {
            Some(outcome) => tracing::info!("Login attempt {attempt} finished: {outcome}"),
            None => tracing::info!("Login attempt {attempt} finished without a classifiable result"),
        }
    }
}

/// Drives the login button: asks the provider to log in and records the outcome.
///
/// The provider is injected, never looked up from shared state, so tests hand
/// in a [`crate::mock::FakeLoginProvider`] directly.
pub struct LoginController {
    provider: Arc<dyn LoginProvider>,
    context: Arc<dyn PresentationContext>,
    permissions: Vec<String>,
    policy: ClassificationPolicy,
    state: Arc<OutcomeState>,
}

impl LoginController {
    pub fn new(
        provider: Arc<dyn LoginProvider>,
        context: Arc<dyn PresentationContext>,
        permissions: Vec<String>,
        policy: ClassificationPolicy,
    ) -> Self {
        Self {
            provider,
            context,
            permissions,
            policy,
            state: Arc::new(OutcomeState::new()),
        }
    }

    /// Controller asking for [`DEFAULT_PERMISSIONS`] with the default policy.
    pub fn with_defaults(
        provider: Arc<dyn LoginProvider>,
        context: Arc<dyn PresentationContext>,
    ) -> Self {
        Self::new(
            provider,
            context,
            DEFAULT_PERMISSIONS.iter().map(|p| p.to_string()).collect(),
            ClassificationPolicy::default(),
        )
    }

    /// Resolve the provider once from `services`.
    pub fn from_services(
        services: &LoginServices,
        context: Arc<dyn PresentationContext>,
        permissions: Vec<String>,
        policy: ClassificationPolicy,
    ) -> Self {
        Self::new(services.get(), context, permissions, policy)
    }

    pub fn outcome(&self) -> LoginOutcome {
        *self.state.tx.borrow()
    }

    /// Observe outcome changes, e.g. from the thread that owns the UI.
    pub fn subscribe(&self) -> watch::Receiver<LoginOutcome> {
        self.state.tx.subscribe()
    }

    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    pub fn policy(&self) -> ClassificationPolicy {
        self.policy
    }

    /// Button handler. Starts a new attempt and returns its id.
    ///
    /// The outcome is reset to `None` first; it changes again whenever the
    /// provider completes, which for a synchronous provider is before this
    /// returns.
    pub fn login_tapped(&self) -> u64 {
        let attempt = self.state.begin();
        tracing::debug!("Login attempt {attempt} started");
        let state = self.state.clone();
        let policy = self.policy;
        self.provider.log_in(
            &self.permissions,
            self.context.clone(),
            Box::new(move |result, error| state.complete(attempt, policy, result, error)),
        );
        attempt
    }

    /// Run one attempt to completion and return the recorded outcome.
    pub async fn login(&self) -> LoginOutcome {
        let attempt = self.state.begin();
        tracing::debug!("Login attempt {attempt} started");
        let response = self
            .provider
            .log_in_async(&self.permissions, self.context.clone())
            .await;
        self.state
            .complete(attempt, self.policy, response.result, response.error);
        self.outcome()
    }
}
