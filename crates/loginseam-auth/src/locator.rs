use std::sync::{Arc, PoisonError, RwLock};

use loginseam_vendor::LoginManager;

use crate::adapter::VendorLoginProvider;
use crate::traits::LoginProvider;

/// Holds the login provider the application currently resolves.
///
/// One instance is created at bootstrap and handed to whoever builds
/// controllers; tests create their own and swap in a fake with [`set`].
///
/// [`set`]: LoginServices::set
pub struct LoginServices {
    provider: RwLock<Arc<dyn LoginProvider>>,
}

impl LoginServices {
    pub fn new(provider: Arc<dyn LoginProvider>) -> Self {
        Self {
            provider: RwLock::new(provider),
        }
    }

    /// Bind the real SDK.
    pub fn with_vendor(manager: LoginManager) -> Self {
        Self::new(Arc::new(VendorLoginProvider::new(manager)))
    }

    pub fn get(&self) -> Arc<dyn LoginProvider> {
        self.provider
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, provider: Arc<dyn LoginProvider>) {
        *self
            .provider
            .write()
            .unwrap_or_else(PoisonError::into_inner) = provider;
    }
}
