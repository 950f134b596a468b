pub mod adapter;
pub mod controller;
pub mod error;
pub mod locator;
pub mod outcome;
pub mod result;
pub mod traits;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use adapter::VendorLoginProvider;
pub use controller::{LoginController, DEFAULT_PERMISSIONS};
pub use error::{LoginError, PolicyError};
pub use locator::LoginServices;
pub use outcome::{ClassificationPolicy, LoginOutcome};
pub use result::{AccessToken, LoginResponse, LoginResult};
pub use traits::{
    ConsentDecision, ConsentRequest, LoginCompletion, LoginProvider, PresentationContext,
};
