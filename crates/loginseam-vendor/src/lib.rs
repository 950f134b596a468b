pub mod error;
pub mod login_manager;
pub mod presenter;

pub use error::VendorError;
pub use login_manager::{
    AccessToken, LoginManager, LoginManagerLoginResult, LoginManagerLoginResultBlock,
    VendorConfig,
};
pub use presenter::{ConsentDecision, ConsentRequest, Presenter};
