use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::error::LoginError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token_string: String,
    pub app_id: String,
    pub permissions: BTreeSet<String>,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token_string: impl Into<String>, app_id: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_string: token_string.into(),
            app_id: app_id.into(),
            permissions: BTreeSet::new(),
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Payload handed back by a login provider.
///
/// Normally exactly one of "token present" or "cancelled" holds, but nothing
/// enforces it; see [`crate::outcome::ClassificationPolicy`] for how mixed
/// payloads are read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginResult {
    pub token: Option<AccessToken>,
    pub is_cancelled: bool,
    pub granted_permissions: BTreeSet<String>,
    pub declined_permissions: BTreeSet<String>,
}

impl LoginResult {
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            granted_permissions: token.permissions.clone(),
            token: Some(token),
            ..Self::default()
        }
    }

    pub fn cancelled() -> Self {
        Self {
            is_cancelled: true,
            ..Self::default()
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

/// Both halves of a completion, as produced by
/// [`crate::traits::LoginProvider::log_in_async`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginResponse {
    pub result: Option<LoginResult>,
    pub error: Option<LoginError>,
}

impl LoginResponse {
    pub fn failed(error: LoginError) -> Self {
        Self {
            result: None,
            error: Some(error),
        }
    }
}
