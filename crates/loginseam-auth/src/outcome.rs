use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{LoginError, PolicyError};
use crate::result::LoginResult;

/// Status recorded after a login attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginOutcome {
    #[default]
    None,
    Success,
    Cancelled,
    Error,
}

impl LoginOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginOutcome::None => "none",
            LoginOutcome::Success => "success",
            LoginOutcome::Cancelled => "cancelled",
            LoginOutcome::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, LoginOutcome::None)
    }
}

impl fmt::Display for LoginOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Precedence used to turn a `(result, error)` completion into an outcome.
///
/// `ErrorFirst` trusts a reported error over anything in the payload and
/// treats a missing or empty payload as a failure. `TokenFirst` trusts a token
/// over everything else and leaves the outcome untouched when there is no
/// payload to inspect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassificationPolicy {
    #[default]
    ErrorFirst,
    TokenFirst,
}

impl ClassificationPolicy {
    /// `None` means the completion is not classified and the outcome is left as is.
    pub fn classify(
        self,
        result: Option<&LoginResult>,
        error: Option<&LoginError>,
    ) -> Option<LoginOutcome> {
        match self {
            ClassificationPolicy::ErrorFirst => {
                let Some(result) = result else {
                    return Some(LoginOutcome::Error);
                };
                if error.is_some() {
                    Some(LoginOutcome::Error)
                } else if result.is_cancelled {
                    Some(LoginOutcome::Cancelled)
                } else if result.has_token() {
                    Some(LoginOutcome::Success)
                } else {
                    Some(LoginOutcome::Error)
                }
            }
            ClassificationPolicy::TokenFirst => {
                let result = result?;
                if result.has_token() {
                    Some(LoginOutcome::Success)
                } else if result.is_cancelled {
                    Some(LoginOutcome::Cancelled)
                } else if error.is_some() {
                    Some(LoginOutcome::Error)
                } else {
                    None
                }
            }
        }
    }
}

impl FromStr for ClassificationPolicy {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error-first" | "error_first" => Ok(ClassificationPolicy::ErrorFirst),
            "token-first" | "token_first" => Ok(ClassificationPolicy::TokenFirst),
            other => Err(PolicyError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::AccessToken;
    use chrono::Utc;

    fn token() -> LoginResult {
        LoginResult::with_token(AccessToken::new("present", "app", Utc::now()))
    }

    fn error() -> LoginError {
        LoginError::Other("some error".into())
    }

    #[test]
    fn error_first_precedence() {
        let p = ClassificationPolicy::ErrorFirst;
        assert_eq!(p.classify(Some(&token()), None), Some(LoginOutcome::Success));
        assert_eq!(
            p.classify(Some(&LoginResult::cancelled()), None),
            Some(LoginOutcome::Cancelled)
        );
        assert_eq!(
            p.classify(Some(&LoginResult::default()), Some(&error())),
            Some(LoginOutcome::Error)
        );
        // error wins over a token
        assert_eq!(
            p.classify(Some(&token()), Some(&error())),
            Some(LoginOutcome::Error)
        );
        // cancelled wins over a token
        let mut both = token();
        both.is_cancelled = true;
        assert_eq!(p.classify(Some(&both), None), Some(LoginOutcome::Cancelled));
        assert_eq!(
            p.classify(Some(&LoginResult::default()), None),
            Some(LoginOutcome::Error)
        );
        assert_eq!(p.classify(None, None), Some(LoginOutcome::Error));
        assert_eq!(p.classify(None, Some(&error())), Some(LoginOutcome::Error));
    }

    #[test]
    fn token_first_precedence() {
        let p = ClassificationPolicy::TokenFirst;
        assert_eq!(p.classify(Some(&token()), None), Some(LoginOutcome::Success));
        assert_eq!(
            p.classify(Some(&LoginResult::cancelled()), None),
            Some(LoginOutcome::Cancelled)
        );
        assert_eq!(
            p.classify(Some(&LoginResult::default()), Some(&error())),
            Some(LoginOutcome::Error)
        );
        // token wins over an error
        assert_eq!(
            p.classify(Some(&token()), Some(&error())),
            Some(LoginOutcome::Success)
        );
        assert_eq!(p.classify(Some(&LoginResult::default()), None), None);
        assert_eq!(p.classify(None, None), None);
        assert_eq!(p.classify(None, Some(&error())), None);
    }

    #[test]
    fn policy_from_str() {
        assert_eq!(
            "error-first".parse::<ClassificationPolicy>().unwrap(),
            ClassificationPolicy::ErrorFirst
        );
        assert_eq!(
            " Token_First ".parse::<ClassificationPolicy>().unwrap(),
            ClassificationPolicy::TokenFirst
        );
        assert!(matches!(
            "newest".parse::<ClassificationPolicy>(),
            Err(PolicyError::Unknown(_))
        ));
        assert_eq!(ClassificationPolicy::default(), ClassificationPolicy::ErrorFirst);
    }

    #[test]
    fn outcome_display_and_serialize() {
        assert_eq!(LoginOutcome::default(), LoginOutcome::None);
        assert_eq!(LoginOutcome::Cancelled.to_string(), "cancelled");
        assert_eq!(
            serde_json::to_string(&LoginOutcome::Success).unwrap(),
            "\"success\""
        );
        assert!(!LoginOutcome::None.is_terminal());
        assert!(LoginOutcome::Error.is_terminal());
    }
}
