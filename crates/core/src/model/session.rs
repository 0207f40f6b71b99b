use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session token cannot be empty")]
    EmptyToken,
}

//
// ─── SESSION TOKEN ─────────────────────────────────────────────────────────────
//

/// Opaque proof of an authenticated session.
///
/// Never empty: an empty raw value is the unauthenticated case, not a token.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// # Errors
    ///
    /// Returns `SessionError::EmptyToken` for an empty string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, SessionError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionToken {
    type Error = SessionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

// Tokens stay out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Snapshot of the authenticated-state record, read once per protected view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: Option<SessionToken>,
    display_name: Option<String>,
}

impl Session {
    /// A session with no token.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn authenticated(token: SessionToken, display_name: Option<String>) -> Self {
        Self {
            token: Some(token),
            display_name,
        }
    }

    /// Build a session from raw stored values.
    ///
    /// Empty strings are treated exactly like missing values.
    #[must_use]
    pub fn from_raw(token: Option<&str>, display_name: Option<&str>) -> Self {
        Self {
            token: token.and_then(|t| SessionToken::parse(t).ok()),
            display_name: display_name
                .filter(|name| !name.is_empty())
                .map(str::to_owned),
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_rejected() {
        assert_eq!(SessionToken::parse(""), Err(SessionError::EmptyToken));
    }

    #[test]
    fn from_raw_treats_empty_as_missing() {
        let session = Session::from_raw(Some(""), Some(""));
        assert!(!session.is_authenticated());
        assert_eq!(session.display_name(), None);
    }

    #[test]
    fn from_raw_keeps_values() {
        let session = Session::from_raw(Some("abc"), Some("João da Silva"));
        assert_eq!(session.token().map(SessionToken::as_str), Some("abc"));
        assert_eq!(session.display_name(), Some("João da Silva"));
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::parse("secret").unwrap();
        assert_eq!(format!("{token:?}"), "SessionToken(..)");
    }
}
