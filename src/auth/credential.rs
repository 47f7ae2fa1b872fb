//! Bearer credential types
//!
//! A credential is an opaque bearer token plus a token-type label. The token
//! is held in a zeroize-on-drop wrapper so it does not linger in memory, and
//! its `Debug` output is redacted to keep it out of logs.

use std::fmt;

use zeroize::Zeroize;

/// Logical key the token is persisted under
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Logical key the token-type label is persisted under
pub const TOKEN_TYPE_KEY: &str = "token_type";

/// Token-type label used when none is stored
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// An opaque secret that zeroes its memory when dropped
///
/// Intentionally has no `Display` impl; `Debug` shows only the length.
#[derive(Clone)]
pub struct SecretToken {
    inner: String,
}

impl SecretToken {
    /// Wraps a token value, taking ownership of its memory
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: token.into(),
        }
    }

    /// Exposes the raw token for header composition or persistence
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Returns true if the token is the empty string
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Drop for SecretToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretToken")
            .field("len", &self.inner.len())
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl PartialEq for SecretToken {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(self.inner.as_bytes(), other.inner.as_bytes())
    }
}

impl Eq for SecretToken {}

impl From<String> for SecretToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl From<&str> for SecretToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// Constant-time byte comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// A bearer token plus its token-type label
///
/// The label defaults to `"Bearer"` and is normalized so it is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    token: SecretToken,
    token_type: String,
}

impl Credential {
    /// Creates a credential with an explicit token type
    ///
    /// An empty token-type label is replaced with [`DEFAULT_TOKEN_TYPE`].
    pub fn new(token: impl Into<SecretToken>, token_type: impl Into<String>) -> Self {
        let token_type = token_type.into();
        let token_type = if token_type.is_empty() {
            DEFAULT_TOKEN_TYPE.to_string()
        } else {
            token_type
        };
        Self {
            token: token.into(),
            token_type,
        }
    }

    /// Creates a credential with the default `"Bearer"` label
    pub fn bearer(token: impl Into<SecretToken>) -> Self {
        Self::new(token, DEFAULT_TOKEN_TYPE)
    }

    /// The raw token value
    pub fn token(&self) -> &str {
        self.token.expose()
    }

    /// The token-type label (never empty)
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Composes the `Authorization` header value, `"<type> <token>"`
    ///
    /// # Examples
    ///
    /// ```
    /// use microblog_client::auth::Credential;
    ///
    /// let credential = Credential::bearer("abc123");
    /// assert_eq!(credential.authorization_value(), "Bearer abc123");
    /// ```
    pub fn authorization_value(&self) -> String {
        format!("{} {}", self.token_type, self.token.expose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_value() {
        let credential = Credential::bearer("tok-1");
        assert_eq!(credential.authorization_value(), "Bearer tok-1");

        let custom = Credential::new("tok-2", "Token");
        assert_eq!(custom.authorization_value(), "Token tok-2");
    }

    #[test]
    fn test_empty_token_type_normalized() {
        let credential = Credential::new("tok", "");
        assert_eq!(credential.token_type(), DEFAULT_TOKEN_TYPE);
    }

    #[test]
    fn test_secret_token_debug_redacted() {
        let token = SecretToken::new("super-secret");
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_secret_token_equality() {
        assert_eq!(SecretToken::new("same"), SecretToken::new("same"));
        assert_ne!(SecretToken::new("one"), SecretToken::new("other"));
        assert_ne!(SecretToken::new("short"), SecretToken::new("short "));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"short", b"longer value"));
    }
}
