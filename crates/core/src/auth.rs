//! Authentication strategies
//!
//! The client asks its [`AuthMethod`] for a token on every request and sends
//! it as `X-Auth-Token`. Only a static Keystone token is provided here;
//! callers that need refresh implement the trait themselves.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Produces the token attached to each API request
#[async_trait]
pub trait AuthMethod: Send + Sync {
    /// Token sent as the `X-Auth-Token` header
    async fn token(&self) -> Result<String>;
}

/// Static Keystone token
#[derive(Clone)]
pub struct KeystoneTokenAuth {
    token: String,
}

impl KeystoneTokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for KeystoneTokenAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeystoneTokenAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl AuthMethod for KeystoneTokenAuth {
    async fn token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// Authentication options accepted by the client builder
#[derive(Clone, Default)]
pub struct AuthOpts {
    /// Keystone token; empty means "not configured"
    pub keystone_token: String,
}

impl AuthOpts {
    pub fn keystone_token(token: impl Into<String>) -> Self {
        Self {
            keystone_token: token.into(),
        }
    }

    /// Resolve the options into a strategy, if any is configured
    pub fn into_auth_method(self) -> Option<Arc<dyn AuthMethod>> {
        if self.keystone_token.is_empty() {
            return None;
        }
        Some(Arc::new(KeystoneTokenAuth::new(self.keystone_token)))
    }
}

impl fmt::Debug for AuthOpts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.keystone_token.is_empty() {
            "<empty>"
        } else {
            "<redacted>"
        };
        f.debug_struct("AuthOpts")
            .field("keystone_token", &token)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_keystone_token_returned_unchanged() {
        let auth = KeystoneTokenAuth::new("gAAAAABk-token");
        assert_eq!(auth.token().await.unwrap(), "gAAAAABk-token");
        assert_eq!(auth.token().await.unwrap(), "gAAAAABk-token");
    }

    #[test]
    fn test_keystone_debug_redacts_token() {
        let auth = KeystoneTokenAuth::new("very-secret");
        assert!(!format!("{auth:?}").contains("very-secret"));

        let opts = AuthOpts::keystone_token("very-secret");
        assert!(!format!("{opts:?}").contains("very-secret"));
    }

    #[test]
    fn test_empty_auth_opts_has_no_method() {
        assert!(AuthOpts::default().into_auth_method().is_none());
        assert!(AuthOpts::keystone_token("").into_auth_method().is_none());
    }

    #[tokio::test]
    async fn test_auth_opts_into_keystone_method() {
        let method = AuthOpts::keystone_token("tok").into_auth_method().unwrap();
        assert_eq!(method.token().await.unwrap(), "tok");
    }
}
