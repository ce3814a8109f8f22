//! LinkedIn OAuth flow
//!
//! This module provides the authorization URL builder, the LinkedIn HTTP client
//! (token exchange and profile fetch), and the callback processor that turns a
//! callback into an employment classification.

pub mod authorize;
pub mod error;
pub mod linkedin;
pub mod processor;

pub use authorize::AuthorizationRequest;
pub use error::AuthError;
pub use linkedin::{AccessToken, IdentityProvider, LinkedInClient, ProviderHandle};
pub use processor::CallbackProcessor;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::utils::crypto::generate_csrf_token;

/// Query parameters LinkedIn sends to the redirect target
#[derive(Deserialize, Debug, Default, Clone)]
pub struct OAuthCallback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// CSRF state bound to the browser between sign-in and callback
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OAuthState {
    pub state: String,
    /// Unix timestamp (seconds) of the sign-in redirect
    pub created_at: i64,
}

impl OAuthState {
    /// Fresh random state for a new sign-in attempt
    #[must_use]
    pub fn generate() -> Self {
        Self {
            state: generate_csrf_token(),
            created_at: Utc::now().timestamp(),
        }
    }

    /// Whether the state is older than `ttl_minutes`
    #[must_use]
    pub fn is_expired(&self, ttl_minutes: i64) -> bool {
        Utc::now().timestamp() - self.created_at > ttl_minutes * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_states_differ() {
        let first = OAuthState::generate();
        let second = OAuthState::generate();
        assert_ne!(first.state, second.state);
        assert!(!first.is_expired(10));
    }

    #[test]
    fn test_state_expiry() {
        let state = OAuthState {
            state: "s".to_string(),
            created_at: Utc::now().timestamp() - 601,
        };
        assert!(state.is_expired(10));
        assert!(!state.is_expired(11));
    }

    #[test]
    fn test_callback_deserializes_error_query() {
        let callback: OAuthCallback = serde_json::from_value(serde_json::json!({
            "error": "user_cancelled_login",
            "error_description": "The user cancelled LinkedIn login",
        }))
        .unwrap();
        assert!(callback.code.is_none());
        assert_eq!(callback.error.as_deref(), Some("user_cancelled_login"));
    }
}
