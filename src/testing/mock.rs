//! Callback builders and a scripted identity provider

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::constants::TEST_ACCESS_TOKEN;
use crate::models::ProfilePosition;
use crate::oauth::{AccessToken, AuthError, IdentityProvider, OAuthCallback};

/// Callback query parameters as LinkedIn would send them
pub struct MockOAuthCallback;

impl MockOAuthCallback {
    #[must_use]
    pub fn success(code: &str, state: &str) -> OAuthCallback {
        OAuthCallback {
            code: Some(code.to_string()),
            state: Some(state.to_string()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn error(error: &str, description: Option<&str>) -> OAuthCallback {
        OAuthCallback {
            error: Some(error.to_string()),
            error_description: description.map(ToString::to_string),
            ..Default::default()
        }
    }
}

/// Identity provider returning canned results and counting calls
pub struct ScriptedIdentityProvider {
    exchange_result: Result<(), AuthError>,
    profile_result: Result<Vec<ProfilePosition>, AuthError>,
    exchange_calls: AtomicUsize,
    profile_calls: AtomicUsize,
    last_code: Mutex<Option<String>>,
}

impl ScriptedIdentityProvider {
    fn new(
        exchange_result: Result<(), AuthError>,
        profile_result: Result<Vec<ProfilePosition>, AuthError>,
    ) -> Self {
        Self {
            exchange_result,
            profile_result,
            exchange_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
            last_code: Mutex::new(None),
        }
    }

    /// Token exchange succeeds and the profile holds `positions`
    #[must_use]
    pub fn with_positions(positions: Vec<ProfilePosition>) -> Self {
        Self::new(Ok(()), Ok(positions))
    }

    #[must_use]
    pub fn failing_exchange(error: AuthError) -> Self {
        Self::new(Err(error), Ok(Vec::new()))
    }

    #[must_use]
    pub fn failing_profile(error: AuthError) -> Self {
        Self::new(Ok(()), Err(error))
    }

    pub fn exchange_calls(&self) -> usize {
        self.exchange_calls.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn last_code(&self) -> Option<String> {
        self.last_code.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentityProvider {
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, AuthError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last_code) = self.last_code.lock() {
            *last_code = Some(code.to_string());
        }
        self.exchange_result
            .clone()
            .map(|()| AccessToken::new(TEST_ACCESS_TOKEN.to_string()))
    }

    async fn fetch_positions(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<ProfilePosition>, AuthError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        if token.secret() != TEST_ACCESS_TOKEN {
            return Err(AuthError::ProfileFetchFailed("unexpected token".to_string()));
        }
        self.profile_result.clone()
    }
}
