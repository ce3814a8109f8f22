//! Callback processing: validate the callback, talk to LinkedIn, classify
//!
//! The processor runs the callback steps in order and stops at the first
//! failure. It never touches HTTP requests or responses; the handler maps the
//! outcome onto a redirect.

use log::debug;

use super::error::{AuthError, DEFAULT_DENIED_MESSAGE};
use super::linkedin::IdentityProvider;
use super::{OAuthCallback, OAuthState};
use crate::classification::classify_positions;
use crate::models::EmploymentClassification;
use crate::utils::logging::LoggingHelper;

/// Drives one callback invocation against an [`IdentityProvider`]
pub struct CallbackProcessor<'a, P: IdentityProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: IdentityProvider + ?Sized> CallbackProcessor<'a, P> {
    #[must_use]
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Turn a callback into an employment classification
    ///
    /// `stored_state` is the state saved at sign-in, if the browser still has it.
    ///
    /// # Errors
    ///
    /// - [`AuthError::ProviderDenied`] if the callback carries an `error`
    /// - [`AuthError::MissingCode`] if no authorization code was supplied
    /// - [`AuthError::InvalidState`] if the state is missing or does not match
    /// - any error from the token exchange or the profile fetch
    pub async fn process(
        &self,
        callback: &OAuthCallback,
        stored_state: Option<&OAuthState>,
    ) -> Result<EmploymentClassification, AuthError> {
        Self::check_provider_error(callback)?;
        let code = Self::extract_code(callback)?;
        Self::verify_state(callback, stored_state)?;

        let token = self.provider.exchange_code(code).await?;
        let positions = self.provider.fetch_positions(&token).await?;
        // token is dropped here; only the classification leaves this function

        let classification = classify_positions(&positions);
        LoggingHelper::log_classification(&classification);
        Ok(classification)
    }

    fn check_provider_error(callback: &OAuthCallback) -> Result<(), AuthError> {
        let Some(code) = callback.error.as_deref().filter(|error| !error.is_empty()) else {
            return Ok(());
        };

        let message = callback
            .error_description
            .as_deref()
            .filter(|description| !description.is_empty())
            .unwrap_or(DEFAULT_DENIED_MESSAGE);

        Err(AuthError::ProviderDenied {
            code: code.to_string(),
            message: message.to_string(),
        })
    }

    fn extract_code(callback: &OAuthCallback) -> Result<&str, AuthError> {
        match callback.code.as_deref() {
            Some(code) if !code.trim().is_empty() => Ok(code),
            _ => Err(AuthError::MissingCode),
        }
    }

    fn verify_state(
        callback: &OAuthCallback,
        stored_state: Option<&OAuthState>,
    ) -> Result<(), AuthError> {
        let received = callback
            .state
            .as_deref()
            .filter(|state| !state.trim().is_empty())
            .ok_or_else(|| AuthError::InvalidState("no state parameter in callback".to_string()))?;

        let stored = stored_state.ok_or_else(|| {
            AuthError::InvalidState("no stored state for this browser".to_string())
        })?;

        if stored.state != received {
            return Err(AuthError::InvalidState(
                "state parameter does not match stored state".to_string(),
            ));
        }

        debug!("OAuth state verified");
        Ok(())
    }
}
