//! Failure taxonomy of the LinkedIn sign-in flow

use thiserror::Error;

/// Message shown when the provider reports an error without a description
pub const DEFAULT_DENIED_MESSAGE: &str = "Authentication failed";

/// Message shown when the token endpoint returns no access token
pub const TOKEN_EXCHANGE_MESSAGE: &str = "Failed to obtain access token";

/// Message shown for every failure after a token was obtained
pub const PROVIDER_DATA_MESSAGE: &str = "Failed to process LinkedIn data";

/// Every way a sign-in attempt can end without a classification
///
/// All variants are terminal: nothing is retried and the user restarts from
/// the sign-in endpoint.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The user declined or LinkedIn returned an `error` parameter
    #[error("provider denied authorization ({code}): {message}")]
    ProviderDenied { code: String, message: String },

    /// The callback carried neither `code` nor `error`
    #[error("no authorization code provided")]
    MissingCode,

    /// The `state` parameter is missing or does not match the stored one
    #[error("invalid OAuth state: {0}")]
    InvalidState(String),

    /// The token endpoint answered without an access token
    #[error("token exchange failed: {0}")]
    TokenExchangeFailed(String),

    /// The profile request failed or returned an unusable body
    #[error("profile fetch failed: {0}")]
    ProfileFetchFailed(String),

    /// The HTTP client could not complete a request
    #[error("transport failure: {0}")]
    TransportFailure(String),

    /// The LinkedIn client is not usable with the current settings
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl AuthError {
    /// Text shown to the user in the `message` redirect parameter
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::ProviderDenied { message, .. } => message,
            Self::MissingCode => "No code provided",
            Self::InvalidState(_) => "Invalid authentication state, please sign in again",
            Self::TokenExchangeFailed(_) => TOKEN_EXCHANGE_MESSAGE,
            Self::ProfileFetchFailed(_) | Self::TransportFailure(_) => PROVIDER_DATA_MESSAGE,
            Self::Configuration(_) => "LinkedIn sign-in is not available",
        }
    }

    /// Short machine-readable name used in logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProviderDenied { .. } => "provider_denied",
            Self::MissingCode => "missing_code",
            Self::InvalidState(_) => "invalid_state",
            Self::TokenExchangeFailed(_) => "token_exchange_failed",
            Self::ProfileFetchFailed(_) => "profile_fetch_failed",
            Self::TransportFailure(_) => "transport_failure",
            Self::Configuration(_) => "configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_denied_message_is_verbatim() {
        let error = AuthError::ProviderDenied {
            code: "user_cancelled_login".to_string(),
            message: "The user cancelled LinkedIn login".to_string(),
        };
        assert_eq!(error.user_message(), "The user cancelled LinkedIn login");
    }

    #[test]
    fn test_post_token_failures_share_message() {
        assert_eq!(
            AuthError::ProfileFetchFailed("500".to_string()).user_message(),
            PROVIDER_DATA_MESSAGE
        );
        assert_eq!(
            AuthError::TransportFailure("timeout".to_string()).user_message(),
            PROVIDER_DATA_MESSAGE
        );
        assert_eq!(
            AuthError::TokenExchangeFailed("no token".to_string()).user_message(),
            TOKEN_EXCHANGE_MESSAGE
        );
    }

    #[test]
    fn test_display_includes_detail() {
        let error = AuthError::InvalidState("mismatch".to_string());
        assert_eq!(error.to_string(), "invalid OAuth state: mismatch");
        assert_eq!(error.kind(), "invalid_state");
    }
}
