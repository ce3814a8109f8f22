//! LinkedIn token exchange and profile fetch
//!
//! [`IdentityProvider`] is the seam the callback processor depends on;
//! [`LinkedInClient`] is the production implementation over `reqwest`.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::error::AuthError;
use crate::models::ProfilePosition;
use crate::settings::LinkedInSettings;
use crate::utils::logging::LoggingHelper;

/// Rest.li projection requesting the member id and position history
pub const PROFILE_PROJECTION: &str = "(id,positions)";

/// Bearer credential for the profile API
///
/// Lives only for the duration of one callback. `Debug` never prints the value.
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(value: String) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken(<{} chars>)", self.0.len())
    }
}

/// Identity provider operations used by the callback processor
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange an authorization code for an access token
    ///
    /// # Errors
    ///
    /// - [`AuthError::TransportFailure`] if the token endpoint cannot be reached
    /// - [`AuthError::TokenExchangeFailed`] if the response carries no access token
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, AuthError>;

    /// Fetch the member's positions, in provider order
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ProfileFetchFailed`] on transport failure, non-2xx
    /// status or an undecodable body
    async fn fetch_positions(&self, token: &AccessToken)
        -> Result<Vec<ProfilePosition>, AuthError>;
}

#[derive(Debug, Default, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    id: Option<String>,
    positions: Option<PositionCollection>,
}

#[derive(Debug, Deserialize)]
struct PositionCollection {
    elements: Option<Vec<ProfilePosition>>,
}

/// LinkedIn client holding the app credentials
///
/// The client secret never leaves this struct.
#[derive(Clone)]
pub struct LinkedInClient {
    http_client: reqwest::Client,
    token_endpoint: String,
    profile_endpoint: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl LinkedInClient {
    /// Create a client from settings
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if:
    /// - client id or client secret is missing
    /// - the HTTP client cannot be built
    pub fn from_settings(settings: &LinkedInSettings) -> Result<Self, AuthError> {
        let client_id = settings.get_client_id().ok_or_else(|| {
            AuthError::Configuration("LinkedIn client_id is not configured".to_string())
        })?;
        let client_secret = settings.get_client_secret().ok_or_else(|| {
            AuthError::Configuration("LinkedIn client_secret is not configured".to_string())
        })?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_seconds))
            .build()
            .map_err(|e| AuthError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            token_endpoint: settings.token_endpoint.clone(),
            profile_endpoint: settings.profile_endpoint.clone(),
            client_id,
            client_secret,
            redirect_uri: settings.redirect_uri.clone(),
        })
    }

    fn profile_url(&self) -> Result<Url, AuthError> {
        let mut url = Url::parse(&self.profile_endpoint).map_err(|e| {
            AuthError::ProfileFetchFailed(format!(
                "Invalid profile endpoint {}: {e}",
                self.profile_endpoint
            ))
        })?;
        // Rest.li wants the projection parentheses unencoded, so the pair is appended raw
        let projection = format!("projection={PROFILE_PROJECTION}");
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{projection}"),
            _ => projection,
        };
        url.set_query(Some(&query));
        Ok(url)
    }
}

#[async_trait]
impl IdentityProvider for LinkedInClient {
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, AuthError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        LoggingHelper::log_token_exchange_start(&self.token_endpoint);
        let response = self
            .http_client
            .post(&self.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AuthError::TransportFailure(format!("Failed to reach token endpoint: {e}"))
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AuthError::TransportFailure(format!("Failed to read token response: {e}"))
        })?;

        let token_response: TokenResponse = serde_json::from_str(&response_text).map_err(|e| {
            AuthError::TokenExchangeFailed(format!(
                "Unreadable token response (status {status}): {e}"
            ))
        })?;

        LoggingHelper::log_token_exchange_summary(
            status.as_u16(),
            token_response.access_token.as_deref(),
            token_response.expires_in,
        );

        match token_response.access_token {
            Some(token) if !token.is_empty() => Ok(AccessToken::new(token)),
            _ => Err(AuthError::TokenExchangeFailed(format!(
                "No access token in response (status {status}, error: {}, description: {})",
                token_response.error.as_deref().unwrap_or("none"),
                token_response.error_description.as_deref().unwrap_or("none"),
            ))),
        }
    }

    async fn fetch_positions(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<ProfilePosition>, AuthError> {
        let url = self.profile_url()?;

        let response = self
            .http_client
            .get(url)
            .bearer_auth(token.secret())
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .header("X-Restli-Protocol-Version", "2.0.0")
            .send()
            .await
            .map_err(|e| AuthError::ProfileFetchFailed(format!("Profile request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::ProfileFetchFailed(format!(
                "Profile request returned status {status}"
            )));
        }

        let profile: ProfileResponse = response.json().await.map_err(|e| {
            AuthError::ProfileFetchFailed(format!("Failed to parse profile response: {e}"))
        })?;

        let positions = profile
            .positions
            .and_then(|collection| collection.elements)
            .unwrap_or_default();
        LoggingHelper::log_profile_fetched(profile.id.as_deref(), positions.len());

        Ok(positions)
    }
}

/// Identity provider shared by all workers
///
/// Empty when LinkedIn is not configured; every provider call then fails with
/// [`AuthError::Configuration`] after the callback itself has been validated.
#[derive(Clone)]
pub struct ProviderHandle {
    inner: Option<Arc<dyn IdentityProvider>>,
}

impl ProviderHandle {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            inner: Some(provider),
        }
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self { inner: None }
    }

    /// LinkedIn client when credentials are present, otherwise unavailable
    #[must_use]
    pub fn from_settings(settings: &LinkedInSettings) -> Self {
        match LinkedInClient::from_settings(settings) {
            Ok(client) => Self::new(Arc::new(client)),
            Err(e) => {
                log::warn!("LinkedIn provider unavailable: {e}");
                Self::unavailable()
            }
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.inner.is_some()
    }

    fn provider(&self) -> Result<&dyn IdentityProvider, AuthError> {
        self.inner.as_deref().ok_or_else(|| {
            AuthError::Configuration("LinkedIn client is not configured".to_string())
        })
    }
}

#[async_trait]
impl IdentityProvider for ProviderHandle {
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, AuthError> {
        self.provider()?.exchange_code(code).await
    }

    async fn fetch_positions(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<ProfilePosition>, AuthError> {
        self.provider()?.fetch_positions(token).await
    }
}
