//! Pre-built settings, session managers and requests for tests

use actix_web::cookie::Cookie;
use actix_web::{test, HttpRequest};

use super::constants::{
    TEST_CLIENT_ID, TEST_CLIENT_SECRET, TEST_REDIRECT_URI, TEST_SESSION_SECRET,
};
use crate::models::SessionContext;
use crate::oauth::OAuthState;
use crate::session::SessionManager;
use crate::settings::{LinkedInSettings, SessionSettings, TjmSettings};

pub struct TestFixtures;

impl TestFixtures {
    /// LinkedIn settings with inline credentials and no env indirection
    #[must_use]
    pub fn linkedin_settings() -> LinkedInSettings {
        LinkedInSettings {
            client_id: Some(TEST_CLIENT_ID.to_string()),
            client_secret: Some(TEST_CLIENT_SECRET.to_string()),
            client_id_env: None,
            client_secret_env: None,
            redirect_uri: TEST_REDIRECT_URI.to_string(),
            request_timeout_seconds: 5,
            ..Default::default()
        }
    }

    /// LinkedIn settings pointing the token and profile endpoints at `base_url`
    #[must_use]
    pub fn linkedin_settings_for(base_url: &str) -> LinkedInSettings {
        LinkedInSettings {
            token_endpoint: format!("{base_url}/oauth/v2/accessToken"),
            profile_endpoint: format!("{base_url}/v2/me"),
            ..Self::linkedin_settings()
        }
    }

    /// Full settings with a fixed secret and insecure cookies
    #[must_use]
    pub fn settings() -> TjmSettings {
        let mut settings = TjmSettings::default();
        settings.session = SessionSettings {
            session_secret: TEST_SESSION_SECRET.to_string(),
            session_duration_hours: 24,
        };
        settings.cookies.secure = false;
        settings.linkedin = Self::linkedin_settings();
        settings
    }

    /// Settings with the LinkedIn endpoints pointed at a mock server
    #[must_use]
    pub fn settings_for(base_url: &str) -> TjmSettings {
        let mut settings = Self::settings();
        settings.linkedin = Self::linkedin_settings_for(base_url);
        settings
    }

    /// Session manager keyed like [`TestFixtures::settings`]
    #[must_use]
    pub fn session_manager() -> SessionManager {
        SessionManager::from_settings(&Self::settings())
    }

    /// State as stored at sign-in
    #[must_use]
    pub fn oauth_state(state: &str) -> OAuthState {
        OAuthState {
            state: state.to_string(),
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Encrypted state cookie for `state`
    ///
    /// # Panics
    ///
    /// Panics if the cookie cannot be encrypted
    #[must_use]
    pub fn state_cookie(state: &str) -> Cookie<'static> {
        Self::session_manager()
            .create_state_cookie(&Self::oauth_state(state))
            .unwrap()
    }

    /// Encrypted session cookie for an authenticated user
    ///
    /// # Panics
    ///
    /// Panics if the cookie cannot be encrypted
    #[must_use]
    pub fn session_cookie(is_freelance: bool) -> Cookie<'static> {
        let session = SessionContext {
            is_authenticated: true,
            is_freelance: Some(is_freelance),
            authenticated_at: Some(chrono::Utc::now()),
        };
        Self::session_manager().create_session_cookie(&session).unwrap()
    }

    /// Request carrying a single cookie
    #[must_use]
    pub fn request_with_cookie(cookie: Cookie<'static>) -> HttpRequest {
        test::TestRequest::default().cookie(cookie).to_http_request()
    }
}
