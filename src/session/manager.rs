//! Session context and OAuth state stored in encrypted cookies
//!
//! Nothing is kept server side. The access token is never part of either
//! cookie: the browser only ever sees the classification.

use actix_web::cookie::{time::Duration, Cookie};
use actix_web::HttpRequest;
use anyhow::Result;
use log::{debug, warn};

use super::cookie::{
    CookieFactory, CookieOptions, OAUTH_STATE_COOKIE, OAUTH_STATE_TTL_MINUTES,
    SESSION_COOKIE_NAME,
};
use crate::models::SessionContext;
use crate::oauth::OAuthState;
use crate::settings::TjmSettings;
use crate::utils::crypto::derive_encryption_key;

#[derive(Clone)]
pub struct SessionManager {
    cookie_factory: CookieFactory,
    session_duration_hours: u64,
}

impl SessionManager {
    #[must_use]
    pub fn new(encryption_key: [u8; 32], cookie_secure: bool, session_duration_hours: u64) -> Self {
        Self {
            cookie_factory: CookieFactory::new(encryption_key, cookie_secure),
            session_duration_hours,
        }
    }

    /// Build a session manager keyed from `session.session_secret`
    #[must_use]
    pub fn from_settings(settings: &TjmSettings) -> Self {
        let key = derive_encryption_key(settings.session.session_secret.as_bytes());
        Self::new(
            key,
            settings.cookies.secure,
            settings.session.session_duration_hours,
        )
    }

    /// Short-lived cookie carrying the state sent to LinkedIn
    ///
    /// # Errors
    ///
    /// Returns an error if encryption fails
    pub fn create_state_cookie(&self, state: &OAuthState) -> Result<Cookie<'static>> {
        self.cookie_factory.create_cookie(
            OAUTH_STATE_COOKIE,
            state,
            CookieOptions {
                max_age: Duration::minutes(OAUTH_STATE_TTL_MINUTES),
                ..Default::default()
            },
        )
    }

    /// Stored OAuth state, `None` when absent, undecryptable or too old
    #[must_use]
    pub fn get_state_from_request(&self, req: &HttpRequest) -> Option<OAuthState> {
        let cookie = req.cookie(OAUTH_STATE_COOKIE)?;
        match self.cookie_factory.decrypt_cookie::<OAuthState>(&cookie) {
            Ok(state) if state.is_expired(OAUTH_STATE_TTL_MINUTES) => {
                warn!("Stored OAuth state expired, created at {}", state.created_at);
                None
            }
            Ok(state) => Some(state),
            Err(e) => {
                warn!("Failed to decrypt OAuth state cookie: {e}");
                None
            }
        }
    }

    #[must_use]
    pub fn create_expired_state_cookie(&self) -> Cookie<'static> {
        self.cookie_factory.create_expired_cookie(OAUTH_STATE_COOKIE)
    }

    /// Session cookie holding the authentication and classification flags
    ///
    /// # Errors
    ///
    /// Returns an error if encryption fails
    pub fn create_session_cookie(&self, session: &SessionContext) -> Result<Cookie<'static>> {
        self.cookie_factory.create_cookie(
            SESSION_COOKIE_NAME,
            session,
            CookieOptions {
                max_age: Duration::hours(self.session_max_age_hours()),
                ..Default::default()
            },
        )
    }

    /// Configured lifetime clamped to what a cookie max-age can represent
    fn session_max_age_hours(&self) -> i64 {
        i64::try_from(self.session_duration_hours)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 3600)
    }

    /// Session context of the request; anonymous when missing, invalid or expired
    #[must_use]
    pub fn get_session_from_request(&self, req: &HttpRequest) -> SessionContext {
        let Some(cookie) = req.cookie(SESSION_COOKIE_NAME) else {
            return SessionContext::anonymous();
        };

        match self.cookie_factory.decrypt_cookie::<SessionContext>(&cookie) {
            Ok(session) if session.is_expired(self.session_duration_hours) => {
                debug!("Session cookie expired");
                SessionContext::anonymous()
            }
            Ok(session) => session,
            Err(e) => {
                debug!("Ignoring undecryptable session cookie: {e}");
                SessionContext::anonymous()
            }
        }
    }

    #[must_use]
    pub fn create_expired_session_cookie(&self) -> Cookie<'static> {
        self.cookie_factory.create_expired_cookie(SESSION_COOKIE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassificationBasis, EmploymentClassification};
    use actix_web::test::TestRequest;
    use chrono::Utc;

    fn manager() -> SessionManager {
        SessionManager::new([9u8; 32], false, 24)
    }

    #[test]
    fn test_state_cookie_is_read_back() {
        let manager = manager();
        let state = OAuthState::generate();
        let cookie = manager.create_state_cookie(&state).unwrap();
        assert_eq!(cookie.max_age(), Some(Duration::minutes(10)));

        let req = TestRequest::default().cookie(cookie).to_http_request();
        assert_eq!(manager.get_state_from_request(&req), Some(state));
    }

    #[test]
    fn test_expired_state_is_ignored() {
        let manager = manager();
        let state = OAuthState {
            state: "old".to_string(),
            created_at: Utc::now().timestamp() - 11 * 60,
        };
        let cookie = manager.create_state_cookie(&state).unwrap();

        let req = TestRequest::default().cookie(cookie).to_http_request();
        assert_eq!(manager.get_state_from_request(&req), None);
    }

    #[test]
    fn test_state_cookie_from_other_key_is_ignored() {
        let cookie = SessionManager::new([1u8; 32], false, 24)
            .create_state_cookie(&OAuthState::generate())
            .unwrap();

        let req = TestRequest::default().cookie(cookie).to_http_request();
        assert_eq!(manager().get_state_from_request(&req), None);
    }

    #[test]
    fn test_session_round_trip_through_request() {
        let manager = manager();
        let classification = EmploymentClassification {
            is_freelance: true,
            basis: ClassificationBasis::SelfEmployedEmployer,
        };
        let session = SessionContext::authenticated(&classification);
        let cookie = manager.create_session_cookie(&session).unwrap();

        let req = TestRequest::default().cookie(cookie).to_http_request();
        let read = manager.get_session_from_request(&req);
        assert!(read.is_authenticated);
        assert_eq!(read.is_freelance, Some(true));
    }

    #[test]
    fn test_missing_or_tampered_session_is_anonymous() {
        let manager = manager();

        let req = TestRequest::default().to_http_request();
        assert_eq!(manager.get_session_from_request(&req), SessionContext::anonymous());

        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE_NAME, "tampered"))
            .to_http_request();
        assert_eq!(manager.get_session_from_request(&req), SessionContext::anonymous());
    }

    #[test]
    fn test_huge_session_duration_is_clamped() {
        let manager = SessionManager::new([9u8; 32], false, u64::MAX);
        let classification = EmploymentClassification {
            is_freelance: false,
            basis: ClassificationBasis::FullTimeEmployment,
        };
        let session = SessionContext::authenticated(&classification);

        let cookie = manager.create_session_cookie(&session).unwrap();
        assert_eq!(cookie.max_age(), Some(Duration::hours(i64::MAX / 3600)));

        let req = TestRequest::default().cookie(cookie).to_http_request();
        assert_eq!(manager.get_session_from_request(&req).is_freelance, Some(false));
    }

    #[test]
    fn test_stale_session_is_anonymous() {
        let manager = SessionManager::new([9u8; 32], false, 1);
        let session = SessionContext {
            is_authenticated: true,
            is_freelance: Some(false),
            authenticated_at: Some(Utc::now() - chrono::Duration::hours(2)),
        };
        let cookie = manager.create_session_cookie(&session).unwrap();

        let req = TestRequest::default().cookie(cookie).to_http_request();
        assert_eq!(manager.get_session_from_request(&req), SessionContext::anonymous());
    }
}
