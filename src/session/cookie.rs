//! Encrypted cookie creation and cookie names

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};

use crate::utils::crypto::{decrypt_data, encrypt_data};

/// Encrypted session context cookie
pub const SESSION_COOKIE_NAME: &str = "tjm_session";
/// Encrypted OAuth state cookie, lives only between sign-in and callback
pub const OAUTH_STATE_COOKIE: &str = "tjm_oauth_state";

/// Lifetime of the OAuth state cookie in minutes
pub const OAUTH_STATE_TTL_MINUTES: i64 = 10;

/// Options for cookie creation
pub struct CookieOptions {
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age: Duration,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age: Duration::hours(24),
        }
    }
}

/// Creates and reads AES-256-GCM encrypted cookies
#[derive(Clone)]
pub struct CookieFactory {
    encryption_key: [u8; 32],
    cookie_secure: bool,
}

impl CookieFactory {
    #[must_use]
    pub fn new(encryption_key: [u8; 32], cookie_secure: bool) -> Self {
        Self {
            encryption_key,
            cookie_secure,
        }
    }

    /// Create a cookie whose value is the encrypted JSON of `data`
    ///
    /// # Errors
    ///
    /// Returns an error if encryption fails
    pub fn create_cookie<T: Serialize>(
        &self,
        name: &str,
        data: &T,
        options: CookieOptions,
    ) -> Result<Cookie<'static>> {
        let value = encrypt_data(data, &self.encryption_key)?;

        Ok(Cookie::build(name.to_owned(), value)
            .http_only(options.http_only)
            .secure(self.cookie_secure)
            .same_site(options.same_site)
            .path(options.path)
            .max_age(options.max_age)
            .finish())
    }

    /// Decrypt a cookie value created by [`Self::create_cookie`]
    ///
    /// # Errors
    ///
    /// Returns an error if the value was not produced with this factory's key
    pub fn decrypt_cookie<T: DeserializeOwned>(&self, cookie: &Cookie<'_>) -> Result<T> {
        decrypt_data(cookie.value(), &self.encryption_key)
    }

    /// Cookie that instructs the browser to drop `name`
    #[must_use]
    pub fn create_expired_cookie(&self, name: &str) -> Cookie<'static> {
        Cookie::build(name.to_owned(), "")
            .path("/")
            .http_only(true)
            .secure(self.cookie_secure)
            .same_site(SameSite::Lax)
            .max_age(Duration::ZERO)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionContext;

    fn factory() -> CookieFactory {
        CookieFactory::new([42u8; 32], true)
    }

    #[test]
    fn test_cookie_flags() {
        let cookie = factory()
            .create_cookie(SESSION_COOKIE_NAME, &SessionContext::anonymous(), CookieOptions::default())
            .unwrap();

        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert!(!cookie.value().contains("isAuthenticated"));
    }

    #[test]
    fn test_cookie_value_decrypts() {
        let factory = factory();
        let session = SessionContext {
            is_authenticated: true,
            is_freelance: Some(false),
            authenticated_at: None,
        };
        let cookie = factory
            .create_cookie(SESSION_COOKIE_NAME, &session, CookieOptions::default())
            .unwrap();

        let decrypted: SessionContext = factory.decrypt_cookie(&cookie).unwrap();
        assert_eq!(decrypted, session);

        let other = CookieFactory::new([1u8; 32], true);
        assert!(other.decrypt_cookie::<SessionContext>(&cookie).is_err());
    }

    #[test]
    fn test_expired_cookie() {
        let cookie = CookieFactory::new([0u8; 32], false).create_expired_cookie(OAUTH_STATE_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
