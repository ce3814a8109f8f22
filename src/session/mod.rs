//! Cookie-backed session handling
//!
//! - [`cookie`] - encrypted cookie creation and cookie names
//! - [`manager`] - OAuth state and session context read/write

pub mod cookie;
pub mod manager;

pub use cookie::{CookieFactory, CookieOptions, OAUTH_STATE_COOKIE, SESSION_COOKIE_NAME};
pub use manager::SessionManager;
