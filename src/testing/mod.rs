//! Test helpers shared by unit tests and the `tests/` integration suite
//!
//! - [`fixtures`] - settings and session managers wired for tests
//! - [`mock`] - callback builders and a scripted identity provider
//!
//! Compiled for `cargo test` and behind the `testing` feature.

pub mod fixtures;
pub mod mock;

pub use fixtures::TestFixtures;
pub use mock::{MockOAuthCallback, ScriptedIdentityProvider};

/// Common test constants
pub mod constants {
    /// Session secret used by every fixture
    pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-tjm-explorer";

    /// LinkedIn app credentials used by every fixture
    pub const TEST_CLIENT_ID: &str = "test-linkedin-client";
    pub const TEST_CLIENT_SECRET: &str = "test-linkedin-secret";

    /// Redirect target registered for the test app
    pub const TEST_REDIRECT_URI: &str = "http://localhost:8080/auth/linkedin/callback";

    /// Access token handed out by fake token endpoints
    pub const TEST_ACCESS_TOKEN: &str = "AQX-test-access-token-value";
}
