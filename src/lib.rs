#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the TJM Explorer service
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod classification;
pub mod handlers;
pub mod models;
pub mod oauth;
pub mod session;
pub mod settings;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use classification::classify_positions;
pub use handlers::{
    configure_services, health, linkedin_callback, linkedin_sign_in, linkedin_sign_out,
    session_info,
};
pub use models::{EmploymentClassification, SessionContext};
pub use oauth::{AuthError, ProviderHandle};
pub use session::SessionManager;
pub use settings::TjmSettings;
