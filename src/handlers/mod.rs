// HTTP request handlers for the LinkedIn sign-in service
pub mod auth;
pub mod callback;
pub mod health;
pub mod session;

// Re-export the main handler functions
pub use auth::{linkedin_sign_in, linkedin_sign_out};
pub use callback::linkedin_callback;
pub use health::health;
pub use session::session_info;

use actix_web::web;

/// Register every route of the service
pub fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg
        // LinkedIn endpoints
        .route("/auth/linkedin/sign_in", web::get().to(linkedin_sign_in))
        .route("/auth/linkedin/callback", web::get().to(linkedin_callback))
        .route("/auth/linkedin/sign_out", web::get().to(linkedin_sign_out))
        .route("/auth/linkedin/sign_out", web::post().to(linkedin_sign_out))
        // Frontend session API
        .route("/api/session", web::get().to(session_info))
        // Health endpoint
        .route("/ping", web::get().to(health));
}
