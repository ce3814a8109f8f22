// HTTP response helpers: frontend redirects and the JSON 400 for a callback without a code

use actix_web::{cookie::Cookie, http::header, HttpResponse};
use serde_json::json;

/// Unified response builder
pub struct ResponseBuilder;

impl ResponseBuilder {
    /// Create a redirect response (302 Found)
    #[must_use]
    pub fn redirect(location: &str) -> RedirectBuilder {
        RedirectBuilder::new(location)
    }

    /// `400 Bad Request` with a `{"error": message}` body
    #[must_use]
    pub fn bad_request(message: &str) -> HttpResponse {
        HttpResponse::BadRequest().json(json!({ "error": message }))
    }

    /// Frontend location reporting a successful sign-in
    #[must_use]
    pub fn success_location(frontend_root: &str, is_freelance: bool) -> String {
        append_query(frontend_root, &format!("auth=success&isFreelance={is_freelance}"))
    }

    /// Frontend location reporting a failed sign-in with a user-facing message
    #[must_use]
    pub fn error_location(frontend_root: &str, message: &str) -> String {
        append_query(
            frontend_root,
            &format!("auth=error&message={}", urlencoding::encode(message)),
        )
    }
}

fn append_query(location: &str, query: &str) -> String {
    if location.contains('?') {
        format!("{location}&{query}")
    } else {
        format!("{location}?{query}")
    }
}

/// Builder for redirect responses
pub struct RedirectBuilder {
    location: String,
    cookies: Vec<Cookie<'static>>,
}

impl RedirectBuilder {
    fn new(location: &str) -> Self {
        Self {
            location: location.to_string(),
            cookies: Vec::new(),
        }
    }

    /// Add a cookie to the redirect response
    #[must_use]
    pub fn with_cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Add multiple cookies to the redirect response
    #[must_use]
    pub fn with_cookies(mut self, mut cookies: Vec<Cookie<'static>>) -> Self {
        self.cookies.append(&mut cookies);
        self
    }

    /// Build the redirect response
    #[must_use]
    pub fn build(self) -> HttpResponse {
        let mut builder = HttpResponse::Found();
        builder.insert_header((header::LOCATION, self.location));
        for cookie in self.cookies {
            builder.cookie(cookie);
        }
        builder.finish()
    }
}
