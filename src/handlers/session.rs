// Session context for the explorer frontend
use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::models::SessionResponse;
use crate::session::SessionManager;
use crate::settings::TjmSettings;

/// Current session context plus the configured explorer view
///
/// # Errors
///
/// Never fails; a missing or unreadable session cookie yields an anonymous context
pub async fn session_info(
    req: HttpRequest,
    settings: web::Data<TjmSettings>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    let response = SessionResponse {
        session: session_manager.get_session_from_request(&req),
        view: &settings.view,
    };
    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "no-store"))
        .json(response))
}
