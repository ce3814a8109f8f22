// LinkedIn sign-in and sign-out handlers
use actix_web::{web, HttpRequest, HttpResponse, Result};
use log::error;

use crate::oauth::{AuthError, AuthorizationRequest, OAuthState};
use crate::session::SessionManager;
use crate::settings::TjmSettings;
use crate::utils::logging::LoggingHelper;
use crate::utils::responses::ResponseBuilder;

/// Redirect the browser to the LinkedIn authorization page
///
/// Stores a fresh state in the state cookie and clears any previous session.
///
/// # Errors
///
/// Never fails; configuration problems become an error redirect to the frontend
pub async fn linkedin_sign_in(
    settings: web::Data<TjmSettings>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    let clear_session = session_manager.create_expired_session_cookie();

    if !settings.linkedin.is_configured() {
        let err = AuthError::Configuration("LinkedIn client id or secret missing".to_string());
        LoggingHelper::log_callback_failure(&err);
        return Ok(sign_in_error(&settings, &err, clear_session));
    }

    let oauth_state = OAuthState::generate();
    let auth_url = match AuthorizationRequest::from_settings(&settings.linkedin, &oauth_state.state)
        .and_then(|request| request.to_url(&settings.linkedin.authorization_endpoint))
    {
        Ok(url) => url,
        Err(err) => {
            LoggingHelper::log_callback_failure(&err);
            return Ok(sign_in_error(&settings, &err, clear_session));
        }
    };

    let state_cookie = match session_manager.create_state_cookie(&oauth_state) {
        Ok(cookie) => cookie,
        Err(e) => {
            error!("Failed to create OAuth state cookie: {e}");
            let err = AuthError::Configuration(format!("state cookie encryption failed: {e}"));
            return Ok(sign_in_error(&settings, &err, clear_session));
        }
    };

    LoggingHelper::log_sign_in_redirect(&settings.linkedin.scope);
    Ok(ResponseBuilder::redirect(&auth_url)
        .with_cookie(state_cookie)
        .with_cookie(clear_session)
        .build())
}

fn sign_in_error(
    settings: &TjmSettings,
    err: &AuthError,
    clear_session: actix_web::cookie::Cookie<'static>,
) -> HttpResponse {
    let location =
        ResponseBuilder::error_location(&settings.application.frontend_root, err.user_message());
    ResponseBuilder::redirect(&location)
        .with_cookie(clear_session)
        .build()
}

/// Clear the session context and return to the frontend
///
/// # Errors
///
/// Never fails
pub async fn linkedin_sign_out(
    req: HttpRequest,
    settings: web::Data<TjmSettings>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    let session = session_manager.get_session_from_request(&req);
    LoggingHelper::log_sign_out(session.is_authenticated);

    Ok(ResponseBuilder::redirect(&settings.application.frontend_root)
        .with_cookies(vec![
            session_manager.create_expired_session_cookie(),
            session_manager.create_expired_state_cookie(),
        ])
        .build())
}
