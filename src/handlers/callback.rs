// LinkedIn callback handler
use actix_web::{web, HttpRequest, HttpResponse, Result};
use log::{debug, error};

use crate::models::SessionContext;
use crate::oauth::{AuthError, CallbackProcessor, OAuthCallback, ProviderHandle};
use crate::session::SessionManager;
use crate::settings::TjmSettings;
use crate::utils::logging::LoggingHelper;
use crate::utils::responses::ResponseBuilder;

/// Handle the redirect back from LinkedIn
///
/// Success stores the classification in the session cookie and redirects to
/// `{frontend_root}?auth=success&isFreelance=..`. A callback without a code is
/// answered with `400`; every other failure redirects with `auth=error`.
///
/// # Errors
///
/// Never fails; every outcome is a response
pub async fn linkedin_callback(
    query: web::Query<OAuthCallback>,
    req: HttpRequest,
    settings: web::Data<TjmSettings>,
    session_manager: web::Data<SessionManager>,
    provider: web::Data<ProviderHandle>,
) -> Result<HttpResponse> {
    let callback = query.into_inner();
    debug!(
        "LinkedIn callback received: code={}, state={}, error={:?}",
        callback.code.is_some(),
        callback.state.is_some(),
        callback.error
    );

    let stored_state = session_manager.get_state_from_request(&req);
    let outcome = CallbackProcessor::new(provider.get_ref())
        .process(&callback, stored_state.as_ref())
        .await;

    let frontend_root = &settings.application.frontend_root;
    let clear_state = session_manager.create_expired_state_cookie();

    match outcome {
        Ok(classification) => {
            let session = SessionContext::authenticated(&classification);
            match session_manager.create_session_cookie(&session) {
                Ok(session_cookie) => Ok(ResponseBuilder::redirect(
                    &ResponseBuilder::success_location(frontend_root, classification.is_freelance),
                )
                .with_cookies(vec![session_cookie, clear_state])
                .build()),
                Err(e) => {
                    error!("Failed to create session cookie: {e}");
                    Ok(ResponseBuilder::redirect(&ResponseBuilder::error_location(
                        frontend_root,
                        "Failed to create session",
                    ))
                    .with_cookie(clear_state)
                    .build())
                }
            }
        }
        Err(err @ AuthError::MissingCode) => {
            LoggingHelper::log_callback_failure(&err);
            Ok(ResponseBuilder::bad_request(err.user_message()))
        }
        Err(err) => {
            LoggingHelper::log_callback_failure(&err);
            Ok(ResponseBuilder::redirect(&ResponseBuilder::error_location(
                frontend_root,
                err.user_message(),
            ))
            .with_cookie(clear_state)
            .build())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfilePosition;
    use crate::session::{OAUTH_STATE_COOKIE, SESSION_COOKIE_NAME};
    use crate::testing::{ScriptedIdentityProvider, TestFixtures};
    use actix_web::http::{header, StatusCode};
    use actix_web::test::TestRequest;
    use std::sync::Arc;

    async fn call(
        uri: &str,
        state_cookie: Option<&str>,
        provider: Arc<ScriptedIdentityProvider>,
    ) -> HttpResponse {
        let mut request = TestRequest::get().uri(uri);
        if let Some(state) = state_cookie {
            request = request.cookie(TestFixtures::state_cookie(state));
        }
        let req = request.to_http_request();
        let query = web::Query::<OAuthCallback>::from_query(req.query_string()).unwrap();

        linkedin_callback(
            query,
            req,
            web::Data::new(TestFixtures::settings()),
            web::Data::new(TestFixtures::session_manager()),
            web::Data::new(ProviderHandle::new(provider)),
        )
        .await
        .unwrap()
    }

    fn location(response: &HttpResponse) -> &str {
        response.headers().get(header::LOCATION).unwrap().to_str().unwrap()
    }

    #[actix_web::test]
    async fn test_success_sets_session_cookie() {
        let provider = Arc::new(ScriptedIdentityProvider::with_positions(vec![
            ProfilePosition::new("Independent Consultant", "Self-Employed", "Self-employed"),
        ]));

        let response = call(
            "/auth/linkedin/callback?code=abc&state=s1",
            Some("s1"),
            provider.clone(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/?auth=success&isFreelance=true");

        let session_cookie = response
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE_NAME)
            .unwrap()
            .into_owned();
        let req = TestRequest::default().cookie(session_cookie).to_http_request();
        let session = TestFixtures::session_manager().get_session_from_request(&req);
        assert!(session.is_authenticated);
        assert_eq!(session.is_freelance, Some(true));
        assert_eq!(provider.exchange_calls(), 1);
    }

    #[actix_web::test]
    async fn test_provider_error_redirects_with_description() {
        let provider = Arc::new(ScriptedIdentityProvider::with_positions(vec![]));

        let response = call(
            "/auth/linkedin/callback?error=user_cancelled_authorize&error_description=The%20user%20cancelled%20the%20authorization",
            None,
            provider.clone(),
        )
        .await;

        assert_eq!(
            location(&response),
            "/?auth=error&message=The%20user%20cancelled%20the%20authorization"
        );
        assert!(response.cookies().any(|c| c.name() == OAUTH_STATE_COOKIE));
        assert_eq!(provider.exchange_calls(), 0);
    }

    #[actix_web::test]
    async fn test_missing_code_is_bad_request() {
        let provider = Arc::new(ScriptedIdentityProvider::with_positions(vec![]));

        let response = call("/auth/linkedin/callback", Some("s1"), provider.clone()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&body[..], br#"{"error":"No code provided"}"#);
        assert_eq!(provider.exchange_calls(), 0);
    }

    #[actix_web::test]
    async fn test_state_mismatch_redirects_without_network_call() {
        let provider = Arc::new(ScriptedIdentityProvider::with_positions(vec![]));

        let response = call(
            "/auth/linkedin/callback?code=abc&state=forged",
            Some("real"),
            provider.clone(),
        )
        .await;

        assert!(location(&response).starts_with("/?auth=error&message=Invalid%20authentication%20state"));
        assert!(response.cookies().all(|c| c.name() != SESSION_COOKIE_NAME));
        assert_eq!(provider.exchange_calls(), 0);
    }

    #[actix_web::test]
    async fn test_profile_failure_redirects_with_generic_message() {
        let provider = Arc::new(ScriptedIdentityProvider::failing_profile(
            AuthError::ProfileFetchFailed("status 500".to_string()),
        ));

        let response = call(
            "/auth/linkedin/callback?code=abc&state=s1",
            Some("s1"),
            provider,
        )
        .await;

        assert_eq!(
            location(&response),
            "/?auth=error&message=Failed%20to%20process%20LinkedIn%20data"
        );
    }
}
