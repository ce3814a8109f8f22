// Centralized logging for the LinkedIn sign-in flow
use log::{debug, error, info, warn};

use crate::models::{ClassificationBasis, EmploymentClassification};
use crate::oauth::AuthError;

pub struct LoggingHelper;

impl LoggingHelper {
    /// Log LinkedIn client configuration status at startup
    pub fn log_linkedin_init(configured: bool, redirect_uri: &str) {
        if configured {
            info!("✅ LinkedIn OAuth2 configured (redirect: {redirect_uri})");
        } else {
            info!("❌ LinkedIn OAuth2 not configured - missing client id or secret");
        }
    }

    /// Log the redirect to the LinkedIn authorization page
    pub fn log_sign_in_redirect(scope: &str) {
        info!("🔐 Redirecting to LinkedIn sign-in with scope: {scope}");
    }

    /// Log token exchange start
    pub fn log_token_exchange_start(token_endpoint: &str) {
        info!("🔄 Exchanging authorization code for an access token at {token_endpoint}");
    }

    /// Log token exchange summary; the token itself is reduced to its length
    pub fn log_token_exchange_summary(
        status: u16,
        access_token: Option<&str>,
        expires_in: Option<u64>,
    ) {
        info!(
            "🔍 Token exchange summary: status={status}, access_token={}, expires_in={expires_in:?}",
            access_token.map_or_else(
                || "missing".to_string(),
                |token| format!("present ({} chars)", token.len())
            ),
        );
    }

    /// Log a successful profile fetch
    pub fn log_profile_fetched(member_id: Option<&str>, position_count: usize) {
        debug!(
            "Fetched LinkedIn profile {} with {position_count} position(s)",
            member_id.unwrap_or("<unknown>")
        );
    }

    /// Log the classification outcome together with the rule that decided it
    pub fn log_classification(classification: &EmploymentClassification) {
        let reason = match classification.basis {
            ClassificationBasis::NoPosition => "no position on profile".to_string(),
            ClassificationBasis::TitleKeyword(keyword) => format!("title contains '{keyword}'"),
            ClassificationBasis::SelfEmployedEmployer => "employer is self-employed".to_string(),
            ClassificationBasis::FullTimeEmployment => "full-time employment".to_string(),
            ClassificationBasis::NoFreelanceIndicator => "no freelance indicator".to_string(),
        };
        info!(
            "🎯 Classified LinkedIn user: freelance={} ({reason})",
            classification.is_freelance
        );
    }

    /// Log a failed callback; user-caused outcomes are warnings
    pub fn log_callback_failure(err: &AuthError) {
        match err {
            AuthError::ProviderDenied { .. } | AuthError::MissingCode | AuthError::InvalidState(_) => {
                warn!("LinkedIn callback rejected [{}]: {err}", err.kind());
            }
            _ => error!("LinkedIn callback failed [{}]: {err}", err.kind()),
        }
    }

    /// Log sign-out
    pub fn log_sign_out(was_authenticated: bool) {
        info!("👋 Sign-out requested (authenticated: {was_authenticated})");
    }
}
