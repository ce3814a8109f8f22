//! Authorization request sent to LinkedIn when the user clicks "sign in"

use log::info;
use url::Url;

use super::error::AuthError;
use crate::settings::LinkedInSettings;

/// Parameters of one authorization redirect
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub state: String,
}

impl AuthorizationRequest {
    pub const RESPONSE_TYPE: &'static str = "code";

    /// Build the request from configuration and a freshly generated state
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if no client id is configured
    pub fn from_settings(settings: &LinkedInSettings, state: &str) -> Result<Self, AuthError> {
        let client_id = settings.get_client_id().ok_or_else(|| {
            AuthError::Configuration("LinkedIn client_id is not configured".to_string())
        })?;

        Ok(Self {
            client_id,
            redirect_uri: settings.redirect_uri.clone(),
            scope: settings.scope.clone(),
            state: state.to_string(),
        })
    }

    /// Full authorization URL with every parameter form-encoded
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if `authorization_endpoint` is not a valid URL
    pub fn to_url(&self, authorization_endpoint: &str) -> Result<String, AuthError> {
        let mut url = Url::parse(authorization_endpoint).map_err(|e| {
            AuthError::Configuration(format!(
                "Invalid authorization endpoint {authorization_endpoint}: {e}"
            ))
        })?;

        url.query_pairs_mut()
            .append_pair("response_type", Self::RESPONSE_TYPE)
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &self.scope)
            .append_pair("state", &self.state);

        info!("🔍 Built LinkedIn authorization URL with scope: {}", self.scope);
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> LinkedInSettings {
        LinkedInSettings {
            client_id: Some("774ckgbyn2k9kq".to_string()),
            client_id_env: None,
            redirect_uri: "https://tjm.example.com/auth/linkedin/callback".to_string(),
            scope: "r_liteprofile r_basicprofile".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_authorization_url_parameters() {
        let settings = settings();
        let request = AuthorizationRequest::from_settings(&settings, "csrf-123").unwrap();
        let url = request.to_url(&settings.authorization_endpoint).unwrap();

        assert!(url.starts_with("https://www.linkedin.com/oauth/v2/authorization?"));

        let parsed = Url::parse(&url).unwrap();
        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("response_type".to_string(), "code".to_string()),
                ("client_id".to_string(), "774ckgbyn2k9kq".to_string()),
                (
                    "redirect_uri".to_string(),
                    "https://tjm.example.com/auth/linkedin/callback".to_string()
                ),
                ("scope".to_string(), "r_liteprofile r_basicprofile".to_string()),
                ("state".to_string(), "csrf-123".to_string()),
            ]
        );
    }

    #[test]
    fn test_redirect_uri_is_encoded() {
        let settings = settings();
        let url = AuthorizationRequest::from_settings(&settings, "s")
            .unwrap()
            .to_url(&settings.authorization_endpoint)
            .unwrap();

        assert!(url.contains("redirect_uri=https%3A%2F%2Ftjm.example.com%2Fauth%2Flinkedin%2Fcallback"));
        assert!(!url.contains("client_secret"));
    }

    #[test]
    fn test_missing_client_id_is_configuration_error() {
        let settings = LinkedInSettings {
            client_id: None,
            client_id_env: None,
            ..Default::default()
        };
        let result = AuthorizationRequest::from_settings(&settings, "s");
        assert!(matches!(result, Err(AuthError::Configuration(_))));
    }

    #[test]
    fn test_invalid_endpoint() {
        let request = AuthorizationRequest::from_settings(&settings(), "s").unwrap();
        assert!(matches!(
            request.to_url("not a url"),
            Err(AuthError::Configuration(_))
        ));
    }
}
