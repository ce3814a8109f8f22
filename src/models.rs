use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::settings::ViewSettings;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Employer reference attached to a LinkedIn position
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionCompany {
    pub name: Option<String>,
}

/// One employment entry from the LinkedIn `positions.elements` array
///
/// Every field is optional on the wire; missing values classify as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePosition {
    pub title: Option<String>,
    pub company: Option<PositionCompany>,
    pub employment_type: Option<String>,
}

impl ProfilePosition {
    /// Build a position from plain values
    #[must_use]
    pub fn new(title: &str, company: &str, employment_type: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            company: Some(PositionCompany {
                name: Some(company.to_string()),
            }),
            employment_type: Some(employment_type.to_string()),
        }
    }

    /// Employer name, if the provider returned one
    #[must_use]
    pub fn company_name(&self) -> Option<&str> {
        self.company.as_ref().and_then(|c| c.name.as_deref())
    }
}

/// Which rule decided the classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationBasis {
    /// The provider returned no position at all
    NoPosition,
    /// The title contains one of the freelance keywords
    TitleKeyword(&'static str),
    /// The employer is literally "self-employed"
    SelfEmployedEmployer,
    /// Full-time employment with no freelance indicator
    FullTimeEmployment,
    /// A position exists but nothing marks it as freelance
    NoFreelanceIndicator,
}

/// Result of inspecting the most recent position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentClassification {
    pub is_freelance: bool,
    #[serde(skip)]
    pub basis: ClassificationBasis,
}

/// Per-browser session state handed to the presentation layer
///
/// `is_freelance` is `None` until a LinkedIn callback has classified the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub is_authenticated: bool,
    pub is_freelance: Option<bool>,
    pub authenticated_at: Option<DateTime<Utc>>,
}

impl SessionContext {
    /// Context for a visitor that has not signed in
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context recorded after a successful LinkedIn callback
    #[must_use]
    pub fn authenticated(classification: &EmploymentClassification) -> Self {
        Self {
            is_authenticated: true,
            is_freelance: Some(classification.is_freelance),
            authenticated_at: Some(Utc::now()),
        }
    }

    /// Whether the session is older than `duration_hours`
    #[must_use]
    pub fn is_expired(&self, duration_hours: u64) -> bool {
        let Some(authenticated_at) = self.authenticated_at else {
            return false;
        };
        let hours = i64::try_from(duration_hours).unwrap_or(i64::MAX);
        chrono::Duration::try_hours(hours)
            .and_then(|max_age| authenticated_at.checked_add_signed(max_age))
            .is_some_and(|expires_at| Utc::now() > expires_at)
    }
}

/// Body of `GET /api/session`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse<'a> {
    #[serde(flatten)]
    pub session: SessionContext,
    pub view: &'a ViewSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_deserializes_linkedin_shape() {
        let json = r#"{
            "title": "Freelance Backend Developer",
            "company": { "name": "Acme" },
            "employmentType": "Contract"
        }"#;

        let position: ProfilePosition = serde_json::from_str(json).unwrap();
        assert_eq!(position, ProfilePosition::new("Freelance Backend Developer", "Acme", "Contract"));
        assert_eq!(position.company_name(), Some("Acme"));
    }

    #[test]
    fn test_position_tolerates_missing_fields() {
        let position: ProfilePosition = serde_json::from_str("{}").unwrap();
        assert!(position.title.is_none());
        assert!(position.company_name().is_none());
    }

    #[test]
    fn test_anonymous_session_serializes_unknown_classification() {
        let value = serde_json::to_value(SessionContext::anonymous()).unwrap();
        assert_eq!(value["isAuthenticated"], false);
        assert!(value["isFreelance"].is_null());
    }

    #[test]
    fn test_session_expiry() {
        let mut session = SessionContext {
            is_authenticated: true,
            is_freelance: Some(true),
            authenticated_at: Some(Utc::now() - chrono::Duration::hours(5)),
        };
        assert!(session.is_expired(4));
        assert!(!session.is_expired(6));

        session.authenticated_at = None;
        assert!(!session.is_expired(0));
    }
}
