//! Freelance detection over LinkedIn positions
//!
//! Only the first position returned by the provider is inspected. LinkedIn does
//! not document the ordering of `positions.elements`, so "first" is treated as
//! "most recent" without any sorting.

use crate::models::{ClassificationBasis, EmploymentClassification, ProfilePosition};

/// Lower-case title fragments that mark a position as freelance
pub const FREELANCE_TITLE_KEYWORDS: &[&str] = &["freelance", "self-employed", "consultant"];

/// Lower-case employer name used by LinkedIn for self-employment
pub const SELF_EMPLOYED_EMPLOYER: &str = "self-employed";

/// Employment-type label for permanent full-time positions
pub const FULL_TIME_LABEL: &str = "Full-time";

/// Classify the first position of a provider response
#[must_use]
pub fn classify_positions(positions: &[ProfilePosition]) -> EmploymentClassification {
    classify_position(positions.first())
}

/// Classify a single position; `None` means the profile has no position
#[must_use]
pub fn classify_position(position: Option<&ProfilePosition>) -> EmploymentClassification {
    let Some(position) = position else {
        return EmploymentClassification {
            is_freelance: false,
            basis: ClassificationBasis::NoPosition,
        };
    };

    let title = position.title.as_deref().unwrap_or_default().to_lowercase();
    let company_name = position.company_name().unwrap_or_default().to_lowercase();

    let basis = if let Some(keyword) = FREELANCE_TITLE_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| title.contains(keyword))
    {
        ClassificationBasis::TitleKeyword(keyword)
    } else if company_name == SELF_EMPLOYED_EMPLOYER {
        ClassificationBasis::SelfEmployedEmployer
    } else if position.employment_type.as_deref() == Some(FULL_TIME_LABEL) {
        // Full-time only ever confirms the default, it never overrides a match
        ClassificationBasis::FullTimeEmployment
    } else {
        ClassificationBasis::NoFreelanceIndicator
    };

    EmploymentClassification {
        is_freelance: matches!(
            basis,
            ClassificationBasis::TitleKeyword(_) | ClassificationBasis::SelfEmployedEmployer
        ),
        basis,
    }
}
