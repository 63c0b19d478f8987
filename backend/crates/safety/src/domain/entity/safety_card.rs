//! Safety Card Entity
//!
//! A submitted safety observation. Immutable once stored.

use chrono::{DateTime, Utc};
use kernel::id::{SafetyCardId, UserId};

use crate::domain::entity::required;
use crate::error::SafetyResult;

/// Validated fields of a new report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    pub category: String,
    pub location: String,
    pub description: String,
}

impl ReportDraft {
    /// All three fields are required and trimmed
    pub fn new(category: &str, location: &str, description: &str) -> SafetyResult<Self> {
        Ok(Self {
            category: required("category", category)?,
            location: required("location", location)?,
            description: required("description", description)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyCard {
    pub id: SafetyCardId,
    pub category: String,
    pub location: String,
    pub description: String,
    pub submitted_by: UserId,
    pub submitter_email: String,
    pub submitted_at: DateTime<Utc>,
}

impl SafetyCard {
    pub fn new(draft: ReportDraft, submitted_by: UserId, submitter_email: impl Into<String>) -> Self {
        Self {
            id: SafetyCardId::new(),
            category: draft.category,
            location: draft.location,
            description: draft.description,
            submitted_by,
            submitter_email: submitter_email.into(),
            submitted_at: Utc::now(),
        }
    }
}
