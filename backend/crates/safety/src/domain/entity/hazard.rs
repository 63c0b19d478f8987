//! Hazard Entity
//!
//! An entry on the hazard radar. Stays visible until deactivated.

use chrono::{DateTime, Utc};
use kernel::id::{HazardId, UserId};

use crate::domain::entity::required;
use crate::error::SafetyResult;

/// Validated fields of a new hazard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HazardDraft {
    pub title: String,
    pub description: String,
    pub location: String,
}

impl HazardDraft {
    /// Title and location are required; description may be empty
    pub fn new(title: &str, description: &str, location: &str) -> SafetyResult<Self> {
        Ok(Self {
            title: required("title", title)?,
            description: description.trim().to_string(),
            location: required("location", location)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hazard {
    pub id: HazardId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub reported_by: UserId,
    pub active: bool,
    pub reported_at: DateTime<Utc>,
    pub deactivated_at: Option<DateTime<Utc>>,
}

impl Hazard {
    pub fn new(draft: HazardDraft, reported_by: UserId) -> Self {
        Self {
            id: HazardId::new(),
            title: draft.title,
            description: draft.description,
            location: draft.location,
            reported_by,
            active: true,
            reported_at: Utc::now(),
            deactivated_at: None,
        }
    }

    /// Take the hazard off the radar
    ///
    /// Deactivating twice keeps the first timestamp.
    pub fn deactivate(&mut self) {
        if self.active {
            self.active = false;
            self.deactivated_at = Some(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_hazard_is_active() {
        let draft = HazardDraft::new("Loose cable", "", "Bay 2").unwrap();
        let hazard = Hazard::new(draft, UserId::new());
        assert!(hazard.active);
        assert!(hazard.deactivated_at.is_none());
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let mut hazard = Hazard::new(HazardDraft::new("Spill", "oil", "Bay 2").unwrap(), UserId::new());
        hazard.deactivate();
        let first = hazard.deactivated_at;
        assert!(!hazard.active);
        assert!(first.is_some());

        hazard.deactivate();
        assert_eq!(hazard.deactivated_at, first);
    }

    #[test]
    fn test_draft_requires_title_and_location() {
        assert!(HazardDraft::new("", "x", "Bay 2").is_err());
        assert!(HazardDraft::new("Spill", "x", " ").is_err());
    }
}
