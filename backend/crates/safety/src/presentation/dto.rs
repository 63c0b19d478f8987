//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{hazard::Hazard, safety_card::SafetyCard};

// ============================================================================
// Reports
// ============================================================================

/// Report form; missing fields arrive empty and fail validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitReportForm {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyCardResponse {
    pub id: String,
    pub category: String,
    pub location: String,
    pub description: String,
    pub submitted_by: String,
    pub submitter_email: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<SafetyCard> for SafetyCardResponse {
    fn from(card: SafetyCard) -> Self {
        Self {
            id: card.id.to_string(),
            category: card.category,
            location: card.location,
            description: card.description,
            submitted_by: card.submitted_by.to_string(),
            submitter_email: card.submitter_email,
            submitted_at: card.submitted_at,
        }
    }
}

// ============================================================================
// Radar
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct LocalHazardsQuery {
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateHazardRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub reported_by: String,
    pub active: bool,
    pub reported_at: DateTime<Utc>,
    pub deactivated_at: Option<DateTime<Utc>>,
}

impl From<Hazard> for HazardResponse {
    fn from(hazard: Hazard) -> Self {
        Self {
            id: hazard.id.to_string(),
            title: hazard.title,
            description: hazard.description,
            location: hazard.location,
            reported_by: hazard.reported_by.to_string(),
            active: hazard.active,
            reported_at: hazard.reported_at,
            deactivated_at: hazard.deactivated_at,
        }
    }
}
