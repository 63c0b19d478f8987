//! Hazard Radar Use Cases

use std::sync::Arc;

use kernel::id::{HazardId, UserId};

use crate::domain::entity::hazard::{Hazard, HazardDraft};
use crate::domain::repository::HazardRepository;
use crate::error::{SafetyError, SafetyResult};

/// Create hazard input
pub struct CreateHazardInput {
    pub title: String,
    pub description: String,
    pub location: String,
}

pub struct RadarUseCase<H>
where
    H: HazardRepository,
{
    repo: Arc<H>,
}

impl<H> RadarUseCase<H>
where
    H: HazardRepository,
{
    pub fn new(repo: Arc<H>) -> Self {
        Self { repo }
    }

    /// Hazards currently on the radar, newest first
    pub async fn active(&self) -> SafetyResult<Vec<Hazard>> {
        self.repo.find_active(None).await
    }

    /// Active hazards at exactly `location`
    pub async fn local(&self, location: Option<&str>) -> SafetyResult<Vec<Hazard>> {
        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| SafetyError::Validation("location is required".to_string()))?;

        self.repo.find_active(Some(location)).await
    }

    pub async fn create(&self, input: CreateHazardInput, reporter: UserId) -> SafetyResult<Hazard> {
        let draft = HazardDraft::new(&input.title, &input.description, &input.location)?;
        let hazard = Hazard::new(draft, reporter);

        self.repo.create(&hazard).await?;

        tracing::info!(
            hazard_id = %hazard.id,
            location = %hazard.location,
            "Hazard reported"
        );

        Ok(hazard)
    }

    pub async fn deactivate(&self, id: &str) -> SafetyResult<Hazard> {
        let id = HazardId::parse_str(id).map_err(|_| SafetyError::NotFound("Hazard"))?;

        let mut hazard = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or(SafetyError::NotFound("Hazard"))?;

        hazard.deactivate();

        if !self.repo.update(&hazard).await? {
            // Deleted between the read and the write
            return Err(SafetyError::NotFound("Hazard"));
        }

        tracing::info!(hazard_id = %hazard.id, "Hazard deactivated");

        Ok(hazard)
    }
}
