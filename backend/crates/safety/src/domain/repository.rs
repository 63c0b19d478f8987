//! Repository Traits

use kernel::id::{HazardId, SafetyCardId};

use crate::domain::entity::{hazard::Hazard, safety_card::SafetyCard};
use crate::error::SafetyResult;

/// Safety card repository trait
#[trait_variant::make(SafetyCardRepository: Send)]
pub trait LocalSafetyCardRepository {
    async fn create(&self, card: &SafetyCard) -> SafetyResult<()>;

    async fn find_by_id(&self, id: &SafetyCardId) -> SafetyResult<Option<SafetyCard>>;

    /// All cards, newest first
    async fn list(&self) -> SafetyResult<Vec<SafetyCard>>;
}

/// Hazard repository trait
#[trait_variant::make(HazardRepository: Send)]
pub trait LocalHazardRepository {
    async fn create(&self, hazard: &Hazard) -> SafetyResult<()>;

    async fn find_by_id(&self, id: &HazardId) -> SafetyResult<Option<Hazard>>;

    /// Active hazards, newest first, optionally at one location
    async fn find_active(&self, location: Option<&str>) -> SafetyResult<Vec<Hazard>>;

    /// Overwrite a stored hazard; returns whether it existed
    async fn update(&self, hazard: &Hazard) -> SafetyResult<bool>;
}
