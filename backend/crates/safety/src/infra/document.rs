//! Document Store Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{HazardId, SafetyCardId, UserId};
use platform::docstore::{Document, DocumentStore, Filter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{hazard::Hazard, safety_card::SafetyCard};
use crate::domain::repository::{HazardRepository, SafetyCardRepository};
use crate::error::SafetyResult;

pub const SAFETY_CARDS_COLLECTION: &str = "safety_cards";
pub const HAZARDS_COLLECTION: &str = "hazards";

// ============================================================================
// Stored shapes
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct SafetyCardDocument {
    category: String,
    location: String,
    description: String,
    submitted_by: Uuid,
    submitter_email: String,
    submitted_at: DateTime<Utc>,
}

impl From<&SafetyCard> for SafetyCardDocument {
    fn from(card: &SafetyCard) -> Self {
        Self {
            category: card.category.clone(),
            location: card.location.clone(),
            description: card.description.clone(),
            submitted_by: card.submitted_by.into_uuid(),
            submitter_email: card.submitter_email.clone(),
            submitted_at: card.submitted_at,
        }
    }
}

impl From<Document<SafetyCardDocument>> for SafetyCard {
    fn from(doc: Document<SafetyCardDocument>) -> Self {
        Self {
            id: SafetyCardId::from_uuid(doc.id),
            category: doc.body.category,
            location: doc.body.location,
            description: doc.body.description,
            submitted_by: UserId::from_uuid(doc.body.submitted_by),
            submitter_email: doc.body.submitter_email,
            submitted_at: doc.body.submitted_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HazardDocument {
    title: String,
    description: String,
    location: String,
    reported_by: Uuid,
    active: bool,
    reported_at: DateTime<Utc>,
    deactivated_at: Option<DateTime<Utc>>,
}

impl From<&Hazard> for HazardDocument {
    fn from(hazard: &Hazard) -> Self {
        Self {
            title: hazard.title.clone(),
            description: hazard.description.clone(),
            location: hazard.location.clone(),
            reported_by: hazard.reported_by.into_uuid(),
            active: hazard.active,
            reported_at: hazard.reported_at,
            deactivated_at: hazard.deactivated_at,
        }
    }
}

impl From<Document<HazardDocument>> for Hazard {
    fn from(doc: Document<HazardDocument>) -> Self {
        Self {
            id: HazardId::from_uuid(doc.id),
            title: doc.body.title,
            description: doc.body.description,
            location: doc.body.location,
            reported_by: UserId::from_uuid(doc.body.reported_by),
            active: doc.body.active,
            reported_at: doc.body.reported_at,
            deactivated_at: doc.body.deactivated_at,
        }
    }
}

// ============================================================================
// Repository
// ============================================================================

/// Safety cards on the document store
#[derive(Clone, Debug)]
pub struct DocSafetyCardRepository {
    store: DocumentStore,
}

impl DocSafetyCardRepository {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }
}

/// Hazard radar on the document store
#[derive(Clone, Debug)]
pub struct DocHazardRepository {
    store: DocumentStore,
}

impl DocHazardRepository {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }
}

impl SafetyCardRepository for DocSafetyCardRepository {
    async fn create(&self, card: &SafetyCard) -> SafetyResult<()> {
        self.store
            .collection(SAFETY_CARDS_COLLECTION)
            .insert_one(card.id.into_uuid(), &SafetyCardDocument::from(card))
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &SafetyCardId) -> SafetyResult<Option<SafetyCard>> {
        let doc = self
            .store
            .collection(SAFETY_CARDS_COLLECTION)
            .find_by_id::<SafetyCardDocument>(id.into_uuid())
            .await?;
        Ok(doc.map(SafetyCard::from))
    }

    async fn list(&self) -> SafetyResult<Vec<SafetyCard>> {
        let docs = self
            .store
            .collection(SAFETY_CARDS_COLLECTION)
            .find::<SafetyCardDocument>(Filter::new())
            .await?;
        Ok(docs.into_iter().map(SafetyCard::from).collect())
    }
}

impl HazardRepository for DocHazardRepository {
    async fn create(&self, hazard: &Hazard) -> SafetyResult<()> {
        self.store
            .collection(HAZARDS_COLLECTION)
            .insert_one(hazard.id.into_uuid(), &HazardDocument::from(hazard))
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &HazardId) -> SafetyResult<Option<Hazard>> {
        let doc = self
            .store
            .collection(HAZARDS_COLLECTION)
            .find_by_id::<HazardDocument>(id.into_uuid())
            .await?;
        Ok(doc.map(Hazard::from))
    }

    async fn find_active(&self, location: Option<&str>) -> SafetyResult<Vec<Hazard>> {
        let mut filter = Filter::new().eq("active", true);
        if let Some(location) = location {
            filter = filter.eq("location", location);
        }

        let docs = self
            .store
            .collection(HAZARDS_COLLECTION)
            .find::<HazardDocument>(filter)
            .await?;
        Ok(docs.into_iter().map(Hazard::from).collect())
    }

    async fn update(&self, hazard: &Hazard) -> SafetyResult<bool> {
        Ok(self
            .store
            .collection(HAZARDS_COLLECTION)
            .update_by_id(hazard.id.into_uuid(), &HazardDocument::from(hazard))
            .await?)
    }
}
