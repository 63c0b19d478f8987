//! Report Use Cases
//!
//! List, fetch and submit safety cards.

use std::sync::Arc;

use kernel::id::{SafetyCardId, UserId};

use crate::domain::entity::safety_card::{ReportDraft, SafetyCard};
use crate::domain::repository::SafetyCardRepository;
use crate::error::{SafetyError, SafetyResult};

/// Submit report input (raw form fields)
pub struct SubmitReportInput {
    pub category: String,
    pub location: String,
    pub description: String,
}

/// Who is submitting
pub struct Submitter {
    pub user_id: UserId,
    pub email: String,
}

pub struct ReportUseCase<R>
where
    R: SafetyCardRepository,
{
    repo: Arc<R>,
}

impl<R> ReportUseCase<R>
where
    R: SafetyCardRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// All reports, newest first
    pub async fn list(&self) -> SafetyResult<Vec<SafetyCard>> {
        self.repo.list().await
    }

    /// `id` comes straight from the URL; anything that is not a known UUID is NotFound
    pub async fn get(&self, id: &str) -> SafetyResult<SafetyCard> {
        let id = SafetyCardId::parse_str(id).map_err(|_| SafetyError::NotFound("Safety card"))?;
        self.repo
            .find_by_id(&id)
            .await?
            .ok_or(SafetyError::NotFound("Safety card"))
    }

    pub async fn submit(
        &self,
        input: SubmitReportInput,
        submitter: Submitter,
    ) -> SafetyResult<SafetyCard> {
        let draft = ReportDraft::new(&input.category, &input.location, &input.description)?;
        let card = SafetyCard::new(draft, submitter.user_id, submitter.email);

        self.repo.create(&card).await?;

        tracing::info!(
            card_id = %card.id,
            submitted_by = %card.submitted_by,
            category = %card.category,
            "Safety card submitted"
        );

        Ok(card)
    }
}
