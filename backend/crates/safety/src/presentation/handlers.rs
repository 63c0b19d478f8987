//! HTTP Handlers
//!
//! Every handler here sits behind the authentication gate and reads the
//! store from the request context.

use std::sync::Arc;

use auth::presentation::{CurrentUser, RequestContext};
use axum::Json;
use axum::extract::{Form, Path, Query};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::application::{
    CreateHazardInput, RadarUseCase, ReportUseCase, SubmitReportInput, Submitter,
};
use crate::error::{SafetyError, SafetyResult};
use crate::infra::{DocHazardRepository, DocSafetyCardRepository};
use crate::presentation::dto::{
    CreateHazardRequest, HazardResponse, LocalHazardsQuery, SafetyCardResponse, SubmitReportForm,
};
use crate::presentation::views;

fn reports(ctx: &RequestContext) -> ReportUseCase<DocSafetyCardRepository> {
    ReportUseCase::new(Arc::new(DocSafetyCardRepository::new(ctx.store.clone())))
}

fn radar(ctx: &RequestContext) -> RadarUseCase<DocHazardRepository> {
    RadarUseCase::new(Arc::new(DocHazardRepository::new(ctx.store.clone())))
}

// ============================================================================
// Reports
// ============================================================================

/// GET /api/reports
pub async fn list_reports(ctx: RequestContext) -> SafetyResult<Json<Vec<SafetyCardResponse>>> {
    let cards = reports(&ctx).list().await?;
    Ok(Json(cards.into_iter().map(Into::into).collect()))
}

/// GET /api/reports/{id}
pub async fn get_report(
    ctx: RequestContext,
    Path(id): Path<String>,
) -> SafetyResult<Json<SafetyCardResponse>> {
    let card = reports(&ctx).get(&id).await?;
    Ok(Json(card.into()))
}

/// GET /submit, GET /api/submit
pub async fn submit_form(_user: CurrentUser) -> Html<String> {
    Html(views::submit_page(None))
}

/// POST /api/submit
pub async fn submit_report(
    ctx: RequestContext,
    user: CurrentUser,
    Form(form): Form<SubmitReportForm>,
) -> SafetyResult<Response> {
    let input = SubmitReportInput {
        category: form.category,
        location: form.location,
        description: form.description,
    };
    let submitter = Submitter {
        user_id: user.user_id,
        email: user.email.to_string(),
    };

    match reports(&ctx).submit(input, submitter).await {
        Ok(card) => Ok(Redirect::to(&format!("/api/reports/{}", card.id)).into_response()),
        Err(SafetyError::Validation(message)) => Ok((
            StatusCode::BAD_REQUEST,
            Html(views::submit_page(Some(&message))),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

// ============================================================================
// Radar
// ============================================================================

/// GET /api/radar
pub async fn active_hazards(ctx: RequestContext) -> SafetyResult<Json<Vec<HazardResponse>>> {
    let hazards = radar(&ctx).active().await?;
    Ok(Json(hazards.into_iter().map(Into::into).collect()))
}

/// GET /api/radar/local?location=..
pub async fn local_hazards(
    ctx: RequestContext,
    Query(query): Query<LocalHazardsQuery>,
) -> SafetyResult<Json<Vec<HazardResponse>>> {
    let hazards = radar(&ctx).local(query.location.as_deref()).await?;
    Ok(Json(hazards.into_iter().map(Into::into).collect()))
}

/// POST /api/radar
pub async fn create_hazard(
    ctx: RequestContext,
    user: CurrentUser,
    Json(req): Json<CreateHazardRequest>,
) -> SafetyResult<(StatusCode, Json<HazardResponse>)> {
    let input = CreateHazardInput {
        title: req.title,
        description: req.description,
        location: req.location,
    };

    let hazard = radar(&ctx).create(input, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(hazard.into())))
}

/// PUT /api/radar/{id}
pub async fn deactivate_hazard(
    ctx: RequestContext,
    Path(id): Path<String>,
) -> SafetyResult<Json<HazardResponse>> {
    let hazard = radar(&ctx).deactivate(&id).await?;
    Ok(Json(hazard.into()))
}
