// src/handlers/applicants.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{ApplicantOnly, AuthenticatedUser, RequireRole},
    models::applicants::Applicant,
};

// GET /api/applicants/me — o perfil do próprio candidato, ou null.
#[utoipa::path(
    get,
    path = "/api/applicants/me",
    tag = "Applicants",
    responses(
        (status = 200, description = "Perfil do candidato (ou null)", body = Option<Applicant>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    _guard: RequireRole<ApplicantOnly>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Option<Applicant>>, AppError> {
    let profile = app_state.workflow_service.applicant_profile(user.id).await?;
    Ok(Json(profile))
}
