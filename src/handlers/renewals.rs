// src/handlers/renewals.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{ApplicantOnly, AuthenticatedUser, RequireRole},
    models::licenses::RenewalResponse,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RenewalPayload {
    // Documento opaco, repassado à solicitação RENEWAL e ao registro de renovação.
    pub payload: Option<serde_json::Value>,
}

// POST /api/renewals
#[utoipa::path(
    post,
    path = "/api/renewals",
    tag = "Renewals",
    request_body = RenewalPayload,
    responses(
        (status = 201, description = "Renovação registrada", body = RenewalResponse),
        (status = 404, description = "Usuário sem licença para renovar")
    ),
    security(("api_jwt" = []))
)]
pub async fn submit_renewal(
    State(app_state): State<AppState>,
    _guard: RequireRole<ApplicantOnly>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<RenewalPayload>,
) -> Result<impl IntoResponse, AppError> {
    let payload_json = payload.payload.unwrap_or_else(|| json!({}));
    let application_number = app_state
        .workflow_service
        .submit_renewal(user.id, payload_json)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RenewalResponse {
            ok: true,
            application_number,
        }),
    ))
}
