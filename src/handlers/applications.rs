// src/handlers/applications.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{ApplicantOnly, AuthenticatedUser, OfficerOnly, RequireRole},
    models::applications::{
        ApplicationReviewItem, ApplicationSummary, OkResponse, SubmitResponse,
    },
};

// ---
// Payload: submissão de solicitação
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitApplicationPayload {
    // Option + required: a ausência do campo precisa chegar à validação
    // para virar 400 com corpo `{"message"}`, não uma rejeição do extrator.
    #[validate(
        required(message = "O campo 'type' é obrigatório."),
        length(min = 1, message = "O campo 'type' é obrigatório.")
    )]
    #[serde(rename = "type")]
    #[schema(example = "NEW")]
    pub application_type: Option<String>,

    // Documento opaco: o motor não interpreta o conteúdo.
    pub payload: Option<serde_json::Value>,
}

// ---
// Payload: rejeição
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RejectPayload {
    #[validate(length(max = 300, message = "O motivo deve ter no máximo 300 caracteres."))]
    #[schema(example = "Documentação incompleta")]
    pub reason: Option<String>,
}

// GET /api/applications/me
#[utoipa::path(
    get,
    path = "/api/applications/me",
    tag = "Applications",
    responses(
        (status = 200, description = "Solicitações do candidato, mais recente primeiro", body = [ApplicationSummary])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_my_applications(
    State(app_state): State<AppState>,
    _guard: RequireRole<ApplicantOnly>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<ApplicationSummary>>, AppError> {
    let applications = app_state
        .workflow_service
        .list_my_applications(user.id)
        .await?;
    Ok(Json(applications))
}

// POST /api/applications
#[utoipa::path(
    post,
    path = "/api/applications",
    tag = "Applications",
    request_body = SubmitApplicationPayload,
    responses(
        (status = 201, description = "Solicitação registrada", body = SubmitResponse),
        (status = 400, description = "Campo 'type' ausente ou vazio"),
        (status = 404, description = "Usuário sem perfil de candidato")
    ),
    security(("api_jwt" = []))
)]
pub async fn submit_application(
    State(app_state): State<AppState>,
    _guard: RequireRole<ApplicantOnly>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<SubmitApplicationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Após a validação o campo é garantidamente Some e não vazio.
    let application_type = payload.application_type.unwrap_or_default();
    let payload_json = payload.payload.unwrap_or_else(|| json!({}));
    let application = app_state
        .workflow_service
        .submit_application(user.id, &application_type, payload_json)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            id: application.id,
            application_number: application.application_number,
        }),
    ))
}

// GET /api/applications — fila de revisão do oficial.
#[utoipa::path(
    get,
    path = "/api/applications",
    tag = "Applications",
    responses(
        (status = 200, description = "Todas as solicitações, com identidade do candidato", body = [ApplicationReviewItem])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_all_applications(
    State(app_state): State<AppState>,
    _guard: RequireRole<OfficerOnly>,
) -> Result<Json<Vec<ApplicationReviewItem>>, AppError> {
    let applications = app_state.workflow_service.list_all_applications().await?;
    Ok(Json(applications))
}

// PUT /api/applications/{id}/approve
#[utoipa::path(
    put,
    path = "/api/applications/{id}/approve",
    tag = "Applications",
    params(
        ("id" = Uuid, Path, description = "ID da solicitação")
    ),
    responses(
        (status = 200, description = "Aprovada (idempotente)", body = OkResponse),
        (status = 404, description = "Solicitação não encontrada"),
        (status = 409, description = "Solicitação já rejeitada")
    ),
    security(("api_jwt" = []))
)]
pub async fn approve_application(
    State(app_state): State<AppState>,
    _guard: RequireRole<OfficerOnly>,
    AuthenticatedUser(officer): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OkResponse>, AppError> {
    app_state.workflow_service.approve(officer.id, id).await?;
    Ok(Json(OkResponse { ok: true }))
}

// PUT /api/applications/{id}/reject
#[utoipa::path(
    put,
    path = "/api/applications/{id}/reject",
    tag = "Applications",
    params(
        ("id" = Uuid, Path, description = "ID da solicitação")
    ),
    request_body = RejectPayload,
    responses(
        (status = 200, description = "Rejeitada (idempotente)", body = OkResponse),
        (status = 404, description = "Solicitação não encontrada"),
        (status = 409, description = "Solicitação já aprovada")
    ),
    security(("api_jwt" = []))
)]
pub async fn reject_application(
    State(app_state): State<AppState>,
    _guard: RequireRole<OfficerOnly>,
    AuthenticatedUser(officer): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectPayload>,
) -> Result<Json<OkResponse>, AppError> {
    payload.validate()?;

    app_state
        .workflow_service
        .reject(officer.id, id, payload.reason.as_deref())
        .await?;
    Ok(Json(OkResponse { ok: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_payload_uses_type_as_wire_name() {
        let payload: SubmitApplicationPayload =
            serde_json::from_value(json!({ "type": "NEW", "payload": { "notes": "x" } }))
                .unwrap();
        assert_eq!(payload.application_type.as_deref(), Some("NEW"));
        assert_eq!(payload.payload.unwrap()["notes"], "x");
    }

    #[test]
    fn missing_type_maps_to_validation_400() {
        // O corpo sem 'type' deve desserializar e cair na validação,
        // para que a resposta seja 400 com `{"message"}`.
        let payload: SubmitApplicationPayload =
            serde_json::from_value(json!({ "payload": {} })).unwrap();
        assert!(payload.application_type.is_none());

        let errors = payload.validate().unwrap_err();
        let resp = AppError::ValidationError(errors).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn empty_type_fails_validation() {
        let payload: SubmitApplicationPayload =
            serde_json::from_value(json!({ "type": "" })).unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn reject_reason_is_optional() {
        let payload: RejectPayload = serde_json::from_value(json!({})).unwrap();
        assert!(payload.reason.is_none());
        assert!(payload.validate().is_ok());
    }
}
