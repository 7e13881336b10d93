// src/handlers/auth.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{AuthResponse, LoginPayload},
};

// Handler de login: troca um e-mail conhecido por um token assinado.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Token emitido", body = AuthResponse),
        (status = 401, description = "Usuário desconhecido ou inativo")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    let (token, user) = app_state.auth_service.login_user(&payload.email).await?;

    Ok(Json(AuthResponse {
        token,
        email: user.email,
        role: user.role,
    }))
}
