// src/handlers/licenses.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::licenses::LicenseView,
};

// GET /api/licenses/me — qualquer usuário autenticado consulta a própria
// licença (o oficial também pode ser titular).
#[utoipa::path(
    get,
    path = "/api/licenses/me",
    tag = "Licenses",
    responses(
        (status = 200, description = "Licença mais recente do usuário (ou null)", body = Option<LicenseView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_license(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Option<LicenseView>>, AppError> {
    let license = app_state.workflow_service.license_for_user(user.id).await?;
    Ok(Json(license))
}
