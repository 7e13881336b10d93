// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{Role, User},
};

// O middleware em si: valida o Bearer token e resolve o usuário do banco.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::InvalidToken)?;

    let user = app_state.auth_service.validate_token(bearer.token()).await?;

    // Insere o usuário resolvido nos "extensions" da requisição
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}

// ---
// Guardião de papel: o handler declara o papel exigido pelo tipo.
// ---

pub trait RoleDef: Send + Sync + 'static {
    fn role() -> Role;
}

pub struct ApplicantOnly;
impl RoleDef for ApplicantOnly {
    fn role() -> Role {
        Role::Applicant
    }
}

pub struct OfficerOnly;
impl RoleDef for OfficerOnly {
    fn role() -> Role {
        Role::Officer
    }
}

pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<User>().ok_or(AppError::InvalidToken)?;

        if user.role != T::role() {
            return Err(AppError::Forbidden);
        }

        Ok(RequireRole(PhantomData))
    }
}
