use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// Cada variante conhece o status HTTP para o qual deve ser mapeada.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Perfil de candidato não encontrado")]
    ApplicantNotFound,

    #[error("Solicitação não encontrada")]
    ApplicationNotFound,

    #[error("Nenhuma licença encontrada para renovar")]
    NoLicenseToRenew,

    // A máquina de estados só permite SUBMITTED -> APPROVED | REJECTED.
    #[error("Transição de status inválida: {0}")]
    InvalidStatusTransition(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "message": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail não reconhecido ou usuário inativo.")
            }
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Token de autenticação inválido ou ausente.")
            }
            AppError::Forbidden => {
                (StatusCode::FORBIDDEN, "Você não tem permissão para realizar esta ação.")
            }
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::ApplicantNotFound => {
                (StatusCode::NOT_FOUND, "Perfil de candidato não encontrado.")
            }
            AppError::ApplicationNotFound => {
                (StatusCode::NOT_FOUND, "Solicitação não encontrada.")
            }
            AppError::NoLicenseToRenew => {
                (StatusCode::NOT_FOUND, "Nenhuma licença encontrada para renovar.")
            }

            AppError::InvalidStatusTransition(detail) => {
                let body = Json(json!({
                    "message": format!("Transição de status inválida: {detail}")
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }

            // Todos os outros erros viram 500, com o detalhe bruto no corpo.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                let detail = match &e {
                    AppError::DatabaseError(db_err) => db_err.to_string(),
                    AppError::InternalServerError(inner) => inner.to_string(),
                    other => other.to_string(),
                };
                let body = Json(json!({
                    "message": "Ocorreu um erro inesperado.",
                    "detail": detail,
                }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let resp = AppError::ApplicationNotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = AppError::NoLicenseToRenew.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        let resp = AppError::InvalidCredentials.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = AppError::InvalidToken.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = AppError::Forbidden.into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn status_transition_conflict_maps_to_409() {
        let resp =
            AppError::InvalidStatusTransition("já rejeitada".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_errors_map_to_500() {
        let resp = AppError::InternalServerError(anyhow::anyhow!("boom")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
