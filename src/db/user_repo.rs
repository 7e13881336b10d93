// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::User};

// O repositório de usuários, responsável pelas leituras da tabela 'users'.
// Usuários são provisionados externamente; este serviço nunca os cria.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário ativo pelo seu e-mail.
    pub async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, role, is_active, created_at
            FROM users
            WHERE email = $1 AND is_active = TRUE
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    // Busca um usuário ativo pelo seu ID (revalida papel e ativação a cada token).
    pub async fn find_active_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, role, is_active, created_at
            FROM users
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }
}
