// src/db/applicant_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::applicants::Applicant};

#[derive(Clone)]
pub struct ApplicantRepository {
    pool: PgPool,
}

impl ApplicantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca o perfil de candidato dono de um usuário (relação 1:1).
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Applicant>, AppError> {
        let maybe_applicant = sqlx::query_as::<_, Applicant>(
            r#"
            SELECT id, user_id, full_name, phone, address, created_at
            FROM applicants
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_applicant)
    }
}
