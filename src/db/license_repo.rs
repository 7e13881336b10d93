// src/db/license_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::licenses::{License, LicenseView},
};

// Chave do lock consultivo que serializa a alocação de números LIC-.
const LICENSE_COUNTER_LOCK: i64 = 0x5243_4C49_4331; // "RCLIC1"

const LICENSE_COLUMNS: &str = r#"
    id, license_number, applicant_id, status, issued_at, expires_at
"#;

// Repositório de licenças e dos registros de renovação ligados a elas.
#[derive(Clone)]
pub struct LicenseRepository {
    pool: PgPool,
}

impl LicenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn lock_number_counter<'e, E>(&self, executor: E) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(LICENSE_COUNTER_LOCK)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn max_number<'e, E>(&self, executor: E) -> Result<Option<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let max =
            sqlx::query_scalar::<_, Option<String>>("SELECT MAX(license_number) FROM licenses")
                .fetch_one(executor)
                .await?;
        Ok(max)
    }

    pub async fn find_by_applicant<'e, E>(
        &self,
        executor: E,
        applicant_id: Uuid,
    ) -> Result<Option<License>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe_license = sqlx::query_as::<_, License>(&format!(
            r#"
            SELECT {LICENSE_COLUMNS}
            FROM licenses
            WHERE applicant_id = $1
            "#
        ))
        .bind(applicant_id)
        .fetch_optional(executor)
        .await?;
        Ok(maybe_license)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        applicant_id: Uuid,
        license_number: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<License, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let license = sqlx::query_as::<_, License>(&format!(
            r#"
            INSERT INTO licenses (applicant_id, license_number, expires_at)
            VALUES ($1, $2, $3)
            RETURNING {LICENSE_COLUMNS}
            "#
        ))
        .bind(applicant_id)
        .bind(license_number)
        .bind(expires_at)
        .fetch_one(executor)
        .await?;
        Ok(license)
    }

    // Licença mais recente do usuário, com nome e e-mail do titular.
    pub async fn view_for_user(&self, user_id: Uuid) -> Result<Option<LicenseView>, AppError> {
        let maybe_view = sqlx::query_as::<_, LicenseView>(
            r#"
            SELECT l.id,
                   l.license_number,
                   l.status,
                   l.issued_at,
                   l.expires_at,
                   ap.full_name AS holder_name,
                   u.email AS email
            FROM licenses l
            JOIN applicants ap ON ap.id = l.applicant_id
            JOIN users u ON u.id = ap.user_id
            WHERE u.id = $1
            ORDER BY l.issued_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_view)
    }

    // Registro de renovação, sempre pareado 1:1 com a solicitação recém-criada.
    pub async fn insert_renewal<'e, E>(
        &self,
        executor: E,
        license_id: Uuid,
        application_id: Uuid,
        payload: &serde_json::Value,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO renewals (license_id, application_id, payload)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(license_id)
        .bind(application_id)
        .bind(payload)
        .execute(executor)
        .await?;
        Ok(())
    }
}
