// src/db/application_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::applications::{Application, ApplicationReviewItem, ApplicationSummary},
};

// Chave do lock consultivo que serializa a alocação de números APP-.
const APPLICATION_COUNTER_LOCK: i64 = 0x5243_4150_5031; // "RCAPP1"

const APPLICATION_COLUMNS: &str = r#"
    id, application_number, applicant_id, application_type, status,
    payload, notes, decision_reason, reviewed_by_user_id,
    submitted_at, reviewed_at
"#;

#[derive(Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Serializa a geração "lê máximo -> calcula -> insere" dentro da transação
    // corrente. O lock é liberado automaticamente no commit/rollback.
    pub async fn lock_number_counter<'e, E>(&self, executor: E) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(APPLICATION_COUNTER_LOCK)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn max_number<'e, E>(&self, executor: E) -> Result<Option<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let max = sqlx::query_scalar::<_, Option<String>>(
            "SELECT MAX(application_number) FROM applications",
        )
        .fetch_one(executor)
        .await?;
        Ok(max)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        applicant_id: Uuid,
        application_number: &str,
        application_type: &str,
        payload: &serde_json::Value,
        notes: Option<&str>,
    ) -> Result<Application, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let application = sqlx::query_as::<_, Application>(&format!(
            r#"
            INSERT INTO applications
                (applicant_id, application_number, application_type, payload, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(applicant_id)
        .bind(application_number)
        .bind(application_type)
        .bind(payload)
        .bind(notes)
        .fetch_one(executor)
        .await?;
        Ok(application)
    }

    // Carrega a solicitação travando a linha, para que duas decisões
    // concorrentes sobre o mesmo ID não se intercalem.
    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Application>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe_application = sqlx::query_as::<_, Application>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM applications
            WHERE id = $1
            FOR UPDATE
            "#
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(maybe_application)
    }

    pub async fn mark_approved<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        reviewed_by_user_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE applications
            SET status = 'APPROVED',
                reviewed_at = now(),
                reviewed_by_user_id = $2,
                decision_reason = NULL
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(reviewed_by_user_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn mark_rejected<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        reviewed_by_user_id: Uuid,
        reason: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE applications
            SET status = 'REJECTED',
                reviewed_at = now(),
                reviewed_by_user_id = $2,
                decision_reason = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(reviewed_by_user_id)
        .bind(reason)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Solicitações do próprio candidato, mais recente primeiro.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ApplicationSummary>, AppError> {
        let summaries = sqlx::query_as::<_, ApplicationSummary>(
            r#"
            SELECT a.id,
                   a.application_number,
                   a.application_type,
                   a.status,
                   a.notes,
                   a.submitted_at
            FROM applications a
            JOIN applicants ap ON ap.id = a.applicant_id
            WHERE ap.user_id = $1
            ORDER BY a.submitted_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(summaries)
    }

    // Fila completa de revisão, com a identidade de cada candidato.
    // Sem paginação: o volume esperado é o de um balcão de atendimento.
    pub async fn list_all(&self) -> Result<Vec<ApplicationReviewItem>, AppError> {
        let items = sqlx::query_as::<_, ApplicationReviewItem>(
            r#"
            SELECT a.id,
                   a.application_number,
                   a.application_type,
                   a.status,
                   a.submitted_at,
                   ap.full_name AS applicant_name,
                   u.email AS email
            FROM applications a
            JOIN applicants ap ON ap.id = a.applicant_id
            JOIN users u ON u.id = ap.user_id
            ORDER BY a.submitted_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
