// src/db/audit_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;

// Trilha de auditoria: append-only, sempre gravada na mesma transação
// da decisão que ela registra. Por isso só recebe executores, nunca o pool.
#[derive(Clone, Default)]
pub struct AuditRepository;

impl AuditRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn record<'e, E>(
        &self,
        executor: E,
        actor_user_id: Uuid,
        action: &str,
        entity: &str,
        entity_id: &str,
        detail: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO audit_log (actor_user_id, action, entity, entity_id, detail)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(actor_user_id)
        .bind(action)
        .bind(entity)
        .bind(entity_id)
        .bind(detail)
        .execute(executor)
        .await?;
        Ok(())
    }
}
