// src/services/workflow_service.rs
//
// O motor de workflow: submissão, revisão (aprovar/rejeitar), emissão de
// licença e renovação. Cada operação pública que escreve roda dentro de uma
// única transação; a falha no meio do caminho desfaz tudo.

use chrono::{Months, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        numbering::{next_number, APPLICATION_PREFIX, LICENSE_PREFIX},
    },
    db::{ApplicantRepository, ApplicationRepository, AuditRepository, LicenseRepository},
    models::{
        applicants::Applicant,
        applications::{Application, ApplicationReviewItem, ApplicationStatus, ApplicationSummary},
        licenses::LicenseView,
    },
};

const AUDIT_ENTITY_APPLICATIONS: &str = "applications";

// ---
// Máquina de estados da revisão, como função pura: status atual × decisão
// pedida -> o que fazer. SUBMITTED é o único estado não terminal; repetir a
// mesma decisão terminal é idempotente, trocar de decisão é conflito.
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ReviewOutcome {
    Apply,
    AlreadyDecided,
    Conflict(&'static str),
}

pub fn review_transition(current: ApplicationStatus, decision: ReviewDecision) -> ReviewOutcome {
    match (current, decision) {
        (ApplicationStatus::Submitted, _) => ReviewOutcome::Apply,
        (ApplicationStatus::Approved, ReviewDecision::Approve) => ReviewOutcome::AlreadyDecided,
        (ApplicationStatus::Rejected, ReviewDecision::Reject) => ReviewOutcome::AlreadyDecided,
        (ApplicationStatus::Rejected, ReviewDecision::Approve) => {
            ReviewOutcome::Conflict("uma solicitação rejeitada não pode ser aprovada")
        }
        (ApplicationStatus::Approved, ReviewDecision::Reject) => {
            ReviewOutcome::Conflict("uma solicitação aprovada não pode ser rejeitada")
        }
    }
}

#[derive(Clone)]
pub struct WorkflowService {
    applicant_repo: ApplicantRepository,
    application_repo: ApplicationRepository,
    license_repo: LicenseRepository,
    audit_repo: AuditRepository,
    pool: PgPool,
}

impl WorkflowService {
    pub fn new(
        applicant_repo: ApplicantRepository,
        application_repo: ApplicationRepository,
        license_repo: LicenseRepository,
        audit_repo: AuditRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            applicant_repo,
            application_repo,
            license_repo,
            audit_repo,
            pool,
        }
    }

    pub async fn applicant_profile(&self, user_id: Uuid) -> Result<Option<Applicant>, AppError> {
        self.applicant_repo.find_by_user_id(user_id).await
    }

    // Submete uma nova solicitação para o candidato dono de `user_id`.
    pub async fn submit_application(
        &self,
        user_id: Uuid,
        application_type: &str,
        payload: serde_json::Value,
    ) -> Result<Application, AppError> {
        let applicant = self
            .applicant_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(AppError::ApplicantNotFound)?;

        let mut tx = self.pool.begin().await?;
        let application = self
            .create_application_in_tx(&mut tx, applicant.id, application_type, &payload)
            .await?;
        tx.commit().await?;

        tracing::info!(
            "📄 Solicitação {} ({}) registrada para o candidato {}",
            application.application_number,
            application.application_type,
            applicant.id
        );
        Ok(application)
    }

    pub async fn list_my_applications(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ApplicationSummary>, AppError> {
        self.application_repo.list_for_user(user_id).await
    }

    pub async fn list_all_applications(&self) -> Result<Vec<ApplicationReviewItem>, AppError> {
        self.application_repo.list_all().await
    }

    // Aprova a solicitação e, se for a primeira aprovação do candidato,
    // emite a licença (ACTIVE, válida por 1 ano). Tudo numa transação só:
    // mudança de status, licença condicional e auditoria, ou nada.
    pub async fn approve(
        &self,
        officer_user_id: Uuid,
        application_id: Uuid,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let application = self
            .application_repo
            .find_by_id_for_update(&mut *tx, application_id)
            .await?
            .ok_or(AppError::ApplicationNotFound)?;

        match review_transition(application.status, ReviewDecision::Approve) {
            // Reaprovar é idempotente: nada a escrever, nenhuma segunda licença.
            ReviewOutcome::AlreadyDecided => return Ok(()),
            ReviewOutcome::Conflict(detail) => {
                return Err(AppError::InvalidStatusTransition(detail.to_string()));
            }
            ReviewOutcome::Apply => {}
        }

        self.application_repo
            .mark_approved(&mut *tx, application_id, officer_user_id)
            .await?;

        let existing_license = self
            .license_repo
            .find_by_applicant(&mut *tx, application.applicant_id)
            .await?;

        if existing_license.is_none() {
            self.license_repo.lock_number_counter(&mut *tx).await?;
            let max = self.license_repo.max_number(&mut *tx).await?;
            let license_number = next_number(LICENSE_PREFIX, max.as_deref());

            let expires_at = Utc::now() + Months::new(12);
            let license = self
                .license_repo
                .insert(&mut *tx, application.applicant_id, &license_number, expires_at)
                .await?;

            tracing::info!(
                "📜 Licença {} emitida para o candidato {}",
                license.license_number,
                application.applicant_id
            );
        }

        self.audit_repo
            .record(
                &mut *tx,
                officer_user_id,
                "APPLICATION_APPROVED",
                AUDIT_ENTITY_APPLICATIONS,
                &application.application_number,
                Some("Aprovada; licença emitida se ainda não existia"),
            )
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // Rejeita a solicitação, guardando o motivo (opcional). Simétrico à
    // aprovação: re-rejeitar é idempotente, rejeitar uma aprovada é conflito.
    pub async fn reject(
        &self,
        officer_user_id: Uuid,
        application_id: Uuid,
        reason: Option<&str>,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let application = self
            .application_repo
            .find_by_id_for_update(&mut *tx, application_id)
            .await?
            .ok_or(AppError::ApplicationNotFound)?;

        match review_transition(application.status, ReviewDecision::Reject) {
            ReviewOutcome::AlreadyDecided => return Ok(()),
            ReviewOutcome::Conflict(detail) => {
                return Err(AppError::InvalidStatusTransition(detail.to_string()));
            }
            ReviewOutcome::Apply => {}
        }

        self.application_repo
            .mark_rejected(&mut *tx, application_id, officer_user_id, reason)
            .await?;

        self.audit_repo
            .record(
                &mut *tx,
                officer_user_id,
                "APPLICATION_REJECTED",
                AUDIT_ENTITY_APPLICATIONS,
                &application.application_number,
                reason,
            )
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn license_for_user(&self, user_id: Uuid) -> Result<Option<LicenseView>, AppError> {
        self.license_repo.view_for_user(user_id).await
    }

    // Renovação: cria a solicitação de tipo RENEWAL e o registro de renovação
    // apontando para a licença vigente, na mesma transação.
    pub async fn submit_renewal(
        &self,
        user_id: Uuid,
        payload: serde_json::Value,
    ) -> Result<String, AppError> {
        let license = self
            .license_repo
            .view_for_user(user_id)
            .await?
            .ok_or(AppError::NoLicenseToRenew)?;

        let applicant = self
            .applicant_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(AppError::ApplicantNotFound)?;

        let mut tx = self.pool.begin().await?;

        let application = self
            .create_application_in_tx(&mut tx, applicant.id, "RENEWAL", &payload)
            .await?;

        self.license_repo
            .insert_renewal(&mut *tx, license.id, application.id, &payload)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "🔁 Renovação registrada: licença {} -> solicitação {}",
            license.license_number,
            application.application_number
        );
        Ok(application.application_number)
    }

    // Aloca o próximo número APP- e insere a solicitação, tudo sob o lock
    // do contador. `notes` vem do payload, como no fluxo original.
    async fn create_application_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        applicant_id: Uuid,
        application_type: &str,
        payload: &serde_json::Value,
    ) -> Result<Application, AppError> {
        self.application_repo.lock_number_counter(&mut **tx).await?;
        let max = self.application_repo.max_number(&mut **tx).await?;
        let application_number = next_number(APPLICATION_PREFIX, max.as_deref());

        let notes = payload.get("notes").and_then(|v| v.as_str());

        self.application_repo
            .insert(
                &mut **tx,
                applicant_id,
                &application_number,
                application_type,
                payload,
                notes,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_accepts_either_decision() {
        assert_eq!(
            review_transition(ApplicationStatus::Submitted, ReviewDecision::Approve),
            ReviewOutcome::Apply
        );
        assert_eq!(
            review_transition(ApplicationStatus::Submitted, ReviewDecision::Reject),
            ReviewOutcome::Apply
        );
    }

    #[test]
    fn repeating_the_same_decision_is_idempotent() {
        // Reaprovar não escreve nada e não emite segunda licença.
        assert_eq!(
            review_transition(ApplicationStatus::Approved, ReviewDecision::Approve),
            ReviewOutcome::AlreadyDecided
        );
        assert_eq!(
            review_transition(ApplicationStatus::Rejected, ReviewDecision::Reject),
            ReviewOutcome::AlreadyDecided
        );
    }

    #[test]
    fn crossing_a_terminal_decision_is_a_conflict() {
        assert!(matches!(
            review_transition(ApplicationStatus::Rejected, ReviewDecision::Approve),
            ReviewOutcome::Conflict(_)
        ));
        assert!(matches!(
            review_transition(ApplicationStatus::Approved, ReviewDecision::Reject),
            ReviewOutcome::Conflict(_)
        ));
    }
}
