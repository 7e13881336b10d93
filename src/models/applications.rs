// src/models/applications.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Estados da solicitação. SUBMITTED é o estado inicial;
// APPROVED e REJECTED são terminais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "application_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationStatus {
    Submitted,
    Approved,
    Rejected,
}

// A linha completa da solicitação, como vem do banco.
// `payload` é um documento opaco: o motor nunca interpreta o conteúdo.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Application {
    pub id: Uuid,
    pub application_number: String,
    pub applicant_id: Uuid,
    pub application_type: String,
    pub status: ApplicationStatus,
    pub payload: serde_json::Value,
    pub notes: Option<String>,
    pub decision_reason: Option<String>,
    pub reviewed_by_user_id: Option<Uuid>,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

// Resumo que o próprio candidato enxerga na listagem.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub id: Uuid,
    pub application_number: String,
    #[serde(rename = "type")]
    pub application_type: String,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

// Item da fila de revisão do oficial, com a identidade do candidato.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReviewItem {
    pub id: Uuid,
    pub application_number: String,
    #[serde(rename = "type")]
    pub application_type: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub applicant_name: String,
    pub email: String,
}

// Resposta da submissão (201).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub id: Uuid,
    pub application_number: String,
}

// Resposta padrão das decisões de revisão.
#[derive(Debug, Serialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_in_wire_format() {
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Submitted).unwrap(),
            "\"SUBMITTED\""
        );
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Approved).unwrap(),
            "\"APPROVED\""
        );
    }

    #[test]
    fn summary_uses_type_as_wire_name() {
        let summary = ApplicationSummary {
            id: Uuid::nil(),
            application_number: "APP-000001".to_string(),
            application_type: "NEW".to_string(),
            status: ApplicationStatus::Submitted,
            notes: None,
            submitted_at: Utc::now(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["type"], "NEW");
        assert_eq!(json["applicationNumber"], "APP-000001");
    }
}
