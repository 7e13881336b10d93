// src/models/licenses.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "license_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LicenseStatus {
    Active,
    Expired,
    Revoked,
}

// A linha da licença, como vem do banco. Emitida uma única vez por
// candidato, na primeira aprovação.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct License {
    pub id: Uuid,
    pub license_number: String,
    pub applicant_id: Uuid,
    pub status: LicenseStatus,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

// Visão da licença para o titular, com nome e e-mail resolvidos.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LicenseView {
    pub id: Uuid,
    pub license_number: String,
    pub status: LicenseStatus,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub holder_name: String,
    pub email: String,
}

// Resposta da submissão de renovação (201).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenewalResponse {
    pub ok: bool,
    pub application_number: String,
}
