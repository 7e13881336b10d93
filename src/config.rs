// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ApplicantRepository, ApplicationRepository, AuditRepository, LicenseRepository,
        UserRepository,
    },
    services::{auth::AuthService, workflow_service::WorkflowService},
};

// O estado compartilhado que será acessível em toda a aplicação.
// O pool é criado uma vez aqui e injetado explicitamente em repositórios
// e serviços; nenhum estado de conexão global e preguiçoso.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub workflow_service: WorkflowService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o grafo de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let applicant_repo = ApplicantRepository::new(db_pool.clone());
        let application_repo = ApplicationRepository::new(db_pool.clone());
        let license_repo = LicenseRepository::new(db_pool.clone());
        let audit_repo = AuditRepository::new();

        let auth_service = AuthService::new(user_repo, jwt_secret);
        let workflow_service = WorkflowService::new(
            applicant_repo,
            application_repo,
            license_repo,
            audit_repo,
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            auth_service,
            workflow_service,
        })
    }
}
