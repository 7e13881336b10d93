// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Rotas protegidas: o papel exigido fica declarado em cada handler.
    let applicant_routes = Router::new().route("/me", get(handlers::applicants::get_me));

    let application_routes = Router::new()
        .route(
            "/",
            post(handlers::applications::submit_application)
                .get(handlers::applications::list_all_applications),
        )
        .route("/me", get(handlers::applications::list_my_applications))
        .route(
            "/{id}/approve",
            put(handlers::applications::approve_application),
        )
        .route(
            "/{id}/reject",
            put(handlers::applications::reject_application),
        );

    let license_routes = Router::new().route("/me", get(handlers::licenses::get_my_license));

    let renewal_routes = Router::new().route("/", post(handlers::renewals::submit_renewal));

    let protected_routes = Router::new()
        .nest("/applicants", applicant_routes)
        .nest("/applications", application_routes)
        .nest("/licenses", license_routes)
        .nest("/renewals", renewal_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
