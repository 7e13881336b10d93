// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Applicants ---
        handlers::applicants::get_me,

        // --- Applications ---
        handlers::applications::list_my_applications,
        handlers::applications::submit_application,
        handlers::applications::list_all_applications,
        handlers::applications::approve_application,
        handlers::applications::reject_application,

        // --- Licenses ---
        handlers::licenses::get_my_license,

        // --- Renewals ---
        handlers::renewals::submit_renewal,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Applicants ---
            models::applicants::Applicant,

            // --- Applications ---
            models::applications::ApplicationStatus,
            models::applications::ApplicationSummary,
            models::applications::ApplicationReviewItem,
            models::applications::SubmitResponse,
            models::applications::OkResponse,

            // --- Licenses ---
            models::licenses::LicenseStatus,
            models::licenses::LicenseView,
            models::licenses::RenewalResponse,

            // --- Payloads ---
            handlers::applications::SubmitApplicationPayload,
            handlers::applications::RejectPayload,
            handlers::renewals::RenewalPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação (login de demonstração por e-mail)"),
        (name = "Applicants", description = "Perfil do candidato"),
        (name = "Applications", description = "Submissão e revisão de solicitações"),
        (name = "Licenses", description = "Consulta de licenças emitidas"),
        (name = "Renewals", description = "Renovação de licenças")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
