// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,

        // --- Perfil ---
        handlers::auth::get_profile,
        handlers::auth::change_password,

        // --- Dashboard ---
        handlers::dashboard::get_summary,

        // --- Clientes ---
        handlers::clients::list_clients,
        handlers::clients::list_selectable,
        handlers::clients::create_client,
        handlers::clients::get_client,
        handlers::clients::update_client,
        handlers::clients::list_client_cases,

        // --- Processos ---
        handlers::cases::list_cases,
        handlers::cases::create_case,
        handlers::cases::get_case_detail,
        handlers::movements::add_movement,

        // --- Endereços ---
        handlers::address::lookup_address,

        // --- Assistente ---
        handlers::assistant::ask,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            models::auth::LawyerIdentity,
            models::auth::LawyerProfile,
            models::auth::ChangePasswordPayload,

            // --- Clientes ---
            models::client::DocumentType,
            models::client::Client,
            models::client::ClientOption,
            models::client::ClientBrief,
            models::client::ClientPayload,
            models::client::UpsertClientResponse,
            models::address::Address,

            // --- Processos ---
            models::case::Case,
            models::case::CaseSummary,
            models::case::CaseDetail,
            models::case::CaseDetailView,
            models::case::MovementDigest,
            models::case::SignedAttachment,
            models::case::CreateCaseResponse,
            models::movement::DocumentKind,
            models::movement::Movement,
            models::movement::CreateMovementResponse,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,

            // --- Assistente ---
            models::assistant::ChatMessage,
            models::assistant::AskPayload,
            models::assistant::AskResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Login e logout do advogado"),
        (name = "Perfil", description = "Dados e senha do advogado logado"),
        (name = "Dashboard", description = "Resumo inicial"),
        (name = "Clientes", description = "Cadastro e listagem de clientes"),
        (name = "Processos", description = "Processos, detalhes e movimentações"),
        (name = "Endereços", description = "Consulta de CEP"),
        (name = "Assistente", description = "Chat com o assistente jurídico")
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
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
