//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
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
mod storage;
#[cfg(test)]
mod testing;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::handlers::multipart::{case_body_limit, movement_body_limit};
use crate::middleware::auth::auth_guard;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new().await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = app(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

// Monta todas as rotas da API sobre o estado da aplicação
fn app(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout));

    // Daqui para baixo tudo exige sessão
    let guard = axum_middleware::from_fn_with_state(app_state.clone(), auth_guard);

    let profile_routes = Router::new()
        .route("/me", get(handlers::auth::get_profile))
        .route("/me/senha", put(handlers::auth::change_password))
        .layer(guard.clone());

    let client_routes = Router::new()
        .route("/"
               ,get(handlers::clients::list_clients)
               .post(handlers::clients::create_client)
        )
        .route("/selecionaveis", get(handlers::clients::list_selectable))
        .route("/{id}"
               ,get(handlers::clients::get_client)
               .put(handlers::clients::update_client)
        )
        .route("/{id}/processos", get(handlers::clients::list_client_cases))
        .layer(guard.clone());

    let case_routes = Router::new()
        .route("/"
               ,get(handlers::cases::list_cases)
               .post(handlers::cases::create_case)
               .layer(case_body_limit())
        )
        .route("/{id}", get(handlers::cases::get_case_detail))
        .route("/{id}/movimentacoes"
               ,post(handlers::movements::add_movement)
               .layer(movement_body_limit())
        )
        .layer(guard.clone());

    let misc_routes = Router::new()
        .route("/api/dashboard", get(handlers::dashboard::get_summary))
        .route("/api/enderecos/{cep}", get(handlers::address::lookup_address))
        .route("/api/assistente", post(handlers::assistant::ask))
        .layer(guard);

    // Combina tudo no router principal
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/advogados", profile_routes)
        .nest("/api/clientes", client_routes)
        .nest("/api/processos", case_routes)
        .merge(misc_routes)
        .with_state(app_state)
}
