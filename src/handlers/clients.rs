// src/handlers/clients.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentSession,
    models::{
        case::CaseSummary,
        client::{Client, ClientBrief, ClientOption, ClientPayload, UpsertClientResponse},
    },
};

// GET /api/clientes
#[utoipa::path(
    get,
    path = "/api/clientes",
    tag = "Clientes",
    responses(
        (status = 200, description = "Clientes presentes nos processos do advogado", body = Vec<ClientBrief>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Vec<ClientBrief>>, AppError> {
    let clients = app_state.case_service.clients_with_cases(&session).await?;
    Ok(Json(clients))
}

// GET /api/clientes/selecionaveis
#[utoipa::path(
    get,
    path = "/api/clientes/selecionaveis",
    tag = "Clientes",
    responses(
        (status = 200, description = "Clientes vinculados ou cadastrados pelo advogado", body = Vec<ClientOption>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_selectable(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Vec<ClientOption>>, AppError> {
    let clients = app_state.case_service.selectable_clients(&session).await?;
    Ok(Json(clients))
}

// POST /api/clientes
#[utoipa::path(
    post,
    path = "/api/clientes",
    tag = "Clientes",
    request_body = ClientPayload,
    responses(
        (status = 201, description = "Cliente cadastrado", body = UpsertClientResponse),
        (status = 400, description = "Dados inválidos (VALIDATION_ERROR)"),
        (status = 409, description = "Documento já cadastrado (DUPLICATE_DOCUMENT)")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<ClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let outcome = app_state.client_service.submit(&session, payload, None).await?;

    Ok((
        StatusCode::CREATED,
        Json(UpsertClientResponse {
            id: outcome.id,
            aviso: outcome.aviso,
        }),
    ))
}

// GET /api/clientes/{id}
#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente para edição", body = Client),
        (status = 404, description = "Cliente não encontrado (NOT_FOUND)")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
) -> Result<Json<Client>, AppError> {
    let client = app_state.client_service.find_client(&session, id).await?;
    Ok(Json(client))
}

// PUT /api/clientes/{id}
#[utoipa::path(
    put,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = i64, Path, description = "ID do cliente")),
    request_body = ClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = UpsertClientResponse),
        (status = 409, description = "Documento já cadastrado (DUPLICATE_DOCUMENT)")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
    Json(payload): Json<ClientPayload>,
) -> Result<Json<UpsertClientResponse>, AppError> {
    payload.validate()?;

    let outcome = app_state
        .client_service
        .submit(&session, payload, Some(id))
        .await?;

    Ok(Json(UpsertClientResponse {
        id: outcome.id,
        aviso: outcome.aviso,
    }))
}

// GET /api/clientes/{id}/processos
#[utoipa::path(
    get,
    path = "/api/clientes/{id}/processos",
    tag = "Clientes",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Processos do advogado para o cliente", body = Vec<CaseSummary>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_client_cases(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
) -> Result<Json<Vec<CaseSummary>>, AppError> {
    let cases = app_state
        .case_service
        .list_cases_for_client(&session, id)
        .await?;
    Ok(Json(cases))
}
