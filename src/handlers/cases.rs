// src/handlers/cases.rs

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::multipart::FormData,
    middleware::auth::CurrentSession,
    models::case::{CaseDetailView, CaseSummary, CreateCaseResponse, MAX_CASE_DOCUMENT_BYTES},
};

// GET /api/processos
#[utoipa::path(
    get,
    path = "/api/processos",
    tag = "Processos",
    responses(
        (status = 200, description = "Processos do advogado", body = Vec<CaseSummary>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_cases(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Vec<CaseSummary>>, AppError> {
    let cases = app_state.case_service.list_cases(&session).await?;
    Ok(Json(cases))
}

// POST /api/processos
#[utoipa::path(
    post,
    path = "/api/processos",
    tag = "Processos",
    request_body(
        content_type = "multipart/form-data",
        description = "numero, descricao, cliente_id, polo_ativo, polo_passivo, valor_causa (\"R$ 1.234,56\" ou só dígitos, lidos em centavos) e documento (PDF até 10 MB, opcional)"
    ),
    responses(
        (status = 201, description = "Processo cadastrado", body = CreateCaseResponse),
        (status = 400, description = "Dados inválidos (VALIDATION_ERROR) ou documento fora do formato/tamanho (INVALID_ATTACHMENT)"),
        (status = 502, description = "Falha no upload (UPLOAD_FAILED)")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_case(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut draft = FormData::read(multipart, MAX_CASE_DOCUMENT_BYTES)
        .await?
        .into_case_draft()?;

    let id = app_state.case_service.create_case(&session, &mut draft).await?;

    Ok((StatusCode::CREATED, Json(CreateCaseResponse { id })))
}

// GET /api/processos/{id}
#[utoipa::path(
    get,
    path = "/api/processos/{id}",
    tag = "Processos",
    params(("id" = i64, Path, description = "ID do processo")),
    responses(
        (status = 200, description = "Detalhes do processo", body = CaseDetailView),
        (status = 404, description = "Processo indisponível para o advogado", body = CaseDetailView)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_case_detail(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let case = app_state.case_service.find_visible_case(&session, id).await?;
    let view = app_state.case_detail_service.load_case_detail(case).await;

    let status = match view {
        CaseDetailView::NaoEncontrado { .. } => StatusCode::NOT_FOUND,
        CaseDetailView::Carregado { .. } => StatusCode::OK,
    };
    Ok((status, Json(view)))
}
