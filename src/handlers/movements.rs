// src/handlers/movements.rs

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::multipart::{FormData, MAX_MOVEMENT_BODY_BYTES},
    middleware::auth::CurrentSession,
    models::movement::CreateMovementResponse,
};

// POST /api/processos/{id}/movimentacoes
#[utoipa::path(
    post,
    path = "/api/processos/{id}/movimentacoes",
    tag = "Processos",
    params(("id" = i64, Path, description = "ID do processo")),
    request_body(
        content_type = "multipart/form-data",
        description = "cliente_id, data (AAAA-MM-DD), resumo e anexos em pares arquivo_{n} / tipo_{n}"
    ),
    responses(
        (status = 201, description = "Movimentação registrada", body = CreateMovementResponse),
        (status = 400, description = "Dados inválidos (VALIDATION_ERROR) ou envio grande demais (INVALID_ATTACHMENT)"),
        (status = 502, description = "Falha no upload (UPLOAD_FAILED)")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_movement(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(case_id): Path<i64>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = FormData::read(multipart, MAX_MOVEMENT_BODY_BYTES).await?;
    let client_id = form
        .id("cliente_id")?
        .ok_or_else(|| AppError::invalid("Selecione o cliente."))?;
    let mut draft = form.into_movement_draft()?;

    let created = app_state
        .movement_service
        .add_movement(&session, case_id, client_id, &mut draft)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}
