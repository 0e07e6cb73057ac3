// src/handlers/assistant.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::assistant::{AskPayload, AskResponse},
};

// POST /api/assistente
#[utoipa::path(
    post,
    path = "/api/assistente",
    tag = "Assistente",
    request_body = AskPayload,
    responses(
        (status = 200, description = "Resposta do assistente", body = AskResponse),
        (status = 400, description = "Mensagem vazia (VALIDATION_ERROR)"),
        (status = 502, description = "Assistente indisponível (ASSISTANT_FAILED)")
    ),
    security(("api_jwt" = []))
)]
pub async fn ask(
    State(app_state): State<AppState>,
    Json(payload): Json<AskPayload>,
) -> Result<Json<AskResponse>, AppError> {
    payload.validate()?;

    let resposta = app_state.assistant_service.ask(&payload.mensagem).await?;
    Ok(Json(AskResponse { resposta }))
}
