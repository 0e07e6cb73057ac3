// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{BearerToken, CurrentSession},
    models::auth::{AuthResponse, ChangePasswordPayload, LawyerProfile, LoginPayload},
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login realizado", body = AuthResponse),
        (status = 401, description = "Senha incorreta (INVALID_CREDENTIALS)"),
        (status = 404, description = "OAB não cadastrada (NOT_FOUND)")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let response = app_state
        .auth_service
        .login(&payload.oab, &payload.password)
        .await?;

    Ok(Json(response))
}

// POST /api/auth/logout
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses(
        (status = 204, description = "Sessão encerrada (idempotente)")
    )
)]
pub async fn logout(State(app_state): State<AppState>, bearer: BearerToken) -> StatusCode {
    app_state.auth_service.logout(bearer.token()).await;
    StatusCode::NO_CONTENT
}

// GET /api/advogados/me
#[utoipa::path(
    get,
    path = "/api/advogados/me",
    tag = "Perfil",
    responses(
        (status = 200, description = "Dados do advogado logado", body = LawyerProfile),
        (status = 401, description = "Sessão ausente (UNAUTHENTICATED)")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_profile(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<LawyerProfile>, AppError> {
    let profile = app_state.auth_service.profile(&session).await?;
    Ok(Json(profile))
}

// PUT /api/advogados/me/senha
#[utoipa::path(
    put,
    path = "/api/advogados/me/senha",
    tag = "Perfil",
    request_body = ChangePasswordPayload,
    responses(
        (status = 204, description = "Senha alterada"),
        (status = 400, description = "Senha vazia (VALIDATION_ERROR)")
    ),
    security(("api_jwt" = []))
)]
pub async fn change_password(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .auth_service
        .change_password(&session, &payload.senha)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
