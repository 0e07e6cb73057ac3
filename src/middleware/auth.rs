// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::convert::Infallible;

use crate::{common::error::AppError, config::AppState, models::auth::Session};

/// Token bruto da requisição. Cabeçalho ausente ou fora do formato
/// `Bearer` conta como requisição anônima.
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|TypedHeader(auth)| auth.token().to_string());
        Ok(BearerToken(token))
    }
}

// Guard das rotas protegidas: resolve a sessão e a coloca nos extensions.
// Sessão ausente/expirada responde 401 com a indicação de voltar ao login.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    bearer: BearerToken,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = app_state
        .auth_service
        .current(bearer.token())
        .await
        .require()?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

// Extrator para obter a sessão diretamente nos handlers
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(CurrentSession)
            .ok_or(AppError::Unauthenticated)
    }
}
