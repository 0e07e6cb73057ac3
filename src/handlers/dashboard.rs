// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError, config::AppState, middleware::auth::CurrentSession,
    models::dashboard::DashboardSummary,
};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo do advogado", body = DashboardSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = app_state.case_service.dashboard(&session).await?;
    Ok(Json(summary))
}
