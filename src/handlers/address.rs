// src/handlers/address.rs

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{common::error::AppError, config::AppState, models::address::Address};

// GET /api/enderecos/{cep}
#[utoipa::path(
    get,
    path = "/api/enderecos/{cep}",
    tag = "Endereços",
    params(("cep" = String, Path, description = "CEP com ou sem máscara")),
    responses(
        (status = 200, description = "Endereço do CEP", body = Address),
        (status = 404, description = "CEP sem endereço (NOT_FOUND)"),
        (status = 502, description = "Consulta indisponível (LOOKUP_FAILED)")
    ),
    security(("api_jwt" = []))
)]
pub async fn lookup_address(
    State(app_state): State<AppState>,
    Path(cep): Path<String>,
) -> Result<Json<Address>, AppError> {
    let address = app_state.address_service.find(&cep).await?;
    Ok(Json(address))
}
