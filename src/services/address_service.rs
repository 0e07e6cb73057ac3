// src/services/address_service.rs

use async_trait::async_trait;
use serde::Deserialize;
use std::{sync::Arc, time::Duration};

use crate::{
    common::{error::AppError, format::normalize_cep},
    models::address::{Address, LookupState, PostalCodeField},
};

/// Consulta de endereço por CEP. `Ok(None)` = CEP sem endereço.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup(&self, cep: &str) -> Result<Option<Address>, AppError>;
}

// Resposta do BrasilAPI (cep/v1)
#[derive(Debug, Deserialize)]
struct BrasilApiAddress {
    #[serde(default)]
    street: Option<String>,
    #[serde(default)]
    neighborhood: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

impl From<BrasilApiAddress> for Address {
    fn from(body: BrasilApiAddress) -> Self {
        Address {
            logradouro: body.street.unwrap_or_default(),
            bairro: body.neighborhood.unwrap_or_default(),
            cidade: body.city.unwrap_or_default(),
            estado: body.state.unwrap_or_default(),
        }
    }
}

pub struct BrasilApiLookup {
    http: reqwest::Client,
    base_url: String,
}

impl BrasilApiLookup {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AddressLookup for BrasilApiLookup {
    async fn lookup(&self, cep: &str) -> Result<Option<Address>, AppError> {
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, cep))
            .send()
            .await
            .map_err(|e| AppError::LookupFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AppError::LookupFailed(format!("status {}", response.status())));
        }

        let body: BrasilApiAddress = response
            .json()
            .await
            .map_err(|e| AppError::LookupFailed(e.to_string()))?;
        Ok(Some(body.into()))
    }
}

#[derive(Clone)]
pub struct AddressService {
    lookup: Arc<dyn AddressLookup>,
}

impl AddressService {
    pub fn new(lookup: Arc<dyn AddressLookup>) -> Self {
        Self { lookup }
    }

    /// Conclui uma consulta pendente do campo de CEP. Falhas viram aviso
    /// no próprio campo e nunca interrompem o formulário.
    pub async fn resolve_pending(&self, field: &mut PostalCodeField) {
        let LookupState::LookingUp { cep } = field.state().clone() else {
            return;
        };

        let result = match self.lookup.lookup(&cep).await {
            Ok(found) => Ok(found),
            Err(e) => {
                tracing::warn!(cep = %cep, "Falha ao consultar CEP: {}", e);
                Err(e.to_string())
            }
        };
        field.complete(&cep, result);
    }

    /// Prefill de endereço para o formulário.
    pub async fn find(&self, raw_cep: &str) -> Result<Address, AppError> {
        let cep = normalize_cep(raw_cep)?;
        self.lookup
            .lookup(&cep)
            .await?
            .ok_or(AppError::NotFound("Endereço"))
    }
}
