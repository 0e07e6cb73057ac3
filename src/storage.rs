// src/storage.rs
//
// Contrato do storage de arquivos dos processos.

use async_trait::async_trait;
use serde::Deserialize;

use crate::{common::error::AppError, models::case::UploadFile};

pub mod rest;
pub use rest::RestBlobStore;

/// Validade das URLs assinadas geradas para os anexos (segundos).
pub const SIGNED_URL_TTL_SECS: u64 = 300;
/// Máximo de arquivos listados por processo.
pub const LIST_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlobEntry {
    pub name: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Grava o arquivo em `path`. Com `overwrite`, um arquivo existente no
    /// mesmo caminho é substituído.
    async fn upload(&self, path: &str, file: &UploadFile, overwrite: bool) -> Result<(), AppError>;

    /// Lista os arquivos diretamente abaixo de `prefix`.
    async fn list(&self, prefix: &str, limit: usize) -> Result<Vec<BlobEntry>, AppError>;

    /// Gera um link temporário de leitura.
    async fn create_signed_url(&self, path: &str, ttl_secs: u64) -> Result<String, AppError>;
}
