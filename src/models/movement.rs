// src/models/movement.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::case::UploadFile;

// Mapeia o CREATE TYPE tipo_anexo do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_anexo")]
pub enum DocumentKind {
    #[sqlx(rename = "documento pessoal")]
    #[serde(rename = "documento pessoal")]
    DocumentoPessoal,
    #[sqlx(rename = "evidencia")]
    #[serde(rename = "evidencia")]
    Evidencia,
    #[sqlx(rename = "movimentacao")]
    #[serde(rename = "movimentacao")]
    Movimentacao,
    #[sqlx(rename = "processo")]
    #[serde(rename = "processo")]
    Processo,
}

impl DocumentKind {
    /// Converte o valor enviado pelo formulário; vazio significa "sem tipo".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "documento pessoal" => Some(DocumentKind::DocumentoPessoal),
            "evidencia" => Some(DocumentKind::Evidencia),
            "movimentacao" => Some(DocumentKind::Movimentacao),
            "processo" => Some(DocumentKind::Processo),
            _ => None,
        }
    }
}

// --- MOVIMENTAÇÃO (informacao_adicional_processo) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Movement {
    pub id: i64,
    pub processo_id: i64,
    pub cliente_id: i64,
    #[schema(value_type = String, format = Date)]
    pub data_movimentacao: NaiveDate,
    pub resumo: String,
    pub tipo_documento: Option<DocumentKind>,
    pub arquivo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMovement {
    pub processo_id: i64,
    pub cliente_id: i64,
    pub data_movimentacao: NaiveDate,
    pub resumo: String,
    pub tipo_documento: Option<DocumentKind>,
    pub arquivo_url: Option<String>,
}

/// Uma linha de anexo no formulário: arquivo escolhido + tipo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachmentSlot {
    pub arquivo: Option<UploadFile>,
    pub tipo: Option<DocumentKind>,
}

/// Estado do formulário "Adicionar Informação ao Processo".
#[derive(Debug, Clone, PartialEq)]
pub struct MovementDraft {
    pub data: Option<NaiveDate>,
    pub resumo: String,
    pub anexos: Vec<AttachmentSlot>,
}

impl Default for MovementDraft {
    fn default() -> Self {
        Self {
            data: None,
            resumo: String::new(),
            // O formulário sempre começa com uma linha de anexo vazia
            anexos: vec![AttachmentSlot::default()],
        }
    }
}

impl MovementDraft {
    pub fn add_slot(&mut self) {
        self.anexos.push(AttachmentSlot::default());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateMovementResponse {
    pub id: i64,
    // Arquivos enviados ao storage, na ordem dos anexos
    pub arquivos_enviados: Vec<String>,
}
