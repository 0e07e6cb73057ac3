// src/models/case.rs

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::movement::Movement;

/// Tamanho máximo do PDF principal do processo (10 MiB).
pub const MAX_CASE_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;
pub const PDF_MIME: &str = "application/pdf";

// --- PROCESSO (como está no banco) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Case {
    pub id: i64,
    #[schema(example = "0001/2024")]
    pub numero: String,
    pub descricao: String,
    pub polo_ativo: String,
    pub polo_passivo: String,
    #[schema(example = "1234.56")]
    pub valor_causa: Decimal,
    pub pdf_path: Option<String>,
    pub cliente_id: i64,
    pub advogado_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Linha das listagens: processo + nome do cliente e do advogado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CaseSummary {
    pub id: i64,
    pub numero: String,
    pub descricao: String,
    pub valor_causa: Decimal,
    pub cliente_id: i64,
    pub cliente_nome: Option<String>,
    pub advogado_id: i64,
    pub advogado_nome: Option<String>,
}

/// Processo pronto para inserção.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCase {
    pub numero: String,
    pub descricao: String,
    pub polo_ativo: String,
    pub polo_passivo: String,
    pub valor_causa: Decimal,
    pub pdf_path: Option<String>,
    pub cliente_id: i64,
    pub advogado_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Arquivo recebido num formulário.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Estado do formulário "Adicionar Processo".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseDraft {
    pub numero: String,
    pub descricao: String,
    pub cliente_id: Option<i64>,
    pub polo_ativo: String,
    pub polo_passivo: String,
    // Texto com máscara de moeda, ex.: "R$ 1.234,56"
    pub valor_causa: String,
    pub documento: Option<UploadFile>,
}

impl CaseDraft {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// --- DETALHES DO PROCESSO ---

/// Visão agregada com nomes do cliente/advogado e movimentações aninhadas.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CaseOverview {
    pub id: i64,
    pub numero: String,
    pub valor_causa: Decimal,
    pub created_at: DateTime<Utc>,
    pub cliente_nome: Option<String>,
    pub advogado_nome: Option<String>,
    pub movimentacoes: Vec<MovementDigest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MovementDigest {
    #[schema(value_type = String, format = Date)]
    pub data_movimentacao: NaiveDate,
    pub resumo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SignedAttachment {
    pub nome: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CaseDetail {
    pub processo: Case,
    pub cliente_nome: Option<String>,
    pub advogado_nome: Option<String>,
    pub valor_formatado: String,
    pub movimentacoes: Vec<Movement>,
    pub ultima_movimentacao: Option<MovementDigest>,
    pub possui_movimentacoes: bool,
    pub anexos: Vec<SignedAttachment>,
}

/// Resultado da tela de detalhes: ou o processo carregado, ou o estado
/// terminal "não encontrado" com uma única ação de voltar.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "estado", rename_all = "snake_case")]
pub enum CaseDetailView {
    NaoEncontrado { mensagem: String, voltar: String },
    Carregado { detalhe: Box<CaseDetail> },
}

impl CaseDetailView {
    pub fn not_found() -> Self {
        CaseDetailView::NaoEncontrado {
            mensagem: "Não foi possível carregar os detalhes do processo.".to_string(),
            voltar: "/processos".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateCaseResponse {
    pub id: i64,
}
