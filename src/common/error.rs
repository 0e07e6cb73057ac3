// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante corresponde a um código da taxonomia exposta ao frontend.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Validação de formulário feita antes de qualquer chamada externa
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0} não encontrado.")]
    NotFound(&'static str),

    #[error("Senha incorreta.")]
    InvalidCredentials,

    #[error("Sessão ausente ou expirada.")]
    Unauthenticated,

    #[error("O {0} informado já está cadastrado.")]
    DuplicateDocument(String),

    #[error("Anexo inválido: {0}")]
    InvalidAttachment(String),

    #[error("Erro ao fazer upload do arquivo: {0}")]
    UploadFailed(String),

    #[error("Erro ao gravar registro: {0}")]
    WriteFailed(String),

    // Consulta externa "best-effort" (CEP, URL assinada)
    #[error("Falha na consulta externa: {0}")]
    LookupFailed(String),

    #[error("Falha no assistente: {0}")]
    AssistantFailed(String),

    // Variante para erros de banco de dados em leituras
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Código estável da taxonomia de erros.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) | AppError::InvalidInput(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Unauthenticated => "UNAUTHENTICATED",
            AppError::DuplicateDocument(_) => "DUPLICATE_DOCUMENT",
            AppError::InvalidAttachment(_) => "INVALID_ATTACHMENT",
            AppError::UploadFailed(_) => "UPLOAD_FAILED",
            AppError::WriteFailed(_) => "WRITE_FAILED",
            AppError::LookupFailed(_) => "LOOKUP_FAILED",
            AppError::AssistantFailed(_) => "ASSISTANT_FAILED",
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => "INTERNAL_ERROR",
        }
    }

    /// Atalho para erros de validação com mensagem livre.
    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidInput(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, error_message) = match &self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "code": code,
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            // Acesso sem sessão: o frontend deve voltar para o login
            AppError::Unauthenticated => {
                let body = Json(json!({
                    "error": self.to_string(),
                    "code": code,
                    "redirect": "/login",
                }));
                return (StatusCode::UNAUTHORIZED, body).into_response();
            }
            AppError::InvalidInput(_) | AppError::InvalidAttachment(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::DuplicateDocument(_) => (StatusCode::CONFLICT, self.to_string()),
            AppError::UploadFailed(_)
            | AppError::LookupFailed(_)
            | AppError::AssistantFailed(_) => {
                tracing::warn!("Falha em colaborador externo: {}", self);
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::WriteFailed(_) => {
                tracing::error!("Falha de escrita: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message, "code": code }));
        (status, body).into_response()
    }
}
