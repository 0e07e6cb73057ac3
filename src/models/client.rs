// src/models/client.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        format::{format_document, format_phone, normalize_cep},
    },
    models::address::{Address, PostalCodeField},
};

// --- ENUMS ---

// Mapeia o CREATE TYPE tipo_documento do banco
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_documento", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[default]
    Cpf,
    Cnpj,
}

impl DocumentType {
    pub fn label(self) -> &'static str {
        match self {
            DocumentType::Cpf => "CPF",
            DocumentType::Cnpj => "CNPJ",
        }
    }

    pub fn digit_count(self) -> usize {
        match self {
            DocumentType::Cpf => 11,
            DocumentType::Cnpj => 14,
        }
    }

    pub fn mask(self) -> &'static str {
        match self {
            DocumentType::Cpf => "999.999.999-99",
            DocumentType::Cnpj => "99.999.999/9999-99",
        }
    }
}

// --- CLIENTE (como está no banco) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Client {
    pub id: i64,
    pub nome_completo: String,
    pub tipo_documento: DocumentType,
    pub documento: String,
    pub email: String,
    pub telefone: String,
    pub telefone_extra: Option<String>,
    pub cep: String,
    pub logradouro: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub numero: String,
    pub complemento: Option<String>,
    pub rg: Option<String>,
    pub cnh: Option<String>,
    pub advogado_id: Option<i64>,
    pub tipo_cadastro: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
}

/// Opção de cliente nos seletores (id + nome + dono direto).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClientOption {
    pub id: i64,
    pub nome_completo: String,
    pub advogado_id: Option<i64>,
}

/// Cliente que aparece nos processos do advogado (listagens).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ClientBrief {
    pub id: i64,
    pub nome_completo: String,
}

// --- ENTRADA TIPADA ---

/// Cliente validado, pronto para gravação. Campos opcionais vazios já
/// chegaram aqui como `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientInput {
    pub nome_completo: String,
    pub tipo_documento: DocumentType,
    pub documento: String,
    pub email: String,
    pub telefone: String,
    pub telefone_extra: Option<String>,
    pub cep: String,
    pub endereco: Option<Address>,
    pub numero: String,
    pub complemento: Option<String>,
    pub rg: Option<String>,
    pub cnh: Option<String>,
}

/// Linha completa enviada ao banco num insert/update.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRecord {
    pub input: ClientInput,
    pub advogado_id: i64,
    pub actor: String,
    pub at: DateTime<Utc>,
}

// --- ESTADO DO FORMULÁRIO ---

/// Estado transitório do formulário de cliente, do jeito que foi digitado.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientDraft {
    pub nome_completo: String,
    pub tipo_documento: DocumentType,
    pub documento: String,
    pub email: String,
    pub telefone: String,
    pub telefone_extra: String,
    pub cep: PostalCodeField,
    pub numero: String,
    pub complemento: String,
    pub rg: String,
    pub cnh: String,
}

/// "string vazia" vira ausência explícita
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn required(value: &str, field: &str) -> Result<String, AppError> {
    non_empty(value).ok_or_else(|| AppError::invalid(format!("O campo {field} é obrigatório.")))
}

impl ClientDraft {
    /// Preenche o formulário a partir de um cliente existente (edição).
    pub fn from_client(client: &Client) -> Self {
        let endereco = Address {
            logradouro: client.logradouro.clone().unwrap_or_default(),
            bairro: client.bairro.clone().unwrap_or_default(),
            cidade: client.cidade.clone().unwrap_or_default(),
            estado: client.estado.clone().unwrap_or_default(),
        };
        Self {
            nome_completo: client.nome_completo.clone(),
            tipo_documento: client.tipo_documento,
            documento: client.documento.clone(),
            email: client.email.clone(),
            telefone: client.telefone.clone(),
            telefone_extra: client.telefone_extra.clone().unwrap_or_default(),
            cep: PostalCodeField::resolved(&client.cep, endereco),
            numero: client.numero.clone(),
            complemento: client.complemento.clone().unwrap_or_default(),
            rg: client.rg.clone().unwrap_or_default(),
            cnh: client.cnh.clone().unwrap_or_default(),
        }
    }

    /// Volta todos os campos ao padrão.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Valida o formulário (sem tocar em nenhum colaborador externo).
    pub fn to_input(&self) -> Result<ClientInput, AppError> {
        let nome_completo = required(&self.nome_completo, "nome completo")?;
        let documento = required(&self.documento, "documento")?;
        let email = required(&self.email, "e-mail")?;
        let telefone = required(&self.telefone, "telefone")?;
        let cep = required(self.cep.value(), "CEP")?;
        let numero = required(&self.numero, "número")?;

        let documento = format_document(self.tipo_documento, &documento)?;
        if !validator::ValidateEmail::validate_email(&email) {
            return Err(AppError::invalid(format!("E-mail inválido: '{email}'.")));
        }
        let telefone = format_phone(&telefone)?;
        let telefone_extra = non_empty(&self.telefone_extra)
            .map(|t| format_phone(&t))
            .transpose()?;
        let cep = normalize_cep(&cep)?;

        Ok(ClientInput {
            nome_completo,
            tipo_documento: self.tipo_documento,
            documento,
            email,
            telefone,
            telefone_extra,
            cep,
            endereco: self.cep.address().cloned(),
            numero,
            complemento: non_empty(&self.complemento),
            rg: non_empty(&self.rg),
            cnh: non_empty(&self.cnh),
        })
    }
}

// --- PAYLOAD DA API ---

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct ClientPayload {
    #[validate(length(min = 1, message = "O campo nome completo é obrigatório."))]
    #[schema(example = "Maria da Silva")]
    pub nome_completo: String,
    pub tipo_documento: DocumentType,
    #[validate(length(min = 1, message = "O campo documento é obrigatório."))]
    #[schema(example = "123.456.789-01")]
    pub documento: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "O campo telefone é obrigatório."))]
    #[schema(example = "(11) 98765-4321")]
    pub telefone: String,
    pub telefone_extra: String,
    #[validate(length(min = 1, message = "O campo CEP é obrigatório."))]
    #[schema(example = "01310-100")]
    pub cep: String,
    #[validate(length(min = 1, message = "O campo número é obrigatório."))]
    pub numero: String,
    pub complemento: String,
    pub rg: String,
    pub cnh: String,
}

impl ClientPayload {
    /// Aplica o que foi digitado sobre o formulário. O CEP passa pela
    /// máquina de estados: se virou um código novo, fica pendente de consulta.
    pub fn apply_to(self, draft: &mut ClientDraft) {
        draft.nome_completo = self.nome_completo;
        draft.tipo_documento = self.tipo_documento;
        draft.documento = self.documento;
        draft.email = self.email;
        draft.telefone = self.telefone;
        draft.telefone_extra = self.telefone_extra;
        draft.cep.on_input(&self.cep);
        draft.numero = self.numero;
        draft.complemento = self.complemento;
        draft.rg = self.rg;
        draft.cnh = self.cnh;
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UpsertClientResponse {
    pub id: i64,
    // Aviso não bloqueante (ex.: CEP não encontrado)
    pub aviso: Option<String>,
}
