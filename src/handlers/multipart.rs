// src/handlers/multipart.rs
//
// Leitura dos formulários multipart (processo e movimentação).

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart},
    http::StatusCode,
};
use bytes::BytesMut;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

use crate::{
    common::{error::AppError, format::mask_currency_input},
    models::{
        case::{CaseDraft, UploadFile, MAX_CASE_DOCUMENT_BYTES},
        movement::{AttachmentSlot, DocumentKind, MovementDraft},
    },
};

pub const MAX_MOVEMENT_BODY_BYTES: usize = 64 * 1024 * 1024;

// Folga para os campos de texto além do PDF de 10 MiB
pub fn case_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_CASE_DOCUMENT_BYTES + 1024 * 1024)
}

pub fn movement_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_MOVEMENT_BODY_BYTES)
}

// Corpo acima do DefaultBodyLimit também é anexo grande demais
fn read_error(e: MultipartError, context: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::InvalidAttachment("o envio excede o tamanho máximo permitido".to_string())
    } else {
        AppError::invalid(format!("{context}: {e}"))
    }
}

/// Campos de texto e arquivos de um formulário, por nome do campo.
#[derive(Debug, Default)]
pub struct FormData {
    pub fields: HashMap<String, String>,
    pub files: Vec<(String, UploadFile)>,
}

impl FormData {
    /// Lê o formulário inteiro. Cada arquivo é lido em pedaços e recusado
    /// com `INVALID_ATTACHMENT` assim que passa de `max_file_bytes`.
    pub async fn read(mut multipart: Multipart, max_file_bytes: usize) -> Result<Self, AppError> {
        let mut form = FormData::default();

        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| read_error(e, "Formulário inválido"))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let mut bytes = BytesMut::new();
                    while let Some(chunk) = field
                        .chunk()
                        .await
                        .map_err(|e| read_error(e, "Falha ao ler o arquivo"))?
                    {
                        if bytes.len() + chunk.len() > max_file_bytes {
                            return Err(AppError::InvalidAttachment(format!(
                                "o arquivo '{file_name}' excede o limite de {} MB",
                                max_file_bytes / (1024 * 1024)
                            )));
                        }
                        bytes.extend_from_slice(&chunk);
                    }
                    let bytes = bytes.freeze();
                    // Campo de arquivo sem nada selecionado
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files.push((
                        name,
                        UploadFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    ));
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| read_error(e, &format!("Campo '{name}' inválido")))?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    pub fn id(&self, name: &str) -> Result<Option<i64>, AppError> {
        let raw = self.text(name);
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse()
            .map(Some)
            .map_err(|_| AppError::invalid(format!("Valor inválido para '{name}'.")))
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadFile> {
        let index = self.files.iter().position(|(field, _)| field == name)?;
        Some(self.files.remove(index).1)
    }

    /// Formulário "Adicionar Processo". O honorário chega mascarado
    /// (`R$ 1.234,56`) ou como os dígitos digitados, lidos em centavos.
    pub fn into_case_draft(mut self) -> Result<CaseDraft, AppError> {
        let valor = self.text("valor_causa");
        let valor_causa = if !valor.is_empty() && valor.chars().all(|c| c.is_ascii_digit()) {
            mask_currency_input(&valor)
        } else {
            valor
        };

        Ok(CaseDraft {
            numero: self.text("numero"),
            descricao: self.text("descricao"),
            cliente_id: self.id("cliente_id")?,
            polo_ativo: self.text("polo_ativo"),
            polo_passivo: self.text("polo_passivo"),
            valor_causa,
            documento: self.take_file("documento"),
        })
    }

    /// Formulário "Adicionar Informação". Os anexos chegam como pares
    /// `arquivo_{n}` / `tipo_{n}` e mantêm a ordem de `n`.
    pub fn into_movement_draft(self) -> Result<MovementDraft, AppError> {
        let data = match self.text("data").trim() {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| AppError::invalid(format!("Data inválida: '{raw}'.")))?,
            ),
        };

        let mut slots: BTreeMap<u32, AttachmentSlot> = BTreeMap::new();
        for (name, value) in &self.fields {
            if let Some(n) = slot_index(name, "tipo_") {
                slots.entry(n).or_default().tipo = DocumentKind::parse(value);
            }
        }
        for (name, file) in self.files {
            if let Some(n) = slot_index(&name, "arquivo_") {
                slots.entry(n).or_default().arquivo = Some(file);
            }
        }

        let mut draft = MovementDraft {
            data,
            resumo: self.fields.get("resumo").cloned().unwrap_or_default(),
            anexos: slots.into_values().collect(),
        };
        if draft.anexos.is_empty() {
            draft.add_slot();
        }
        Ok(draft)
    }
}

fn slot_index(name: &str, prefix: &str) -> Option<u32> {
    name.strip_prefix(prefix)?.parse().ok()
}
