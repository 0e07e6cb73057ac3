// src/services/movement_service.rs

use std::sync::Arc;

use crate::{
    common::{error::AppError, filename::case_file_path},
    db::CaseStore,
    models::{
        auth::Session,
        movement::{CreateMovementResponse, DocumentKind, MovementDraft, NewMovement},
    },
    storage::BlobStore,
};

#[derive(Clone)]
pub struct MovementService {
    cases: Arc<dyn CaseStore>,
    blobs: Arc<dyn BlobStore>,
}

impl MovementService {
    pub fn new(cases: Arc<dyn CaseStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { cases, blobs }
    }

    /// Registra uma movimentação no processo `case_id` do cliente escolhido.
    ///
    /// Os anexos são enviados um por vez, na ordem do formulário. Só o
    /// primeiro anexo com tipo selecionado fica referenciado na linha.
    pub async fn add_movement(
        &self,
        session: &Session,
        case_id: i64,
        client_id: i64,
        draft: &mut MovementDraft,
    ) -> Result<CreateMovementResponse, AppError> {
        let data = draft
            .data
            .ok_or_else(|| AppError::invalid("Informe a data da movimentação."))?;
        if draft.anexos.iter().all(|slot| slot.arquivo.is_none()) {
            return Err(AppError::invalid("Nenhum arquivo válido foi adicionado."));
        }

        let case = self
            .cases
            .list_cases_for_client(session.lawyer_id(), client_id)
            .await?
            .into_iter()
            .find(|c| c.id == case_id)
            .ok_or_else(|| AppError::invalid("Processo não encontrado para o cliente selecionado."))?;

        let mut uploaded: Vec<(String, Option<DocumentKind>)> = Vec::new();
        for slot in &draft.anexos {
            let Some(file) = &slot.arquivo else { continue };
            let path = case_file_path(&case.numero, &file.file_name);
            self.blobs.upload(&path, file, true).await?;
            uploaded.push((path, slot.tipo));
        }

        let referenced = uploaded
            .iter()
            .position(|(_, tipo)| tipo.is_some());
        let (arquivo_url, tipo_documento) = match referenced {
            Some(i) => (Some(uploaded[i].0.clone()), uploaded[i].1),
            None => (None, None),
        };
        for (i, (path, _)) in uploaded.iter().enumerate() {
            if Some(i) != referenced {
                tracing::info!(path = %path, processo = case.id, "Anexo enviado sem referência na movimentação");
            }
        }

        let movement = NewMovement {
            processo_id: case.id,
            cliente_id: client_id,
            data_movimentacao: data,
            resumo: draft.resumo.trim().to_string(),
            tipo_documento,
            arquivo_url,
        };

        let id = match self.cases.insert_movement(&movement).await {
            Ok(id) => id,
            Err(e) => {
                for (path, _) in &uploaded {
                    tracing::warn!(path = %path, "Movimentação não gravada; arquivo fica órfão no storage");
                }
                return Err(e);
            }
        };

        tracing::info!(movimentacao = id, processo = case.id, "Movimentação registrada");
        draft.reset();
        Ok(CreateMovementResponse {
            id,
            arquivos_enviados: uploaded.into_iter().map(|(path, _)| path).collect(),
        })
    }
}
