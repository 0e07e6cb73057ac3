// src/services/case_service.rs

use chrono::Utc;
use std::{collections::HashSet, sync::Arc};

use crate::{
    common::{
        error::AppError,
        filename::{case_prefix, unique_name},
        format::parse_brl,
    },
    db::{CaseStore, ClientStore},
    models::{
        auth::Session,
        case::{Case, CaseDraft, CaseSummary, NewCase, UploadFile, MAX_CASE_DOCUMENT_BYTES, PDF_MIME},
        client::{ClientBrief, ClientOption},
        dashboard::DashboardSummary,
    },
    services::client_service::selectable_clients,
    storage::BlobStore,
};

/// O documento principal precisa ser um PDF de até 10 MiB.
pub fn check_case_document(file: &UploadFile) -> Result<(), AppError> {
    if file.content_type != PDF_MIME {
        return Err(AppError::InvalidAttachment(format!(
            "o documento do processo deve ser PDF (recebido '{}')",
            file.content_type
        )));
    }
    if file.size() > MAX_CASE_DOCUMENT_BYTES {
        return Err(AppError::InvalidAttachment(
            "o documento do processo deve ter no máximo 10 MB".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct CaseService {
    cases: Arc<dyn CaseStore>,
    clients: Arc<dyn ClientStore>,
    blobs: Arc<dyn BlobStore>,
}

impl CaseService {
    pub fn new(
        cases: Arc<dyn CaseStore>,
        clients: Arc<dyn ClientStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self { cases, clients, blobs }
    }

    pub async fn selectable_clients(&self, session: &Session) -> Result<Vec<ClientOption>, AppError> {
        selectable_clients(self.clients.as_ref(), session.lawyer_id()).await
    }

    /// Cadastra o processo. Toda validação local acontece antes de qualquer
    /// chamada ao banco ou ao storage.
    pub async fn create_case(&self, session: &Session, draft: &mut CaseDraft) -> Result<i64, AppError> {
        let numero = draft.numero.trim().to_string();
        if numero.is_empty() {
            return Err(AppError::invalid("Informe o número do processo."));
        }
        let cliente_id = draft
            .cliente_id
            .ok_or_else(|| AppError::invalid("Selecione o cliente do processo."))?;
        let valor_causa = parse_brl(&draft.valor_causa)?;
        if let Some(file) = &draft.documento {
            check_case_document(file)?;
        }

        let selectable = self.selectable_clients(session).await?;
        if !selectable.iter().any(|c| c.id == cliente_id) {
            return Err(AppError::invalid("Cliente não disponível para este advogado."));
        }

        let now = Utc::now();
        let pdf_path = match &draft.documento {
            Some(file) => {
                let path = format!("{}/{}", case_prefix(&numero), unique_name(&file.file_name, now));
                self.blobs.upload(&path, file, false).await?;
                Some(path)
            }
            None => None,
        };

        let case = NewCase {
            numero,
            descricao: draft.descricao.trim().to_string(),
            polo_ativo: draft.polo_ativo.trim().to_string(),
            polo_passivo: draft.polo_passivo.trim().to_string(),
            valor_causa,
            pdf_path,
            cliente_id,
            advogado_id: session.lawyer_id(),
            created_at: now,
            updated_at: now,
        };

        let id = match self.cases.insert_case(&case).await {
            Ok(id) => id,
            Err(e) => {
                if let Some(path) = &case.pdf_path {
                    tracing::warn!(path = %path, "Processo não gravado; arquivo fica órfão no storage");
                }
                return Err(e);
            }
        };

        tracing::info!(processo = id, numero = %case.numero, "Processo cadastrado");
        draft.reset();
        Ok(id)
    }

    pub async fn list_cases(&self, session: &Session) -> Result<Vec<CaseSummary>, AppError> {
        self.cases.list_cases_by_lawyer(session.lawyer_id()).await
    }

    pub async fn list_cases_for_client(
        &self,
        session: &Session,
        client_id: i64,
    ) -> Result<Vec<CaseSummary>, AppError> {
        self.cases
            .list_cases_for_client(session.lawyer_id(), client_id)
            .await
    }

    /// Clientes distintos que aparecem nos processos do advogado.
    pub async fn clients_with_cases(&self, session: &Session) -> Result<Vec<ClientBrief>, AppError> {
        let cases = self.list_cases(session).await?;
        Ok(distinct_clients(&cases))
    }

    /// Processo do advogado da sessão; processos de outros advogados não
    /// existem para ele.
    pub async fn find_visible_case(&self, session: &Session, id: i64) -> Result<Option<Case>, AppError> {
        let case = self.cases.find_case(id).await?;
        Ok(case.filter(|c| c.advogado_id == session.lawyer_id()))
    }

    pub async fn dashboard(&self, session: &Session) -> Result<DashboardSummary, AppError> {
        let cases = self.list_cases(session).await?;
        Ok(DashboardSummary {
            advogado: session.lawyer.nome_completo.clone(),
            oab: session.lawyer.oab.clone(),
            total_processos: cases.len(),
            total_clientes: distinct_clients(&cases).len(),
        })
    }
}

fn distinct_clients(cases: &[CaseSummary]) -> Vec<ClientBrief> {
    let mut seen = HashSet::new();
    let mut clients: Vec<ClientBrief> = cases
        .iter()
        .filter(|c| seen.insert(c.cliente_id))
        .map(|c| ClientBrief {
            id: c.cliente_id,
            nome_completo: c.cliente_nome.clone().unwrap_or_default(),
        })
        .collect();
    clients.sort_by(|a, b| a.nome_completo.cmp(&b.nome_completo));
    clients
}
