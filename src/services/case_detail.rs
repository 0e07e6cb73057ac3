// src/services/case_detail.rs
//
// Montagem da tela de detalhes: movimentações, visão com nomes e anexos
// assinados, buscados em paralelo e com falhas independentes.

use futures::future::join_all;
use std::sync::Arc;

use crate::{
    common::{error::AppError, filename::case_prefix, format::format_brl},
    db::CaseStore,
    models::{
        case::{Case, CaseDetail, CaseDetailView, MovementDigest, SignedAttachment},
        movement::Movement,
    },
    storage::{BlobStore, LIST_LIMIT, SIGNED_URL_TTL_SECS},
};

/// Movimentação mais recente por data. Em empate vale a que aparece
/// primeiro na lista.
pub fn latest_movement(movements: &[MovementDigest]) -> Option<MovementDigest> {
    movements
        .iter()
        .fold(None::<&MovementDigest>, |best, m| match best {
            Some(b) if b.data_movimentacao >= m.data_movimentacao => Some(b),
            _ => Some(m),
        })
        .cloned()
}

#[derive(Clone)]
pub struct CaseDetailService {
    cases: Arc<dyn CaseStore>,
    blobs: Arc<dyn BlobStore>,
}

impl CaseDetailService {
    pub fn new(cases: Arc<dyn CaseStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { cases, blobs }
    }

    pub async fn load_case_detail(&self, case: Option<Case>) -> CaseDetailView {
        let Some(case) = case else {
            return CaseDetailView::not_found();
        };

        let prefix = case_prefix(&case.numero);
        let (movements, overview, anexos) = tokio::join!(
            self.cases.list_movements(case.id),
            self.cases.fetch_overview(case.id),
            self.signed_attachments(&prefix),
        );

        let movimentacoes: Vec<Movement> = movements.unwrap_or_else(|e| {
            tracing::warn!(processo = case.id, "Falha ao buscar movimentações: {}", e);
            Vec::new()
        });

        let overview = overview.unwrap_or_else(|e| {
            tracing::warn!(processo = case.id, "Falha ao buscar dados do processo: {}", e);
            None
        });

        // A visão aninhada é a fonte da "última movimentação"; sem ela,
        // usa-se a lista carregada
        let digests: Vec<MovementDigest> = match &overview {
            Some(o) if !o.movimentacoes.is_empty() => o.movimentacoes.clone(),
            _ => movimentacoes
                .iter()
                .map(|m| MovementDigest {
                    data_movimentacao: m.data_movimentacao,
                    resumo: m.resumo.clone(),
                })
                .collect(),
        };
        let ultima_movimentacao = latest_movement(&digests);

        let anexos = anexos.unwrap_or_else(|e| {
            tracing::warn!(prefix = %prefix, "Falha ao listar anexos: {}", e);
            Vec::new()
        });

        let (cliente_nome, advogado_nome) = match overview {
            Some(o) => (o.cliente_nome, o.advogado_nome),
            None => (None, None),
        };

        CaseDetailView::Carregado {
            detalhe: Box::new(CaseDetail {
                valor_formatado: format_brl(case.valor_causa),
                processo: case,
                cliente_nome,
                advogado_nome,
                possui_movimentacoes: ultima_movimentacao.is_some(),
                ultima_movimentacao,
                movimentacoes,
                anexos,
            }),
        }
    }

    /// Lista os arquivos do processo e assina cada um. Arquivos cuja
    /// assinatura falha ficam de fora.
    async fn signed_attachments(&self, prefix: &str) -> Result<Vec<SignedAttachment>, AppError> {
        let entries = self.blobs.list(prefix, LIST_LIMIT).await?;

        let signing = entries
            .into_iter()
            // Marcadores de pasta vazia do storage
            .filter(|e| !e.name.starts_with('.'))
            .map(|entry| async move {
                let path = format!("{prefix}/{}", entry.name);
                match self.blobs.create_signed_url(&path, SIGNED_URL_TTL_SECS).await {
                    Ok(url) => Some(SignedAttachment { nome: entry.name, url }),
                    Err(e) => {
                        tracing::warn!(path = %path, "Falha ao gerar URL assinada: {}", e);
                        None
                    }
                }
            });

        Ok(join_all(signing).await.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{BlobCall, FakeBlobStore, MemoryStore};
    use chrono::NaiveDate;

    fn digest(y: i32, m: u32, d: u32, resumo: &str) -> MovementDigest {
        MovementDigest {
            data_movimentacao: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            resumo: resumo.into(),
        }
    }

    fn loaded(view: CaseDetailView) -> CaseDetail {
        match view {
            CaseDetailView::Carregado { detalhe } => *detalhe,
            other => panic!("esperava detalhes carregados, veio {other:?}"),
        }
    }

    #[test]
    fn latest_is_the_max_date_and_ties_keep_the_first() {
        let list = vec![
            digest(2024, 1, 5, "a"),
            digest(2024, 3, 1, "b"),
            digest(2024, 3, 1, "c"),
            digest(2023, 12, 31, "d"),
        ];
        assert_eq!(latest_movement(&list).unwrap().resumo, "b");
        assert_eq!(latest_movement(&[]), None);
    }

    #[tokio::test]
    async fn missing_context_makes_no_calls() {
        let store = Arc::new(MemoryStore::default());
        let blobs = Arc::new(FakeBlobStore::default());
        let service = CaseDetailService::new(store.clone(), blobs.clone());

        let view = service.load_case_detail(None).await;
        assert_eq!(view, CaseDetailView::not_found());
        assert_eq!(store.calls(), 0);
        assert!(blobs.calls().is_empty());
    }

    #[tokio::test]
    async fn zero_movements_is_not_an_error() {
        let store = Arc::new(MemoryStore::default());
        store.add_lawyer(7, "Ana");
        store.add_client(42, "Cliente 42", Some(7));
        let case = store.add_case(1, "0001/2024", 42, 7);
        let service = CaseDetailService::new(store, Arc::new(FakeBlobStore::default()));

        let detail = loaded(service.load_case_detail(Some(case)).await);
        assert!(detail.movimentacoes.is_empty());
        assert_eq!(detail.ultima_movimentacao, None);
        assert!(!detail.possui_movimentacoes);
        assert_eq!(detail.cliente_nome.as_deref(), Some("Cliente 42"));
        assert_eq!(detail.advogado_nome.as_deref(), Some("Ana"));
        assert_eq!(detail.valor_formatado, "R$ 1.234,56");
    }

    #[tokio::test]
    async fn signs_every_file_and_omits_failures() {
        let store = Arc::new(MemoryStore::default());
        let case = store.add_case(1, "0001/2024", 42, 7);
        store.add_movement(1, (2024, 2, 1), "Citação");
        store.add_movement(1, (2024, 4, 9), "Sentença");
        let blobs = Arc::new(FakeBlobStore {
            fail_sign_of: Some("b.pdf".into()),
            ..FakeBlobStore::with_objects(&[
                "processos/0001_2024/a.pdf",
                "processos/0001_2024/b.pdf",
                "processos/0001_2024/.emptyFolderPlaceholder",
                "processos/outro/c.pdf",
            ])
        });
        let service = CaseDetailService::new(store, blobs.clone());

        let detail = loaded(service.load_case_detail(Some(case)).await);
        assert_eq!(detail.anexos.len(), 1);
        assert_eq!(detail.anexos[0].nome, "a.pdf");
        assert_eq!(detail.ultima_movimentacao.unwrap().resumo, "Sentença");
        assert_eq!(detail.movimentacoes.len(), 2);

        let calls = blobs.calls();
        assert!(calls.contains(&BlobCall::List {
            prefix: "processos/0001_2024".into(),
            limit: 100
        }));
        assert!(calls.contains(&BlobCall::Sign {
            path: "processos/0001_2024/a.pdf".into(),
            ttl: 300
        }));
    }

    #[tokio::test]
    async fn each_branch_degrades_on_its_own() {
        let store = Arc::new(MemoryStore {
            fail_overview: true,
            ..Default::default()
        });
        let case = store.add_case(1, "0001/2024", 42, 7);
        store.add_movement(1, (2024, 5, 2), "Audiência");
        let blobs = Arc::new(FakeBlobStore {
            fail_list: true,
            ..Default::default()
        });
        let service = CaseDetailService::new(store, blobs);

        let detail = loaded(service.load_case_detail(Some(case)).await);
        assert!(detail.anexos.is_empty());
        assert_eq!(detail.cliente_nome, None);
        assert_eq!(detail.movimentacoes.len(), 1);
        assert_eq!(detail.ultima_movimentacao.unwrap().resumo, "Audiência");
    }

    #[tokio::test]
    async fn failed_movement_list_still_shows_the_latest_from_the_overview() {
        let store = Arc::new(MemoryStore {
            fail_movement_list: true,
            ..Default::default()
        });
        let case = store.add_case(1, "0001/2024", 42, 7);
        store.add_movement(1, (2024, 5, 2), "Audiência");
        let service = CaseDetailService::new(store, Arc::new(FakeBlobStore::default()));

        let detail = loaded(service.load_case_detail(Some(case)).await);
        assert!(detail.movimentacoes.is_empty());
        assert!(detail.possui_movimentacoes);
    }
}
