// src/services/client_service.rs

use chrono::Utc;
use std::{collections::HashSet, sync::Arc};

use crate::{
    common::error::AppError,
    db::ClientStore,
    models::{
        auth::Session,
        client::{Client, ClientDraft, ClientOption, ClientPayload, ClientRecord},
    },
    services::address_service::AddressService,
};

#[derive(Debug, Clone, PartialEq)]
pub struct UpsertOutcome {
    pub id: i64,
    pub aviso: Option<String>,
}

/// Clientes que o advogado pode escolher: vinculados em clientes_advogados
/// ou cadastrados por ele. Sem repetição, em ordem de nome.
pub async fn selectable_clients(
    store: &dyn ClientStore,
    lawyer_id: i64,
) -> Result<Vec<ClientOption>, AppError> {
    let associated: HashSet<i64> = store
        .list_associated_client_ids(lawyer_id)
        .await?
        .into_iter()
        .collect();

    let mut seen = HashSet::new();
    let mut clients: Vec<ClientOption> = store
        .list_client_options()
        .await?
        .into_iter()
        .filter(|c| associated.contains(&c.id) || c.advogado_id == Some(lawyer_id))
        .filter(|c| seen.insert(c.id))
        .collect();
    clients.sort_by(|a, b| a.nome_completo.cmp(&b.nome_completo));
    Ok(clients)
}

#[derive(Clone)]
pub struct ClientService {
    store: Arc<dyn ClientStore>,
    address: AddressService,
}

impl ClientService {
    pub fn new(store: Arc<dyn ClientStore>, address: AddressService) -> Self {
        Self { store, address }
    }

    /// Cliente visível para o advogado da sessão.
    pub async fn find_client(&self, session: &Session, id: i64) -> Result<Client, AppError> {
        let visible = selectable_clients(self.store.as_ref(), session.lawyer_id())
            .await?
            .iter()
            .any(|c| c.id == id);
        if !visible {
            return Err(AppError::NotFound("Cliente"));
        }

        self.store
            .find_client(id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))
    }

    /// Cadastro (sem id) ou edição a partir do payload da API.
    pub async fn submit(
        &self,
        session: &Session,
        payload: ClientPayload,
        existing_id: Option<i64>,
    ) -> Result<UpsertOutcome, AppError> {
        let mut draft = match existing_id {
            Some(id) => ClientDraft::from_client(&self.find_client(session, id).await?),
            None => ClientDraft::default(),
        };
        payload.apply_to(&mut draft);
        self.upsert(session, &mut draft, existing_id).await
    }

    /// Valida, conclui a consulta de CEP pendente e grava. Em caso de
    /// sucesso o formulário volta ao estado inicial.
    pub async fn upsert(
        &self,
        session: &Session,
        draft: &mut ClientDraft,
        existing_id: Option<i64>,
    ) -> Result<UpsertOutcome, AppError> {
        let mut input = draft.to_input()?;

        self.address.resolve_pending(&mut draft.cep).await;
        input.endereco = draft.cep.address().cloned();
        let aviso = draft.cep.warning().map(str::to_string);

        let record = ClientRecord {
            input,
            advogado_id: session.lawyer_id(),
            actor: session.lawyer.nome_completo.clone(),
            at: Utc::now(),
        };

        let id = match existing_id {
            Some(id) => {
                self.store.update_client(id, &record).await?;
                tracing::info!(cliente = id, advogado = record.advogado_id, "Cliente atualizado");
                id
            }
            None => {
                let id = self.store.insert_client(&record).await?;
                tracing::info!(cliente = id, advogado = record.advogado_id, "Cliente cadastrado");
                id
            }
        };

        draft.reset();
        Ok(UpsertOutcome { id, aviso })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{address::LookupState, client::DocumentType},
        testing::{session_for, FakeAddressLookup, MemoryStore},
    };

    fn payload() -> ClientPayload {
        ClientPayload {
            nome_completo: "Maria da Silva".into(),
            tipo_documento: DocumentType::Cpf,
            documento: "123.456.789-01".into(),
            email: "maria@example.com".into(),
            telefone: "(11) 98765-4321".into(),
            cep: "01310-100".into(),
            numero: "100".into(),
            ..Default::default()
        }
    }

    fn service(store: Arc<MemoryStore>, lookup: FakeAddressLookup) -> ClientService {
        ClientService::new(store, AddressService::new(Arc::new(lookup)))
    }

    #[tokio::test]
    async fn creates_with_the_resolved_address() {
        let store = Arc::new(MemoryStore::default());
        let clients = service(
            store.clone(),
            FakeAddressLookup::with("01310100", FakeAddressLookup::paulista()),
        );
        let session = session_for(7, "Ana");

        let outcome = clients.submit(&session, payload(), None).await.unwrap();
        assert_eq!(outcome.aviso, None);

        let state = store.state.lock().unwrap();
        let saved = state.clients.iter().find(|c| c.id == outcome.id).unwrap();
        assert_eq!(saved.cidade.as_deref(), Some("São Paulo"));
        assert_eq!(saved.advogado_id, Some(7));
        assert_eq!(saved.created_by, "Ana");
        assert_eq!(saved.complemento, None);
    }

    #[tokio::test]
    async fn lookup_failure_is_only_a_warning() {
        let store = Arc::new(MemoryStore::default());
        let clients = service(store.clone(), FakeAddressLookup::failing());

        let outcome = clients
            .submit(&session_for(7, "Ana"), payload(), None)
            .await
            .unwrap();
        assert!(outcome.aviso.is_some());

        let state = store.state.lock().unwrap();
        assert_eq!(state.clients.len(), 1);
        assert_eq!(state.clients[0].logradouro, None);
    }

    #[tokio::test]
    async fn duplicate_document_adds_no_row() {
        let store = Arc::new(MemoryStore::default());
        let clients = service(store.clone(), FakeAddressLookup::default());
        let session = session_for(7, "Ana");

        clients.submit(&session, payload(), None).await.unwrap();
        let err = clients.submit(&session, payload(), None).await.unwrap_err();
        assert_eq!(err.code(), "DUPLICATE_DOCUMENT");
        assert_eq!(store.state.lock().unwrap().clients.len(), 1);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_store() {
        let store = Arc::new(MemoryStore::default());
        let lookup = Arc::new(FakeAddressLookup::default());
        let clients = ClientService::new(store.clone(), AddressService::new(lookup.clone()));

        let mut bad = payload();
        bad.documento = "123".into();
        let err = clients.submit(&session_for(7, "Ana"), bad, None).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(store.calls(), 0);
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn draft_is_reset_only_on_success() {
        let store = Arc::new(MemoryStore::default());
        let clients = service(store, FakeAddressLookup::default());
        let session = session_for(7, "Ana");

        let mut draft = ClientDraft::default();
        payload().apply_to(&mut draft);
        draft.numero.clear();
        assert!(clients.upsert(&session, &mut draft, None).await.is_err());
        assert_eq!(draft.nome_completo, "Maria da Silva");

        draft.numero = "100".into();
        clients.upsert(&session, &mut draft, None).await.unwrap();
        assert_eq!(draft, ClientDraft::default());
        assert_eq!(draft.cep.state(), &LookupState::Idle);
    }

    #[tokio::test]
    async fn edit_keeps_creation_audit_and_skips_repeated_lookup() {
        let store = Arc::new(MemoryStore::default());
        store.add_client(3, "Carlos", Some(7));
        let lookup = Arc::new(FakeAddressLookup::default());
        let clients = ClientService::new(store.clone(), AddressService::new(lookup.clone()));

        let mut edit = payload();
        edit.nome_completo = "Carlos Lima".into();
        edit.documento = "003.000.000-00".into();
        edit.cep = "01310100".into(); // mesmo CEP já gravado
        let outcome = clients
            .submit(&session_for(7, "Ana"), edit, Some(3))
            .await
            .unwrap();

        assert_eq!(outcome.id, 3);
        assert_eq!(lookup.calls(), 0);
        let state = store.state.lock().unwrap();
        assert_eq!(state.clients[0].nome_completo, "Carlos Lima");
        assert_eq!(state.clients[0].created_by, "seed");
        assert_eq!(state.clients[0].updated_by, "Ana");
    }

    #[tokio::test]
    async fn clients_of_other_lawyers_are_hidden() {
        let store = Arc::new(MemoryStore::default());
        store.add_client(3, "Carlos", Some(99));
        let clients = service(store, FakeAddressLookup::default());
        let err = clients.find_client(&session_for(7, "Ana"), 3).await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn selectable_is_the_union_without_repeats() {
        let store = MemoryStore::default();
        store.add_client(1, "Zeca", Some(7));
        store.add_client(2, "Bruna", None);
        store.add_client(3, "Alice", Some(7));
        store.add_client(4, "Outro", Some(8));
        store.associate(2, 7);
        store.associate(3, 7);

        let names: Vec<String> = selectable_clients(&store, 7)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.nome_completo)
            .collect();
        assert_eq!(names, vec!["Alice", "Bruna", "Zeca"]);
    }
}
