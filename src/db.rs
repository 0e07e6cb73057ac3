// src/db.rs
//
// Contratos do "record store". Os serviços dependem apenas destes traits;
// os repositórios Postgres abaixo são as implementações de produção.

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::{
        auth::LawyerCredential,
        case::{Case, CaseOverview, CaseSummary, NewCase},
        client::{Client, ClientOption, ClientRecord},
        movement::{Movement, NewMovement},
    },
};

pub mod lawyer_repo;
pub use lawyer_repo::LawyerRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod case_repo;
pub use case_repo::CaseRepository;

/// Credenciais dos advogados (login_advogados).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Busca exata pela OAB, como gravada.
    async fn find_by_oab(&self, oab: &str) -> Result<Option<LawyerCredential>, AppError>;

    async fn find_by_lawyer_id(&self, lawyer_id: i64)
        -> Result<Option<LawyerCredential>, AppError>;

    async fn update_password(&self, credential_id: i64, password_hash: &str)
        -> Result<(), AppError>;
}

#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Insere e devolve o id. Documento repetido vira `DuplicateDocument`.
    async fn insert_client(&self, record: &ClientRecord) -> Result<i64, AppError>;

    async fn update_client(&self, id: i64, record: &ClientRecord) -> Result<(), AppError>;

    async fn find_client(&self, id: i64) -> Result<Option<Client>, AppError>;

    /// Todos os clientes (id, nome, dono direto).
    async fn list_client_options(&self) -> Result<Vec<ClientOption>, AppError>;

    /// Ids vinculados ao advogado em clientes_advogados.
    async fn list_associated_client_ids(&self, lawyer_id: i64) -> Result<Vec<i64>, AppError>;
}

#[async_trait]
pub trait CaseStore: Send + Sync {
    async fn insert_case(&self, case: &NewCase) -> Result<i64, AppError>;

    async fn find_case(&self, id: i64) -> Result<Option<Case>, AppError>;

    async fn list_cases_by_lawyer(&self, lawyer_id: i64) -> Result<Vec<CaseSummary>, AppError>;

    async fn list_cases_for_client(
        &self,
        lawyer_id: i64,
        client_id: i64,
    ) -> Result<Vec<CaseSummary>, AppError>;

    /// Movimentações de um processo, sem ordem garantida.
    async fn list_movements(&self, case_id: i64) -> Result<Vec<Movement>, AppError>;

    /// Processo com nome do cliente, do advogado e movimentações aninhadas.
    async fn fetch_overview(&self, case_id: i64) -> Result<Option<CaseOverview>, AppError>;

    async fn insert_movement(&self, movement: &NewMovement) -> Result<i64, AppError>;
}
