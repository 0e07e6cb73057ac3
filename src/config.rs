// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, sync::Arc, time::Duration};

use crate::{
    db::{CaseRepository, ClientRepository, LawyerRepository},
    services::{
        address_service::{AddressService, BrasilApiLookup},
        assistant_service::{AssistantConfig, AssistantService, DEFAULT_MODEL},
        auth::AuthService,
        case_detail::CaseDetailService,
        case_service::CaseService,
        client_service::ClientService,
        movement_service::MovementService,
        session::{MemorySessionStorage, SessionManager},
    },
    storage::RestBlobStore,
};

const DEFAULT_BUCKET: &str = "processos";
const DEFAULT_ADDRESS_LOOKUP_URL: &str = "https://brasilapi.com.br/api/cep/v1";
const DEFAULT_ASSISTANT_URL: &str = "https://api.openai.com/v1/chat/completions";

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).map_err(|_| anyhow::anyhow!("{name} deve ser definida"))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub client_service: ClientService,
    pub case_service: CaseService,
    pub movement_service: MovementService,
    pub case_detail_service: CaseDetailService,
    pub address_service: AddressService,
    pub assistant_service: AssistantService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;
        let storage_url = required("STORAGE_URL")?;
        let storage_key = required("STORAGE_SERVICE_KEY")?;
        let bucket = optional("STORAGE_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string());
        let address_url =
            optional("ADDRESS_LOOKUP_URL").unwrap_or_else(|| DEFAULT_ADDRESS_LOOKUP_URL.to_string());

        let assistant = AssistantConfig {
            api_url: optional("ASSISTANT_API_URL").unwrap_or_else(|| DEFAULT_ASSISTANT_URL.to_string()),
            api_key: optional("ASSISTANT_API_KEY"),
            model: optional("ASSISTANT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        };
        if assistant.api_key.is_none() {
            tracing::warn!("ASSISTANT_API_KEY não definida; o assistente ficará indisponível");
        }

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let lawyers = Arc::new(LawyerRepository::new(db_pool.clone()));
        let clients = Arc::new(ClientRepository::new(db_pool.clone()));
        let cases = Arc::new(CaseRepository::new(db_pool.clone()));
        let blobs = Arc::new(RestBlobStore::new(&storage_url, &bucket, &storage_key)?);

        let sessions = SessionManager::new(Arc::new(MemorySessionStorage::default()), jwt_secret);
        let address_service = AddressService::new(Arc::new(BrasilApiLookup::new(&address_url)?));

        Ok(Self {
            auth_service: AuthService::new(lawyers, sessions),
            client_service: ClientService::new(clients.clone(), address_service.clone()),
            case_service: CaseService::new(cases.clone(), clients, blobs.clone()),
            movement_service: MovementService::new(cases.clone(), blobs.clone()),
            case_detail_service: CaseDetailService::new(cases, blobs),
            address_service,
            assistant_service: AssistantService::new(assistant)?,
            db_pool,
        })
    }
}
