// src/services/session.rs
//
// Sessão do advogado logado: identidade persistida sob a chave
// "advogadoLogado:{sid}" e um JWT que aponta para ela.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{Claims, LawyerIdentity, Session, SessionState},
};

pub const SESSION_NAMESPACE: &str = "advogadoLogado";

pub fn session_key(sid: Uuid) -> String {
    format!("{SESSION_NAMESPACE}:{sid}")
}

const SESSION_TTL_DAYS: i64 = 7;

/// Armazenamento chave-valor das sessões ativas. `expires_at` é o mesmo
/// `exp` (segundos Unix) do token que aponta para a sessão.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn load(&self, key: &str) -> Option<LawyerIdentity>;
    async fn store(&self, key: &str, identity: LawyerIdentity, expires_at: i64);
    async fn remove(&self, key: &str);
}

#[derive(Default)]
pub struct MemorySessionStorage {
    entries: RwLock<HashMap<String, (LawyerIdentity, i64)>>,
}

#[cfg(test)]
impl MemorySessionStorage {
    pub async fn count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load(&self, key: &str) -> Option<LawyerIdentity> {
        let now = Utc::now().timestamp();
        match self.entries.read().await.get(key) {
            Some((identity, expires_at)) if *expires_at > now => Some(identity.clone()),
            _ => None,
        }
    }

    async fn store(&self, key: &str, identity: LawyerIdentity, expires_at: i64) {
        let now = Utc::now().timestamp();
        let mut entries = self.entries.write().await;
        // Sessões vencidas saem a cada login
        entries.retain(|_, (_, exp)| *exp > now);
        entries.insert(key.to_string(), (identity, expires_at));
    }

    async fn remove(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}

#[derive(Clone)]
pub struct SessionManager {
    storage: Arc<dyn SessionStorage>,
    jwt_secret: String,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(storage: Arc<dyn SessionStorage>, jwt_secret: String) -> Self {
        Self {
            storage,
            jwt_secret,
            ttl: Duration::days(SESSION_TTL_DAYS),
        }
    }

    #[cfg(test)]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Persiste a identidade numa sessão nova e devolve o token.
    pub async fn open(&self, identity: LawyerIdentity) -> Result<String, AppError> {
        let sid = Uuid::new_v4();
        let (token, expires_at) = self.create_token(identity.id, sid)?;
        self.storage.store(&session_key(sid), identity, expires_at).await;
        Ok(token)
    }

    /// Resolve o token; qualquer problema resulta em `Anonymous`.
    pub async fn current(&self, token: Option<&str>) -> SessionState {
        let Some(claims) = token.and_then(|t| self.decode_token(t, true)) else {
            return SessionState::Anonymous;
        };

        match self.storage.load(&session_key(claims.sid)).await {
            Some(lawyer) if lawyer.id == claims.sub => SessionState::Authenticated(Session {
                id: claims.sid,
                lawyer,
            }),
            _ => SessionState::Anonymous,
        }
    }

    /// Remove a sessão apontada pelo token. Idempotente; aceita token vencido.
    pub async fn close(&self, token: Option<&str>) {
        if let Some(claims) = token.and_then(|t| self.decode_token(t, false)) {
            self.storage.remove(&session_key(claims.sid)).await;
            tracing::info!(advogado = claims.sub, "Sessão encerrada");
        }
    }

    fn decode_token(&self, token: &str, check_expiry: bool) -> Option<Claims> {
        let mut validation = Validation::default();
        validation.validate_exp = check_expiry;
        if !check_expiry {
            validation.required_spec_claims.remove("exp");
        }
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map(|data| data.claims)
        .ok()
    }

    fn create_token(&self, lawyer_id: i64, sid: Uuid) -> Result<(String, i64), AppError> {
        let now = Utc::now();
        let expires_at = (now + self.ttl).timestamp();

        let claims = Claims {
            sub: lawyer_id,
            sid,
            exp: expires_at.max(0) as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?;
        Ok((token, expires_at))
    }
}
