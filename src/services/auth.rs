// src/services/auth.rs

use bcrypt::{hash, verify};
use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::CredentialStore,
    models::auth::{AuthResponse, LawyerProfile, Session, SessionState},
    services::session::SessionManager,
};

// Custo do bcrypt usado na troca de senha
const PASSWORD_COST: u32 = 10;

#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    sessions: SessionManager,
}

impl AuthService {
    pub fn new(credentials: Arc<dyn CredentialStore>, sessions: SessionManager) -> Self {
        Self { credentials, sessions }
    }

    /// Login por OAB + senha. Só grava a sessão quando a senha confere.
    pub async fn login(&self, oab: &str, password: &str) -> Result<AuthResponse, AppError> {
        let credential = self
            .credentials
            .find_by_oab(oab)
            .await?
            .ok_or(AppError::NotFound("Advogado"))?;

        let password_clone = password.to_owned();
        let password_hash_clone = credential.senha.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            tracing::info!(oab, "Tentativa de login com senha incorreta");
            return Err(AppError::InvalidCredentials);
        }

        let advogado = credential.identity();
        let token = self.sessions.open(advogado.clone()).await?;
        tracing::info!(advogado = advogado.id, "Login realizado");

        Ok(AuthResponse { token, advogado })
    }

    pub async fn logout(&self, token: Option<&str>) {
        self.sessions.close(token).await;
    }

    pub async fn current(&self, token: Option<&str>) -> SessionState {
        self.sessions.current(token).await
    }

    pub async fn profile(&self, session: &Session) -> Result<LawyerProfile, AppError> {
        let credential = self
            .credentials
            .find_by_lawyer_id(session.lawyer_id())
            .await?
            .ok_or(AppError::NotFound("Advogado"))?;
        Ok(credential.profile())
    }

    pub async fn change_password(&self, session: &Session, nova_senha: &str) -> Result<(), AppError> {
        if nova_senha.trim().is_empty() {
            return Err(AppError::invalid("A nova senha não pode estar vazia."));
        }

        let credential = self
            .credentials
            .find_by_lawyer_id(session.lawyer_id())
            .await?
            .ok_or(AppError::NotFound("Advogado"))?;

        let password_clone = nova_senha.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || hash(&password_clone, PASSWORD_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.credentials
            .update_password(credential.id, &hashed_password)
            .await?;
        tracing::info!(advogado = session.lawyer_id(), "Senha alterada");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::auth::LawyerIdentity, services::session::MemorySessionStorage,
        testing::MemoryStore,
    };

    fn service(store: Arc<MemoryStore>) -> AuthService {
        let sessions = SessionManager::new(Arc::new(MemorySessionStorage::default()), "segredo".into());
        AuthService::new(store, sessions)
    }

    fn store_with_ana() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::default());
        store.add_credential(7, "Ana", "12345", "secret");
        store
    }

    #[tokio::test]
    async fn login_persists_the_identity() {
        let auth = service(store_with_ana());
        let response = auth.login("12345", "secret").await.unwrap();
        assert_eq!(
            response.advogado,
            LawyerIdentity {
                id: 7,
                nome_completo: "Ana".into(),
                oab: "12345".into()
            }
        );

        let session = auth.current(Some(&response.token)).await.require().unwrap();
        assert_eq!(session.lawyer, response.advogado);
    }

    #[tokio::test]
    async fn wrong_password_keeps_the_previous_session() {
        let auth = service(store_with_ana());
        let first = auth.login("12345", "secret").await.unwrap();

        let err = auth.login("12345", "wrong").await.unwrap_err();
        assert_eq!(err.code(), "INVALID_CREDENTIALS");
        assert!(matches!(
            auth.current(Some(&first.token)).await,
            SessionState::Authenticated(_)
        ));
    }

    #[tokio::test]
    async fn unknown_oab_is_not_found() {
        let auth = service(store_with_ana());
        let err = auth.login("99999", "secret").await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn logout_ends_the_session() {
        let auth = service(store_with_ana());
        let response = auth.login("12345", "secret").await.unwrap();
        auth.logout(Some(&response.token)).await;
        auth.logout(Some(&response.token)).await;
        assert_eq!(auth.current(Some(&response.token)).await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn change_password_replaces_the_hash() {
        let store = store_with_ana();
        let auth = service(store.clone());
        let session = auth.login("12345", "secret").await.unwrap();
        let session = auth.current(Some(&session.token)).await.require().unwrap();

        let err = auth.change_password(&session, "  ").await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        auth.change_password(&session, "nova-senha").await.unwrap();
        assert!(auth.login("12345", "nova-senha").await.is_ok());
        assert_eq!(
            auth.login("12345", "secret").await.unwrap_err().code(),
            "INVALID_CREDENTIALS"
        );
        assert_eq!(auth.profile(&session).await.unwrap().nome, "Ana");
    }
}
