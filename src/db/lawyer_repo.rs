// src/db/lawyer_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{common::error::AppError, db::CredentialStore, models::auth::LawyerCredential};

// O repositório de credenciais, responsável pela tabela 'login_advogados'
#[derive(Clone)]
pub struct LawyerRepository {
    pool: PgPool,
}

impl LawyerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for LawyerRepository {
    // Busca a credencial pela OAB (comparação exata)
    async fn find_by_oab(&self, oab: &str) -> Result<Option<LawyerCredential>, AppError> {
        let credential = sqlx::query_as::<_, LawyerCredential>(
            r#"
            SELECT id, advogado_id, nome, email, oab, cpf, senha
            FROM login_advogados
            WHERE oab = $1
            "#,
        )
        .bind(oab)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    async fn find_by_lawyer_id(
        &self,
        lawyer_id: i64,
    ) -> Result<Option<LawyerCredential>, AppError> {
        let credential = sqlx::query_as::<_, LawyerCredential>(
            r#"
            SELECT id, advogado_id, nome, email, oab, cpf, senha
            FROM login_advogados
            WHERE advogado_id = $1
            "#,
        )
        .bind(lawyer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    async fn update_password(
        &self,
        credential_id: i64,
        password_hash: &str,
    ) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE login_advogados SET senha = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(credential_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::WriteFailed(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Advogado"));
        }
        Ok(())
    }
}
