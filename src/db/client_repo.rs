// src/db/client_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::ClientStore,
    models::client::{Client, ClientOption, ClientRecord},
};

const CLIENT_COLUMNS: &str = r#"
    id, nome_completo, tipo_documento, documento, email, telefone, telefone_extra,
    cep, logradouro, bairro, cidade, estado, numero, complemento, rg, cnh,
    advogado_id, tipo_cadastro, created_at, updated_at, created_by, updated_by
"#;

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Converte violação da chave única do documento em `DuplicateDocument`;
/// qualquer outra falha de escrita vira `WriteFailed`.
fn map_write_error(e: sqlx::Error, record: &ClientRecord) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::DuplicateDocument(record.input.tipo_documento.label().to_string());
        }
    }
    AppError::WriteFailed(e.to_string())
}

#[async_trait]
impl ClientStore for ClientRepository {
    async fn insert_client(&self, record: &ClientRecord) -> Result<i64, AppError> {
        let input = &record.input;
        let endereco = input.endereco.clone().unwrap_or_default();
        let non_blank = |s: String| (!s.is_empty()).then_some(s);

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO clientes (
                nome_completo, tipo_documento, documento, email, telefone, telefone_extra,
                cep, logradouro, bairro, cidade, estado, numero, complemento, rg, cnh,
                advogado_id, tipo_cadastro, created_at, updated_at, created_by, updated_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, 'ADVOGADO', $17, $17, $18, $18)
            RETURNING id
            "#,
        )
        .bind(&input.nome_completo)
        .bind(input.tipo_documento)
        .bind(&input.documento)
        .bind(&input.email)
        .bind(&input.telefone)
        .bind(&input.telefone_extra)
        .bind(&input.cep)
        .bind(non_blank(endereco.logradouro))
        .bind(non_blank(endereco.bairro))
        .bind(non_blank(endereco.cidade))
        .bind(non_blank(endereco.estado))
        .bind(&input.numero)
        .bind(&input.complemento)
        .bind(&input.rg)
        .bind(&input.cnh)
        .bind(record.advogado_id)
        .bind(record.at)
        .bind(&record.actor)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, record))?;

        Ok(id)
    }

    async fn update_client(&self, id: i64, record: &ClientRecord) -> Result<(), AppError> {
        let input = &record.input;
        let endereco = input.endereco.clone().unwrap_or_default();
        let non_blank = |s: String| (!s.is_empty()).then_some(s);

        // O dono direto e os campos de criação não mudam numa edição
        let result = sqlx::query(
            r#"
            UPDATE clientes SET
                nome_completo = $2, tipo_documento = $3, documento = $4, email = $5,
                telefone = $6, telefone_extra = $7, cep = $8, logradouro = $9,
                bairro = $10, cidade = $11, estado = $12, numero = $13,
                complemento = $14, rg = $15, cnh = $16,
                updated_at = $17, updated_by = $18
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&input.nome_completo)
        .bind(input.tipo_documento)
        .bind(&input.documento)
        .bind(&input.email)
        .bind(&input.telefone)
        .bind(&input.telefone_extra)
        .bind(&input.cep)
        .bind(non_blank(endereco.logradouro))
        .bind(non_blank(endereco.bairro))
        .bind(non_blank(endereco.cidade))
        .bind(non_blank(endereco.estado))
        .bind(&input.numero)
        .bind(&input.complemento)
        .bind(&input.rg)
        .bind(&input.cnh)
        .bind(record.at)
        .bind(&record.actor)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, record))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cliente"));
        }
        Ok(())
    }

    async fn find_client(&self, id: i64) -> Result<Option<Client>, AppError> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clientes WHERE id = $1");
        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    async fn list_client_options(&self) -> Result<Vec<ClientOption>, AppError> {
        let clients = sqlx::query_as::<_, ClientOption>(
            "SELECT id, nome_completo, advogado_id FROM clientes ORDER BY nome_completo ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(clients)
    }

    async fn list_associated_client_ids(&self, lawyer_id: i64) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT cliente_id FROM clientes_advogados WHERE advogado_id = $1",
        )
        .bind(lawyer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }
}
