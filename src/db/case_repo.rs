// src/db/case_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::CaseStore,
    models::{
        case::{Case, CaseOverview, CaseSummary, MovementDigest, NewCase},
        movement::{Movement, NewMovement},
    },
};

// Listagem com JOIN para trazer os nomes do cliente e do advogado
const SUMMARY_SELECT: &str = r#"
    SELECT p.id, p.numero, p.descricao, p.valor_causa,
           p.cliente_id, c.nome_completo AS cliente_nome,
           p.advogado_id, a.nome_completo AS advogado_nome
    FROM processos p
    LEFT JOIN clientes c ON c.id = p.cliente_id
    LEFT JOIN advogados a ON a.id = p.advogado_id
"#;

#[derive(Clone)]
pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OverviewRow {
    id: i64,
    numero: String,
    valor_causa: Decimal,
    created_at: DateTime<Utc>,
    cliente_nome: Option<String>,
    advogado_nome: Option<String>,
}

#[async_trait]
impl CaseStore for CaseRepository {
    async fn insert_case(&self, case: &NewCase) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO processos (
                numero, descricao, polo_ativo, polo_passivo, valor_causa, pdf_path,
                cliente_id, advogado_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&case.numero)
        .bind(&case.descricao)
        .bind(&case.polo_ativo)
        .bind(&case.polo_passivo)
        .bind(case.valor_causa)
        .bind(&case.pdf_path)
        .bind(case.cliente_id)
        .bind(case.advogado_id)
        .bind(case.created_at)
        .bind(case.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::WriteFailed(e.to_string()))?;

        Ok(id)
    }

    async fn find_case(&self, id: i64) -> Result<Option<Case>, AppError> {
        let case = sqlx::query_as::<_, Case>(
            r#"
            SELECT id, numero, descricao, polo_ativo, polo_passivo, valor_causa, pdf_path,
                   cliente_id, advogado_id, created_at, updated_at
            FROM processos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(case)
    }

    async fn list_cases_by_lawyer(&self, lawyer_id: i64) -> Result<Vec<CaseSummary>, AppError> {
        let sql = format!("{SUMMARY_SELECT} WHERE p.advogado_id = $1 ORDER BY p.created_at DESC");
        let cases = sqlx::query_as::<_, CaseSummary>(&sql)
            .bind(lawyer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(cases)
    }

    async fn list_cases_for_client(
        &self,
        lawyer_id: i64,
        client_id: i64,
    ) -> Result<Vec<CaseSummary>, AppError> {
        let sql = format!(
            "{SUMMARY_SELECT} WHERE p.advogado_id = $1 AND p.cliente_id = $2 ORDER BY p.created_at DESC"
        );
        let cases = sqlx::query_as::<_, CaseSummary>(&sql)
            .bind(lawyer_id)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(cases)
    }

    async fn list_movements(&self, case_id: i64) -> Result<Vec<Movement>, AppError> {
        let movements = sqlx::query_as::<_, Movement>(
            r#"
            SELECT id, processo_id, cliente_id, data_movimentacao, resumo,
                   tipo_documento, arquivo_url, created_at
            FROM informacao_adicional_processo
            WHERE processo_id = $1
            "#,
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }

    async fn fetch_overview(&self, case_id: i64) -> Result<Option<CaseOverview>, AppError> {
        let row = sqlx::query_as::<_, OverviewRow>(
            r#"
            SELECT p.id, p.numero, p.valor_causa, p.created_at,
                   c.nome_completo AS cliente_nome,
                   a.nome_completo AS advogado_nome
            FROM processos p
            LEFT JOIN clientes c ON c.id = p.cliente_id
            LEFT JOIN advogados a ON a.id = p.advogado_id
            WHERE p.id = $1
            "#,
        )
        .bind(case_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let movimentacoes = sqlx::query_as::<_, MovementDigest>(
            r#"
            SELECT data_movimentacao, resumo
            FROM informacao_adicional_processo
            WHERE processo_id = $1
            "#,
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(CaseOverview {
            id: row.id,
            numero: row.numero,
            valor_causa: row.valor_causa,
            created_at: row.created_at,
            cliente_nome: row.cliente_nome,
            advogado_nome: row.advogado_nome,
            movimentacoes,
        }))
    }

    async fn insert_movement(&self, movement: &NewMovement) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO informacao_adicional_processo (
                processo_id, cliente_id, data_movimentacao, resumo, tipo_documento, arquivo_url
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(movement.processo_id)
        .bind(movement.cliente_id)
        .bind(movement.data_movimentacao)
        .bind(&movement.resumo)
        .bind(movement.tipo_documento)
        .bind(&movement.arquivo_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::WriteFailed(e.to_string()))?;

        Ok(id)
    }
}
