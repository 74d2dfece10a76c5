// src/db/auditoria_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::db::repositorio::LogAuditoriaRepositorio;
use crate::models::auditoria::{FiltroLogs, LogAuditoria};

// Tabela 'logs_auditoria': só INSERT e SELECT, nunca UPDATE ou DELETE.
#[derive(Clone)]
pub struct PgLogAuditoriaRepositorio {
    pool: PgPool,
}

impl PgLogAuditoriaRepositorio {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogAuditoriaRepositorio for PgLogAuditoriaRepositorio {
    async fn anexar(&self, log: &LogAuditoria) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO logs_auditoria
                (log_id, usuario_id, hospital_id, entidade, entidade_id, acao,
                 dados_anteriores, dados_posteriores, ip, criado_em)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(log.log_id)
        .bind(log.usuario_id)
        .bind(log.hospital_id)
        .bind(&log.entidade)
        .bind(&log.entidade_id)
        .bind(log.acao)
        .bind(&log.dados_anteriores)
        .bind(&log.dados_posteriores)
        .bind(&log.ip)
        .bind(log.criado_em)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn buscar_por_id(&self, id: Uuid) -> Result<Option<LogAuditoria>, AppError> {
        let log = sqlx::query_as::<_, LogAuditoria>("SELECT * FROM logs_auditoria WHERE log_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(log)
    }

    async fn listar(&self, filtro: &FiltroLogs) -> Result<Vec<LogAuditoria>, AppError> {
        let logs = sqlx::query_as::<_, LogAuditoria>(
            r#"
            SELECT * FROM logs_auditoria
            WHERE ($1::BIGINT IS NULL OR usuario_id = $1)
              AND ($2::BIGINT IS NULL OR hospital_id = $2)
              AND ($3::TEXT IS NULL OR entidade = $3)
              AND ($4::acao_auditoria IS NULL OR acao = $4)
            ORDER BY criado_em DESC
            "#,
        )
        .bind(filtro.usuario_id)
        .bind(filtro.hospital_id)
        .bind(&filtro.entidade)
        .bind(filtro.acao)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }
}
