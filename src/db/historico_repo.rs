// src/db/historico_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::error::AppError;
use crate::db::repositorio::{HistoricoGestorRepositorio, HistoricoMedicoRepositorio};
use crate::models::historico::{FiltroHistoricos, HistoricoGestor, HistoricoMedico};

#[derive(Clone)]
pub struct PgHistoricoGestorRepositorio {
    pool: PgPool,
}

impl PgHistoricoGestorRepositorio {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoricoGestorRepositorio for PgHistoricoGestorRepositorio {
    async fn inserir(&self, historico: &HistoricoGestor) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO historicos_gestor
                (historico_gestor_id, plantao_id, aceite_id, crm, dia,
                 horario_inicio, horario_final, status, observacao,
                 criado_em, atualizado_em)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(historico.historico_gestor_id)
        .bind(historico.plantao_id)
        .bind(historico.aceite_id)
        .bind(&historico.crm)
        .bind(&historico.dia)
        .bind(&historico.horario_inicio)
        .bind(&historico.horario_final)
        .bind(historico.status)
        .bind(&historico.observacao)
        .bind(historico.criado_em)
        .bind(historico.atualizado_em)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn buscar_por_id(&self, id: i64) -> Result<Option<HistoricoGestor>, AppError> {
        let historico = sqlx::query_as::<_, HistoricoGestor>(
            "SELECT * FROM historicos_gestor WHERE historico_gestor_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(historico)
    }

    async fn listar(&self, filtro: &FiltroHistoricos) -> Result<Vec<HistoricoGestor>, AppError> {
        let historicos = sqlx::query_as::<_, HistoricoGestor>(
            r#"
            SELECT * FROM historicos_gestor
            WHERE ($1::TEXT IS NULL OR crm = $1)
              AND ($2::BIGINT IS NULL OR plantao_id = $2)
              AND ($3::BIGINT IS NULL OR aceite_id = $3)
            ORDER BY criado_em DESC
            "#,
        )
        .bind(&filtro.crm)
        .bind(filtro.plantao_id)
        .bind(filtro.aceite_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(historicos)
    }

    async fn atualizar(&self, historico: &HistoricoGestor) -> Result<(), AppError> {
        let resultado = sqlx::query(
            r#"
            UPDATE historicos_gestor
            SET status = $2, observacao = $3, atualizado_em = $4
            WHERE historico_gestor_id = $1
            "#,
        )
        .bind(historico.historico_gestor_id)
        .bind(historico.status)
        .bind(&historico.observacao)
        .bind(historico.atualizado_em)
        .execute(&self.pool)
        .await?;
        if resultado.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Histórico".to_string()));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgHistoricoMedicoRepositorio {
    pool: PgPool,
}

impl PgHistoricoMedicoRepositorio {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoricoMedicoRepositorio for PgHistoricoMedicoRepositorio {
    async fn inserir(&self, historico: &HistoricoMedico) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO historicos_medico
                (historico_medico_id, hospital_id, plantao_id, aceite_id, crm,
                 dia, horario_inicio, horario_final, status, observacao,
                 criado_em, atualizado_em)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(historico.historico_medico_id)
        .bind(historico.hospital_id)
        .bind(historico.plantao_id)
        .bind(historico.aceite_id)
        .bind(&historico.crm)
        .bind(&historico.dia)
        .bind(&historico.horario_inicio)
        .bind(&historico.horario_final)
        .bind(historico.status)
        .bind(&historico.observacao)
        .bind(historico.criado_em)
        .bind(historico.atualizado_em)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn buscar_por_id(&self, id: i64) -> Result<Option<HistoricoMedico>, AppError> {
        let historico = sqlx::query_as::<_, HistoricoMedico>(
            "SELECT * FROM historicos_medico WHERE historico_medico_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(historico)
    }

    async fn listar_por_crm(&self, crm: &str) -> Result<Vec<HistoricoMedico>, AppError> {
        let historicos = sqlx::query_as::<_, HistoricoMedico>(
            "SELECT * FROM historicos_medico WHERE crm = $1 ORDER BY criado_em DESC",
        )
        .bind(crm)
        .fetch_all(&self.pool)
        .await?;
        Ok(historicos)
    }

    async fn atualizar(&self, historico: &HistoricoMedico) -> Result<(), AppError> {
        let resultado = sqlx::query(
            r#"
            UPDATE historicos_medico
            SET status = $2, observacao = $3, atualizado_em = $4
            WHERE historico_medico_id = $1
            "#,
        )
        .bind(historico.historico_medico_id)
        .bind(historico.status)
        .bind(&historico.observacao)
        .bind(historico.atualizado_em)
        .execute(&self.pool)
        .await?;
        if resultado.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Histórico".to_string()));
        }
        Ok(())
    }
}
