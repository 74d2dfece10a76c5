// src/db/aceite_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::error::AppError;
use crate::db::repositorio::AceiteRepositorio;
use crate::models::aceite::{Aceite, FiltroAceites};

#[derive(Clone)]
pub struct PgAceiteRepositorio {
    pool: PgPool,
}

impl PgAceiteRepositorio {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AceiteRepositorio for PgAceiteRepositorio {
    async fn inserir(&self, aceite: &Aceite) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO aceites_plantao
                (aceite_id, plantao_id, medico_id, dia, horario_inicio,
                 horario_final, status, motivo_rejeicao, criado_em, atualizado_em)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(aceite.aceite_id)
        .bind(aceite.plantao_id)
        .bind(aceite.medico_id)
        .bind(&aceite.dia)
        .bind(&aceite.horario_inicio)
        .bind(&aceite.horario_final)
        .bind(aceite.status)
        .bind(&aceite.motivo_rejeicao)
        .bind(aceite.criado_em)
        .bind(aceite.atualizado_em)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn buscar_por_id(&self, id: i64) -> Result<Option<Aceite>, AppError> {
        let aceite = sqlx::query_as::<_, Aceite>("SELECT * FROM aceites_plantao WHERE aceite_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(aceite)
    }

    async fn listar(&self, filtro: &FiltroAceites) -> Result<Vec<Aceite>, AppError> {
        let aceites = sqlx::query_as::<_, Aceite>(
            r#"
            SELECT * FROM aceites_plantao
            WHERE ($1::BIGINT IS NULL OR medico_id = $1)
              AND ($2::BIGINT IS NULL OR plantao_id = $2)
              AND ($3::status_aceite IS NULL OR status = $3)
            ORDER BY criado_em DESC
            "#,
        )
        .bind(filtro.medico_id)
        .bind(filtro.plantao_id)
        .bind(filtro.status)
        .fetch_all(&self.pool)
        .await?;
        Ok(aceites)
    }

    async fn atualizar(&self, aceite: &Aceite) -> Result<(), AppError> {
        let resultado = sqlx::query(
            r#"
            UPDATE aceites_plantao
            SET status = $2, motivo_rejeicao = $3, atualizado_em = $4
            WHERE aceite_id = $1
            "#,
        )
        .bind(aceite.aceite_id)
        .bind(aceite.status)
        .bind(&aceite.motivo_rejeicao)
        .bind(aceite.atualizado_em)
        .execute(&self.pool)
        .await?;
        if resultado.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Aceite".to_string()));
        }
        Ok(())
    }

    async fn remover(&self, id: i64) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM aceites_plantao WHERE aceite_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    async fn existe_ativo_para_plantao(&self, plantao_id: i64) -> Result<bool, AppError> {
        let existe: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT 1 FROM aceites_plantao
            WHERE plantao_id = $1 AND status IN ('PENDENTE', 'APROVADO')
            LIMIT 1
            "#,
        )
        .bind(plantao_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(existe.is_some())
    }
}
