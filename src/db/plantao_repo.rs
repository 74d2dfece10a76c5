// src/db/plantao_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::error::AppError;
use crate::db::repositorio::PlantaoRepositorio;
use crate::models::plantao::{FiltroPlantoes, Plantao};

#[derive(Clone)]
pub struct PgPlantaoRepositorio {
    pool: PgPool,
}

impl PgPlantaoRepositorio {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlantaoRepositorio for PgPlantaoRepositorio {
    async fn inserir(&self, plantao: &Plantao) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO plantoes
                (plantao_id, hospital_id, gestor_id, titulo, descricao, dia,
                 horario_inicio, horario_final, cargo_requerido, tipo, valor,
                 status, criado_em, atualizado_em)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(plantao.plantao_id)
        .bind(plantao.hospital_id)
        .bind(plantao.gestor_id)
        .bind(&plantao.titulo)
        .bind(&plantao.descricao)
        .bind(&plantao.dia)
        .bind(&plantao.horario_inicio)
        .bind(&plantao.horario_final)
        .bind(&plantao.cargo_requerido)
        .bind(&plantao.tipo)
        .bind(plantao.valor)
        .bind(plantao.status)
        .bind(plantao.criado_em)
        .bind(plantao.atualizado_em)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn buscar_por_id(&self, id: i64) -> Result<Option<Plantao>, AppError> {
        let plantao = sqlx::query_as::<_, Plantao>("SELECT * FROM plantoes WHERE plantao_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(plantao)
    }

    async fn listar(&self, filtro: &FiltroPlantoes) -> Result<Vec<Plantao>, AppError> {
        let plantoes = sqlx::query_as::<_, Plantao>(
            r#"
            SELECT * FROM plantoes
            WHERE ($1::BIGINT IS NULL OR hospital_id = $1)
              AND ($2::status_plantao IS NULL OR status = $2)
            ORDER BY criado_em DESC
            "#,
        )
        .bind(filtro.hospital_id)
        .bind(filtro.status)
        .fetch_all(&self.pool)
        .await?;
        Ok(plantoes)
    }

    async fn atualizar(&self, plantao: &Plantao) -> Result<(), AppError> {
        let resultado = sqlx::query(
            r#"
            UPDATE plantoes
            SET hospital_id = $2, gestor_id = $3, titulo = $4, descricao = $5,
                dia = $6, horario_inicio = $7, horario_final = $8,
                cargo_requerido = $9, tipo = $10, valor = $11, status = $12,
                atualizado_em = $13
            WHERE plantao_id = $1
            "#,
        )
        .bind(plantao.plantao_id)
        .bind(plantao.hospital_id)
        .bind(plantao.gestor_id)
        .bind(&plantao.titulo)
        .bind(&plantao.descricao)
        .bind(&plantao.dia)
        .bind(&plantao.horario_inicio)
        .bind(&plantao.horario_final)
        .bind(&plantao.cargo_requerido)
        .bind(&plantao.tipo)
        .bind(plantao.valor)
        .bind(plantao.status)
        .bind(plantao.atualizado_em)
        .execute(&self.pool)
        .await?;
        if resultado.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Plantão".to_string()));
        }
        Ok(())
    }

    async fn remover(&self, id: i64) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM plantoes WHERE plantao_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}
