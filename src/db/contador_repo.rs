// src/db/contador_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::error::AppError;
use crate::db::repositorio::ContadorRepositorio;

// Contador durável, guardado junto dos dados: sobrevive a reinício do
// processo e é compartilhado entre instâncias.
#[derive(Clone)]
pub struct PgContadorRepositorio {
    pool: PgPool,
}

impl PgContadorRepositorio {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContadorRepositorio for PgContadorRepositorio {
    async fn proximo(&self, entidade: &str) -> Result<i64, AppError> {
        // Upsert único: o banco serializa o incremento, sem corrida.
        let valor: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO contadores (entidade, valor)
            VALUES ($1, 1)
            ON CONFLICT (entidade) DO UPDATE SET valor = contadores.valor + 1
            RETURNING valor
            "#,
        )
        .bind(entidade)
        .fetch_one(&self.pool)
        .await?;
        Ok(valor)
    }
}
