// src/db/medico_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::error::AppError;
use crate::db::mapear_violacao_unica;
use crate::db::repositorio::MedicoRepositorio;
use crate::models::medico::Medico;

#[derive(Clone)]
pub struct PgMedicoRepositorio {
    pool: PgPool,
}

impl PgMedicoRepositorio {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MedicoRepositorio for PgMedicoRepositorio {
    async fn inserir(&self, medico: &Medico) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO medicos
                (medico_id, crm, nome, email, senha_hash, especialidade,
                 ativo, criado_em, atualizado_em)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(medico.medico_id)
        .bind(&medico.crm)
        .bind(&medico.nome)
        .bind(&medico.email)
        .bind(&medico.senha_hash)
        .bind(&medico.especialidade)
        .bind(medico.ativo)
        .bind(medico.criado_em)
        .bind(medico.atualizado_em)
        .execute(&self.pool)
        .await
        .map_err(mapear_violacao_unica)?;
        Ok(())
    }

    async fn buscar_por_id(&self, id: i64) -> Result<Option<Medico>, AppError> {
        let medico = sqlx::query_as::<_, Medico>("SELECT * FROM medicos WHERE medico_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(medico)
    }

    async fn buscar_por_crm(&self, crm: &str) -> Result<Option<Medico>, AppError> {
        let medico = sqlx::query_as::<_, Medico>("SELECT * FROM medicos WHERE crm = $1")
            .bind(crm)
            .fetch_optional(&self.pool)
            .await?;
        Ok(medico)
    }

    async fn buscar_por_email(&self, email: &str) -> Result<Option<Medico>, AppError> {
        let medico = sqlx::query_as::<_, Medico>("SELECT * FROM medicos WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(medico)
    }

    async fn listar(&self) -> Result<Vec<Medico>, AppError> {
        let medicos = sqlx::query_as::<_, Medico>("SELECT * FROM medicos ORDER BY criado_em DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(medicos)
    }

    async fn atualizar(&self, medico: &Medico) -> Result<(), AppError> {
        let resultado = sqlx::query(
            r#"
            UPDATE medicos
            SET crm = $2, nome = $3, email = $4, senha_hash = $5,
                especialidade = $6, ativo = $7, atualizado_em = $8
            WHERE medico_id = $1
            "#,
        )
        .bind(medico.medico_id)
        .bind(&medico.crm)
        .bind(&medico.nome)
        .bind(&medico.email)
        .bind(&medico.senha_hash)
        .bind(&medico.especialidade)
        .bind(medico.ativo)
        .bind(medico.atualizado_em)
        .execute(&self.pool)
        .await
        .map_err(mapear_violacao_unica)?;
        if resultado.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Médico".to_string()));
        }
        Ok(())
    }
}
