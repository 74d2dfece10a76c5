// src/db/hospital_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::error::AppError;
use crate::db::mapear_violacao_unica;
use crate::db::repositorio::HospitalRepositorio;
use crate::models::hospital::Hospital;

// O repositório de hospitais, responsável por todas as interações com a
// tabela 'hospitais'.
#[derive(Clone)]
pub struct PgHospitalRepositorio {
    pool: PgPool,
}

impl PgHospitalRepositorio {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HospitalRepositorio for PgHospitalRepositorio {
    async fn inserir(&self, hospital: &Hospital) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO hospitais
                (hospital_id, nome, cnpj, endereco, email, subdominio_url, criado_em, atualizado_em)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(hospital.hospital_id)
        .bind(&hospital.nome)
        .bind(&hospital.cnpj)
        .bind(&hospital.endereco)
        .bind(&hospital.email)
        .bind(&hospital.subdominio_url)
        .bind(hospital.criado_em)
        .bind(hospital.atualizado_em)
        .execute(&self.pool)
        .await
        .map_err(mapear_violacao_unica)?;
        Ok(())
    }

    async fn buscar_por_id(&self, id: i64) -> Result<Option<Hospital>, AppError> {
        let hospital = sqlx::query_as::<_, Hospital>("SELECT * FROM hospitais WHERE hospital_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(hospital)
    }

    async fn buscar_por_email(&self, email: &str) -> Result<Option<Hospital>, AppError> {
        let hospital = sqlx::query_as::<_, Hospital>("SELECT * FROM hospitais WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(hospital)
    }

    async fn buscar_por_cnpj(&self, cnpj: &str) -> Result<Option<Hospital>, AppError> {
        let hospital = sqlx::query_as::<_, Hospital>("SELECT * FROM hospitais WHERE cnpj = $1")
            .bind(cnpj)
            .fetch_optional(&self.pool)
            .await?;
        Ok(hospital)
    }

    async fn listar(&self) -> Result<Vec<Hospital>, AppError> {
        let hospitais = sqlx::query_as::<_, Hospital>("SELECT * FROM hospitais ORDER BY nome")
            .fetch_all(&self.pool)
            .await?;
        Ok(hospitais)
    }

    async fn atualizar(&self, hospital: &Hospital) -> Result<(), AppError> {
        let resultado = sqlx::query(
            r#"
            UPDATE hospitais
            SET nome = $2, cnpj = $3, endereco = $4, email = $5,
                subdominio_url = $6, atualizado_em = $7
            WHERE hospital_id = $1
            "#,
        )
        .bind(hospital.hospital_id)
        .bind(&hospital.nome)
        .bind(&hospital.cnpj)
        .bind(&hospital.endereco)
        .bind(&hospital.email)
        .bind(&hospital.subdominio_url)
        .bind(hospital.atualizado_em)
        .execute(&self.pool)
        .await
        .map_err(mapear_violacao_unica)?;
        if resultado.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Hospital".to_string()));
        }
        Ok(())
    }

    async fn remover(&self, id: i64) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM hospitais WHERE hospital_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}
