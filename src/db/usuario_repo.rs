// src/db/usuario_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::error::AppError;
use crate::db::mapear_violacao_unica;
use crate::db::repositorio::UsuarioRepositorio;
use crate::models::usuario::Usuario;

// O repositório de usuários (gestores e admins), sobre a tabela 'usuarios'.
#[derive(Clone)]
pub struct PgUsuarioRepositorio {
    pool: PgPool,
}

impl PgUsuarioRepositorio {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsuarioRepositorio for PgUsuarioRepositorio {
    async fn inserir(&self, usuario: &Usuario) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO usuarios
                (usuario_id, hospital_id, nome, email, senha_hash, papel,
                 telefone, ativo, criado_em, atualizado_em)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(usuario.usuario_id)
        .bind(usuario.hospital_id)
        .bind(&usuario.nome)
        .bind(&usuario.email)
        .bind(&usuario.senha_hash)
        .bind(usuario.papel)
        .bind(&usuario.telefone)
        .bind(usuario.ativo)
        .bind(usuario.criado_em)
        .bind(usuario.atualizado_em)
        .execute(&self.pool)
        .await
        .map_err(mapear_violacao_unica)?;
        Ok(())
    }

    async fn buscar_por_id(&self, id: i64) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE usuario_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usuario)
    }

    async fn buscar_por_email(&self, email: &str) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usuario)
    }

    async fn listar(&self) -> Result<Vec<Usuario>, AppError> {
        let usuarios = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios ORDER BY criado_em DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(usuarios)
    }

    async fn atualizar(&self, usuario: &Usuario) -> Result<(), AppError> {
        let resultado = sqlx::query(
            r#"
            UPDATE usuarios
            SET hospital_id = $2, nome = $3, email = $4, senha_hash = $5,
                papel = $6, telefone = $7, ativo = $8, atualizado_em = $9
            WHERE usuario_id = $1
            "#,
        )
        .bind(usuario.usuario_id)
        .bind(usuario.hospital_id)
        .bind(&usuario.nome)
        .bind(&usuario.email)
        .bind(&usuario.senha_hash)
        .bind(usuario.papel)
        .bind(&usuario.telefone)
        .bind(usuario.ativo)
        .bind(usuario.atualizado_em)
        .execute(&self.pool)
        .await
        .map_err(mapear_violacao_unica)?;
        if resultado.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Usuário".to_string()));
        }
        Ok(())
    }
}
