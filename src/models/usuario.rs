// src/models/usuario.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ator::Papel;

// Representa um usuário (gestor ou admin) vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Usuario {
    pub usuario_id: i64,

    // Nulo apenas para ADMIN_SISTEMA
    pub hospital_id: Option<i64>,

    pub nome: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub senha_hash: String,

    pub papel: Papel,
    pub telefone: Option<String>,
    pub ativo: bool,

    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

// Dados para cadastro de um novo usuário
#[derive(Debug, Deserialize, Validate)]
pub struct NovoUsuario {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha: String,
    pub papel: Papel,
    pub telefone: Option<String>,
    pub hospital_id: Option<i64>,
}

// Dados para atualização de um usuário existente
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AtualizaUsuario {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha: Option<String>,
    pub papel: Option<Papel>,
    pub telefone: Option<String>,
    pub ativo: Option<bool>,
    pub hospital_id: Option<i64>,
}
