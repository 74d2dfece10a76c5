// src/models/medico.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// Representa um médico vindo do banco de dados. O papel é fixo (MEDICO)
// e por isso não é persistido.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Medico {
    pub medico_id: i64,
    pub crm: String,
    pub nome: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub senha_hash: String,

    pub especialidade: String,
    pub ativo: bool,

    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

// Dados para auto-cadastro de um médico (não exige autenticação prévia)
#[derive(Debug, Deserialize, Validate)]
pub struct NovoMedico {
    #[validate(length(min = 1, message = "O CRM é obrigatório."))]
    pub crm: String,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha: String,
    #[validate(length(min = 1, message = "A especialidade é obrigatória."))]
    pub especialidade: String,
}

// Dados para atualização de um médico (apenas ADMIN_SISTEMA)
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AtualizaMedico {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "A especialidade é obrigatória."))]
    pub especialidade: Option<String>,
    pub ativo: Option<bool>,
}
