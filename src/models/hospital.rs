// src/models/hospital.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// Representa um hospital vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Hospital {
    pub hospital_id: i64,
    pub nome: String,
    pub cnpj: String,
    pub endereco: String,
    pub email: String,
    pub subdominio_url: Option<String>,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

// Dados para cadastro de um novo hospital
#[derive(Debug, Deserialize, Validate)]
pub struct NovoHospital {
    #[validate(length(min = 1, max = 200, message = "O nome deve ter entre 1 e 200 caracteres."))]
    pub nome: String,
    // CNPJ com ou sem máscara; String preserva zeros à esquerda
    #[validate(length(min = 14, max = 18, message = "O CNPJ deve ter entre 14 e 18 caracteres."))]
    pub cnpj: String,
    #[validate(length(min = 1, max = 300, message = "O endereço deve ter entre 1 e 300 caracteres."))]
    pub endereco: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    pub subdominio_url: Option<String>,
}

// Dados para atualização (todos opcionais)
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AtualizaHospital {
    #[validate(length(min = 1, max = 200, message = "O nome deve ter entre 1 e 200 caracteres."))]
    pub nome: Option<String>,
    #[validate(length(min = 14, max = 18, message = "O CNPJ deve ter entre 14 e 18 caracteres."))]
    pub cnpj: Option<String>,
    #[validate(length(min = 1, max = 300, message = "O endereço deve ter entre 1 e 300 caracteres."))]
    pub endereco: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub subdominio_url: Option<String>,
}
