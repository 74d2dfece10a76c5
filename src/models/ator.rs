// src/models/ator.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Papel de quem executa uma operação. GESTOR e ADMIN_SISTEMA vêm da
/// tabela de usuários; MEDICO vem do cadastro próprio dos médicos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "papel", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Papel {
    Gestor,
    AdminSistema,
    Medico,
}

/// Identidade autenticada que acompanha toda operação do núcleo.
/// A verificação de credenciais e a emissão de token acontecem na borda;
/// aqui só interessa quem é, qual papel tem e de onde veio.
#[derive(Debug, Clone)]
pub struct Ator {
    pub id: i64,
    pub papel: Papel,
    pub hospital_id: Option<i64>,
    pub ip: Option<String>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate)]
pub struct CredenciaisLogin {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize)]
pub struct RespostaAuth {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,    // ID do usuário ou do médico
    pub papel: Papel,
    pub hospital_id: Option<i64>,
    pub exp: usize,  // Expiration time (quando o token expira)
    pub iat: usize,  // Issued At (quando o token foi criado)
}
