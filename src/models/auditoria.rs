// src/models/auditoria.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "acao_auditoria", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Acao {
    Create,
    Update,
    Delete,
    Aceitar,
    Cancelar,
    Login,
    Logout,
}

/// Registro imutável de uma ação mutadora: quem, o quê, e os retratos
/// do registro antes e depois. Nunca é atualizado nem removido.
///
/// As referências a usuário e hospital são lógicas (sem chave
/// estrangeira): o log sobrevive à remoção de quem o gerou.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LogAuditoria {
    pub log_id: Uuid,
    pub usuario_id: Option<i64>,
    pub hospital_id: Option<i64>,
    pub entidade: String,
    pub entidade_id: String,
    pub acao: Acao,
    pub dados_anteriores: Option<serde_json::Value>,
    pub dados_posteriores: Option<serde_json::Value>,
    pub ip: Option<String>,
    pub criado_em: DateTime<Utc>,
}

// Filtros de consulta do log
#[derive(Debug, Default, Deserialize)]
pub struct FiltroLogs {
    pub usuario_id: Option<i64>,
    pub hospital_id: Option<i64>,
    pub entidade: Option<String>,
    pub acao: Option<Acao>,
}
