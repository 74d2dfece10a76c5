// src/models/aceite.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "status_aceite", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusAceite {
    Pendente,
    Aprovado,
    Reprovado,
    Cancelado,
}

impl StatusAceite {
    /// PENDENTE e APROVADO seguram o plantão; os demais estados liberam.
    pub fn ativo(&self) -> bool {
        matches!(self, StatusAceite::Pendente | StatusAceite::Aprovado)
    }
}

/// Aceite de plantão por um médico.
///
/// `dia`, `horario_inicio` e `horario_final` são copiados do plantão no
/// momento da criação: retrato do plantão naquele instante, não uma
/// referência viva. Edições posteriores do plantão não alteram o aceite.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Aceite {
    pub aceite_id: i64,
    pub plantao_id: i64,
    pub medico_id: i64,
    pub dia: String,
    pub horario_inicio: String,
    pub horario_final: String,
    pub status: StatusAceite,
    pub motivo_rejeicao: Option<String>,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

// Dados para criação: o médico vem do ator autenticado, só falta o plantão.
#[derive(Debug, Deserialize)]
pub struct NovoAceite {
    pub plantao_id: Option<i64>,
}

// Só status e motivo_rejeicao podem mudar depois da criação.
#[derive(Debug, Default, Deserialize)]
pub struct AtualizaAceite {
    pub status: Option<StatusAceite>,
    pub motivo_rejeicao: Option<String>,
}

// Filtros de listagem
#[derive(Debug, Default, Deserialize)]
pub struct FiltroAceites {
    pub medico_id: Option<i64>,
    pub plantao_id: Option<i64>,
    pub status: Option<StatusAceite>,
}
