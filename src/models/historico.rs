// src/models/historico.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::plantao::StatusPlantao;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "status_historico_medico", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusHistoricoMedico {
    Aceito,
    Realizado,
    Cancelado,
    Faltou,
}

/// Projeção voltada ao gestor, derivada de um aceite. Os campos de agenda
/// e identificadores são cópias tiradas no instante da projeção.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HistoricoGestor {
    pub historico_gestor_id: i64,
    pub plantao_id: i64,
    pub aceite_id: i64,
    pub crm: String,
    pub dia: String,
    pub horario_inicio: String,
    pub horario_final: String,
    pub status: StatusPlantao,
    pub observacao: String,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

/// Projeção voltada ao médico, derivada do mesmo aceite.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HistoricoMedico {
    pub historico_medico_id: i64,
    pub hospital_id: i64,
    pub plantao_id: i64,
    pub aceite_id: i64,
    pub crm: String,
    pub dia: String,
    pub horario_inicio: String,
    pub horario_final: String,
    pub status: StatusHistoricoMedico,
    pub observacao: String,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

// Criação manual de um histórico de gestor: dados ausentes são herdados
// do plantão resolvido no momento da escrita.
#[derive(Debug, Deserialize, Validate)]
pub struct NovoHistoricoGestor {
    #[validate(length(min = 1, message = "O CRM é obrigatório."))]
    pub crm: String,
    pub plantao_id: i64,
    pub aceite_id: i64,
    pub dia: Option<String>,
    pub horario_inicio: Option<String>,
    pub horario_final: Option<String>,
    pub status: Option<StatusPlantao>,
    #[validate(length(max = 1000, message = "A observação deve ter no máximo 1000 caracteres."))]
    pub observacao: Option<String>,
}

// Correção pontual de um histórico de gestor (PUT por id)
#[derive(Debug, Default, Deserialize)]
pub struct AtualizaHistoricoGestor {
    pub status: Option<StatusPlantao>,
    pub observacao: Option<String>,
}

// Correção pontual de um histórico de médico
#[derive(Debug, Default, Deserialize)]
pub struct AtualizaHistoricoMedico {
    pub status: Option<StatusHistoricoMedico>,
    pub observacao: Option<String>,
}

// Filtros de listagem: ?crm=...&plantao_id=...&aceite_id=...
#[derive(Debug, Default, Deserialize)]
pub struct FiltroHistoricos {
    pub crm: Option<String>,
    pub plantao_id: Option<i64>,
    pub aceite_id: Option<i64>,
}
