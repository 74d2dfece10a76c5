// src/models/plantao.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "status_plantao", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusPlantao {
    Disponivel,
    Reservado,
    Confirmado,
    Cancelado,
    Concluido,
}

// Representa um plantão vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Plantao {
    pub plantao_id: i64,
    pub hospital_id: i64,
    pub gestor_id: i64,
    pub titulo: String,
    pub descricao: Option<String>,

    // Agenda em formato de exibição: `dd/mm/yyyy` e `HH:MM` 24h,
    // validados no serviço antes de qualquer escrita.
    pub dia: String,
    pub horario_inicio: String,
    pub horario_final: String,

    pub cargo_requerido: String,
    pub tipo: String,
    pub valor: Decimal,
    pub status: StatusPlantao,

    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

// Dados para criação de um plantão
#[derive(Debug, Deserialize, Validate)]
pub struct NovoPlantao {
    pub hospital_id: i64,
    pub gestor_id: i64,
    #[validate(length(min = 3, max = 200, message = "O título deve ter entre 3 e 200 caracteres."))]
    pub titulo: String,
    #[validate(length(max = 1000, message = "A descrição deve ter no máximo 1000 caracteres."))]
    pub descricao: Option<String>,
    pub dia: String,
    pub horario_inicio: String,
    pub horario_final: String,
    #[validate(length(min = 1, max = 100, message = "O cargo requerido deve ter entre 1 e 100 caracteres."))]
    pub cargo_requerido: String,
    #[validate(length(min = 1, max = 50, message = "O tipo deve ter entre 1 e 50 caracteres."))]
    pub tipo: String,
    pub valor: Option<Decimal>,
    pub status: Option<StatusPlantao>,
}

// Dados para atualização (todos opcionais; só o que vier é aplicado)
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AtualizaPlantao {
    pub hospital_id: Option<i64>,
    #[validate(length(min = 3, max = 200, message = "O título deve ter entre 3 e 200 caracteres."))]
    pub titulo: Option<String>,
    #[validate(length(max = 1000, message = "A descrição deve ter no máximo 1000 caracteres."))]
    pub descricao: Option<String>,
    pub dia: Option<String>,
    pub horario_inicio: Option<String>,
    pub horario_final: Option<String>,
    #[validate(length(min = 1, max = 100, message = "O cargo requerido deve ter entre 1 e 100 caracteres."))]
    pub cargo_requerido: Option<String>,
    #[validate(length(min = 1, max = 50, message = "O tipo deve ter entre 1 e 50 caracteres."))]
    pub tipo: Option<String>,
    pub valor: Option<Decimal>,
    pub status: Option<StatusPlantao>,
}

// Filtros de listagem
#[derive(Debug, Default, Deserialize)]
pub struct FiltroPlantoes {
    pub hospital_id: Option<i64>,
    pub status: Option<StatusPlantao>,
}

/// Valida o dia no formato `dd/mm/yyyy`.
pub fn validar_dia(dia: &str) -> Result<(), AppError> {
    NaiveDate::parse_from_str(dia, "%d/%m/%Y")
        .map(|_| ())
        .map_err(|_| AppError::CampoInvalido(format!("Dia inválido: '{dia}'. Use o formato dd/mm/yyyy.")))
}

/// Valida um horário no formato 24h `HH:MM`. A ordem entre início e fim
/// não é verificada: plantões noturnos atravessam a meia-noite.
pub fn validar_horario(horario: &str) -> Result<(), AppError> {
    if horario.len() != 5 {
        return Err(AppError::CampoInvalido(format!(
            "Horário inválido: '{horario}'. Use o formato HH:MM."
        )));
    }
    NaiveTime::parse_from_str(horario, "%H:%M")
        .map(|_| ())
        .map_err(|_| AppError::CampoInvalido(format!("Horário inválido: '{horario}'. Use o formato HH:MM.")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aceita_dia_no_formato_correto() {
        assert!(validar_dia("10/03/2025").is_ok());
        assert!(validar_dia("29/02/2024").is_ok());
    }

    #[test]
    fn rejeita_dia_mal_formado() {
        assert!(validar_dia("2025-03-10").is_err());
        assert!(validar_dia("32/01/2025").is_err());
        assert!(validar_dia("29/02/2025").is_err());
        assert!(validar_dia("").is_err());
    }

    #[test]
    fn aceita_horario_24h() {
        assert!(validar_horario("08:00").is_ok());
        assert!(validar_horario("23:59").is_ok());
        assert!(validar_horario("00:00").is_ok());
    }

    #[test]
    fn rejeita_horario_mal_formado() {
        assert!(validar_horario("8:00").is_err());
        assert!(validar_horario("24:00").is_err());
        assert!(validar_horario("08h00").is_err());
        assert!(validar_horario("0800").is_err());
    }
}
