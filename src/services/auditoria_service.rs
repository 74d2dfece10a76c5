// src/services/auditoria_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::common::error::AppError;
use crate::db::repositorio::LogAuditoriaRepositorio;
use crate::models::auditoria::{FiltroLogs, LogAuditoria};

// Lado de leitura da trilha de auditoria. A escrita passa pelo
// RegistradorAuditoria, nunca por aqui.
#[derive(Clone)]
pub struct AuditoriaService {
    logs: Arc<dyn LogAuditoriaRepositorio>,
}

impl AuditoriaService {
    pub fn new(logs: Arc<dyn LogAuditoriaRepositorio>) -> Self {
        Self { logs }
    }

    pub async fn listar(&self, filtro: &FiltroLogs) -> Result<Vec<LogAuditoria>, AppError> {
        self.logs.listar(filtro).await
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<LogAuditoria, AppError> {
        self.logs
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Log de auditoria".to_string()))
    }
}
