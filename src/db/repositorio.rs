//! Traits de repositório: a costura entre os serviços e o armazenamento.
//!
//! Há duas implementações: Postgres (`Pg*`) e em memória (`BancoMemoria`),
//! usada pelos testes e por implantações embutidas.

use async_trait::async_trait;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::aceite::{Aceite, FiltroAceites};
use crate::models::auditoria::{FiltroLogs, LogAuditoria};
use crate::models::historico::{FiltroHistoricos, HistoricoGestor, HistoricoMedico};
use crate::models::hospital::Hospital;
use crate::models::medico::Medico;
use crate::models::plantao::{FiltroPlantoes, Plantao};
use crate::models::usuario::Usuario;

/// Contador durável de IDs sequenciais por entidade.
#[async_trait]
pub trait ContadorRepositorio: Send + Sync {
    /// Incrementa e devolve o próximo valor em uma única operação
    /// atômica. Nunca é "ler o máximo e somar um": dois criadores
    /// concorrentes jamais recebem o mesmo id.
    async fn proximo(&self, entidade: &str) -> Result<i64, AppError>;
}

#[async_trait]
pub trait HospitalRepositorio: Send + Sync {
    async fn inserir(&self, hospital: &Hospital) -> Result<(), AppError>;
    async fn buscar_por_id(&self, id: i64) -> Result<Option<Hospital>, AppError>;
    async fn buscar_por_email(&self, email: &str) -> Result<Option<Hospital>, AppError>;
    async fn buscar_por_cnpj(&self, cnpj: &str) -> Result<Option<Hospital>, AppError>;
    async fn listar(&self) -> Result<Vec<Hospital>, AppError>;
    async fn atualizar(&self, hospital: &Hospital) -> Result<(), AppError>;
    async fn remover(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait UsuarioRepositorio: Send + Sync {
    async fn inserir(&self, usuario: &Usuario) -> Result<(), AppError>;
    async fn buscar_por_id(&self, id: i64) -> Result<Option<Usuario>, AppError>;
    async fn buscar_por_email(&self, email: &str) -> Result<Option<Usuario>, AppError>;
    async fn listar(&self) -> Result<Vec<Usuario>, AppError>;
    async fn atualizar(&self, usuario: &Usuario) -> Result<(), AppError>;
}

#[async_trait]
pub trait MedicoRepositorio: Send + Sync {
    async fn inserir(&self, medico: &Medico) -> Result<(), AppError>;
    async fn buscar_por_id(&self, id: i64) -> Result<Option<Medico>, AppError>;
    async fn buscar_por_crm(&self, crm: &str) -> Result<Option<Medico>, AppError>;
    async fn buscar_por_email(&self, email: &str) -> Result<Option<Medico>, AppError>;
    async fn listar(&self) -> Result<Vec<Medico>, AppError>;
    async fn atualizar(&self, medico: &Medico) -> Result<(), AppError>;
}

#[async_trait]
pub trait PlantaoRepositorio: Send + Sync {
    async fn inserir(&self, plantao: &Plantao) -> Result<(), AppError>;
    async fn buscar_por_id(&self, id: i64) -> Result<Option<Plantao>, AppError>;
    async fn listar(&self, filtro: &FiltroPlantoes) -> Result<Vec<Plantao>, AppError>;
    async fn atualizar(&self, plantao: &Plantao) -> Result<(), AppError>;
    async fn remover(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait AceiteRepositorio: Send + Sync {
    async fn inserir(&self, aceite: &Aceite) -> Result<(), AppError>;
    async fn buscar_por_id(&self, id: i64) -> Result<Option<Aceite>, AppError>;
    async fn listar(&self, filtro: &FiltroAceites) -> Result<Vec<Aceite>, AppError>;
    async fn atualizar(&self, aceite: &Aceite) -> Result<(), AppError>;
    async fn remover(&self, id: i64) -> Result<bool, AppError>;
    /// Existe aceite PENDENTE ou APROVADO segurando este plantão?
    async fn existe_ativo_para_plantao(&self, plantao_id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait HistoricoGestorRepositorio: Send + Sync {
    async fn inserir(&self, historico: &HistoricoGestor) -> Result<(), AppError>;
    async fn buscar_por_id(&self, id: i64) -> Result<Option<HistoricoGestor>, AppError>;
    async fn listar(&self, filtro: &FiltroHistoricos) -> Result<Vec<HistoricoGestor>, AppError>;
    async fn atualizar(&self, historico: &HistoricoGestor) -> Result<(), AppError>;
}

#[async_trait]
pub trait HistoricoMedicoRepositorio: Send + Sync {
    async fn inserir(&self, historico: &HistoricoMedico) -> Result<(), AppError>;
    async fn buscar_por_id(&self, id: i64) -> Result<Option<HistoricoMedico>, AppError>;
    async fn listar_por_crm(&self, crm: &str) -> Result<Vec<HistoricoMedico>, AppError>;
    async fn atualizar(&self, historico: &HistoricoMedico) -> Result<(), AppError>;
}

/// Trilha de auditoria: só anexa e consulta. Não existem operações de
/// atualização ou remoção.
#[async_trait]
pub trait LogAuditoriaRepositorio: Send + Sync {
    async fn anexar(&self, log: &LogAuditoria) -> Result<(), AppError>;
    async fn buscar_por_id(&self, id: Uuid) -> Result<Option<LogAuditoria>, AppError>;
    async fn listar(&self, filtro: &FiltroLogs) -> Result<Vec<LogAuditoria>, AppError>;
}
