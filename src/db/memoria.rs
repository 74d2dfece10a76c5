// src/db/memoria.rs
//! Implementação em memória de todos os repositórios, sobre um único
//! `Arc<Mutex<…>>` de tabelas. Usada pelos testes e por implantações
//! embutidas; reproduz as mesmas regras de unicidade do esquema Postgres.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::db::repositorio::{
    AceiteRepositorio, ContadorRepositorio, HistoricoGestorRepositorio,
    HistoricoMedicoRepositorio, HospitalRepositorio, LogAuditoriaRepositorio, MedicoRepositorio,
    PlantaoRepositorio, UsuarioRepositorio,
};
use crate::models::aceite::{Aceite, FiltroAceites};
use crate::models::auditoria::{FiltroLogs, LogAuditoria};
use crate::models::historico::{FiltroHistoricos, HistoricoGestor, HistoricoMedico};
use crate::models::hospital::Hospital;
use crate::models::medico::Medico;
use crate::models::plantao::{FiltroPlantoes, Plantao};
use crate::models::usuario::Usuario;

#[derive(Debug, Default)]
struct TabelasInternas {
    hospitais: Vec<Hospital>,
    usuarios: Vec<Usuario>,
    medicos: Vec<Medico>,
    plantoes: Vec<Plantao>,
    aceites: Vec<Aceite>,
    historicos_gestor: Vec<HistoricoGestor>,
    historicos_medico: Vec<HistoricoMedico>,
    logs: Vec<LogAuditoria>,
    contadores: HashMap<String, i64>,
}

#[derive(Debug, Clone, Default)]
pub struct BancoMemoria {
    interno: Arc<Mutex<TabelasInternas>>,
}

impl BancoMemoria {
    pub fn novo() -> Self {
        Self::default()
    }

    fn tabelas(&self) -> Result<MutexGuard<'_, TabelasInternas>, AppError> {
        self.interno
            .lock()
            .map_err(|_| anyhow::anyhow!("mutex do banco em memória envenenado").into())
    }
}

#[async_trait]
impl ContadorRepositorio for BancoMemoria {
    async fn proximo(&self, entidade: &str) -> Result<i64, AppError> {
        let mut tabelas = self.tabelas()?;
        let valor = tabelas.contadores.entry(entidade.to_string()).or_insert(0);
        *valor += 1;
        Ok(*valor)
    }
}

#[async_trait]
impl HospitalRepositorio for BancoMemoria {
    async fn inserir(&self, hospital: &Hospital) -> Result<(), AppError> {
        let mut tabelas = self.tabelas()?;
        if tabelas.hospitais.iter().any(|h| h.email == hospital.email) {
            return Err(AppError::Conflito("Este e-mail já está em uso.".to_string()));
        }
        if tabelas.hospitais.iter().any(|h| h.cnpj == hospital.cnpj) {
            return Err(AppError::Conflito("Este CNPJ já está cadastrado.".to_string()));
        }
        tabelas.hospitais.push(hospital.clone());
        Ok(())
    }

    async fn buscar_por_id(&self, id: i64) -> Result<Option<Hospital>, AppError> {
        Ok(self.tabelas()?.hospitais.iter().find(|h| h.hospital_id == id).cloned())
    }

    async fn buscar_por_email(&self, email: &str) -> Result<Option<Hospital>, AppError> {
        Ok(self.tabelas()?.hospitais.iter().find(|h| h.email == email).cloned())
    }

    async fn buscar_por_cnpj(&self, cnpj: &str) -> Result<Option<Hospital>, AppError> {
        Ok(self.tabelas()?.hospitais.iter().find(|h| h.cnpj == cnpj).cloned())
    }

    async fn listar(&self) -> Result<Vec<Hospital>, AppError> {
        let mut hospitais = self.tabelas()?.hospitais.clone();
        hospitais.sort_by(|a, b| a.nome.cmp(&b.nome));
        Ok(hospitais)
    }

    async fn atualizar(&self, hospital: &Hospital) -> Result<(), AppError> {
        let mut tabelas = self.tabelas()?;
        match tabelas.hospitais.iter_mut().find(|h| h.hospital_id == hospital.hospital_id) {
            Some(existente) => {
                *existente = hospital.clone();
                Ok(())
            }
            None => Err(AppError::NaoEncontrado("Hospital".to_string())),
        }
    }

    async fn remover(&self, id: i64) -> Result<bool, AppError> {
        let mut tabelas = self.tabelas()?;
        let antes = tabelas.hospitais.len();
        tabelas.hospitais.retain(|h| h.hospital_id != id);
        Ok(tabelas.hospitais.len() < antes)
    }
}

#[async_trait]
impl UsuarioRepositorio for BancoMemoria {
    async fn inserir(&self, usuario: &Usuario) -> Result<(), AppError> {
        let mut tabelas = self.tabelas()?;
        if tabelas.usuarios.iter().any(|u| u.email == usuario.email) {
            return Err(AppError::Conflito("Este e-mail já está em uso.".to_string()));
        }
        tabelas.usuarios.push(usuario.clone());
        Ok(())
    }

    async fn buscar_por_id(&self, id: i64) -> Result<Option<Usuario>, AppError> {
        Ok(self.tabelas()?.usuarios.iter().find(|u| u.usuario_id == id).cloned())
    }

    async fn buscar_por_email(&self, email: &str) -> Result<Option<Usuario>, AppError> {
        Ok(self.tabelas()?.usuarios.iter().find(|u| u.email == email).cloned())
    }

    async fn listar(&self) -> Result<Vec<Usuario>, AppError> {
        let mut usuarios = self.tabelas()?.usuarios.clone();
        usuarios.sort_by(|a, b| b.criado_em.cmp(&a.criado_em));
        Ok(usuarios)
    }

    async fn atualizar(&self, usuario: &Usuario) -> Result<(), AppError> {
        let mut tabelas = self.tabelas()?;
        match tabelas.usuarios.iter_mut().find(|u| u.usuario_id == usuario.usuario_id) {
            Some(existente) => {
                *existente = usuario.clone();
                Ok(())
            }
            None => Err(AppError::NaoEncontrado("Usuário".to_string())),
        }
    }
}

#[async_trait]
impl MedicoRepositorio for BancoMemoria {
    async fn inserir(&self, medico: &Medico) -> Result<(), AppError> {
        let mut tabelas = self.tabelas()?;
        if tabelas.medicos.iter().any(|m| m.crm == medico.crm) {
            return Err(AppError::Conflito("Este CRM já está cadastrado.".to_string()));
        }
        if tabelas.medicos.iter().any(|m| m.email == medico.email) {
            return Err(AppError::Conflito("Este e-mail já está em uso.".to_string()));
        }
        tabelas.medicos.push(medico.clone());
        Ok(())
    }

    async fn buscar_por_id(&self, id: i64) -> Result<Option<Medico>, AppError> {
        Ok(self.tabelas()?.medicos.iter().find(|m| m.medico_id == id).cloned())
    }

    async fn buscar_por_crm(&self, crm: &str) -> Result<Option<Medico>, AppError> {
        Ok(self.tabelas()?.medicos.iter().find(|m| m.crm == crm).cloned())
    }

    async fn buscar_por_email(&self, email: &str) -> Result<Option<Medico>, AppError> {
        Ok(self.tabelas()?.medicos.iter().find(|m| m.email == email).cloned())
    }

    async fn listar(&self) -> Result<Vec<Medico>, AppError> {
        let mut medicos = self.tabelas()?.medicos.clone();
        medicos.sort_by(|a, b| b.criado_em.cmp(&a.criado_em));
        Ok(medicos)
    }

    async fn atualizar(&self, medico: &Medico) -> Result<(), AppError> {
        let mut tabelas = self.tabelas()?;
        match tabelas.medicos.iter_mut().find(|m| m.medico_id == medico.medico_id) {
            Some(existente) => {
                *existente = medico.clone();
                Ok(())
            }
            None => Err(AppError::NaoEncontrado("Médico".to_string())),
        }
    }
}

#[async_trait]
impl PlantaoRepositorio for BancoMemoria {
    async fn inserir(&self, plantao: &Plantao) -> Result<(), AppError> {
        self.tabelas()?.plantoes.push(plantao.clone());
        Ok(())
    }

    async fn buscar_por_id(&self, id: i64) -> Result<Option<Plantao>, AppError> {
        Ok(self.tabelas()?.plantoes.iter().find(|p| p.plantao_id == id).cloned())
    }

    async fn listar(&self, filtro: &FiltroPlantoes) -> Result<Vec<Plantao>, AppError> {
        let mut plantoes: Vec<Plantao> = self
            .tabelas()?
            .plantoes
            .iter()
            .filter(|p| filtro.hospital_id.is_none_or(|h| p.hospital_id == h))
            .filter(|p| filtro.status.is_none_or(|s| p.status == s))
            .cloned()
            .collect();
        plantoes.sort_by(|a, b| b.criado_em.cmp(&a.criado_em));
        Ok(plantoes)
    }

    async fn atualizar(&self, plantao: &Plantao) -> Result<(), AppError> {
        let mut tabelas = self.tabelas()?;
        match tabelas.plantoes.iter_mut().find(|p| p.plantao_id == plantao.plantao_id) {
            Some(existente) => {
                *existente = plantao.clone();
                Ok(())
            }
            None => Err(AppError::NaoEncontrado("Plantão".to_string())),
        }
    }

    async fn remover(&self, id: i64) -> Result<bool, AppError> {
        let mut tabelas = self.tabelas()?;
        let antes = tabelas.plantoes.len();
        tabelas.plantoes.retain(|p| p.plantao_id != id);
        Ok(tabelas.plantoes.len() < antes)
    }
}

#[async_trait]
impl AceiteRepositorio for BancoMemoria {
    async fn inserir(&self, aceite: &Aceite) -> Result<(), AppError> {
        self.tabelas()?.aceites.push(aceite.clone());
        Ok(())
    }

    async fn buscar_por_id(&self, id: i64) -> Result<Option<Aceite>, AppError> {
        Ok(self.tabelas()?.aceites.iter().find(|a| a.aceite_id == id).cloned())
    }

    async fn listar(&self, filtro: &FiltroAceites) -> Result<Vec<Aceite>, AppError> {
        let mut aceites: Vec<Aceite> = self
            .tabelas()?
            .aceites
            .iter()
            .filter(|a| filtro.medico_id.is_none_or(|m| a.medico_id == m))
            .filter(|a| filtro.plantao_id.is_none_or(|p| a.plantao_id == p))
            .filter(|a| filtro.status.is_none_or(|s| a.status == s))
            .cloned()
            .collect();
        aceites.sort_by(|a, b| b.criado_em.cmp(&a.criado_em));
        Ok(aceites)
    }

    async fn atualizar(&self, aceite: &Aceite) -> Result<(), AppError> {
        let mut tabelas = self.tabelas()?;
        match tabelas.aceites.iter_mut().find(|a| a.aceite_id == aceite.aceite_id) {
            Some(existente) => {
                *existente = aceite.clone();
                Ok(())
            }
            None => Err(AppError::NaoEncontrado("Aceite".to_string())),
        }
    }

    async fn remover(&self, id: i64) -> Result<bool, AppError> {
        let mut tabelas = self.tabelas()?;
        let antes = tabelas.aceites.len();
        tabelas.aceites.retain(|a| a.aceite_id != id);
        Ok(tabelas.aceites.len() < antes)
    }

    async fn existe_ativo_para_plantao(&self, plantao_id: i64) -> Result<bool, AppError> {
        Ok(self
            .tabelas()?
            .aceites
            .iter()
            .any(|a| a.plantao_id == plantao_id && a.status.ativo()))
    }
}

#[async_trait]
impl HistoricoGestorRepositorio for BancoMemoria {
    async fn inserir(&self, historico: &HistoricoGestor) -> Result<(), AppError> {
        self.tabelas()?.historicos_gestor.push(historico.clone());
        Ok(())
    }

    async fn buscar_por_id(&self, id: i64) -> Result<Option<HistoricoGestor>, AppError> {
        Ok(self
            .tabelas()?
            .historicos_gestor
            .iter()
            .find(|h| h.historico_gestor_id == id)
            .cloned())
    }

    async fn listar(&self, filtro: &FiltroHistoricos) -> Result<Vec<HistoricoGestor>, AppError> {
        let mut historicos: Vec<HistoricoGestor> = self
            .tabelas()?
            .historicos_gestor
            .iter()
            .filter(|h| filtro.crm.as_deref().is_none_or(|c| h.crm == c))
            .filter(|h| filtro.plantao_id.is_none_or(|p| h.plantao_id == p))
            .filter(|h| filtro.aceite_id.is_none_or(|a| h.aceite_id == a))
            .cloned()
            .collect();
        historicos.sort_by(|a, b| b.criado_em.cmp(&a.criado_em));
        Ok(historicos)
    }

    async fn atualizar(&self, historico: &HistoricoGestor) -> Result<(), AppError> {
        let mut tabelas = self.tabelas()?;
        match tabelas
            .historicos_gestor
            .iter_mut()
            .find(|h| h.historico_gestor_id == historico.historico_gestor_id)
        {
            Some(existente) => {
                *existente = historico.clone();
                Ok(())
            }
            None => Err(AppError::NaoEncontrado("Histórico".to_string())),
        }
    }
}

#[async_trait]
impl HistoricoMedicoRepositorio for BancoMemoria {
    async fn inserir(&self, historico: &HistoricoMedico) -> Result<(), AppError> {
        self.tabelas()?.historicos_medico.push(historico.clone());
        Ok(())
    }

    async fn buscar_por_id(&self, id: i64) -> Result<Option<HistoricoMedico>, AppError> {
        Ok(self
            .tabelas()?
            .historicos_medico
            .iter()
            .find(|h| h.historico_medico_id == id)
            .cloned())
    }

    async fn listar_por_crm(&self, crm: &str) -> Result<Vec<HistoricoMedico>, AppError> {
        let mut historicos: Vec<HistoricoMedico> = self
            .tabelas()?
            .historicos_medico
            .iter()
            .filter(|h| h.crm == crm)
            .cloned()
            .collect();
        historicos.sort_by(|a, b| b.criado_em.cmp(&a.criado_em));
        Ok(historicos)
    }

    async fn atualizar(&self, historico: &HistoricoMedico) -> Result<(), AppError> {
        let mut tabelas = self.tabelas()?;
        match tabelas
            .historicos_medico
            .iter_mut()
            .find(|h| h.historico_medico_id == historico.historico_medico_id)
        {
            Some(existente) => {
                *existente = historico.clone();
                Ok(())
            }
            None => Err(AppError::NaoEncontrado("Histórico".to_string())),
        }
    }
}

#[async_trait]
impl LogAuditoriaRepositorio for BancoMemoria {
    async fn anexar(&self, log: &LogAuditoria) -> Result<(), AppError> {
        self.tabelas()?.logs.push(log.clone());
        Ok(())
    }

    async fn buscar_por_id(&self, id: Uuid) -> Result<Option<LogAuditoria>, AppError> {
        Ok(self.tabelas()?.logs.iter().find(|l| l.log_id == id).cloned())
    }

    async fn listar(&self, filtro: &FiltroLogs) -> Result<Vec<LogAuditoria>, AppError> {
        let mut logs: Vec<LogAuditoria> = self
            .tabelas()?
            .logs
            .iter()
            .filter(|l| filtro.usuario_id.is_none_or(|u| l.usuario_id == Some(u)))
            .filter(|l| filtro.hospital_id.is_none_or(|h| l.hospital_id == Some(h)))
            .filter(|l| filtro.entidade.as_deref().is_none_or(|e| l.entidade == e))
            .filter(|l| filtro.acao.is_none_or(|a| l.acao == a))
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.criado_em.cmp(&a.criado_em));
        Ok(logs)
    }
}
