// src/services/medico_service.rs

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::auditoria::{retrato, RegistradorAuditoria};
use crate::common::error::AppError;
use crate::db::repositorio::{ContadorRepositorio, MedicoRepositorio};
use crate::models::ator::{Ator, Papel};
use crate::models::auditoria::Acao;
use crate::models::medico::{AtualizaMedico, Medico, NovoMedico};
use crate::services::auth_service::gerar_hash_senha;

#[derive(Clone)]
pub struct MedicoService {
    medicos: Arc<dyn MedicoRepositorio>,
    contadores: Arc<dyn ContadorRepositorio>,
    auditoria: RegistradorAuditoria,
}

impl MedicoService {
    pub fn new(
        medicos: Arc<dyn MedicoRepositorio>,
        contadores: Arc<dyn ContadorRepositorio>,
        auditoria: RegistradorAuditoria,
    ) -> Self {
        Self { medicos, contadores, auditoria }
    }

    /// Auto-cadastro: não exige ator autenticado. Mutação posterior, sim.
    pub async fn cadastrar(&self, dados: NovoMedico) -> Result<Medico, AppError> {
        dados.validate()?;

        let crm = dados.crm.trim().to_string();
        let email = dados.email.trim().to_lowercase();

        if self.medicos.buscar_por_crm(&crm).await?.is_some() {
            return Err(AppError::Conflito(format!(
                "Já existe um médico cadastrado com o CRM '{crm}'."
            )));
        }
        if self.medicos.buscar_por_email(&email).await?.is_some() {
            return Err(AppError::Conflito(format!(
                "Já existe um médico cadastrado com o e-mail '{email}'."
            )));
        }

        let senha_hash = gerar_hash_senha(&dados.senha).await?;

        let agora = Utc::now();
        let medico = Medico {
            medico_id: self.contadores.proximo("medico").await?,
            crm,
            nome: dados.nome.trim().to_string(),
            email,
            senha_hash,
            especialidade: dados.especialidade.trim().to_string(),
            ativo: true,
            criado_em: agora,
            atualizado_em: agora,
        };
        self.medicos.inserir(&medico).await?;

        self.auditoria.registrar(
            None,
            "Medico",
            medico.medico_id,
            Acao::Create,
            None,
            retrato(&medico),
        );
        Ok(medico)
    }

    pub async fn listar(&self) -> Result<Vec<Medico>, AppError> {
        self.medicos.listar().await
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<Medico, AppError> {
        self.medicos
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Médico".to_string()))
    }

    pub async fn buscar_por_crm(&self, crm: &str) -> Result<Medico, AppError> {
        self.medicos
            .buscar_por_crm(crm)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Médico".to_string()))
    }

    pub async fn atualizar(
        &self,
        ator: &Ator,
        id: i64,
        dados: AtualizaMedico,
    ) -> Result<Medico, AppError> {
        dados.validate()?;
        if ator.papel != Papel::AdminSistema {
            return Err(AppError::AcessoNegado(
                "Apenas ADMIN_SISTEMA pode editar médicos.".to_string(),
            ));
        }

        let antes = self.buscar_por_id(id).await?;
        let mut medico = antes.clone();

        if let Some(nome) = dados.nome {
            medico.nome = nome.trim().to_string();
        }
        if let Some(email) = dados.email {
            let email = email.trim().to_lowercase();
            if let Some(existente) = self.medicos.buscar_por_email(&email).await? {
                if existente.medico_id != antes.medico_id {
                    return Err(AppError::Conflito(format!(
                        "O e-mail '{email}' já está sendo usado por outro médico."
                    )));
                }
            }
            medico.email = email;
        }
        if let Some(especialidade) = dados.especialidade {
            medico.especialidade = especialidade.trim().to_string();
        }
        if let Some(ativo) = dados.ativo {
            medico.ativo = ativo;
        }
        medico.atualizado_em = Utc::now();

        self.medicos.atualizar(&medico).await?;

        self.auditoria.registrar(
            Some(ator),
            "Medico",
            medico.medico_id,
            Acao::Update,
            retrato(&antes),
            retrato(&medico),
        );
        Ok(medico)
    }

    /// Remoção lógica, nunca física: o CRM continua referenciado por
    /// aceites e históricos antigos.
    pub async fn desativar(&self, ator: &Ator, id: i64) -> Result<Medico, AppError> {
        if ator.papel != Papel::AdminSistema {
            return Err(AppError::AcessoNegado(
                "Apenas ADMIN_SISTEMA pode remover médicos.".to_string(),
            ));
        }
        let antes = self.buscar_por_id(id).await?;
        let mut medico = antes.clone();
        medico.ativo = false;
        medico.atualizado_em = Utc::now();
        self.medicos.atualizar(&medico).await?;

        self.auditoria.registrar(
            Some(ator),
            "Medico",
            medico.medico_id,
            Acao::Delete,
            retrato(&antes),
            retrato(&medico),
        );
        Ok(medico)
    }
}
