// src/services/hospital_service.rs

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::auditoria::{retrato, RegistradorAuditoria};
use crate::common::error::AppError;
use crate::db::repositorio::{ContadorRepositorio, HospitalRepositorio};
use crate::models::ator::{Ator, Papel};
use crate::models::auditoria::Acao;
use crate::models::hospital::{AtualizaHospital, Hospital, NovoHospital};

#[derive(Clone)]
pub struct HospitalService {
    hospitais: Arc<dyn HospitalRepositorio>,
    contadores: Arc<dyn ContadorRepositorio>,
    auditoria: RegistradorAuditoria,
}

impl HospitalService {
    pub fn new(
        hospitais: Arc<dyn HospitalRepositorio>,
        contadores: Arc<dyn ContadorRepositorio>,
        auditoria: RegistradorAuditoria,
    ) -> Self {
        Self { hospitais, contadores, auditoria }
    }

    pub async fn criar(&self, ator: &Ator, dados: NovoHospital) -> Result<Hospital, AppError> {
        dados.validate()?;
        if ator.papel != Papel::AdminSistema {
            return Err(AppError::AcessoNegado(
                "Apenas ADMIN_SISTEMA pode criar hospitais.".to_string(),
            ));
        }

        // E-mail sempre em minúsculas para padronização
        let email = dados.email.trim().to_lowercase();
        let cnpj = dados.cnpj.trim().to_string();

        if self.hospitais.buscar_por_email(&email).await?.is_some() {
            return Err(AppError::Conflito(format!(
                "Já existe um hospital cadastrado com o e-mail '{email}'."
            )));
        }
        if self.hospitais.buscar_por_cnpj(&cnpj).await?.is_some() {
            return Err(AppError::Conflito(format!(
                "Já existe um hospital cadastrado com o CNPJ '{cnpj}'."
            )));
        }

        let agora = Utc::now();
        let hospital = Hospital {
            hospital_id: self.contadores.proximo("hospital").await?,
            nome: dados.nome.trim().to_string(),
            cnpj,
            endereco: dados.endereco.trim().to_string(),
            email,
            subdominio_url: dados.subdominio_url,
            criado_em: agora,
            atualizado_em: agora,
        };
        self.hospitais.inserir(&hospital).await?;

        self.auditoria.registrar(
            Some(ator),
            "Hospital",
            hospital.hospital_id,
            Acao::Create,
            None,
            retrato(&hospital),
        );
        Ok(hospital)
    }

    pub async fn listar(&self) -> Result<Vec<Hospital>, AppError> {
        self.hospitais.listar().await
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<Hospital, AppError> {
        self.hospitais
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Hospital".to_string()))
    }

    pub async fn atualizar(
        &self,
        ator: &Ator,
        id: i64,
        dados: AtualizaHospital,
    ) -> Result<Hospital, AppError> {
        dados.validate()?;
        if ator.papel != Papel::AdminSistema {
            return Err(AppError::AcessoNegado(
                "Apenas ADMIN_SISTEMA pode editar hospitais.".to_string(),
            ));
        }

        let antes = self.buscar_por_id(id).await?;
        let mut hospital = antes.clone();

        if let Some(nome) = dados.nome {
            hospital.nome = nome.trim().to_string();
        }
        if let Some(cnpj) = dados.cnpj {
            let cnpj = cnpj.trim().to_string();
            if cnpj != antes.cnpj && self.hospitais.buscar_por_cnpj(&cnpj).await?.is_some() {
                return Err(AppError::Conflito(format!(
                    "O CNPJ '{cnpj}' já está sendo usado por outro hospital."
                )));
            }
            hospital.cnpj = cnpj;
        }
        if let Some(endereco) = dados.endereco {
            hospital.endereco = endereco.trim().to_string();
        }
        if let Some(email) = dados.email {
            let email = email.trim().to_lowercase();
            if email != antes.email && self.hospitais.buscar_por_email(&email).await?.is_some() {
                return Err(AppError::Conflito(format!(
                    "O e-mail '{email}' já está sendo usado por outro hospital."
                )));
            }
            hospital.email = email;
        }
        if let Some(subdominio) = dados.subdominio_url {
            hospital.subdominio_url = Some(subdominio);
        }
        hospital.atualizado_em = Utc::now();

        self.hospitais.atualizar(&hospital).await?;

        self.auditoria.registrar(
            Some(ator),
            "Hospital",
            hospital.hospital_id,
            Acao::Update,
            retrato(&antes),
            retrato(&hospital),
        );
        Ok(hospital)
    }

    pub async fn remover(&self, ator: &Ator, id: i64) -> Result<(), AppError> {
        if ator.papel != Papel::AdminSistema {
            return Err(AppError::AcessoNegado(
                "Apenas ADMIN_SISTEMA pode remover hospitais.".to_string(),
            ));
        }
        let antes = self.buscar_por_id(id).await?;
        self.hospitais.remover(id).await?;

        self.auditoria.registrar(
            Some(ator),
            "Hospital",
            id,
            Acao::Delete,
            retrato(&antes),
            None,
        );
        Ok(())
    }
}
