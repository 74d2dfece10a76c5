// src/services/historico_service.rs

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::auditoria::{retrato, RegistradorAuditoria};
use crate::common::error::AppError;
use crate::db::repositorio::{
    AceiteRepositorio, ContadorRepositorio, HistoricoGestorRepositorio,
    HistoricoMedicoRepositorio, MedicoRepositorio, PlantaoRepositorio,
};
use crate::models::aceite::Aceite;
use crate::models::ator::Ator;
use crate::models::auditoria::Acao;
use crate::models::historico::{
    AtualizaHistoricoGestor, AtualizaHistoricoMedico, FiltroHistoricos, HistoricoGestor,
    HistoricoMedico, NovoHistoricoGestor, StatusHistoricoMedico,
};
use crate::models::medico::Medico;
use crate::models::plantao::{Plantao, StatusPlantao};

/// Projeta aceites em históricos por papel e serve o lado de leitura.
/// Cada aceite gera exatamente uma linha para o gestor e uma para o
/// médico; as linhas nunca voltam a ser tocadas pela projeção.
#[derive(Clone)]
pub struct HistoricoService {
    historicos_gestor: Arc<dyn HistoricoGestorRepositorio>,
    historicos_medico: Arc<dyn HistoricoMedicoRepositorio>,
    aceites: Arc<dyn AceiteRepositorio>,
    plantoes: Arc<dyn PlantaoRepositorio>,
    medicos: Arc<dyn MedicoRepositorio>,
    contadores: Arc<dyn ContadorRepositorio>,
    auditoria: RegistradorAuditoria,
}

impl HistoricoService {
    pub fn new(
        historicos_gestor: Arc<dyn HistoricoGestorRepositorio>,
        historicos_medico: Arc<dyn HistoricoMedicoRepositorio>,
        aceites: Arc<dyn AceiteRepositorio>,
        plantoes: Arc<dyn PlantaoRepositorio>,
        medicos: Arc<dyn MedicoRepositorio>,
        contadores: Arc<dyn ContadorRepositorio>,
        auditoria: RegistradorAuditoria,
    ) -> Self {
        Self {
            historicos_gestor,
            historicos_medico,
            aceites,
            plantoes,
            medicos,
            contadores,
            auditoria,
        }
    }

    /// Projeção síncrona disparada pela criação de um aceite. Copia a
    /// agenda e os identificadores do instante do aceite.
    pub async fn projetar_para_aceite(
        &self,
        ator: Option<&Ator>,
        aceite: &Aceite,
        plantao: &Plantao,
        medico: &Medico,
    ) -> Result<(HistoricoGestor, HistoricoMedico), AppError> {
        let agora = Utc::now();
        let observacao = aceite.motivo_rejeicao.clone().unwrap_or_default();

        let historico_gestor = HistoricoGestor {
            historico_gestor_id: self.contadores.proximo("historico_gestor").await?,
            plantao_id: plantao.plantao_id,
            aceite_id: aceite.aceite_id,
            crm: medico.crm.clone(),
            dia: aceite.dia.clone(),
            horario_inicio: aceite.horario_inicio.clone(),
            horario_final: aceite.horario_final.clone(),
            status: StatusPlantao::Disponivel,
            observacao: observacao.clone(),
            criado_em: agora,
            atualizado_em: agora,
        };
        self.historicos_gestor.inserir(&historico_gestor).await?;
        self.auditoria.registrar(
            ator,
            "HistoricoGestor",
            historico_gestor.historico_gestor_id,
            Acao::Create,
            None,
            retrato(&historico_gestor),
        );

        let historico_medico = HistoricoMedico {
            historico_medico_id: self.contadores.proximo("historico_medico").await?,
            hospital_id: plantao.hospital_id,
            plantao_id: plantao.plantao_id,
            aceite_id: aceite.aceite_id,
            crm: medico.crm.clone(),
            dia: aceite.dia.clone(),
            horario_inicio: aceite.horario_inicio.clone(),
            horario_final: aceite.horario_final.clone(),
            status: StatusHistoricoMedico::Aceito,
            observacao,
            criado_em: agora,
            atualizado_em: agora,
        };
        self.historicos_medico.inserir(&historico_medico).await?;
        self.auditoria.registrar(
            ator,
            "HistoricoMedico",
            historico_medico.historico_medico_id,
            Acao::Create,
            None,
            retrato(&historico_medico),
        );

        Ok((historico_gestor, historico_medico))
    }

    /// Reprojeta a partir de só um aceite_id, resolvendo aceite, plantão
    /// e médico de novo. Falha com NaoEncontrado se algum já foi removido.
    pub async fn reprojetar_de_aceite(
        &self,
        ator: Option<&Ator>,
        aceite_id: i64,
    ) -> Result<(HistoricoGestor, HistoricoMedico), AppError> {
        let aceite = self
            .aceites
            .buscar_por_id(aceite_id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Aceite".to_string()))?;
        let plantao = self
            .plantoes
            .buscar_por_id(aceite.plantao_id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Plantão".to_string()))?;
        let medico = self
            .medicos
            .buscar_por_id(aceite.medico_id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Médico".to_string()))?;

        self.projetar_para_aceite(ator, &aceite, &plantao, &medico).await
    }

    /// Criação manual de um histórico de gestor: dados ausentes são
    /// herdados do plantão resolvido no momento da escrita.
    pub async fn criar_gestor_manual(
        &self,
        ator: Option<&Ator>,
        dados: NovoHistoricoGestor,
    ) -> Result<HistoricoGestor, AppError> {
        dados.validate()?;

        let medico = self
            .medicos
            .buscar_por_crm(dados.crm.trim())
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Médico (CRM)".to_string()))?;
        let plantao = self
            .plantoes
            .buscar_por_id(dados.plantao_id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Plantão".to_string()))?;
        let aceite = self
            .aceites
            .buscar_por_id(dados.aceite_id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Aceite".to_string()))?;

        let agora = Utc::now();
        let historico = HistoricoGestor {
            historico_gestor_id: self.contadores.proximo("historico_gestor").await?,
            plantao_id: plantao.plantao_id,
            aceite_id: aceite.aceite_id,
            crm: medico.crm.clone(),
            dia: dados.dia.unwrap_or_else(|| plantao.dia.clone()),
            horario_inicio: dados
                .horario_inicio
                .unwrap_or_else(|| plantao.horario_inicio.clone()),
            horario_final: dados
                .horario_final
                .unwrap_or_else(|| plantao.horario_final.clone()),
            status: dados.status.unwrap_or(plantao.status),
            observacao: dados.observacao.unwrap_or_default(),
            criado_em: agora,
            atualizado_em: agora,
        };
        self.historicos_gestor.inserir(&historico).await?;

        self.auditoria.registrar(
            ator,
            "HistoricoGestor",
            historico.historico_gestor_id,
            Acao::Create,
            None,
            retrato(&historico),
        );
        Ok(historico)
    }

    pub async fn listar_gestor(
        &self,
        filtro: &FiltroHistoricos,
    ) -> Result<Vec<HistoricoGestor>, AppError> {
        self.historicos_gestor.listar(filtro).await
    }

    pub async fn buscar_gestor(&self, id: i64) -> Result<HistoricoGestor, AppError> {
        self.historicos_gestor
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Histórico".to_string()))
    }

    /// Correção pontual: só status e observação, pelo PUT por id.
    pub async fn atualizar_gestor(
        &self,
        ator: Option<&Ator>,
        id: i64,
        dados: AtualizaHistoricoGestor,
    ) -> Result<HistoricoGestor, AppError> {
        let antes = self.buscar_gestor(id).await?;
        let mut historico = antes.clone();
        if let Some(status) = dados.status {
            historico.status = status;
        }
        if let Some(observacao) = dados.observacao {
            historico.observacao = observacao;
        }
        historico.atualizado_em = Utc::now();
        self.historicos_gestor.atualizar(&historico).await?;

        self.auditoria.registrar(
            ator,
            "HistoricoGestor",
            historico.historico_gestor_id,
            Acao::Update,
            retrato(&antes),
            retrato(&historico),
        );
        Ok(historico)
    }

    /// Histórico do médico pelo CRM; o CRM precisa resolver para um
    /// médico registrado.
    pub async fn listar_medico_por_crm(
        &self,
        crm: &str,
    ) -> Result<Vec<HistoricoMedico>, AppError> {
        if self.medicos.buscar_por_crm(crm).await?.is_none() {
            return Err(AppError::NaoEncontrado("Médico (CRM)".to_string()));
        }
        self.historicos_medico.listar_por_crm(crm).await
    }

    pub async fn buscar_medico(&self, id: i64) -> Result<HistoricoMedico, AppError> {
        self.historicos_medico
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Histórico".to_string()))
    }

    pub async fn atualizar_medico(
        &self,
        ator: Option<&Ator>,
        id: i64,
        dados: AtualizaHistoricoMedico,
    ) -> Result<HistoricoMedico, AppError> {
        let antes = self.buscar_medico(id).await?;
        let mut historico = antes.clone();
        if let Some(status) = dados.status {
            historico.status = status;
        }
        if let Some(observacao) = dados.observacao {
            historico.observacao = observacao;
        }
        historico.atualizado_em = Utc::now();
        self.historicos_medico.atualizar(&historico).await?;

        self.auditoria.registrar(
            ator,
            "HistoricoMedico",
            historico.historico_medico_id,
            Acao::Update,
            retrato(&antes),
            retrato(&historico),
        );
        Ok(historico)
    }
}
