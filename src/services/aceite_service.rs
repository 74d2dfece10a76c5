// src/services/aceite_service.rs

use std::sync::Arc;

use chrono::Utc;

use crate::auditoria::{retrato, RegistradorAuditoria};
use crate::common::error::AppError;
use crate::db::repositorio::{
    AceiteRepositorio, ContadorRepositorio, MedicoRepositorio, PlantaoRepositorio,
};
use crate::models::aceite::{
    Aceite, AtualizaAceite, FiltroAceites, NovoAceite, StatusAceite,
};
use crate::models::ator::{Ator, Papel};
use crate::models::auditoria::Acao;
use crate::services::historico_service::HistoricoService;

#[derive(Clone)]
pub struct AceiteService {
    aceites: Arc<dyn AceiteRepositorio>,
    plantoes: Arc<dyn PlantaoRepositorio>,
    medicos: Arc<dyn MedicoRepositorio>,
    contadores: Arc<dyn ContadorRepositorio>,
    historicos: HistoricoService,
    auditoria: RegistradorAuditoria,
}

impl AceiteService {
    pub fn new(
        aceites: Arc<dyn AceiteRepositorio>,
        plantoes: Arc<dyn PlantaoRepositorio>,
        medicos: Arc<dyn MedicoRepositorio>,
        contadores: Arc<dyn ContadorRepositorio>,
        historicos: HistoricoService,
        auditoria: RegistradorAuditoria,
    ) -> Self {
        Self { aceites, plantoes, medicos, contadores, historicos, auditoria }
    }

    /// MÉDICO aceita um plantão. Valida tudo antes de escrever; depois do
    /// insert, projeta os dois históricos e emite a auditoria.
    pub async fn criar(&self, ator: &Ator, dados: NovoAceite) -> Result<Aceite, AppError> {
        if ator.papel != Papel::Medico {
            return Err(AppError::AcessoNegado(
                "Apenas médicos podem aceitar plantões.".to_string(),
            ));
        }

        let plantao_id = dados.plantao_id.ok_or_else(|| {
            AppError::CampoInvalido("O campo plantao_id é obrigatório.".to_string())
        })?;

        let medico = self
            .medicos
            .buscar_por_id(ator.id)
            .await?
            .ok_or_else(|| {
                AppError::CampoInvalido(
                    "A identidade do médico não pôde ser resolvida.".to_string(),
                )
            })?;

        let plantao = self
            .plantoes
            .buscar_por_id(plantao_id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Plantão".to_string()))?;

        // Um plantão comporta no máximo um aceite ativo por vez.
        if self.aceites.existe_ativo_para_plantao(plantao_id).await? {
            return Err(AppError::Conflito(
                "Este plantão já possui um aceite ativo.".to_string(),
            ));
        }

        let agora = Utc::now();
        let aceite = Aceite {
            aceite_id: self.contadores.proximo("aceite").await?,
            plantao_id,
            medico_id: medico.medico_id,
            // Retrato do plantão neste instante; edições futuras do
            // plantão não mexem no aceite.
            dia: plantao.dia.clone(),
            horario_inicio: plantao.horario_inicio.clone(),
            horario_final: plantao.horario_final.clone(),
            status: StatusAceite::Pendente,
            motivo_rejeicao: None,
            criado_em: agora,
            atualizado_em: agora,
        };
        self.aceites.inserir(&aceite).await?;

        let projecao = self
            .historicos
            .projetar_para_aceite(Some(ator), &aceite, &plantao, &medico)
            .await;

        self.auditoria.registrar(
            Some(ator),
            "AceitaPlantao",
            aceite.aceite_id,
            Acao::Create,
            None,
            retrato(&aceite),
        );

        if let Err(e) = projecao {
            // O aceite já está gravado; o chamador fica sabendo que a
            // projeção não completou em vez de perder o registro.
            tracing::error!(
                "Falha ao projetar históricos do aceite {}: {e}",
                aceite.aceite_id
            );
            return Err(AppError::ProjecaoIncompleta { aceite_id: aceite.aceite_id });
        }

        Ok(aceite)
    }

    pub async fn listar(&self, filtro: &FiltroAceites) -> Result<Vec<Aceite>, AppError> {
        self.aceites.listar(filtro).await
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<Aceite, AppError> {
        self.aceites
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Aceite".to_string()))
    }

    /// Só GESTOR altera aceites, e só status e motivo_rejeicao. Aceite em
    /// estado terminal exige intervenção de ADMIN_SISTEMA.
    pub async fn atualizar(
        &self,
        ator: &Ator,
        id: i64,
        dados: AtualizaAceite,
    ) -> Result<Aceite, AppError> {
        if ator.papel == Papel::Medico {
            return Err(AppError::AcessoNegado(
                "Apenas gestores podem alterar aceites de plantão.".to_string(),
            ));
        }

        let antes = self.buscar_por_id(id).await?;
        if antes.status != StatusAceite::Pendente && ator.papel != Papel::AdminSistema {
            return Err(AppError::Conflito(
                "Aceite em estado terminal só pode ser alterado por ADMIN_SISTEMA.".to_string(),
            ));
        }

        let mut aceite = antes.clone();
        if let Some(status) = dados.status {
            aceite.status = status;
        }
        if let Some(motivo) = dados.motivo_rejeicao {
            aceite.motivo_rejeicao = Some(motivo);
        }
        aceite.atualizado_em = Utc::now();

        self.aceites.atualizar(&aceite).await?;

        self.auditoria.registrar(
            Some(ator),
            "AceitaPlantao",
            aceite.aceite_id,
            Acao::Update,
            retrato(&antes),
            retrato(&aceite),
        );
        Ok(aceite)
    }

    pub async fn remover(&self, ator: &Ator, id: i64) -> Result<(), AppError> {
        if ator.papel != Papel::Gestor {
            return Err(AppError::AcessoNegado(
                "Apenas gestores podem remover aceites de plantão.".to_string(),
            ));
        }
        let antes = self.buscar_por_id(id).await?;
        self.aceites.remover(id).await?;

        self.auditoria.registrar(
            Some(ator),
            "AceitaPlantao",
            id,
            Acao::Delete,
            retrato(&antes),
            None,
        );
        Ok(())
    }
}
