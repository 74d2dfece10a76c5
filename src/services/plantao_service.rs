// src/services/plantao_service.rs

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use validator::Validate;

use crate::auditoria::{retrato, RegistradorAuditoria};
use crate::common::error::AppError;
use crate::db::repositorio::{
    AceiteRepositorio, ContadorRepositorio, HospitalRepositorio, PlantaoRepositorio,
    UsuarioRepositorio,
};
use crate::models::ator::{Ator, Papel};
use crate::models::auditoria::Acao;
use crate::models::plantao::{
    validar_dia, validar_horario, AtualizaPlantao, FiltroPlantoes, NovoPlantao, Plantao,
    StatusPlantao,
};

#[derive(Clone)]
pub struct PlantaoService {
    plantoes: Arc<dyn PlantaoRepositorio>,
    hospitais: Arc<dyn HospitalRepositorio>,
    usuarios: Arc<dyn UsuarioRepositorio>,
    aceites: Arc<dyn AceiteRepositorio>,
    contadores: Arc<dyn ContadorRepositorio>,
    auditoria: RegistradorAuditoria,
}

impl PlantaoService {
    pub fn new(
        plantoes: Arc<dyn PlantaoRepositorio>,
        hospitais: Arc<dyn HospitalRepositorio>,
        usuarios: Arc<dyn UsuarioRepositorio>,
        aceites: Arc<dyn AceiteRepositorio>,
        contadores: Arc<dyn ContadorRepositorio>,
        auditoria: RegistradorAuditoria,
    ) -> Self {
        Self { plantoes, hospitais, usuarios, aceites, contadores, auditoria }
    }

    pub async fn criar(&self, ator: &Ator, dados: NovoPlantao) -> Result<Plantao, AppError> {
        dados.validate()?;
        if ator.papel != Papel::Gestor {
            return Err(AppError::AcessoNegado(
                "Apenas GESTOR pode criar plantões.".to_string(),
            ));
        }

        validar_dia(&dados.dia)?;
        validar_horario(&dados.horario_inicio)?;
        validar_horario(&dados.horario_final)?;

        // Referências validadas na escrita; depois disso são lógicas.
        if self.hospitais.buscar_por_id(dados.hospital_id).await?.is_none() {
            return Err(AppError::NaoEncontrado(format!("Hospital '{}'", dados.hospital_id)));
        }
        let gestor = self
            .usuarios
            .buscar_por_id(dados.gestor_id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado(format!("Usuário '{}'", dados.gestor_id)))?;
        if gestor.papel != Papel::Gestor {
            return Err(AppError::AcessoNegado(
                "O responsável pelo plantão deve ser um usuário GESTOR.".to_string(),
            ));
        }

        let agora = Utc::now();
        let plantao = Plantao {
            plantao_id: self.contadores.proximo("plantao").await?,
            hospital_id: dados.hospital_id,
            gestor_id: dados.gestor_id,
            titulo: dados.titulo.trim().to_string(),
            descricao: dados.descricao,
            dia: dados.dia,
            horario_inicio: dados.horario_inicio,
            horario_final: dados.horario_final,
            cargo_requerido: dados.cargo_requerido.trim().to_string(),
            tipo: dados.tipo.trim().to_string(),
            valor: dados.valor.unwrap_or(Decimal::ZERO),
            status: dados.status.unwrap_or(StatusPlantao::Disponivel),
            criado_em: agora,
            atualizado_em: agora,
        };
        self.plantoes.inserir(&plantao).await?;

        self.auditoria.registrar(
            Some(ator),
            "Plantao",
            plantao.plantao_id,
            Acao::Create,
            None,
            retrato(&plantao),
        );
        Ok(plantao)
    }

    pub async fn listar(&self, filtro: &FiltroPlantoes) -> Result<Vec<Plantao>, AppError> {
        self.plantoes.listar(filtro).await
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<Plantao, AppError> {
        self.plantoes
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Plantão".to_string()))
    }

    pub async fn atualizar(
        &self,
        ator: &Ator,
        id: i64,
        dados: AtualizaPlantao,
    ) -> Result<Plantao, AppError> {
        dados.validate()?;
        if ator.papel != Papel::Gestor {
            return Err(AppError::AcessoNegado(
                "Apenas GESTOR pode atualizar plantões.".to_string(),
            ));
        }

        let antes = self.buscar_por_id(id).await?;
        let mut plantao = antes.clone();

        // Hospital é revalidado quando muda
        if let Some(hospital_id) = dados.hospital_id {
            if self.hospitais.buscar_por_id(hospital_id).await?.is_none() {
                return Err(AppError::NaoEncontrado(format!("Hospital '{hospital_id}'")));
            }
            plantao.hospital_id = hospital_id;
        }
        if let Some(titulo) = dados.titulo {
            plantao.titulo = titulo.trim().to_string();
        }
        if let Some(descricao) = dados.descricao {
            plantao.descricao = Some(descricao);
        }
        if let Some(dia) = dados.dia {
            validar_dia(&dia)?;
            plantao.dia = dia;
        }
        if let Some(horario_inicio) = dados.horario_inicio {
            validar_horario(&horario_inicio)?;
            plantao.horario_inicio = horario_inicio;
        }
        if let Some(horario_final) = dados.horario_final {
            validar_horario(&horario_final)?;
            plantao.horario_final = horario_final;
        }
        if let Some(cargo_requerido) = dados.cargo_requerido {
            plantao.cargo_requerido = cargo_requerido.trim().to_string();
        }
        if let Some(tipo) = dados.tipo {
            plantao.tipo = tipo.trim().to_string();
        }
        if let Some(valor) = dados.valor {
            plantao.valor = valor;
        }
        // Qualquer membro do enum é aceito; não há tabela de adjacência
        // entre estados, e a mudança nunca se propaga aos aceites.
        if let Some(status) = dados.status {
            plantao.status = status;
        }
        plantao.atualizado_em = Utc::now();

        self.plantoes.atualizar(&plantao).await?;

        self.auditoria.registrar(
            Some(ator),
            "Plantao",
            plantao.plantao_id,
            Acao::Update,
            retrato(&antes),
            retrato(&plantao),
        );
        Ok(plantao)
    }

    pub async fn remover(&self, ator: &Ator, id: i64) -> Result<(), AppError> {
        if ator.papel != Papel::Gestor {
            return Err(AppError::AcessoNegado(
                "Apenas GESTOR pode deletar plantões.".to_string(),
            ));
        }
        let antes = self.buscar_por_id(id).await?;

        // Plantão com aceite PENDENTE/APROVADO nunca é removido.
        if self.aceites.existe_ativo_para_plantao(id).await? {
            return Err(AppError::Conflito(
                "O plantão possui um aceite ativo e não pode ser removido.".to_string(),
            ));
        }

        self.plantoes.remover(id).await?;

        self.auditoria.registrar(
            Some(ator),
            "Plantao",
            id,
            Acao::Delete,
            retrato(&antes),
            None,
        );
        Ok(())
    }
}
