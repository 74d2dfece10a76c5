// src/services/usuario_service.rs

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::auditoria::{retrato, RegistradorAuditoria};
use crate::common::error::AppError;
use crate::db::repositorio::{ContadorRepositorio, HospitalRepositorio, UsuarioRepositorio};
use crate::models::ator::{Ator, Papel};
use crate::models::auditoria::Acao;
use crate::models::usuario::{AtualizaUsuario, NovoUsuario, Usuario};
use crate::services::auth_service::gerar_hash_senha;

#[derive(Clone)]
pub struct UsuarioService {
    usuarios: Arc<dyn UsuarioRepositorio>,
    hospitais: Arc<dyn HospitalRepositorio>,
    contadores: Arc<dyn ContadorRepositorio>,
    auditoria: RegistradorAuditoria,
}

impl UsuarioService {
    pub fn new(
        usuarios: Arc<dyn UsuarioRepositorio>,
        hospitais: Arc<dyn HospitalRepositorio>,
        contadores: Arc<dyn ContadorRepositorio>,
        auditoria: RegistradorAuditoria,
    ) -> Self {
        Self { usuarios, hospitais, contadores, auditoria }
    }

    pub async fn criar(&self, ator: &Ator, dados: NovoUsuario) -> Result<Usuario, AppError> {
        dados.validate()?;
        if ator.papel != Papel::AdminSistema {
            return Err(AppError::AcessoNegado(
                "Apenas ADMIN_SISTEMA pode criar usuários.".to_string(),
            ));
        }
        if dados.papel == Papel::Medico {
            return Err(AppError::CampoInvalido(
                "Papel inválido: médicos têm cadastro próprio.".to_string(),
            ));
        }
        // hospital_id só é dispensável para ADMIN_SISTEMA
        if dados.papel == Papel::Gestor && dados.hospital_id.is_none() {
            return Err(AppError::CampoInvalido(
                "hospital_id é obrigatório para usuários GESTOR.".to_string(),
            ));
        }
        if let Some(hospital_id) = dados.hospital_id {
            if self.hospitais.buscar_por_id(hospital_id).await?.is_none() {
                return Err(AppError::NaoEncontrado(format!("Hospital '{hospital_id}'")));
            }
        }

        let email = dados.email.trim().to_lowercase();
        if self.usuarios.buscar_por_email(&email).await?.is_some() {
            return Err(AppError::Conflito(format!(
                "Já existe um usuário cadastrado com o e-mail '{email}'."
            )));
        }

        let senha_hash = gerar_hash_senha(&dados.senha).await?;

        let agora = Utc::now();
        let usuario = Usuario {
            usuario_id: self.contadores.proximo("usuario").await?,
            hospital_id: dados.hospital_id,
            nome: dados.nome.trim().to_string(),
            email,
            senha_hash,
            papel: dados.papel,
            telefone: dados.telefone,
            ativo: true,
            criado_em: agora,
            atualizado_em: agora,
        };
        self.usuarios.inserir(&usuario).await?;

        self.auditoria.registrar(
            Some(ator),
            "Usuario",
            usuario.usuario_id,
            Acao::Create,
            None,
            retrato(&usuario),
        );
        Ok(usuario)
    }

    pub async fn listar(&self) -> Result<Vec<Usuario>, AppError> {
        self.usuarios.listar().await
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<Usuario, AppError> {
        self.usuarios
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Usuário".to_string()))
    }

    pub async fn atualizar(
        &self,
        ator: &Ator,
        id: i64,
        dados: AtualizaUsuario,
    ) -> Result<Usuario, AppError> {
        dados.validate()?;
        if ator.papel != Papel::AdminSistema {
            return Err(AppError::AcessoNegado(
                "Acesso negado. Apenas ADMIN_SISTEMA pode editar usuários.".to_string(),
            ));
        }

        let antes = self.buscar_por_id(id).await?;
        let mut usuario = antes.clone();

        if let Some(nome) = dados.nome {
            usuario.nome = nome.trim().to_string();
        }
        if let Some(email) = dados.email {
            let email = email.trim().to_lowercase();
            // Não pode ser o mesmo e-mail de outro usuário
            if let Some(existente) = self.usuarios.buscar_por_email(&email).await? {
                if existente.usuario_id != antes.usuario_id {
                    return Err(AppError::Conflito(format!(
                        "O e-mail '{email}' já está sendo usado por outro usuário."
                    )));
                }
            }
            usuario.email = email;
        }
        if let Some(senha) = dados.senha {
            usuario.senha_hash = gerar_hash_senha(&senha).await?;
        }
        if let Some(papel) = dados.papel {
            if papel == Papel::Medico {
                return Err(AppError::CampoInvalido(
                    "Papel inválido: médicos têm cadastro próprio.".to_string(),
                ));
            }
            usuario.papel = papel;
        }
        if let Some(telefone) = dados.telefone {
            usuario.telefone = Some(telefone);
        }
        if let Some(ativo) = dados.ativo {
            usuario.ativo = ativo;
        }
        if let Some(hospital_id) = dados.hospital_id {
            if self.hospitais.buscar_por_id(hospital_id).await?.is_none() {
                return Err(AppError::NaoEncontrado(format!("Hospital '{hospital_id}'")));
            }
            usuario.hospital_id = Some(hospital_id);
        }
        usuario.atualizado_em = Utc::now();

        self.usuarios.atualizar(&usuario).await?;

        self.auditoria.registrar(
            Some(ator),
            "Usuario",
            usuario.usuario_id,
            Acao::Update,
            retrato(&antes),
            retrato(&usuario),
        );
        Ok(usuario)
    }

    /// Remoção é sempre lógica: usuários com referências históricas nunca
    /// somem, apenas deixam de poder operar.
    pub async fn desativar(&self, ator: &Ator, id: i64) -> Result<Usuario, AppError> {
        if ator.papel != Papel::AdminSistema {
            return Err(AppError::AcessoNegado(
                "Acesso negado. Apenas ADMIN_SISTEMA pode remover usuários.".to_string(),
            ));
        }
        let antes = self.buscar_por_id(id).await?;
        let mut usuario = antes.clone();
        usuario.ativo = false;
        usuario.atualizado_em = Utc::now();
        self.usuarios.atualizar(&usuario).await?;

        self.auditoria.registrar(
            Some(ator),
            "Usuario",
            usuario.usuario_id,
            Acao::Delete,
            retrato(&antes),
            retrato(&usuario),
        );
        Ok(usuario)
    }
}
