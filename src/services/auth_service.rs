// src/services/auth_service.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use validator::Validate;

use crate::auditoria::RegistradorAuditoria;
use crate::common::error::AppError;
use crate::db::repositorio::{MedicoRepositorio, UsuarioRepositorio};
use crate::models::ator::{Ator, Claims, CredenciaisLogin, Papel, RespostaAuth};
use crate::models::auditoria::Acao;

// Executa o hashing em um thread separado para não travar o runtime.
pub(crate) async fn gerar_hash_senha(senha: &str) -> Result<String, AppError> {
    let senha_clone = senha.to_owned();
    let senha_hash = tokio::task::spawn_blocking(move || hash(&senha_clone, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(senha_hash)
}

async fn verificar_senha(senha: &str, senha_hash: &str) -> Result<bool, AppError> {
    let senha_clone = senha.to_owned();
    let hash_clone = senha_hash.to_owned();
    let valida = tokio::task::spawn_blocking(move || verify(&senha_clone, &hash_clone))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
    Ok(valida)
}

/// Verificação de credenciais e emissão de token. O núcleo só consome o
/// `Ator` resultante; os algoritmos em si são capacidade opaca da borda.
#[derive(Clone)]
pub struct AuthService {
    usuarios: Arc<dyn UsuarioRepositorio>,
    medicos: Arc<dyn MedicoRepositorio>,
    auditoria: RegistradorAuditoria,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(
        usuarios: Arc<dyn UsuarioRepositorio>,
        medicos: Arc<dyn MedicoRepositorio>,
        auditoria: RegistradorAuditoria,
        jwt_secret: String,
    ) -> Self {
        Self { usuarios, medicos, auditoria, jwt_secret }
    }

    pub async fn login_usuario(
        &self,
        credenciais: CredenciaisLogin,
        ip: Option<String>,
    ) -> Result<RespostaAuth, AppError> {
        credenciais.validate()?;
        let usuario = self
            .usuarios
            .buscar_por_email(&credenciais.email.trim().to_lowercase())
            .await?
            .ok_or(AppError::CredenciaisInvalidas)?;

        if !usuario.ativo {
            return Err(AppError::CredenciaisInvalidas);
        }
        if !verificar_senha(&credenciais.senha, &usuario.senha_hash).await? {
            return Err(AppError::CredenciaisInvalidas);
        }

        let token = self.criar_token(usuario.usuario_id, usuario.papel, usuario.hospital_id)?;

        let ator = Ator {
            id: usuario.usuario_id,
            papel: usuario.papel,
            hospital_id: usuario.hospital_id,
            ip,
        };
        self.auditoria
            .registrar(Some(&ator), "Usuario", usuario.usuario_id, Acao::Login, None, None);

        Ok(RespostaAuth { token })
    }

    pub async fn login_medico(
        &self,
        credenciais: CredenciaisLogin,
        ip: Option<String>,
    ) -> Result<RespostaAuth, AppError> {
        credenciais.validate()?;
        let medico = self
            .medicos
            .buscar_por_email(&credenciais.email.trim().to_lowercase())
            .await?
            .ok_or(AppError::CredenciaisInvalidas)?;

        if !medico.ativo {
            return Err(AppError::CredenciaisInvalidas);
        }
        if !verificar_senha(&credenciais.senha, &medico.senha_hash).await? {
            return Err(AppError::CredenciaisInvalidas);
        }

        let token = self.criar_token(medico.medico_id, Papel::Medico, None)?;

        let ator = Ator {
            id: medico.medico_id,
            papel: Papel::Medico,
            hospital_id: None,
            ip,
        };
        self.auditoria
            .registrar(Some(&ator), "Medico", medico.medico_id, Acao::Login, None, None);

        Ok(RespostaAuth { token })
    }

    pub fn logout(&self, ator: &Ator) {
        let entidade = match ator.papel {
            Papel::Medico => "Medico",
            _ => "Usuario",
        };
        self.auditoria
            .registrar(Some(ator), entidade, ator.id, Acao::Logout, None, None);
    }

    /// Valida o token e reconstrói o ator, conferindo se a conta ainda
    /// existe e continua ativa.
    pub async fn validar_token(&self, token: &str) -> Result<Ator, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::TokenInvalido)?;

        let claims = token_data.claims;
        match claims.papel {
            Papel::Medico => {
                let medico = self
                    .medicos
                    .buscar_por_id(claims.sub)
                    .await?
                    .filter(|m| m.ativo)
                    .ok_or(AppError::TokenInvalido)?;
                Ok(Ator {
                    id: medico.medico_id,
                    papel: Papel::Medico,
                    hospital_id: None,
                    ip: None,
                })
            }
            _ => {
                let usuario = self
                    .usuarios
                    .buscar_por_id(claims.sub)
                    .await?
                    .filter(|u| u.ativo)
                    .ok_or(AppError::TokenInvalido)?;
                Ok(Ator {
                    id: usuario.usuario_id,
                    papel: usuario.papel,
                    hospital_id: usuario.hospital_id,
                    ip: None,
                })
            }
        }
    }

    fn criar_token(
        &self,
        sub: i64,
        papel: Papel,
        hospital_id: Option<i64>,
    ) -> Result<String, AppError> {
        let agora = Utc::now();
        let expira_em = agora + chrono::Duration::days(7);

        let claims = Claims {
            sub,
            papel,
            hospital_id,
            exp: expira_em.timestamp() as usize,
            iat: agora.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
