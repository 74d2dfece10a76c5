// src/auditoria.rs
//! Trilha de auditoria desacoplada: a operação de negócio emite uma
//! intenção no canal e segue em frente; o consumidor persiste. Falha na
//! gravação do log nunca derruba nem desfaz a operação principal.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::db::repositorio::LogAuditoriaRepositorio;
use crate::models::ator::{Ator, Papel};
use crate::models::auditoria::{Acao, LogAuditoria};

/// Intenção de auditoria emitida por uma operação de negócio.
#[derive(Debug)]
pub struct IntencaoAuditoria {
    pub usuario_id: Option<i64>,
    pub hospital_id: Option<i64>,
    pub entidade: String,
    pub entidade_id: String,
    pub acao: Acao,
    pub dados_anteriores: Option<Value>,
    pub dados_posteriores: Option<Value>,
    pub ip: Option<String>,
}

/// Ponta emissora: clonada para dentro de cada serviço.
#[derive(Clone)]
pub struct RegistradorAuditoria {
    tx: mpsc::UnboundedSender<IntencaoAuditoria>,
}

impl RegistradorAuditoria {
    /// Emite uma intenção de auditoria. Não bloqueia e não falha: se o
    /// consumidor já encerrou, o evento é descartado com um aviso.
    pub fn registrar(
        &self,
        ator: Option<&Ator>,
        entidade: &str,
        entidade_id: impl std::fmt::Display,
        acao: Acao,
        dados_anteriores: Option<Value>,
        dados_posteriores: Option<Value>,
    ) {
        // Ações de médicos ficam sem usuario_id: a sequência deles é outra
        // e o retrato do registro afetado já identifica o autor.
        let usuario_id = ator.and_then(|a| (a.papel != Papel::Medico).then_some(a.id));
        let intencao = IntencaoAuditoria {
            usuario_id,
            hospital_id: ator.and_then(|a| a.hospital_id),
            entidade: entidade.to_string(),
            entidade_id: entidade_id.to_string(),
            acao,
            dados_anteriores: dados_anteriores.map(limpar_credenciais),
            dados_posteriores: dados_posteriores.map(limpar_credenciais),
            ip: ator.and_then(|a| a.ip.clone()),
        };
        if self.tx.send(intencao).is_err() {
            tracing::warn!("Gravador de auditoria encerrado; evento descartado");
        }
    }
}

/// Consumidor que persiste as intenções emitidas. `aguardar` retorna
/// depois que todos os emissores caíram e a fila foi drenada; é o
/// encerramento gracioso do processo (e o "flush" dos testes).
pub struct GravadorAuditoria {
    tarefa: JoinHandle<()>,
}

impl GravadorAuditoria {
    pub async fn aguardar(self) {
        let _ = self.tarefa.await;
    }
}

/// Liga o canal de auditoria: devolve o emissor e o consumidor já em
/// execução.
pub fn iniciar_auditoria(
    repo: Arc<dyn LogAuditoriaRepositorio>,
) -> (RegistradorAuditoria, GravadorAuditoria) {
    let (tx, mut rx) = mpsc::unbounded_channel::<IntencaoAuditoria>();
    let tarefa = tokio::spawn(async move {
        while let Some(intencao) = rx.recv().await {
            let log = LogAuditoria {
                log_id: Uuid::new_v4(),
                usuario_id: intencao.usuario_id,
                hospital_id: intencao.hospital_id,
                entidade: intencao.entidade,
                entidade_id: intencao.entidade_id,
                acao: intencao.acao,
                dados_anteriores: intencao.dados_anteriores,
                dados_posteriores: intencao.dados_posteriores,
                ip: intencao.ip,
                criado_em: Utc::now(),
            };
            match repo.anexar(&log).await {
                Ok(()) => {
                    tracing::info!("📝 Log registrado: [{:?}] {} ({})", log.acao, log.entidade, log.entidade_id);
                }
                Err(e) => {
                    // Nunca propaga: auditoria é canal lateral de melhor esforço.
                    tracing::error!("Erro ao registrar log de auditoria: {e}");
                }
            }
        }
    });
    (RegistradorAuditoria { tx }, GravadorAuditoria { tarefa })
}

/// Serializa um registro para virar retrato de antes/depois.
pub fn retrato<T: serde::Serialize>(valor: &T) -> Option<Value> {
    serde_json::to_value(valor).ok()
}

/// Remove material de credencial dos retratos antes da persistência,
/// em qualquer nível de aninhamento.
pub fn limpar_credenciais(mut dados: Value) -> Value {
    remover_chaves_sensiveis(&mut dados);
    dados
}

fn remover_chaves_sensiveis(valor: &mut Value) {
    match valor {
        Value::Object(mapa) => {
            mapa.remove("senha");
            mapa.remove("senha_hash");
            for (_, aninhado) in mapa.iter_mut() {
                remover_chaves_sensiveis(aninhado);
            }
        }
        Value::Array(itens) => {
            for item in itens.iter_mut() {
                remover_chaves_sensiveis(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn remove_senha_hash_do_nivel_raiz() {
        let limpo = limpar_credenciais(json!({
            "usuario_id": 1,
            "senha_hash": "$2b$10$abc",
            "nome": "Ana"
        }));
        assert_eq!(limpo, json!({ "usuario_id": 1, "nome": "Ana" }));
    }

    #[test]
    fn remove_credenciais_aninhadas() {
        let limpo = limpar_credenciais(json!({
            "aceite": { "medico": { "senha": "123456", "crm": "CRM-1" } },
            "historico": [{ "senha_hash": "x" }, { "ok": true }]
        }));
        assert_eq!(
            limpo,
            json!({
                "aceite": { "medico": { "crm": "CRM-1" } },
                "historico": [{}, { "ok": true }]
            })
        );
    }

    #[test]
    fn nao_altera_valores_sem_credencial() {
        let original = json!({ "plantao_id": 7, "status": "DISPONIVEL" });
        assert_eq!(limpar_credenciais(original.clone()), original);
    }
}
