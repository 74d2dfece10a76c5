//! Infra compartilhada dos testes: ambiente em memória + atores prontos.
#![allow(dead_code)]

use plantao_backend::auditoria::GravadorAuditoria;
use plantao_backend::config::AppState;
use plantao_backend::db::BancoMemoria;
use plantao_backend::models::ator::{Ator, Papel};
use plantao_backend::models::hospital::{Hospital, NovoHospital};
use plantao_backend::models::medico::{Medico, NovoMedico};
use plantao_backend::models::usuario::{NovoUsuario, Usuario};

pub struct Ambiente {
    pub estado: AppState,
    pub banco: BancoMemoria,
    gravador: GravadorAuditoria,
}

impl Ambiente {
    pub fn novo() -> Self {
        let (estado, gravador, banco) = AppState::em_memoria("segredo-de-teste");
        Self { estado, banco, gravador }
    }

    /// Derruba os serviços (e com eles os emissores) e espera o gravador
    /// drenar a fila de auditoria antes das asserções sobre o banco.
    pub async fn drenar_auditoria(self) -> BancoMemoria {
        let Ambiente { estado, banco, gravador } = self;
        drop(estado);
        gravador.aguardar().await;
        banco
    }
}

pub fn ator_admin() -> Ator {
    Ator { id: 999, papel: Papel::AdminSistema, hospital_id: None, ip: None }
}

pub fn ator_gestor(usuario: &Usuario) -> Ator {
    Ator {
        id: usuario.usuario_id,
        papel: Papel::Gestor,
        hospital_id: usuario.hospital_id,
        ip: Some("10.0.0.1".to_string()),
    }
}

pub fn ator_medico(medico: &Medico) -> Ator {
    Ator { id: medico.medico_id, papel: Papel::Medico, hospital_id: None, ip: None }
}

/// H1 + M1 (gestor de H1) + C1 (médico), criados pelos caminhos reais.
pub async fn semear_basico(estado: &AppState) -> (Hospital, Usuario, Medico) {
    let admin = ator_admin();

    let hospital = estado
        .hospitais
        .criar(
            &admin,
            NovoHospital {
                nome: "Hospital Santa Clara".to_string(),
                cnpj: "12345678000199".to_string(),
                endereco: "Rua das Flores, 100 - Centro".to_string(),
                email: "contato@santaclara.com.br".to_string(),
                subdominio_url: None,
            },
        )
        .await
        .expect("falha ao criar hospital de teste");

    let gestor = estado
        .usuarios
        .criar(
            &admin,
            NovoUsuario {
                nome: "Marina Gestora".to_string(),
                email: "marina@santaclara.com.br".to_string(),
                senha: "senha-forte".to_string(),
                papel: Papel::Gestor,
                telefone: Some("(11) 99999-0000".to_string()),
                hospital_id: Some(hospital.hospital_id),
            },
        )
        .await
        .expect("falha ao criar gestor de teste");

    let medico = estado
        .medicos
        .cadastrar(NovoMedico {
            crm: "CRM-SP-123456".to_string(),
            nome: "Carlos Medico".to_string(),
            email: "carlos@medicos.com.br".to_string(),
            senha: "outra-senha".to_string(),
            especialidade: "Clínica Geral".to_string(),
        })
        .await
        .expect("falha ao cadastrar médico de teste");

    (hospital, gestor, medico)
}
