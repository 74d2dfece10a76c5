//! Ciclo de vida completo do aceite: criação, projeções de histórico,
//! trilha de auditoria e as regras de bloqueio em volta.

mod comum;

use comum::{ator_gestor, ator_medico, semear_basico, Ambiente};
use plantao_backend::common::error::AppError;
use plantao_backend::db::repositorio::LogAuditoriaRepositorio;
use plantao_backend::models::aceite::{AtualizaAceite, FiltroAceites, NovoAceite, StatusAceite};
use plantao_backend::models::auditoria::{Acao, FiltroLogs};
use plantao_backend::models::historico::FiltroHistoricos;
use plantao_backend::models::plantao::{
    AtualizaPlantao, NovoPlantao, StatusPlantao,
};

fn plantao_de_teste(hospital_id: i64, gestor_id: i64) -> NovoPlantao {
    NovoPlantao {
        hospital_id,
        gestor_id,
        titulo: "Plantão noturno UTI".to_string(),
        descricao: Some("Cobertura da UTI adulto".to_string()),
        dia: "10/03/2025".to_string(),
        horario_inicio: "08:00".to_string(),
        horario_final: "14:00".to_string(),
        cargo_requerido: "Médico plantonista".to_string(),
        tipo: "plantão".to_string(),
        valor: None,
        status: None,
    }
}

#[tokio::test]
async fn cenario_completo_de_aceite() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, medico) = semear_basico(&ambiente.estado).await;
    let gestor_ator = ator_gestor(&gestor);
    let medico_ator = ator_medico(&medico);

    let plantao = ambiente
        .estado
        .plantoes
        .criar(&gestor_ator, plantao_de_teste(hospital.hospital_id, gestor.usuario_id))
        .await
        .unwrap();
    assert_eq!(plantao.status, StatusPlantao::Disponivel);

    let aceite = ambiente
        .estado
        .aceites
        .criar(&medico_ator, NovoAceite { plantao_id: Some(plantao.plantao_id) })
        .await
        .unwrap();

    // O aceite nasce pendente, com a agenda copiada do plantão
    assert_eq!(aceite.status, StatusAceite::Pendente);
    assert_eq!(aceite.motivo_rejeicao, None);
    assert_eq!(aceite.dia, "10/03/2025");
    assert_eq!(aceite.horario_inicio, "08:00");
    assert_eq!(aceite.horario_final, "14:00");
    assert_eq!(aceite.medico_id, medico.medico_id);

    // Exatamente uma projeção para cada papel
    let historicos_gestor = ambiente
        .estado
        .historicos
        .listar_gestor(&FiltroHistoricos {
            aceite_id: Some(aceite.aceite_id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(historicos_gestor.len(), 1);
    assert_eq!(historicos_gestor[0].status, StatusPlantao::Disponivel);
    assert_eq!(historicos_gestor[0].crm, medico.crm);
    assert_eq!(historicos_gestor[0].observacao, "");

    let historicos_medico = ambiente
        .estado
        .historicos
        .listar_medico_por_crm(&medico.crm)
        .await
        .unwrap();
    assert_eq!(historicos_medico.len(), 1);
    assert_eq!(
        historicos_medico[0].status,
        plantao_backend::models::historico::StatusHistoricoMedico::Aceito
    );
    assert_eq!(historicos_medico[0].hospital_id, hospital.hospital_id);
    assert_eq!(historicos_medico[0].aceite_id, aceite.aceite_id);

    // Evento de auditoria CREATE para o aceite
    let banco = ambiente.drenar_auditoria().await;
    let logs = banco
        .listar(&FiltroLogs {
            entidade: Some("AceitaPlantao".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].acao, Acao::Create);
    assert_eq!(logs[0].entidade_id, aceite.aceite_id.to_string());
    assert!(logs[0].dados_anteriores.is_none());
    assert!(logs[0].dados_posteriores.is_some());
}

#[tokio::test]
async fn aceite_de_plantao_inexistente_nao_deixa_rastro() {
    let ambiente = Ambiente::novo();
    let (_, _, medico) = semear_basico(&ambiente.estado).await;
    let medico_ator = ator_medico(&medico);

    let erro = ambiente
        .estado
        .aceites
        .criar(&medico_ator, NovoAceite { plantao_id: Some(424242) })
        .await
        .unwrap_err();
    assert!(matches!(erro, AppError::NaoEncontrado(_)));

    // Nenhum aceite, nenhum histórico, nenhum evento de auditoria do aceite
    let aceites = ambiente
        .estado
        .aceites
        .listar(&FiltroAceites::default())
        .await
        .unwrap();
    assert!(aceites.is_empty());

    let historicos = ambiente
        .estado
        .historicos
        .listar_gestor(&FiltroHistoricos::default())
        .await
        .unwrap();
    assert!(historicos.is_empty());

    let banco = ambiente.drenar_auditoria().await;
    let logs = banco
        .listar(&FiltroLogs {
            entidade: Some("AceitaPlantao".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(logs.is_empty());
}

#[tokio::test]
async fn plantao_id_ausente_falha_na_validacao() {
    let ambiente = Ambiente::novo();
    let (_, _, medico) = semear_basico(&ambiente.estado).await;

    let erro = ambiente
        .estado
        .aceites
        .criar(&ator_medico(&medico), NovoAceite { plantao_id: None })
        .await
        .unwrap_err();
    assert!(matches!(erro, AppError::CampoInvalido(_)));
}

#[tokio::test]
async fn apenas_medico_cria_aceite() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, _) = semear_basico(&ambiente.estado).await;
    let gestor_ator = ator_gestor(&gestor);

    let plantao = ambiente
        .estado
        .plantoes
        .criar(&gestor_ator, plantao_de_teste(hospital.hospital_id, gestor.usuario_id))
        .await
        .unwrap();

    let erro = ambiente
        .estado
        .aceites
        .criar(&gestor_ator, NovoAceite { plantao_id: Some(plantao.plantao_id) })
        .await
        .unwrap_err();
    assert!(matches!(erro, AppError::AcessoNegado(_)));
}

#[tokio::test]
async fn plantao_comporta_um_unico_aceite_ativo() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, medico) = semear_basico(&ambiente.estado).await;
    let medico_ator = ator_medico(&medico);

    let plantao = ambiente
        .estado
        .plantoes
        .criar(&ator_gestor(&gestor), plantao_de_teste(hospital.hospital_id, gestor.usuario_id))
        .await
        .unwrap();

    ambiente
        .estado
        .aceites
        .criar(&medico_ator, NovoAceite { plantao_id: Some(plantao.plantao_id) })
        .await
        .unwrap();

    let erro = ambiente
        .estado
        .aceites
        .criar(&medico_ator, NovoAceite { plantao_id: Some(plantao.plantao_id) })
        .await
        .unwrap_err();
    assert!(matches!(erro, AppError::Conflito(_)));
}

#[tokio::test]
async fn atualizar_aceite_exige_gestor() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, medico) = semear_basico(&ambiente.estado).await;
    let medico_ator = ator_medico(&medico);

    let plantao = ambiente
        .estado
        .plantoes
        .criar(&ator_gestor(&gestor), plantao_de_teste(hospital.hospital_id, gestor.usuario_id))
        .await
        .unwrap();
    let aceite = ambiente
        .estado
        .aceites
        .criar(&medico_ator, NovoAceite { plantao_id: Some(plantao.plantao_id) })
        .await
        .unwrap();

    let erro = ambiente
        .estado
        .aceites
        .atualizar(
            &medico_ator,
            aceite.aceite_id,
            AtualizaAceite { status: Some(StatusAceite::Aprovado), motivo_rejeicao: None },
        )
        .await
        .unwrap_err();
    assert!(matches!(erro, AppError::AcessoNegado(_)));

    // O aceite segue intocado
    let relido = ambiente.estado.aceites.buscar_por_id(aceite.aceite_id).await.unwrap();
    assert_eq!(relido.status, StatusAceite::Pendente);
}

#[tokio::test]
async fn cancelar_plantao_nao_cascateia_para_o_aceite() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, medico) = semear_basico(&ambiente.estado).await;
    let gestor_ator = ator_gestor(&gestor);

    let plantao = ambiente
        .estado
        .plantoes
        .criar(&gestor_ator, plantao_de_teste(hospital.hospital_id, gestor.usuario_id))
        .await
        .unwrap();
    let aceite = ambiente
        .estado
        .aceites
        .criar(&ator_medico(&medico), NovoAceite { plantao_id: Some(plantao.plantao_id) })
        .await
        .unwrap();

    let atualizado = ambiente
        .estado
        .plantoes
        .atualizar(
            &gestor_ator,
            plantao.plantao_id,
            AtualizaPlantao { status: Some(StatusPlantao::Cancelado), ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(atualizado.status, StatusPlantao::Cancelado);

    // Sem cascata: o aceite permanece PENDENTE até alguém mexer nele
    let relido = ambiente.estado.aceites.buscar_por_id(aceite.aceite_id).await.unwrap();
    assert_eq!(relido.status, StatusAceite::Pendente);
    // E a agenda copiada no aceite também não muda
    assert_eq!(relido.dia, "10/03/2025");
}

#[tokio::test]
async fn aceite_terminal_so_muda_com_admin() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, medico) = semear_basico(&ambiente.estado).await;
    let gestor_ator = ator_gestor(&gestor);
    let admin = comum::ator_admin();

    let plantao = ambiente
        .estado
        .plantoes
        .criar(&gestor_ator, plantao_de_teste(hospital.hospital_id, gestor.usuario_id))
        .await
        .unwrap();
    let aceite = ambiente
        .estado
        .aceites
        .criar(&ator_medico(&medico), NovoAceite { plantao_id: Some(plantao.plantao_id) })
        .await
        .unwrap();

    let reprovado = ambiente
        .estado
        .aceites
        .atualizar(
            &gestor_ator,
            aceite.aceite_id,
            AtualizaAceite {
                status: Some(StatusAceite::Reprovado),
                motivo_rejeicao: Some("Agenda em conflito".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(reprovado.status, StatusAceite::Reprovado);
    assert_eq!(reprovado.motivo_rejeicao.as_deref(), Some("Agenda em conflito"));

    // Estado terminal: gestor não mexe mais
    let erro = ambiente
        .estado
        .aceites
        .atualizar(
            &gestor_ator,
            aceite.aceite_id,
            AtualizaAceite { status: Some(StatusAceite::Aprovado), motivo_rejeicao: None },
        )
        .await
        .unwrap_err();
    assert!(matches!(erro, AppError::Conflito(_)));

    // Intervenção administrativa ainda é possível
    let corrigido = ambiente
        .estado
        .aceites
        .atualizar(
            &admin,
            aceite.aceite_id,
            AtualizaAceite { status: Some(StatusAceite::Aprovado), motivo_rejeicao: None },
        )
        .await
        .unwrap();
    assert_eq!(corrigido.status, StatusAceite::Aprovado);
}

#[tokio::test]
async fn remover_plantao_com_aceite_ativo_conflita() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, medico) = semear_basico(&ambiente.estado).await;
    let gestor_ator = ator_gestor(&gestor);

    let plantao = ambiente
        .estado
        .plantoes
        .criar(&gestor_ator, plantao_de_teste(hospital.hospital_id, gestor.usuario_id))
        .await
        .unwrap();
    let aceite = ambiente
        .estado
        .aceites
        .criar(&ator_medico(&medico), NovoAceite { plantao_id: Some(plantao.plantao_id) })
        .await
        .unwrap();

    let erro = ambiente
        .estado
        .plantoes
        .remover(&gestor_ator, plantao.plantao_id)
        .await
        .unwrap_err();
    assert!(matches!(erro, AppError::Conflito(_)));

    // Depois que o aceite sai do estado ativo, a remoção passa
    ambiente
        .estado
        .aceites
        .atualizar(
            &gestor_ator,
            aceite.aceite_id,
            AtualizaAceite { status: Some(StatusAceite::Reprovado), motivo_rejeicao: None },
        )
        .await
        .unwrap();
    ambiente
        .estado
        .plantoes
        .remover(&gestor_ator, plantao.plantao_id)
        .await
        .unwrap();
}

#[tokio::test]
async fn reprojetar_historico_a_partir_do_aceite() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, medico) = semear_basico(&ambiente.estado).await;
    let gestor_ator = ator_gestor(&gestor);

    let plantao = ambiente
        .estado
        .plantoes
        .criar(&gestor_ator, plantao_de_teste(hospital.hospital_id, gestor.usuario_id))
        .await
        .unwrap();
    let aceite = ambiente
        .estado
        .aceites
        .criar(&ator_medico(&medico), NovoAceite { plantao_id: Some(plantao.plantao_id) })
        .await
        .unwrap();

    // Reprojeção resolve tudo de novo e gera um novo par de linhas
    let (hg, hm) = ambiente
        .estado
        .historicos
        .reprojetar_de_aceite(None, aceite.aceite_id)
        .await
        .unwrap();
    assert_eq!(hg.aceite_id, aceite.aceite_id);
    assert_eq!(hm.aceite_id, aceite.aceite_id);

    let todos = ambiente
        .estado
        .historicos
        .listar_gestor(&FiltroHistoricos {
            aceite_id: Some(aceite.aceite_id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(todos.len(), 2);

    // Se o plantão sumir, a reprojeção falha com NaoEncontrado
    ambiente
        .estado
        .aceites
        .atualizar(
            &gestor_ator,
            aceite.aceite_id,
            AtualizaAceite { status: Some(StatusAceite::Cancelado), motivo_rejeicao: None },
        )
        .await
        .unwrap();
    ambiente
        .estado
        .plantoes
        .remover(&gestor_ator, plantao.plantao_id)
        .await
        .unwrap();

    let erro = ambiente
        .estado
        .historicos
        .reprojetar_de_aceite(None, aceite.aceite_id)
        .await
        .unwrap_err();
    assert!(matches!(erro, AppError::NaoEncontrado(_)));
}
