//! Registro de plantões: criação, validações de agenda, ids sequenciais
//! e as regras de autorização por papel.

mod comum;

use comum::{ator_admin, ator_gestor, semear_basico, Ambiente};
use plantao_backend::common::error::{AppError, Categoria};
use plantao_backend::models::plantao::{
    AtualizaPlantao, FiltroPlantoes, NovoPlantao, StatusPlantao,
};
use rust_decimal::Decimal;

fn plantao_de_teste(hospital_id: i64, gestor_id: i64) -> NovoPlantao {
    NovoPlantao {
        hospital_id,
        gestor_id,
        titulo: "Plantão diurno emergência".to_string(),
        descricao: None,
        dia: "15/04/2025".to_string(),
        horario_inicio: "07:00".to_string(),
        horario_final: "19:00".to_string(),
        cargo_requerido: "Emergencista".to_string(),
        tipo: "plantão".to_string(),
        valor: None,
        status: None,
    }
}

#[tokio::test]
async fn criar_e_buscar_devolve_os_mesmos_campos() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, _) = semear_basico(&ambiente.estado).await;
    let gestor_ator = ator_gestor(&gestor);

    let criado = ambiente
        .estado
        .plantoes
        .criar(&gestor_ator, plantao_de_teste(hospital.hospital_id, gestor.usuario_id))
        .await
        .unwrap();

    let relido = ambiente
        .estado
        .plantoes
        .buscar_por_id(criado.plantao_id)
        .await
        .unwrap();

    assert_eq!(relido.plantao_id, criado.plantao_id);
    assert_eq!(relido.hospital_id, hospital.hospital_id);
    assert_eq!(relido.gestor_id, gestor.usuario_id);
    assert_eq!(relido.titulo, "Plantão diurno emergência");
    assert_eq!(relido.descricao, None);
    assert_eq!(relido.dia, "15/04/2025");
    assert_eq!(relido.horario_inicio, "07:00");
    assert_eq!(relido.horario_final, "19:00");
    assert_eq!(relido.cargo_requerido, "Emergencista");
    assert_eq!(relido.tipo, "plantão");
    // Padrões aplicados na criação
    assert_eq!(relido.valor, Decimal::ZERO);
    assert_eq!(relido.status, StatusPlantao::Disponivel);
}

#[tokio::test]
async fn ids_crescem_monotonicamente() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, _) = semear_basico(&ambiente.estado).await;
    let gestor_ator = ator_gestor(&gestor);

    let mut anterior = 0;
    for _ in 0..5 {
        let plantao = ambiente
            .estado
            .plantoes
            .criar(&gestor_ator, plantao_de_teste(hospital.hospital_id, gestor.usuario_id))
            .await
            .unwrap();
        assert!(plantao.plantao_id > anterior);
        anterior = plantao.plantao_id;
    }
}

#[tokio::test]
async fn ids_unicos_sob_criacao_concorrente() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, _) = semear_basico(&ambiente.estado).await;

    let mut tarefas = Vec::new();
    for _ in 0..16 {
        let estado = ambiente.estado.clone();
        let gestor_ator = ator_gestor(&gestor);
        let dados = plantao_de_teste(hospital.hospital_id, gestor.usuario_id);
        tarefas.push(tokio::spawn(async move {
            estado.plantoes.criar(&gestor_ator, dados).await.unwrap().plantao_id
        }));
    }

    let mut ids = Vec::new();
    for tarefa in tarefas {
        ids.push(tarefa.await.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 16, "criadores concorrentes receberam ids duplicados");
}

#[tokio::test]
async fn dia_mal_formado_falha_na_validacao() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, _) = semear_basico(&ambiente.estado).await;

    let mut dados = plantao_de_teste(hospital.hospital_id, gestor.usuario_id);
    dados.dia = "2025-04-15".to_string();

    let erro = ambiente
        .estado
        .plantoes
        .criar(&ator_gestor(&gestor), dados)
        .await
        .unwrap_err();
    assert_eq!(erro.categoria(), Categoria::Validacao);
}

#[tokio::test]
async fn horario_mal_formado_falha_na_validacao() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, _) = semear_basico(&ambiente.estado).await;

    let mut dados = plantao_de_teste(hospital.hospital_id, gestor.usuario_id);
    dados.horario_inicio = "7h00".to_string();

    let erro = ambiente
        .estado
        .plantoes
        .criar(&ator_gestor(&gestor), dados)
        .await
        .unwrap_err();
    assert_eq!(erro.categoria(), Categoria::Validacao);
}

#[tokio::test]
async fn plantao_noturno_atravessa_a_meia_noite() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, _) = semear_basico(&ambiente.estado).await;

    let mut dados = plantao_de_teste(hospital.hospital_id, gestor.usuario_id);
    dados.horario_inicio = "22:00".to_string();
    dados.horario_final = "06:00".to_string();

    // Início depois do fim é agenda válida: vira o dia
    let plantao = ambiente
        .estado
        .plantoes
        .criar(&ator_gestor(&gestor), dados)
        .await
        .unwrap();
    assert_eq!(plantao.horario_final, "06:00");
}

#[tokio::test]
async fn hospital_inexistente_impede_criacao() {
    let ambiente = Ambiente::novo();
    let (_, gestor, _) = semear_basico(&ambiente.estado).await;

    let erro = ambiente
        .estado
        .plantoes
        .criar(&ator_gestor(&gestor), plantao_de_teste(777, gestor.usuario_id))
        .await
        .unwrap_err();
    assert!(matches!(erro, AppError::NaoEncontrado(_)));
}

#[tokio::test]
async fn somente_gestor_cria_e_atualiza() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, _) = semear_basico(&ambiente.estado).await;
    let admin = ator_admin();

    let erro = ambiente
        .estado
        .plantoes
        .criar(&admin, plantao_de_teste(hospital.hospital_id, gestor.usuario_id))
        .await
        .unwrap_err();
    assert!(matches!(erro, AppError::AcessoNegado(_)));

    let plantao = ambiente
        .estado
        .plantoes
        .criar(&ator_gestor(&gestor), plantao_de_teste(hospital.hospital_id, gestor.usuario_id))
        .await
        .unwrap();

    let erro = ambiente
        .estado
        .plantoes
        .atualizar(
            &admin,
            plantao.plantao_id,
            AtualizaPlantao { titulo: Some("Outro título".to_string()), ..Default::default() },
        )
        .await
        .unwrap_err();
    assert!(matches!(erro, AppError::AcessoNegado(_)));
}

#[tokio::test]
async fn atualizacao_aplica_somente_campos_presentes() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, _) = semear_basico(&ambiente.estado).await;
    let gestor_ator = ator_gestor(&gestor);

    let plantao = ambiente
        .estado
        .plantoes
        .criar(&gestor_ator, plantao_de_teste(hospital.hospital_id, gestor.usuario_id))
        .await
        .unwrap();

    let atualizado = ambiente
        .estado
        .plantoes
        .atualizar(
            &gestor_ator,
            plantao.plantao_id,
            AtualizaPlantao {
                valor: Some(Decimal::new(150000, 2)),
                status: Some(StatusPlantao::Reservado),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(atualizado.valor, Decimal::new(150000, 2));
    assert_eq!(atualizado.status, StatusPlantao::Reservado);
    // O resto permanece como estava
    assert_eq!(atualizado.titulo, plantao.titulo);
    assert_eq!(atualizado.dia, plantao.dia);
}

#[tokio::test]
async fn listagem_filtra_por_hospital_e_status() {
    let ambiente = Ambiente::novo();
    let (hospital, gestor, _) = semear_basico(&ambiente.estado).await;
    let gestor_ator = ator_gestor(&gestor);

    for _ in 0..3 {
        ambiente
            .estado
            .plantoes
            .criar(&gestor_ator, plantao_de_teste(hospital.hospital_id, gestor.usuario_id))
            .await
            .unwrap();
    }

    let todos = ambiente
        .estado
        .plantoes
        .listar(&FiltroPlantoes::default())
        .await
        .unwrap();
    assert_eq!(todos.len(), 3);

    let de_outro_hospital = ambiente
        .estado
        .plantoes
        .listar(&FiltroPlantoes { hospital_id: Some(12345), status: None })
        .await
        .unwrap();
    assert!(de_outro_hospital.is_empty());

    let disponiveis = ambiente
        .estado
        .plantoes
        .listar(&FiltroPlantoes {
            hospital_id: Some(hospital.hospital_id),
            status: Some(StatusPlantao::Disponivel),
        })
        .await
        .unwrap();
    assert_eq!(disponiveis.len(), 3);
}
