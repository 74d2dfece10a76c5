// src/config.rs

use std::sync::Arc;
use std::{env, time::Duration};

use sqlx::postgres::PgPoolOptions;

use crate::auditoria::{iniciar_auditoria, GravadorAuditoria};
use crate::common::error::AppError;
use crate::db::repositorio::{
    AceiteRepositorio, ContadorRepositorio, HistoricoGestorRepositorio,
    HistoricoMedicoRepositorio, HospitalRepositorio, LogAuditoriaRepositorio, MedicoRepositorio,
    PlantaoRepositorio, UsuarioRepositorio,
};
use crate::db::{
    BancoMemoria, PgAceiteRepositorio, PgContadorRepositorio, PgHistoricoGestorRepositorio,
    PgHistoricoMedicoRepositorio, PgHospitalRepositorio, PgLogAuditoriaRepositorio,
    PgMedicoRepositorio, PgPlantaoRepositorio, PgUsuarioRepositorio,
};
use crate::services::{
    AceiteService, AuditoriaService, AuthService, HistoricoService, HospitalService,
    MedicoService, PlantaoService, UsuarioService,
};

/// Inicializa o logger global. Chamada uma vez pelo binário hospedeiro.
pub fn iniciar_logging() {
    tracing_subscriber::fmt().with_target(false).compact().init();
}

// Configuração carregada das variáveis de ambiente
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
}

impl Config {
    pub fn do_ambiente() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL deve ser definida"))?;
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET deve ser definido"))?;
        Ok(Self { database_url, jwt_secret })
    }
}

/// O estado compartilhado que a camada HTTP (colaboradora externa) recebe:
/// todos os serviços do núcleo já ligados ao armazenamento e à auditoria.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub hospitais: HospitalService,
    pub usuarios: UsuarioService,
    pub medicos: MedicoService,
    pub plantoes: PlantaoService,
    pub aceites: AceiteService,
    pub historicos: HistoricoService,
    pub auditoria: AuditoriaService,
}

impl AppState {
    /// Composição de produção: pool Postgres + migrações + repositórios Pg.
    /// Devolve também o gravador de auditoria, que o hospedeiro aguarda no
    /// encerramento para drenar a fila.
    pub async fn nova(config: &Config) -> Result<(Self, GravadorAuditoria), AppError> {
        let db_pool = match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => {
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
                pool
            }
            Err(e) => {
                tracing::error!("🔥 Falha ao conectar ao banco de dados: {:?}", e);
                return Err(e.into());
            }
        };

        sqlx::migrate!()
            .run(&db_pool)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao rodar as migrações do banco de dados: {e}"))?;
        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        Ok(Self::montar(
            Arc::new(PgHospitalRepositorio::new(db_pool.clone())),
            Arc::new(PgUsuarioRepositorio::new(db_pool.clone())),
            Arc::new(PgMedicoRepositorio::new(db_pool.clone())),
            Arc::new(PgPlantaoRepositorio::new(db_pool.clone())),
            Arc::new(PgAceiteRepositorio::new(db_pool.clone())),
            Arc::new(PgHistoricoGestorRepositorio::new(db_pool.clone())),
            Arc::new(PgHistoricoMedicoRepositorio::new(db_pool.clone())),
            Arc::new(PgLogAuditoriaRepositorio::new(db_pool.clone())),
            Arc::new(PgContadorRepositorio::new(db_pool)),
            config.jwt_secret.clone(),
        ))
    }

    /// Composição embutida sobre o banco em memória; os testes e o modo de
    /// desenvolvimento usam esta. Devolve o banco para inspeção direta.
    pub fn em_memoria(jwt_secret: &str) -> (Self, GravadorAuditoria, BancoMemoria) {
        let banco = BancoMemoria::novo();
        let compartilhado = Arc::new(banco.clone());
        let (estado, gravador) = Self::montar(
            compartilhado.clone(),
            compartilhado.clone(),
            compartilhado.clone(),
            compartilhado.clone(),
            compartilhado.clone(),
            compartilhado.clone(),
            compartilhado.clone(),
            compartilhado.clone(),
            compartilhado,
            jwt_secret.to_string(),
        );
        (estado, gravador, banco)
    }

    #[allow(clippy::too_many_arguments)]
    fn montar(
        hospitais: Arc<dyn HospitalRepositorio>,
        usuarios: Arc<dyn UsuarioRepositorio>,
        medicos: Arc<dyn MedicoRepositorio>,
        plantoes: Arc<dyn PlantaoRepositorio>,
        aceites: Arc<dyn AceiteRepositorio>,
        historicos_gestor: Arc<dyn HistoricoGestorRepositorio>,
        historicos_medico: Arc<dyn HistoricoMedicoRepositorio>,
        logs: Arc<dyn LogAuditoriaRepositorio>,
        contadores: Arc<dyn ContadorRepositorio>,
        jwt_secret: String,
    ) -> (Self, GravadorAuditoria) {
        let (registrador, gravador) = iniciar_auditoria(logs.clone());

        let historicos = HistoricoService::new(
            historicos_gestor,
            historicos_medico,
            aceites.clone(),
            plantoes.clone(),
            medicos.clone(),
            contadores.clone(),
            registrador.clone(),
        );

        let estado = Self {
            auth: AuthService::new(
                usuarios.clone(),
                medicos.clone(),
                registrador.clone(),
                jwt_secret,
            ),
            hospitais: HospitalService::new(
                hospitais.clone(),
                contadores.clone(),
                registrador.clone(),
            ),
            usuarios: UsuarioService::new(
                usuarios.clone(),
                hospitais.clone(),
                contadores.clone(),
                registrador.clone(),
            ),
            medicos: MedicoService::new(
                medicos.clone(),
                contadores.clone(),
                registrador.clone(),
            ),
            plantoes: PlantaoService::new(
                plantoes.clone(),
                hospitais,
                usuarios,
                aceites.clone(),
                contadores.clone(),
                registrador.clone(),
            ),
            aceites: AceiteService::new(
                aceites,
                plantoes,
                medicos,
                contadores,
                historicos.clone(),
                registrador,
            ),
            historicos,
            auditoria: AuditoriaService::new(logs),
        };
        (estado, gravador)
    }
}
