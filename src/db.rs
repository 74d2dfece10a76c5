pub mod repositorio;
pub mod contador_repo;
pub use contador_repo::PgContadorRepositorio;
pub mod hospital_repo;
pub use hospital_repo::PgHospitalRepositorio;
pub mod usuario_repo;
pub use usuario_repo::PgUsuarioRepositorio;
pub mod medico_repo;
pub use medico_repo::PgMedicoRepositorio;
pub mod plantao_repo;
pub use plantao_repo::PgPlantaoRepositorio;
pub mod aceite_repo;
pub use aceite_repo::PgAceiteRepositorio;
pub mod historico_repo;
pub use historico_repo::{PgHistoricoGestorRepositorio, PgHistoricoMedicoRepositorio};
pub mod auditoria_repo;
pub use auditoria_repo::PgLogAuditoriaRepositorio;
pub mod memoria;
pub use memoria::BancoMemoria;

use crate::common::error::AppError;

// Mapeia violações de chave única do Postgres para conflitos de negócio.
// A checagem ansiosa nos serviços continua valendo; isto é o anteparo
// contra corrida entre dois criadores simultâneos.
pub(crate) fn mapear_violacao_unica(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            if let Some(constraint) = db_err.constraint() {
                let mensagem = match constraint {
                    "hospitais_email_key" | "usuarios_email_key" | "medicos_email_key" => {
                        "Este e-mail já está em uso."
                    }
                    "hospitais_cnpj_key" => "Este CNPJ já está cadastrado.",
                    "medicos_crm_key" => "Este CRM já está cadastrado.",
                    outro => {
                        return AppError::Conflito(format!("Violação de chave única: {outro}"));
                    }
                };
                return AppError::Conflito(mensagem.to_string());
            }
        }
    }
    e.into()
}
