pub mod aceite_service;
pub use aceite_service::AceiteService;
pub mod auditoria_service;
pub use auditoria_service::AuditoriaService;
pub mod auth_service;
pub use auth_service::AuthService;
pub mod historico_service;
pub use historico_service::HistoricoService;
pub mod hospital_service;
pub use hospital_service::HospitalService;
pub mod medico_service;
pub use medico_service::MedicoService;
pub mod plantao_service;
pub use plantao_service::PlantaoService;
pub mod usuario_service;
pub use usuario_service::UsuarioService;
