pub mod aceite;
pub mod ator;
pub mod auditoria;
pub mod historico;
pub mod hospital;
pub mod medico;
pub mod plantao;
pub mod usuario;
