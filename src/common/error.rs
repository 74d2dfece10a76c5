use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidacaoFalhou(#[from] validator::ValidationErrors),

    #[error("{0}")]
    CampoInvalido(String),

    #[error("{0} não encontrado(a)")]
    NaoEncontrado(String),

    #[error("{0}")]
    AcessoNegado(String),

    #[error("{0}")]
    Conflito(String),

    // O aceite foi gravado mas a projeção de histórico falhou no meio;
    // o chamador recebe o id para não perder o registro criado.
    #[error("Aceite {aceite_id} criado, mas a projeção de histórico falhou")]
    ProjecaoIncompleta { aceite_id: i64 },

    #[error("Credenciais inválidas")]
    CredenciaisInvalidas,

    #[error("Token de autenticação inválido ou ausente")]
    TokenInvalido,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    ErroDeBanco(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    ErroInterno(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    ErroDeBcrypt(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    ErroDeJwt(#[from] jsonwebtoken::errors::Error),
}

/// Categoria estável de cada falha. A camada HTTP (colaboradora externa)
/// mapeia categorias para códigos de status; o núcleo só conhece isto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Categoria {
    Validacao,
    NaoEncontrado,
    AcessoNegado,
    NaoAutenticado,
    Conflito,
    Interno,
}

impl AppError {
    pub fn categoria(&self) -> Categoria {
        match self {
            AppError::ValidacaoFalhou(_) | AppError::CampoInvalido(_) => Categoria::Validacao,
            AppError::NaoEncontrado(_) => Categoria::NaoEncontrado,
            AppError::AcessoNegado(_) => Categoria::AcessoNegado,
            AppError::Conflito(_) => Categoria::Conflito,
            AppError::CredenciaisInvalidas | AppError::TokenInvalido | AppError::ErroDeJwt(_) => {
                Categoria::NaoAutenticado
            }
            // Todos os outros (banco, bcrypt, projeção parcial) viram erro interno;
            // o `tracing` fica com a mensagem detalhada que o `thiserror` nos deu.
            e => {
                tracing::error!("Erro interno do servidor: {}", e);
                Categoria::Interno
            }
        }
    }
}
