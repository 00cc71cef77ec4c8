use thiserror::Error;

//Todos os erros do pipeline voltam para o chamador como valor,
//a camada de exibicao decide o que mostrar
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Erro de rede ao falar com a api de cobranca")]
    Network(#[from] reqwest::Error),

    #[error("Erro {status} da api de cobranca: {body}")]
    Upstream { status: u16, body: String },

    #[error("Resposta da api em formato desconhecido: {0}")]
    MalformedResponse(String),

    #[error("Configuracao invalida: {0}")]
    Configuration(String),

    #[error("Paginacao abortada apos {0} paginas")]
    LimitePaginas(u32),
}

impl ApiError {
    /// Status HTTP carregado pelo erro, quando houver.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Upstream { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
