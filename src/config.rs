use std::env;
use std::time::Duration;

use tracing::error;

use crate::error::ApiError;

const BASE_URL_PADRAO: &str = "https://api.kobana.com.br/v1";
const ENDPOINT_PADRAO: &str = "bank_billets";
const PER_PAGE_PADRAO: usize = 100;
const LIMITE_INADIMPLENCIA_PADRAO: usize = 3;
const MAX_PAGINAS_PADRAO: u32 = 1000;
const TIMEOUT_PADRAO: Duration = Duration::from_secs(10);

/// Convencao do header Authorization, varia por configuracao da api.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    Bearer,
    TokenToken,
}

impl AuthScheme {
    pub fn header_value(&self, token: &str) -> String {
        match self {
            AuthScheme::Bearer => format!("Bearer {}", token),
            AuthScheme::TokenToken => format!("Token token={}", token),
        }
    }
}

/// Unidade em que a api devolve o campo `amount`.
/// Nao ha sinal confiavel no payload, tem que ser configuracao explicita.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnidadeValor {
    /// Inteiro em centavos, dividir por 100.
    Centavos,
    /// Decimal ja em reais, usar como esta.
    Reais,
}

/// Configuracao da api de cobranca, montada uma vez e passada ao service.
/// O pipeline nao sabe nada de login/sessao, so recebe isso pronto.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub endpoint: String,
    pub token: String,
    pub auth: AuthScheme,
    pub per_page: usize,
    /// Nome do parametro de filtro de status (`status` ou `status[]`).
    pub status_param: String,
    /// Chave da lista quando a resposta vem como objeto (`bank_billets`).
    pub chave_lista: String,
    pub unidade_valor: UnidadeValor,
    pub limite_inadimplencia: usize,
    pub max_paginas: u32,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(token: String) -> Self {
        Self {
            base_url: BASE_URL_PADRAO.to_string(),
            endpoint: ENDPOINT_PADRAO.to_string(),
            token,
            auth: AuthScheme::Bearer,
            per_page: PER_PAGE_PADRAO,
            status_param: "status".to_string(),
            chave_lista: "bank_billets".to_string(),
            unidade_valor: UnidadeValor::Centavos,
            limite_inadimplencia: LIMITE_INADIMPLENCIA_PADRAO,
            max_paginas: MAX_PAGINAS_PADRAO,
            timeout: TIMEOUT_PADRAO,
        }
    }

    /// Monta a configuracao a partir das variaveis de ambiente.
    /// So KOBANA_API_TOKEN e obrigatoria, o resto tem padrao.
    pub fn from_env() -> Result<Self, ApiError> {
        let token = env::var("KOBANA_API_TOKEN").map_err(|e| {
            error!("Erro:{:?} ao pegar variavel do ambiente: KOBANA_API_TOKEN", e);
            ApiError::Configuration("KOBANA_API_TOKEN nao definida".to_string())
        })?;

        let mut config = Self::new(token);

        if let Ok(base_url) = env::var("KOBANA_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(endpoint) = env::var("KOBANA_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(scheme) = env::var("KOBANA_AUTH_SCHEME") {
            config.auth = match scheme.to_lowercase().as_str() {
                "bearer" => AuthScheme::Bearer,
                "token" => AuthScheme::TokenToken,
                outro => {
                    return Err(ApiError::Configuration(format!(
                        "KOBANA_AUTH_SCHEME desconhecido: {}",
                        outro
                    )))
                }
            };
        }
        if let Ok(per_page) = env::var("KOBANA_PER_PAGE") {
            config.per_page = per_page.parse().map_err(|_| {
                ApiError::Configuration(format!("KOBANA_PER_PAGE invalido: {}", per_page))
            })?;
        }
        if let Ok(param) = env::var("KOBANA_STATUS_PARAM") {
            config.status_param = param;
        }
        if let Ok(chave) = env::var("KOBANA_CHAVE_LISTA") {
            config.chave_lista = chave;
        }
        if let Ok(unidade) = env::var("KOBANA_UNIDADE_VALOR") {
            config.unidade_valor = match unidade.to_lowercase().as_str() {
                "centavos" => UnidadeValor::Centavos,
                "reais" => UnidadeValor::Reais,
                outro => {
                    return Err(ApiError::Configuration(format!(
                        "KOBANA_UNIDADE_VALOR desconhecida: {}",
                        outro
                    )))
                }
            };
        }
        if let Ok(limite) = env::var("LIMITE_INADIMPLENCIA") {
            config.limite_inadimplencia = limite.parse().map_err(|_| {
                ApiError::Configuration(format!("LIMITE_INADIMPLENCIA invalido: {}", limite))
            })?;
        }

        Ok(config)
    }
}
