use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;

use super::boleto_model::{Boleto, RawBoleto};
use super::normalizer::normaliza_boleto;

/// Resultado cru de uma varredura paginada. `incompleto` carrega o erro
/// quando uma pagina depois da primeira falhou e paramos com dados parciais.
#[derive(Debug)]
pub struct BuscaBoletos {
    pub boletos: Vec<RawBoleto>,
    pub incompleto: Option<ApiError>,
}

/// Saida do pipeline para a camada de exibicao: boletos canonicos mais o
/// aviso de busca parcial, se houver. Quem exibe decide se mostra parcial.
#[derive(Debug)]
pub struct Relatorio {
    pub boletos: Vec<Boleto>,
    pub aviso: Option<ApiError>,
}

/// Cliente da api de cobranca. Nao guarda estado entre chamadas, pode ser
/// chamado em todo cache miss sem efeito colateral no upstream.
#[derive(Clone)]
pub struct BoletoService {
    client: Client,
    config: ApiConfig,
}

impl BoletoService {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Busca todos os boletos, pagina por pagina, em ordem.
    /// Para quando a pagina volta vazia ou menor que `per_page`. Uma ultima
    /// pagina cheia custa um pedido extra que volta vazio, e esperado.
    pub async fn busca_boletos(
        &self,
        filtro_status: Option<&[&str]>,
    ) -> Result<BuscaBoletos, ApiError> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.endpoint
        );

        let mut boletos = Vec::new();
        let mut pagina = 1u32;

        loop {
            //trava de seguranca contra upstream que pagina para sempre
            if pagina > self.config.max_paginas {
                let erro = ApiError::LimitePaginas(self.config.max_paginas);
                error!("Upstream nao terminou a paginacao: {}", erro);
                return Ok(BuscaBoletos {
                    boletos,
                    incompleto: Some(erro),
                });
            }

            let itens = match self.busca_pagina(&url, pagina, filtro_status).await {
                Ok(itens) => itens,
                //primeira pagina falhou: nao ha nada para mostrar
                Err(erro) if pagina == 1 => return Err(erro),
                //paginas ja buscadas voltam como dado parcial com aviso
                Err(erro) => {
                    warn!("Pagina {} falhou, devolvendo dados parciais: {}", pagina, erro);
                    return Ok(BuscaBoletos {
                        boletos,
                        incompleto: Some(erro),
                    });
                }
            };

            debug!("Pagina {}: {} boletos", pagina, itens.len());
            let tamanho = itens.len();
            boletos.extend(itens);

            if tamanho == 0 || tamanho < self.config.per_page {
                break;
            }
            pagina += 1;
        }

        Ok(BuscaBoletos {
            boletos,
            incompleto: None,
        })
    }

    /// Busca e ja normaliza, pronto para agregacao e exibicao.
    pub async fn busca_boletos_normalizados(
        &self,
        filtro_status: Option<&[&str]>,
    ) -> Result<Relatorio, ApiError> {
        let busca = self.busca_boletos(filtro_status).await?;

        let boletos = busca
            .boletos
            .iter()
            .map(|raw| normaliza_boleto(raw, self.config.unidade_valor))
            .collect();

        Ok(Relatorio {
            boletos,
            aviso: busca.incompleto,
        })
    }

    async fn busca_pagina(
        &self,
        url: &str,
        pagina: u32,
        filtro_status: Option<&[&str]>,
    ) -> Result<Vec<RawBoleto>, ApiError> {
        let mut pedido = self
            .client
            .get(url)
            .header("Authorization", self.config.auth.header_value(&self.config.token))
            .header("Content-Type", "application/json")
            .query(&[
                ("page", pagina.to_string()),
                ("per_page", self.config.per_page.to_string()),
                ("sort", "-created_at".to_string()),
            ]);

        if let Some(status) = filtro_status {
            pedido = pedido.query(&[(self.config.status_param.as_str(), status.join(","))]);
        }

        let resposta = pedido.send().await.map_err(|e| {
            error!("Falha no pedido da pagina {}: {:?}", pagina, e);
            ApiError::from(e)
        })?;

        let status_http = resposta.status();
        let corpo = resposta.text().await?;

        if !status_http.is_success() {
            error!("Erro {} da api: {}", status_http, corpo);
            return Err(ApiError::Upstream {
                status: status_http.as_u16(),
                body: corpo,
            });
        }

        let dados: Value = serde_json::from_str(&corpo).map_err(|e| {
            error!("Corpo da pagina {} nao e json: {:?}", pagina, e);
            ApiError::MalformedResponse(format!("corpo nao e json: {}", e))
        })?;

        self.extrai_lista(dados)
    }

    //A resposta pode vir como lista crua ou como objeto com a lista
    //debaixo da chave configurada (ou `items`). Qualquer outra forma e fatal.
    fn extrai_lista(&self, dados: Value) -> Result<Vec<RawBoleto>, ApiError> {
        let itens = match dados {
            Value::Array(itens) => itens,
            Value::Object(mut mapa) => {
                let lista = mapa
                    .remove(self.config.chave_lista.as_str())
                    .or_else(|| mapa.remove("items"));
                match lista {
                    Some(Value::Array(itens)) => itens,
                    _ => {
                        return Err(ApiError::MalformedResponse(format!(
                            "objeto sem a chave `{}` nem `items`",
                            self.config.chave_lista
                        )))
                    }
                }
            }
            outro => {
                return Err(ApiError::MalformedResponse(format!(
                    "esperava lista ou objeto, veio {}",
                    nome_do_tipo(&outro)
                )))
            }
        };

        Ok(itens
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(mapa) => Some(mapa),
                _ => None,
            })
            .collect())
    }

    /// Hook para o fluxo (externo) de cancelamento por cliente.
    /// DELETE direto, sem retry, quem chama decide o que fazer com o erro.
    pub async fn delete_assinatura(&self, id: &str) -> Result<(), ApiError> {
        let url = format!(
            "{}/subscriptions/{}",
            self.config.base_url.trim_end_matches('/'),
            id
        );

        let resposta = self
            .client
            .delete(&url)
            .header("Authorization", self.config.auth.header_value(&self.config.token))
            .send()
            .await?;

        let status_http = resposta.status();
        if !status_http.is_success() {
            let corpo = resposta.text().await.unwrap_or_default();
            error!("Falha ao deletar assinatura {}: {} {}", id, status_http, corpo);
            return Err(ApiError::Upstream {
                status: status_http.as_u16(),
                body: corpo,
            });
        }

        Ok(())
    }
}

fn nome_do_tipo(valor: &Value) -> &'static str {
    match valor {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "numero",
        Value::String(_) => "string",
        Value::Array(_) => "lista",
        Value::Object(_) => "objeto",
    }
}
