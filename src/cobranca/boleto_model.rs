use std::collections::HashMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Boleto como vem da api, com os nomes de campo que a configuracao mandou.
/// Vive so ate a normalizacao.
pub type RawBoleto = serde_json::Map<String, Value>;

/// Conjunto fechado de status do dominio. Codigo fora da tabela vira
/// Desconhecido, nunca erro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBoleto {
    Aberto,
    Pago,
    Vencido,
    Cancelado,
    Desconhecido,
}

impl Serialize for StatusBoleto {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.codigo_api())
    }
}

impl<'de> Deserialize<'de> for StatusBoleto {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let codigo = String::deserialize(deserializer)?;
        Ok(classifica_status(&codigo))
    }
}

//`expired` e `overdue` sao o mesmo conceito, configuracoes antigas da api
//mandam um ou outro
static TABELA_STATUS: Lazy<HashMap<&'static str, StatusBoleto>> = Lazy::new(|| {
    HashMap::from([
        ("opened", StatusBoleto::Aberto),
        ("paid", StatusBoleto::Pago),
        ("overdue", StatusBoleto::Vencido),
        ("expired", StatusBoleto::Vencido),
        ("canceled", StatusBoleto::Cancelado),
    ])
});

static TABELA_TRADUCAO: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("opened", "Em aberto"),
        ("paid", "Pago"),
        ("overdue", "Vencido"),
        ("expired", "Vencido"),
        ("canceled", "Cancelado"),
    ])
});

pub fn classifica_status(raw: &str) -> StatusBoleto {
    TABELA_STATUS
        .get(raw)
        .copied()
        .unwrap_or(StatusBoleto::Desconhecido)
}

/// Rotulo de exibicao do status. Codigo fora da tabela volta como veio.
pub fn traduz_status(raw: &str) -> String {
    TABELA_TRADUCAO
        .get(raw)
        .map(|s| s.to_string())
        .unwrap_or_else(|| raw.to_string())
}

impl StatusBoleto {
    pub fn codigo_api(&self) -> &'static str {
        match self {
            StatusBoleto::Aberto => "opened",
            StatusBoleto::Pago => "paid",
            StatusBoleto::Vencido => "overdue",
            StatusBoleto::Cancelado => "canceled",
            StatusBoleto::Desconhecido => "unknown",
        }
    }
}

/// Boleto canonico, ja normalizado. E o que o resto do pipeline enxerga.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Boleto {
    #[serde(rename = "customer_person_name")]
    pub nome: String,
    //cpf/cnpj e a identidade do cliente, boleto sem documento fica fora
    //da agregacao
    #[serde(rename = "customer_cnpj_cpf")]
    pub cpf_cnpj: Option<String>,
    pub status: StatusBoleto,
    #[serde(rename = "amount")]
    pub valor: f64,
    #[serde(rename = "expire_at")]
    pub vencimento: Option<NaiveDate>,
    #[serde(rename = "paid_at")]
    pub pago_em: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Cliente com boletos vencidos acima do limite, derivado por chamada.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClienteInadimplente {
    pub nome: String,
    pub cpf_cnpj: String,
    pub vencidos: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifica_codigos_conhecidos() {
        assert_eq!(classifica_status("opened"), StatusBoleto::Aberto);
        assert_eq!(classifica_status("paid"), StatusBoleto::Pago);
        assert_eq!(classifica_status("overdue"), StatusBoleto::Vencido);
        assert_eq!(classifica_status("canceled"), StatusBoleto::Cancelado);
    }

    #[test]
    fn expired_e_alias_de_vencido() {
        assert_eq!(classifica_status("expired"), StatusBoleto::Vencido);
    }

    #[test]
    fn codigo_desconhecido_vira_desconhecido() {
        assert_eq!(classifica_status("bogus"), StatusBoleto::Desconhecido);
        assert_eq!(classifica_status(""), StatusBoleto::Desconhecido);
    }

    #[test]
    fn traducao_cobre_a_tabela() {
        assert_eq!(traduz_status("opened"), "Em aberto");
        assert_eq!(traduz_status("paid"), "Pago");
        assert_eq!(traduz_status("overdue"), "Vencido");
        assert_eq!(traduz_status("expired"), "Vencido");
        assert_eq!(traduz_status("canceled"), "Cancelado");
    }

    #[test]
    fn traducao_de_desconhecido_volta_como_veio() {
        assert_eq!(traduz_status("processing"), "processing");
    }

    #[test]
    fn status_serializa_como_codigo_da_api() {
        let json = serde_json::to_string(&StatusBoleto::Vencido).unwrap();
        assert_eq!(json, "\"overdue\"");

        let status: StatusBoleto = serde_json::from_str("\"qualquer_coisa\"").unwrap();
        assert_eq!(status, StatusBoleto::Desconhecido);
    }
}
