use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::config::UnidadeValor;

use super::boleto_model::{classifica_status, Boleto, RawBoleto, StatusBoleto};

//Tabelas de alias: cada configuracao da api usa um nome de campo diferente
//para o mesmo dado. O primeiro alias presente ganha.
const ALIAS_NOME: [&str; 2] = ["customer_person_name", "customer_name"];
const ALIAS_DOCUMENTO: [&str; 2] = ["customer_cnpj_cpf", "customer_document"];
const ALIAS_VENCIMENTO: [&str; 2] = ["expire_at", "due_date"];
const ALIAS_PAGAMENTO: [&str; 2] = ["paid_at", "paid_date"];

/// Converte um boleto cru da api na forma canonica.
/// Campo ausente vira vazio/None, nunca erro.
pub fn normaliza_boleto(raw: &RawBoleto, unidade: UnidadeValor) -> Boleto {
    let nome = pega_string(raw, &ALIAS_NOME).unwrap_or_default();

    //documento vazio conta como ausente, senao a agregacao agruparia
    //clientes distintos debaixo de ""
    let cpf_cnpj = pega_string(raw, &ALIAS_DOCUMENTO).filter(|doc| !doc.is_empty());

    let status = raw
        .get("status")
        .and_then(Value::as_str)
        .map(classifica_status)
        .unwrap_or(StatusBoleto::Desconhecido);

    let valor = raw
        .get("amount")
        .map(|v| normaliza_valor(v, unidade))
        .unwrap_or(0.0);

    let vencimento = pega_data(raw, &ALIAS_VENCIMENTO);
    let pago_em = pega_data(raw, &ALIAS_PAGAMENTO);
    let tags = pega_tags(raw.get("tags"));

    let boleto = Boleto {
        nome,
        cpf_cnpj,
        status,
        valor,
        vencimento,
        pago_em,
        tags,
    };
    debug!("Boleto normalizado: {:?}", boleto);
    boleto
}

//alias presente mas null conta como ausente e cai para o proximo
fn pega_string(raw: &RawBoleto, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|alias| raw.get(*alias))
        .find_map(Value::as_str)
        .map(|s| s.to_string())
}

fn pega_data(raw: &RawBoleto, aliases: &[&str]) -> Option<NaiveDate> {
    aliases
        .iter()
        .filter_map(|alias| raw.get(*alias))
        .find_map(Value::as_str)
        .and_then(parse_data)
}

/// Parse leniente de data: `YYYY-MM-DD` direto, datetime ISO cortado no `T`.
/// Valor invalido vira None, nunca "hoje" nem epoch.
fn parse_data(valor: &str) -> Option<NaiveDate> {
    let somente_data = valor.split('T').next().unwrap_or(valor);
    NaiveDate::parse_from_str(somente_data, "%Y-%m-%d").ok()
}

/// Converte `amount` para reais conforme a unidade configurada.
/// Valor negativo nao existe nesse dominio, trava em zero.
fn normaliza_valor(valor: &Value, unidade: UnidadeValor) -> f64 {
    let bruto = match valor {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    let em_reais = match unidade {
        UnidadeValor::Centavos => bruto / 100.0,
        UnidadeValor::Reais => bruto,
    };

    em_reais.max(0.0)
}

/// Api manda `tags` ora como lista, ora como string solta.
fn pega_tags(valor: Option<&Value>) -> Vec<String> {
    match valor {
        Some(Value::Array(itens)) => itens
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.to_string())
            .collect(),
        Some(Value::String(tag)) => vec![tag.clone()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(valor: serde_json::Value) -> RawBoleto {
        match valor {
            Value::Object(mapa) => mapa,
            _ => panic!("fixture tem que ser objeto"),
        }
    }

    #[test]
    fn normaliza_boleto_kobana() {
        let boleto = normaliza_boleto(
            &raw(json!({
                "customer_person_name": "Acme LTDA",
                "customer_cnpj_cpf": "12.345.678/0001-90",
                "status": "overdue",
                "amount": 20000,
                "expire_at": "2026-07-10",
                "paid_at": null,
                "tags": ["mensalidade"]
            })),
            UnidadeValor::Centavos,
        );

        assert_eq!(boleto.nome, "Acme LTDA");
        assert_eq!(boleto.cpf_cnpj.as_deref(), Some("12.345.678/0001-90"));
        assert_eq!(boleto.status, StatusBoleto::Vencido);
        assert_eq!(boleto.valor, 200.0);
        assert_eq!(
            boleto.vencimento,
            NaiveDate::from_ymd_opt(2026, 7, 10)
        );
        assert_eq!(boleto.pago_em, None);
        assert_eq!(boleto.tags, vec!["mensalidade".to_string()]);
    }

    #[test]
    fn alias_de_documento_e_vencimento() {
        let boleto = normaliza_boleto(
            &raw(json!({
                "customer_name": "Jose",
                "customer_document": "111.222.333-44",
                "status": "opened",
                "amount": 50.5,
                "due_date": "2026-08-01"
            })),
            UnidadeValor::Reais,
        );

        assert_eq!(boleto.nome, "Jose");
        assert_eq!(boleto.cpf_cnpj.as_deref(), Some("111.222.333-44"));
        assert_eq!(boleto.valor, 50.5);
        assert_eq!(
            boleto.vencimento,
            NaiveDate::from_ymd_opt(2026, 8, 1)
        );
    }

    #[test]
    fn primeiro_alias_presente_ganha() {
        let boleto = normaliza_boleto(
            &raw(json!({
                "customer_cnpj_cpf": "prioritario",
                "customer_document": "ignorado",
                "status": "paid",
                "amount": 0
            })),
            UnidadeValor::Reais,
        );
        assert_eq!(boleto.cpf_cnpj.as_deref(), Some("prioritario"));
    }

    #[test]
    fn valor_em_centavos_divide_por_cem() {
        let boleto = normaliza_boleto(
            &raw(json!({ "amount": 20000, "status": "paid" })),
            UnidadeValor::Centavos,
        );
        assert_eq!(boleto.valor, 200.0);
    }

    #[test]
    fn valor_em_reais_passa_direto() {
        let boleto = normaliza_boleto(
            &raw(json!({ "amount": 200.0, "status": "paid" })),
            UnidadeValor::Reais,
        );
        assert_eq!(boleto.valor, 200.0);
    }

    #[test]
    fn valor_em_string_e_aceito() {
        let boleto = normaliza_boleto(
            &raw(json!({ "amount": "1550", "status": "opened" })),
            UnidadeValor::Centavos,
        );
        assert_eq!(boleto.valor, 15.5);
    }

    #[test]
    fn valor_negativo_trava_em_zero() {
        let boleto = normaliza_boleto(
            &raw(json!({ "amount": -100, "status": "opened" })),
            UnidadeValor::Reais,
        );
        assert_eq!(boleto.valor, 0.0);
    }

    #[test]
    fn data_em_datetime_iso_corta_no_t() {
        let boleto = normaliza_boleto(
            &raw(json!({ "expire_at": "2026-07-10T12:30:00Z", "status": "opened" })),
            UnidadeValor::Reais,
        );
        assert_eq!(
            boleto.vencimento,
            NaiveDate::from_ymd_opt(2026, 7, 10)
        );
    }

    #[test]
    fn data_invalida_vira_ausente() {
        let boleto = normaliza_boleto(
            &raw(json!({ "expire_at": "nao-e-data", "due_date": "", "status": "opened" })),
            UnidadeValor::Reais,
        );
        assert_eq!(boleto.vencimento, None);
    }

    #[test]
    fn documento_vazio_vira_ausente() {
        let boleto = normaliza_boleto(
            &raw(json!({ "customer_cnpj_cpf": "", "status": "overdue" })),
            UnidadeValor::Reais,
        );
        assert_eq!(boleto.cpf_cnpj, None);
    }

    #[test]
    fn tags_em_string_solta_viram_lista() {
        let boleto = normaliza_boleto(
            &raw(json!({ "tags": "atraso", "status": "overdue" })),
            UnidadeValor::Reais,
        );
        assert_eq!(boleto.tags, vec!["atraso".to_string()]);
    }

    #[test]
    fn campos_todos_ausentes_nao_explodem() {
        let boleto = normaliza_boleto(&raw(json!({})), UnidadeValor::Centavos);
        assert_eq!(boleto.nome, "");
        assert_eq!(boleto.cpf_cnpj, None);
        assert_eq!(boleto.status, StatusBoleto::Desconhecido);
        assert_eq!(boleto.valor, 0.0);
        assert!(boleto.tags.is_empty());
    }

    #[test]
    fn normalizacao_e_idempotente_sobre_entrada_canonica() {
        let primeiro = normaliza_boleto(
            &raw(json!({
                "customer_person_name": "Acme LTDA",
                "customer_cnpj_cpf": "12.345.678/0001-90",
                "status": "overdue",
                "amount": 20000,
                "expire_at": "2026-07-10",
                "tags": ["mensalidade"]
            })),
            UnidadeValor::Centavos,
        );

        //re-serializa o canonico e normaliza de novo, agora em reais
        let reserializado = raw(serde_json::to_value(&primeiro).unwrap());
        let segundo = normaliza_boleto(&reserializado, UnidadeValor::Reais);

        assert_eq!(primeiro, segundo);
    }
}
