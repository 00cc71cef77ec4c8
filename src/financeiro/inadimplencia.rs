use std::collections::BTreeMap;

use tracing::debug;

use crate::cobranca::boleto_model::{Boleto, StatusBoleto};

pub use crate::cobranca::boleto_model::ClienteInadimplente;

/// Clientes com `minimo` ou mais boletos vencidos.
///
/// A regra de negocio e "3 ou mais", nao "exatamente 3" -- cliente com 4
/// vencidos esta mais inadimplente, nao menos. O limite vem da configuracao.
/// Boleto sem cpf/cnpj fica fora da conta, documento e a identidade do
/// cliente e nao da para agrupar quem nao tem.
pub fn clientes_inadimplentes(boletos: &[Boleto], minimo: usize) -> Vec<ClienteInadimplente> {
    //BTreeMap pelo documento ja deixa a saida ordenada e deterministica
    let mut por_documento: BTreeMap<&str, (&str, usize)> = BTreeMap::new();

    for boleto in boletos {
        if boleto.status != StatusBoleto::Vencido {
            continue;
        }
        let documento = match &boleto.cpf_cnpj {
            Some(doc) => doc.as_str(),
            None => continue,
        };

        //nome que aparecer primeiro fica para exibicao
        let entrada = por_documento.entry(documento).or_insert((&boleto.nome, 0));
        entrada.1 += 1;
    }

    let inadimplentes: Vec<ClienteInadimplente> = por_documento
        .into_iter()
        .filter(|(_, (_, vencidos))| *vencidos >= minimo)
        .map(|(documento, (nome, vencidos))| ClienteInadimplente {
            nome: nome.to_string(),
            cpf_cnpj: documento.to_string(),
            vencidos,
        })
        .collect();

    debug!(
        "{} clientes com {} ou mais boletos vencidos",
        inadimplentes.len(),
        minimo
    );
    inadimplentes
}
