use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::cobranca::boleto_model::{Boleto, StatusBoleto};

/// Numeros do painel executivo para um ciclo de busca.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ResumoCarteira {
    pub total: usize,
    pub pagos: usize,
    pub abertos: usize,
    pub vencidos: usize,
    pub pagos_ontem: usize,
    pub valor_pago_mes: f64,
}

/// Conta a carteira em relacao a `hoje`. A data entra por parametro para o
/// resumo ser puro e testavel, quem chama passa `Local::now().date_naive()`.
pub fn resumo_carteira(boletos: &[Boleto], hoje: NaiveDate) -> ResumoCarteira {
    let ontem = hoje.checked_sub_days(Days::new(1));
    let inicio_mes = hoje.with_day(1).unwrap_or(hoje);

    let mut resumo = ResumoCarteira {
        total: boletos.len(),
        pagos: 0,
        abertos: 0,
        vencidos: 0,
        pagos_ontem: 0,
        valor_pago_mes: 0.0,
    };

    for boleto in boletos {
        match boleto.status {
            StatusBoleto::Pago => {
                resumo.pagos += 1;
                if boleto.pago_em.is_some() && boleto.pago_em == ontem {
                    resumo.pagos_ontem += 1;
                }
                if let Some(pago_em) = boleto.pago_em {
                    if pago_em >= inicio_mes {
                        resumo.valor_pago_mes += boleto.valor;
                    }
                }
            }
            StatusBoleto::Aberto => resumo.abertos += 1,
            StatusBoleto::Vencido => resumo.vencidos += 1,
            StatusBoleto::Cancelado | StatusBoleto::Desconhecido => {}
        }
    }

    resumo
}
