pub mod cobranca;
pub mod config;
pub mod error;
pub mod financeiro;

pub use cobranca::boleto_model::{Boleto, RawBoleto, StatusBoleto};
pub use cobranca::boleto_service::{BoletoService, BuscaBoletos, Relatorio};
pub use config::{ApiConfig, AuthScheme, UnidadeValor};
pub use error::ApiError;
pub use financeiro::inadimplencia::{clientes_inadimplentes, ClienteInadimplente};
pub use financeiro::resumo::{resumo_carteira, ResumoCarteira};
