pub mod inadimplencia;
pub mod resumo;
