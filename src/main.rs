use chrono::Local;
use tracing::{error, info, warn};

use painel_boletos::cobranca::boleto_model::traduz_status;
use painel_boletos::{clientes_inadimplentes, resumo_carteira, ApiConfig, BoletoService};

//Painel executivo de boletos: uma rodada de busca-agrega-exibe por execucao.
//Toda a parte de exibicao mora aqui, a lib nao imprime nada.
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ApiConfig::from_env().map_err(|e| {
        error!("Configuracao invalida: {}", e);
        anyhow::anyhow!("Erro de configuracao: {}", e)
    })?;
    let service = BoletoService::new(config).map_err(|e| {
        error!("Erro ao montar o cliente http: {}", e);
        anyhow::anyhow!("Erro ao montar o cliente http")
    })?;
    let limite = service.config().limite_inadimplencia;

    info!("Buscando boletos na api de cobranca");
    let relatorio = service.busca_boletos_normalizados(None).await.map_err(|e| {
        error!("Erro ao buscar boletos: {}", e);
        anyhow::anyhow!("Erro ao buscar boletos: {}", e)
    })?;

    if let Some(aviso) = &relatorio.aviso {
        warn!("Busca incompleta: {}", aviso);
        println!("AVISO: dados parciais ({})", aviso);
    }

    let hoje = Local::now().date_naive();
    let resumo = resumo_carteira(&relatorio.boletos, hoje);

    println!("=== Painel Executivo - Boletos ===");
    println!("Total de boletos:   {}", resumo.total);
    println!("Boletos pagos:      {}", resumo.pagos);
    println!("Em aberto:          {}", resumo.abertos);
    println!("Vencidos:           {}", resumo.vencidos);
    println!("Pagos ontem:        {}", resumo.pagos_ontem);
    println!("Valor pago no mes:  R$ {:.2}", resumo.valor_pago_mes);

    let inadimplentes = clientes_inadimplentes(&relatorio.boletos, limite);
    println!();
    println!("=== Clientes com {} ou mais boletos vencidos ===", limite);
    if inadimplentes.is_empty() {
        println!("nenhum");
    }
    for cliente in &inadimplentes {
        println!(
            "{} | {} | {} vencidos",
            cliente.nome, cliente.cpf_cnpj, cliente.vencidos
        );
    }

    println!();
    println!("=== Todos os boletos ===");
    for boleto in &relatorio.boletos {
        println!(
            "{} | {} | {} | R$ {:.2} | venc: {}",
            boleto.nome,
            boleto.cpf_cnpj.as_deref().unwrap_or("-"),
            traduz_status(boleto.status.codigo_api()),
            boleto.valor,
            boleto
                .vencimento
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }

    Ok(())
}
