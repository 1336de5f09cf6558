use auto_catalog::core::ConfigProvider;
use auto_catalog::utils::error::ErrorSeverity;
use auto_catalog::utils::{logger, validation::Validate};
use auto_catalog::{
    CatalogError, CliConfig, EnrichmentPool, EnvConfig, HttpCarInfoClient, TomlConfig,
};
use clap::Parser;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();
    let env_config = cli.from_env.then(EnvConfig::from_env);

    // DEBUG=true 與 --verbose 效果相同
    let verbose = cli.verbose
        || matches!(&env_config, Some(Ok(env_config)) if env_config.debug);

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting auto-catalog CLI");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match (&cli.config, env_config) {
        (Some(path), _) => match TomlConfig::from_file(path) {
            Ok(file_config) => run(&file_config, &cli.reg_nums).await,
            Err(e) => Err(e),
        },
        (None, Some(Ok(env_config))) => run(&env_config, &cli.reg_nums).await,
        (None, Some(Err(e))) => Err(e),
        (None, None) => run(&cli, &cli.reg_nums).await,
    };

    match result {
        Ok(json) => {
            println!("{}", json);
        }
        Err(e) => {
            tracing::error!("❌ Enrichment failed: {} (Severity: {:?})", e, e.severity());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run<C>(config: &C, reg_nums: &[String]) -> Result<String, CatalogError>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    let client = HttpCarInfoClient::from_config(config)?;
    let pool = EnrichmentPool::from_config(client, config)?;

    // Ctrl-C 取消整個批次
    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling enrichment");
            signal_token.cancel();
        }
    });

    let cars = pool.enrich_with_token(reg_nums, &shutdown).await?;
    Ok(serde_json::to_string_pretty(&cars)?)
}
