#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use rcs_check::utils::{logger, validation::Validate};
#[cfg(feature = "cli")]
use rcs_check::{
    CapabilityPipeline, CheckEngine, CheckReport, CliConfig, DotgoChecker, DotgoConfig,
    LocalStorage, TokenCache,
};

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting rcs-check");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.kind().exit_code());
    }

    let dotgo = DotgoConfig::from_env()
        .and_then(|dotgo| dotgo.validate().map(|_| dotgo))
        .unwrap_or_else(|e| {
            tracing::error!("Aggregator configuration failed: {}", e);
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(e.kind().exit_code());
        });

    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let storage = LocalStorage::new(".".to_string());
    let tokens = TokenCache::new(
        http.clone(),
        dotgo.auth_base_url.clone(),
        dotgo.api_credentials.clone(),
        dotgo.aggregator_credentials.clone(),
    );
    let checker = DotgoChecker::new(
        http,
        dotgo.server_root.clone(),
        dotgo.bot_id.clone(),
        dotgo.chunk_size,
    );

    let pipeline = CapabilityPipeline::new(storage, config, tokens, checker);
    let engine = CheckEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            tracing::info!("RCS capability check completed");
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Err(e) => {
            tracing::error!("Check failed: {} (kind: {:?})", e, e.kind());
            let report = CheckReport::failure(e.user_friendly_message());
            println!("{}", serde_json::to_string_pretty(&report)?);
            std::process::exit(e.kind().exit_code());
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("rcs-check was built without the `cli` feature");
}
