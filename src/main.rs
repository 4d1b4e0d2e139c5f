use anyhow::Context;
use clap::Parser;
use vive_delivery::adapters::auth::TokenAuthority;
use vive_delivery::config::Command;
use vive_delivery::domain::ports::ServerSettings;
use vive_delivery::utils::logger;
use vive_delivery::{compute_price, start_server, CliConfig, DeliveryError, EstimateClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.json_logs);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config.command).await {
        tracing::error!("❌ {:#}", e);
        match e.downcast_ref::<DeliveryError>() {
            Some(delivery_error) => eprintln!("❌ {}", delivery_error.user_friendly_message()),
            None => eprintln!("❌ {:#}", e),
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve(args) => {
            let server_config = args.to_server_config()?;
            tracing::info!("Starting vive-delivery server");
            start_server(server_config).await?;
        }
        Command::Quote(args) => {
            let pricing = compute_price(&args.to_quote());
            println!("{}", serde_json::to_string_pretty(&pricing)?);
        }
        Command::Estimate { server, quote } => {
            let client = EstimateClient::new(&server)?;
            let pricing = client
                .estimate(&quote.to_quote())
                .await
                .with_context(|| format!("estimate request to {}", client.endpoint()))?;
            println!("{}", serde_json::to_string_pretty(&pricing)?);
        }
        Command::Token(args) => {
            let server_config = args.to_server_config()?;
            if server_config.uses_placeholder_secret() {
                tracing::warn!("Signing with the placeholder secret; set JWT_SECRET for real tokens");
            }
            let authority =
                TokenAuthority::new(server_config.jwt_secret(), server_config.token_ttl_days());
            println!("{}", authority.issue(&args.sub, &args.email)?);
        }
    }
    Ok(())
}
