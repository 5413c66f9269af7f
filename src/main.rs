use clap::Parser;
use spoofer_client::config::Command;
use spoofer_client::utils::error::ErrorCategory;
use spoofer_client::utils::logger;
use spoofer_client::{CliConfig, Result, Spoofer, SpooferError};

async fn run(cli: &CliConfig) -> Result<()> {
    let config = cli.resolve_config()?;
    tracing::debug!("Resolved config: {:?}", config);

    let spoofer = Spoofer::from_config(&config);
    let today = chrono::Local::now().date_naive();

    match &cli.command {
        Command::Collection { file_name, .. } => {
            let Some((query, format)) = cli.command.collection_query(&config, today) else {
                return Ok(());
            };
            let written = spoofer.write_collection(file_name, format, &query).await?;
            println!("📁 Output saved to: {}", written.display());
        }
        Command::Session { id, ip_version } => {
            let possibilities = spoofer.obtain_spoofed_possibilities(*id, *ip_version).await?;
            println!("{}", serde_json::to_string_pretty(&possibilities)?);
        }
    }

    Ok(())
}

fn exit_code(error: &SpooferError) -> i32 {
    match error.category() {
        ErrorCategory::Input => 2,
        ErrorCategory::Network => 3,
        ErrorCategory::Data => 4,
        ErrorCategory::System => 1,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting spoofer CLI");

    if let Err(e) = run(&cli).await {
        tracing::error!("❌ {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }
}
