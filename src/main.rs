use clap::Parser;
use holder_snapshot::domain::ports::ConfigProvider;
use holder_snapshot::utils::{logger, validation::Validate};
use holder_snapshot::{CliConfig, HolderFetcher, LocalStorage, SnapshotEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting holder-snapshot");

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Resolved config: {:?}", config);

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.base_dir());
    let fetcher = HolderFetcher::new(&config)?;
    let engine =
        SnapshotEngine::new_with_monitoring(storage, fetcher, config.page_size(), config.monitor);

    match engine.run().await {
        Ok(report) => {
            if !report.partial_tokens.is_empty() {
                tracing::warn!(
                    "⚠️ Partial holder data for: {}",
                    report.partial_tokens.join(", ")
                );
            }
            println!(
                "✅ Snapshot complete: {} tokens, {} addresses, {} pages",
                report.tokens_processed, report.aggregate_rows, report.total_pages
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Snapshot run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}
