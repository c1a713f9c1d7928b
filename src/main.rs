use anyhow::Context;
use clap::Parser;
use lotto_stake::cli::{Cli, Commands};
use lotto_stake::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration; only a missing file falls back to defaults
    let loaded = Config::load_optional(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config))?;
    let missing = loaded.is_none();
    let config = loaded.unwrap_or_default();

    // Initialize telemetry
    lotto_stake::telemetry::init_telemetry(&config.telemetry)?;

    if missing {
        tracing::warn!(path = %cli.config, "Config file not found, using defaults");
    }

    match cli.command {
        Commands::Backtest(args) => {
            args.execute(&config).await?;
        }
        Commands::Sweep(args) => {
            args.execute(&config).await?;
        }
        Commands::Validate(args) => {
            args.execute(&config)?;
        }
        Commands::Config => {
            let policy = config.effective_policy();
            println!("Current configuration:");
            println!("  Source: {:?}", config.source.kind);
            if let Some(path) = &config.source.path {
                println!("    Path: {}", path.display());
            }
            println!("    Base URL: {}", config.source.base_url);
            println!("  Report: {:?} -> {}", config.report.format, config.report.output_dir.display());
            println!(
                "  Policy: base={} sequence={} stop_loss={} odds={} start_omission={} periods={}",
                display(policy.base_amount),
                display(policy.betting_sequence),
                display(policy.stop_loss_count),
                display(policy.odds),
                display(policy.start_omission),
                display(policy.test_periods),
            );
            println!(
                "  Telemetry: level={} format={:?} metrics_port={}",
                config.telemetry.log_level,
                config.telemetry.log_format,
                display(config.telemetry.metrics_port),
            );
        }
    }

    Ok(())
}

fn display<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
