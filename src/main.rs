use anyhow::Context;
use clap::Parser;
use statement_normalizer::config::LogFormat;
use statement_normalizer::utils::error::ErrorSeverity;
use statement_normalizer::utils::{logger, validation::Validate};
use statement_normalizer::{CliConfig, LocalStorage, NormalizeEngine, StatementPipeline, TomlConfig};

fn load_config() -> anyhow::Result<CliConfig> {
    let mut config = CliConfig::parse();
    if let Some(path) = config.config.clone() {
        let file = TomlConfig::from_file(&path)
            .with_context(|| format!("loading config file '{}'", path))?;
        config.merge_toml(file);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    match config.log_format {
        LogFormat::Text => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting statement-normalizer");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_dir());
    // Output paths resolve against the output directory, so the input is read
    // through its absolute path.
    let mut run_config = config.clone();
    run_config.input = Some(
        std::path::absolute(config.input.as_deref().unwrap_or_default())
            .context("resolving input path")?
            .display()
            .to_string(),
    );
    let json = config.json;

    let pipeline = StatementPipeline::new(storage, run_config);
    let engine = NormalizeEngine::new(pipeline);

    let outcome = engine.run().await.and_then(|report| {
        if json {
            report.to_json()
        } else {
            Ok(format!(
                "✅ Standardized file generated: {}\n📄 {} transactions written, {} rows rejected",
                report.output_location, report.records_emitted, report.records_rejected
            ))
        }
    });

    match outcome {
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            tracing::error!(
                "❌ Normalization failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ Error processing file: {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

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
