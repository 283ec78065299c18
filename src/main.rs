use clap::Parser;
use lensmatch::config::toml_config::TomlConfig;
use lensmatch::utils::{logger, validation::Validate};
use lensmatch::{CliConfig, LocalStorage, MatchEngine, MatchPipeline, Prescription};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting lensmatch CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // Session file overrides the flags when given.
    if let Some(path) = config.config.clone() {
        match TomlConfig::from_file(&path) {
            Ok(session) => {
                if let Err(e) = session.validate() {
                    tracing::error!("❌ Session file validation failed: {}", e);
                    eprintln!("❌ {}", e.user_friendly_message());
                    std::process::exit(1);
                }
                session.apply(&mut config);
                tracing::info!("Loaded session file: {}", path);
            }
            Err(e) => {
                tracing::error!("❌ Could not load session file {}: {}", path, e);
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // The filter itself is permissive about empty prescriptions, so the
    // guard has to live here, before anything gets fetched.
    let raw = std::fs::read_to_string(&config.prescription)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let prescription = match Prescription::from_value(&value) {
        Ok(rx) => rx,
        Err(e) => {
            tracing::error!("❌ Could not read prescription: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    if prescription.is_empty() {
        tracing::error!("❌ Prescription is empty");
        eprintln!("❌ Invalid prescription. Please enter at least one value.");
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = match MatchPipeline::new(storage, config, prescription) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    let engine = MatchEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Lens matching completed successfully!");
            println!("✅ Lens matching completed successfully!");
            println!("📁 Results saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Lens matching failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                lensmatch::utils::error::ErrorSeverity::Low => 0,
                lensmatch::utils::error::ErrorSeverity::Medium => 2,
                lensmatch::utils::error::ErrorSeverity::High => 1,
                lensmatch::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
