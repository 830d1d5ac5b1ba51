use clap::Parser;
use tripinary::core::ConfigProvider;
use tripinary::utils::error::ErrorSeverity;
use tripinary::utils::{logger, validation::Validate};
use tripinary::{server, CliConfig, TomlConfig, TripinaryError};

async fn run<C: ConfigProvider + Validate>(config: C) -> Result<(), TripinaryError> {
    config.validate()?;
    server::serve(&config).await
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting tripinary server");

    let result = match cli.config.clone() {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            match TomlConfig::from_file(&path) {
                Ok(config) => run(config).await,
                Err(e) => Err(e),
            }
        }
        None => run(cli).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Server failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}
