use clap::Parser;
use std::sync::Arc;
use togrow::adapters::api::{parse_date, parse_limit, PlantGuideDto, SolarTermResponse};
use togrow::adapters::catalog::{seed_catalog_json, CatalogFormat};
use togrow::config::Command;
use togrow::core::Storage;
use togrow::utils::error::ErrorSeverity;
use togrow::utils::{logger, validation::Validate};
use togrow::{CliConfig, GuideService, LocalStorage, StorageCatalog, TogrowError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if let Command::Serve { config: config_path } = &config.command {
        return serve(config_path).await;
    }

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting togrow CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,      // 輸入錯誤
            ErrorSeverity::Medium => 2,   // 讀寫錯誤
            ErrorSeverity::High => 1,     // 資料錯誤
            ErrorSeverity::Critical => 3, // 設定錯誤
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(config: &CliConfig) -> togrow::Result<()> {
    let (storage, file_name) = LocalStorage::for_file(&config.catalog);

    if let Command::InitCatalog { force } = &config.command {
        return init_catalog(&storage, &file_name, *force).await;
    }

    let catalog = StorageCatalog::from_path(storage, file_name)?;
    let service = GuideService::from_config(Arc::new(catalog), config)?;

    match &config.command {
        Command::Term { date } => {
            let date = match date {
                Some(raw) => parse_date(raw)?,
                None => service.today(),
            };
            let response = SolarTermResponse::new(date, service.term_for(date));
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Guides { term, date, limit } => {
            let term = match term {
                Some(term) => term.clone(),
                None => {
                    let date = match date {
                        Some(raw) => parse_date(raw)?,
                        None => service.today(),
                    };
                    let resolved = service.term_for(date);
                    tracing::info!("🌱 {} falls in {} ({})", date, resolved.name, resolved.date_range);
                    resolved.name
                }
            };

            let limit = parse_limit(limit.as_deref(), service.default_limit())?;
            let guides: Vec<PlantGuideDto> = service
                .guides_for_term(&term, limit)
                .await?
                .into_iter()
                .map(PlantGuideDto::from)
                .collect();

            if guides.is_empty() {
                tracing::info!("No plant guides found for term: {}", term);
            }
            println!("{}", serde_json::to_string_pretty(&guides)?);
        }
        Command::Serve { .. } | Command::InitCatalog { .. } => {}
    }

    Ok(())
}

/// 目錄檔不存在 (或 --force) 時寫入內建樣本。
async fn init_catalog(storage: &LocalStorage, file_name: &str, force: bool) -> togrow::Result<()> {
    if CatalogFormat::from_path(file_name) != Some(CatalogFormat::Json) {
        return Err(TogrowError::InvalidConfigValueError {
            field: "catalog".to_string(),
            value: file_name.to_string(),
            reason: "init-catalog only writes JSON catalogs".to_string(),
        });
    }

    if storage.exists(file_name).await && !force {
        tracing::info!("📁 Catalog {} already exists, skipping sample import", file_name);
        return Ok(());
    }

    storage.write_file(file_name, seed_catalog_json()).await?;
    tracing::info!("✅ Sample plant catalog written to {}", file_name);
    println!("✅ Sample plant catalog written to {}", file_name);
    Ok(())
}

#[cfg(feature = "server")]
async fn serve(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    use togrow::adapters::http::run_server;
    use togrow::config::toml_config::ServerConfig;

    // 載入 TOML 配置
    let config = match ServerConfig::from_file(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", config_path, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_server_logger(config.log_level());
    tracing::info!("📁 Loaded configuration from: {}", config_path);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let format = config
        .catalog_format()
        .ok_or_else(|| TogrowError::ConfigError {
            message: format!("Cannot determine format of {}", config.catalog.path),
        })?;
    let (storage, file_name) = LocalStorage::for_file(&config.catalog.path);
    let catalog = StorageCatalog::new(storage, file_name, format);
    let service = GuideService::from_config(Arc::new(catalog), &config)?;

    run_server(Arc::new(service), config.bind(), config.port()).await?;
    Ok(())
}

#[cfg(not(feature = "server"))]
async fn serve(_config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("❌ togrow was built without the `server` feature");
    std::process::exit(1);
}
