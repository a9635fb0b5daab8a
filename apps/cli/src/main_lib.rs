use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use tradejournal_core::registry::InMemoryRegistry;
use tradejournal_core::trades::{
    ImportOptions, ImportTradesSummary, InMemoryTradeRepository, TradeImportService,
    TradeImportServiceTrait,
};

use crate::config::Config;

pub fn init_tracing() {
    let log_format = std::env::var("TJ_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn load_options(config: &Config) -> anyhow::Result<ImportOptions> {
    let Some(path) = &config.options_file else {
        return Ok(ImportOptions::default());
    };
    let raw = tokio::fs::read_to_string(path).await?;
    let options = ImportOptions::from_json_str(&raw)?;
    tracing::info!("Import options loaded from {}", path.display());
    Ok(options)
}

pub async fn run(config: &Config) -> anyhow::Result<ImportTradesSummary> {
    let options = load_options(config).await?;
    let registry = Arc::new(InMemoryRegistry::new());
    let repository = Arc::new(InMemoryTradeRepository::new());
    let service = TradeImportService::new(registry, repository, options);

    let result = service.import_file(&config.import_file).await?;
    for issue in &result.issues {
        tracing::warn!("Skipped line {}: {}", issue.line, issue.message);
    }
    let summary = result.summary();
    tracing::info!("{}", summary);

    if let Some(export_path) = &config.export_path {
        let csv = service.export_trades()?;
        tokio::fs::write(export_path, csv).await?;
        tracing::info!("Exported trades to {}", export_path.display());
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LEDGER: &str = "\
Symbol,Entry Date,Exit Date,Entry Price,Exit Price,Quantity,Order Type,Strategy,Account,P&L,P&L %,Status
GODREJCP,07-03-2025,07-03-2025,\"1,174.30\",\"1,179.60\",25,Sell,Kumbhakaran Strategy,Zerodha,,,
RPGLIFE,07-07-2025,,\"2,675.00\",,2,Buy,Fusion Strategy,Zerodha,,,";

    #[tokio::test]
    async fn test_run_exports_trades() {
        let mut ledger = NamedTempFile::new().unwrap();
        ledger.write_all(LEDGER.as_bytes()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let export_path = dir.path().join("trades.csv");

        let config = Config {
            import_file: ledger.path().to_path_buf(),
            export_path: Some(export_path.clone()),
            options_file: None,
        };
        let summary = run(&config).await.unwrap();

        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.open_positions, 1);
        let exported = std::fs::read_to_string(export_path).unwrap();
        assert_eq!(exported.lines().count(), 3);
        assert!(exported.contains("RPGLIFE,2025-07-07,2675,,,,,Buy,Fusion Strategy,Zerodha"));
    }

    #[tokio::test]
    async fn test_options_file_is_applied() {
        let mut options = NamedTempFile::new().unwrap();
        options
            .write_all(br#"{"defaultAccount": "Upstox", "columnSlack": 4}"#)
            .unwrap();
        let config = Config {
            import_file: "unused.csv".into(),
            export_path: None,
            options_file: Some(options.path().to_path_buf()),
        };

        let loaded = load_options(&config).await.unwrap();
        assert_eq!(loaded.account_default(), "Upstox");
        assert_eq!(loaded.slack(), 4);
    }

    #[tokio::test]
    async fn test_invalid_options_file_fails() {
        let mut options = NamedTempFile::new().unwrap();
        options.write_all(br#"{"truncatedYear": 1800}"#).unwrap();
        let config = Config {
            import_file: "unused.csv".into(),
            export_path: None,
            options_file: Some(options.path().to_path_buf()),
        };

        assert!(load_options(&config).await.is_err());
    }
}
