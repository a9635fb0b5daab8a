mod config;
mod main_lib;

use config::Config;
use main_lib::{init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    tracing::info!("Importing {}", config.import_file.display());
    run(&config).await?;
    Ok(())
}
