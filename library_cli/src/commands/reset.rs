use anyhow::Result;
use library_lib::{Config, InMemoryRepository};

pub fn run(config: &Config) -> Result<()> {
    InMemoryRepository::seeded()?.save(&config.data_file)?;
    tracing::info!("Restored the seed library into {}", config.data_file.display());
    Ok(())
}
