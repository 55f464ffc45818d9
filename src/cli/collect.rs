//! `readmark collect`: run the progress collector until interrupted.

use color_eyre::Result;

use crate::collector::{start_collector, ProgressStore};
use crate::startup::CollectorConfig;

pub async fn handle_collect_command(config: CollectorConfig) -> Result<()> {
    let (server, _addr) = start_collector(&config, ProgressStore::new()).await?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Shutting down progress collector");
        }
        result = server => {
            result?;
        }
    }

    Ok(())
}
