use anyhow::Result;
use tracing::info;

use gomoku_uci::UciEngine;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!("gomoku starting");
    UciEngine::new().run()?;
    Ok(())
}
