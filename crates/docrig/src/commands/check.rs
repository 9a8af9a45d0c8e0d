//! Hard tool probe.

use anyhow::Result;
use docrig_build::{probe, require_tool, DocConfig};

/// Run the check command.
pub fn run(config: &DocConfig) -> Result<()> {
    let result = probe(&config.tool);
    let path = require_tool(&config.tool, &result)?;

    tracing::info!("Using {}", path.display());

    Ok(())
}
