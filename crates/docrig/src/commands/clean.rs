//! Clean command.

use anyhow::Result;
use docrig_build::{clean, DocConfig};

/// Run the clean command.
pub fn run(config: &DocConfig) -> Result<()> {
    let report = clean(config)?;

    if report.removed {
        tracing::info!("Cleaned {}", report.path.display());
    }

    Ok(())
}
