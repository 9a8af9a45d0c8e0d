//! Install command.

use std::path::Path;

use anyhow::Result;
use docrig_build::{install, DocConfig};

/// Run the install command.
pub fn run(config: &DocConfig, destdir: Option<&Path>) -> Result<()> {
    let report = install(config, destdir)?;

    if report.skipped {
        tracing::info!("Nothing to install. Run 'docrig build' first to install documentation.");
    } else {
        tracing::info!("Output: {}", report.destination.display());
    }

    Ok(())
}
