//! Documentation build command.

use anyhow::Result;
use docrig_build::{probe, DocBuilder, DocConfig};

/// Run the build command.
pub async fn run(config: DocConfig) -> Result<()> {
    tracing::info!("Building documentation...");

    let tool = probe(&config.tool);
    let result = DocBuilder::new(config).build(&tool).await?;

    tracing::info!(
        "Built {} files in {}ms",
        result.files,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
