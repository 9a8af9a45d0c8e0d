//! Soft tool probe.

use anyhow::Result;
use docrig_build::{probe, tool_version, DocConfig, ToolProbe};

/// Run the probe command. A missing tool is reported, not an error.
pub async fn run(config: &DocConfig) -> Result<()> {
    match probe(&config.tool) {
        ToolProbe::Found(path) => {
            let version = tool_version(&path).await;
            println!("found: {}", path.display());
            if let Some(version) = version {
                println!("version: {}", version);
            }
        }
        ToolProbe::NotFound => {
            println!("not found: {}", config.tool.name);
        }
    }

    Ok(())
}
