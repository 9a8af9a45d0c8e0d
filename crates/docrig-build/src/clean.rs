//! Removing generated documentation.

use std::fs;
use std::path::PathBuf;

use crate::config::DocConfig;
use crate::error::DocError;

/// Result of a clean operation.
#[derive(Debug)]
pub struct CleanReport {
    pub path: PathBuf,

    /// False when there was nothing to remove
    pub removed: bool,
}

/// Delete the build directory with its staged sources and output.
///
/// Succeeds when the directory does not exist. Refuses to remove a build
/// directory that contains the documentation source.
pub fn clean(config: &DocConfig) -> Result<CleanReport, DocError> {
    let build_dir = &config.build_dir;

    if !build_dir.exists() {
        tracing::info!("Nothing to clean at {}", build_dir.display());
        return Ok(CleanReport {
            path: build_dir.clone(),
            removed: false,
        });
    }

    let resolved = fs::canonicalize(build_dir).map_err(|e| DocError::read(build_dir, e))?;
    if let Ok(source) = fs::canonicalize(&config.source_dir) {
        if source.starts_with(&resolved) {
            return Err(DocError::UnsafeClean {
                build_dir: build_dir.display().to_string(),
                source_dir: config.source_dir.display().to_string(),
            });
        }
    }

    fs::remove_dir_all(build_dir).map_err(|e| DocError::write(build_dir, e))?;
    tracing::info!("Removed {}", build_dir.display());

    Ok(CleanReport {
        path: build_dir.clone(),
        removed: true,
    })
}
