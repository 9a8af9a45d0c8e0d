//! Installing generated documentation.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::DocConfig;
use crate::error::DocError;
use crate::exclude::ExcludeSet;

/// Result of an install operation.
#[derive(Debug)]
pub struct InstallReport {
    pub destination: PathBuf,

    /// Files copied
    pub copied: usize,

    /// Files and directories left out by exclusion patterns
    pub excluded: usize,

    /// True when there was no output tree to install
    pub skipped: bool,
}

/// Copy the output tree to `<doc root>/<project>`.
///
/// Installing is optional: without a prior build this copies nothing and
/// succeeds. `destdir` re-roots the destination for staged installs.
pub fn install(config: &DocConfig, destdir: Option<&Path>) -> Result<InstallReport, DocError> {
    let output_dir = config.output_dir();
    let destination = config.install_destination(destdir);

    if !output_dir.is_dir() {
        tracing::info!(
            "No documentation output at {}, skipping install",
            output_dir.display()
        );
        return Ok(InstallReport {
            destination,
            copied: 0,
            excluded: 0,
            skipped: true,
        });
    }

    let excludes = ExcludeSet::new(config.exclude.as_slice())?;
    fs::create_dir_all(&destination).map_err(|e| DocError::write(&destination, e))?;

    let mut copied = 0;
    let mut excluded = 0;
    let mut walker = WalkDir::new(&output_dir)
        .min_depth(1)
        .follow_links(true)
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| DocError::read(&output_dir, e))?;

        if excludes.matches(entry.file_name()) {
            tracing::debug!("Excluding {}", entry.path().display());
            excluded += 1;
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }

        let relative = entry.path().strip_prefix(&output_dir).unwrap_or(entry.path());
        let dest = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(|e| DocError::write(&dest, e))?;
        } else {
            fs::copy(entry.path(), &dest).map_err(|e| DocError::write(&dest, e))?;
            copied += 1;
        }
    }

    tracing::info!(
        "Installed {} files to {} ({} excluded)",
        copied,
        destination.display(),
        excluded
    );

    Ok(InstallReport {
        destination,
        copied,
        excluded,
        skipped: false,
    })
}
