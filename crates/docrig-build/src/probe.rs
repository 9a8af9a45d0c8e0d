//! Documentation tool discovery.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::config::ToolSpec;
use crate::error::DocError;

/// Outcome of looking for the documentation tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolProbe {
    Found(PathBuf),
    NotFound,
}

impl ToolProbe {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Look for the tool using the process `PATH`.
pub fn probe(tool: &ToolSpec) -> ToolProbe {
    probe_in(tool, env::var_os("PATH").as_deref())
}

/// Look for the tool using an explicit `PATH` value.
///
/// A configured path wins when it is executable. Found paths are made
/// absolute against the current directory, since the build runs the tool
/// from inside the staged tree. Absence is never an error here; see
/// [`require_tool`].
pub fn probe_in(tool: &ToolSpec, search_path: Option<&OsStr>) -> ToolProbe {
    if let Some(configured) = &tool.path {
        if is_executable(configured) {
            tracing::debug!("Using configured {} at {}", tool.name, configured.display());
            return ToolProbe::Found(absolute(configured.clone()));
        }
        tracing::warn!(
            "Configured tool path {} is not an executable file, searching PATH",
            configured.display()
        );
    }

    let found = search_path
        .into_iter()
        .flat_map(env::split_paths)
        .map(|dir| dir.join(&tool.name))
        .find(|candidate| is_executable(candidate));

    match found {
        Some(path) => {
            tracing::debug!("Found {} at {}", tool.name, path.display());
            ToolProbe::Found(absolute(path))
        }
        None => {
            tracing::warn!("{} not found", tool.name);
            ToolProbe::NotFound
        }
    }
}

/// Turn a probe result into the tool path, failing when it is missing.
pub fn require_tool<'a>(tool: &ToolSpec, probe: &'a ToolProbe) -> Result<&'a Path, DocError> {
    probe.path().ok_or_else(|| DocError::ToolNotFound {
        tool: tool.name.clone(),
    })
}

/// First line of `<tool> --version`, if the tool answers.
pub async fn tool_version(path: &Path) -> Option<String> {
    let output = Command::new(path).arg("--version").output().await.ok()?;
    if !output.status.success() {
        return None;
    }

    // sphinx-build has printed its version on stderr in older releases
    let text = if output.stdout.is_empty() {
        output.stderr
    } else {
        output.stdout
    };

    String::from_utf8_lossy(&text)
        .lines()
        .next()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
}

fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
