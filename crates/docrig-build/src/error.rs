//! Errors for documentation steps.

use docrig_env::SetupError;

/// Errors that can occur while probing, building, cleaning or installing.
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("Documentation tool '{tool}' not found. Install it or set tool.path in docrig.toml")]
    ToolNotFound { tool: String },

    #[error("Documentation source directory not found: {0}")]
    SourceNotFound(String),

    #[error("Setup script not found: {0}")]
    SetupScriptMissing(String),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("Failed to run {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("{program} failed with {status}")]
    ToolFailed { program: String, status: String },

    #[error("Build produced no output in {0}")]
    EmptyOutput(String),

    #[error("Refusing to clean {build_dir}: it contains the documentation source {source_dir}")]
    UnsafeClean {
        build_dir: String,
        source_dir: String,
    },

    #[error("Refusing to replace {path}: it contains the documentation source {source_dir}")]
    SourceInBuild { path: String, source_dir: String },

    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
}

impl DocError {
    pub(crate) fn read(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn write(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Write {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
