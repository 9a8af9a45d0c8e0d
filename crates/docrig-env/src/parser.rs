//! Setup-script loading.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::env::SetupEnv;

/// `export NAME ...` without a value marks names for export and assigns nothing.
static BARE_EXPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*export(?:\s+[A-Za-z_][A-Za-z0-9_]*)+\s*$").expect("valid regex")
});

/// Errors that can occur when reading a setup script.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Failed to read setup script {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid setup script {path}: {message}")]
    Parse { path: String, message: String },
}

/// Parse setup-script source into a variable set.
///
/// Assignments may carry an `export` prefix and use single quotes (literal)
/// or double quotes (with `$NAME` / `${NAME}` expansion). References resolve
/// against the process environment first, then earlier assignments in the
/// script. Anything that is not an assignment, such as control flow or
/// commands, is an error. `origin` names the script in error messages.
pub fn parse_setup(source: &str, origin: &str) -> Result<SetupEnv, SetupError> {
    // Blank out bare exports so line numbers in errors stay accurate.
    let filtered: String = source
        .lines()
        .map(|line| if BARE_EXPORT.is_match(line) { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n");

    let mut env = SetupEnv::new();
    for item in dotenvy::from_read_iter(filtered.as_bytes()) {
        let (name, value) = item.map_err(|e| SetupError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        env.set(name, value);
    }

    Ok(env)
}

/// Read and parse a setup script from disk.
pub fn load_setup_file(path: &Path) -> Result<SetupEnv, SetupError> {
    let source = fs::read_to_string(path).map_err(|e| SetupError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    parse_setup(&source, &path.display().to_string())
}
