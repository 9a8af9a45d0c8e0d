//! Initialize docrig in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing docrig...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    if !Path::new("docs").exists() {
        tracing::warn!("No docs/ directory found. Point paths.source at your Sphinx sources.");
    }

    tracing::info!("Run 'docrig check' to verify sphinx-build is available.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# docrig configuration

[project]
# Install subdirectory under the documentation root
name = "project"

[paths]
# Sphinx source directory (contains conf.py)
source = "docs"

# Staged sources and generated output
build_dir = "build/docs"

# Installation prefix and layout
install_prefix = "/usr/local"
bin_dir = "bin"
doc_install_root = "share/doc"

[tool]
name = "sphinx-build"
# path = "/opt/sphinx/bin/sphinx-build"

[setup]
# Variables exported to the build; defaults to <install_prefix>/<bin_dir>/<name>_vars.sh
# script = "env/project_vars.sh"

[build]
# "direct" runs sphinx-build; "make" runs the Makefile shipped with the sources
recipe = "direct"
builder = "html"
make_program = "make"
make_output = "build/html"

[install]
exclude = ["*.pyc", "*.pyo", "__pycache__", ".git", ".svn", ".hg", ".gitignore", "CVS", "CMakeLists.txt", "docrig.toml"]
"#;
