//! docrig.toml loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docrig_build::{BuildRecipe, DocConfig, ToolSpec, DEFAULT_EXCLUDES};
use serde::Deserialize;

/// Configuration file structure (docrig.toml).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    project: ProjectConfig,
    #[serde(default)]
    paths: PathsConfig,
    #[serde(default)]
    tool: ToolConfig,
    #[serde(default)]
    setup: SetupConfig,
    #[serde(default)]
    build: BuildSettings,
    #[serde(default)]
    install: InstallSettings,
}

#[derive(Debug, Deserialize)]
struct ProjectConfig {
    #[serde(default = "default_project")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct PathsConfig {
    #[serde(default = "default_source")]
    source: PathBuf,
    #[serde(default = "default_build_dir")]
    build_dir: PathBuf,
    #[serde(default = "default_prefix")]
    install_prefix: PathBuf,
    #[serde(default = "default_bin_dir")]
    bin_dir: PathBuf,
    #[serde(default = "default_doc_root")]
    doc_install_root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ToolConfig {
    #[serde(default = "default_tool")]
    name: String,
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
struct SetupConfig {
    script: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum RecipeKind {
    #[default]
    Direct,
    Make,
}

#[derive(Debug, Deserialize)]
struct BuildSettings {
    #[serde(default)]
    recipe: RecipeKind,
    #[serde(default = "default_builder")]
    builder: String,
    #[serde(default = "default_make_program")]
    make_program: String,
    #[serde(default = "default_make_output")]
    make_output: PathBuf,
}

#[derive(Debug, Deserialize)]
struct InstallSettings {
    #[serde(default = "default_excludes")]
    exclude: Vec<String>,
}

fn default_project() -> String {
    "project".to_string()
}
fn default_source() -> PathBuf {
    PathBuf::from("docs")
}
fn default_build_dir() -> PathBuf {
    PathBuf::from("build/docs")
}
fn default_prefix() -> PathBuf {
    PathBuf::from("/usr/local")
}
fn default_bin_dir() -> PathBuf {
    PathBuf::from("bin")
}
fn default_doc_root() -> PathBuf {
    PathBuf::from("share/doc")
}
fn default_tool() -> String {
    "sphinx-build".to_string()
}
fn default_builder() -> String {
    "html".to_string()
}
fn default_make_program() -> String {
    "make".to_string()
}
fn default_make_output() -> PathBuf {
    PathBuf::from("build/html")
}
fn default_excludes() -> Vec<String> {
    DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            build_dir: default_build_dir(),
            install_prefix: default_prefix(),
            bin_dir: default_bin_dir(),
            doc_install_root: default_doc_root(),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            name: default_tool(),
            path: None,
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            recipe: RecipeKind::Direct,
            builder: default_builder(),
            make_program: default_make_program(),
            make_output: default_make_output(),
        }
    }
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self {
            exclude: default_excludes(),
        }
    }
}

impl ConfigFile {
    /// Parse configuration text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse docrig.toml")
    }

    /// Convert into the library configuration.
    pub fn into_doc_config(self) -> DocConfig {
        let recipe = match self.build.recipe {
            RecipeKind::Direct => BuildRecipe::Direct,
            RecipeKind::Make => BuildRecipe::Make {
                program: self.build.make_program,
                output: self.build.make_output,
            },
        };

        DocConfig {
            project: self.project.name,
            source_dir: self.paths.source,
            build_dir: self.paths.build_dir,
            install_prefix: self.paths.install_prefix,
            bin_dir: self.paths.bin_dir,
            doc_install_root: self.paths.doc_install_root,
            setup_script: self.setup.script,
            tool: ToolSpec {
                name: self.tool.name,
                path: self.tool.path,
            },
            recipe,
            builder: self.build.builder,
            exclude: self.install.exclude,
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<DocConfig> {
    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(ConfigFile::default().into_doc_config());
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config = ConfigFile::parse(&content)
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config.into_doc_config())
}
