//! Build configuration.

use std::path::{Component, Path, PathBuf};

/// Install exclusions applied when no list is configured.
///
/// Bytecode caches, version-control metadata and build-configuration files.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "*.pyc",
    "*.pyo",
    "__pycache__",
    ".git",
    ".svn",
    ".hg",
    ".gitignore",
    "CVS",
    "CMakeLists.txt",
    "docrig.toml",
];

/// The documentation tool to look for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    /// Executable name searched on PATH
    pub name: String,

    /// Pre-configured executable path, tried before PATH
    pub path: Option<PathBuf>,
}

impl Default for ToolSpec {
    fn default() -> Self {
        Self {
            name: "sphinx-build".to_string(),
            path: None,
        }
    }
}

/// How the documentation tool is invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BuildRecipe {
    /// `<tool> -b <builder> <source> <build_dir>/<builder>`
    #[default]
    Direct,

    /// `<program> SPHINX_EXECUTABLE=<tool> <builder>` inside the staged source,
    /// for sources that ship their own Makefile.
    Make {
        program: String,

        /// Where the Makefile writes HTML, relative to the staged source
        output: PathBuf,
    },
}

/// Configuration for every documentation step.
#[derive(Debug, Clone)]
pub struct DocConfig {
    /// Project name, used as the install subdirectory
    pub project: String,

    /// Documentation source directory
    pub source_dir: PathBuf,

    /// Scratch directory for staged sources and output
    pub build_dir: PathBuf,

    /// Installation prefix
    pub install_prefix: PathBuf,

    /// Binary directory under the prefix, where the setup script lives
    pub bin_dir: PathBuf,

    /// Documentation root, relative to the prefix unless absolute
    pub doc_install_root: PathBuf,

    /// Explicit setup script; must exist when set
    pub setup_script: Option<PathBuf>,

    pub tool: ToolSpec,

    pub recipe: BuildRecipe,

    /// Sphinx builder name
    pub builder: String,

    /// File-name globs never installed
    pub exclude: Vec<String>,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            project: "project".to_string(),
            source_dir: PathBuf::from("docs"),
            build_dir: PathBuf::from("build/docs"),
            install_prefix: PathBuf::from("/usr/local"),
            bin_dir: PathBuf::from("bin"),
            doc_install_root: PathBuf::from("share/doc"),
            setup_script: None,
            tool: ToolSpec::default(),
            recipe: BuildRecipe::Direct,
            builder: "html".to_string(),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DocConfig {
    /// Where sources are copied before the tool runs.
    pub fn staged_source_dir(&self) -> PathBuf {
        self.build_dir.join("source")
    }

    /// Where the tool leaves its HTML.
    pub fn output_dir(&self) -> PathBuf {
        match &self.recipe {
            BuildRecipe::Direct => self.build_dir.join(&self.builder),
            BuildRecipe::Make { output, .. } => self.staged_source_dir().join(output),
        }
    }

    /// `<prefix>/<bin_dir>/<project>_vars.sh`, sourced when present.
    pub fn default_setup_script(&self) -> PathBuf {
        self.install_prefix
            .join(&self.bin_dir)
            .join(format!("{}_vars.sh", self.project))
    }

    /// Final install directory, optionally re-rooted under `destdir`.
    pub fn install_destination(&self, destdir: Option<&Path>) -> PathBuf {
        let root = if self.doc_install_root.is_absolute() {
            self.doc_install_root.clone()
        } else {
            self.install_prefix.join(&self.doc_install_root)
        };

        let root = match destdir {
            Some(destdir) => destdir.join(relative_components(&root)),
            None => root,
        };

        root.join(&self.project)
    }
}

/// Drop root and prefix components so `path` can be joined under another root.
fn relative_components(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect()
}
