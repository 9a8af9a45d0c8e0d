//! Documentation build orchestration.
//!
//! Probes for an external documentation generator, stages documentation
//! sources, runs the generator to produce HTML, and cleans or installs the
//! result. Each step is a plain function over a [`DocConfig`], so callers
//! decide which steps run and in what order.

pub mod builder;
pub mod clean;
pub mod config;
pub mod error;
pub mod exclude;
pub mod install;
pub mod probe;
pub mod stage;

pub use builder::{BuildReport, DocBuilder};
pub use clean::{clean, CleanReport};
pub use config::{BuildRecipe, DocConfig, ToolSpec, DEFAULT_EXCLUDES};
pub use error::DocError;
pub use exclude::ExcludeSet;
pub use install::{install, InstallReport};
pub use probe::{probe, probe_in, require_tool, tool_version, ToolProbe};
