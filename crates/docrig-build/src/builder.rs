//! Documentation build step.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tokio::process::Command;
use walkdir::WalkDir;

use docrig_env::{load_setup_file, SetupEnv};

use crate::config::{BuildRecipe, DocConfig};
use crate::error::DocError;
use crate::probe::{require_tool, ToolProbe};
use crate::stage::{ensure_outside_source, stage_source};

/// Variable through which the tool path reaches the documentation recipe.
pub const TOOL_VARIABLE: &str = "SPHINX_EXECUTABLE";

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildReport {
    /// Directory holding the generated HTML
    pub output_dir: PathBuf,

    /// Number of files in the output tree
    pub files: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,
}

/// Runs the documentation tool over a staged copy of the sources.
pub struct DocBuilder {
    config: DocConfig,
}

impl DocBuilder {
    pub fn new(config: DocConfig) -> Self {
        Self { config }
    }

    /// Build the documentation.
    ///
    /// `probe` must come from a tool lookup done by the caller. A missing tool
    /// fails here before anything is staged or spawned.
    pub async fn build(&self, probe: &ToolProbe) -> Result<BuildReport, DocError> {
        let start = Instant::now();

        let tool = require_tool(&self.config.tool, probe)?;
        let setup = self.load_setup_env()?;

        fs::create_dir_all(&self.config.build_dir)
            .map_err(|e| DocError::write(&self.config.build_dir, e))?;
        let build_dir = fs::canonicalize(&self.config.build_dir)
            .map_err(|e| DocError::read(&self.config.build_dir, e))?;

        // Absolute paths, since the tool runs inside the staged tree.
        let config = DocConfig {
            build_dir,
            ..self.config.clone()
        };
        let staged = config.staged_source_dir();
        let output_dir = config.output_dir();
        ensure_outside_source(&config.source_dir, &output_dir)?;

        let staged_files = stage_source(&config.source_dir, &staged, &config.build_dir)?;
        tracing::info!(
            "Staged {} source files from {}",
            staged_files,
            config.source_dir.display()
        );

        // Only fresh output counts towards the result.
        if output_dir.exists() {
            fs::remove_dir_all(&output_dir).map_err(|e| DocError::write(&output_dir, e))?;
        }

        let (program, args) = self.invocation(&config, tool, &staged, &output_dir)?;
        tracing::info!("Running {} {}", program, args.join(" "));

        let mut command = Command::new(&program);
        command.args(&args).current_dir(&staged);
        if let Some(setup) = setup {
            command.envs(setup);
        }
        command.env(TOOL_VARIABLE, tool);

        let status = command.status().await.map_err(|e| DocError::Spawn {
            program: program.clone(),
            message: e.to_string(),
        })?;

        if !status.success() {
            return Err(DocError::ToolFailed {
                program,
                status: status.to_string(),
            });
        }

        let files = count_files(&output_dir);
        if files == 0 {
            return Err(DocError::EmptyOutput(output_dir.display().to_string()));
        }

        Ok(BuildReport {
            output_dir,
            files,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Load the setup script, if one applies.
    ///
    /// A configured script must exist; the default one under the install
    /// prefix is used only when present.
    pub fn load_setup_env(&self) -> Result<Option<SetupEnv>, DocError> {
        let path = match &self.config.setup_script {
            Some(path) if path.is_file() => path.clone(),
            Some(path) => return Err(DocError::SetupScriptMissing(path.display().to_string())),
            None => {
                let default = self.config.default_setup_script();
                if !default.is_file() {
                    tracing::debug!("No setup script at {}", default.display());
                    return Ok(None);
                }
                default
            }
        };

        let env = load_setup_file(&path)?;
        tracing::info!("Loaded {} variables from {}", env.len(), path.display());

        Ok(Some(env))
    }

    /// Program and arguments for the configured recipe.
    ///
    /// A make program given as a path is resolved against the current
    /// directory, since it runs from inside the staged tree.
    fn invocation(
        &self,
        config: &DocConfig,
        tool: &Path,
        staged: &Path,
        output_dir: &Path,
    ) -> Result<(String, Vec<String>), DocError> {
        let invocation = match &config.recipe {
            BuildRecipe::Direct => (
                tool.display().to_string(),
                vec![
                    "-b".to_string(),
                    config.builder.clone(),
                    "-d".to_string(),
                    config.build_dir.join("doctrees").display().to_string(),
                    staged.display().to_string(),
                    output_dir.display().to_string(),
                ],
            ),
            BuildRecipe::Make { program, .. } => {
                let program = if program.contains(std::path::MAIN_SEPARATOR) {
                    std::path::absolute(program)
                        .map_err(|e| DocError::Spawn {
                            program: program.clone(),
                            message: e.to_string(),
                        })?
                        .display()
                        .to_string()
                } else {
                    program.clone()
                };
                (
                    program,
                    vec![
                        format!("{}={}", TOOL_VARIABLE, tool.display()),
                        config.builder.clone(),
                    ],
                )
            }
        };

        Ok(invocation)
    }
}

fn count_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::os::unix::fs::PermissionsExt;

    use pretty_assertions::assert_eq;
    use tempfile::{tempdir, TempDir};

    use crate::clean::clean;
    use crate::config::ToolSpec;

    /// Stand-in for sphinx-build: one HTML page per .rst file, plus the
    /// environment it saw.
    const FAKE_SPHINX: &str = r#"#!/bin/sh
set -e
src="$5"
out="$6"
mkdir -p "$out"
for f in "$src"/*.rst; do
  name=$(basename "$f" .rst)
  echo "<html>$name</html>" > "$out/$name.html"
done
echo "${SPHINX_EXECUTABLE}|${DOC_VERSION}" > "$out/env.txt"
"#;

    struct Fixture {
        temp: TempDir,
        tool: PathBuf,
    }

    impl Fixture {
        fn new(script: &str) -> Self {
            let temp = tempdir().unwrap();
            let docs = temp.path().join("docs");
            fs::create_dir_all(&docs).unwrap();
            fs::write(docs.join("conf.py"), "project = 'demo'\n").unwrap();
            fs::write(docs.join("index.rst"), "Demo\n====\n").unwrap();
            fs::write(docs.join("usage.rst"), "Usage\n=====\n").unwrap();

            let bin = temp.path().join("bin");
            fs::create_dir_all(&bin).unwrap();
            let tool = bin.join("sphinx-build");
            fs::write(&tool, script).unwrap();
            fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

            Self { temp, tool }
        }

        fn config(&self) -> DocConfig {
            DocConfig {
                project: "demo".to_string(),
                source_dir: self.temp.path().join("docs"),
                build_dir: self.temp.path().join("build"),
                install_prefix: self.temp.path().join("prefix"),
                tool: ToolSpec {
                    path: Some(self.tool.clone()),
                    ..Default::default()
                },
                ..Default::default()
            }
        }
    }

    fn file_set(dir: &Path) -> BTreeSet<PathBuf> {
        WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().strip_prefix(dir).unwrap().to_path_buf())
            .collect()
    }

    #[tokio::test]
    async fn builds_html_tree() {
        let fixture = Fixture::new(FAKE_SPHINX);
        let builder = DocBuilder::new(fixture.config());

        let report = builder
            .build(&ToolProbe::Found(fixture.tool.clone()))
            .await
            .unwrap();

        assert_eq!(report.files, 3);
        assert!(report.output_dir.join("index.html").exists());
        assert!(report.output_dir.join("usage.html").exists());
        assert!(report.output_dir.ends_with("build/html"));
    }

    #[tokio::test]
    async fn missing_tool_stops_before_staging() {
        let fixture = Fixture::new(FAKE_SPHINX);
        let config = fixture.config();
        let build_dir = config.build_dir.clone();

        let err = DocBuilder::new(config)
            .build(&ToolProbe::NotFound)
            .await
            .unwrap_err();

        assert!(matches!(err, DocError::ToolNotFound { .. }));
        assert!(!build_dir.exists());
    }

    #[tokio::test]
    async fn passes_tool_path_and_setup_vars() {
        let fixture = Fixture::new(FAKE_SPHINX);
        let script = fixture.temp.path().join("vars.sh");
        fs::write(&script, "export DOC_VERSION=2.1.0\n").unwrap();

        let builder = DocBuilder::new(DocConfig {
            setup_script: Some(script),
            ..fixture.config()
        });
        let report = builder
            .build(&ToolProbe::Found(fixture.tool.clone()))
            .await
            .unwrap();

        let seen = fs::read_to_string(report.output_dir.join("env.txt")).unwrap();
        assert_eq!(seen.trim(), format!("{}|2.1.0", fixture.tool.display()));
    }

    #[tokio::test]
    async fn default_setup_script_under_prefix_is_sourced() {
        let fixture = Fixture::new(FAKE_SPHINX);
        let config = fixture.config();
        let script = config.default_setup_script();
        fs::create_dir_all(script.parent().unwrap()).unwrap();
        fs::write(&script, "DOC_VERSION=0.9\n").unwrap();

        let report = DocBuilder::new(config)
            .build(&ToolProbe::Found(fixture.tool.clone()))
            .await
            .unwrap();

        let seen = fs::read_to_string(report.output_dir.join("env.txt")).unwrap();
        assert!(seen.trim().ends_with("|0.9"));
    }

    #[tokio::test]
    async fn configured_setup_script_must_exist() {
        let fixture = Fixture::new(FAKE_SPHINX);
        let builder = DocBuilder::new(DocConfig {
            setup_script: Some(fixture.temp.path().join("missing.sh")),
            ..fixture.config()
        });

        let err = builder
            .build(&ToolProbe::Found(fixture.tool.clone()))
            .await
            .unwrap_err();

        assert!(matches!(err, DocError::SetupScriptMissing(_)));
    }

    #[tokio::test]
    async fn tool_failure_propagates() {
        let fixture = Fixture::new("#!/bin/sh\necho broken >&2\nexit 2\n");

        let err = DocBuilder::new(fixture.config())
            .build(&ToolProbe::Found(fixture.tool.clone()))
            .await
            .unwrap_err();

        assert!(matches!(err, DocError::ToolFailed { .. }));
    }

    #[tokio::test]
    async fn silent_tool_is_empty_output() {
        let fixture = Fixture::new("#!/bin/sh\nexit 0\n");

        let err = DocBuilder::new(fixture.config())
            .build(&ToolProbe::Found(fixture.tool.clone()))
            .await
            .unwrap_err();

        assert!(matches!(err, DocError::EmptyOutput(_)));
    }

    #[tokio::test]
    async fn stale_output_does_not_hide_silent_tool() {
        let fixture = Fixture::new(FAKE_SPHINX);
        let config = fixture.config();
        DocBuilder::new(config.clone())
            .build(&ToolProbe::Found(fixture.tool.clone()))
            .await
            .unwrap();

        let silent = fixture.temp.path().join("bin/silent-build");
        fs::write(&silent, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&silent, fs::Permissions::from_mode(0o755)).unwrap();

        let err = DocBuilder::new(config)
            .build(&ToolProbe::Found(silent))
            .await
            .unwrap_err();

        assert!(matches!(err, DocError::EmptyOutput(_)));
    }

    #[tokio::test]
    async fn source_inside_build_dir_is_left_alone() {
        let fixture = Fixture::new(FAKE_SPHINX);
        // Sphinx's separate source/build layout: docs/source next to docs/html.
        let docs = fixture.temp.path().join("docs");
        let source = docs.join("source");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("index.rst"), "Live\n====\n").unwrap();

        let err = DocBuilder::new(DocConfig {
            source_dir: source.clone(),
            build_dir: docs,
            ..fixture.config()
        })
        .build(&ToolProbe::Found(fixture.tool.clone()))
        .await
        .unwrap_err();

        assert!(matches!(err, DocError::SourceInBuild { .. }));
        assert_eq!(
            fs::read_to_string(source.join("index.rst")).unwrap(),
            "Live\n====\n"
        );
    }

    #[tokio::test]
    async fn source_inside_output_dir_is_left_alone() {
        let fixture = Fixture::new(FAKE_SPHINX);
        let build = fixture.temp.path().join("build");
        let source = build.join("html/src");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("index.rst"), "Live\n").unwrap();

        let err = DocBuilder::new(DocConfig {
            source_dir: source.clone(),
            ..fixture.config()
        })
        .build(&ToolProbe::Found(fixture.tool.clone()))
        .await
        .unwrap_err();

        assert!(matches!(err, DocError::SourceInBuild { .. }));
        assert!(source.join("index.rst").exists());
    }

    #[tokio::test]
    async fn rebuild_after_clean_reproduces_file_set() {
        let fixture = Fixture::new(FAKE_SPHINX);
        let config = fixture.config();
        let builder = DocBuilder::new(config.clone());
        let probe = ToolProbe::Found(fixture.tool.clone());

        let first = builder.build(&probe).await.unwrap();
        let first_files = file_set(&first.output_dir);

        let cleaned = clean(&config).unwrap();
        assert!(cleaned.removed);
        assert!(!first.output_dir.exists());

        let second = builder.build(&probe).await.unwrap();
        assert_eq!(file_set(&second.output_dir), first_files);
    }

    #[tokio::test]
    async fn make_recipe_runs_in_staged_source() {
        let fixture = Fixture::new(FAKE_SPHINX);
        let docs = fixture.temp.path().join("docs");
        // Makefile stand-in: writes into build/html and records its arguments.
        let make = fixture.temp.path().join("bin/fake-make");
        fs::write(
            &make,
            "#!/bin/sh\nmkdir -p build/html\necho \"$@\" > build/html/args.txt\n",
        )
        .unwrap();
        fs::set_permissions(&make, fs::Permissions::from_mode(0o755)).unwrap();
        fs::write(docs.join("Makefile"), "html:\n").unwrap();

        let builder = DocBuilder::new(DocConfig {
            recipe: BuildRecipe::Make {
                program: make.display().to_string(),
                output: PathBuf::from("build/html"),
            },
            ..fixture.config()
        });
        let report = builder
            .build(&ToolProbe::Found(fixture.tool.clone()))
            .await
            .unwrap();

        assert!(report.output_dir.ends_with("build/source/build/html"));
        let args = fs::read_to_string(report.output_dir.join("args.txt")).unwrap();
        assert_eq!(
            args.trim(),
            format!("SPHINX_EXECUTABLE={} html", fixture.tool.display())
        );
    }
}
