//! Staging documentation sources into the build directory.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::DocError;

/// Version-control metadata never copied into the staged tree.
const VCS_DIRS: &[&str] = &[".git", ".svn", ".hg", "CVS"];

/// Copy `source` into a fresh `target`, returning the number of files copied.
///
/// Any previous `target` is removed first, unless `source` lives inside it.
/// `build_dir` is skipped when it sits inside `source`, so an in-tree build
/// directory is not copied into itself.
pub fn stage_source(source: &Path, target: &Path, build_dir: &Path) -> Result<usize, DocError> {
    if !source.is_dir() {
        return Err(DocError::SourceNotFound(source.display().to_string()));
    }

    ensure_outside_source(source, target)?;
    if target.exists() {
        fs::remove_dir_all(target).map_err(|e| DocError::write(target, e))?;
    }
    fs::create_dir_all(target).map_err(|e| DocError::write(target, e))?;

    let source = fs::canonicalize(source).map_err(|e| DocError::read(source, e))?;
    // Neither the build dir nor the fresh target may be copied into itself.
    let skip_dirs: Vec<_> = [build_dir, target]
        .into_iter()
        .filter_map(|dir| fs::canonicalize(dir).ok())
        .collect();

    let mut files = 0;
    let walker = WalkDir::new(&source)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry.path(), entry.file_name(), &skip_dirs));

    for entry in walker {
        let entry = entry.map_err(|e| DocError::read(&source, e))?;
        let relative = entry.path().strip_prefix(&source).unwrap_or(entry.path());
        let dest = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(|e| DocError::write(&dest, e))?;
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).map_err(|e| DocError::write(parent, e))?;
            }
            fs::copy(entry.path(), &dest).map_err(|e| DocError::write(&dest, e))?;
            files += 1;
        }
    }

    tracing::debug!("Staged {} files into {}", files, target.display());

    Ok(files)
}

/// Fail when `dir` is `source` or one of its ancestors.
///
/// Anything about to be deleted during a build goes through this first.
pub(crate) fn ensure_outside_source(source: &Path, dir: &Path) -> Result<(), DocError> {
    let (Ok(source), Ok(dir)) = (fs::canonicalize(source), fs::canonicalize(dir)) else {
        return Ok(());
    };

    if source.starts_with(&dir) {
        return Err(DocError::SourceInBuild {
            path: dir.display().to_string(),
            source_dir: source.display().to_string(),
        });
    }
    Ok(())
}

fn is_skipped(path: &Path, name: &OsStr, skip_dirs: &[PathBuf]) -> bool {
    if skip_dirs.iter().any(|dir| path == dir) {
        return true;
    }
    name.to_str().is_some_and(|n| VCS_DIRS.contains(&n))
}
