//! File-name exclusion patterns.

use std::ffi::OsStr;

use regex::RegexSet;

use crate::error::DocError;

/// A compiled set of shell-style file-name globs (`*` and `?`).
#[derive(Debug, Clone)]
pub struct ExcludeSet {
    set: RegexSet,
}

impl ExcludeSet {
    /// Compile `patterns`. Each one matches a whole file name.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, DocError> {
        let translated: Vec<String> = patterns
            .iter()
            .map(|p| glob_to_regex(p.as_ref()))
            .collect();

        let set = RegexSet::new(&translated).map_err(|e| DocError::InvalidPattern {
            pattern: patterns
                .iter()
                .map(|p| p.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
            message: e.to_string(),
        })?;

        Ok(Self { set })
    }

    /// Whether a file name matches any pattern.
    pub fn matches(&self, name: &OsStr) -> bool {
        self.set.is_match(&name.to_string_lossy())
    }
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::from("^");
    for c in glob.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            c => out.push_str(&regex::escape(&c.to_string())),
        }
    }
    out.push('$');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXCLUDES;

    fn matches(set: &ExcludeSet, name: &str) -> bool {
        set.matches(OsStr::new(name))
    }

    #[test]
    fn default_set_covers_caches_vcs_and_build_files() {
        let set = ExcludeSet::new(DEFAULT_EXCLUDES).unwrap();

        assert!(matches(&set, "conf.cpython-311.pyc"));
        assert!(matches(&set, "__pycache__"));
        assert!(matches(&set, ".git"));
        assert!(matches(&set, ".svn"));
        assert!(matches(&set, "CMakeLists.txt"));

        assert!(!matches(&set, "index.html"));
        assert!(!matches(&set, "searchindex.js"));
        assert!(!matches(&set, "pyc.html"));
    }

    #[test]
    fn question_mark_matches_one_char() {
        let set = ExcludeSet::new(&["page?.html"]).unwrap();

        assert!(matches(&set, "page1.html"));
        assert!(!matches(&set, "page10.html"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let set = ExcludeSet::new(&["a+b.(txt)"]).unwrap();

        assert!(matches(&set, "a+b.(txt)"));
        assert!(!matches(&set, "aab.txt"));
    }

    #[test]
    fn empty_set_matches_nothing() {
        let set = ExcludeSet::new::<&str>(&[]).unwrap();
        assert!(!matches(&set, "anything"));
    }
}
