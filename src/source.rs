//! Input discovery and document loading
//!
//! Directories are scanned with the `ignore` crate so `.gitignore` rules
//! apply; documents are read and parsed in parallel with rayon.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use ignore::WalkBuilder;
use rayon::prelude::*;
use tracing::debug;

use crate::ast::{Ast, NodeId};
use crate::error::{Error, Result};

/// Configuration for finding and loading input documents.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Include files hidden or excluded by ignore files.
    pub show_all: bool,
    /// File or directory names to skip (glob syntax).
    pub ignore_patterns: Vec<String>,
    /// Extensions considered when scanning directories.
    pub extensions: Vec<String>,
    /// Number of parallel workers for parsing.
    /// 0 = auto-detect (use all available cores)
    /// 1 = sequential (no parallelism)
    /// N = use N worker threads
    pub parallel_workers: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            show_all: false,
            ignore_patterns: Vec::new(),
            extensions: vec!["json".to_string()],
            parallel_workers: 0,
        }
    }
}

/// A parsed input document.
#[derive(Debug)]
pub struct Document {
    pub path: PathBuf,
    /// Size of the source file, used to weight progress.
    pub bytes: u64,
    pub ast: Ast,
    pub root: NodeId,
}

pub fn compile_ignore_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| Error::Pattern {
                pattern: p.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}

fn is_ignored(name: &OsStr, patterns: &[Pattern]) -> bool {
    let name = name.to_string_lossy();
    patterns.iter().any(|p| p.as_str() == name || p.matches(&name))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.iter().any(|e| *e == ext))
}

/// Expand `paths` into the list of documents to load.
///
/// Files named explicitly are always included; directories contribute
/// files with a configured extension, sorted by name. A path that does
/// not exist is an error.
pub fn discover(paths: &[PathBuf], config: &SourceConfig) -> Result<Vec<PathBuf>> {
    let patterns = compile_ignore_patterns(&config.ignore_patterns)?;
    let mut found = Vec::new();

    for path in paths {
        if path.is_file() {
            found.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            return Err(Error::Io {
                path: path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "No such file or directory",
                ),
            });
        }

        let filter_patterns = patterns.clone();
        let walker = WalkBuilder::new(path)
            .hidden(!config.show_all)
            .ignore(!config.show_all)
            .git_ignore(!config.show_all)
            .git_global(!config.show_all)
            .git_exclude(!config.show_all)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| !is_ignored(entry.file_name(), &filter_patterns))
            .build();

        for entry in walker.flatten() {
            let entry_path = entry.path();
            if entry_path.is_file() && has_extension(entry_path, &config.extensions) {
                found.push(entry_path.to_path_buf());
            }
        }
    }

    debug!(count = found.len(), "discovered input documents");
    Ok(found)
}

/// Read and parse one document.
pub fn load_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| Error::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    let (ast, root) = Ast::from_value(&value).map_err(|e| e.with_path(path))?;

    Ok(Document {
        path: path.to_path_buf(),
        bytes: text.len() as u64,
        ast,
        root,
    })
}

/// Load every path, keeping input order. Failures are returned in place
/// rather than aborting the batch.
pub fn load_all(paths: &[PathBuf], parallel_workers: usize) -> Vec<Result<Document>> {
    let load = |path: &PathBuf| load_document(path);

    match parallel_workers {
        1 => paths.iter().map(load).collect(),
        // Auto-detect: use rayon's default thread pool
        0 => paths.par_iter().map(load).collect(),
        workers => match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool.install(|| paths.par_iter().map(load).collect()),
            Err(e) => {
                // Fall back to rayon's global pool if custom pool creation fails
                debug!(error = %e, "custom thread pool unavailable");
                paths.par_iter().map(load).collect()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{SAMPLE_PROGRAM, TestDir};

    #[test]
    fn test_discover_scans_directories_for_json() {
        let dir = TestDir::new();
        dir.add_file("b.json", SAMPLE_PROGRAM);
        dir.add_file("a.json", SAMPLE_PROGRAM);
        dir.add_file("notes.txt", "not a document");
        dir.add_file("nested/c.json", SAMPLE_PROGRAM);

        let found = discover(&[dir.path().to_path_buf()], &SourceConfig::default()).unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json", "nested/c.json"]);
    }

    #[test]
    fn test_discover_honors_ignore_patterns() {
        let dir = TestDir::new();
        dir.add_file("keep.json", SAMPLE_PROGRAM);
        dir.add_file("skip.min.json", SAMPLE_PROGRAM);
        dir.add_file("fixtures/inner.json", SAMPLE_PROGRAM);

        let config = SourceConfig {
            ignore_patterns: vec!["*.min.json".to_string(), "fixtures".to_string()],
            ..Default::default()
        };
        let found = discover(&[dir.path().to_path_buf()], &config).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("keep.json"));
    }

    #[test]
    fn test_discover_respects_gitignore_unless_all() {
        let dir = TestDir::new();
        dir.add_file(".gitignore", "generated/\n");
        dir.add_file("src.json", SAMPLE_PROGRAM);
        dir.add_file("generated/out.json", SAMPLE_PROGRAM);

        let found = discover(&[dir.path().to_path_buf()], &SourceConfig::default()).unwrap();
        assert_eq!(found.len(), 1);

        let config = SourceConfig {
            show_all: true,
            ..Default::default()
        };
        let found = discover(&[dir.path().to_path_buf()], &config).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_discover_missing_path_is_error() {
        let dir = TestDir::new();
        let err = discover(&[dir.path().join("missing")], &SourceConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_bad_glob_is_reported() {
        let err = compile_ignore_patterns(&["[".to_string()]).unwrap_err();
        assert!(matches!(err, Error::Pattern { .. }));
    }

    #[test]
    fn test_load_all_keeps_order_and_failures() {
        let dir = TestDir::new();
        let good = dir.add_file("good.json", SAMPLE_PROGRAM);
        let broken = dir.add_file("broken.json", "{ not json");
        let wrong = dir.add_file("wrong.json", "[1, 2, 3]");

        for workers in [0, 1, 2] {
            let results = load_all(&[good.clone(), broken.clone(), wrong.clone()], workers);
            assert_eq!(results.len(), 3);
            let doc = results[0].as_ref().unwrap();
            assert_eq!(doc.ast.len(), 14);
            assert_eq!(doc.bytes, SAMPLE_PROGRAM.len() as u64);
            assert!(matches!(results[1], Err(Error::Json { .. })));
            match &results[2] {
                Err(Error::InvalidAst { message }) => assert!(message.contains("wrong.json")),
                other => panic!("unexpected {:?}", other.as_ref().map(|d| &d.path)),
            }
        }
    }
}
