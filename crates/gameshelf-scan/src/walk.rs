//! Deep and shallow traversal strategies.

use std::fs;
use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};

use gameshelf_core::{
    Classifier, GameEntry, ScanError, ScanWarning, WarningKind, is_likely_game_directory,
    resolve_name,
};

use crate::roots::{ScanRoot, TraversalMode};

/// Candidates and warnings collected from one root.
#[derive(Debug, Default)]
pub struct RootScan {
    /// Candidates in traversal order.
    pub candidates: Vec<GameEntry>,
    /// Directories that were skipped.
    pub warnings: Vec<ScanWarning>,
}

/// Read-only walker applying the classifier to a single root.
pub struct Traversal<'a> {
    classifier: &'a Classifier,
    max_depth: usize,
}

impl<'a> Traversal<'a> {
    /// Create a traversal; `max_depth` bounds deep scans.
    pub fn new(classifier: &'a Classifier, max_depth: usize) -> Self {
        Self {
            classifier,
            max_depth,
        }
    }

    /// Scan a root using its traversal hint.
    pub fn run(&self, root: &ScanRoot) -> Result<RootScan, ScanError> {
        match root.mode {
            TraversalMode::Deep => self.deep(&root.path),
            TraversalMode::Shallow => self.shallow(&root.path),
        }
    }

    /// Recursive walk, emitting every qualifying file.
    ///
    /// Files are examined in directories at most `max_depth` levels below
    /// `root`; deeper subtrees are not listed at all. A directory that cannot
    /// be listed is recorded as a warning and its subtree skipped; an
    /// unreadable `root` is an error.
    pub fn deep(&self, root: &Path) -> Result<RootScan, ScanError> {
        ensure_dir(root)?;
        // The root entry itself is below min_depth, so probe it here
        fs::read_dir(root).map_err(|e| ScanError::io(root, e))?;

        let walker = WalkDir::new(root)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(false)
            .follow_links(false)
            .min_depth(1)
            // A file's depth is its directory's depth plus one.
            .max_depth(self.max_depth + 1);

        let mut scan = RootScan::default();
        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    tracing::debug!(path = %path.display(), error = %err, "skipping subtree");
                    scan.warnings.push(walk_warning(path, &err));
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                // jwalk keeps listing failures on the directory entry itself
                if let Some(err) = &entry.read_children_error {
                    let path = entry.path();
                    tracing::debug!(path = %path.display(), error = %err, "skipping subtree");
                    scan.warnings.push(walk_warning(path, err));
                }
                continue;
            }

            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy();
            let dir = path.parent().unwrap_or(root);
            if self.classifier.accepts(&file_name, dir) {
                scan.candidates
                    .push(GameEntry::new(resolve_name(dir, &file_name), path.clone()));
            }
        }

        Ok(scan)
    }

    /// Single-level scan yielding at most one candidate per child directory.
    pub fn shallow(&self, root: &Path) -> Result<RootScan, ScanError> {
        ensure_dir(root)?;
        let children = list_dir(root).map_err(|e| ScanError::io(root, e))?;

        let mut scan = RootScan::default();
        for (name, child) in children {
            if !child.is_dir() || !is_likely_game_directory(&name) {
                continue;
            }

            let files = match list_dir(&child) {
                Ok(files) => files,
                Err(err) => {
                    tracing::debug!(path = %child.display(), error = %err, "skipping child");
                    scan.warnings.push(ScanWarning::read_error(&child, &err));
                    continue;
                }
            };

            let first = files
                .into_iter()
                .filter(|(_, path)| !path.is_dir())
                .find(|(file_name, _)| self.classifier.accepts(file_name, &child));
            if let Some((file_name, path)) = first {
                scan.candidates
                    .push(GameEntry::new(resolve_name(&child, &file_name), path));
            }
        }

        Ok(scan)
    }

    /// Find the first qualifying executable directly inside `dir`.
    pub fn first_executable(&self, dir: &Path) -> Option<PathBuf> {
        list_dir(dir)
            .ok()?
            .into_iter()
            .filter(|(_, path)| !path.is_dir())
            .find(|(file_name, _)| self.classifier.accepts(file_name, dir))
            .map(|(_, path)| path)
    }
}

fn ensure_dir(path: &Path) -> Result<(), ScanError> {
    let metadata = fs::metadata(path).map_err(|e| ScanError::io(path, e))?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn walk_warning(path: PathBuf, err: &jwalk::Error) -> ScanWarning {
    match err.io_error() {
        Some(io) => ScanWarning::read_error(path, io),
        None => ScanWarning::new(path, err.to_string(), WarningKind::ReadError),
    }
}

/// List a directory's children as (name, path), sorted by name.
fn list_dir(dir: &Path) -> std::io::Result<Vec<(String, PathBuf)>> {
    let mut children: Vec<(String, PathBuf)> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|e| (e.file_name().to_string_lossy().into_owned(), e.path()))
        .collect();
    children.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(children)
}
