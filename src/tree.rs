//! Tree updater
//!
//! Two passes over the tree. The first finds override files and parses all
//! of them; any bad one aborts the run before a single target file is
//! touched. The second rewrites target files in place.

use chat_header::{apply_header, HeaderUpdate, TypesHeader};
use chrono::Utc;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, UpdaterConfig};
use crate::overrides::{collect_overrides, read_override, walk, OverrideError, OverrideIndex};
use crate::report::UpdateReport;

/// Errors that abort a tree update
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Override(#[from] OverrideError),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Applies per-directory `@Types` overrides to a tree of CHAT files
#[derive(Debug, Clone, Default)]
pub struct TreeUpdater {
    config: UpdaterConfig,
}

impl TreeUpdater {
    /// Create an updater; the configuration is validated here
    pub fn new(config: UpdaterConfig) -> Result<Self, UpdateError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Discover owners and parse every override under `root`.
    pub fn load_overrides(
        &self,
        root: &Path,
    ) -> Result<(OverrideIndex, BTreeMap<PathBuf, TypesHeader>), UpdateError> {
        let excludes = self.excludes()?;
        let index = collect_overrides(root, &self.config.override_file_name, &excludes)?;

        let mut headers = BTreeMap::new();
        for dir in &index.owners {
            let header = read_override(&dir.join(&self.config.override_file_name))?;
            debug!(dir = %dir.display(), header = %header, "loaded override");
            headers.insert(dir.clone(), header);
        }

        Ok((index, headers))
    }

    /// Update every target file under `root` and report what happened.
    pub fn run(&self, root: &Path) -> Result<UpdateReport, UpdateError> {
        let started = Instant::now();
        let mut report = UpdateReport::new(root.to_path_buf(), Utc::now());

        let (index, headers) = self.load_overrides(root)?;
        report.directories_scanned = index.ownership.len();
        report.override_dirs = index.owners.len();

        self.rewrite_targets(root, &index, &headers, &mut report)?;

        report.duration_ms = started.elapsed().as_millis() as u64;
        info!(
            root = %root.display(),
            updated = report.files_updated,
            considered = report.files_considered,
            "tree update finished"
        );
        Ok(report)
    }

    /// Second pass: rewrite each target file using the already-parsed overrides.
    ///
    /// Override files are inputs only and are never rewritten, even when
    /// their name carries the target extension.
    fn rewrite_targets(
        &self,
        root: &Path,
        index: &OverrideIndex,
        headers: &BTreeMap<PathBuf, TypesHeader>,
        report: &mut UpdateReport,
    ) -> Result<(), UpdateError> {
        let suffix = self.config.target_suffix();
        let excludes = self.excludes()?;

        for entry in walk(root, &excludes) {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if !name.ends_with(&suffix) || name == self.config.override_file_name.as_str() {
                continue;
            }

            let path = entry.path();
            // Symlinks are followed only when they resolve to a regular file
            if !path.is_file() {
                continue;
            }
            report.files_considered += 1;

            let dir = path.parent().unwrap_or(root);
            if !index.contains_dir(dir) {
                warn!(path = %path.display(), "directory appeared after override scan, skipping");
                report.files_without_owner += 1;
                continue;
            }

            let header = match index.owner_of(dir).and_then(|owner| headers.get(owner)) {
                Some(header) => header,
                None => {
                    debug!(path = %path.display(), "no override in directory, skipping");
                    report.files_without_owner += 1;
                    continue;
                }
            };

            match update_file(path, header)? {
                HeaderUpdate::Updated { kind, .. } => {
                    info!(path = %path.display(), ?kind, "updated @Types header");
                    report.record_update(path.to_path_buf(), kind);
                }
                HeaderUpdate::NoChange => {
                    debug!(path = %path.display(), "already current");
                    report.files_unchanged += 1;
                }
            }
        }

        Ok(())
    }

    /// Update every target file under `root`; returns how many changed.
    pub fn update_tree(&self, root: &Path) -> Result<usize, UpdateError> {
        self.run(root).map(|report| report.files_updated)
    }

    fn excludes(&self) -> Result<crate::config::DirExcludes, UpdateError> {
        self.config
            .dir_excludes()
            .map_err(|e| UpdateError::Config(ConfigError::ValidationError(e.to_string())))
    }
}

/// Update `root` with the default configuration; returns how many files changed.
pub fn update_tree(root: &Path) -> Result<usize, UpdateError> {
    TreeUpdater::default().update_tree(root)
}

/// Rewrite one file if its header needs to change.
///
/// The written text is the exact output of [`apply_header`]; no newline
/// translation happens in either direction.
pub fn update_file(path: &Path, header: &TypesHeader) -> Result<HeaderUpdate, UpdateError> {
    let contents = fs::read_to_string(path).map_err(|source| UpdateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let update = apply_header(&contents, header.as_str());
    if let HeaderUpdate::Updated { ref text, .. } = update {
        fs::write(path, text).map_err(|source| UpdateError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(update)
}
