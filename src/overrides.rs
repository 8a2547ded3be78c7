//! Override discovery and parsing
//!
//! A directory owns a header only if it directly contains the override
//! file. Ownership is never inherited: a subdirectory without its own
//! override file has no owner, whatever its ancestors hold.

use chat_header::TypesHeader;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::DirExcludes;

/// Errors for reading an override file
#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error("{path} has bad @Types line: {line:?}")]
    Malformed { path: PathBuf, line: String },

    #[error("{path} is empty; expected a @Types line")]
    Empty { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl OverrideError {
    /// The override file this error refers to
    pub fn path(&self) -> &Path {
        match self {
            OverrideError::Malformed { path, .. }
            | OverrideError::Empty { path }
            | OverrideError::Io { path, .. } => path,
        }
    }
}

/// Read the override file at `path` and validate its first line.
///
/// Only the first line is inspected; anything after it is ignored.
pub fn read_override(path: &Path) -> Result<TypesHeader, OverrideError> {
    let io_err = |source| OverrideError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let mut first_line = String::new();
    let read = BufReader::new(file)
        .read_line(&mut first_line)
        .map_err(io_err)?;

    if read == 0 {
        return Err(OverrideError::Empty {
            path: path.to_path_buf(),
        });
    }

    TypesHeader::parse(&first_line).map_err(|_| OverrideError::Malformed {
        path: path.to_path_buf(),
        line: first_line.trim_end_matches(['\r', '\n']).to_string(),
    })
}

/// Which directories own an override file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideIndex {
    /// Directories that directly contain the override file
    pub owners: BTreeSet<PathBuf>,

    /// Every visited directory, mapped to itself when it is an owner
    pub ownership: BTreeMap<PathBuf, Option<PathBuf>>,
}

impl OverrideIndex {
    /// Owner of `dir`: `Some(dir)` when it holds an override, else `None`.
    ///
    /// Directories never visited also yield `None`.
    pub fn owner_of(&self, dir: &Path) -> Option<&Path> {
        self.ownership.get(dir).and_then(|owner| owner.as_deref())
    }

    /// Whether `dir` was visited during collection
    pub fn contains_dir(&self, dir: &Path) -> bool {
        self.ownership.contains_key(dir)
    }

    /// Split into the owner set and the ownership map
    pub fn into_parts(self) -> (BTreeSet<PathBuf>, BTreeMap<PathBuf, Option<PathBuf>>) {
        (self.owners, self.ownership)
    }
}

/// Walk `root` in name order, skipping excluded directories below the root.
pub(crate) fn walk(root: &Path, excludes: &DirExcludes) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
    let excludes = excludes.clone();
    WalkDir::new(root)
        .follow_links(false)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
        .into_iter()
        .filter_entry(move |entry| {
            !(entry.depth() > 0
                && entry.file_type().is_dir()
                && excludes.is_excluded(entry.file_name()))
        })
}

/// Find every directory under `root` and note which ones own an override.
pub fn collect_overrides(
    root: &Path,
    override_file_name: &str,
    excludes: &DirExcludes,
) -> Result<OverrideIndex, walkdir::Error> {
    let mut index = OverrideIndex::default();

    for entry in walk(root, excludes) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        let override_path = dir.join(override_file_name);
        if override_path.is_file() {
            debug!(dir = %dir.display(), "directory owns an override");
            index.owners.insert(dir.to_path_buf());
            index
                .ownership
                .insert(dir.to_path_buf(), Some(dir.to_path_buf()));
        } else {
            debug!(dir = %dir.display(), "directory has no override");
            index.ownership.insert(dir.to_path_buf(), None);
        }
    }

    Ok(index)
}
