//! Run report for a tree update

use chat_header::UpdateKind;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Totals for one run of the tree updater
#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    /// Root directory that was processed
    pub root: PathBuf,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,

    /// Directories visited (excluded directories not counted)
    pub directories_scanned: usize,

    /// Directories that own an override file
    pub override_dirs: usize,

    /// Target files seen
    pub files_considered: usize,

    /// Target files skipped because their directory has no override
    pub files_without_owner: usize,

    /// Target files that already had the right header (or had no record to anchor one)
    pub files_unchanged: usize,

    /// Target files rewritten
    pub files_updated: usize,

    /// Rewrites that inserted a new header
    pub headers_inserted: usize,

    /// Rewrites that replaced existing headers
    pub headers_replaced: usize,

    /// Rewritten files, in traversal order
    pub updated_paths: Vec<PathBuf>,
}

impl UpdateReport {
    pub(crate) fn new(root: PathBuf, started_at: DateTime<Utc>) -> Self {
        Self {
            root,
            started_at,
            duration_ms: 0,
            directories_scanned: 0,
            override_dirs: 0,
            files_considered: 0,
            files_without_owner: 0,
            files_unchanged: 0,
            files_updated: 0,
            headers_inserted: 0,
            headers_replaced: 0,
            updated_paths: Vec::new(),
        }
    }

    pub(crate) fn record_update(&mut self, path: PathBuf, kind: UpdateKind) {
        match kind {
            UpdateKind::Inserted => self.headers_inserted += 1,
            UpdateKind::Replaced { .. } => self.headers_replaced += 1,
        }
        self.files_updated += 1;
        self.updated_paths.push(path);
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Render a short human-readable summary
    pub fn to_human(&self) -> String {
        let mut out = format!(
            "Updated {} of {} CHAT file(s) under {} ({} inserted, {} replaced)\n",
            self.files_updated,
            self.files_considered,
            self.root.display(),
            self.headers_inserted,
            self.headers_replaced,
        );
        out.push_str(&format!(
            "  Directories: {} scanned, {} with overrides\n",
            self.directories_scanned, self.override_dirs
        ));
        out.push_str(&format!(
            "  Skipped: {} without override, {} already current\n",
            self.files_without_owner, self.files_unchanged
        ));
        for path in &self.updated_paths {
            out.push_str(&format!("  updated {}\n", path.display()));
        }
        out
    }
}
